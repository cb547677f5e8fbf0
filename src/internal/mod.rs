//! Internal implementation details.

pub(crate) mod cache;
pub(crate) mod circular;

pub(crate) use cache::InstanceCache;
pub(crate) use circular::{BuildStack, StackGuard};
