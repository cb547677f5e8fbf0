//! Resolver context for dependency injection.
//!
//! This module contains the ResolverContext type which provides
//! the interface for factory functions to resolve dependencies.

use crate::error::DiResult;
use crate::key::ServiceKey;
use crate::provider::ServiceProvider;
use crate::registration::AnyArc;
use crate::traits::Resolver;

/// Context passed to factory functions for resolving dependencies.
///
/// The context lets a factory call back into the provider that is
/// building it. It exposes resolution only: the definition table, the
/// instance cache and the build stack stay private to the provider.
///
/// # Examples
///
/// ```
/// use lazy_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Database { url: String }
/// struct UserService { db: Arc<Database> }
///
/// let provider = ServiceCollection::new()
///     .add_instance("db", Database { url: "postgres://localhost".to_string() })
///     .add("users", |resolver| {
///         // resolver is a ResolverContext that provides access to other services
///         Ok(UserService { db: resolver.get("db")? })
///     })
///     .build();
/// # assert_eq!(provider.get_required::<UserService>("users").db.url, "postgres://localhost");
/// ```
pub struct ResolverContext<'a, K: ServiceKey> {
    provider: &'a ServiceProvider<K>,
}

impl<'a, K: ServiceKey> ResolverContext<'a, K> {
    pub(crate) fn new(provider: &'a ServiceProvider<K>) -> Self {
        Self { provider }
    }

    /// Number of services currently being built, including the caller.
    pub fn depth(&self) -> usize {
        self.provider.build_depth()
    }
}

impl<K: ServiceKey> Resolver<K> for ResolverContext<'_, K> {
    fn resolve_any(&self, id: &K) -> DiResult<AnyArc> {
        self.provider.resolve_any(id)
    }
}
