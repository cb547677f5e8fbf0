//! Storage for built service instances.

use std::sync::{Arc, Weak};

use crate::config::CachePolicy;
use crate::key::ServiceKey;
use crate::registration::{AnyArc, Map};

type AnyWeak = Weak<dyn std::any::Any + Send + Sync>;

enum Slot {
    Strong(AnyArc),
    Weak(AnyWeak),
}

/// Built services keyed by identifier.
///
/// Entries are only ever added after a factory returned successfully.
/// Under [`CachePolicy::Weak`] an entry whose instance was dropped reads
/// as absent and is overwritten by the next build.
pub(crate) struct InstanceCache<K> {
    policy: CachePolicy,
    slots: Map<K, Slot>,
}

impl<K: ServiceKey> InstanceCache<K> {
    pub(crate) fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            slots: Map::default(),
        }
    }

    pub(crate) fn get(&self, id: &K) -> Option<AnyArc> {
        match self.slots.get(id)? {
            Slot::Strong(instance) => Some(instance.clone()),
            Slot::Weak(handle) => handle.upgrade(),
        }
    }

    pub(crate) fn insert(&mut self, id: K, instance: &AnyArc) {
        let slot = match self.policy {
            CachePolicy::Retain => Slot::Strong(instance.clone()),
            CachePolicy::Weak => Slot::Weak(Arc::downgrade(instance)),
        };
        self.slots.insert(id, slot);
    }

    pub(crate) fn contains(&self, id: &K) -> bool {
        match self.slots.get(id) {
            Some(Slot::Strong(_)) => true,
            Some(Slot::Weak(handle)) => handle.strong_count() > 0,
            None => false,
        }
    }

    /// Number of live instances.
    pub(crate) fn len(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| match slot {
                Slot::Strong(_) => true,
                Slot::Weak(handle) => handle.strong_count() > 0,
            })
            .count()
    }
}
