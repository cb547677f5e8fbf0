//! Service registration types.

use std::any::Any;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::ServiceKey;
use crate::provider::ResolverContext;

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

/// Type-erased shared service instance.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Type-erased factory as stored in the definition table.
pub(crate) type Ctor<K> = Arc<dyn for<'a> Fn(&ResolverContext<'a, K>) -> DiResult<AnyArc> + Send + Sync>;

/// One definition: how to build a service and what it builds.
pub(crate) struct Registration<K: ServiceKey> {
    pub(crate) ctor: Ctor<K>,
    /// Rust type produced by the factory, for diagnostics
    pub(crate) type_name: &'static str,
}

impl<K: ServiceKey> Clone for Registration<K> {
    fn clone(&self) -> Self {
        Self {
            ctor: self.ctor.clone(),
            type_name: self.type_name,
        }
    }
}

impl<K: ServiceKey> Registration<K> {
    pub(crate) fn new(ctor: Ctor<K>, type_name: &'static str) -> Self {
        Self { ctor, type_name }
    }
}

/// Definition table mapping identifiers to factories.
pub(crate) struct Registry<K: ServiceKey> {
    entries: Map<K, Registration<K>>,
}

impl<K> Clone for Registry<K>
where
    K: ServiceKey,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K: ServiceKey> Registry<K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Map::default(),
        }
    }

    /// Inserts a registration, replacing any previous one for `id`.
    pub(crate) fn insert(&mut self, id: K, registration: Registration<K>) {
        if self.entries.insert(id.clone(), registration).is_some() {
            tracing::trace!(service = %id, "replaced existing registration");
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: &K) -> Option<&Registration<K>> {
        self.entries.get(id)
    }

    #[inline]
    pub(crate) fn contains_key(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &Registration<K>)> {
        self.entries.iter()
    }
}
