//! Service provider module for dependency injection.
//!
//! This module contains the ServiceProvider type, which resolves
//! identifiers against a frozen definition table.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::collection::ServiceCollection;
use crate::config::ContainerOptions;
use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::{BuildStack, InstanceCache, StackGuard};
use crate::key::{Key, ServiceKey};
use crate::observer::Observers;
use crate::registration::{AnyArc, Registry};
use crate::traits::Resolver;

pub mod context;
pub use context::ResolverContext;

/// Service provider for resolving dependencies from the DI container.
///
/// A provider owns a frozen definition table, an instance cache and a
/// build stack. Each service is built the first time it is requested,
/// by running its factory with a [`ResolverContext`] that points back at
/// this provider; the result is cached and every later request returns
/// the same instance. A factory runs at most once per provider (under the
/// default [`CachePolicy::Retain`](crate::CachePolicy::Retain)).
///
/// # Thread Safety
///
/// The cache and the build stack are unsynchronized. A provider can be
/// moved to another thread (`Send`) but not shared between threads
/// (`!Sync`); wrap it in a lock if several threads need it.
///
/// # Examples
///
/// ```
/// use lazy_di::{ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// struct Config { port: u16 }
/// struct Server { config: Arc<Config> }
///
/// let provider = ServiceCollection::new()
///     .add("config", |_| Ok(Config { port: 8080 }))
///     .add("server", |r| Ok(Server { config: r.get("config")? }))
///     .build();
///
/// let server = provider.get::<Server>("server").unwrap();
/// assert_eq!(server.config.port, 8080);
/// assert!(Arc::ptr_eq(&server, &provider.get_required::<Server>("server")));
/// ```
pub struct ServiceProvider<K: ServiceKey = Key> {
    registry: Arc<Registry<K>>,
    options: ContainerOptions,
    observers: Observers,
    cache: RefCell<InstanceCache<K>>,
    stack: RefCell<BuildStack<K>>,
}

impl<K: ServiceKey> ServiceProvider<K> {
    /// Creates a provider with an empty cache over the given definitions.
    pub(crate) fn new(registry: Arc<Registry<K>>, options: ContainerOptions, observers: Observers) -> Self {
        tracing::debug!(
            services = registry.len(),
            cache_policy = %options.cache_policy,
            "service provider built"
        );
        Self {
            cache: RefCell::new(InstanceCache::new(options.cache_policy)),
            stack: RefCell::new(BuildStack::new()),
            registry,
            options,
            observers,
        }
    }

    /// Returns a new provider with one more definition.
    ///
    /// **The new provider starts with an empty cache.** Services already
    /// built by `self` are not carried over, even when their factories
    /// are unchanged: resolving them through the returned provider runs
    /// their factories again and yields new instances. `self` is left
    /// untouched and keeps its own cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_di::{ServiceCollection, Resolver};
    /// use std::sync::Arc;
    ///
    /// let first = ServiceCollection::new()
    ///     .add("a", |_| Ok(String::from("a")))
    ///     .build();
    /// let a1 = first.get_required::<String>("a");
    ///
    /// let second = first.add("b", |_| Ok(String::from("b")));
    /// let a2 = second.get_required::<String>("a");
    ///
    /// assert!(!Arc::ptr_eq(&a1, &a2));
    /// assert!(Arc::ptr_eq(&a1, &first.get_required::<String>("a")));
    /// assert!(first.get::<String>("b").is_err());
    /// ```
    pub fn add<T, F>(&self, id: impl Into<K>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_, K>) -> DiResult<T> + Send + Sync + 'static,
    {
        self.collection().add(id, factory).build()
    }

    /// Like [`add`](Self::add) for a factory that hands out an existing `Arc`.
    ///
    /// The returned provider starts with an empty cache.
    pub fn add_shared<T, F>(&self, id: impl Into<K>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_, K>) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        self.collection().add_shared(id, factory).build()
    }

    /// Like [`add`](Self::add) for a pre-built value.
    ///
    /// The returned provider starts with an empty cache.
    pub fn add_instance<T>(&self, id: impl Into<K>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.collection().add_instance(id, value).build()
    }

    /// Snapshot of this provider's definitions, options and observers.
    pub fn collection(&self) -> ServiceCollection<K> {
        ServiceCollection::from_parts(self.registry.clone(), self.options.clone(), self.observers.clone())
    }

    /// Returns true if a factory is registered under `id`.
    pub fn contains(&self, id: &K) -> bool {
        self.registry.contains_key(id)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    /// Descriptors of every registered definition.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor<K>> {
        ServiceDescriptor::from_registry(&self.registry)
    }

    /// Returns true if `id` has a live cached instance.
    pub fn is_built(&self, id: &K) -> bool {
        self.cache.borrow().contains(id)
    }

    /// Number of live cached instances.
    pub fn built_count(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Options this provider was built with.
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    pub(crate) fn build_depth(&self) -> usize {
        self.stack.borrow().depth()
    }

    /// Renders every definition with its type and whether it is built yet.
    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Service Provider Debug ===\n");
        s.push_str(&format!("Cache policy: {}\n", self.options.cache_policy));
        s.push_str("Services:\n");
        for descriptor in self.descriptors() {
            let state = if self.is_built(&descriptor.id) { "built" } else { "unbuilt" };
            s.push_str(&format!("  {}: {} [{}]\n", descriptor.id, descriptor.type_name, state));
        }
        s
    }

    fn resolve_impl(&self, id: &K) -> DiResult<AnyArc> {
        let registration = self
            .registry
            .get(id)
            .ok_or_else(|| DiError::NotFound(id.to_string()))?;

        let cached = self.cache.borrow().get(id);
        if let Some(instance) = cached {
            tracing::trace!(service = %id, "served from cache");
            if self.observers.has_observers() {
                self.observers.cache_hit(&id.to_string());
            }
            return Ok(instance);
        }

        let _guard = StackGuard::enter(&self.stack, id, self.options.max_depth)?;

        tracing::debug!(service = %id, type_name = registration.type_name, "building service");
        let start = self.observers.has_observers().then(|| {
            self.observers.resolving(&id.to_string());
            Instant::now()
        });

        let ctx = ResolverContext::new(self);
        let instance = (registration.ctor)(&ctx)?;
        self.cache.borrow_mut().insert(id.clone(), &instance);

        if let Some(start) = start {
            self.observers.resolved(&id.to_string(), start.elapsed());
        }
        Ok(instance)
    }
}

impl<K: ServiceKey> Resolver<K> for ServiceProvider<K> {
    fn resolve_any(&self, id: &K) -> DiResult<AnyArc> {
        let result = self.resolve_impl(id);
        if let Err(error) = &result {
            if self.observers.has_observers() {
                self.observers.failed(&id.to_string(), error);
            }
        }
        result
    }
}

impl<K: ServiceKey> fmt::Debug for ServiceProvider<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("services", &self.registry.len())
            .field("built", &self.built_count())
            .field("options", &self.options)
            .field("observers", &self.observers.len())
            .finish()
    }
}
