//! Service collection module for dependency injection.
//!
//! This module contains the ServiceCollection type, the immutable builder
//! that accumulates definitions and produces service providers.

use std::any::type_name;
use std::sync::Arc;

use crate::config::ContainerOptions;
use crate::descriptors::ServiceDescriptor;
use crate::error::DiResult;
use crate::key::{Key, ServiceKey};
use crate::observer::{DiObserver, Observers};
use crate::provider::{ResolverContext, ServiceProvider};
use crate::registration::{AnyArc, Ctor, Registration, Registry};

/// Immutable builder of service definitions.
///
/// Every registration method borrows the collection and returns a new
/// one; the receiver never changes. A snapshot taken earlier stays valid
/// and never sees later registrations, so a half-configured collection
/// cannot leak into a provider that was already built from it.
///
/// Registering an identifier twice keeps the last factory.
///
/// # Examples
///
/// ```rust
/// use lazy_di::{ServiceCollection, Resolver};
///
/// let base = ServiceCollection::new();
/// let extended = base.add("greeting", |_| Ok(String::from("hello")));
///
/// assert!(base.build().get::<String>("greeting").is_err());
/// assert_eq!(*extended.build().get_required::<String>("greeting"), "hello");
/// ```
pub struct ServiceCollection<K: ServiceKey = Key> {
    registry: Arc<Registry<K>>,
    options: ContainerOptions,
    observers: Observers,
}

impl ServiceCollection<Key> {
    /// Creates a new empty service collection keyed by [`Key`].
    ///
    /// Use [`ServiceCollection::default`] for other identifier types.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: ServiceKey> Default for ServiceCollection<K> {
    fn default() -> Self {
        Self::from_parts(Arc::new(Registry::new()), ContainerOptions::default(), Observers::new())
    }
}

impl<K: ServiceKey> Clone for ServiceCollection<K> {
    fn clone(&self) -> Self {
        Self::from_parts(self.registry.clone(), self.options.clone(), self.observers.clone())
    }
}

impl<K: ServiceKey> ServiceCollection<K> {
    pub(crate) fn from_parts(registry: Arc<Registry<K>>, options: ContainerOptions, observers: Observers) -> Self {
        Self {
            registry,
            options,
            observers,
        }
    }

    fn with_registration(&self, id: K, registration: Registration<K>) -> Self {
        let mut registry = Registry::clone(&self.registry);
        registry.insert(id, registration);
        Self::from_parts(Arc::new(registry), self.options.clone(), self.observers.clone())
    }

    /// Registers a factory building a `T`.
    ///
    /// The factory runs on the first request for `id`; its result is
    /// wrapped in an `Arc` and cached. It receives a [`ResolverContext`]
    /// to resolve its own dependencies.
    ///
    /// A factory returning `Ok(r.get::<T>(..)?)` stores an `Arc<Arc<T>>`,
    /// which only resolves as `Arc<T>`. Use [`add_shared`](Self::add_shared)
    /// to register an alias of another service.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_di::{ServiceCollection, Resolver};
    /// use std::sync::Arc;
    ///
    /// struct Database { url: String }
    /// struct UserService { db: Arc<Database> }
    ///
    /// let services = ServiceCollection::new()
    ///     .add("db", |_| Ok(Database { url: "postgres://localhost".to_string() }))
    ///     .add("users", |r| Ok(UserService { db: r.get("db")? }));
    /// # assert_eq!(services.len(), 2);
    /// ```
    pub fn add<T, F>(&self, id: impl Into<K>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_, K>) -> DiResult<T> + Send + Sync + 'static,
    {
        let ctor: Ctor<K> = Arc::new(move |r: &ResolverContext<'_, K>| -> DiResult<AnyArc> {
            let instance: AnyArc = Arc::new(factory(r)?);
            Ok(instance)
        });
        self.with_registration(id.into(), Registration::new(ctor, type_name::<T>()))
    }

    /// Registers a factory that hands out an `Arc<T>` it already holds.
    ///
    /// The returned `Arc` is cached as-is, so a factory forwarding another
    /// service makes both identifiers resolve to the very same instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_di::{ServiceCollection, Resolver};
    /// use std::sync::Arc;
    ///
    /// struct Mailer;
    ///
    /// let provider = ServiceCollection::new()
    ///     .add_shared("mailer", |r| r.get::<Mailer>("smtp"))
    ///     .add("smtp", |_| Ok(Mailer))
    ///     .build();
    ///
    /// assert!(Arc::ptr_eq(
    ///     &provider.get_required::<Mailer>("smtp"),
    ///     &provider.get_required::<Mailer>("mailer"),
    /// ));
    /// ```
    pub fn add_shared<T, F>(&self, id: impl Into<K>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_, K>) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        let ctor: Ctor<K> = Arc::new(move |r: &ResolverContext<'_, K>| -> DiResult<AnyArc> {
            let shared: AnyArc = factory(r)?;
            Ok(shared)
        });
        self.with_registration(id.into(), Registration::new(ctor, type_name::<T>()))
    }

    /// Registers a pre-built value.
    ///
    /// Every resolution of `id` yields the same `Arc` around `value`.
    pub fn add_instance<T>(&self, id: impl Into<K>, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let instance: AnyArc = Arc::new(value);
        let ctor: Ctor<K> = Arc::new(move |_: &ResolverContext<'_, K>| -> DiResult<AnyArc> {
            Ok(instance.clone())
        });
        self.with_registration(id.into(), Registration::new(ctor, type_name::<T>()))
    }

    /// Registers a factory only if `id` is not registered yet.
    ///
    /// Returns `None` when `id` is already taken.
    pub fn try_add<T, F>(&self, id: impl Into<K>, factory: F) -> Option<Self>
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_, K>) -> DiResult<T> + Send + Sync + 'static,
    {
        let id = id.into();
        if self.registry.contains_key(&id) {
            None
        } else {
            Some(self.add(id, factory))
        }
    }

    /// Returns a collection whose providers use `options`.
    pub fn with_options(&self, options: ContainerOptions) -> Self {
        Self::from_parts(self.registry.clone(), options, self.observers.clone())
    }

    /// Returns a collection whose providers report to `observer` as well.
    pub fn with_observer(&self, observer: Arc<dyn DiObserver>) -> Self {
        let mut observers = self.observers.clone();
        observers.add(observer);
        Self::from_parts(self.registry.clone(), self.options.clone(), observers)
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

    /// Descriptors of every registered definition, ordered by identifier.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor<K>> {
        ServiceDescriptor::from_registry(&self.registry)
    }

    /// Options the built providers will use.
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// Freezes the definitions into a provider with an empty cache.
    ///
    /// The collection itself stays usable; building it again yields an
    /// independent provider with its own cache.
    pub fn build(&self) -> ServiceProvider<K> {
        ServiceProvider::new(self.registry.clone(), self.options.clone(), self.observers.clone())
    }
}
