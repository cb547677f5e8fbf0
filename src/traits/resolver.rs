//! Resolver trait for service resolution.

use std::any::type_name;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::registration::AnyArc;

/// Service resolution interface shared by the provider and the context
/// handed to factories.
///
/// Only [`resolve_any`](Resolver::resolve_any) must be implemented; the
/// typed accessors are built on top of it.
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
///     .add("db", |_| Ok(Database { url: "postgres://localhost".to_string() }))
///     .add("users", |r| Ok(UserService { db: r.get("db")? }))
///     .build();
///
/// let users = provider.get::<UserService>("users").unwrap();
/// assert_eq!(users.db.url, "postgres://localhost");
/// assert!(Arc::ptr_eq(&users.db, &provider.get_required::<Database>("db")));
/// ```
pub trait Resolver<K: ServiceKey> {
    /// Resolves a service as a type-erased instance.
    ///
    /// Builds the service on first request and serves the cached instance
    /// afterwards.
    ///
    /// # Errors
    ///
    /// * [`DiError::NotFound`] - nothing is registered under `id`
    /// * [`DiError::Circular`] - `id` is already being built further up the chain
    /// * [`DiError::DepthExceeded`] - too many builds are in flight
    /// * any error returned by the factory, unchanged
    fn resolve_any(&self, id: &K) -> DiResult<AnyArc>;

    /// Resolves a service and downcasts it to `T`.
    ///
    /// # Errors
    ///
    /// Everything [`resolve_any`](Resolver::resolve_any) returns, plus
    /// [`DiError::TypeMismatch`] when the service is not a `T`.
    fn get<T: Send + Sync + 'static>(&self, id: impl Into<K>) -> DiResult<Arc<T>> {
        let id = id.into();
        let any = self.resolve_any(&id)?;
        any.downcast::<T>().map_err(|_| DiError::TypeMismatch {
            service: id.to_string(),
            expected: type_name::<T>(),
        })
    }

    /// Resolves a service and downcasts it to `T`.
    ///
    /// # Panics
    ///
    /// Panics if the service cannot be resolved or is not a `T`.
    fn get_required<T: Send + Sync + 'static>(&self, id: impl Into<K>) -> Arc<T> {
        let id = id.into();
        match self.get::<T>(id.clone()) {
            Ok(service) => service,
            Err(e) => panic!("Failed to resolve required service '{}': {}", id, e),
        }
    }

    /// Resolves a service, mapping [`DiError::NotFound`] for `id` itself to `None`.
    ///
    /// A missing *dependency* of `id` is still an error.
    fn get_optional<T: Send + Sync + 'static>(&self, id: impl Into<K>) -> DiResult<Option<Arc<T>>> {
        let id = id.into();
        match self.get::<T>(id.clone()) {
            Ok(service) => Ok(Some(service)),
            Err(DiError::NotFound(missing)) if missing == id.to_string() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
