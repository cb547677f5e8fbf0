//! # lazy-di
//!
//! A minimal dependency injection container: a frozen table mapping
//! service identifiers to factories, and a provider that builds each
//! service lazily, exactly once, on its first request.
//!
//! ## Features
//!
//! - **Lazy singletons**: a factory runs the first time its service is requested and never again
//! - **Recursive resolution**: factories resolve their own dependencies through the same provider
//! - **Circular dependency detection**: cycles fail with the exact path (`a > b > a`)
//! - **Immutable registration**: every `add` returns a new collection; snapshots never change
//! - **Opaque identifiers**: string keys by default, any `Eq + Hash + Display` type (e.g. an enum) otherwise
//!
//! ## Quick Start
//!
//! ```rust
//! use lazy_di::{ServiceCollection, Resolver};
//! use std::sync::Arc;
//!
//! struct Database {
//!     connection_string: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let services = ServiceCollection::new()
//!     .add("database", |_| Ok(Database {
//!         connection_string: "postgres://localhost".to_string(),
//!     }))
//!     .add("users", |resolver| Ok(UserService {
//!         db: resolver.get("database")?,
//!     }));
//!
//! let provider = services.build();
//! let users = provider.get_required::<UserService>("users");
//! assert_eq!(users.db.connection_string, "postgres://localhost");
//! ```
//!
//! ## Circular Dependencies
//!
//! ```rust
//! use lazy_di::{DiError, ServiceCollection, Resolver};
//!
//! let provider = ServiceCollection::new()
//!     .add("a", |r| Ok(r.get::<u8>("b")?))
//!     .add("b", |r| Ok(r.get::<u8>("a")?))
//!     .build();
//!
//! match provider.get::<u8>("a") {
//!     Err(DiError::Circular(path)) => assert_eq!(path, ["a", "b", "a"]),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ## Adding To A Built Provider
//!
//! [`ServiceProvider::add`] returns a *new* provider with an empty cache.
//! Instances already built by the receiver are not carried over.

// Module declarations
pub mod collection;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod observer;
pub mod provider;
pub mod traits;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use collection::ServiceCollection;
pub use config::{CachePolicy, ConfigError, ContainerOptions};
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult, FactoryError};
pub use key::{Key, ServiceKey};
pub use observer::{DiObserver, LoggingObserver, MetricsObserver};
pub use provider::{ResolverContext, ServiceProvider};
pub use registration::AnyArc;
pub use traits::Resolver;
