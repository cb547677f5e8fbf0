//! Error types for the dependency injection container.

use thiserror::Error;

/// Boxed error produced by a user factory.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependency injection errors
///
/// Represents the conditions under which resolving a service can fail.
/// Identifiers are carried in their printable (`Display`) form so the
/// error type stays independent of the container's key type.
///
/// # Examples
///
/// ```rust
/// use lazy_di::{DiError, ServiceCollection, Resolver};
///
/// let provider = ServiceCollection::new().build();
/// match provider.get::<String>("missing") {
///     Err(DiError::NotFound(id)) => assert_eq!(id, "missing"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use lazy_di::DiError;
///
/// let circular = DiError::Circular(vec!["a".into(), "b".into(), "a".into()]);
/// assert_eq!(circular.to_string(), "Circular dependency: a > b > a");
/// ```
#[derive(Debug, Error)]
pub enum DiError {
    /// Service not registered
    #[error("Service not found: {0}")]
    NotFound(String),
    /// Circular dependency detected (path from the first occurrence through the repeat)
    #[error("Circular dependency: {}", .0.join(" > "))]
    Circular(Vec<String>),
    /// The built service is not of the requested type
    #[error("Type mismatch for {service}: expected {expected}")]
    TypeMismatch {
        service: String,
        expected: &'static str,
    },
    /// Maximum build depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// A factory failed for its own reasons
    #[error(transparent)]
    Factory(FactoryError),
}

impl DiError {
    /// Wraps an arbitrary error raised inside a factory.
    ///
    /// ```rust
    /// use lazy_di::DiError;
    ///
    /// let err = DiError::factory(std::io::Error::other("disk gone"));
    /// assert_eq!(err.to_string(), "disk gone");
    /// ```
    pub fn factory<E>(error: E) -> Self
    where
        E: Into<FactoryError>,
    {
        DiError::Factory(error.into())
    }

    /// Returns the cycle path for [`DiError::Circular`].
    pub fn circular_path(&self) -> Option<&[String]> {
        match self {
            DiError::Circular(path) => Some(path),
            _ => None,
        }
    }
}

/// Result type for DI operations
///
/// A convenience type alias for `Result<T, DiError>` used throughout lazy-di.
pub type DiResult<T> = Result<T, DiError>;
