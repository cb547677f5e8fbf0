//! Diagnostic observers for dependency injection traceability.
//!
//! Observers receive a callback for every build, cache hit and failure a
//! provider goes through. Identifiers are handed over in their printed
//! form so one observer can serve providers with different key types.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;

/// Observer trait for dependency injection resolution events.
///
/// Calls are made synchronously while resolving. Keep implementations
/// lightweight; the factory of the service being observed is waiting.
///
/// # Examples
///
/// ```
/// use lazy_di::{DiObserver, ServiceCollection, Resolver};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     events: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, service: &str) {
///         self.events.lock().unwrap().push(format!("start {}", service));
///     }
///
///     fn resolved(&self, service: &str, _duration: Duration) {
///         self.events.lock().unwrap().push(format!("done {}", service));
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let provider = ServiceCollection::new()
///     .add("config", |_| Ok(42u32))
///     .add("server", |r| Ok(*r.get::<u32>("config")? + 1))
///     .with_observer(recorder.clone())
///     .build();
///
/// provider.get::<u32>("server").unwrap();
/// assert_eq!(
///     *recorder.events.lock().unwrap(),
///     ["start server", "start config", "done config", "done server"]
/// );
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a factory is invoked.
    fn resolving(&self, service: &str);

    /// Called after a factory returned successfully and its instance was cached.
    fn resolved(&self, service: &str, duration: Duration);

    /// Called when a request was answered from the instance cache.
    fn cache_hit(&self, service: &str) {
        let _ = service;
    }

    /// Called when resolving a service failed, whatever the reason.
    fn failed(&self, service: &str, error: &DiError) {
        let _ = (service, error);
    }
}

/// Collection of observers attached to a provider.
#[derive(Clone, Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    /// Returns true if any observers are registered.
    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn resolving(&self, service: &str) {
        for observer in &self.observers {
            observer.resolving(service);
        }
    }

    pub(crate) fn resolved(&self, service: &str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(service, duration);
        }
    }

    pub(crate) fn cache_hit(&self, service: &str) {
        for observer in &self.observers {
            observer.cache_hit(service);
        }
    }

    pub(crate) fn failed(&self, service: &str, error: &DiError) {
        for observer in &self.observers {
            observer.failed(service, error);
        }
    }
}

/// Observer that writes every event through `tracing`.
///
/// Builds are logged at `debug`, cache hits at `trace` and failures at
/// `warn`, each tagged with the configured prefix.
///
/// ```
/// use lazy_di::{LoggingObserver, ServiceCollection};
/// use std::sync::Arc;
///
/// let provider = ServiceCollection::new()
///     .with_observer(Arc::new(LoggingObserver::with_prefix("[app-di]")))
///     .build();
/// # let _ = provider;
/// ```
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a logging observer with the default `[lazy-di]` prefix.
    pub fn new() -> Self {
        Self::with_prefix("[lazy-di]")
    }

    /// Creates a logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, service: &str) {
        tracing::debug!(prefix = %self.prefix, service, "building service");
    }

    fn resolved(&self, service: &str, duration: Duration) {
        tracing::debug!(prefix = %self.prefix, service, ?duration, "built service");
    }

    fn cache_hit(&self, service: &str) {
        tracing::trace!(prefix = %self.prefix, service, "served from cache");
    }

    fn failed(&self, service: &str, error: &DiError) {
        tracing::warn!(prefix = %self.prefix, service, %error, "resolution failed");
    }
}

/// Observer that counts resolution events.
///
/// ```
/// use lazy_di::{MetricsObserver, ServiceCollection, Resolver};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(MetricsObserver::new());
/// let provider = ServiceCollection::new()
///     .add("answer", |_| Ok(42u8))
///     .with_observer(metrics.clone())
///     .build();
///
/// provider.get::<u8>("answer").unwrap();
/// provider.get::<u8>("answer").unwrap();
/// let _ = provider.get::<u8>("question");
///
/// assert_eq!(metrics.build_count(), 1);
/// assert_eq!(metrics.cache_hit_count(), 1);
/// assert_eq!(metrics.failure_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MetricsObserver {
    builds: AtomicU64,
    cache_hits: AtomicU64,
    failures: AtomicU64,
    total_build_nanos: AtomicU64,
}

impl MetricsObserver {
    /// Creates a metrics observer with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of factories that completed successfully.
    pub fn build_count(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    /// Number of requests served from the instance cache.
    pub fn cache_hit_count(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Number of failed resolutions, including nested ones.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Total time spent inside successful factories.
    ///
    /// Nested builds are counted in their own entry and in their parent's.
    pub fn total_build_time(&self) -> Duration {
        Duration::from_nanos(self.total_build_nanos.load(Ordering::Relaxed))
    }

    /// Mean factory time, if anything was built.
    pub fn average_build_time(&self) -> Option<Duration> {
        let builds = self.build_count();
        if builds == 0 {
            None
        } else {
            Some(Duration::from_nanos(
                self.total_build_nanos.load(Ordering::Relaxed) / builds,
            ))
        }
    }

    /// Resets all counters.
    pub fn reset(&self) {
        self.builds.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.total_build_nanos.store(0, Ordering::Relaxed);
    }
}

impl DiObserver for MetricsObserver {
    fn resolving(&self, _service: &str) {}

    fn resolved(&self, _service: &str, duration: Duration) {
        self.builds.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_build_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    fn cache_hit(&self, _service: &str) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn failed(&self, _service: &str, _error: &DiError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}
