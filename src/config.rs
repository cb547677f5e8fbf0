//! Container configuration.
//!
//! Options are fixed when a [`ServiceCollection`](crate::ServiceCollection)
//! is built and travel with every provider derived from it. They can be
//! assembled in code, read from the environment, or (with the `config`
//! feature) deserialized from JSON.

use std::env;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default environment variable prefix used by [`ContainerOptions::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "LAZY_DI";

/// Default limit on nested builds.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Errors raised while reading container options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value could not be parsed for the named setting
    #[error("invalid value '{value}' for {setting}")]
    InvalidValue { setting: String, value: String },
    /// The JSON document was malformed
    #[cfg(feature = "config")]
    #[error("invalid options document: {0}")]
    Json(String),
}

/// How built services are retained by a provider.
///
/// # Examples
///
/// ```rust
/// use lazy_di::CachePolicy;
///
/// assert_eq!("weak".parse::<CachePolicy>().unwrap(), CachePolicy::Weak);
/// assert_eq!(CachePolicy::default(), CachePolicy::Retain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum CachePolicy {
    /// Every service is a singleton for the lifetime of the provider.
    #[default]
    Retain,
    /// The provider only keeps weak handles. A service that nobody holds
    /// any more is built again on its next resolution.
    Weak,
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePolicy::Retain => f.write_str("retain"),
            CachePolicy::Weak => f.write_str("weak"),
        }
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" | "singleton" => Ok(CachePolicy::Retain),
            "weak" => Ok(CachePolicy::Weak),
            _ => Err(ConfigError::InvalidValue {
                setting: "cache_policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Options controlling a provider's resolution behaviour.
///
/// # Examples
///
/// ```rust
/// use lazy_di::{CachePolicy, ContainerOptions, ServiceCollection};
///
/// let options = ContainerOptions::new()
///     .cache_policy(CachePolicy::Weak)
///     .max_depth(64);
///
/// let provider = ServiceCollection::new().with_options(options.clone()).build();
/// assert_eq!(provider.options(), &options);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Retention of built services
    pub cache_policy: CachePolicy,
    /// Maximum number of builds in flight at once
    pub max_depth: usize,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            cache_policy: CachePolicy::Retain,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ContainerOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache policy.
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Sets the maximum build depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Reads options from `LAZY_DI_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Reads options from `{PREFIX}_CACHE_POLICY` and `{PREFIX}_MAX_DEPTH`.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        let prefix = prefix.to_uppercase();

        if let Some(value) = read_var(&prefix, "CACHE_POLICY") {
            options.cache_policy = value.parse()?;
        }

        if let Some(value) = read_var(&prefix, "MAX_DEPTH") {
            options.max_depth = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                setting: "max_depth".to_string(),
                value: value.clone(),
            })?;
        }

        Ok(options)
    }

    /// Parses options from a JSON document. Missing fields keep their defaults.
    ///
    /// ```rust
    /// use lazy_di::{CachePolicy, ContainerOptions};
    ///
    /// let options = ContainerOptions::from_json(r#"{ "cache_policy": "weak" }"#).unwrap();
    /// assert_eq!(options.cache_policy, CachePolicy::Weak);
    /// assert_eq!(options.max_depth, 1024);
    /// ```
    #[cfg(feature = "config")]
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(document).map_err(|e| ConfigError::Json(e.to_string()))
    }
}

fn read_var(prefix: &str, name: &str) -> Option<String> {
    let key = if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}_{}", prefix, name)
    };
    env::var(key).ok()
}
