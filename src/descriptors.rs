//! Service descriptors for introspection and diagnostics.

use crate::key::ServiceKey;
use crate::registration::Registry;

/// Service descriptor for introspection and diagnostics
///
/// Describes one registered definition: the identifier it answers to and
/// the Rust type its factory produces.
///
/// # Examples
///
/// ```rust
/// use lazy_di::ServiceCollection;
///
/// struct Database { url: String }
///
/// let services = ServiceCollection::new()
///     .add("db", |_| Ok(Database { url: "postgres://localhost".to_string() }))
///     .add_instance("port", 8080u16);
///
/// let descriptors = services.descriptors();
/// assert_eq!(descriptors.len(), 2);
/// assert_eq!(descriptors[0].id.as_str(), "db");
/// assert!(descriptors[0].type_name.ends_with("Database"));
/// assert_eq!(descriptors[1].type_name, "u16");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor<K> {
    /// Identifier the service is registered under
    pub id: K,
    /// Type produced by the factory
    pub type_name: &'static str,
}

impl<K: ServiceKey> ServiceDescriptor<K> {
    /// Collects descriptors from a registry, ordered by the identifiers' printed form.
    pub(crate) fn from_registry(registry: &Registry<K>) -> Vec<Self> {
        let mut descriptors: Vec<Self> = registry
            .iter()
            .map(|(id, registration)| ServiceDescriptor {
                id: id.clone(),
                type_name: registration.type_name,
            })
            .collect();
        descriptors.sort_by_cached_key(|d| d.id.to_string());
        descriptors
    }
}
