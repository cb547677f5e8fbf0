//! Service identifier types for the dependency injection container.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::hash::Hash;

/// Requirements for a service identifier.
///
/// Identifiers are opaque to the container: it only compares, hashes,
/// clones and prints them. Anything satisfying the bounds qualifies
/// automatically, which covers string keys as well as plain enums.
///
/// # Examples
///
/// ```rust
/// use lazy_di::{ServiceCollection, Resolver};
/// use std::fmt;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Services {
///     Config,
///     Server,
/// }
///
/// impl fmt::Display for Services {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "Services::{:?}", self)
///     }
/// }
///
/// let provider = ServiceCollection::<Services>::default()
///     .add(Services::Config, |_| Ok(8080u16))
///     .add(Services::Server, |r| Ok(format!("listening on {}", r.get::<u16>(Services::Config)?)))
///     .build();
///
/// assert_eq!(*provider.get_required::<String>(Services::Server), "listening on 8080");
/// ```
pub trait ServiceKey: Eq + Hash + Clone + fmt::Display + fmt::Debug + Send + Sync + 'static {}

impl<T> ServiceKey for T where T: Eq + Hash + Clone + fmt::Display + fmt::Debug + Send + Sync + 'static {}

/// Default string-backed service identifier.
///
/// Static names are stored without allocating; owned names are kept as
/// `String`. Equality and hashing only look at the text, so a key built
/// from `"db"` and one built from `String::from("db")` are the same key.
///
/// # Examples
///
/// ```rust
/// use lazy_di::Key;
///
/// let a = Key::from("database");
/// let b = Key::from(String::from("database"));
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "database");
/// assert_eq!(a.to_string(), "database");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Cow<'static, str>);

impl Key {
    /// Creates a key from a static name without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Key(Cow::Borrowed(name))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Key::from_static(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key(Cow::Owned(name))
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
