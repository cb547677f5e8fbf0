/// Unit tests for Key type methods

use lazy_di::Key;
use std::collections::{BTreeSet, HashMap};

#[test]
fn test_key_from_static_and_owned_are_equal() {
    let borrowed = Key::from_static("database");
    let owned = Key::from(String::from("database"));

    assert_eq!(borrowed, owned);
    assert_eq!(Key::from("database"), owned);
}

#[test]
fn test_key_display_is_the_name() {
    let key = Key::from("users");
    assert_eq!(key.to_string(), "users");
    assert_eq!(key.as_str(), "users");
    assert_eq!(AsRef::<str>::as_ref(&key), "users");
}

#[test]
fn test_key_const_construction() {
    const DATABASE: Key = Key::from_static("database");
    assert_eq!(DATABASE.as_str(), "database");
}

#[test]
fn test_key_hash_lookup_by_str() {
    let mut map = HashMap::new();
    map.insert(Key::from(String::from("cache")), 1);

    assert_eq!(map.get("cache"), Some(&1));
    assert_eq!(map.get(&Key::from("cache")), Some(&1));
    assert_eq!(map.get("other"), None);
}

#[test]
fn test_key_ordering_follows_text() {
    let keys: BTreeSet<Key> = ["b", "a", "c"].into_iter().map(Key::from).collect();
    let names: Vec<&str> = keys.iter().map(Key::as_str).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn test_key_from_reference_clones() {
    let key = Key::from("shared");
    let copy = Key::from(&key);
    assert_eq!(key, copy);
}

#[test]
fn test_keys_differ_by_text() {
    assert_ne!(Key::from("a"), Key::from("A"));
    assert_ne!(Key::from("a"), Key::from("a "));
}
