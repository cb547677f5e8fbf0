#![cfg(feature = "diagnostics")]

use lazy_di::{Resolver, ServiceCollection};

#[test]
fn test_debug_string_marks_built_services() {
    let sp = ServiceCollection::new()
        .add_instance("port", 8080u16)
        .add("name", |_| Ok(String::from("app")))
        .build();

    let before = sp.to_debug_string();
    assert!(before.starts_with("=== Service Provider Debug ===\n"));
    assert!(before.contains("Cache policy: retain\n"));
    assert!(before.contains("  name: alloc::string::String [unbuilt]\n"));
    assert!(before.contains("  port: u16 [unbuilt]\n"));

    sp.get_required::<u16>("port");

    let after = sp.to_debug_string();
    assert!(after.contains("  name: alloc::string::String [unbuilt]\n"));
    assert!(after.contains("  port: u16 [built]\n"));
}

#[test]
fn test_debug_string_lists_services_in_order() {
    let sp = ServiceCollection::new()
        .add_instance("zeta", 1u8)
        .add_instance("alpha", 2u8)
        .build();

    let dump = sp.to_debug_string();
    let alpha = dump.find("alpha").unwrap();
    let zeta = dump.find("zeta").unwrap();
    assert!(alpha < zeta);
}
