use crate::registry::CategoryRegistry;

#[test]
fn test_first_seen_order() {
    let mut registry = CategoryRegistry::new();
    assert_eq!(registry.get_or_insert("foo"), (0, true));
    assert_eq!(registry.get_or_insert("bar"), (1, true));
    assert_eq!(registry.get_or_insert("foo"), (0, false));
    assert_eq!(registry.get_or_insert("baz"), (2, true));

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.names(), &["foo", "bar", "baz"]);
    assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["foo", "bar", "baz"]);
}

#[test]
fn test_lookup_is_exact() {
    let mut registry = CategoryRegistry::new();
    registry.get_or_insert("Foo");
    assert!(registry.contains("Foo"));
    assert!(!registry.contains("foo"));
    assert_eq!(registry.position("Foo"), Some(0));
    assert_eq!(registry.position("bar"), None);
    assert!(!registry.is_empty());
}
