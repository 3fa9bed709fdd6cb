use std::sync::Arc;

use graft::{Registry, TypeKey};

#[derive(Debug, PartialEq)]
struct Endpoint {
    url: String,
}

#[test]
fn test_type_key_identity() {
    assert_eq!(TypeKey::of::<Endpoint>(), TypeKey::of::<Endpoint>());
    assert_ne!(TypeKey::of::<Endpoint>(), TypeKey::of::<Arc<Endpoint>>());
    assert_ne!(TypeKey::of::<u32>(), TypeKey::of::<i32>());
}

#[test]
fn test_type_key_name() {
    let key = TypeKey::of::<Arc<Endpoint>>();
    assert!(key.name().contains("Endpoint"));
    assert_eq!(format!("{key}"), key.name());
}

#[test]
fn test_register_and_get() {
    let mut registry = Registry::new();
    assert!(registry.is_empty());

    registry.register(Arc::new(Endpoint {
        url: "localhost:5432".to_string(),
    }));

    assert_eq!(registry.len(), 1);
    assert!(registry.contains::<Arc<Endpoint>>());
    assert!(registry.contains_key(TypeKey::of::<Arc<Endpoint>>()));

    let endpoint = registry.get::<Arc<Endpoint>>().unwrap();
    assert_eq!(endpoint.url, "localhost:5432");
}

#[test]
fn test_get_miss() {
    let registry = Registry::new();
    assert_eq!(registry.get::<Arc<Endpoint>>(), None);
    assert!(registry.get_ref::<Arc<Endpoint>>().is_none());
    assert!(!registry.contains::<Arc<Endpoint>>());
}

#[test]
fn test_get_returns_same_instance() {
    let mut registry = Registry::new();
    let endpoint = Arc::new(Endpoint {
        url: "localhost".to_string(),
    });
    registry.register(endpoint.clone());

    let first = registry.get::<Arc<Endpoint>>().unwrap();
    let second = registry.get::<Arc<Endpoint>>().unwrap();
    assert!(Arc::ptr_eq(&first, &endpoint));
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_register_overwrites() {
    let mut registry = Registry::new();
    let first = Arc::new(Endpoint {
        url: "first".to_string(),
    });
    let second = Arc::new(Endpoint {
        url: "second".to_string(),
    });

    registry.register(first);
    registry.register(second.clone());

    assert_eq!(registry.len(), 1);
    assert!(Arc::ptr_eq(&registry.get::<Arc<Endpoint>>().unwrap(), &second));
}

#[test]
fn test_set_boxed() {
    let mut registry = Registry::new();
    registry.set(TypeKey::of::<Arc<Endpoint>>(), Box::new(Arc::new(Endpoint {
        url: "boxed".to_string(),
    })));

    assert_eq!(registry.get::<Arc<Endpoint>>().unwrap().url, "boxed");
}

#[test]
fn test_keys_and_clear() {
    let mut registry = Registry::new();
    registry.register(7u32);
    registry.register("name".to_string());

    let keys: Vec<TypeKey> = registry.keys().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&TypeKey::of::<u32>()));
    assert!(keys.contains(&TypeKey::of::<String>()));

    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.get::<u32>(), None);
}
