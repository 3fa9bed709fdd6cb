use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque identifier distinguishing one data type from another.
///
/// A `TypeKey` is the sole key of the [`Registry`]. It wraps the type's
/// runtime identity together with its name; equality and hashing use the
/// identity alone, the name is carried for diagnostics.
///
/// # Examples
///
/// ```rust
/// use graft::TypeKey;
/// use std::sync::Arc;
///
/// let key = TypeKey::of::<Arc<String>>();
/// assert_eq!(key, TypeKey::of::<Arc<String>>());
/// assert_ne!(key, TypeKey::of::<String>());
/// assert!(key.name().contains("String"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key identifying type `T`.
    pub fn of<T>() -> Self
    where
        T: 'static,
    {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the name of the keyed type.
    ///
    /// Intended for diagnostics only; the exact contents are not guaranteed
    /// to be stable across compiler versions.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-keyed store of available dependency instances.
///
/// The registry maps each [`TypeKey`] to exactly one instance at a time.
/// Typed retrieval clones the stored value, so instances are typically
/// shared handles such as `Arc<T>` and every consumer observes the same
/// underlying object.
///
/// Two insertion modes exist by contract: provider population (see
/// [`scan_provider`](crate::scan_provider)) refuses duplicate keys, while
/// imperative [`register`](Registry::register) overwrites (last write wins),
/// since it is an explicit operator action rather than automatic discovery.
///
/// # Examples
///
/// ```rust
/// use graft::Registry;
/// use std::sync::Arc;
///
/// let mut registry = Registry::new();
/// registry.register(Arc::new("postgres://localhost".to_string()));
///
/// let url = registry.get::<Arc<String>>().unwrap();
/// assert_eq!(url.as_str(), "postgres://localhost");
/// assert_eq!(registry.get::<Arc<i64>>(), None);
/// ```
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeKey, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an instance of type `T`, replacing any previous entry for
    /// that type.
    pub fn register<T>(&mut self, value: T)
    where
        T: Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        if self.entries.insert(key, Box::new(value)).is_some() {
            tracing::debug!(key = %key, "Replaced registry entry");
        }
    }

    /// Inserts a boxed instance under `key`, replacing any previous entry.
    ///
    /// The boxed value must be of the type identified by `key`; a mismatched
    /// pair is never observable through the typed accessors.
    pub fn set(&mut self, key: TypeKey, value: Box<dyn Any + Send + Sync>) {
        self.entries.insert(key, value);
    }

    /// Retrieves a clone of the instance stored for type `T`.
    ///
    /// Returns `None` on a miss; never fails.
    pub fn get<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.get_ref().cloned()
    }

    /// Retrieves a reference to the instance stored for type `T`.
    pub fn get_ref<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.entries
            .get(&TypeKey::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Checks whether an instance of type `T` is stored.
    pub fn contains<T>(&self) -> bool
    where
        T: 'static,
    {
        self.contains_key(TypeKey::of::<T>())
    }

    /// Checks whether an instance is stored under `key`.
    pub fn contains_key(&self, key: TypeKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Iterates over the keys of all stored instances, in no particular
    /// order.
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the number of stored instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether the registry holds no instances.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
