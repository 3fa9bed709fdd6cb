use std::any::{Any, type_name};

use crate::{InjectError, Registry, TypeKey};

/// Descriptor of a single provide-operation.
///
/// Pairs the operation's name and provided [`TypeKey`] with a deferred
/// zero-argument closure that manufactures the instance. Building the
/// descriptor never runs the closure, so provided keys can be enumerated
/// without side effects; validation relies on this.
///
/// The closure yields `Option`: `None` means the operation could not produce
/// a usable instance, which [`scan_provider`] surfaces as
/// [`InjectError::EmptyProvision`].
pub struct ProvideOp<'a> {
    name: &'static str,
    key: TypeKey,
    produce: Box<dyn Fn() -> Option<Box<dyn Any + Send + Sync>> + 'a>,
}

impl<'a> ProvideOp<'a> {
    /// Creates a descriptor providing type `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graft::ProvideOp;
    /// use std::sync::Arc;
    ///
    /// let pool = Arc::new(42u32);
    /// let op = ProvideOp::new("pool", move || Some(pool.clone()));
    /// assert_eq!(op.name(), "pool");
    /// assert_eq!(op.key(), graft::TypeKey::of::<Arc<u32>>());
    /// ```
    pub fn new<T, F>(name: &'static str, produce: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Option<T> + 'a,
    {
        Self {
            name,
            key: TypeKey::of::<T>(),
            produce: Box::new(move || {
                produce().map(|v| Box::new(v) as Box<dyn Any + Send + Sync>)
            }),
        }
    }

    /// Returns the operation's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the provided type's key.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Invokes the operation, manufacturing one instance.
    pub fn produce(&self) -> Option<Box<dyn Any + Send + Sync>> {
        (self.produce)()
    }
}

/// Capability of manufacturing dependency instances.
///
/// A provider exposes its provide-operations as [`ProvideOp`] descriptors.
/// The `#[provider]` attribute macro generates this impl from
/// `#[provide]`-marked methods; implementing it by hand is equally valid.
///
/// # Examples
///
/// ```rust
/// use graft::{Provider, ProvideOp};
/// use std::any::type_name;
/// use std::sync::Arc;
///
/// struct Modules {
///     pool: Arc<u32>,
/// }
///
/// impl Provider for Modules {
///     fn type_name(&self) -> &'static str {
///         type_name::<Self>()
///     }
///
///     fn operations(&self) -> Vec<ProvideOp<'_>> {
///         vec![ProvideOp::new("pool", move || Some(self.pool.clone()))]
///     }
/// }
/// ```
pub trait Provider: Send + Sync {
    /// Returns the provider type's name, used in errors and diagnostics.
    fn type_name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Returns the provider's provide-operations, in declaration order.
    fn operations(&self) -> Vec<ProvideOp<'_>>;
}

/// Runs every provide-operation of `provider` and inserts the results into
/// `registry`.
///
/// Insertion refuses duplicate keys: if the registry already holds an entry
/// for an operation's [`TypeKey`], scanning fails with
/// [`InjectError::DuplicateProvision`] and the registry keeps its contents
/// up to that point. An operation producing no instance fails with
/// [`InjectError::EmptyProvision`] and halts further provisioning from this
/// provider.
pub fn scan_provider(registry: &mut Registry, provider: &dyn Provider) -> Result<(), InjectError> {
    for op in provider.operations() {
        let value = op.produce().ok_or(InjectError::EmptyProvision {
            provider: provider.type_name(),
            operation: op.name(),
        })?;
        if registry.contains_key(op.key()) {
            return Err(InjectError::DuplicateProvision {
                provider: provider.type_name(),
                operation: op.name(),
                key: op.key(),
            });
        }
        tracing::debug!(
            provider = provider.type_name(),
            operation = op.name(),
            key = %op.key(),
            "Registered provision"
        );
        registry.set(op.key(), value);
    }
    Ok(())
}
