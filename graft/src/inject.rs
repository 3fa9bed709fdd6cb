use std::any::type_name;
use std::sync::RwLock;

use crate::{Diagnostic, DiagnosticSink, InjectError, Registry, TypeKey};

/// Nullable storage cell backing an injectable field.
///
/// A slot starts empty and is filled at most once per injection cycle: the
/// injection pass skips occupied slots (emitting a
/// [`Diagnostic::AlreadyAssigned`] warning) instead of overwriting them.
/// The cell is internally locked so candidates shared across threads stay
/// `Send + Sync`; all access through the cycle itself is single-threaded.
///
/// # Examples
///
/// ```rust
/// use graft::Slot;
/// use std::sync::Arc;
///
/// let slot: Slot<Arc<u32>> = Slot::empty();
/// assert!(slot.is_empty());
/// slot.set(Arc::new(7));
/// assert_eq!(*slot.get().unwrap(), 7);
/// slot.clear();
/// assert!(slot.is_empty());
/// ```
pub struct Slot<T> {
    value: RwLock<Option<T>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }
}

impl<T> Slot<T> {
    /// Creates an empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing any previous content.
    pub fn set(&self, value: T) {
        *self.value.write().unwrap() = Some(value);
    }

    /// Resets the slot to empty.
    pub fn clear(&self) {
        *self.value.write().unwrap() = None;
    }

    /// Checks whether the slot currently holds no value.
    pub fn is_empty(&self) -> bool {
        self.value.read().unwrap().is_none()
    }
}

impl<T> Slot<T>
where
    T: Clone,
{
    /// Returns a clone of the stored value, if any.
    pub fn get(&self) -> Option<T> {
        self.value.read().unwrap().clone()
    }
}

impl<T> Slot<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Returns the member binding describing this slot to the injection
    /// engine.
    ///
    /// `name` is the member's name within its enclosing type, used in errors
    /// and diagnostics.
    pub fn binding(&self, name: &'static str) -> MemberBinding<'_> {
        FieldBinding::new(
            name,
            TypeKey::of::<T>(),
            move || !self.is_empty(),
            move |registry: &Registry| match registry.get::<T>() {
                Some(value) => {
                    self.set(value);
                    true
                }
                None => false,
            },
            move || self.clear(),
        )
        .into()
    }
}

/// Binding of one injectable field or property slot.
///
/// Field bindings built from a [`Slot`] come from [`Slot::binding`];
/// property-style members with custom accessors construct one directly from
/// closures. Both are identical to the injection engine: an occupancy probe,
/// an assignment from the registry, and a reset.
pub struct FieldBinding<'a> {
    name: &'static str,
    key: TypeKey,
    occupied: Box<dyn Fn() -> bool + 'a>,
    assign: Box<dyn Fn(&Registry) -> bool + 'a>,
    clear: Box<dyn Fn() + 'a>,
}

impl<'a> FieldBinding<'a> {
    /// Creates a field binding from custom accessors.
    ///
    /// `assign` must resolve `key` against the registry and store the value,
    /// returning `false` on a registry miss.
    pub fn new<O, A, C>(name: &'static str, key: TypeKey, occupied: O, assign: A, clear: C) -> Self
    where
        O: Fn() -> bool + 'a,
        A: Fn(&Registry) -> bool + 'a,
        C: Fn() + 'a,
    {
        Self {
            name,
            key,
            occupied: Box::new(occupied),
            assign: Box::new(assign),
            clear: Box::new(clear),
        }
    }

    /// Returns the member's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the required type's key.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Checks whether the member currently holds a value.
    pub fn is_occupied(&self) -> bool {
        (self.occupied)()
    }

    /// Resolves the member's type against `registry` and assigns the result.
    ///
    /// Returns `false` if the registry holds no entry for the type.
    pub fn assign(&self, registry: &Registry) -> bool {
        (self.assign)(registry)
    }

    /// Resets the member to empty.
    pub fn clear(&self) {
        (self.clear)()
    }
}

/// Binding of one injectable method.
///
/// Method injection is all-or-nothing: every parameter resolves or the call
/// is rejected without invoking. Unlike fields, methods carry no
/// already-injected guard: they are re-runnable initializers and run once
/// per pass, unconditionally.
pub struct MethodBinding<'a> {
    name: &'static str,
    params: Vec<TypeKey>,
    invoke: Box<dyn Fn(&Registry) -> Result<(), TypeKey> + 'a>,
}

impl<'a> MethodBinding<'a> {
    /// Creates a method binding.
    ///
    /// `params` lists the parameter keys in declaration order. `invoke` must
    /// resolve each parameter in that order and call the method, returning
    /// the first unresolved parameter's key, without invoking, on a miss.
    pub fn new<F>(name: &'static str, params: Vec<TypeKey>, invoke: F) -> Self
    where
        F: Fn(&Registry) -> Result<(), TypeKey> + 'a,
    {
        Self {
            name,
            params,
            invoke: Box::new(invoke),
        }
    }

    /// Returns the member's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the parameter keys, in declaration order.
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    /// Resolves all parameters and invokes the method.
    ///
    /// Returns the first unresolved parameter's key on failure; the method is
    /// not invoked in that case.
    pub fn invoke(&self, registry: &Registry) -> Result<(), TypeKey> {
        (self.invoke)(registry)
    }
}

/// One inject-marked member of a target.
pub enum MemberBinding<'a> {
    Field(FieldBinding<'a>),
    Method(MethodBinding<'a>),
}

impl MemberBinding<'_> {
    /// Returns the member's name.
    pub fn name(&self) -> &'static str {
        match self {
            MemberBinding::Field(field) => field.name(),
            MemberBinding::Method(method) => method.name(),
        }
    }
}

impl<'a> From<FieldBinding<'a>> for MemberBinding<'a> {
    fn from(value: FieldBinding<'a>) -> Self {
        Self::Field(value)
    }
}

impl<'a> From<MethodBinding<'a>> for MemberBinding<'a> {
    fn from(value: MethodBinding<'a>) -> Self {
        Self::Method(value)
    }
}

/// Capability of receiving dependency instances.
///
/// A target exposes its inject-marked members as [`MemberBinding`]
/// descriptors, in declaration order. The `#[derive(Target)]` and
/// `#[target]` macros generate this impl; implementing it by hand is equally
/// valid and is how property-style members are declared.
///
/// # Examples
///
/// ```rust
/// use graft::{MemberBinding, Slot, Target};
/// use std::sync::Arc;
///
/// struct Greeter {
///     greeting: Slot<Arc<String>>,
/// }
///
/// impl Target for Greeter {
///     fn members(&self) -> Vec<MemberBinding<'_>> {
///         vec![self.greeting.binding("greeting")]
///     }
/// }
/// ```
pub trait Target: Send + Sync {
    /// Returns the target type's name, used in errors and diagnostics.
    fn type_name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Returns the target's inject-marked members, in declaration order.
    fn members(&self) -> Vec<MemberBinding<'_>>;
}

/// Resolves and assigns every inject-marked member of `target` from
/// `registry`.
///
/// Fields and properties are processed first, then methods, each class in
/// declaration order. An occupied field is skipped with a
/// [`Diagnostic::AlreadyAssigned`] warning on `sink`. The first unresolved
/// member fails with [`InjectError::UnresolvedDependency`] and halts all
/// remaining member processing on this target; members assigned before the
/// failure are not rolled back.
pub fn inject(
    registry: &Registry,
    target: &dyn Target,
    sink: &dyn DiagnosticSink,
) -> Result<(), InjectError> {
    let mut methods = Vec::new();
    for member in target.members() {
        match member {
            MemberBinding::Field(field) => {
                if field.is_occupied() {
                    sink.emit(Diagnostic::AlreadyAssigned {
                        target: target.type_name(),
                        member: field.name(),
                        key: field.key(),
                    });
                    continue;
                }
                if !field.assign(registry) {
                    return Err(InjectError::UnresolvedDependency {
                        target: target.type_name(),
                        member: field.name(),
                        key: field.key(),
                    });
                }
                tracing::trace!(
                    type_name = target.type_name(),
                    member = field.name(),
                    "Assigned member"
                );
            }
            MemberBinding::Method(method) => methods.push(method),
        }
    }
    for method in methods {
        method
            .invoke(registry)
            .map_err(|key| InjectError::UnresolvedDependency {
                target: target.type_name(),
                member: method.name(),
                key,
            })?;
        tracing::trace!(
            type_name = target.type_name(),
            member = method.name(),
            "Invoked inject method"
        );
    }
    Ok(())
}
