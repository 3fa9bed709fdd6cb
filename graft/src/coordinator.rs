use std::sync::Arc;

use crate::{
    Diagnostic, DiagnosticSink, InjectError, MemberBinding, Provider, Registry, Target,
    TracingSink, Unresolved, inject, scan_provider,
};

/// An object participating in injection cycles.
///
/// Candidates expose their capabilities through probe methods; the default
/// for each is "not capable". A type typically implements one or two probes:
///
/// ```rust
/// use graft::{Candidate, MemberBinding, Slot, Target};
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
///
/// impl Candidate for Greeter {
///     fn as_target(&self) -> Option<&dyn Target> {
///         Some(self)
///     }
/// }
/// ```
pub trait Candidate: Send + Sync {
    /// Returns the candidate's provider capability, if any.
    fn as_provider(&self) -> Option<&dyn Provider> {
        None
    }

    /// Returns the candidate's injection-target capability, if any.
    fn as_target(&self) -> Option<&dyn Target> {
        None
    }

    /// Returns the candidate's listener capability, if any.
    fn as_listener(&self) -> Option<&dyn Listener> {
        None
    }
}

/// Capability of being notified once injection has completed.
pub trait Listener: Send + Sync {
    /// Called after the injection cycle covering this candidate completed.
    fn on_injected(&self);
}

/// Source of the candidate set, supplied by the host environment.
///
/// The core never discovers objects itself; the host's object source (a
/// scene, a stage, a component registry) implements this and hands the
/// working set to the [`Injector`].
pub trait Enumerate {
    fn enumerate_all(&self) -> Vec<Arc<dyn Candidate>>;
}

/// Lifecycle phase of an [`Injector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No population cycle has completed yet.
    Uninitialized,
    /// The registry holds the result of a completed provider phase.
    Populated,
    /// A re-injection is in progress; the registry is transiently empty.
    Reinitializing,
}

/// Coordinates provider scanning and injection across a candidate set.
///
/// The injector owns the [`Registry`] and a [`DiagnosticSink`], and drives
/// the two-phase cycle: scan every provider-capable candidate, then inject
/// every target-capable one. It is reusable for the life of the host
/// process; [`reinject`](Injector::reinject) restarts from an empty registry
/// when the candidate set changes.
///
/// # Examples
///
/// ```rust
/// use graft::{Candidate, Injector, Provider, ProvideOp};
/// use std::sync::Arc;
///
/// struct Modules;
///
/// impl Provider for Modules {
///     fn operations(&self) -> Vec<ProvideOp<'_>> {
///         vec![ProvideOp::new("greeting", || Some(Arc::new("hello".to_string())))]
///     }
/// }
///
/// impl Candidate for Modules {
///     fn as_provider(&self) -> Option<&dyn Provider> {
///         Some(self)
///     }
/// }
///
/// let mut injector = Injector::new();
/// let candidates: Vec<Arc<dyn Candidate>> = vec![Arc::new(Modules)];
/// injector.run(&candidates).unwrap();
/// assert_eq!(injector.registry().get::<Arc<String>>().unwrap().as_str(), "hello");
/// ```
pub struct Injector {
    registry: Registry,
    sink: Box<dyn DiagnosticSink>,
    state: LifecycleState,
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl Injector {
    /// Creates an injector with an empty registry and the default
    /// [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// Creates an injector reporting diagnostics to `sink`.
    pub fn with_sink(sink: impl DiagnosticSink + 'static) -> Self {
        Self {
            registry: Registry::new(),
            sink: Box::new(sink),
            state: LifecycleState::Uninitialized,
        }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the registry for direct manipulation.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Registers an instance imperatively, replacing any previous entry for
    /// its type.
    ///
    /// Unlike provider scanning this overwrites on duplicate, since it is
    /// an explicit operator action rather than automatic discovery.
    pub fn register<T>(&mut self, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.registry.register(value);
    }

    /// Runs one injection cycle over `candidates`.
    ///
    /// First scans every provider-capable candidate into the registry; a
    /// provider error aborts the cycle before any injection happens. Then
    /// injects every target-capable candidate. A failing target does not
    /// prevent injection of the remaining targets; the first error is
    /// returned once the pass completes and later ones are logged.
    pub fn run(&mut self, candidates: &[Arc<dyn Candidate>]) -> Result<(), InjectError> {
        tracing::debug!(candidates = candidates.len(), "Injection cycle starting");
        for candidate in candidates {
            if let Some(provider) = candidate.as_provider() {
                scan_provider(&mut self.registry, provider)?;
            }
        }
        self.state = LifecycleState::Populated;
        let mut first_error = None;
        for candidate in candidates {
            if let Some(target) = candidate.as_target() {
                if let Err(err) = inject(&self.registry, target, self.sink.as_ref()) {
                    if first_error.is_none() {
                        first_error = Some(err);
                    } else {
                        tracing::error!(error = %err, "Further injection failure");
                    }
                }
            }
        }
        tracing::debug!(entries = self.registry.len(), "Injection cycle finished");
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Reports every empty field slot whose type no provider in `candidates`
    /// declares.
    ///
    /// Pure apart from mirroring each record to the diagnostic sink as
    /// [`Diagnostic::MissingProvision`]; neither the registry nor any
    /// candidate is mutated.
    pub fn validate(&self, candidates: &[Arc<dyn Candidate>]) -> Vec<Unresolved> {
        let report = crate::validate::validate(candidates);
        for record in &report {
            self.sink.emit(Diagnostic::MissingProvision {
                target: record.target,
                member: record.member,
                key: record.key,
            });
        }
        report
    }

    /// Invokes the completion callback on every listener-capable candidate.
    ///
    /// Call this after [`run`](Injector::run) has completed for the same
    /// candidate set; injection is then guaranteed complete for every
    /// listener.
    pub fn notify_listeners(&self, candidates: &[Arc<dyn Candidate>]) {
        let mut listeners = 0;
        for candidate in candidates {
            if let Some(listener) = candidate.as_listener() {
                listener.on_injected();
                listeners += 1;
            }
        }
        tracing::debug!(listeners, "Listeners notified");
    }

    /// Empties the registry without touching any already-assigned member.
    pub fn clear_registry(&mut self) {
        let entries = self.registry.len();
        self.registry.clear();
        self.sink.emit(Diagnostic::RegistryCleared { entries });
    }

    /// Clears the registry and re-executes [`run`](Injector::run) from
    /// scratch.
    ///
    /// Used when new providers or targets enter the candidate set after the
    /// initial cycle. Occupied fields of previously injected targets are
    /// left in place and reported as already assigned.
    pub fn reinject(&mut self, candidates: &[Arc<dyn Candidate>]) -> Result<(), InjectError> {
        self.state = LifecycleState::Reinitializing;
        self.registry.clear();
        self.run(candidates)
    }

    /// Resets every inject-marked field on every target-capable candidate
    /// back to empty, independent of the registry's state.
    pub fn clear_all_injected(&self, candidates: &[Arc<dyn Candidate>]) {
        let mut members = 0;
        for candidate in candidates {
            if let Some(target) = candidate.as_target() {
                for member in target.members() {
                    if let MemberBinding::Field(field) = member {
                        field.clear();
                        members += 1;
                    }
                }
            }
        }
        self.sink.emit(Diagnostic::MembersCleared { members });
    }
}
