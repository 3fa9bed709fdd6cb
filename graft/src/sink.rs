use std::sync::{Arc, Mutex};

use crate::TypeKey;

/// Non-fatal observations emitted during injection cycles.
///
/// Diagnostics are purely observational: emitting one never changes control
/// flow. Fatal conditions are [`InjectError`](crate::InjectError)s instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A field slot already held a value when injection reached it; the slot
    /// was left untouched.
    AlreadyAssigned {
        target: &'static str,
        member: &'static str,
        key: TypeKey,
    },
    /// Validation found an empty field slot whose type no scanned provider
    /// declares.
    MissingProvision {
        target: &'static str,
        member: &'static str,
        key: TypeKey,
    },
    /// The registry was cleared, dropping `entries` instances.
    RegistryCleared { entries: usize },
    /// Injected members were reset to empty across the candidate set.
    MembersCleared { members: usize },
}

/// Output channel for [`Diagnostic`] events.
///
/// The coordinator writes warnings, validation reports, and clear-operation
/// confirmations here. Implementations must not fail; the sink is a one-way
/// observational interface.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<S> DiagnosticSink for Arc<S>
where
    S: DiagnosticSink,
{
    fn emit(&self, diagnostic: Diagnostic) {
        S::emit(self, diagnostic);
    }
}

/// Sink forwarding diagnostics to the `tracing` ecosystem.
///
/// Already-assigned and missing-provision events map to warnings, clear
/// confirmations to info events. This is the default sink of
/// [`Injector`](crate::Injector).
#[derive(Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::AlreadyAssigned {
                target,
                member,
                key,
            } => {
                tracing::warn!(
                    type_name = target,
                    member,
                    key = %key,
                    "Member already assigned, skipping injection"
                );
            }
            Diagnostic::MissingProvision {
                target,
                member,
                key,
            } => {
                tracing::warn!(
                    type_name = target,
                    member,
                    key = %key,
                    "No provider declares the required type"
                );
            }
            Diagnostic::RegistryCleared { entries } => {
                tracing::info!(entries, "Registry cleared");
            }
            Diagnostic::MembersCleared { members } => {
                tracing::info!(members, "Injected members cleared");
            }
        }
    }
}

/// Sink retaining every diagnostic in memory.
///
/// Useful for inspecting injection behavior in tests or surfacing reports in
/// host tooling.
///
/// # Examples
///
/// ```rust
/// use graft::{Diagnostic, DiagnosticSink, MemorySink};
///
/// let sink = MemorySink::new();
/// sink.emit(Diagnostic::RegistryCleared { entries: 2 });
/// assert_eq!(sink.drain(), vec![Diagnostic::RegistryCleared { entries: 2 }]);
/// assert!(sink.drain().is_empty());
/// ```
#[derive(Default)]
pub struct MemorySink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all retained diagnostics, leaving the sink empty.
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap())
    }

    /// Returns a copy of the retained diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic);
    }
}
