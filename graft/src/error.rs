use std::fmt;

use crate::TypeKey;

/// Type alias for boxed errors that can be sent across threads.
///
/// Used by host-facing fallible operations layered on top of the core, such
/// as configuration loading in companion crates.
pub type StdError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by provider scanning and injection.
///
/// All variants are fatal to the operation that produced them and carry the
/// offending operation or member name together with the enclosing type's
/// name. Non-fatal conditions (an already-assigned slot) are reported as
/// [`Diagnostic`](crate::Diagnostic) events instead.
#[derive(Debug)]
pub enum InjectError {
    /// A provide-operation yielded no instance. Halts further provisioning
    /// from that provider; entries registered before the failure remain.
    EmptyProvision {
        provider: &'static str,
        operation: &'static str,
    },
    /// Two provide-operations claim the same [`TypeKey`] within one
    /// population cycle. The registry keeps its contents up to the failure;
    /// there is no rollback.
    DuplicateProvision {
        provider: &'static str,
        operation: &'static str,
        key: TypeKey,
    },
    /// An inject-marked member requires a type with no registry entry.
    /// Halts further member processing on that target only.
    UnresolvedDependency {
        target: &'static str,
        member: &'static str,
        key: TypeKey,
    },
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::EmptyProvision {
                provider,
                operation,
            } => {
                write!(f, "Provide operation {provider}::{operation} produced no instance")
            }
            InjectError::DuplicateProvision {
                provider,
                operation,
                key,
            } => {
                write!(f, "Duplicate provision of {key} by {provider}::{operation}")
            }
            InjectError::UnresolvedDependency {
                target,
                member,
                key,
            } => {
                write!(f, "Unresolved dependency {key} for {target}::{member}")
            }
        }
    }
}

impl std::error::Error for InjectError {}
