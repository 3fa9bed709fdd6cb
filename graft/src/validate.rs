use std::collections::HashSet;
use std::sync::Arc;

use crate::{Candidate, MemberBinding, TypeKey};

/// Record of a field slot whose requirement no provider satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unresolved {
    /// Name of the enclosing target type.
    pub target: &'static str,
    /// Name of the member within the target.
    pub member: &'static str,
    /// The required type's key.
    pub key: TypeKey,
}

/// Cross-references declared provisions against declared requirements.
///
/// Computes the set of [`TypeKey`]s named by provide-operations across all
/// provider-capable candidates (descriptor metadata only, no operation is
/// invoked), then reports every field slot that is both currently empty and
/// of a type absent from that set. Purely structural: no resolution is
/// performed, no candidate or registry state is mutated, and methods are not
/// considered.
///
/// An empty result means every declared field requirement is satisfiable.
pub fn validate(candidates: &[Arc<dyn Candidate>]) -> Vec<Unresolved> {
    let mut provided = HashSet::new();
    for candidate in candidates {
        if let Some(provider) = candidate.as_provider() {
            for op in provider.operations() {
                provided.insert(op.key());
            }
        }
    }
    let mut report = Vec::new();
    for candidate in candidates {
        if let Some(target) = candidate.as_target() {
            for member in target.members() {
                if let MemberBinding::Field(field) = member {
                    if field.is_occupied() || provided.contains(&field.key()) {
                        continue;
                    }
                    report.push(Unresolved {
                        target: target.type_name(),
                        member: field.name(),
                        key: field.key(),
                    });
                }
            }
        }
    }
    report
}
