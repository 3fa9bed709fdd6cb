use std::sync::Arc;

use graft::{Candidate, Enumerate};

/// Host-owned collection of candidates, the reference object source.
///
/// Insertion order is the order candidates are handed to the injector, and
/// therefore the processing order within each cycle phase.
#[derive(Default)]
pub struct Stage {
    candidates: Vec<Arc<dyn Candidate>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate to the stage.
    pub fn add<T>(&mut self, candidate: impl Into<Arc<T>>) -> &mut Self
    where
        T: Candidate + 'static,
    {
        self.candidates.push(candidate.into());
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl Enumerate for Stage {
    fn enumerate_all(&self) -> Vec<Arc<dyn Candidate>> {
        self.candidates.clone()
    }
}
