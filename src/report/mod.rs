//! Violation and error aggregation for one analysis run

use crate::{ProcessingError, Violation};
use serde::{Deserialize, Serialize};

/// Ordered aggregation of rule violations and processing errors
///
/// Created empty per run and populated during traversal. Both sequences keep
/// insertion order and are never deduplicated; renderers are responsible for
/// any grouping or sorting they need. Once handed to a renderer the report is
/// read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    violations: Vec<Violation>,
    errors: Vec<ProcessingError>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation; no ordering is enforced at insertion
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append a processing error
    pub fn add_error(&mut self, error: ProcessingError) {
        self.errors.push(error);
    }

    /// Violations in insertion order; each call yields a fresh iterator
    pub fn violations(&self) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter()
    }

    /// Processing errors in insertion order; each call yields a fresh iterator
    pub fn errors(&self) -> impl Iterator<Item = &ProcessingError> + '_ {
        self.errors.iter()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// True when the run produced neither violations nor errors
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty() && self.errors.is_empty()
    }
}
