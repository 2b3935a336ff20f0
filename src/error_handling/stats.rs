//! Processing statistics tracking.
//!
//! Thread-safe counters for row outcomes and error categories.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, OutcomeKind};

/// Thread-safe processing statistics tracker.
///
/// Tracks how each row ended (`OutcomeKind`) and which error categories were
/// seen along the way (`ErrorType`). All counters are initialized to zero on
/// creation, so lookups never miss.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct ProcessingStats {
    outcomes: HashMap<OutcomeKind, AtomicUsize>,
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let outcomes = OutcomeKind::iter()
            .map(|outcome| (outcome, AtomicUsize::new(0)))
            .collect();
        let errors = ErrorType::iter()
            .map(|error| (error, AtomicUsize::new(0)))
            .collect();

        ProcessingStats { outcomes, errors }
    }

    /// Increment an outcome counter.
    pub fn increment_outcome(&self, outcome: OutcomeKind) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map",
                outcome
            );
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                error
            );
        }
    }

    /// Get the count for an outcome.
    pub fn get_outcome_count(&self, outcome: OutcomeKind) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of rows recorded.
    pub fn total_outcomes(&self) -> usize {
        OutcomeKind::iter().map(|o| self.get_outcome_count(o)).sum()
    }

    /// Total number of errors recorded across all categories.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
