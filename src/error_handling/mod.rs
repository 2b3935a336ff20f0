//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions
//! - Failure classification from typed error chains
//! - Processing statistics tracking (row outcomes and error categories)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, describe_error_chain, is_certificate_expired, is_dns_not_found,
};
pub use stats::ProcessingStats;
pub use types::{
    DatabaseError, EnvGateError, ErrorType, FailureKind, InitializationError, OutcomeKind,
};
