//! Run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, OutcomeKind, ProcessingStats};

/// Prints row outcome and error category counts to the log.
pub fn print_outcome_statistics(stats: &ProcessingStats) {
    let total_rows = stats.total_outcomes();
    info!("Outcome Counts ({} total):", total_rows);
    for outcome in OutcomeKind::iter() {
        let count = stats.get_outcome_count(outcome);
        if count > 0 {
            info!("   {}: {}", outcome.as_str(), count);
        }
    }

    let total_errors = stats.total_errors();
    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_outcome_statistics_empty() {
        let stats = ProcessingStats::new();
        print_outcome_statistics(&stats);
    }

    #[test]
    fn test_print_outcome_statistics_mixed() {
        let stats = ProcessingStats::new();
        stats.increment_outcome(OutcomeKind::Resolved);
        stats.increment_outcome(OutcomeKind::DnsNotFound);
        stats.increment_outcome(OutcomeKind::Failed);
        stats.increment_error(ErrorType::HttpRequestConnectError);
        print_outcome_statistics(&stats);
        assert_eq!(stats.total_outcomes(), 3);
    }
}
