//! URL resolution.
//!
//! `resolve_url` never fails: every failure is classified and turned into a
//! populated row.
//! - No DNS entry: a row of `---` markers
//! - Expired certificate: one retry without certificate validation
//! - Anything else: whatever the partial redirect trail can tell
//!
//! Rows that end without a destination server get one by looking up the host
//! of the last URL requested.

mod context;
mod redirects;

use log::{debug, error, info, warn};

use crate::app::url::host_of;
use crate::config::{REMARK_CERTIFICATE_EXPIRED, REMARK_NO_DNS, REMARK_SERVER_UNRESOLVABLE};
use crate::dns::lookup_peer_address;
use crate::error_handling::{
    categorize_reqwest_error, describe_error_chain, is_certificate_expired, is_dns_not_found,
    ErrorType, FailureKind, OutcomeKind,
};
use crate::models::{Field, ResolutionResult};

// Re-export public API
pub use context::CheckContext;
pub use redirects::{follow_redirects, FetchError, FetchFailure, Landing};

/// Resolves `url` to its final destination.
///
/// # Arguments
///
/// * `ctx` - Shared clients, resolver and statistics
/// * `url` - Normalized absolute URL
///
/// # Returns
///
/// A row describing where the URL ended up, or as much as could be salvaged
/// when it did not end up anywhere.
pub async fn resolve_url(ctx: &CheckContext, url: &str) -> ResolutionResult {
    let row = match follow_redirects(&ctx.client, url, ctx.max_redirects).await {
        Ok(landing) => landed_row(url, &landing, "", OutcomeKind::Resolved),
        Err(failure) => recover(ctx, url, failure).await,
    };
    let row = repair_peer_address(ctx, row).await;
    ctx.stats.increment_outcome(row.outcome());
    row
}

/// Maps a failed chain to its recovery class.
///
/// Transport errors are classified from the typed errors in their source
/// chain, never from their messages.
pub fn classify_failure(error: &FetchError) -> FailureKind {
    match error {
        FetchError::Transport(e) => {
            if is_dns_not_found(e) {
                FailureKind::DnsNotFound
            } else if is_certificate_expired(e) {
                FailureKind::CertificateExpired
            } else {
                FailureKind::Other(categorize_reqwest_error(e))
            }
        }
        FetchError::Status { .. } => FailureKind::Other(ErrorType::HttpRequestStatusError),
        FetchError::TooManyRedirects { .. } => FailureKind::Other(ErrorType::TooManyRedirects),
        FetchError::InvalidLocation { .. } => {
            FailureKind::Other(ErrorType::InvalidRedirectLocation)
        }
    }
}

async fn recover(ctx: &CheckContext, url: &str, failure: FetchFailure) -> ResolutionResult {
    match classify_failure(&failure.error) {
        FailureKind::DnsNotFound => {
            info!("No DNS entry for {url}");
            ResolutionResult::no_dns(url, REMARK_NO_DNS)
        }
        FailureKind::CertificateExpired => {
            warn!("Certificate of {url} has expired, retrying without validation");
            match follow_redirects(&ctx.insecure_client, url, ctx.max_redirects).await {
                Ok(landing) => landed_row(
                    url,
                    &landing,
                    REMARK_CERTIFICATE_EXPIRED,
                    OutcomeKind::CertificateExpired,
                ),
                Err(retry) => {
                    let error_type = match classify_failure(&retry.error) {
                        FailureKind::Other(error_type) => error_type,
                        FailureKind::DnsNotFound => ErrorType::DnsLookupError,
                        FailureKind::CertificateExpired => ErrorType::TlsCertificateError,
                    };
                    ctx.stats.increment_error(error_type);
                    salvage(url, &retry, REMARK_CERTIFICATE_EXPIRED)
                }
            }
        }
        FailureKind::Other(error_type) => {
            ctx.stats.increment_error(error_type);
            let remark = match failure.error {
                // The status column already says it all
                FetchError::Status { .. } => "",
                _ => error_type.as_str(),
            };
            salvage(url, &failure, remark)
        }
    }
}

fn landed_row(
    url: &str,
    landing: &Landing,
    remarks: &str,
    outcome: OutcomeKind,
) -> ResolutionResult {
    ResolutionResult::responded(
        url,
        &landing.final_url,
        landing.redirect_count,
        landing.status.as_u16(),
        landing.peer,
        remarks,
        outcome,
    )
}

/// Builds the best row the partial trail allows.
fn salvage(url: &str, failure: &FetchFailure, remarks: &str) -> ResolutionResult {
    let trail = &failure.trail;
    match trail.last_status {
        Some(status) => ResolutionResult::responded(
            url,
            &trail.current_url,
            trail.redirect_count,
            status.as_u16(),
            trail.peer,
            remarks,
            OutcomeKind::Failed,
        ),
        None => {
            error!("Error processing {url}: {}", failure.error);
            debug!("{url}: {}", describe_error_chain(&failure.error));
            ResolutionResult::unanswered(url, &trail.current_url, trail.redirect_count, remarks)
        }
    }
}

/// Fills an empty destination server from a DNS lookup of the host of the
/// last requested URL.
async fn repair_peer_address(ctx: &CheckContext, row: ResolutionResult) -> ResolutionResult {
    match row.final_server() {
        Field::Unknown => {}
        // A DNS-failure row has no host to look up
        Field::NoDns | Field::Failed | Field::Value(_) => return row,
    }

    let last_url = row.last_requested_url();
    let Some(host) = host_of(last_url) else {
        warn!("No host to resolve in {last_url}");
        return row.with_remark(REMARK_SERVER_UNRESOLVABLE);
    };

    match lookup_peer_address(&ctx.resolver, &host).await {
        Ok(ip) => {
            debug!("Destination server of {} looked up as {ip}", row.source_url());
            row.with_final_server(ip)
        }
        Err(e) => {
            warn!(
                "Could not resolve destination server of {}: {e}",
                row.source_url()
            );
            row.with_remark(REMARK_SERVER_UNRESOLVABLE)
        }
    }
}

#[cfg(test)]
mod tests;
