//! HTTP client initialization.
//!
//! Both clients disable automatic redirects so the redirect chain can be
//! followed hop by hop, and both resolve host names through the shared
//! resolver of the run.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::dns::SharedResolver;

fn base_builder(config: &Config, resolver: &SharedResolver) -> ClientBuilder {
    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(config.user_agent.clone())
        // The destination server column must name the origin, not a proxy
        .no_proxy()
        .dns_resolver(Arc::new(resolver.clone()));
    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder
}

/// Initializes the HTTP client used for every URL.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Optional per-request timeout (transport defaults otherwise)
/// - Redirect following disabled
/// - The run's DNS resolver
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(
    config: &Config,
    resolver: &SharedResolver,
) -> Result<reqwest::Client, reqwest::Error> {
    base_builder(config, resolver).build()
}

/// Initializes the client used to retry URLs whose certificate has expired.
///
/// Same settings as [`init_client`] with certificate validation disabled.
/// Only ever used for the single retry of a URL rejected for certificate
/// expiry.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_insecure_client(
    config: &Config,
    resolver: &SharedResolver,
) -> Result<reqwest::Client, reqwest::Error> {
    base_builder(config, resolver)
        .danger_accept_invalid_certs(true)
        .build()
}
