//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};
use crate::dns::HickoryResolver;

/// Initializes the DNS resolver shared by all lookups of a run.
///
/// Uses the default upstream configuration with short timeouts so that a
/// slow name server cannot stall the batch.
pub fn init_resolver() -> HickoryResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    // No search domain appending: input hosts are always fully qualified
    opts.ndots = 0;

    HickoryResolver::new(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}
