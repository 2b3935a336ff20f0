//! Shared resources for resolving URLs.

use std::sync::Arc;

use crate::config::Config;
use crate::dns::SharedResolver;
use crate::error_handling::{InitializationError, ProcessingStats};
use crate::initialization::{init_client, init_insecure_client, init_resolver};

/// Context containing all shared resources needed to resolve URLs.
///
/// Built once per run and passed by reference to the resolver and the batch
/// driver.
#[derive(Clone)]
pub struct CheckContext {
    /// HTTP client with redirects disabled
    pub(crate) client: reqwest::Client,
    /// Same as `client` but without certificate validation
    pub(crate) insecure_client: reqwest::Client,
    /// Resolver used by both clients and by the peer-address repair
    pub(crate) resolver: SharedResolver,
    /// Redirect hop limit
    pub(crate) max_redirects: usize,
    /// Number of URLs resolved at the same time
    pub(crate) concurrency: usize,
    /// Run statistics
    pub(crate) stats: Arc<ProcessingStats>,
}

impl CheckContext {
    /// Creates a context backed by the hickory DNS resolver.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if a client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        Self::with_resolver(config, SharedResolver::new(init_resolver()))
    }

    /// Creates a context that resolves host names through `resolver`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if a client cannot be built.
    pub fn with_resolver(
        config: &Config,
        resolver: SharedResolver,
    ) -> Result<Self, InitializationError> {
        Ok(Self {
            client: init_client(config, &resolver)?,
            insecure_client: init_insecure_client(config, &resolver)?,
            resolver,
            max_redirects: config.max_redirects,
            concurrency: usize::from(config.concurrency.max(1)),
            stats: Arc::new(ProcessingStats::new()),
        })
    }

    /// Statistics collected by this context.
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }
}
