// Shared test helpers: a fixed-table DNS resolver and context construction.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};

use bulk_url_check::initialization::init_crypto_provider;
use bulk_url_check::{CheckContext, Config, DnsLookupError, ProgressReporter, SharedResolver};
use reqwest::dns::{Addrs, Name, Resolve, Resolving};

/// Resolver answering from a fixed table; every other name has no DNS entry.
#[derive(Default)]
pub struct MapResolver {
    entries: HashMap<String, IpAddr>,
}

impl MapResolver {
    pub fn with(mut self, host: &str, ip: IpAddr) -> Self {
        self.entries.insert(host.to_string(), ip);
        self
    }
}

impl Resolve for MapResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let found = self.entries.get(name.as_str()).copied();
        let host = name.as_str().to_string();
        Box::pin(async move {
            match found {
                Some(ip) => {
                    let addrs: Addrs = Box::new(std::iter::once(SocketAddr::new(ip, 0)));
                    Ok(addrs)
                }
                None => Err(Box::new(DnsLookupError::NotFound { host })
                    as Box<dyn std::error::Error + Send + Sync>),
            }
        })
    }
}

/// Builds a context whose host names resolve through `resolver`.
pub fn context_with(config: &Config, resolver: MapResolver) -> CheckContext {
    init_crypto_provider();
    CheckContext::with_resolver(config, SharedResolver::new(resolver))
        .expect("Failed to build test context")
}

/// Default configuration with a short request timeout.
pub fn test_config() -> Config {
    Config {
        timeout_seconds: Some(10),
        no_progress: true,
        ..Default::default()
    }
}

/// Progress reporter that counts ticks.
#[derive(Default)]
pub struct CountingProgress {
    pub total: AtomicU64,
    pub ticks: AtomicU64,
}

impl ProgressReporter for CountingProgress {
    fn start(&self, total: u64) {
        self.total.store(total, Ordering::SeqCst);
    }

    fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {}
}
