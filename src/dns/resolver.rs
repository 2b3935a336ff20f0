//! DNS resolvers for reqwest.
//!
//! Implements `reqwest::dns::Resolve` on top of `hickory-resolver` so that a
//! missing DNS entry reaches the caller as a typed `DnsLookupError::NotFound`
//! inside the `reqwest::Error` source chain.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use thiserror::Error;

/// A failed host name lookup.
#[derive(Debug, Clone, Error)]
pub enum DnsLookupError {
    /// The name has no address record.
    #[error("no DNS entry for {host}")]
    NotFound {
        /// Looked-up host
        host: String,
    },

    /// The lookup itself failed (timeout, unreachable name server, ...).
    #[error("DNS lookup for {host} failed: {message}")]
    Failed {
        /// Looked-up host
        host: String,
        /// Resolver error text
        message: String,
    },

    /// The host cannot be expressed as a DNS name.
    #[error("invalid host name: {host:?}")]
    InvalidName {
        /// Offending host
        host: String,
    },
}

impl DnsLookupError {
    /// True when the host does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DnsLookupError::NotFound { .. })
    }

    fn from_resolve_error(host: &str, error: ResolveError) -> Self {
        match error.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => DnsLookupError::NotFound {
                host: host.to_string(),
            },
            _ => DnsLookupError::Failed {
                host: host.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// `reqwest` resolver backed by a shared hickory `TokioAsyncResolver`.
#[derive(Clone)]
pub struct HickoryResolver {
    inner: Arc<TokioAsyncResolver>,
}

impl HickoryResolver {
    /// Wraps an initialized hickory resolver.
    pub fn new(inner: Arc<TokioAsyncResolver>) -> Self {
        Self { inner }
    }

    /// Looks up all addresses of `host`.
    pub async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, DnsLookupError> {
        let response = self
            .inner
            .lookup_ip(host)
            .await
            .map_err(|e| DnsLookupError::from_resolve_error(host, e))?;
        let ips: Vec<IpAddr> = response.iter().collect();
        if ips.is_empty() {
            return Err(DnsLookupError::NotFound {
                host: host.to_string(),
            });
        }
        Ok(ips)
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move {
            let ips = resolver.lookup(name.as_str()).await?;
            let addrs: Addrs = Box::new(ips.into_iter().map(|ip| SocketAddr::new(ip, 0)));
            Ok::<Addrs, Box<dyn std::error::Error + Send + Sync>>(addrs)
        })
    }
}

/// Type-erased resolver shared by the HTTP clients and the peer-address repair.
///
/// `ClientBuilder::dns_resolver` needs a sized type, so trait objects are
/// wrapped here.
#[derive(Clone)]
pub struct SharedResolver(Arc<dyn Resolve>);

impl SharedResolver {
    /// Wraps any resolver.
    pub fn new<R: Resolve + 'static>(resolver: R) -> Self {
        Self(Arc::new(resolver))
    }
}

impl Resolve for SharedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        self.0.resolve(name)
    }
}

impl std::fmt::Debug for SharedResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedResolver")
    }
}
