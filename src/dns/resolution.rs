//! Peer address lookup.
//!
//! Used when a row finished without a connection address, to fill the
//! destination server column from DNS instead.

use std::net::IpAddr;
use std::str::FromStr;

use reqwest::dns::{Name, Resolve};

use super::resolver::DnsLookupError;

/// Resolves `host` to its first IP address.
///
/// IP literals are returned as-is without a lookup.
///
/// # Errors
///
/// Returns `DnsLookupError::NotFound` when the name has no address record and
/// `DnsLookupError::Failed` for any other resolver failure.
pub async fn lookup_peer_address(
    resolver: &dyn Resolve,
    host: &str,
) -> Result<IpAddr, DnsLookupError> {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let name = Name::from_str(host).map_err(|_| DnsLookupError::InvalidName {
        host: host.to_string(),
    })?;

    let mut addrs = match resolver.resolve(name).await {
        Ok(addrs) => addrs,
        Err(error) => {
            return Err(match error.downcast::<DnsLookupError>() {
                Ok(lookup) => *lookup,
                Err(other) => DnsLookupError::Failed {
                    host: host.to_string(),
                    message: other.to_string(),
                },
            })
        }
    };

    addrs
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| DnsLookupError::NotFound {
            host: host.to_string(),
        })
}
