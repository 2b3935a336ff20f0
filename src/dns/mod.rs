//! DNS resolution.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - A `reqwest::dns::Resolve` implementation reporting typed lookup errors
//! - A type-erased resolver shared by all clients of a run
//! - Peer address lookup for rows that finished without one

mod resolution;
mod resolver;

// Re-export public API
pub use resolution::lookup_peer_address;
pub use resolver::{DnsLookupError, HickoryResolver, SharedResolver};
