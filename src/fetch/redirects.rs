//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains manually so that the number of hops,
//! the terminal URL and the address of the server that answered last are all
//! known, including when the chain fails half-way.

use std::net::IpAddr;

use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::config::STATUS_ACCEPT_THRESHOLD;

/// A chain that ended in an accepted response (status < 400).
#[derive(Debug, Clone)]
pub struct Landing {
    /// URL of the last request
    pub final_url: String,
    /// Status of the last response
    pub status: StatusCode,
    /// Redirects followed to get there
    pub redirect_count: usize,
    /// Peer address of the connection that served the last response
    pub peer: Option<IpAddr>,
}

/// How far a chain got before it failed.
#[derive(Debug, Clone)]
pub struct RedirectTrail {
    /// URL requested by the failing hop
    pub current_url: String,
    /// Redirects followed before the failing hop
    pub redirect_count: usize,
    /// Status of the failing hop's response, if one arrived
    pub last_status: Option<StatusCode>,
    /// Peer address of the failing hop's connection, if one was made
    pub peer: Option<IpAddr>,
}

impl RedirectTrail {
    fn new(start_url: &str) -> Self {
        Self {
            current_url: start_url.to_string(),
            redirect_count: 0,
            last_status: None,
            peer: None,
        }
    }

    fn fail(self, error: FetchError) -> FetchFailure {
        FetchFailure { error, trail: self }
    }
}

/// Why a chain did not end in an accepted response.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A response arrived with a status of 400 or above.
    #[error("HTTP status {status}")]
    Status {
        /// Rejected status
        status: StatusCode,
    },

    /// The chain was still redirecting after the hop limit.
    #[error("Exceeded the limit of {limit} redirects")]
    TooManyRedirects {
        /// Configured limit
        limit: usize,
    },

    /// A `Location` header could not be turned into a URL.
    #[error("Invalid redirect location {location:?}")]
    InvalidLocation {
        /// Raw header value
        location: String,
        /// Parse failure, if the header was readable at all
        #[source]
        source: Option<url::ParseError>,
    },
}

/// A failed chain together with the context gathered before the failure.
#[derive(Debug)]
pub struct FetchFailure {
    /// What went wrong
    pub error: FetchError,
    /// How far the chain got
    pub trail: RedirectTrail,
}

/// Any 3xx is followed when it carries a `Location` header.
fn is_followed_redirect(status: StatusCode) -> bool {
    status.is_redirection()
}

/// Follows the redirect chain of `start_url` with a GET per hop.
///
/// # Arguments
///
/// * `client` - HTTP client with redirects disabled
/// * `start_url` - The initial URL
/// * `max_hops` - Maximum number of redirects to follow
///
/// # Returns
///
/// The terminal response's URL, status, hop count and peer address when the
/// terminal status is below 400.
///
/// # Errors
///
/// Returns a `FetchFailure` carrying the partial trail when a request fails,
/// the terminal status is 400 or above, a `Location` header is unusable, or
/// the chain is still redirecting after `max_hops` redirects.
pub async fn follow_redirects(
    client: &reqwest::Client,
    start_url: &str,
    max_hops: usize,
) -> Result<Landing, FetchFailure> {
    let mut trail = RedirectTrail::new(start_url);

    loop {
        trail.last_status = None;
        trail.peer = None;

        let response = match client.get(&trail.current_url).send().await {
            Ok(response) => response,
            Err(e) => return Err(trail.fail(FetchError::Transport(e))),
        };

        let status = response.status();
        trail.last_status = Some(status);
        trail.peer = response.remote_addr().map(|addr| addr.ip());

        if is_followed_redirect(status) {
            let Some(location) = response.headers().get(reqwest::header::LOCATION) else {
                // Nothing to follow, the redirect response is terminal
                log::warn!(
                    "Redirect status {} for {} but no Location header",
                    status.as_u16(),
                    trail.current_url
                );
                return Ok(landed(trail, status));
            };

            let location = match location.to_str() {
                Ok(location) => location.to_string(),
                Err(_) => {
                    let raw = String::from_utf8_lossy(location.as_bytes()).into_owned();
                    return Err(trail.fail(FetchError::InvalidLocation {
                        location: raw,
                        source: None,
                    }));
                }
            };

            if trail.redirect_count >= max_hops {
                return Err(trail.fail(FetchError::TooManyRedirects { limit: max_hops }));
            }

            let next = Url::parse(&location)
                .or_else(|_| Url::parse(&trail.current_url).and_then(|base| base.join(&location)));
            match next {
                Ok(next) => {
                    log::debug!("{} redirects to {}", trail.current_url, next);
                    trail.current_url = next.to_string();
                    trail.redirect_count += 1;
                    continue;
                }
                Err(e) => {
                    return Err(trail.fail(FetchError::InvalidLocation {
                        location,
                        source: Some(e),
                    }))
                }
            }
        }

        if status.as_u16() >= STATUS_ACCEPT_THRESHOLD {
            return Err(trail.fail(FetchError::Status { status }));
        }

        return Ok(landed(trail, status));
    }
}

fn landed(trail: RedirectTrail, status: StatusCode) -> Landing {
    Landing {
        final_url: trail.current_url,
        status,
        redirect_count: trail.redirect_count,
        peer: trail.peer,
    }
}
