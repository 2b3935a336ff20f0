//! Error categorization.
//!
//! Failures are classified by walking the error's source chain and matching
//! typed errors from the DNS resolver and the TLS stack. Error messages are
//! never inspected.

use std::error::Error as StdError;
use std::io;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use rustls::CertificateError;

use super::types::ErrorType;
use crate::dns::DnsLookupError;

/// Iterates over an error and all of its sources.
///
/// `std::io::Error` reports the *source of its payload* as its own source,
/// so payloads (where rustls puts its handshake errors, often under more than
/// one `io::Error` layer) are yielded as extra steps.
fn causes<'a>(
    error: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(error), |&cause| cause.source())
        .flat_map(|cause| io_payloads(cause))
}

/// Yields `cause`, then the payload of every `io::Error` layer it wraps.
fn io_payloads<'a>(
    cause: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(cause), |&layer| {
        layer
            .downcast_ref::<io::Error>()
            .and_then(|io_err| io_err.get_ref())
            .map(|inner| inner as &(dyn StdError + 'static))
    })
}

/// Returns true when the chain contains a "no such host" DNS answer.
pub fn is_dns_not_found(error: &(dyn StdError + 'static)) -> bool {
    causes(error).any(|cause| {
        if let Some(lookup) = cause.downcast_ref::<DnsLookupError>() {
            return lookup.is_not_found();
        }
        if let Some(resolve) = cause.downcast_ref::<ResolveError>() {
            return matches!(resolve.kind(), ResolveErrorKind::NoRecordsFound { .. });
        }
        false
    })
}

/// Returns true when the chain contains a certificate rejected for expiry.
pub fn is_certificate_expired(error: &(dyn StdError + 'static)) -> bool {
    causes(error).any(|cause| {
        matches!(
            cause.downcast_ref::<rustls::Error>(),
            Some(rustls::Error::InvalidCertificate(
                CertificateError::Expired | CertificateError::ExpiredContext { .. }
            ))
        )
    })
}

/// Returns true when the chain contains any other certificate rejection.
fn is_certificate_error(error: &(dyn StdError + 'static)) -> bool {
    causes(error).any(|cause| {
        matches!(
            cause.downcast_ref::<rustls::Error>(),
            Some(rustls::Error::InvalidCertificate(_))
        )
    })
}

/// Returns true when the chain contains a DNS failure of any kind.
fn is_dns_error(error: &(dyn StdError + 'static)) -> bool {
    causes(error).any(|cause| cause.is::<DnsLookupError>() || cause.is::<ResolveError>())
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Connect and timeout checks come before the generic request check because
/// reqwest reports connection failures as request errors as well.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.status().is_some() || error.is_status() {
        return ErrorType::HttpRequestStatusError;
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if is_dns_error(error) {
        ErrorType::DnsLookupError
    } else if is_certificate_error(error) {
        ErrorType::TlsCertificateError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Renders an error and all of its sources on one line.
pub fn describe_error_chain(error: &(dyn StdError + 'static)) -> String {
    std::iter::successors(Some(error), |&cause| cause.source())
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connect failed")]
    struct Wrapper(#[source] Box<dyn StdError + Send + Sync>);

    /// The shape hyper-util hands to reqwest for a rejected handshake.
    fn expired_handshake() -> io::Error {
        let handshake = io::Error::new(
            io::ErrorKind::InvalidData,
            rustls::Error::InvalidCertificate(CertificateError::Expired),
        );
        io::Error::new(io::ErrorKind::Other, handshake)
    }

    #[test]
    fn test_certificate_expired_inside_nested_io_errors() {
        let error = Wrapper(Box::new(expired_handshake()));
        assert!(is_certificate_expired(&error));
        assert!(is_certificate_error(&error));
        assert!(!is_dns_not_found(&error));
    }

    #[test]
    fn test_certificate_expired_inside_single_io_error() {
        let error = Wrapper(Box::new(io::Error::new(
            io::ErrorKind::InvalidData,
            rustls::Error::InvalidCertificate(CertificateError::Expired),
        )));
        assert!(is_certificate_expired(&error));
    }

    #[test]
    fn test_certificate_expired_direct() {
        let error = Wrapper(Box::new(rustls::Error::InvalidCertificate(
            CertificateError::Expired,
        )));
        assert!(is_certificate_expired(&error));
    }

    #[test]
    fn test_other_certificate_errors_are_not_expiry() {
        let error = Wrapper(Box::new(io::Error::new(
            io::ErrorKind::InvalidData,
            rustls::Error::InvalidCertificate(CertificateError::UnknownIssuer),
        )));
        assert!(!is_certificate_expired(&error));
        assert!(is_certificate_error(&error));
    }

    #[test]
    fn test_dns_not_found_is_detected_through_wrappers() {
        let error = Wrapper(Box::new(DnsLookupError::NotFound {
            host: "missing.invalid".to_string(),
        }));
        assert!(is_dns_not_found(&error));
        assert!(!is_certificate_expired(&error));
    }

    #[test]
    fn test_dns_failure_other_than_not_found() {
        let error = Wrapper(Box::new(DnsLookupError::Failed {
            host: "example.com".to_string(),
            message: "request timed out".to_string(),
        }));
        assert!(!is_dns_not_found(&error));
        assert!(is_dns_error(&error));
    }

    #[test]
    fn test_plain_io_error_is_unclassified() {
        let error = Wrapper(Box::new(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        )));
        assert!(!is_dns_not_found(&error));
        assert!(!is_certificate_expired(&error));
        assert!(!is_certificate_error(&error));
    }

    #[test]
    fn test_describe_error_chain_joins_sources() {
        let error = Wrapper(Box::new(DnsLookupError::NotFound {
            host: "missing.invalid".to_string(),
        }));
        assert_eq!(
            describe_error_chain(&error),
            "connect failed: no DNS entry for missing.invalid"
        );
    }
}
