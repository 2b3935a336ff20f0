//! Error type definitions.
//!
//! This module defines the error types used throughout the application and
//! the categories used to classify failed URL resolutions.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for the maintenance store.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Could not establish the connection pool.
    #[error("Database connection error: {0}")]
    ConnectError(#[source] sqlx::Error),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Error types for the startup environment check.
#[derive(Error, Debug)]
pub enum EnvGateError {
    /// The template file listing the required variables could not be read.
    #[error("Failed to read environment template {}: {source}", path.display())]
    TemplateRead {
        /// Template location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// One or more required variables are absent from the environment.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// A variable is present but its value cannot be used.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
    },
}

/// Types of errors that can occur while resolving a URL.
///
/// These categorize the `Other` failure class; DNS and certificate failures
/// have their own recovery paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    /// The request could not be built
    HttpRequestBuilderError,
    /// The transport rejected a redirect
    HttpRequestRedirectError,
    /// The final response had a status of 400 or above
    HttpRequestStatusError,
    /// The request timed out
    HttpRequestTimeoutError,
    /// The request failed for another reason
    HttpRequestRequestError,
    /// No connection could be established
    HttpRequestConnectError,
    /// The response body could not be read
    HttpRequestBodyError,
    /// The response body could not be decoded
    HttpRequestDecodeError,
    /// Unclassified transport failure
    HttpRequestOtherError,
    // Redirect chain errors
    /// The chain was still redirecting at the hop limit
    TooManyRedirects,
    /// A `Location` header could not be resolved to a URL
    InvalidRedirectLocation,
    // DNS errors (other than a missing entry)
    /// The name server failed to answer
    DnsLookupError,
    // TLS errors (other than an expired certificate)
    /// The certificate was rejected for a reason other than expiry
    TlsCertificateError,
}

impl ErrorType {
    /// Human-readable label, also used as the remark of error rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestStatusError => "HTTP request status error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::TooManyRedirects => "Too many redirects",
            ErrorType::InvalidRedirectLocation => "Invalid redirect location",
            ErrorType::DnsLookupError => "DNS lookup error",
            ErrorType::TlsCertificateError => "TLS certificate error",
        }
    }
}

/// Failure classes, each with its own recovery path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The host has no address record. No recovery.
    DnsNotFound,
    /// The certificate chain failed validation because it expired.
    /// Recovered by one retry with validation disabled.
    CertificateExpired,
    /// Anything else. Recovered by salvaging whatever context is available.
    Other(ErrorType),
}

/// Classification of a finished row, used for run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeKind {
    /// A response below 400 was obtained
    Resolved,
    /// The host has no DNS entry
    DnsNotFound,
    /// Reached only after disabling certificate validation
    CertificateExpired,
    /// Best-effort row built from a failure
    Failed,
}

impl OutcomeKind {
    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Resolved => "Resolved",
            OutcomeKind::DnsNotFound => "No DNS entry",
            OutcomeKind::CertificateExpired => "Expired certificate",
            OutcomeKind::Failed => "Failed",
        }
    }
}
