//! Per-URL resolution results.

use std::fmt::{self, Display};
use std::net::IpAddr;

use crate::config::{ERROR_MARKER, NO_DNS_MARKER, UNKNOWN_NUMBER_MARKER};
use crate::error_handling::OutcomeKind;

/// A measured column of a result row.
///
/// Sentinels are modeled as variants rather than magic values so that rows can
/// be inspected without parsing strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// A real measurement
    Value(T),
    /// Not measured (rendered `-1`, or empty for the server column)
    Unknown,
    /// Not measurable because the request failed (rendered `Error`)
    Failed,
    /// The host has no DNS entry (rendered `---`)
    NoDns,
}

impl<T> Field<T> {
    /// The measured value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    /// True when nothing was measured.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Field::Unknown)
    }

    /// True for the DNS-failure marker.
    pub fn is_no_dns(&self) -> bool {
        matches!(self, Field::NoDns)
    }

    fn from_option(value: Option<T>) -> Self {
        value.map_or(Field::Unknown, Field::Value)
    }
}

impl<T: Display> Field<T> {
    /// Renders the column, using `unknown` for the `Unknown` variant.
    pub fn render(&self, unknown: &str) -> String {
        match self {
            Field::Value(v) => v.to_string(),
            Field::Unknown => unknown.to_string(),
            Field::Failed => ERROR_MARKER.to_string(),
            Field::NoDns => NO_DNS_MARKER.to_string(),
        }
    }
}

impl<T: Display> Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(UNKNOWN_NUMBER_MARKER))
    }
}

/// Outcome of resolving one input URL.
///
/// Rows are created through one constructor per outcome and are read-only
/// afterwards:
/// - a response was obtained: redirect count and status are both values;
/// - no response: final URL and status are `Failed`, the redirect count is
///   whatever the chain followed before the failing request;
/// - no DNS entry: every measured column is `NoDns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    source_url: String,
    final_url: Field<String>,
    redirect_count: Field<usize>,
    status_code: Field<u16>,
    final_server: Field<IpAddr>,
    remarks: String,
    outcome: OutcomeKind,
    last_requested_url: String,
}

impl ResolutionResult {
    /// Row for a host without an address record.
    pub(crate) fn no_dns(source_url: &str, remarks: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            final_url: Field::NoDns,
            redirect_count: Field::NoDns,
            status_code: Field::NoDns,
            final_server: Field::NoDns,
            remarks: remarks.to_string(),
            outcome: OutcomeKind::DnsNotFound,
            last_requested_url: source_url.to_string(),
        }
    }

    /// Row for a chain that ended in a response.
    pub(crate) fn responded(
        source_url: &str,
        final_url: &str,
        redirect_count: usize,
        status_code: u16,
        final_server: Option<IpAddr>,
        remarks: &str,
        outcome: OutcomeKind,
    ) -> Self {
        Self {
            source_url: source_url.to_string(),
            final_url: Field::Value(final_url.to_string()),
            redirect_count: Field::Value(redirect_count),
            status_code: Field::Value(status_code),
            final_server: Field::from_option(final_server),
            remarks: remarks.to_string(),
            outcome,
            last_requested_url: final_url.to_string(),
        }
    }

    /// Row for a chain whose last request got no response.
    ///
    /// `last_requested_url` is the URL of that request, `redirect_count` the
    /// redirects followed to reach it.
    pub(crate) fn unanswered(
        source_url: &str,
        last_requested_url: &str,
        redirect_count: usize,
        remarks: &str,
    ) -> Self {
        Self {
            source_url: source_url.to_string(),
            final_url: Field::Failed,
            redirect_count: Field::Value(redirect_count),
            status_code: Field::Failed,
            final_server: Field::Unknown,
            remarks: remarks.to_string(),
            outcome: OutcomeKind::Failed,
            last_requested_url: last_requested_url.to_string(),
        }
    }

    /// Fills the destination server column.
    pub(crate) fn with_final_server(mut self, ip: IpAddr) -> Self {
        self.final_server = Field::Value(ip);
        self
    }

    /// Appends a remark, separated from existing ones by `"; "`.
    pub(crate) fn with_remark(mut self, remark: &str) -> Self {
        if self.remarks.is_empty() {
            self.remarks = remark.to_string();
        } else {
            self.remarks = format!("{}; {}", self.remarks, remark);
        }
        self
    }

    /// The normalized input URL.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The URL the chain ended at.
    pub fn final_url(&self) -> &Field<String> {
        &self.final_url
    }

    /// Number of redirects followed.
    pub fn redirect_count(&self) -> &Field<usize> {
        &self.redirect_count
    }

    /// Status code of the last response.
    pub fn status_code(&self) -> &Field<u16> {
        &self.status_code
    }

    /// Address of the server that answered last.
    pub fn final_server(&self) -> &Field<IpAddr> {
        &self.final_server
    }

    /// Free-text remarks.
    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    /// How the row was produced.
    pub fn outcome(&self) -> OutcomeKind {
        self.outcome
    }

    /// URL of the last request made for this row, answered or not.
    pub(crate) fn last_requested_url(&self) -> &str {
        &self.last_requested_url
    }

    /// Renders the row in output column order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.source_url.clone(),
            self.final_url.render(ERROR_MARKER),
            self.redirect_count.render(UNKNOWN_NUMBER_MARKER),
            self.status_code.render(UNKNOWN_NUMBER_MARKER),
            self.final_server.render(""),
            self.remarks.clone(),
        ]
    }
}
