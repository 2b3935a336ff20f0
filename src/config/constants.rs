//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including defaults, limits, timeouts and the sentinel markers written
//! to the output file.

/// Default input file (one URL or host per line)
pub const DEFAULT_INPUT_PATH: &str = "data/urls_in.csv";
/// Default output file
pub const DEFAULT_OUTPUT_PATH: &str = "data/urls_out.csv";

/// Identifying User-Agent sent with every request.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = "bulk_url_check";

// Redirect handling
/// Maximum number of redirect hops to follow
/// A chain that is still redirecting after this many hops is reported as an error row
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Status codes below this value are accepted as a successful response.
pub const STATUS_ACCEPT_THRESHOLD: u16 = 400;

/// Number of URLs resolved at the same time (1 = strictly sequential)
pub const DEFAULT_CONCURRENCY: u16 = 1;

// Network operation timeouts
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// DNS attempts per query before giving up
pub const DNS_ATTEMPTS: usize = 2;

// Output markers
/// Written in every measured column when the host has no DNS entry
pub const NO_DNS_MARKER: &str = "---";
/// Written when a value could not be measured because the request failed
pub const ERROR_MARKER: &str = "Error";
/// Written in numeric columns when a value is unknown
pub const UNKNOWN_NUMBER_MARKER: &str = "-1";

// Remarks
/// Remark for rows whose host has no address record
pub const REMARK_NO_DNS: &str = "No DNS entry";
/// Remark for rows reached only after disabling certificate validation
pub const REMARK_CERTIFICATE_EXPIRED: &str = "SSL Certificate expired";
/// Remark appended when the destination host could not be looked up
pub const REMARK_SERVER_UNRESOLVABLE: &str = "Destination server unresolvable";

/// Output column labels, in order
pub const CSV_HEADERS: [&str; 6] = [
    "Source URL",
    "Destination URL",
    "Number of Redirects",
    "Status Code",
    "Destination Server",
    "Additional remarks",
];

// Maintenance component
/// Template listing the environment variables the maintenance process requires
pub const ENV_TEMPLATE_PATH: &str = ".env.example";
/// Exit code used when required environment variables are missing (EX_CONFIG)
pub const EXIT_ENV_INCOMPLETE: i32 = 78;
/// Default period between two maintenance refreshes
pub const DEFAULT_MAINTENANCE_INTERVAL_SECS: u64 = 3600;
/// Maximum connections held by the maintenance store pool
pub const STORE_MAX_CONNECTIONS: u32 = 2;
