//! Input line normalization and host extraction.

/// Turns one input line into an absolute URL.
///
/// Lines are trimmed, so a trailing carriage return from CRLF files is
/// dropped. Blank lines and `#` comments yield `None`. A line without an
/// `http://` or `https://` prefix is taken to be a plain-HTTP URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_line("example.com\r"), Some("http://example.com".to_string()));
/// assert_eq!(normalize_line("   "), None);
/// ```
pub fn normalize_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("http://{trimmed}"))
    }
}

/// Number of lines that [`normalize_line`] turns into a URL.
pub fn count_urls<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .filter(|line| normalize_line(line.as_ref()).is_some())
        .count()
}

/// Host part of `url`, without port or credentials.
///
/// IPv6 hosts keep their brackets (`[::1]`).
pub fn host_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str().map(str::to_string)
}
