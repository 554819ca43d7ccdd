//! HTTP date parsing and formatting
//!
//! Accepts the three RFC 7231 HTTP-date forms plus RFC 2822 as a fallback.
//! Only the `Date` header is interpreted by the cache, to decide whether
//! content is newer than an invalidation marker.

use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, Utc};

/// IMF-fixdate, e.g. "Sun, 06 Nov 1994 08:49:37 GMT"
const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// Obsolete RFC 850 form, e.g. "Sunday, 06-Nov-94 08:49:37 GMT"
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
/// ANSI C asctime() form, e.g. "Sun Nov  6 08:49:37 1994"
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// HTTP date parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpDateParseError {
    #[error("unrecognized HTTP date format: {0}")]
    UnrecognizedFormat(String),

    #[error("HTTP date is before the Unix epoch: {0}")]
    InvalidTimestamp(String),
}

/// Parse an HTTP-date header value
pub fn parse_http_date(value: &str) -> Result<SystemTime, HttpDateParseError> {
    let value = value.trim();

    let parsed = [IMF_FIXDATE, RFC_850, ASCTIME]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc2822(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .ok_or_else(|| HttpDateParseError::UnrecognizedFormat(value.to_string()))?;

    if parsed.timestamp() < 0 {
        return Err(HttpDateParseError::InvalidTimestamp(value.to_string()));
    }

    Ok(SystemTime::from(parsed))
}

/// Format a time as an IMF-fixdate string
#[must_use]
pub fn fmt_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(IMF_FIXDATE).to_string()
}
