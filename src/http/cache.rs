//! HTTP cache control module
//!
//! The no-cache header triplet and the `Last-Modified` conditional check.

use hyper::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, max-age=0";
pub const PRAGMA_VALUE: &str = "no-cache";
pub const EXPIRES_VALUE: &str = "0";

/// Header name/value pairs in the order they are written
pub const NO_CACHE_HEADERS: [(&str, &str); 3] = [
    ("cache-control", CACHE_CONTROL_VALUE),
    ("pragma", PRAGMA_VALUE),
    ("expires", EXPIRES_VALUE),
];

/// Set the no-cache headers, replacing any value already queued under the
/// same names so each appears exactly once.
pub fn apply_no_cache(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
}

/// Truncate a modification time to whole seconds, the precision of HTTP-dates
pub fn truncate_to_secs(time: SystemTime) -> SystemTime {
    time.duration_since(UNIX_EPOCH)
        .map_or(time, |d| UNIX_EPOCH + Duration::from_secs(d.as_secs()))
}

/// Format a modification time as a `Last-Modified` value
pub fn format_last_modified(time: SystemTime) -> String {
    httpdate::fmt_http_date(truncate_to_secs(time))
}

/// Check whether a conditional request can be answered with 304
///
/// `If-None-Match` takes precedence: when present, no entity tags are
/// generated here, so `If-Modified-Since` is ignored and the full body sent.
///
/// # Arguments
/// * `if_modified_since` - Client-sent If-Modified-Since header
/// * `has_if_none_match` - Whether the client also sent If-None-Match
/// * `modified` - File modification time
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    modified: SystemTime,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(|v| httpdate::parse_http_date(v).ok()) else {
        return false;
    };
    truncate_to_secs(modified) <= since
}
