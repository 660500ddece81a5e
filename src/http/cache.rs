//! HTTP cache control module
//!
//! Provides `Last-Modified` formatting and conditional request handling.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a timestamp as an HTTP date, e.g. `Wed, 21 Oct 2015 07:28:00 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let dt: DateTime<Utc> = time.into();
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header value
///
/// Returns `None` for anything that is not a valid RFC 2822 style date.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Check whether a file can be answered with 304 Not Modified
///
/// `If-None-Match` takes precedence: when present, `If-Modified-Since` is ignored.
/// The modification time is compared at second precision.
///
/// # Arguments
/// * `if_modified_since` - Client-sent If-Modified-Since header
/// * `if_none_match` - Client-sent If-None-Match header
/// * `modified` - File modification time
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    if_none_match: Option<&str>,
    modified: SystemTime,
) -> bool {
    if if_none_match.is_some() {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(
            format_http_date(at(1_445_412_480)),
            "Wed, 21 Oct 2015 07:28:00 GMT"
        );
    }

    #[test]
    fn test_parse_http_date() {
        let parsed = parse_http_date("Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 1_445_412_480);
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_not_modified() {
        let header = Some("Wed, 21 Oct 2015 07:28:00 GMT");
        assert!(is_not_modified(header, None, at(1_445_412_480)));
        assert!(is_not_modified(header, None, at(1_445_412_000)));
        assert!(!is_not_modified(header, None, at(1_445_412_481)));
    }

    #[test]
    fn test_sub_second_mtime_is_truncated() {
        let header = Some("Wed, 21 Oct 2015 07:28:00 GMT");
        let modified = at(1_445_412_480) + Duration::from_millis(750);
        assert!(is_not_modified(header, None, modified));
    }

    #[test]
    fn test_if_none_match_wins() {
        let header = Some("Wed, 21 Oct 2015 07:28:00 GMT");
        assert!(!is_not_modified(header, Some("\"abc\""), at(0)));
    }

    #[test]
    fn test_invalid_or_missing_header() {
        assert!(!is_not_modified(None, None, at(0)));
        assert!(!is_not_modified(Some("garbage"), None, at(0)));
    }
}
