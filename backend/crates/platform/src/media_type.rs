//! Content-Type matching

use axum::http::{HeaderMap, header};
use mime::Mime;

/// Whether the request's `Content-Type` essence equals `expected`
///
/// Parameters (`charset=...`) are ignored and comparison is case-insensitive.
/// A missing or unparsable header never matches.
pub fn content_type_matches(headers: &HeaderMap, expected: &Mime) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Mime>().ok())
        .is_some_and(|mime| {
            mime.essence_str()
                .eq_ignore_ascii_case(expected.essence_str())
        })
}
