//! Canonical location codec.
//!
//! The displayed location is a pure projection of `(query, page)`:
//!
//! - no active query → `/`
//! - active query, page 1 → `/` + percent-encoded query
//! - active query, page > 1 → `/` + percent-encoded query + `/` + page
//!
//! A legacy query-string form (`?search=<query>&page=<n>`) parses to the
//! same projection. A path that spells out page 1 explicitly (`/rust/1`) is
//! not canonical; [`canonicalize`] yields the redirect target for it.

pub mod sync;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a query path segment.
///
/// Matches JavaScript's `encodeURIComponent`, which leaves alphanumerics
/// and `- _ . ! ~ * ' ( )` unescaped. The location contract is bit-exact,
/// so the set matters.
pub(crate) const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A `(query, page)` projection parsed from a displayed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationState {
    /// Percent-decoded query; empty means no active search.
    pub query: String,
    /// Requested page, always >= 1.
    pub page: u32,
}

impl LocationState {
    /// Projection for "no active search".
    pub fn idle() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }
}

/// Encode `(query, page)` as the canonical location.
pub fn encode(query: &str, page: u32) -> String {
    let query = query.trim();
    if query.is_empty() {
        return "/".to_string();
    }
    let encoded = utf8_percent_encode(query, PATH_SEGMENT);
    if page > 1 {
        format!("/{encoded}/{page}")
    } else {
        format!("/{encoded}")
    }
}

/// Parse a location (path plus optional query string) into its projection.
///
/// The legacy `?search=` form takes precedence over path segments when
/// present. Page values that are absent or not positive integers default
/// to 1.
pub fn parse(location: &str) -> LocationState {
    let (path, query_string) = split_location(location);

    if let Some(qs) = query_string {
        if let Some(state) = parse_query_string(qs) {
            return state;
        }
    }

    let mut segments = path.trim_start_matches('/').splitn(2, '/');
    let query_segment = segments.next().unwrap_or("");
    if query_segment.is_empty() {
        return LocationState::idle();
    }
    let query = decode_segment(query_segment);
    let page = segments.next().map(parse_page).unwrap_or(1);
    LocationState { query, page }
}

/// Redirect target for a non-canonical location, if any.
///
/// Only the path-segment form canonicalizes: a location whose second
/// segment resolves to page 1 (including invalid page segments, which
/// default to 1) redirects to the segmentless page-1 shape. Legacy
/// query-string locations are accepted as-is.
pub fn canonicalize(location: &str) -> Option<String> {
    let (path, query_string) = split_location(location);
    if query_string.is_some_and(|qs| parse_query_string(qs).is_some()) {
        return None;
    }

    let mut segments = path.trim_start_matches('/').splitn(2, '/');
    let query_segment = segments.next().unwrap_or("");
    let page_segment = segments.next()?;
    if query_segment.is_empty() {
        return None;
    }
    if parse_page(page_segment) == 1 {
        Some(encode(&decode_segment(query_segment), 1))
    } else {
        None
    }
}

fn split_location(location: &str) -> (&str, Option<&str>) {
    match location.split_once('?') {
        Some((path, qs)) => (path, Some(qs)),
        None => (location, None),
    }
}

/// Parse the legacy `?search=&page=` form. Returns `None` when no `search`
/// parameter is present, in which case the path segments decide.
fn parse_query_string(query_string: &str) -> Option<LocationState> {
    let mut query = None;
    let mut page = 1;
    for pair in query_string.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "search" => query = Some(decode_form_value(value)),
            "page" => page = parse_page(value),
            _ => {}
        }
    }
    query.map(|query| LocationState { query, page })
}

fn parse_page(raw: &str) -> u32 {
    raw.parse::<u32>().ok().filter(|page| *page >= 1).unwrap_or(1)
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Query-string values additionally treat `+` as a space.
fn decode_form_value(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_encodes_to_root() {
        assert_eq!(encode("", 1), "/");
        assert_eq!(encode("   ", 5), "/");
    }

    #[test]
    fn page_one_encodes_without_page_segment() {
        assert_eq!(encode("x", 1), "/x");
        assert_eq!(encode("x", 0), "/x");
    }

    #[test]
    fn later_pages_encode_with_page_segment() {
        assert_eq!(encode("rust", 3), "/rust/3");
    }

    #[test]
    fn query_is_percent_encoded() {
        assert_eq!(encode("abc def", 3), "/abc%20def/3");
        assert_eq!(encode("c++", 1), "/c%2B%2B");
    }

    #[test]
    fn encode_uri_component_survivors_stay_literal() {
        // encodeURIComponent leaves these unescaped.
        assert_eq!(encode("a-b_c.d!e~f*g'h(i)j", 1), "/a-b_c.d!e~f*g'h(i)j");
    }

    #[test]
    fn round_trip_query_with_space_and_page() {
        let location = encode("abc def", 3);
        let parsed = parse(&location);
        assert_eq!(parsed.query, "abc def");
        assert_eq!(parsed.page, 3);
    }

    #[test]
    fn round_trip_single_word_page_one() {
        assert_eq!(encode("x", 1), "/x");
        let parsed = parse("/x");
        assert_eq!(parsed.query, "x");
        assert_eq!(parsed.page, 1);
    }

    #[test]
    fn root_parses_to_idle() {
        assert_eq!(parse("/"), LocationState::idle());
        assert_eq!(parse(""), LocationState::idle());
    }

    #[test]
    fn invalid_page_segment_defaults_to_one() {
        assert_eq!(parse("/rust/abc").page, 1);
        assert_eq!(parse("/rust/0").page, 1);
        assert_eq!(parse("/rust/-3").page, 1);
    }

    #[test]
    fn legacy_query_string_form_parses_identically() {
        let from_path = parse("/abc%20def/3");
        let from_qs = parse("/?search=abc%20def&page=3");
        assert_eq!(from_path, from_qs);
    }

    #[test]
    fn legacy_form_plus_decodes_as_space() {
        let parsed = parse("/?search=abc+def");
        assert_eq!(parsed.query, "abc def");
        assert_eq!(parsed.page, 1);
    }

    #[test]
    fn legacy_form_page_defaults_to_one() {
        assert_eq!(parse("/?search=x").page, 1);
        assert_eq!(parse("/?search=x&page=nope").page, 1);
        assert_eq!(parse("/?search=x&page=0").page, 1);
    }

    #[test]
    fn legacy_form_takes_precedence_over_path() {
        let parsed = parse("/ignored/7?search=real&page=2");
        assert_eq!(parsed.query, "real");
        assert_eq!(parsed.page, 2);
    }

    #[test]
    fn canonicalize_redirects_explicit_page_one() {
        assert_eq!(canonicalize("/rust/1"), Some("/rust".to_string()));
    }

    #[test]
    fn canonicalize_redirects_invalid_page_segment() {
        // An unparsable page resolves to 1, which the canonical form spells
        // without a segment.
        assert_eq!(canonicalize("/rust/abc"), Some("/rust".to_string()));
    }

    #[test]
    fn canonicalize_leaves_later_pages_alone() {
        assert_eq!(canonicalize("/rust/2"), None);
    }

    #[test]
    fn canonicalize_leaves_segmentless_locations_alone() {
        assert_eq!(canonicalize("/rust"), None);
        assert_eq!(canonicalize("/"), None);
    }

    #[test]
    fn canonicalize_leaves_legacy_form_alone() {
        assert_eq!(canonicalize("/?search=rust&page=1"), None);
    }

    #[test]
    fn unicode_query_round_trips() {
        let location = encode("日本語 検索", 2);
        let parsed = parse(&location);
        assert_eq!(parsed.query, "日本語 検索");
        assert_eq!(parsed.page, 2);
    }
}
