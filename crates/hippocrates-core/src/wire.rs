//! Reserved wire constants.
//!
//! These names appear verbatim on the wire, both in the operation field of
//! incoming requests and in the paths and query strings of outbound calls.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Operation marker for the history interaction family.
///
/// Also the path segment that precedes a version id in a vread path.
pub const HISTORY: &str = "_history";

/// Query parameter carrying the count-limit role.
pub const PARAM_COUNT: &str = "_count";

/// Query parameter carrying the since-timestamp role.
pub const PARAM_SINCE: &str = "_since";

/// Path separator between segments of an outbound call.
pub const SEPARATOR: char = '/';

/// Bytes escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes a caller-supplied value (an id or version) as one path
/// segment.
///
/// A leading `_` is escaped as well, so the encoded segment is never read
/// back as an operation marker.
///
/// # Example
///
/// ```
/// use hippocrates_core::wire;
///
/// assert_eq!(wire::encode_segment("123"), "123");
/// assert_eq!(wire::encode_segment("a/b?c"), "a%2Fb%3Fc");
/// assert_eq!(wire::encode_segment("_history"), "%5Fhistory");
/// ```
#[must_use]
pub fn encode_segment(value: &str) -> String {
    match value.strip_prefix('_') {
        Some(rest) => format!("%5F{}", utf8_percent_encode(rest, SEGMENT)),
        None => utf8_percent_encode(value, SEGMENT).to_string(),
    }
}

/// Decodes one percent-encoded path segment.
///
/// Returns `None` if the decoded bytes are not valid UTF-8.
#[must_use]
pub fn decode_segment(segment: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(segment).decode_utf8().ok()
}

/// Returns true if `value` is absent or consists only of whitespace.
#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("  \t")));
        assert!(!is_blank(Some("0")));
        assert!(!is_blank(Some(" 123 ")));
    }

    #[test]
    fn test_segment_escapes_reserved_characters() {
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("50%"), "50%25");
        assert_eq!(encode_segment("$everything"), "%24everything");
        assert_eq!(encode_segment("my_id"), "my_id");
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_decode_segment() {
        assert_eq!(decode_segment("a%2Fb").as_deref(), Some("a/b"));
        assert_eq!(decode_segment("%5Fhistory").as_deref(), Some("_history"));
        assert_eq!(decode_segment("plain").as_deref(), Some("plain"));
        assert!(decode_segment("%FF").is_none());
    }

    proptest::proptest! {
        #[test]
        fn prop_segment_round_trip(value in "\\PC{1,32}") {
            let encoded = encode_segment(&value);
            proptest::prop_assert!(!encoded.contains(['/', '?', '#']));
            proptest::prop_assert!(!encoded.starts_with(['_', '$']));
            let decoded = decode_segment(&encoded);
            proptest::prop_assert_eq!(decoded.as_deref(), Some(value.as_str()));
        }
    }
}
