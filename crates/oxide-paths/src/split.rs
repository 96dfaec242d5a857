//! Request path splitting and percent-coding.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched when a segment is re-encoded into a rest
/// capture. Everything else, `/` included, is escaped with upper-case hex.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Splits a request path into its decoded segments.
///
/// Exactly one leading `/` is stripped. Repeated separators are kept, so
/// `//` produces an empty segment that can be matched like any other.
/// Only segments containing `%` are decoded; escapes that are not valid
/// UTF-8 decode lossily.
///
/// The root path (`""` or `"/"`) has no segments.
///
/// # Example
///
/// ```
/// use oxide_paths::split;
///
/// assert_eq!(split("/page/Foo%2FBar/"), ["page", "Foo/Bar", ""]);
/// assert!(split("/").is_empty());
/// ```
#[must_use]
pub fn split(path: &str) -> Vec<Cow<'_, str>> {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }

    path.split('/').map(decode).collect()
}

fn decode(segment: &str) -> Cow<'_, str> {
    if segment.contains('%') {
        percent_decode_str(segment).decode_utf8_lossy()
    } else {
        Cow::Borrowed(segment)
    }
}

/// Re-encodes a decoded segment the way it is reported in rest captures.
pub(crate) fn encode_component(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, COMPONENT).into()
}
