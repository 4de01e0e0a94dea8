//! Character-class fragments: `[...]`, `[^...]` and ranges.

use crate::sanitize::sanitize_class;

/// `[chars]`, matching any single listed character. Empty input yields
/// `None` since `[]` is not a valid class.
pub fn any_of(chars: &str) -> Option<String> {
    if chars.is_empty() {
        return None;
    }
    Some(format!("[{}]", sanitize_class(chars)))
}

/// `[^chars]`, matching any single character not listed. Empty input
/// yields `None`.
pub fn none_of(chars: &str) -> Option<String> {
    if chars.is_empty() {
        return None;
    }
    Some(format!("[^{}]", sanitize_class(chars)))
}

/// Builds `[a-z0-9...]` from a flat list read as `(from, to)` pairs. A
/// trailing unpaired character is dropped and reported through the second
/// element of the result.
#[tracing::instrument(level = "trace", fields(len = bounds.len() as u64))]
pub fn range(bounds: &[char]) -> (Option<String>, Option<char>) {
    let mut out = String::from("[");
    let mut pairs = bounds.chunks_exact(2);

    for pair in pairs.by_ref() {
        let mut from = [0u8; 4];
        let mut to = [0u8; 4];
        out.push_str(&sanitize_class(pair[0].encode_utf8(&mut from)));
        out.push('-');
        out.push_str(&sanitize_class(pair[1].encode_utf8(&mut to)));
    }
    out.push(']');

    let dangling = pairs.remainder().first().copied();
    let class = if bounds.len() < 2 { None } else { Some(out) };

    (class, dangling)
}
