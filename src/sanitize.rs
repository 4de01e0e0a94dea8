/// Characters with structural meaning outside a character class.
const LITERAL_META: &[char] = &[
    '^', '$', '\\', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// Characters with structural meaning inside `[...]`. The host engine also
/// treats `[` as a nested class and `&&`/`~~` as set operators.
const CLASS_META: &[char] = &[']', '\\', '^', '-', '[', '&', '~'];

#[inline]
fn escape_with(text: &str, meta: &[char]) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);

    for c in text.chars() {
        if meta.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }

    out
}

/// Escapes every regex metacharacter so `text` matches itself literally.
#[tracing::instrument(level = "trace", fields(len = text.len() as u64))]
pub fn sanitize(text: &str) -> String {
    escape_with(text, LITERAL_META)
}

/// Escapes `text` for use between the brackets of a character class.
#[tracing::instrument(level = "trace", fields(len = text.len() as u64))]
pub fn sanitize_class(text: &str) -> String {
    escape_with(text, CLASS_META)
}

/// Number of atomic units in an already sanitized literal.
pub(crate) fn literal_units(sanitized: &str) -> usize {
    let mut units = 0usize;
    let mut chars = sanitized.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        }
        units += 1;
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_metacharacter() {
        assert_eq!(
            sanitize("^$\\.|?*+()[]{}"),
            "\\^\\$\\\\\\.\\|\\?\\*\\+\\(\\)\\[\\]\\{\\}"
        );
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(sanitize("foo bar:baz=1"), "foo bar:baz=1");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn class_escaping_only_touches_class_metacharacters() {
        assert_eq!(sanitize_class("a-z]^\\"), "a\\-z\\]\\^\\\\");
        assert_eq!(sanitize_class(".*+?"), ".*+?");
        assert_eq!(sanitize_class("[&&~~"), "\\[\\&\\&\\~\\~");
    }

    #[test]
    fn counts_escaped_characters_as_one_unit() {
        assert_eq!(literal_units(&sanitize("a")), 1);
        assert_eq!(literal_units(&sanitize(".")), 1);
        assert_eq!(literal_units(&sanitize("a.b")), 3);
        assert_eq!(literal_units("é"), 1);
        assert_eq!(literal_units(""), 0);
    }

    #[test]
    fn sanitized_literal_compiles_and_matches_itself() {
        let text = "$a^b\\c|d(e)f[g]h{i}j.k*l+m?n:o=p[q]";
        let re = regex::Regex::new(&format!("^{}$", sanitize(text))).unwrap();
        assert!(re.is_match(text));
        assert!(!re.is_match("a"));
    }
}
