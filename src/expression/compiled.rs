use super::{ExpressionError, ExpressionOptions, ExpressionResult};
use crate::modifier::{Modifier, Modifiers};
use regex::{Captures, Regex, RegexBuilder, Replacer};
use std::borrow::Cow;
use std::fmt;

/// A pattern compiled by the host engine together with the flags that the
/// engine itself does not know about (global and sticky).
///
/// The value is detached from the [`VerbalExpression`](super::VerbalExpression)
/// it came from and keeps no search cursor, so every call starts fresh.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    regex: Regex,
    source: String,
    modifiers: Modifiers,
}

impl CompiledExpression {
    #[tracing::instrument(level = "trace", skip(source, options), fields(source = %source, flags = %options.modifiers.to_flag_string()))]
    pub fn new(source: &str, options: &ExpressionOptions) -> ExpressionResult<Self> {
        let modifiers = options.modifiers;
        let multi_line = modifiers.has(Modifier::Multiline);
        let regex = RegexBuilder::new(source)
            .case_insensitive(modifiers.has(Modifier::IgnoreCase))
            .multi_line(multi_line)
            .crlf(multi_line)
            .dot_matches_new_line(modifiers.has(Modifier::DotAll))
            .size_limit(options.size_limit)
            .dfa_size_limit(options.dfa_size_limit)
            .nest_limit(options.nest_limit)
            .build()
            .map_err(|source_err| {
                tracing::event!(tracing::Level::DEBUG, operation="compile", pattern=%source, error=%source_err);
                ExpressionError::Compile {
                    pattern: source.to_string(),
                    source: source_err,
                }
            })?;

        Ok(Self {
            regex,
            source: source.to_string(),
            modifiers,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    fn is_sticky(&self) -> bool {
        self.modifiers.has(Modifier::Sticky)
    }

    fn is_global(&self) -> bool {
        self.modifiers.has(Modifier::Global)
    }

    // A leftmost search from `pos` returns a match starting at `pos` whenever
    // one exists there, so each step only checks where the hit starts. After
    // an empty match the cursor steps over one character.
    fn sticky_captures<'h>(&self, subject: &'h str) -> Vec<Captures<'h>> {
        let mut out = Vec::new();
        let mut pos = 0usize;

        while pos <= subject.len() {
            let Some(caps) = self.regex.captures_at(subject, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            if whole.start() != pos {
                break;
            }

            let end = whole.end();
            out.push(caps);
            if !self.is_global() {
                break;
            }

            pos = if end == pos {
                subject[pos..]
                    .chars()
                    .next()
                    .map_or(pos + 1, |c| pos + c.len_utf8())
            } else {
                end
            };
        }

        out
    }

    /// Whether `subject` contains a match.
    pub fn is_match(&self, subject: &str) -> bool {
        if self.is_sticky() {
            return self.regex.find(subject).is_some_and(|m| m.start() == 0);
        }
        self.regex.is_match(subject)
    }

    /// First match with its capture groups; group 0 is the whole match.
    pub fn exec<'h>(&self, subject: &'h str) -> Option<Captures<'h>> {
        let caps = self.regex.captures(subject)?;
        if self.is_sticky() && caps.get(0).is_some_and(|m| m.start() != 0) {
            return None;
        }
        Some(caps)
    }

    /// Matched substrings: every match under the global flag, otherwise at
    /// most the first one.
    pub fn matches<'h>(&self, subject: &'h str) -> Vec<&'h str> {
        if self.is_sticky() {
            return self
                .sticky_captures(subject)
                .iter()
                .filter_map(|caps| caps.get(0))
                .map(|m| m.as_str())
                .collect();
        }
        if self.is_global() {
            return self.regex.find_iter(subject).map(|m| m.as_str()).collect();
        }
        self.regex.find(subject).map(|m| m.as_str()).into_iter().collect()
    }

    /// Replaces every match under the global flag, otherwise the first one.
    /// `replacement` follows the host engine's `$name` expansion rules.
    pub fn replace<'h, R: Replacer>(&self, subject: &'h str, mut replacement: R) -> Cow<'h, str> {
        if self.is_sticky() {
            let found = self.sticky_captures(subject);
            if found.is_empty() {
                return Cow::Borrowed(subject);
            }

            let mut out = String::with_capacity(subject.len());
            let mut last = 0usize;
            for caps in &found {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                out.push_str(&subject[last..whole.start()]);
                replacement.replace_append(caps, &mut out);
                last = whole.end();
            }
            out.push_str(&subject[last..]);

            return Cow::Owned(out);
        }
        if self.is_global() {
            return self.regex.replace_all(subject, replacement);
        }
        self.regex.replace(subject, replacement)
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{}/{}",
            display_source(&self.source),
            self.modifiers.to_flag_string()
        )
    }
}

/// Pattern text as written between the slashes of `/source/flags`: empty
/// text becomes `(?:)` and every unescaped `/` becomes `\/`.
pub(crate) fn display_source(source: &str) -> Cow<'_, str> {
    if source.is_empty() {
        return Cow::Borrowed("(?:)");
    }
    if !source.contains('/') {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len() + 4);
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '/' => out.push_str("\\/"),
            _ => out.push(c),
        }
    }

    Cow::Owned(out)
}
