use super::compiled::display_source;
use super::{CompiledExpression, ExpressionOptions, ExpressionResult};
use crate::buffer::{BufferError, Quantifier, SegmentBuffer, TokenHandle, TokenKind};
use crate::class;
use crate::modifier::{Modifier, Modifiers};
use regex::{Captures, Replacer};
use std::fmt;

const ANYTHING: &str = ".*";
const SOMETHING: &str = ".+";
const LINE_BREAK: &str = r"(?:\r\n|\r|\n)";
const TAB: &str = r"\t";
const WORD: &str = r"(?-u:\w)+";
const DIGIT: &str = r"(?-u:\d)";
const WHITESPACE: &str = r"\s";

/// Chainable regular-expression builder.
///
/// Each call appends to the pattern or flips a flag and hands the builder
/// back. Nothing is compiled until [`compile`](Self::compile) or one of the
/// matching pass-throughs is called.
///
/// ```
/// use verbal_expressions::VerbalExpression;
///
/// let expr = VerbalExpression::new()
///     .start_of_line()
///     .then("http")
///     .maybe("s")
///     .then("://")
///     .anything_but(" ")
///     .end_of_line();
///
/// assert!(expr.is_match("https://example.com").unwrap());
/// assert!(!expr.is_match("ftp://example.com").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VerbalExpression {
    buffer: SegmentBuffer,
    options: ExpressionOptions,
}

impl VerbalExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExpressionOptions) -> Self {
        Self {
            buffer: SegmentBuffer::new(options.close_open_captures),
            options,
        }
    }

    /// Like [`with_options`](Self::with_options) but rejects invalid limits.
    pub fn try_with_options(options: ExpressionOptions) -> ExpressionResult<Self> {
        options.validate()?;
        Ok(Self::with_options(options))
    }

    pub fn options(&self) -> &ExpressionOptions {
        &self.options
    }

    fn push(mut self, fragment: &str, kind: TokenKind) -> Self {
        self.buffer.push(fragment, kind);
        self
    }

    fn quantify(mut self, quantifier: Quantifier) -> Self {
        if let Err(err) = self.buffer.quantify_last(quantifier) {
            report_misuse("quantify", &err);
        }
        self
    }

    // anchors

    pub fn start_of_line(self) -> Self {
        self.set_start_of_line(true)
    }

    pub fn set_start_of_line(mut self, enabled: bool) -> Self {
        self.buffer.set_start_anchor(enabled);
        self
    }

    pub fn end_of_line(self) -> Self {
        self.set_end_of_line(true)
    }

    pub fn set_end_of_line(mut self, enabled: bool) -> Self {
        self.buffer.set_end_anchor(enabled);
        self
    }

    // literals

    /// Appends `value` as an exact literal.
    pub fn then(mut self, value: &str) -> Self {
        self.buffer.push_literal(value);
        self
    }

    pub fn find(self, value: &str) -> Self {
        self.then(value)
    }

    /// Optional literal.
    pub fn maybe(mut self, value: &str) -> Self {
        if self.buffer.push_literal(value).is_none() {
            return self;
        }
        self.quantify(Quantifier::Optional)
    }

    /// Appends `fragment` without escaping. Unbalanced or malformed input
    /// surfaces as a compile error.
    pub fn add(mut self, fragment: &str) -> Self {
        self.buffer.push_raw(fragment);
        self
    }

    /// Turns everything written so far into one alternative and starts
    /// another with `value`. Anchors and later calls apply to the whole
    /// alternation. An empty `value` leaves the new alternative for the
    /// following calls to fill.
    pub fn or(mut self, value: &str) -> Self {
        self.buffer.alternate();
        self.then(value)
    }

    // wildcards and classes

    pub fn anything(self) -> Self {
        self.push(ANYTHING, TokenKind::Quantified)
    }

    pub fn something(self) -> Self {
        self.push(SOMETHING, TokenKind::Quantified)
    }

    /// One or more characters outside `value`.
    pub fn anything_but(self, value: &str) -> Self {
        match class::none_of(value) {
            Some(negated) => self.push(&format!("{negated}+"), TokenKind::Quantified),
            None => self.something(),
        }
    }

    /// Same token as [`anything_but`](Self::anything_but).
    pub fn something_but(self, value: &str) -> Self {
        self.anything_but(value)
    }

    pub fn any_of(self, chars: &str) -> Self {
        let fragment = class::any_of(chars).unwrap_or_default();
        if fragment.is_empty() {
            tracing::warn!(operation = "any_of", "empty character list adds nothing");
        }
        self.push(&fragment, TokenKind::Atom)
    }

    pub fn any(self, chars: &str) -> Self {
        self.any_of(chars)
    }

    /// Class built from a flat list read as `(from, to)` pairs, e.g.
    /// `range(&['a', 'z', '0', '9'])` gives `[a-z0-9]`.
    pub fn range(self, bounds: &[char]) -> Self {
        let (fragment, dangling) = class::range(bounds);

        if let Some(c) = dangling {
            tracing::warn!(operation = "range", dangling = %c, "odd number of bounds; last one ignored");
        }

        self.push(&fragment.unwrap_or_default(), TokenKind::Atom)
    }

    // special characters

    pub fn line_break(self) -> Self {
        self.push(LINE_BREAK, TokenKind::Atom)
    }

    pub fn br(self) -> Self {
        self.line_break()
    }

    pub fn tab(self) -> Self {
        self.push(TAB, TokenKind::Atom)
    }

    /// One or more ASCII word characters (`A-Z`, `a-z`, `0-9`, `_`).
    pub fn word(self) -> Self {
        self.push(WORD, TokenKind::Quantified)
    }

    /// One ASCII digit.
    pub fn digit(self) -> Self {
        self.push(DIGIT, TokenKind::Atom)
    }

    pub fn whitespace(self) -> Self {
        self.push(WHITESPACE, TokenKind::Atom)
    }

    // modifiers

    pub fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.options.modifiers.enable(modifier);
        self
    }

    pub fn remove_modifier(mut self, modifier: Modifier) -> Self {
        self.options.modifiers.disable(modifier);
        self
    }

    /// Enables the modifier spelled by `flag` in engine notation (`g`, `i`,
    /// `m`, `s`, `y`).
    pub fn add_flag(self, flag: char) -> ExpressionResult<Self> {
        let modifier = Modifier::try_from(flag)?;
        Ok(self.add_modifier(modifier))
    }

    pub fn remove_flag(self, flag: char) -> ExpressionResult<Self> {
        let modifier = Modifier::try_from(flag)?;
        Ok(self.remove_modifier(modifier))
    }

    pub fn with_any_case(self) -> Self {
        self.set_any_case(true)
    }

    pub fn set_any_case(mut self, enabled: bool) -> Self {
        self.options
            .modifiers
            .toggle_to(Modifier::IgnoreCase, enabled);
        self
    }

    /// Only the first match is produced.
    pub fn stop_at_first(self) -> Self {
        self.set_stop_at_first(true)
    }

    pub fn set_stop_at_first(mut self, enabled: bool) -> Self {
        self.options.modifiers.toggle_to(Modifier::Global, !enabled);
        self
    }

    /// `^` and `$` anchor to the whole subject instead of each line.
    pub fn search_one_line(self) -> Self {
        self.set_search_one_line(true)
    }

    pub fn set_search_one_line(mut self, enabled: bool) -> Self {
        self.options
            .modifiers
            .toggle_to(Modifier::Multiline, !enabled);
        self
    }

    // loops

    /// Repeats the previous token exactly `lower` times, or between `lower`
    /// and `upper` times.
    pub fn repeat_previous(self, lower: u32, upper: Option<u32>) -> Self {
        self.quantify(Quantifier::repeat(lower, upper))
    }

    pub fn one_or_more(self) -> Self {
        self.quantify(Quantifier::OneOrMore)
    }

    /// Appends `value` followed by a repetition: one or more with no bounds,
    /// at least `lower`, or between `lower` and `upper`. Bounds out of order
    /// surface as a compile error.
    pub fn multiple(mut self, value: &str, lower: Option<u32>, upper: Option<u32>) -> Self {
        if self.buffer.push_literal(value).is_none() {
            report_misuse("multiple", &BufferError::NothingToQuantify);
            return self;
        }
        self.quantify(Quantifier::from_bounds(lower, upper))
    }

    // capture groups

    pub fn begin_capture(mut self) -> Self {
        self.buffer.begin_capture();
        self
    }

    pub fn end_capture(mut self) -> Self {
        if let Err(err) = self.buffer.end_capture() {
            report_misuse("end_capture", &err);
        }
        self
    }

    // inspection

    pub fn last_token(&self) -> Option<TokenHandle> {
        self.buffer.last_token()
    }

    pub fn open_captures(&self) -> usize {
        self.buffer.open_captures()
    }

    /// Pattern text without flags.
    pub fn source(&self) -> String {
        self.buffer.render()
    }

    pub fn prefix(&self) -> String {
        self.buffer.prefix()
    }

    pub fn suffix(&self) -> String {
        self.buffer.suffix()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.options.modifiers
    }

    // host engine

    /// Compiles the current pattern and flags into a value that no longer
    /// follows this builder.
    pub fn compile(&self) -> ExpressionResult<CompiledExpression> {
        CompiledExpression::new(&self.source(), &self.options)
    }

    pub fn is_match(&self, subject: &str) -> ExpressionResult<bool> {
        Ok(self.compile()?.is_match(subject))
    }

    /// First match as owned strings, indexed like capture groups. Groups
    /// that did not participate are `None`.
    pub fn exec(&self, subject: &str) -> ExpressionResult<Option<Vec<Option<String>>>> {
        let compiled = self.compile()?;
        Ok(compiled.exec(subject).map(|caps| captures_to_owned(&caps)))
    }

    pub fn matches(&self, subject: &str) -> ExpressionResult<Vec<String>> {
        let compiled = self.compile()?;
        Ok(compiled
            .matches(subject)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    pub fn replace<R: Replacer>(&self, subject: &str, replacement: R) -> ExpressionResult<String> {
        let compiled = self.compile()?;
        Ok(compiled.replace(subject, replacement).into_owned())
    }
}

impl fmt::Display for VerbalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source();
        write!(
            f,
            "/{}/{}",
            display_source(&source),
            self.options.modifiers.to_flag_string()
        )
    }
}

fn captures_to_owned(caps: &Captures<'_>) -> Vec<Option<String>> {
    caps.iter()
        .map(|group| group.map(|m| m.as_str().to_string()))
        .collect()
}

fn report_misuse(operation: &'static str, err: &BufferError) {
    tracing::warn!(operation, error = %err, "call ignored");
}
