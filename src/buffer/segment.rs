use super::{BufferError, BufferResult, Quantifier, TokenHandle, TokenKind};
use crate::sanitize::{literal_units, sanitize};
use smallvec::SmallVec;

const START_ANCHOR: &str = "^";
const END_ANCHOR: &str = "$";
const GROUP_OPEN: &str = "(?:";
const GROUP_CLOSE: char = ')';
const ALTERNATION: char = '|';

/// Ordered pattern text split into prefix, body and suffix.
///
/// Anchors and the alternation wrapper are kept as state and only turned
/// into text by [`SegmentBuffer::prefix`] and [`SegmentBuffer::suffix`], so
/// toggling them never touches the body. Completed alternatives live in
/// `branches`; `body` is always the alternative currently being written.
#[derive(Debug, Clone)]
pub struct SegmentBuffer {
    start_anchor: bool,
    end_anchor: bool,
    branches: SmallVec<[String; 2]>,
    body: String,
    last: Option<TokenHandle>,
    // byte offsets of explicit '(' in `body` not yet closed
    open_captures: SmallVec<[usize; 4]>,
    close_open_captures: bool,
}

impl Default for SegmentBuffer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SegmentBuffer {
    pub fn new(close_open_captures: bool) -> Self {
        Self {
            start_anchor: false,
            end_anchor: false,
            branches: SmallVec::new(),
            body: String::new(),
            last: None,
            open_captures: SmallVec::new(),
            close_open_captures,
        }
    }

    /// Appends `text` as an exact literal.
    pub fn push_literal(&mut self, text: &str) -> Option<TokenHandle> {
        let sanitized = sanitize(text);
        let kind = kind_for_units(&sanitized);
        self.push(&sanitized, kind)
    }

    /// Appends `fragment` verbatim; well-formedness is the caller's concern.
    pub fn push_raw(&mut self, fragment: &str) -> Option<TokenHandle> {
        let kind = kind_for_units(fragment);
        self.push(fragment, kind)
    }

    /// Appends an already rendered fragment. An empty fragment adds no token
    /// and leaves nothing for a following quantifier.
    pub fn push(&mut self, fragment: &str, kind: TokenKind) -> Option<TokenHandle> {
        if fragment.is_empty() {
            self.last = None;
            return None;
        }

        let start = self.body.len();
        self.body.push_str(fragment);

        let handle = TokenHandle {
            branch: self.branches.len(),
            start,
            end: self.body.len(),
            kind,
        };
        tracing::event!(tracing::Level::TRACE, operation="push", fragment=%fragment, kind=?kind, start=start as u64);
        self.last = Some(handle);

        Some(handle)
    }

    pub fn last_token(&self) -> Option<TokenHandle> {
        self.last
    }

    /// Applies `quantifier` to the token behind `handle`, which must still be
    /// the most recent one. Returns the handle of the quantified token.
    pub fn quantify(
        &mut self,
        handle: TokenHandle,
        quantifier: Quantifier,
    ) -> BufferResult<TokenHandle> {
        if self.last != Some(handle) {
            return Err(BufferError::StaleToken { handle });
        }

        if handle.kind.needs_group() {
            self.body.insert_str(handle.start, GROUP_OPEN);
            self.body.push(GROUP_CLOSE);
        }

        let rendered = quantifier.to_string();
        self.body.push_str(&rendered);

        let quantified = TokenHandle {
            end: self.body.len(),
            kind: TokenKind::Quantified,
            ..handle
        };
        tracing::event!(tracing::Level::TRACE, operation="quantify", quantifier=%rendered, start=handle.start as u64, grouped=handle.kind.needs_group());
        self.last = Some(quantified);

        Ok(quantified)
    }

    pub fn quantify_last(&mut self, quantifier: Quantifier) -> BufferResult<TokenHandle> {
        let handle = self.last.ok_or(BufferError::NothingToQuantify)?;
        self.quantify(handle, quantifier)
    }

    pub fn begin_capture(&mut self) {
        self.open_captures.push(self.body.len());
        self.body.push('(');
        self.last = None;
        tracing::event!(tracing::Level::TRACE, operation="begin_capture", depth=self.open_captures.len() as u64);
    }

    /// Closes the innermost open capture; the whole group becomes the
    /// previous token.
    pub fn end_capture(&mut self) -> BufferResult<TokenHandle> {
        let start = self.open_captures.pop().ok_or(BufferError::NoOpenCapture)?;
        self.body.push(')');

        let handle = TokenHandle {
            branch: self.branches.len(),
            start,
            end: self.body.len(),
            kind: TokenKind::Atom,
        };
        tracing::event!(tracing::Level::TRACE, operation="end_capture", depth=self.open_captures.len() as u64);
        self.last = Some(handle);

        Ok(handle)
    }

    pub fn open_captures(&self) -> usize {
        self.open_captures.len()
    }

    /// Seals the current body as one alternative and starts a fresh one.
    /// Captures still open are closed inside the sealed alternative so no
    /// group straddles the `|`.
    pub fn alternate(&mut self) {
        if !self.open_captures.is_empty() {
            tracing::debug!(
                count = self.open_captures.len() as u64,
                "closing open capture groups before alternation"
            );
            for _ in self.open_captures.drain(..) {
                self.body.push(')');
            }
        }

        let sealed = std::mem::take(&mut self.body);
        self.branches.push(sealed);
        self.last = None;
        tracing::event!(tracing::Level::TRACE, operation="alternate", branches=self.branches.len() as u64);
    }

    pub fn is_alternating(&self) -> bool {
        !self.branches.is_empty()
    }

    pub fn set_start_anchor(&mut self, enabled: bool) {
        self.start_anchor = enabled;
    }

    pub fn set_end_anchor(&mut self, enabled: bool) {
        self.end_anchor = enabled;
    }

    pub fn set_close_open_captures(&mut self, enabled: bool) {
        self.close_open_captures = enabled;
    }

    pub fn prefix(&self) -> String {
        let mut out = String::new();
        if self.start_anchor {
            out.push_str(START_ANCHOR);
        }
        if self.is_alternating() {
            out.push_str(GROUP_OPEN);
        }
        out
    }

    pub fn body(&self) -> String {
        let mut out = String::new();

        for branch in &self.branches {
            out.push_str(branch);
            out.push(ALTERNATION);
        }
        out.push_str(&self.body);

        if self.close_open_captures {
            for _ in 0..self.open_captures.len() {
                out.push(')');
            }
        }

        out
    }

    pub fn suffix(&self) -> String {
        let mut out = String::new();
        if self.is_alternating() {
            out.push(GROUP_CLOSE);
        }
        if self.end_anchor {
            out.push_str(END_ANCHOR);
        }
        out
    }

    pub fn render(&self) -> String {
        let mut out = self.prefix();
        out.push_str(&self.body());
        out.push_str(&self.suffix());
        out
    }

    pub fn is_empty(&self) -> bool {
        self.render().is_empty()
    }
}

fn kind_for_units(fragment: &str) -> TokenKind {
    if literal_units(fragment) == 1 {
        TokenKind::Atom
    } else {
        TokenKind::Sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_sanitized_and_recorded_as_last_token() {
        let mut buf = SegmentBuffer::default();
        let handle = buf.push_literal("a.b").unwrap();
        assert_eq!(buf.render(), "a\\.b");
        assert_eq!(handle.kind(), TokenKind::Sequence);
        assert_eq!(handle.span(), 0..4);
        assert_eq!(buf.last_token(), Some(handle));
    }

    #[test]
    fn anchors_toggle_without_touching_body() {
        let mut buf = SegmentBuffer::default();
        buf.set_start_anchor(true);
        buf.push_literal("a");
        buf.set_end_anchor(true);
        assert_eq!(buf.render(), "^a$");

        buf.set_start_anchor(false);
        buf.set_end_anchor(false);
        assert_eq!(buf.render(), "a");
    }

    #[test]
    fn quantifying_an_atom_appends_directly() {
        let mut buf = SegmentBuffer::default();
        buf.push_literal("a");
        buf.quantify_last(Quantifier::OneOrMore).unwrap();
        assert_eq!(buf.render(), "a+");
    }

    #[test]
    fn quantifying_a_sequence_groups_it_first() {
        let mut buf = SegmentBuffer::default();
        buf.push_literal("x");
        buf.push_literal("foo");
        buf.quantify_last(Quantifier::repeat(1, Some(3))).unwrap();
        assert_eq!(buf.render(), "x(?:foo){1,3}");
    }

    #[test]
    fn requantifying_groups_the_quantified_token() {
        let mut buf = SegmentBuffer::default();
        buf.push_literal("a");
        buf.quantify_last(Quantifier::OneOrMore).unwrap();
        buf.quantify_last(Quantifier::Exactly(2)).unwrap();
        assert_eq!(buf.render(), "(?:a+){2}");
    }

    #[test]
    fn quantifying_nothing_is_reported() {
        let mut buf = SegmentBuffer::default();
        assert_eq!(
            buf.quantify_last(Quantifier::OneOrMore),
            Err(BufferError::NothingToQuantify)
        );
        assert_eq!(buf.render(), "");
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut buf = SegmentBuffer::default();
        let first = buf.push_literal("a").unwrap();
        buf.push_literal("b");
        assert_eq!(
            buf.quantify(first, Quantifier::OneOrMore),
            Err(BufferError::StaleToken { handle: first })
        );
        assert_eq!(buf.render(), "ab");
    }

    #[test]
    fn empty_literal_leaves_nothing_to_quantify() {
        let mut buf = SegmentBuffer::default();
        buf.push_literal("a");
        assert!(buf.push_literal("").is_none());
        assert!(buf.last_token().is_none());
    }

    #[test]
    fn capture_group_becomes_previous_token_when_closed() {
        let mut buf = SegmentBuffer::default();
        buf.begin_capture();
        assert!(buf.last_token().is_none());
        buf.push_literal("ab");
        let group = buf.end_capture().unwrap();
        assert_eq!(group.kind(), TokenKind::Atom);
        buf.quantify_last(Quantifier::OneOrMore).unwrap();
        assert_eq!(buf.render(), "(ab)+");
    }

    #[test]
    fn open_capture_is_closed_on_render_only() {
        let mut buf = SegmentBuffer::default();
        buf.push_literal("foo");
        buf.begin_capture();
        buf.push_literal("bar");
        assert_eq!(buf.render(), "foo(bar)");
        assert_eq!(buf.open_captures(), 1);

        buf.set_close_open_captures(false);
        assert_eq!(buf.render(), "foo(bar");
    }

    #[test]
    fn end_capture_without_open_group_is_reported() {
        let mut buf = SegmentBuffer::default();
        assert_eq!(buf.end_capture(), Err(BufferError::NoOpenCapture));
        assert_eq!(buf.render(), "");
    }

    #[test]
    fn alternation_wraps_everything_written_so_far() {
        let mut buf = SegmentBuffer::default();
        buf.set_start_anchor(true);
        buf.push_literal("abc");
        buf.alternate();
        buf.push_literal("def");
        buf.set_end_anchor(true);

        assert_eq!(buf.prefix(), "^(?:");
        assert_eq!(buf.body(), "abc|def");
        assert_eq!(buf.suffix(), ")$");
        assert_eq!(buf.render(), "^(?:abc|def)$");
    }

    #[test]
    fn repeated_alternation_adds_branches_to_one_group() {
        let mut buf = SegmentBuffer::default();
        buf.push_literal("a");
        buf.alternate();
        buf.push_literal("b");
        buf.alternate();
        buf.push_literal("c");
        assert_eq!(buf.render(), "(?:a|b|c)");
    }

    #[test]
    fn alternation_closes_captures_in_the_sealed_branch() {
        let mut buf = SegmentBuffer::default();
        buf.begin_capture();
        buf.push_literal("a");
        buf.alternate();
        buf.push_literal("b");
        assert_eq!(buf.open_captures(), 0);
        assert_eq!(buf.render(), "(?:(a)|b)");
    }

    #[test]
    fn alternation_resets_previous_token() {
        let mut buf = SegmentBuffer::default();
        buf.push_literal("a");
        buf.alternate();
        assert_eq!(
            buf.quantify_last(Quantifier::OneOrMore),
            Err(BufferError::NothingToQuantify)
        );
    }
}
