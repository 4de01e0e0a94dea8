/// How a token reacts to a quantifier appended after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Single character, escape, class or group; takes a quantifier directly.
    Atom,
    /// Several units in a row; must be grouped before quantifying.
    Sequence,
    /// Already ends in a quantifier; must be grouped before quantifying again.
    Quantified,
}

impl TokenKind {
    #[inline]
    pub fn needs_group(self) -> bool {
        !matches!(self, TokenKind::Atom)
    }
}

/// Position of a token inside the body of one alternation branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHandle {
    pub(crate) branch: usize,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) kind: TokenKind,
}

impl TokenHandle {
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte range of the token within the current branch body.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn branch(&self) -> usize {
        self.branch
    }
}
