use std::fmt;

/// Repetition suffix applied to the previous token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Optional,
    OneOrMore,
    Exactly(u32),
    AtLeast(u32),
    Between(u32, u32),
}

impl Quantifier {
    /// Maps optional bounds onto a suffix. No bounds means one or more; an
    /// upper bound alone counts from zero.
    pub fn from_bounds(lower: Option<u32>, upper: Option<u32>) -> Self {
        match (lower, upper) {
            (None, None) => Quantifier::OneOrMore,
            (Some(min), None) => Quantifier::AtLeast(min),
            (min, Some(max)) => Quantifier::Between(min.unwrap_or(0), max),
        }
    }

    pub fn repeat(lower: u32, upper: Option<u32>) -> Self {
        match upper {
            Some(max) => Quantifier::Between(lower, max),
            None => Quantifier::Exactly(lower),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Optional => f.write_str("?"),
            Quantifier::OneOrMore => f.write_str("+"),
            Quantifier::Exactly(n) => write!(f, "{{{n}}}"),
            Quantifier::AtLeast(n) => write!(f, "{{{n},}}"),
            Quantifier::Between(n, m) => write!(f, "{{{n},{m}}}"),
        }
    }
}
