use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ModifierError {
    #[error("unknown modifier '{found}' (expected one of g, i, m, s, y)")]
    Unknown { found: char },
    #[error("modifier must be a single character (got {len} characters)")]
    NotSingleCharacter { len: usize },
}

pub type ModifierResult<T> = Result<T, ModifierError>;
