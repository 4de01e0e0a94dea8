use super::ExpressionOptionsError;
use crate::modifier::ModifierError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpressionError {
    #[error("pattern '{pattern}' failed to compile")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error(transparent)]
    Options(#[from] ExpressionOptionsError),
    #[error(transparent)]
    Modifier(#[from] ModifierError),
}

pub type ExpressionResult<T> = Result<T, ExpressionError>;
