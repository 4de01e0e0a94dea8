mod builder;
mod compiled;
mod error;
mod options;

pub use builder::VerbalExpression;
pub use compiled::CompiledExpression;
pub use error::{ExpressionError, ExpressionResult};
pub use options::{ExpressionOptions, ExpressionOptionsBuilder, ExpressionOptionsError};
