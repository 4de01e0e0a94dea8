//! Readable, chainable construction of regular expressions.
//!
//! A [`VerbalExpression`] assembles pattern text and a flag set from calls
//! such as `start_of_line`, `then`, `maybe` and `or`. Matching is left to
//! the [`regex`] crate: [`VerbalExpression::compile`] hands the text and
//! flags over and returns a [`CompiledExpression`].

pub mod buffer;
pub mod class;
pub mod expression;
pub mod modifier;
mod sanitize;

pub use buffer::{BufferError, Quantifier, TokenHandle, TokenKind};
pub use expression::{
    CompiledExpression, ExpressionError, ExpressionOptions, ExpressionOptionsBuilder,
    ExpressionOptionsError, ExpressionResult, VerbalExpression,
};
pub use modifier::{Modifier, ModifierError, Modifiers};
pub use sanitize::{sanitize, sanitize_class};
