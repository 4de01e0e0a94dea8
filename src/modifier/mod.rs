mod error;
mod flags;

pub use error::{ModifierError, ModifierResult};
pub use flags::{Modifier, Modifiers};
