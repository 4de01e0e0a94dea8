mod error;
mod quantifier;
mod segment;
mod token;

pub use error::{BufferError, BufferResult};
pub use quantifier::Quantifier;
pub use segment::SegmentBuffer;
pub use token::{TokenHandle, TokenKind};
