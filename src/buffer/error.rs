use super::TokenHandle;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("no previous token to quantify")]
    NothingToQuantify,
    #[error("token {handle:?} is no longer the most recent token")]
    StaleToken { handle: TokenHandle },
    #[error("no capture group is open")]
    NoOpenCapture,
}

pub type BufferResult<T> = Result<T, BufferError>;
