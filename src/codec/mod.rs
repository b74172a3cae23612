//! # Codec Module
//!
//! Run-length encoding of channel sample sequences and the binary frame used
//! to carry an encoding as bytes.

pub mod rle;
pub mod wire;

use thiserror::Error;

pub use rle::{MAX_RUN, Run, RunLength};

/// Errors raised while decoding or parsing run-length data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RleError {
    #[error("run {index} has a zero count")]
    ZeroRun { index: usize },

    #[error("decoded to {actual} values, but expected {expected}")]
    LengthMismatch { expected: u64, actual: u64 },

    #[error("truncated buffer: need {need} bytes, got {got}")]
    Truncated { need: usize, got: usize },

    #[error("bad magic bytes {0:?}")]
    BadMagic([u8; 4]),

    #[error("{0} unexpected bytes after the last run")]
    TrailingBytes(usize),

    #[error("{what} ({value}) does not fit in a 32-bit header field")]
    TooLarge { what: &'static str, value: u64 },
}
