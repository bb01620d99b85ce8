//! Binary decode error type.

use thiserror::Error;

/// Error type for malformed binary document input.
///
/// A `FormatError` is fatal to the decode call that produced it and leaves
/// no shared state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("document length prefix inconsistent with available bytes")]
    LengthMismatch,
    #[error("unrecognized type tag: 0x{0:02x}")]
    UnknownTypeTag(u8),
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("trailing bytes after document")]
    TrailingBytes,
}
