use thiserror::Error;

/// Malformed or unexpected input bytes.
///
/// None of these are recovered from, a buffer that fails to decode is never
/// re-encoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("truncated at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("header too short: {len} bytes, need at least {min}")]
    HeaderTooShort { len: usize, min: usize },
    #[error("implausible {what} count {count} at offset {offset}")]
    ArrayCountImplausible {
        what: &'static str,
        count: i32,
        offset: usize,
    },
    #[error("{count} trailing bytes at offset {offset}")]
    TrailingBytes { offset: usize, count: usize },
    #[error("implausible string length {len} at offset {offset}")]
    StringLengthImplausible { len: i32, offset: usize },
    #[error("missing string terminator at offset {offset}")]
    MissingTerminator { offset: usize },
    #[error("non-zero padding byte at offset {offset}")]
    NonZeroPadding { offset: usize },
    #[error("string at offset {offset} is not valid utf-8")]
    InvalidUtf8 { offset: usize },
    #[error("re-encoded buffer differs at offset {offset}")]
    RoundTripMismatch { offset: usize },
}
