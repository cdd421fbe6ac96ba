use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid symbol {ch:?} at position {index}")]
    InvalidSymbol { ch: char, index: usize },
    #[error("Unknown dictionary code {code} (dictionary holds {size} entries)")]
    UnknownCode { code: usize, size: usize },
    #[error("Compressed stream ended before the end marker")]
    Truncated,
    #[error("Decoded text is not valid UTF-16")]
    InvalidUtf16,
    #[error("Malformed compact record: {0}")]
    MalformedRecord(String),
    #[error("Malformed legacy payload: {0}")]
    MalformedLegacy(String),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid puzzle id: {0}")]
    InvalidPuzzleId(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
