use thiserror::Error;

/// Crate-wide error type.
///
/// `Invalid`/`Incomplete` mirror the signed parse-status contract described by the walker
/// (§3/§7 of the design notes): most entry points prefer returning a
/// [`crate::walker::ParseStatus`] directly, but anything that also has to report an I/O failure
/// (file helpers, writer-backed sinks) needs a real `Result` error type, which is what this enum
/// is for.
#[derive(Debug, Error)]
pub enum RjError {
    #[error("invalid JSON at byte offset {pos}")]
    Invalid { pos: usize },

    #[error("input ended before a complete value could be parsed")]
    Incomplete,

    #[error("path exceeded the configured budget")]
    PathOverflow,

    #[error("format string error: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("serde_json error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type RjResult<T> = Result<T, RjError>;
