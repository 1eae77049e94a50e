//! Relaxed-JSON tokenizer, printf-style emitter, scanf-style extractor and splice-based mutator.
//!
//! The grammar this crate parses is standard JSON plus one relaxation: object keys may be bare
//! identifiers (`{a:1}`) as well as quoted strings. [`walk`] is the foundation everything else is
//! built on — a streaming, allocation-free-at-its-core tokenizer that reports a path-tagged event
//! per value. [`printf`], [`scanf`], [`setf`] and [`prettify`] all drive a `walk` pass internally.

pub mod emit;
pub mod error;
pub mod extract;
pub mod fileio;
pub mod log;
pub mod mutate;
pub mod options;
pub mod pathbuf;
pub mod pretty;
pub mod token;
pub mod walker;

#[cfg(feature = "serde")]
pub mod value;

#[cfg(feature = "c-api")]
pub mod ffi;

pub mod cli;

pub use emit::{printf, printf_to_vec, printf_to_writer, Arg};
pub use error::{RjError, RjResult};
pub use extract::{scanf, scanf_array_elem, ArrayElemResult, Out};
pub use mutate::{next_elem, next_key, setf, setf_fmt, SetOp};
pub use options::{PrettyOptions, WalkOptions, JSON_MAX_DEPTH, JSON_MAX_PATH_LEN};
pub use pretty::prettify;
pub use token::{Token, TokenKind};
pub use walker::{walk, walk_default, Event, ParseStatus, WalkSink};

/// Parse `buf` as JSON and report whether it currently holds a complete value, is a valid prefix
/// of one, or can never become valid (§3). This is the entry point callers reach for when they
/// only care about the status, not the event stream — pass a no-op sink.
///
/// # Examples
///
/// ```
/// use jsonwalk::{parse_status, ParseStatus};
///
/// assert_eq!(parse_status(b"{}"), ParseStatus::Complete(2));
/// assert_eq!(parse_status(b"{a:nul"), ParseStatus::Incomplete);
/// assert_eq!(parse_status(b"{a:.1}"), ParseStatus::Invalid { pos: 4 });
/// ```
pub fn parse_status(buf: &[u8]) -> ParseStatus {
    walk_default(buf, &mut |_ev: Event<'_>| {})
}

/// Convenience wrapper over [`crate::value::materialize`] for callers who'd rather get an owned
/// tree than drive the event stream by hand.
#[cfg(feature = "serde")]
pub fn loads(buf: &[u8]) -> RjResult<serde_json::Value> {
    value::materialize(buf)
}

#[cfg(test)]
mod tests;
