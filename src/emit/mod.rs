//! Component B: the printf-style emitter (§4.B). See [`fmt::printf`] for the core.

pub mod codec;
pub mod fmt;
pub mod sink;

pub use fmt::{printf, Arg};
pub use sink::{BufSink, CountingSink, Sink, WriteSink};

use crate::error::RjResult;

/// Render `fmt`/`args` into a freshly allocated `Vec<u8>`.
pub fn printf_to_vec(fmt: &str, args: &mut [Arg<'_>]) -> RjResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut sink = BufSink::new(&mut out);
    printf(&mut sink, fmt, args)?;
    Ok(out)
}

/// Render `fmt`/`args` to any [`std::io::Write`] destination.
pub fn printf_to_writer<W: std::io::Write>(writer: W, fmt: &str, args: &mut [Arg<'_>]) -> RjResult<usize> {
    let mut sink = WriteSink::new(writer);
    printf(&mut sink, fmt, args)
}
