//! Output destinations for the Emitter (§4.B).
//!
//! Mirrors the teacher's buffer-vs-writer `Emitter`/`Sink` split: callers can render into an
//! in-memory `Vec<u8>` (`BufSink`) or stream straight to any `std::io::Write` (`WriteSink`)
//! without the core printf logic caring which.

use std::io;

/// Minimal write surface the printf core needs.
pub trait Sink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn write_byte(&mut self, b: u8) -> io::Result<()> {
        self.write_bytes(&[b])
    }
}

/// Appends to an in-memory buffer. Never fails.
pub struct BufSink<'a> {
    pub buf: &'a mut Vec<u8>,
}

impl<'a> BufSink<'a> {
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }
}

impl Sink for BufSink<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

/// Adapts any [`std::io::Write`] into a [`Sink`].
pub struct WriteSink<W> {
    pub writer: W,
}

impl<W: io::Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: io::Write> Sink for WriteSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }
}

/// Wraps any [`Sink`] and tallies the total bytes written through it.
///
/// Backs both `%n` (which reports the running count) and `%M` (whose hook output must be counted
/// like any other emitted text) without separate bookkeeping in the printf core.
pub struct CountingSink<'s> {
    inner: &'s mut dyn Sink,
    pub count: usize,
}

impl<'s> CountingSink<'s> {
    pub fn new(inner: &'s mut dyn Sink) -> Self {
        Self { inner, count: 0 }
    }
}

impl Sink for CountingSink<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_bytes(bytes)?;
        self.count += bytes.len();
        Ok(())
    }
}
