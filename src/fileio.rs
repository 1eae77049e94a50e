//! File-backed convenience wrappers (§6 "File I/O"). Thin; all of the real logic lives in
//! [`crate::walker`], [`crate::pretty`] and [`crate::mutate`] and operates on in-memory buffers —
//! these just add the `Result<_, RjError>`/`std::io` plumbing the in-memory APIs don't need.

use std::fs;
use std::path::Path;

use crate::error::RjResult;
use crate::options::PrettyOptions;

/// Read `path` fully into memory. A thin wrapper so callers get [`crate::error::RjError`] instead
/// of juggling `std::io::Error` directly alongside the rest of this crate's error type.
pub fn fread(path: impl AsRef<Path>) -> RjResult<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Read the JSON document at `path`, canonically re-emit it, and write the result to `out_path`.
pub fn prettify_file(path: impl AsRef<Path>, out_path: impl AsRef<Path>, opts: &PrettyOptions) -> RjResult<()> {
    let buf = fread(path)?;
    let pretty = crate::pretty::prettify(&buf, opts)?;
    fs::write(out_path, pretty)?;
    Ok(())
}

/// Render `fmt`/`args` straight to the file at `path`, overwriting it.
pub fn fprintf(path: impl AsRef<Path>, fmt: &str, args: &mut [crate::emit::Arg<'_>]) -> RjResult<usize> {
    let file = fs::File::create(path)?;
    crate::emit::printf_to_writer(file, fmt, args)
}
