//! Component B: the printf-style emitter (§4.B).
//!
//! [`printf`] walks a format string left to right, copying literal text straight to the sink and
//! consuming one [`Arg`] per conversion spec. The conversion grammar follows C's
//! `flags/width/.precision/length/conversion`, extended with the JSON-aware conversions `Q`
//! (escaped string), `B` (bool), `V` (base64 bytes), `H` (hex bytes) and `M` (user hook).
//! Bare object keys inside `{ }` regions of the *literal* format text are auto-quoted on the way
//! out, so callers can write `json_printf_value(&mut buf, "{a:%d}", ...)`-style templates without
//! hand-quoting every key.

use std::io;

use super::codec::{base64_encode, hex_encode};
use super::sink::{CountingSink, Sink};
use crate::error::{RjError, RjResult};
use crate::token::utf8_prefix;

/// The longest prefix of `s` that is at most `max_bytes` bytes, cut at a UTF-8 char boundary.
fn utf8_prefix_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        s
    } else {
        utf8_prefix(&s.as_bytes()[..max_bytes])
    }
}

/// One value consumed by a conversion spec in a `printf` format string.
pub enum Arg<'a> {
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Char(char),
    /// Backs `%s`/`%Q`.
    Str(&'a str),
    /// Backs `%V`/`%H`. A Rust slice already carries pointer and length together, so unlike the
    /// two-argument `(ptr, len)` varargs form this replaces, there is only one `Bytes` variant.
    Bytes(&'a [u8]),
    /// Backs `%n`: receives the number of bytes emitted so far.
    CountOut(&'a mut i64),
    /// Backs `%M`: a user hook that writes directly to the sink, its output counted like any
    /// other emitted text.
    Hook(&'a mut dyn FnMut(&mut dyn Sink) -> io::Result<()>),
}

#[derive(Default, Clone, Copy)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
}

struct ConvSpec {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conv: u8,
}

struct FmtCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> FmtCursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn take_digits(&mut self) -> Option<usize> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos]).ok()?.parse().ok()
    }
}

fn parse_conv_spec(cur: &mut FmtCursor) -> RjResult<ConvSpec> {
    let mut flags = Flags::default();
    loop {
        match cur.peek() {
            Some(b'-') => {
                flags.left = true;
                cur.bump();
            }
            Some(b'0') => {
                flags.zero = true;
                cur.bump();
            }
            Some(b'+') => {
                flags.plus = true;
                cur.bump();
            }
            Some(b' ') => {
                flags.space = true;
                cur.bump();
            }
            Some(b'#') => {
                cur.bump();
            }
            _ => break,
        }
    }
    let width = cur.take_digits();
    let precision = if cur.peek() == Some(b'.') {
        cur.bump();
        Some(cur.take_digits().unwrap_or(0))
    } else {
        None
    };
    // Length modifiers (h, hh, l, ll, L, z, j, t) don't affect a typed Arg; consume and discard.
    while matches!(cur.peek(), Some(b'h' | b'l' | b'L' | b'z' | b'j' | b't')) {
        cur.bump();
    }
    let conv = cur
        .bump()
        .ok_or_else(|| RjError::Format("format string ends mid-conversion".into()))?;
    Ok(ConvSpec { flags, width, precision, conv })
}

fn pad(body: String, spec: &ConvSpec) -> String {
    let width = spec.width.unwrap_or(0);
    if body.len() >= width {
        return body;
    }
    let fill_count = width - body.len();
    if spec.flags.left {
        let mut s = body;
        s.extend(std::iter::repeat(' ').take(fill_count));
        s
    } else if spec.flags.zero && spec.precision.is_none() {
        let (sign, rest) = match body.strip_prefix('-') {
            Some(r) => ("-", r),
            None => ("", body.as_str()),
        };
        format!("{sign}{}{rest}", "0".repeat(fill_count))
    } else {
        format!("{}{body}", " ".repeat(fill_count))
    }
}

fn sign_prefix(flags: Flags, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    }
}

fn render_int(spec: &ConvSpec, v: i64) -> String {
    let negative = v < 0;
    let mag = v.unsigned_abs();
    let mut digits = mag.to_string();
    if let Some(p) = spec.precision {
        while digits.len() < p {
            digits.insert(0, '0');
        }
    }
    format!("{}{digits}", sign_prefix(spec.flags, negative))
}

fn render_uint(spec: &ConvSpec, v: u64, radix: u32, upper: bool) -> String {
    let mut digits = match radix {
        8 => format!("{v:o}"),
        16 if upper => format!("{v:X}"),
        16 => format!("{v:x}"),
        _ => v.to_string(),
    };
    if let Some(p) = spec.precision {
        while digits.len() < p {
            digits.insert(0, '0');
        }
    }
    digits
}

/// C-style scientific notation: a signed, zero-padded two-digit-minimum exponent (`3.140000e+02`,
/// not Rust's default `3.14e2`).
fn render_exp(mag: f64, prec: usize, upper: bool) -> String {
    let formatted = format!("{mag:.prec$e}");
    let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{}{:02}", if exp < 0 { '-' } else { '+' }, exp.abs())
}

/// Precision-aware `%g`/`%G`: render with `prec` significant digits, choosing `%e`/`%f` style per
/// C's rule (use `%e` when the decimal exponent is `< -4` or `>= prec`), then strip trailing zeros
/// (and a trailing decimal point) since `#` (alternate form) isn't honored here.
fn render_g(mag: f64, prec: usize, upper: bool) -> String {
    let prec = prec.max(1);
    let exp = if mag == 0.0 { 0 } else { mag.abs().log10().floor() as i32 };
    if exp < -4 || exp >= prec as i32 {
        let s = render_exp(mag, prec - 1, upper);
        let (mantissa, rest) = s.split_once(['e', 'E']).unwrap_or((s.as_str(), ""));
        let mantissa = strip_trailing_zeros(mantissa);
        let e = if upper { 'E' } else { 'e' };
        format!("{mantissa}{e}{rest}")
    } else {
        let decimals = (prec as i32 - 1 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{mag:.decimals$}"))
    }
}

fn strip_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0');
    trimmed.trim_end_matches('.').to_string()
}

fn render_float(spec: &ConvSpec, v: f64, conv: u8) -> String {
    let prec = spec.precision.unwrap_or(6);
    let negative = v.is_sign_negative();
    let mag = v.abs();
    let body = match conv {
        b'f' | b'F' => format!("{mag:.prec$}"),
        b'e' => render_exp(mag, prec, false),
        b'E' => render_exp(mag, prec, true),
        b'g' => render_g(mag, prec, false),
        b'G' => render_g(mag, prec, true),
        _ => unreachable!(),
    };
    format!("{}{body}", sign_prefix(spec.flags, negative))
}

fn json_escape_into(s: &str, out: &mut Vec<u8>) {
    out.push(b'"');
    for c in s.chars() {
        match c {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            c if (c as u32) < 0x20 => out.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes()),
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
}

/// Render a single format string against `args`, writing output to `sink`. Returns the number of
/// bytes written.
pub fn printf(sink: &mut dyn Sink, fmt: &str, mut args: &mut [Arg<'_>]) -> RjResult<usize> {
    let mut counting = CountingSink::new(sink);
    let mut cur = FmtCursor { bytes: fmt.as_bytes(), pos: 0 };
    let mut arg_idx = 0usize;
    let mut brace_depth: i32 = 0;
    let mut literal_start = cur.pos;

    macro_rules! flush_literal {
        ($end:expr) => {
            emit_literal_with_autoquote(&mut counting, &fmt.as_bytes()[literal_start..$end], &mut brace_depth)?;
        };
    }

    loop {
        match cur.peek() {
            None => {
                flush_literal!(cur.pos);
                break;
            }
            Some(b'%') => {
                flush_literal!(cur.pos);
                cur.bump();
                if cur.peek() == Some(b'%') {
                    cur.bump();
                    counting.write_byte(b'%').map_err(RjError::Io)?;
                    literal_start = cur.pos;
                    continue;
                }
                let spec = parse_conv_spec(&mut cur)?;
                let arg = args
                    .get_mut(arg_idx)
                    .ok_or_else(|| RjError::Format(format!("missing argument #{arg_idx} for conversion '{}'", spec.conv as char)))?;
                arg_idx += 1;
                render_conversion(&mut counting, &spec, arg)?;
                literal_start = cur.pos;
            }
            Some(_) => {
                cur.bump();
            }
        }
    }
    let _ = &mut args;
    Ok(counting.count)
}

fn emit_literal_with_autoquote(sink: &mut dyn Sink, text: &[u8], brace_depth: &mut i32) -> RjResult<()> {
    // Mirrors `auto_quote_bare_keys`: scan literal format text outside of string literals and
    // quote any bare `{ key :` that appears inside an object-format region.
    let mut i = 0;
    while i < text.len() {
        let b = text[i];
        match b {
            b'{' => {
                *brace_depth += 1;
                sink.write_byte(b).map_err(RjError::Io)?;
                i += 1;
            }
            b'}' => {
                *brace_depth -= 1;
                sink.write_byte(b).map_err(RjError::Io)?;
                i += 1;
            }
            b'"' => {
                let start = i;
                i += 1;
                while i < text.len() && text[i] != b'"' {
                    if text[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i = (i + 1).min(text.len());
                sink.write_bytes(&text[start..i]).map_err(RjError::Io)?;
            }
            b if *brace_depth > 0 && (b.is_ascii_alphabetic() || b == b'_' || b == b'$') && is_key_position(text, i) => {
                let start = i;
                while i < text.len() && (text[i].is_ascii_alphanumeric() || text[i] == b'_' || text[i] == b'$') {
                    i += 1;
                }
                sink.write_byte(b'"').map_err(RjError::Io)?;
                sink.write_bytes(&text[start..i]).map_err(RjError::Io)?;
                sink.write_byte(b'"').map_err(RjError::Io)?;
            }
            _ => {
                sink.write_byte(b).map_err(RjError::Io)?;
                i += 1;
            }
        }
    }
    Ok(())
}

/// A bare identifier is a key (not a value) when it's preceded, skipping whitespace, by `{` or
/// `,`. This keeps `{a:true}`'s `a` quoted while leaving the literal `true` alone.
fn is_key_position(text: &[u8], at: usize) -> bool {
    let mut j = at;
    while j > 0 && matches!(text[j - 1], b' ' | b'\t' | b'\n' | b'\r') {
        j -= 1;
    }
    j > 0 && matches!(text[j - 1], b'{' | b',')
}

fn render_conversion(sink: &mut CountingSink, spec: &ConvSpec, arg: &mut Arg<'_>) -> RjResult<()> {
    match (spec.conv, arg) {
        (b'd' | b'i', Arg::I64(v)) => write_padded(sink, pad(render_int(spec, *v), spec)),
        (b'u', Arg::I64(v)) => write_padded(sink, pad(render_uint(spec, *v as u64, 10, false), spec)),
        (b'u', Arg::U64(v)) => write_padded(sink, pad(render_uint(spec, *v, 10, false), spec)),
        (b'o', Arg::I64(v)) => write_padded(sink, pad(render_uint(spec, *v as u64, 8, false), spec)),
        (b'x', Arg::I64(v)) => write_padded(sink, pad(render_uint(spec, *v as u64, 16, false), spec)),
        (b'X', Arg::I64(v)) => write_padded(sink, pad(render_uint(spec, *v as u64, 16, true), spec)),
        (b'x', Arg::U64(v)) => write_padded(sink, pad(render_uint(spec, *v, 16, false), spec)),
        (b'X', Arg::U64(v)) => write_padded(sink, pad(render_uint(spec, *v, 16, true), spec)),
        (b'p', Arg::U64(v)) => write_padded(sink, format!("0x{v:x}")),
        (b'f' | b'F' | b'e' | b'E' | b'g' | b'G', Arg::F64(v)) => {
            write_padded(sink, pad(render_float(spec, *v, spec.conv), spec))
        }
        (b'c', Arg::Char(c)) => write_padded(sink, c.to_string()),
        (b's', Arg::Str(s)) => {
            let body = match spec.precision {
                Some(p) => utf8_prefix_str(s, p).to_string(),
                None => s.to_string(),
            };
            write_padded(sink, pad(body, spec))
        }
        (b'n', Arg::CountOut(slot)) => {
            **slot = sink.count as i64;
            Ok(())
        }
        (b'%', _) => sink.write_byte(b'%').map_err(RjError::Io),
        (b'Q', Arg::Str(s)) => {
            let s = match spec.precision {
                Some(p) => utf8_prefix_str(s, p),
                None => s,
            };
            let mut buf = Vec::new();
            json_escape_into(s, &mut buf);
            sink.write_bytes(&buf).map_err(RjError::Io)
        }
        (b'B', Arg::Bool(b)) => sink
            .write_bytes(if *b { b"true" } else { b"false" })
            .map_err(RjError::Io),
        (b'V', Arg::Bytes(b)) => {
            let mut buf = Vec::new();
            buf.push(b'"');
            base64_encode(b, &mut buf);
            buf.push(b'"');
            sink.write_bytes(&buf).map_err(RjError::Io)
        }
        (b'H', Arg::Bytes(b)) => {
            let mut buf = Vec::new();
            buf.push(b'"');
            hex_encode(b, &mut buf);
            buf.push(b'"');
            sink.write_bytes(&buf).map_err(RjError::Io)
        }
        (b'M', Arg::Hook(hook)) => hook(sink).map_err(RjError::Io),
        (c, _) => Err(RjError::Format(format!("argument type does not match conversion '{}'", c as char))),
    }
}

fn write_padded(sink: &mut CountingSink, s: String) -> RjResult<()> {
    sink.write_bytes(s.as_bytes()).map_err(RjError::Io)
}
