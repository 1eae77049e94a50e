//! Component C: the scanf-style extractor (§4.C).
//!
//! [`scanf`] takes a pattern that mirrors the dotted/bracketed paths the [`crate::walker`]
//! produces (e.g. `"{name:%s, age:%d}"`) and, in a single [`crate::walker::walk`] pass, fills in
//! each conversion target whose path matches. [`scanf_array_elem`] is the direct
//! index-into-an-array-path shortcut the pattern form doesn't cover well.

use crate::emit::codec::{base64_decode, hex_decode};
use crate::error::{RjError, RjResult};
use crate::options::WalkOptions;
use crate::token::{Token, TokenKind};
use crate::walker::{walk, Event, ParseStatus};

enum ConvKind {
    Bool,
    /// `d i` / `u` / `o` / `x X` — the `u32` is the radix the digit text is parsed in.
    Int(u32),
    /// `f`, `g`, and the two-letter length-modified forms `lf`/`Lf`.
    F64,
    /// `%s`: raw copy, no unescape.
    RawStr,
    /// `%Q`: unescaped copy; a JSON `null` matches nothing (§4.C).
    QuotedStr,
    /// `%r`: raw literal span captured verbatim regardless of token kind.
    Raw,
    Base64,
    Hex,
    /// `%T`: copy the matched [`Token`] itself rather than decoding it.
    TokenCapture,
    /// `%M`: hand the matched span and its kind to a user hook.
    Hook,
}

/// Somewhere to deposit a matched value. Mirrors [`crate::emit::Arg`]'s role but for *reading*
/// rather than writing.
pub enum Out<'a> {
    Bool(&'a mut bool),
    I64(&'a mut i64),
    F64(&'a mut f64),
    /// Backs `%s`: the raw, un-unescaped string content.
    Str(&'a mut String),
    /// Backs `%Q`: the unescaped string content.
    QuotedStr(&'a mut String),
    /// Backs `%V`/`%H`: the decoded bytes.
    Bytes(&'a mut Vec<u8>),
    /// Backs `%T`: the matched value's own [`Token`].
    Token(&'a mut Token),
    /// Backs `%r`: captures the raw matched span verbatim (quotes/escapes untouched for strings,
    /// literal text for numbers) regardless of token kind — used when the caller wants to
    /// re-embed the value rather than decode it.
    Raw(&'a mut String),
    /// Backs `%M`: invoked with the matched span's raw bytes and token kind.
    Hook(&'a mut dyn FnMut(&[u8], TokenKind) -> RjResult<()>),
}

fn decode_into(out: &mut Out<'_>, conv: &ConvKind, token: Token, buf: &[u8]) -> RjResult<()> {
    let text = token.span_str(buf);
    let raw = token.span(buf);
    match (conv, out) {
        (ConvKind::Bool, Out::Bool(slot)) => {
            **slot = match token.kind {
                TokenKind::True => true,
                TokenKind::False => false,
                _ => return Err(RjError::Format("expected a boolean".into())),
            };
        }
        (ConvKind::Int(radix), Out::I64(slot)) => {
            if token.kind != TokenKind::Number {
                return Err(RjError::Format("expected a number".into()));
            }
            let (negative, digits) = match text.strip_prefix('-') {
                Some(d) => (true, d),
                None => (false, text),
            };
            let magnitude = i64::from_str_radix(digits, *radix)
                .map_err(|_| RjError::Format(format!("'{text}' is not a base-{radix} integer")))?;
            **slot = if negative { -magnitude } else { magnitude };
        }
        (ConvKind::F64, Out::F64(slot)) => {
            if token.kind != TokenKind::Number {
                return Err(RjError::Format("expected a number".into()));
            }
            **slot = text.parse().map_err(|_| RjError::Format(format!("'{text}' is not a number")))?;
        }
        (ConvKind::RawStr, Out::Str(slot)) => {
            if token.kind != TokenKind::String {
                return Err(RjError::Format("expected a string".into()));
            }
            slot.clear();
            slot.push_str(text);
        }
        (ConvKind::QuotedStr, Out::QuotedStr(slot)) => match token.kind {
            TokenKind::String => {
                slot.clear();
                slot.push_str(&crate::pretty::unescape_json_string(text));
            }
            TokenKind::Null => return Err(RjError::Format("null value matches nothing for '%Q'".into())),
            _ => return Err(RjError::Format("expected a string or null".into())),
        },
        (ConvKind::Raw, Out::Raw(slot)) => {
            slot.clear();
            slot.push_str(text);
        }
        (ConvKind::Base64, Out::Bytes(slot)) => {
            if token.kind != TokenKind::String {
                return Err(RjError::Format("expected a string".into()));
            }
            **slot = base64_decode(raw).ok_or_else(|| RjError::Format("invalid base64".into()))?;
        }
        (ConvKind::Hex, Out::Bytes(slot)) => {
            if token.kind != TokenKind::String {
                return Err(RjError::Format("expected a string".into()));
            }
            **slot = hex_decode(raw).ok_or_else(|| RjError::Format("invalid hex".into()))?;
        }
        (ConvKind::TokenCapture, Out::Token(slot)) => {
            **slot = token;
        }
        (ConvKind::Hook, Out::Hook(hook)) => hook(raw, token.kind)?,
        _ => return Err(RjError::Format("scanf output slot does not match pattern conversion".into())),
    }
    Ok(())
}

/// Parses a scanf pattern into `(path, ConvKind)` pairs without caring what the surrounding
/// punctuation is — only `%x`-style conversions and `name:`-shaped path segments matter.
struct PatternParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

struct ParsedBinding {
    path: String,
    conv: ConvKind,
}

impl<'a> PatternParser<'a> {
    fn new(pattern: &'a str) -> Self {
        Self { bytes: pattern.as_bytes(), pos: 0 }
    }

    fn parse_conv(&mut self) -> RjResult<ConvKind> {
        // `lf`/`Lf` are length-modifier + conversion pairs; every other conversion here is a
        // single byte.
        if matches!(self.bytes.get(self.pos), Some(b'l' | b'L')) && self.bytes.get(self.pos + 1) == Some(&b'f') {
            self.pos += 2;
            return Ok(ConvKind::F64);
        }
        let conv = match self.bytes.get(self.pos) {
            Some(b'B') => ConvKind::Bool,
            Some(b'd' | b'i' | b'u') => ConvKind::Int(10),
            Some(b'o') => ConvKind::Int(8),
            Some(b'x' | b'X') => ConvKind::Int(16),
            Some(b'f' | b'g') => ConvKind::F64,
            Some(b's') => ConvKind::RawStr,
            Some(b'Q') => ConvKind::QuotedStr,
            Some(b'r') => ConvKind::Raw,
            Some(b'V') => ConvKind::Base64,
            Some(b'H') => ConvKind::Hex,
            Some(b'T') => ConvKind::TokenCapture,
            Some(b'M') => ConvKind::Hook,
            Some(c) => return Err(RjError::Format(format!("unknown scanf conversion '%{}'", *c as char))),
            None => return Err(RjError::Format("scanf pattern ends mid-conversion".into())),
        };
        self.pos += 1;
        Ok(conv)
    }

    fn parse(mut self) -> RjResult<Vec<ParsedBinding>> {
        let mut out = Vec::new();
        let mut path_stack: Vec<String> = vec![String::new()];
        let mut array_index_stack: Vec<Option<usize>> = vec![None];
        let mut pending_key: Option<String> = None;

        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'{' => {
                    self.pos += 1;
                    path_stack.push(current_path(&path_stack, &pending_key));
                    pending_key = None;
                    array_index_stack.push(None);
                }
                b'}' => {
                    self.pos += 1;
                    path_stack.pop();
                    array_index_stack.pop();
                    pending_key = None;
                }
                b'[' => {
                    self.pos += 1;
                    let base = current_path(&path_stack, &pending_key);
                    path_stack.push(base);
                    array_index_stack.push(Some(0));
                    pending_key = None;
                }
                b']' => {
                    self.pos += 1;
                    path_stack.pop();
                    array_index_stack.pop();
                    pending_key = None;
                }
                b',' => {
                    self.pos += 1;
                    if let Some(idx) = array_index_stack.last_mut().and_then(|o| o.as_mut()) {
                        *idx += 1;
                    }
                    pending_key = None;
                }
                b':' => {
                    self.pos += 1;
                }
                b'%' => {
                    self.pos += 1;
                    let conv = self.parse_conv()?;
                    let base = path_stack.last().cloned().unwrap_or_default();
                    let path = if let Some(idx) = array_index_stack.last().copied().flatten() {
                        format!("{base}[{idx}]")
                    } else {
                        append_key(&base, pending_key.as_deref())
                    };
                    out.push(ParsedBinding { path, conv });
                    pending_key = None;
                }
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.pos += 1;
                }
                _ => {
                    let start = self.pos;
                    while self.pos < self.bytes.len()
                        && !matches!(self.bytes[self.pos], b'{' | b'}' | b'[' | b']' | b',' | b':' | b'%' | b' ' | b'\t' | b'\n' | b'\r')
                    {
                        self.pos += 1;
                    }
                    pending_key = Some(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned());
                }
            }
        }
        Ok(out)
    }
}

fn current_path(stack: &[String], pending_key: &Option<String>) -> String {
    let base = stack.last().cloned().unwrap_or_default();
    append_key(&base, pending_key.as_deref())
}

fn append_key(base: &str, key: Option<&str>) -> String {
    match key {
        None => base.to_string(),
        Some(k) if base.is_empty() => format!(".{k}"),
        Some(k) => format!("{base}.{k}"),
    }
}

/// Parse `buf` and fill every `outs` entry whose pattern path is present, returning the number of
/// bindings matched. Unmatched bindings are left untouched (§4.C "partial match"), and so are
/// bindings whose token doesn't decode into the requested sink (§7 "conversion failure": the spec
/// is skipped, not the whole call).
pub fn scanf(buf: &[u8], pattern: &str, outs: &mut [Out<'_>]) -> RjResult<usize> {
    let parsed = PatternParser::new(pattern).parse()?;
    if parsed.len() != outs.len() {
        return Err(RjError::Format(format!(
            "pattern has {} conversions but {} output slots were given",
            parsed.len(),
            outs.len()
        )));
    }

    struct Hit {
        idx: usize,
        token: Token,
    }
    let mut hits: Vec<Hit> = Vec::new();
    {
        let mut on_event = |ev: Event<'_>| {
            if let Event::Scalar { path, token, .. } = ev {
                for (idx, b) in parsed.iter().enumerate() {
                    if b.path == path {
                        hits.push(Hit { idx, token });
                    }
                }
            }
        };
        let status = walk(buf, &mut on_event, &WalkOptions::default());
        if let ParseStatus::Invalid { pos } = status {
            return Err(RjError::Invalid { pos });
        }
    }

    let mut matched = 0;
    for hit in &hits {
        if decode_into(&mut outs[hit.idx], &parsed[hit.idx].conv, hit.token, buf).is_ok() {
            matched += 1;
        }
    }
    Ok(matched)
}

/// Result of [`scanf_array_elem`]: the element's decoded kind and its raw literal span in `buf`.
pub struct ArrayElemResult {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
}

impl ArrayElemResult {
    pub fn text<'b>(&self, buf: &'b [u8]) -> &'b str {
        std::str::from_utf8(&buf[self.start..self.start + self.len]).unwrap_or("")
    }
}

/// Look up `array_path[index]` directly, without a pattern string. Returns `None` if the path
/// doesn't resolve to an array or the index is out of bounds (replaces the C API's overloaded
/// signed-int "-1 means not found" return).
pub fn scanf_array_elem(buf: &[u8], array_path: &str, index: usize) -> RjResult<Option<ArrayElemResult>> {
    let want_path = format!("{array_path}[{index}]");
    let mut found: Option<ArrayElemResult> = None;
    {
        let mut on_event = |ev: Event<'_>| {
            if found.is_some() {
                return;
            }
            match ev {
                Event::Scalar { path, token, .. } if path == want_path => {
                    found = Some(ArrayElemResult { kind: token.kind, start: token.ptr, len: token.len });
                }
                Event::End { path, token, .. } if path == want_path => {
                    found = Some(ArrayElemResult { kind: token.kind, start: token.ptr, len: token.len });
                }
                _ => {}
            }
        };
        let status = walk(buf, &mut on_event, &WalkOptions::default());
        if let ParseStatus::Invalid { pos } = status {
            return Err(RjError::Invalid { pos });
        }
    }
    Ok(found)
}
