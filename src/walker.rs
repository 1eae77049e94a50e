//! Component A: the recursive-descent tokenizer (§4.A).
//!
//! `walk` parses a single JSON value (optionally surrounded by whitespace) and reports a stream
//! of typed [`Event`]s to a caller-supplied [`WalkSink`], tracking a dotted/bracketed path as it
//! descends. Extractor (§4.C) and Mutator (§4.D) are both just specialized `WalkSink`
//! implementations driving this same function — this module does not know they exist.

use crate::options::WalkOptions;
use crate::pathbuf::PathBuf;
use crate::token::{utf8_prefix, write_usize, Token, TokenKind};

/// One reported step of the walk.
///
/// Scalars are reported with a single `Scalar` event. Aggregates (objects/arrays) are reported
/// twice: `Begin` when the opening delimiter is seen (empty span) and `End` once the matching
/// closing delimiter has been consumed (span covers the whole aggregate) — Extractor and Mutator
/// both depend on `End` for span boundaries (§9).
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    Scalar {
        name: Option<&'a str>,
        path: &'a str,
        token: Token,
    },
    Begin {
        name: Option<&'a str>,
        path: &'a str,
        kind: TokenKind,
    },
    End {
        name: Option<&'a str>,
        path: &'a str,
        token: Token,
    },
}

impl<'a> Event<'a> {
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Event::Scalar { name, .. } | Event::Begin { name, .. } | Event::End { name, .. } => name,
        }
    }

    pub fn path(&self) -> &'a str {
        match *self {
            Event::Scalar { path, .. } | Event::Begin { path, .. } | Event::End { path, .. } => path,
        }
    }
}

/// Receives the event stream produced by [`walk`].
pub trait WalkSink {
    fn event(&mut self, ev: Event<'_>);
}

impl<F: FnMut(Event<'_>)> WalkSink for F {
    fn event(&mut self, ev: Event<'_>) {
        self(ev)
    }
}

/// Result of a top-level parse (§3 "Parse status").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// The root value ended after this many bytes.
    Complete(usize),
    /// `buf` is a strict prefix of a valid document.
    Incomplete,
    /// `buf` cannot be completed into a valid document; `pos` is the offset of the first
    /// syntactic violation.
    Invalid { pos: usize },
}

impl ParseStatus {
    pub fn is_complete(self) -> bool {
        matches!(self, ParseStatus::Complete(_))
    }
}

/// Internal error used while descending; turned into a [`ParseStatus`] at the root.
#[derive(Debug, Clone, Copy)]
enum WErr {
    Invalid(usize),
    Incomplete,
}

type WResult<T> = Result<T, WErr>;

struct Cur<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cur<'a> {
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }
}

fn skip_ws(cur: &mut Cur) {
    while matches!(cur.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
        cur.bump();
    }
}

pub(crate) fn is_bare_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Parse the `(count, hit_end)` of a run of ASCII digits; `hit_end` is true when the run stopped
/// only because the buffer ran out, which is the ambiguous "more digits might follow" case that
/// must be reported as `INCOMPLETE` rather than treated as a definite terminator (§4.A).
fn take_digits(cur: &mut Cur) -> (usize, bool) {
    let mut n = 0usize;
    loop {
        match cur.peek() {
            Some(b) if b.is_ascii_digit() => {
                cur.bump();
                n += 1;
            }
            Some(_) => return (n, false),
            None => return (n, true),
        }
    }
}

fn parse_number(cur: &mut Cur) -> WResult<Token> {
    let start = cur.pos;
    if cur.peek() == Some(b'-') {
        cur.bump();
    }
    match cur.peek() {
        None => return Err(WErr::Incomplete),
        Some(b'0') => {
            cur.bump();
            if matches!(cur.peek(), Some(b) if b.is_ascii_digit()) {
                return Err(WErr::Invalid(cur.pos));
            }
        }
        Some(b) if b.is_ascii_digit() => {
            cur.bump();
            let (_, hit_end) = take_digits(cur);
            if hit_end {
                return Err(WErr::Incomplete);
            }
        }
        Some(_) => return Err(WErr::Invalid(cur.pos)),
    }
    if cur.peek() == Some(b'.') {
        cur.bump();
        match cur.peek() {
            None => return Err(WErr::Incomplete),
            Some(b) if b.is_ascii_digit() => {
                let (_, hit_end) = take_digits(cur);
                if hit_end {
                    return Err(WErr::Incomplete);
                }
            }
            Some(_) => return Err(WErr::Invalid(cur.pos)),
        }
    }
    if matches!(cur.peek(), Some(b'e') | Some(b'E')) {
        cur.bump();
        if matches!(cur.peek(), Some(b'+') | Some(b'-')) {
            cur.bump();
        }
        match cur.peek() {
            None => return Err(WErr::Incomplete),
            Some(b) if b.is_ascii_digit() => {
                let (_, hit_end) = take_digits(cur);
                if hit_end {
                    return Err(WErr::Incomplete);
                }
            }
            Some(_) => return Err(WErr::Invalid(cur.pos)),
        }
    }
    Ok(Token::new(TokenKind::Number, start, cur.pos - start))
}

fn parse_literal(cur: &mut Cur, lit: &'static [u8], kind: TokenKind) -> WResult<Token> {
    let start = cur.pos;
    for &want in lit {
        match cur.peek() {
            None => return Err(WErr::Incomplete),
            Some(b) if b == want => cur.bump(),
            Some(_) => return Err(WErr::Invalid(cur.pos)),
        }
    }
    Ok(Token::new(kind, start, lit.len()))
}

fn parse_string(cur: &mut Cur) -> WResult<Token> {
    cur.bump(); // opening quote
    let content_start = cur.pos;
    loop {
        match cur.peek() {
            None => return Err(WErr::Incomplete),
            Some(b'"') => {
                let content_end = cur.pos;
                cur.bump();
                return Ok(Token::new(TokenKind::String, content_start, content_end - content_start));
            }
            Some(b'\\') => {
                cur.bump();
                match cur.peek() {
                    None => return Err(WErr::Incomplete),
                    Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => cur.bump(),
                    Some(b'u') => {
                        cur.bump();
                        for _ in 0..4 {
                            match cur.peek() {
                                None => return Err(WErr::Incomplete),
                                Some(h) if h.is_ascii_hexdigit() => cur.bump(),
                                Some(_) => return Err(WErr::Invalid(cur.pos)),
                            }
                        }
                    }
                    Some(_) => return Err(WErr::Invalid(cur.pos)),
                }
            }
            Some(b'\r' | b'\n' | b'\t') => cur.bump(),
            Some(b) if b < 0x20 => return Err(WErr::Invalid(cur.pos)),
            Some(_) => cur.bump(),
        }
    }
}

fn parse_bare_key(cur: &mut Cur) -> WResult<Token> {
    let start = cur.pos;
    let mut hit_end = false;
    loop {
        match cur.peek() {
            Some(b) if is_bare_key_byte(b) => cur.bump(),
            Some(_) => break,
            None => {
                hit_end = true;
                break;
            }
        }
    }
    if cur.pos == start {
        return Err(if hit_end { WErr::Incomplete } else { WErr::Invalid(cur.pos) });
    }
    if hit_end {
        return Err(WErr::Incomplete);
    }
    Ok(Token::new(TokenKind::String, start, cur.pos - start))
}

fn parse_key(cur: &mut Cur) -> WResult<Token> {
    match cur.peek() {
        None => Err(WErr::Incomplete),
        Some(b'"') => parse_string(cur),
        Some(_) => parse_bare_key(cur),
    }
}

fn parse_value(
    cur: &mut Cur,
    sink: &mut dyn WalkSink,
    path: &mut PathBuf,
    name: Option<&str>,
    depth: usize,
    opts: &WalkOptions,
) -> WResult<Token> {
    match cur.peek() {
        None => Err(WErr::Incomplete),
        Some(b'{') => parse_object(cur, sink, path, name, depth, opts),
        Some(b'[') => parse_array(cur, sink, path, name, depth, opts),
        Some(b'"') => {
            let tok = parse_string(cur)?;
            sink.event(Event::Scalar { name, path: path.as_str(), token: tok });
            Ok(tok)
        }
        Some(b't') => {
            let tok = parse_literal(cur, b"true", TokenKind::True)?;
            sink.event(Event::Scalar { name, path: path.as_str(), token: tok });
            Ok(tok)
        }
        Some(b'f') => {
            let tok = parse_literal(cur, b"false", TokenKind::False)?;
            sink.event(Event::Scalar { name, path: path.as_str(), token: tok });
            Ok(tok)
        }
        Some(b'n') => {
            let tok = parse_literal(cur, b"null", TokenKind::Null)?;
            sink.event(Event::Scalar { name, path: path.as_str(), token: tok });
            Ok(tok)
        }
        Some(b'-') => {
            let tok = parse_number(cur)?;
            sink.event(Event::Scalar { name, path: path.as_str(), token: tok });
            Ok(tok)
        }
        Some(b) if b.is_ascii_digit() => {
            let tok = parse_number(cur)?;
            sink.event(Event::Scalar { name, path: path.as_str(), token: tok });
            Ok(tok)
        }
        Some(_) => Err(WErr::Invalid(cur.pos)),
    }
}

fn parse_object(
    cur: &mut Cur,
    sink: &mut dyn WalkSink,
    path: &mut PathBuf,
    name: Option<&str>,
    depth: usize,
    opts: &WalkOptions,
) -> WResult<Token> {
    if depth >= opts.max_depth {
        return Err(WErr::Invalid(cur.pos));
    }
    let start = cur.pos;
    cur.bump(); // '{'
    sink.event(Event::Begin { name, path: path.as_str(), kind: TokenKind::ObjectBegin });
    skip_ws(cur);
    match cur.peek() {
        None => return Err(WErr::Incomplete),
        Some(b'}') => cur.bump(),
        Some(_) => loop {
            let key_tok = parse_key(cur)?;
            let key_bytes = key_tok.span(cur.buf);
            let key_str = utf8_prefix(key_bytes);
            skip_ws(cur);
            match cur.peek() {
                None => return Err(WErr::Incomplete),
                Some(b':') => cur.bump(),
                Some(_) => return Err(WErr::Invalid(cur.pos)),
            }
            skip_ws(cur);
            let save_len = path.len();
            path.push_key(key_bytes);
            parse_value(cur, sink, path, Some(key_str), depth + 1, opts)?;
            path.truncate(save_len);
            skip_ws(cur);
            match cur.peek() {
                None => return Err(WErr::Incomplete),
                Some(b',') => {
                    cur.bump();
                    skip_ws(cur);
                }
                Some(b'}') => {
                    cur.bump();
                    break;
                }
                Some(_) => return Err(WErr::Invalid(cur.pos)),
            }
        },
    }
    let token = Token::new(TokenKind::ObjectEnd, start, cur.pos - start);
    sink.event(Event::End { name, path: path.as_str(), token });
    Ok(token)
}

fn parse_array(
    cur: &mut Cur,
    sink: &mut dyn WalkSink,
    path: &mut PathBuf,
    name: Option<&str>,
    depth: usize,
    opts: &WalkOptions,
) -> WResult<Token> {
    if depth >= opts.max_depth {
        return Err(WErr::Invalid(cur.pos));
    }
    let start = cur.pos;
    cur.bump(); // '['
    sink.event(Event::Begin { name, path: path.as_str(), kind: TokenKind::ArrayBegin });
    skip_ws(cur);
    match cur.peek() {
        None => return Err(WErr::Incomplete),
        Some(b']') => cur.bump(),
        Some(_) => {
            let mut idx = 0usize;
            loop {
                let mut digits = [0u8; 20];
                let idx_str = write_usize(&mut digits, idx);
                let save_len = path.len();
                path.push_index(idx);
                parse_value(cur, sink, path, Some(idx_str), depth + 1, opts)?;
                path.truncate(save_len);
                skip_ws(cur);
                match cur.peek() {
                    None => return Err(WErr::Incomplete),
                    Some(b',') => {
                        cur.bump();
                        skip_ws(cur);
                        idx += 1;
                    }
                    Some(b']') => {
                        cur.bump();
                        break;
                    }
                    Some(_) => return Err(WErr::Invalid(cur.pos)),
                }
            }
        }
    }
    let token = Token::new(TokenKind::ArrayEnd, start, cur.pos - start);
    sink.event(Event::End { name, path: path.as_str(), token });
    Ok(token)
}

/// Parse a single JSON value (the root), reporting events to `sink` (§4.A).
pub fn walk(buf: &[u8], sink: &mut dyn WalkSink, opts: &WalkOptions) -> ParseStatus {
    let mut cur = Cur { buf, pos: 0 };
    let mut path = PathBuf::new(opts.max_path_len);
    skip_ws(&mut cur);
    if cur.pos == buf.len() {
        return ParseStatus::Incomplete;
    }
    match parse_value(&mut cur, sink, &mut path, None, 0, opts) {
        Ok(_) => ParseStatus::Complete(cur.pos),
        Err(WErr::Incomplete) => ParseStatus::Incomplete,
        Err(WErr::Invalid(pos)) => ParseStatus::Invalid { pos },
    }
}

/// Convenience entry point using default [`WalkOptions`].
pub fn walk_default(buf: &[u8], sink: &mut dyn WalkSink) -> ParseStatus {
    walk(buf, sink, &WalkOptions::default())
}
