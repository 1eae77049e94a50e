//! Canonical re-emission: prettified, 2-space-indented, quoted-key JSON driven entirely off the
//! [`crate::walker`] event stream (§4.E). Scalar literal spans (numbers, string escape sequences)
//! are copied through byte-for-byte rather than re-encoded, matching the "value text is a literal
//! span, not an arithmetic quantity" rule the walker itself follows (§3, §9 Non-goals).

use crate::error::{RjError, RjResult};
use crate::options::{PrettyOptions, WalkOptions};
use crate::token::TokenKind;
use crate::walker::{walk, Event, ParseStatus};

/// Decode JSON string-escape sequences in `content` (the text *between* the quotes, as a walker
/// [`crate::token::Token`] would report it) into an owned Rust string.
pub(crate) fn unescape_json_string(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = (&mut chars).take(4).collect();
                if let Ok(cp) = u32::from_str_radix(&hex, 16) {
                    if let Some(ch) = char::from_u32(cp) {
                        out.push(ch);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Render `buf` (which must hold exactly one JSON value, surrounding whitespace aside) into
/// canonical pretty-printed form.
pub fn prettify(buf: &[u8], opts: &PrettyOptions) -> RjResult<String> {
    let mut p = PrettifierImpl {
        buf,
        out: String::new(),
        opts: *opts,
        depth: 0,
        need_comma: Vec::new(),
        container_is_object: Vec::new(),
    };
    let mut on_event = |ev: Event<'_>| p.handle(ev);
    let status = walk(buf, &mut on_event, &WalkOptions::default());
    match status {
        ParseStatus::Complete(_) => Ok(p.out),
        ParseStatus::Incomplete => Err(RjError::Incomplete),
        ParseStatus::Invalid { pos } => Err(RjError::Invalid { pos }),
    }
}

/// State machine driven by the walker's events; `container_is_object` tracks, per nesting level,
/// whether `"key": ` prefixes are needed (object) or only commas/indentation (array).
struct PrettifierImpl<'a> {
    buf: &'a [u8],
    out: String,
    opts: PrettyOptions,
    depth: usize,
    need_comma: Vec<bool>,
    container_is_object: Vec<bool>,
}

impl<'a> PrettifierImpl<'a> {
    fn write_value_prefix(&mut self, name: Option<&str>) {
        if let Some(flag) = self.need_comma.last_mut() {
            if *flag {
                self.out.push(',');
            }
            *flag = true;
        }
        if self.depth > 0 {
            self.out.push('\n');
            for _ in 0..self.depth * self.opts.indent_width {
                self.out.push(' ');
            }
        }
        if *self.container_is_object.last().unwrap_or(&false) {
            if let Some(name) = name {
                self.out.push('"');
                self.write_escaped_key(name);
                self.out.push_str("\": ");
            }
        }
    }

    fn write_escaped_key(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                c => self.out.push(c),
            }
        }
    }

    fn write_string_literal(&mut self, content: &str) {
        self.out.push('"');
        if self.opts.ensure_ascii {
            let decoded = unescape_json_string(content);
            self.write_escaped_key_full(&decoded);
        } else {
            self.out.push_str(content);
        }
        self.out.push('"');
    }

    fn write_escaped_key_full(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (c as u32) < 0x20 => self.out.push_str(&format!("\\u{:04x}", c as u32)),
                c if (c as u32) > 0x7f => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        self.out.push_str(&format!("\\u{unit:04x}"));
                    }
                }
                c => self.out.push(c),
            }
        }
    }

    fn handle(&mut self, ev: Event<'_>) {
        match ev {
            Event::Scalar { name, token, .. } => {
                self.write_value_prefix(name);
                match token.kind {
                    TokenKind::String => self.write_string_literal(token.span_str(self.buf)),
                    _ => self.out.push_str(token.span_str(self.buf)),
                }
            }
            Event::Begin { name, kind, .. } => {
                self.write_value_prefix(name);
                self.out.push(if kind == TokenKind::ObjectBegin { '{' } else { '[' });
                self.depth += 1;
                self.need_comma.push(false);
                self.container_is_object.push(kind == TokenKind::ObjectBegin);
            }
            Event::End { token, .. } => {
                let was_empty = !self.need_comma.pop().unwrap_or(false);
                self.container_is_object.pop();
                self.depth -= 1;
                if !was_empty {
                    self.out.push('\n');
                    for _ in 0..self.depth * self.opts.indent_width {
                        self.out.push(' ');
                    }
                }
                self.out.push(if token.kind == TokenKind::ObjectEnd { '}' } else { ']' });
            }
        }
    }
}
