//! Optional `serde` convenience (§6 "Optional serde convenience", gated behind the `serde`
//! feature like the teacher's own `serde`-gated module). This crate's core stays
//! walker/span-based; this module is a bridge for callers who'd rather work with an owned
//! `serde_json::Value` tree than drive the event stream themselves.

#![cfg(feature = "serde")]

use serde_json::Value;

use crate::error::{RjError, RjResult};
use crate::options::WalkOptions;
use crate::pretty::unescape_json_string;
use crate::token::TokenKind;
use crate::walker::{walk, Event, ParseStatus};

/// Parse `buf` into an owned [`serde_json::Value`] tree, relaxed-grammar bare keys included.
///
/// This walks `buf` once with the walker and rebuilds a tree from the event stream rather than
/// delegating to `serde_json::from_slice`, since `serde_json` alone doesn't accept this crate's
/// relaxed bare-key grammar (§1).
pub fn materialize(buf: &[u8]) -> RjResult<Value> {
    struct Frame {
        name: Option<String>,
        is_object: bool,
        object: serde_json::Map<String, Value>,
        array: Vec<Value>,
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    fn place(stack: &mut [Frame], root: &mut Option<Value>, name: Option<String>, value: Value) {
        match stack.last_mut() {
            Some(frame) if frame.is_object => {
                frame.object.insert(name.unwrap_or_default(), value);
            }
            Some(frame) => frame.array.push(value),
            None => *root = Some(value),
        }
    }

    {
        let mut on_event = |ev: Event<'_>| match ev {
            Event::Scalar { name, token, .. } => {
                let text = token.span_str(buf);
                let value = match token.kind {
                    TokenKind::Null => Value::Null,
                    TokenKind::True => Value::Bool(true),
                    TokenKind::False => Value::Bool(false),
                    TokenKind::Number => serde_json::from_str(text).unwrap_or(Value::Null),
                    TokenKind::String => Value::String(unescape_json_string(text)),
                    _ => Value::Null,
                };
                place(&mut stack, &mut root, name.map(str::to_string), value);
            }
            Event::Begin { name, kind, .. } => {
                stack.push(Frame {
                    name: name.map(str::to_string),
                    is_object: kind == TokenKind::ObjectBegin,
                    object: serde_json::Map::new(),
                    array: Vec::new(),
                });
            }
            Event::End { .. } => {
                let frame = stack.pop().expect("walker balances Begin/End");
                let value = if frame.is_object {
                    Value::Object(frame.object)
                } else {
                    Value::Array(frame.array)
                };
                place(&mut stack, &mut root, frame.name, value);
            }
        };
        let status = walk(buf, &mut on_event, &WalkOptions::default());
        match status {
            ParseStatus::Complete(_) => {}
            ParseStatus::Incomplete => return Err(RjError::Incomplete),
            ParseStatus::Invalid { pos } => return Err(RjError::Invalid { pos }),
        }
    }

    root.ok_or_else(|| RjError::Format("empty document".into()))
}

/// Serialize `value` back to a JSON string using `serde_json`'s own encoder (this direction
/// doesn't need the walker — there's no relaxed-grammar concern when producing strict output).
pub fn emit_value(value: &Value) -> RjResult<String> {
    Ok(serde_json::to_string(value)?)
}
