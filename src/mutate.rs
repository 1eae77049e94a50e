//! Component D: the splice-based mutator (§4.D).
//!
//! [`setf`] locates the span a path refers to (via a single [`crate::walker::walk`] pass) and
//! replaces, inserts, deletes, or appends bytes there, returning a brand-new buffer alongside
//! whether the path existed pre-mutation — the walker itself never mutates `buf` in place, since
//! the byte offsets it hands out would otherwise go stale mid-splice. [`next_key`]/[`next_elem`]
//! are read-only siblings for iterating an object's members or an array's elements one step at a
//! time.

use std::collections::HashMap;

use crate::emit::{printf_to_vec, Arg};
use crate::error::{RjError, RjResult};
use crate::options::WalkOptions;
use crate::token::TokenKind;
use crate::walker::{is_bare_key_byte, walk, Event, ParseStatus};

/// What [`setf`] should do at the located path.
pub enum SetOp<'a> {
    /// Replace the value's literal span with `bytes` verbatim (caller is responsible for valid
    /// JSON text, e.g. quoting a string value).
    Replace(&'a [u8]),
    /// Remove the member/element entirely, along with one adjacent comma so the container stays
    /// syntactically valid.
    Delete,
}

/// What's known about an aggregate (object/array) seen during a [`scan`] pass.
struct ContainerInfo {
    /// Byte offset of the closing delimiter itself (not past it), so a not-found insertion
    /// splices in right before it.
    close: usize,
    is_object: bool,
    had_members: bool,
}

struct Scan {
    /// Byte range of the target path's own literal span, if it exists (quotes included for
    /// strings; the walker's own span excludes them so `%Q`/prettify can re-quote, but a splice
    /// needs them).
    exact: Option<(usize, usize)>,
    containers: HashMap<String, ContainerInfo>,
}

fn scan(buf: &[u8], path: &str) -> RjResult<Scan> {
    let mut exact: Option<(usize, usize)> = None;
    let mut containers: HashMap<String, ContainerInfo> = HashMap::new();

    {
        let mut on_event = |ev: Event<'_>| {
            let p = ev.path();
            if p == path {
                match ev {
                    Event::Scalar { token, .. } if token.kind == TokenKind::String => {
                        exact = Some((token.ptr - 1, token.ptr + token.len + 1));
                    }
                    Event::Scalar { token, .. } => exact = Some((token.ptr, token.ptr + token.len)),
                    Event::End { token, .. } => exact = Some((token.ptr, token.ptr + token.len)),
                    Event::Begin { .. } => {}
                }
            }
            match ev {
                Event::Begin { kind, .. } => {
                    containers.entry(p.to_string()).or_insert(ContainerInfo {
                        close: 0,
                        is_object: kind == TokenKind::ObjectBegin,
                        had_members: false,
                    });
                }
                Event::End { token, .. } => {
                    // `token` spans the whole aggregate including its closing delimiter.
                    let close_pos = token.ptr + token.len - 1;
                    let entry = containers.entry(p.to_string()).or_insert(ContainerInfo {
                        close: close_pos,
                        is_object: false,
                        had_members: false,
                    });
                    entry.close = close_pos;
                }
                _ => {}
            }
            // Any direct child of a known container proves it's non-empty.
            if let Some(parent) = parent_of(p) {
                if let Some(info) = containers.get_mut(parent) {
                    info.had_members = true;
                }
            }
        };
        let status = walk(buf, &mut on_event, &WalkOptions::default());
        if let ParseStatus::Invalid { pos } = status {
            return Err(RjError::Invalid { pos });
        }
    }

    Ok(Scan { exact, containers })
}

fn parent_of(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    let bytes = path.as_bytes();
    let mut i = bytes.len();
    while i > 0 {
        i -= 1;
        if bytes[i] == b'.' {
            return Some(&path[..i]);
        }
        if bytes[i] == b'[' {
            return Some(&path[..i]);
        }
    }
    Some("")
}

fn last_component(path: &str) -> &str {
    let bytes = path.as_bytes();
    let mut i = bytes.len();
    while i > 0 {
        i -= 1;
        if bytes[i] == b'.' {
            return &path[i + 1..];
        }
        if bytes[i] == b'[' {
            return path[i..].trim_end_matches(']');
        }
    }
    path
}

/// Find the nearest ancestor of `path` that's a known container, plus the key names of every
/// missing level in between (innermost first), so a missing nested path like `.d.e.f` can be
/// synthesized as `"d":{"e":{"f": <value>}}}` hung off whichever existing ancestor was found.
fn nearest_existing_ancestor<'a>(path: &'a str, containers: &HashMap<String, ContainerInfo>) -> RjResult<(&'a str, Vec<&'a str>)> {
    let mut missing = Vec::new();
    let mut ancestor = parent_of(path).unwrap_or("");
    loop {
        if containers.contains_key(ancestor) {
            return Ok((ancestor, missing));
        }
        if ancestor.is_empty() {
            return Err(RjError::Format(format!("path '{path}' has no existing ancestor container")));
        }
        missing.push(last_component(ancestor));
        ancestor = parent_of(ancestor).unwrap_or("");
    }
}

/// Apply `op` at `path` in `buf`, returning the resulting document and whether `path` existed
/// pre-mutation (§4.D: `matched` is 1 iff the target path existed pre-mutation, else 0).
///
/// If `path` doesn't exist but some ancestor object does, `Replace` creates whichever
/// intermediate objects are missing in between and inserts the new member at the leaf (array
/// indices are not synthesized this way — only object keys are). `Delete` on a path that doesn't
/// exist is a no-op that returns `buf` unchanged with `matched = false`.
pub fn setf(buf: &[u8], path: &str, op: SetOp<'_>) -> RjResult<(Vec<u8>, bool)> {
    let scan = scan(buf, path)?;
    let mut out = Vec::with_capacity(buf.len() + 32);

    match (scan.exact, op) {
        (Some((start, end)), SetOp::Replace(bytes)) => {
            out.extend_from_slice(&buf[..start]);
            out.extend_from_slice(bytes);
            out.extend_from_slice(&buf[end..]);
            Ok((out, true))
        }
        (Some((start, end)), SetOp::Delete) => {
            let (parent_path, _) = (parent_of(path).unwrap_or(""), last_component(path));
            let container_is_object = scan.containers.get(parent_path).map(|c| c.is_object).unwrap_or(false);
            let (mut del_start, mut del_end) = (start, end);
            // Walk the member's own key/colon back into the deletion range for objects. Keys may
            // be quoted or bare, so the backward scan has to branch on which one it finds.
            if container_is_object {
                let mut i = del_start;
                while i > 0 && matches!(buf[i - 1], b' ' | b'\t' | b'\n' | b'\r') {
                    i -= 1;
                }
                if i > 0 && buf[i - 1] == b':' {
                    i -= 1;
                    while i > 0 && matches!(buf[i - 1], b' ' | b'\t' | b'\n' | b'\r') {
                        i -= 1;
                    }
                    if i > 0 && buf[i - 1] == b'"' {
                        i -= 1;
                        while i > 0 && buf[i - 1] != b'"' {
                            i -= 1;
                        }
                        if i > 0 {
                            i -= 1;
                        }
                    } else {
                        while i > 0 && is_bare_key_byte(buf[i - 1]) {
                            i -= 1;
                        }
                    }
                    del_start = i;
                }
            }
            // Consume one adjacent comma, preferring the trailing one.
            let mut j = del_end;
            while j < buf.len() && matches!(buf[j], b' ' | b'\t' | b'\n' | b'\r') {
                j += 1;
            }
            if j < buf.len() && buf[j] == b',' {
                del_end = j + 1;
            } else {
                let mut i = del_start;
                while i > 0 && matches!(buf[i - 1], b' ' | b'\t' | b'\n' | b'\r') {
                    i -= 1;
                }
                if i > 0 && buf[i - 1] == b',' {
                    del_start = i - 1;
                }
            }
            out.extend_from_slice(&buf[..del_start]);
            out.extend_from_slice(&buf[del_end..]);
            Ok((out, true))
        }
        (None, SetOp::Delete) => Ok((buf.to_vec(), false)),
        (None, SetOp::Replace(bytes)) => {
            let parent_path = parent_of(path).unwrap_or("");
            if let Some(parent) = scan.containers.get(parent_path) {
                // Immediate parent exists: insert a single new member/element directly.
                Ok((splice_new_member(buf, path, bytes, parent), false))
            } else {
                let (ancestor, missing) = nearest_existing_ancestor(path, &scan.containers)?;
                let container = scan.containers.get(ancestor).expect("ancestor found by nearest_existing_ancestor");
                if !container.is_object {
                    return Err(RjError::Format(format!("path '{path}' has no existing object ancestor to create into")));
                }
                let leaf_key = last_component(path);
                let value_text = std::str::from_utf8(bytes).unwrap_or_default();
                let mut pair = format!("\"{leaf_key}\":{value_text}");
                for key in &missing {
                    pair = format!("\"{key}\":{{{pair}}}");
                }
                out.extend_from_slice(&buf[..container.close]);
                if container.had_members {
                    out.push(b',');
                }
                out.extend_from_slice(pair.as_bytes());
                out.extend_from_slice(&buf[container.close..]);
                Ok((out, false))
            }
        }
    }
}

fn splice_new_member(buf: &[u8], path: &str, bytes: &[u8], parent: &ContainerInfo) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() + 32);
    out.extend_from_slice(&buf[..parent.close]);
    if parent.had_members {
        out.push(b',');
    }
    if parent.is_object {
        let key = last_component(path);
        out.push(b'"');
        out.extend_from_slice(key.as_bytes());
        out.extend_from_slice(b"\":");
    }
    out.extend_from_slice(bytes);
    out.extend_from_slice(&buf[parent.close..]);
    out
}

/// Like [`setf`], but renders the replacement by running the emitter over `fmt`/`args` instead of
/// taking pre-rendered bytes (§4.D's `setf(buf, len, sink, path, fmt?, args…)` contract).
pub fn setf_fmt(buf: &[u8], path: &str, fmt: &str, args: &mut [Arg<'_>]) -> RjResult<(Vec<u8>, bool)> {
    let rendered = printf_to_vec(fmt, args)?;
    setf(buf, path, SetOp::Replace(&rendered))
}

/// The key and literal value span of the object member immediately following `after_key` (or the
/// first member, if `after_key` is `None`), scoped to the object at `object_path`.
pub fn next_key(buf: &[u8], object_path: &str, after_key: Option<&str>) -> RjResult<Option<(String, usize, usize)>> {
    let mut members: Vec<(String, usize, usize)> = Vec::new();
    {
        let mut on_event = |ev: Event<'_>| {
            if let Event::Scalar { name: Some(name), path, token } | Event::End { name: Some(name), path, token } = ev {
                if let Some(parent) = parent_of(path) {
                    if parent == object_path {
                        members.push((name.to_string(), token.ptr, token.ptr + token.len));
                    }
                }
            }
        };
        let status = walk(buf, &mut on_event, &WalkOptions::default());
        if let ParseStatus::Invalid { pos } = status {
            return Err(RjError::Invalid { pos });
        }
    }
    let start_idx = match after_key {
        None => 0,
        Some(k) => match members.iter().position(|(name, _, _)| name == k) {
            Some(i) => i + 1,
            None => return Ok(None),
        },
    };
    Ok(members.get(start_idx).cloned())
}

/// The literal value span of the array element immediately following `after_index` (or element 0
/// if `after_index` is `None`), scoped to the array at `array_path`.
pub fn next_elem(buf: &[u8], array_path: &str, after_index: Option<usize>) -> RjResult<Option<(usize, usize, usize)>> {
    let mut elems: Vec<(usize, usize)> = Vec::new();
    {
        let mut on_event = |ev: Event<'_>| {
            if let Event::Scalar { path, token, .. } | Event::End { path, token, .. } = ev {
                if let Some(parent) = parent_of(path) {
                    if parent == array_path {
                        elems.push((token.ptr, token.ptr + token.len));
                    }
                }
            }
        };
        let status = walk(buf, &mut on_event, &WalkOptions::default());
        if let ParseStatus::Invalid { pos } = status {
            return Err(RjError::Invalid { pos });
        }
    }
    let next_idx = after_index.map(|i| i + 1).unwrap_or(0);
    Ok(elems.get(next_idx).map(|&(s, e)| (next_idx, s, e)))
}
