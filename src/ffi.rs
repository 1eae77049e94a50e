//! C FFI bindings for jsonwalk.
//!
//! Enable with the `c-api` feature; `build.rs` then generates `include/jsonwalk.h` via cbindgen.
//! Stable Rust `extern "C" fn` cannot express true C variadics, so the printf/scanf conversions
//! that would be varargs in C take a `(ptr, len)` array of the tagged union [`RjArg`] instead —
//! the caller builds the array, one entry per `%`-conversion, in source order.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::emit::Arg;
use crate::error::RjError;
use crate::options::{PrettyOptions, WalkOptions};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(e: &RjError) {
    let msg = CString::new(e.to_string()).unwrap_or_else(|_| CString::new("error").unwrap());
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(msg));
}

/// Returns the message from the most recent failing call on this thread, or NULL if none.
/// Never free the returned pointer — it is owned by the library and valid until the next failing
/// call on this thread.
#[unsafe(no_mangle)]
pub extern "C" fn rj_last_error_message() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map(|s| s.as_ptr()).unwrap_or(ptr::null()))
}

/// Frees a string previously returned by this library (`rj_prettify`, `rj_get`, ...).
///
/// # Safety
/// `s` must be either NULL or a pointer this library returned, not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rj_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(s));
    }
}

fn to_cstring(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_else(|_| CString::new("").unwrap()).into_raw()
}

/// # Safety
/// `input` must be a valid null-terminated UTF-8 string.
unsafe fn borrow_input<'a>(input: *const c_char) -> Option<&'a str> {
    if input.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(input) }.to_str().ok()
}

/// Pretty-print `input`, returning a freshly allocated null-terminated string (free with
/// [`rj_free_string`]), or NULL on error (check [`rj_last_error_message`]).
///
/// # Safety
/// `input` must be a valid null-terminated UTF-8 string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rj_prettify(input: *const c_char) -> *mut c_char {
    let Some(text) = (unsafe { borrow_input(input) }) else {
        set_last_error(&RjError::Format("input is not valid UTF-8".into()));
        return ptr::null_mut();
    };
    match crate::pretty::prettify(text.as_bytes(), &PrettyOptions::default()) {
        Ok(pretty) => to_cstring(pretty),
        Err(e) => {
            set_last_error(&e);
            ptr::null_mut()
        }
    }
}

/// Look up `path` (dot/bracket notation, e.g. `"a.b[0]"`) in `input` and return its literal
/// value text, or NULL if the path doesn't resolve to a scalar.
///
/// # Safety
/// `input` and `path` must be valid null-terminated UTF-8 strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rj_get(input: *const c_char, path: *const c_char) -> *mut c_char {
    let (Some(text), Some(path)) = (unsafe { borrow_input(input) }, unsafe { borrow_input(path) }) else {
        set_last_error(&RjError::Format("input/path is not valid UTF-8".into()));
        return ptr::null_mut();
    };
    let mut found: Option<String> = None;
    let mut invalid: Option<usize> = None;
    {
        let mut on_event = |ev: crate::walker::Event<'_>| {
            if ev.path() == path {
                if let crate::walker::Event::Scalar { token, .. } | crate::walker::Event::End { token, .. } = ev {
                    found = Some(token.span_str(text.as_bytes()).to_string());
                }
            }
        };
        if let crate::walker::ParseStatus::Invalid { pos } = crate::walker::walk(text.as_bytes(), &mut on_event, &WalkOptions::default()) {
            invalid = Some(pos);
        }
    }
    if let Some(pos) = invalid {
        set_last_error(&RjError::Invalid { pos });
        return ptr::null_mut();
    }
    match found {
        Some(text) => to_cstring(text),
        None => ptr::null_mut(),
    }
}

/// Replace the value at `path` in `input` with the literal text `value` (caller is responsible
/// for `value` being valid JSON text, e.g. quoting a string). Returns a freshly allocated
/// document, or NULL on error.
///
/// # Safety
/// `input`, `path` and `value` must be valid null-terminated UTF-8 strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rj_set(input: *const c_char, path: *const c_char, value: *const c_char) -> *mut c_char {
    let (Some(text), Some(path), Some(value)) =
        (unsafe { borrow_input(input) }, unsafe { borrow_input(path) }, unsafe { borrow_input(value) })
    else {
        set_last_error(&RjError::Format("input/path/value is not valid UTF-8".into()));
        return ptr::null_mut();
    };
    match crate::mutate::setf(text.as_bytes(), path, crate::mutate::SetOp::Replace(value.as_bytes())) {
        Ok((bytes, _matched)) => to_cstring(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            set_last_error(&e);
            ptr::null_mut()
        }
    }
}

/// Discriminant for [`RjArg`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RjArgTag {
    I64 = 0,
    F64 = 1,
    Bool = 2,
    Str = 3,
}

/// A tagged union standing in for a single varargs slot in `rj_printf`'s conversion list.
/// `str_ptr`/`str_len` are only read when `tag == RjArgTag::Str`.
#[repr(C)]
pub struct RjArg {
    pub tag: RjArgTag,
    pub i64_val: i64,
    pub f64_val: f64,
    pub str_ptr: *const c_char,
    pub str_len: usize,
}

/// Render `fmt` against `args` (an array of `arg_count` [`RjArg`] values, one per `%`-conversion
/// in source order), returning a freshly allocated string.
///
/// # Safety
/// `fmt` must be a valid null-terminated UTF-8 string. `args` must point to `arg_count` valid,
/// initialized [`RjArg`] values; any `Str`-tagged entry's `str_ptr`/`str_len` must describe a
/// live, valid UTF-8 byte range for the duration of this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rj_printf(fmt: *const c_char, args: *const RjArg, arg_count: usize) -> *mut c_char {
    let Some(fmt) = (unsafe { borrow_input(fmt) }) else {
        set_last_error(&RjError::Format("fmt is not valid UTF-8".into()));
        return ptr::null_mut();
    };
    let raw_args: &[RjArg] = if args.is_null() || arg_count == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(args, arg_count) }
    };
    let mut strs: Vec<&str> = Vec::with_capacity(raw_args.len());
    for a in raw_args {
        if a.tag == RjArgTag::Str {
            let bytes = unsafe { std::slice::from_raw_parts(a.str_ptr as *const u8, a.str_len) };
            match std::str::from_utf8(bytes) {
                Ok(s) => strs.push(s),
                Err(_) => {
                    set_last_error(&RjError::Format("string argument is not valid UTF-8".into()));
                    return ptr::null_mut();
                }
            }
        } else {
            strs.push("");
        }
    }
    let mut conv_args: Vec<Arg<'_>> = raw_args
        .iter()
        .zip(strs.iter())
        .map(|(a, s)| match a.tag {
            RjArgTag::I64 => Arg::I64(a.i64_val),
            RjArgTag::F64 => Arg::F64(a.f64_val),
            RjArgTag::Bool => Arg::Bool(a.i64_val != 0),
            RjArgTag::Str => Arg::Str(s),
        })
        .collect();
    match crate::emit::printf_to_vec(fmt, &mut conv_args) {
        Ok(bytes) => to_cstring(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            set_last_error(&e);
            ptr::null_mut()
        }
    }
}
