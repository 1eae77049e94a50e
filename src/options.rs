/// Default value of [`WalkOptions::max_path_len`].
pub const JSON_MAX_PATH_LEN: usize = 60;

/// Default value of [`WalkOptions::max_depth`].
pub const JSON_MAX_DEPTH: usize = 100;

/// Tuning knobs for the walker (§4.A, §6).
///
/// These bound the two resources an adversarial document could otherwise exhaust: the stack
/// (via recursion depth) and the fixed-size path buffer (via deeply nested/long keys).
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum number of bytes kept in the dotted/bracketed path buffer. When a path would grow
    /// past this, it is silently truncated (possibly mid-component) and traversal continues.
    pub max_path_len: usize,
    /// Maximum nesting depth (objects and arrays both count). Exceeding this is treated as
    /// `INVALID` rather than recursing further, to bound stack usage on adversarial input.
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_path_len: JSON_MAX_PATH_LEN,
            max_depth: JSON_MAX_DEPTH,
        }
    }
}

/// Policy knobs for [`crate::pretty::prettify`] and the relaxed-vs-canonical emitter modes.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct PrettyOptions {
    /// Number of spaces used per indentation level. The original library always used two; this
    /// is exposed because the teacher's own `Options` struct favors explicit, overridable fields
    /// over baked-in magic numbers.
    pub indent_width: usize,
    /// Escape non-ASCII bytes inside strings as `\uXXXX` instead of passing them through.
    pub ensure_ascii: bool,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            ensure_ascii: false,
        }
    }
}
