use crate::token::utf8_prefix;

/// A generous ceiling for the stack buffer backing [`PathBuf`].
///
/// `WalkOptions::max_path_len` is the *effective* budget (checked at each append); this constant
/// just has to be large enough to cover any `max_path_len` a caller reasonably configures. It
/// mirrors the walker's "path buffer is stack-sized; no heap use in the walker itself" resource
/// rule (§5).
const PATH_BUF_CAP: usize = 512;

/// The dotted/bracketed path from the root to the value currently being visited (§3).
///
/// Appending past the configured budget truncates (possibly mid-component) rather than growing
/// or erroring — this is intentional, observable behavior (§4.A "Path budget"), not a corner case
/// to paper over.
#[derive(Debug, Clone)]
pub struct PathBuf {
    buf: [u8; PATH_BUF_CAP],
    len: usize,
    budget: usize,
}

impl PathBuf {
    pub fn new(budget: usize) -> Self {
        Self {
            buf: [0u8; PATH_BUF_CAP],
            len: 0,
            budget: budget.min(PATH_BUF_CAP),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Restore a previously saved length (used when unwinding out of a child value).
    pub fn truncate(&mut self, len: usize) {
        self.len = len;
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        let space = self.budget.saturating_sub(self.len);
        let n = space.min(bytes.len());
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
    }

    /// Append `.{key}` for an object member.
    pub fn push_key(&mut self, key: &[u8]) {
        self.push_bytes(b".");
        self.push_bytes(key);
    }

    /// Append `[{index}]` for an array element.
    pub fn push_index(&mut self, index: usize) {
        let mut digits = [0u8; 20];
        let s = crate::token::write_usize(&mut digits, index);
        self.push_bytes(b"[");
        self.push_bytes(s.as_bytes());
        self.push_bytes(b"]");
    }

    /// The path built so far, as text.
    ///
    /// If truncation landed mid-UTF-8-sequence (possible because bare keys may contain
    /// unvalidated high-bit bytes, §4.A), the incomplete trailing bytes are dropped rather than
    /// panicking or allocating a lossy replacement.
    pub fn as_str(&self) -> &str {
        utf8_prefix(&self.buf[..self.len])
    }
}
