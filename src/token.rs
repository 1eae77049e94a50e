/// Tag identifying what kind of JSON value a [`Token`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Invalid,
    String,
    Number,
    True,
    False,
    Null,
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
}

impl TokenKind {
    /// True for `Null`/`True`/`False`/`Number`/`String` — the kinds a single callback
    /// invocation fully describes (§4.A).
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Null
        )
    }

    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            TokenKind::ObjectBegin | TokenKind::ObjectEnd | TokenKind::ArrayBegin | TokenKind::ArrayEnd
        )
    }
}

/// A position-tagged span of the input buffer (§3).
///
/// For scalars, `ptr..ptr+len` covers the literal text (for strings, the content *between* the
/// quotes, stored exactly as written — escape sequences are not decoded here). For
/// `ObjectBegin`/`ArrayBegin` the span is empty, marking the opening delimiter. For
/// `ObjectEnd`/`ArrayEnd` the span covers the whole aggregate, opening delimiter through closing
/// delimiter inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub ptr: usize,
    pub len: usize,
}

impl Token {
    pub fn new(kind: TokenKind, ptr: usize, len: usize) -> Self {
        Self { kind, ptr, len }
    }

    /// Borrow the literal span this token refers to out of `buf`.
    ///
    /// # Panics
    /// Panics if the span lies outside `buf`; the walker guarantees this never happens for
    /// tokens it produces itself (§3 invariants), so this is a caller contract, not a runtime
    /// check against adversarial input.
    pub fn span<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        &buf[self.ptr..self.ptr + self.len]
    }

    pub fn span_str<'b>(&self, buf: &'b [u8]) -> &'b str {
        utf8_prefix(self.span(buf))
    }
}

/// Decode `bytes` as UTF-8, falling back to the valid leading prefix if it is not.
///
/// The bare-key grammar (§4.A) intentionally accepts any lead/continuation byte without
/// validating the multibyte sequence, and the path budget can truncate mid-sequence (§4.A "Path
/// budget"), so callers that turn raw bytes into a `&str` for display/matching purposes need a
/// zero-copy, panic-free fallback rather than `str::from_utf8(..).unwrap()`.
pub(crate) fn utf8_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(s) => s,
        // SAFETY: `valid_up_to` is the longest prefix of `bytes` that is valid UTF-8.
        Err(e) => unsafe { std::str::from_utf8_unchecked(&bytes[..e.valid_up_to()]) },
    }
}

/// Render `n` in decimal into `buf`, returning the written slice as `&str`.
///
/// Used for array-element names (`name` is "the decimal index rendered as text", §4.A) without
/// allocating, consistent with "no heap use in the walker itself" (§5).
pub(crate) fn write_usize(buf: &mut [u8; 20], n: usize) -> &str {
    if n == 0 {
        buf[0] = b'0';
        return utf8_prefix(&buf[..1]);
    }
    let mut i = buf.len();
    let mut v = n;
    while v > 0 {
        i -= 1;
        buf[i] = b'0' + (v % 10) as u8;
        v /= 10;
    }
    utf8_prefix(&buf[i..])
}
