//! Fixed-capacity token output buffer.
//!
//! Every token the tokenizer returns is written here first. The capacity is
//! fixed when the buffer is created and never grows: writes that do not fit
//! are dropped and report how many bytes actually landed, so the caller can
//! keep consuming input while the token text stays truncated.

use super::unicode;

/// Bounded write window reused across tokens.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    bytes: Box<[u8]>,
    len: usize,
}

/// The smallest buffer that still holds an ASCII token.
impl Default for TokenBuffer {
    fn default() -> Self {
        Self::with_capacity(1)
    }
}

impl TokenBuffer {
    /// Creates a buffer holding at most `capacity` bytes (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity.max(1)].into_boxed_slice(),
            len: 0,
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still free.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.len
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.bytes.len()
    }

    /// Rewinds to offset 0. Old contents are left in place and overwritten.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The bytes written since the last [`clear`](Self::clear).
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Appends one byte if there is room. Returns 1 or 0.
    #[inline(always)]
    pub fn push_byte(&mut self, b: u8) -> usize {
        match self.bytes.get_mut(self.len) {
            Some(slot) => {
                *slot = b;
                self.len += 1;
                1
            }
            None => 0,
        }
    }

    /// Capped append: copies as much of `src` as fits and returns the count.
    ///
    /// Markup bodies are opaque bytes, so a cut may land inside a multi-byte
    /// sequence.
    #[inline]
    pub fn write_if_room(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.remaining());
        self.bytes[self.len..self.len + n].copy_from_slice(&src[..n]);
        self.len += n;
        n
    }

    /// Appends the UTF-8 encoding of `codepoint` only if all of it fits.
    #[inline]
    pub fn push_codepoint(&mut self, codepoint: u32) -> usize {
        let written = unicode::encode_utf8(codepoint, &mut self.bytes[self.len..]);
        self.len += written;
        written
    }
}
