//! Document Tokenizer Module
//!
//! This module turns a raw document (ASCII, UTF-8, XML-tagged text, or
//! garbage) into a stream of normalized, classified tokens for indexing.
//! It is a pull tokenizer: bind a document, then call
//! [`Tokenizer::get_next_token`] until it returns [`TokenKind::Eof`].
//!
//! ## What It Does
//!
//! Given `"Hello <b>wörld</b> 42!"` it emits:
//!
//! ```text
//! Alpha("hello")  XmlStartTag("b")  Alpha("wörld")  XmlEndTag("b")  Numeric("42")  Other("!")  Eof
//! ```
//!
//! - **Alphabetic runs** are lower-cased and case-folded, across scripts:
//!   `"aβc"` is one token.
//! - **Numeric runs** fold compatibility digits: `"1②3"` becomes `"123"`.
//! - **Punctuation** comes out one character per token.
//! - **Markup** after `<` is recognised and returned as one token.
//!
//! ## Usage
//!
//! ```rust
//! use quire_core::analyzer::tokenizer::{Tokenizer, TokenizerConfig};
//! use quire_types::TokenKind;
//!
//! let mut tokenizer = Tokenizer::new(TokenizerConfig::default());
//! tokenizer.set_bytes(b"Hello, World");
//!
//! let token = tokenizer.get_next_token();
//! assert_eq!(token.kind, TokenKind::Alpha);
//! assert_eq!(token.text, b"hello");
//! ```
//!
//! ## The Output Contract
//!
//! - Token text lives in the tokenizer's own fixed-size buffer and is only
//!   valid until the next call (the borrow checker enforces this).
//! - Text longer than the buffer is truncated; the input is still consumed,
//!   so token boundaries stay right.
//! - Malformed UTF-8 never stops the tokenizer: a bad byte ends the current
//!   run or becomes an empty `Other` token.
//! - Once `Eof` is returned it is returned again on every call until a new
//!   document is bound.
//!
//! ## Threading
//!
//! A [`Tokenizer`] belongs to one worker at a time. The classification and
//! fold tables it reads are immutable and shared.

use quire_types::{Document, Token, TokenKind};

use super::ascii;
use super::buffer::TokenBuffer;
use super::markup;
use super::unicode::{self, CaseFold};

/// Default output buffer size in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Configuration options for the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Maximum bytes of token text. Longer tokens are truncated.
    /// Values below 1 are raised to 1.
    pub buffer_capacity: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

/// First non-whitespace unit of a token.
#[derive(Debug, Clone, Copy)]
enum Unit {
    Ascii(u8),
    /// `len == 0` when the bytes at the cursor do not decode.
    Unicode { codepoint: u32, len: usize },
}

/// The class a run was started in. A run never changes class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Alpha,
    Numeric,
}

impl Run {
    #[inline(always)]
    fn kind(self) -> TokenKind {
        match self {
            Run::Alpha => TokenKind::Alpha,
            Run::Numeric => TokenKind::Numeric,
        }
    }

    #[inline(always)]
    fn accepts_ascii(self, b: u8) -> bool {
        match self {
            Run::Alpha => ascii::is_alpha(b),
            Run::Numeric => ascii::is_digit(b),
        }
    }

    #[inline(always)]
    fn joins(self, codepoint: u32, fold: &CaseFold) -> bool {
        match self {
            Run::Alpha => unicode::folded_joins_alpha(codepoint, fold),
            Run::Numeric => unicode::folded_joins_digit(codepoint, fold),
        }
    }

    fn of_codepoint(codepoint: u32, fold: &CaseFold) -> Option<Run> {
        if unicode::folded_joins_alpha(codepoint, fold) {
            Some(Run::Alpha)
        } else if unicode::folded_joins_digit(codepoint, fold) {
            Some(Run::Numeric)
        } else {
            None
        }
    }
}

/// Skips ASCII and Unicode whitespace from `pos`.
///
/// Returns the new position and the unit found there, or `None` at the end
/// of the document.
fn skip_whitespace(source: &[u8], mut pos: usize) -> (usize, Option<Unit>) {
    while let Some(&b) = source.get(pos) {
        if ascii::is_ascii(b) {
            if !ascii::is_space(b) {
                return (pos, Some(Unit::Ascii(b)));
            }
            pos += 1;
        } else {
            let (codepoint, len) = unicode::decode_utf8(source, pos);
            if len == 0 || !unicode::is_space(codepoint) {
                return (pos, Some(Unit::Unicode { codepoint, len }));
            }
            pos += len;
        }
    }
    (pos, None)
}

/// Pull tokenizer over one bound document at a time.
///
/// Construct once per worker and rebind with [`set_document`](Self::set_document)
/// or [`set_bytes`](Self::set_bytes) for every document. The output buffer
/// is allocated once and reused.
///
/// ## Example
///
/// ```
/// use quire_core::analyzer::tokenizer::Tokenizer;
/// use quire_types::{Document, TokenKind};
///
/// let doc = Document::from("<title>Mixed αβγ①②③</title>");
/// let mut tokenizer = Tokenizer::default();
/// tokenizer.set_document(&doc);
///
/// let mut kinds = Vec::new();
/// loop {
///     let token = tokenizer.get_next_token();
///     if token.is_eof() {
///         break;
///     }
///     kinds.push(token.kind);
/// }
///
/// assert_eq!(
///     kinds,
///     [TokenKind::XmlStartTag, TokenKind::Alpha, TokenKind::Alpha, TokenKind::Numeric, TokenKind::XmlEndTag]
/// );
/// ```
#[derive(Debug)]
pub struct Tokenizer<'d> {
    source: &'d [u8],
    cursor: usize,
    buffer: TokenBuffer,
    exhausted: bool,
}

impl Default for Tokenizer<'_> {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl<'d> Tokenizer<'d> {
    /// Creates a tokenizer with no document bound. It returns `Eof` until
    /// one is.
    pub fn new(config: TokenizerConfig) -> Self {
        Self::with_buffer(TokenBuffer::with_capacity(config.buffer_capacity))
    }

    /// Creates a tokenizer that writes into an existing buffer.
    pub fn with_buffer(buffer: TokenBuffer) -> Self {
        Self {
            source: &[],
            cursor: 0,
            buffer,
            exhausted: false,
        }
    }

    /// Releases the output buffer for reuse by another tokenizer.
    pub fn into_buffer(self) -> TokenBuffer {
        self.buffer
    }

    /// Binds a document and rewinds to its start.
    #[inline]
    pub fn set_document(&mut self, document: &'d Document<'_>) {
        self.set_bytes(document.as_bytes());
    }

    /// Binds raw bytes as the document and rewinds to the start.
    pub fn set_bytes(&mut self, bytes: &'d [u8]) {
        log::trace!(target: "quire.tokenizer", "bound document: {} bytes", bytes.len());
        self.source = bytes;
        self.cursor = 0;
        self.exhausted = false;
        self.buffer.clear();
    }

    /// Current read position in the bound document.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Length of the bound document.
    #[inline(always)]
    pub fn document_len(&self) -> usize {
        self.source.len()
    }

    /// Maximum token text length.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns the next token, or `Eof` once the document is consumed.
    pub fn get_next_token(&mut self) -> Token<'_> {
        self.buffer.clear();

        let (pos, unit) = skip_whitespace(self.source, self.cursor);
        self.cursor = pos;

        let kind = match unit {
            None => {
                if !self.exhausted {
                    self.exhausted = true;
                    log::trace!(target: "quire.tokenizer", "end of document at {}", self.cursor);
                }
                return Token::EOF;
            }
            Some(Unit::Ascii(b)) => self.ascii_token(b),
            Some(Unit::Unicode { codepoint, len }) => self.unicode_token(codepoint, len),
        };

        debug_assert!(self.cursor <= self.source.len());
        Token::new(kind, self.buffer.as_bytes())
    }

    /// Tokenizes `bytes` to the end, emitting every token except `Eof`.
    ///
    /// The tokenizer stays bound to `bytes` afterwards.
    pub fn tokenize<F>(&mut self, bytes: &'d [u8], mut emit: F)
    where
        F: FnMut(Token<'_>),
    {
        self.set_bytes(bytes);
        loop {
            let token = self.get_next_token();
            if token.is_eof() {
                break;
            }
            emit(token);
        }
    }

    fn ascii_token(&mut self, b: u8) -> TokenKind {
        if ascii::is_alpha(b) {
            self.ascii_run(Run::Alpha)
        } else if ascii::is_digit(b) {
            self.ascii_run(Run::Numeric)
        } else if b == b'<' {
            let (kind, cursor) = markup::scan(self.source, self.cursor, &mut self.buffer);
            self.cursor = cursor;
            kind
        } else {
            self.buffer.push_byte(b);
            self.cursor += 1;
            TokenKind::Other
        }
    }

    fn unicode_token(&mut self, codepoint: u32, len: usize) -> TokenKind {
        // A byte that does not decode is codepoint 0 and folds to nothing.
        let fold = unicode::casefold(codepoint);
        self.push_fold(&fold);

        if len > 0 {
            if let Some(run) = Run::of_codepoint(codepoint, &fold) {
                self.cursor += len;
                self.unicode_run(run);
                return run.kind();
            }
        }

        // One symbol per token.
        self.cursor += len.max(1);
        TokenKind::Other
    }

    #[inline]
    fn push_fold(&mut self, fold: &CaseFold) {
        for folded in fold.codepoints() {
            self.buffer.push_codepoint(folded);
        }
    }

    /// Copies an ASCII run, then carries on in Unicode if the run ended on a
    /// non-ASCII byte.
    fn ascii_run(&mut self, run: Run) -> TokenKind {
        let source = self.source;
        let mut pos = self.cursor;

        while let Some(&b) = source.get(pos) {
            if !run.accepts_ascii(b) {
                break;
            }
            self.buffer.push_byte(ascii::to_lower(b));
            pos += 1;
        }
        self.cursor = pos;

        if source.get(pos).is_some_and(|&b| !ascii::is_ascii(b)) {
            self.unicode_run(run);
        }
        run.kind()
    }

    /// Decodes, folds and appends codepoints while they join `run`.
    fn unicode_run(&mut self, run: Run) {
        loop {
            let (codepoint, len) = unicode::decode_utf8(self.source, self.cursor);
            if len == 0 {
                break;
            }
            let fold = unicode::casefold(codepoint);
            if !run.joins(codepoint, &fold) {
                break;
            }
            self.push_fold(&fold);
            self.cursor += len;
        }
    }
}
