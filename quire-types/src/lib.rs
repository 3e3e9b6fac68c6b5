//! Core types shared across the Quire tokenizer and indexer.
//!
//! This crate holds the small value types that cross crate boundaries:
//!
//! - **Tokens**: the classified, normalized output of one tokenizer call
//! - **Documents**: the immutable byte view a tokenizer is bound to
//! - **Errors**: failure types for the indexing layer
//!
//! Keeping these free of dependencies lets downstream consumers (posting
//! stores, evaluation tools) name tokens without pulling in the analyzer.

#![warn(missing_docs)]

use core::fmt;
use std::borrow::Cow;

/// Unique document identifier.
///
/// Documents are numbered sequentially from zero in the order they are
/// indexed. A 32-bit id keeps posting lists compact.
pub type DocId = u32;

/// Classification of a token.
///
/// `#[repr(u8)]` keeps the kind at one byte so it can be packed next to
/// posting data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// A run of alphabetic characters (any script), case-folded.
    Alpha = 0,
    /// A run of numeric characters, folded to plain digits where possible.
    Numeric = 1,
    /// A single non-alphanumeric character.
    Other = 2,
    /// `<name ...>`; the text is the tag name.
    XmlStartTag = 3,
    /// `</name>`; the text is everything between `</` and `>`.
    XmlEndTag = 4,
    /// `<name .../>`; the text is the tag name.
    XmlEmptyTag = 5,
    /// `<? ... ?>`; the text is the body.
    XmlProcessingInstruction = 6,
    /// `<!-- ... -->`; the text is the body.
    XmlComment = 7,
    /// `<!DOCTYPE ...>` and the other declarations; the text is the body.
    XmlDefinition = 8,
    /// `<![CDATA[ ... ]]>`; the text is the body.
    XmlCdata = 9,
    /// `<![ ... [`; the text is the section keyword span.
    XmlConditional = 10,
    /// End of document. Sticky until a new document is bound.
    Eof = 11,
}

impl TokenKind {
    /// Number of distinct kinds, for per-kind counters.
    pub const COUNT: usize = 12;

    /// All kinds in discriminant order.
    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::Alpha,
        TokenKind::Numeric,
        TokenKind::Other,
        TokenKind::XmlStartTag,
        TokenKind::XmlEndTag,
        TokenKind::XmlEmptyTag,
        TokenKind::XmlProcessingInstruction,
        TokenKind::XmlComment,
        TokenKind::XmlDefinition,
        TokenKind::XmlCdata,
        TokenKind::XmlConditional,
        TokenKind::Eof,
    ];

    /// Returns the discriminant as an index into per-kind tables.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for the kinds produced by markup recognition.
    #[inline(always)]
    pub const fn is_xml(self) -> bool {
        matches!(
            self,
            TokenKind::XmlStartTag
                | TokenKind::XmlEndTag
                | TokenKind::XmlEmptyTag
                | TokenKind::XmlProcessingInstruction
                | TokenKind::XmlComment
                | TokenKind::XmlDefinition
                | TokenKind::XmlCdata
                | TokenKind::XmlConditional
        )
    }

    /// Returns `true` for the kinds that carry searchable terms.
    #[inline(always)]
    pub const fn is_indexable(self) -> bool {
        matches!(self, TokenKind::Alpha | TokenKind::Numeric)
    }

    /// Short lowercase name, used in logs and debug output.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Alpha => "alpha",
            TokenKind::Numeric => "numeric",
            TokenKind::Other => "other",
            TokenKind::XmlStartTag => "xml-start-tag",
            TokenKind::XmlEndTag => "xml-end-tag",
            TokenKind::XmlEmptyTag => "xml-empty-tag",
            TokenKind::XmlProcessingInstruction => "xml-processing-instruction",
            TokenKind::XmlComment => "xml-comment",
            TokenKind::XmlDefinition => "xml-definition",
            TokenKind::XmlCdata => "xml-cdata",
            TokenKind::XmlConditional => "xml-conditional",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token produced by one tokenizer call.
///
/// `text` borrows the tokenizer's output buffer, not the source document,
/// so a token cannot outlive the next call that overwrites the buffer.
/// The bytes are normally UTF-8 but truncation at the buffer capacity or
/// malformed input can leave a partial sequence at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Normalized token bytes.
    pub text: &'a [u8],
}

impl<'a> Token<'a> {
    /// The end-of-document token.
    pub const EOF: Token<'static> = Token {
        kind: TokenKind::Eof,
        text: &[],
    };

    /// Creates a token.
    #[inline(always)]
    pub const fn new(kind: TokenKind, text: &'a [u8]) -> Self {
        Self { kind, text }
    }

    /// Returns `true` if this is the end-of-document token.
    #[inline(always)]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the text as `&str` when it is valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.text).ok()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, String::from_utf8_lossy(self.text))
    }
}

/// An immutable document handle.
///
/// Either borrows the caller's bytes or owns them. The tokenizer only ever
/// reads through [`Document::as_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    contents: Cow<'a, [u8]>,
}

impl<'a> Document<'a> {
    /// Wraps borrowed bytes.
    #[inline]
    pub const fn borrowed(bytes: &'a [u8]) -> Self {
        Self {
            contents: Cow::Borrowed(bytes),
        }
    }

    /// Takes ownership of a byte buffer.
    #[inline]
    pub fn owned(bytes: Vec<u8>) -> Document<'static> {
        Document {
            contents: Cow::Owned(bytes),
        }
    }

    /// Returns the document contents.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.contents
    }

    /// Returns the document length in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns `true` for an empty document.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl<'a> From<&'a [u8]> for Document<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::borrowed(bytes)
    }
}

impl<'a> From<&'a str> for Document<'a> {
    fn from(text: &'a str) -> Self {
        Self::borrowed(text.as_bytes())
    }
}

impl From<Vec<u8>> for Document<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Document::owned(bytes)
    }
}

impl From<String> for Document<'static> {
    fn from(text: String) -> Self {
        Document::owned(text.into_bytes())
    }
}

/// Errors that can occur while indexing documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// The document id space is exhausted.
    TooManyDocuments {
        /// The maximum number of documents an index can hold.
        limit: u64,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::TooManyDocuments { limit } => {
                write!(f, "too many documents: index holds at most {}", limit)
            }
        }
    }
}

impl core::error::Error for IndexError {}
