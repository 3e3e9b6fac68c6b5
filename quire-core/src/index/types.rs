//! Indexer types and constants.

use quire_types::{DocId, TokenKind};

use crate::analyzer::buffer::TokenBuffer;
use crate::analyzer::tokenizer::TokenizerConfig;
use crate::index::postings::{PostingSink, Postings};

/// Size of the document id space.
pub const MAX_DOCUMENTS: u64 = DocId::MAX as u64 + 1;

/// A set of token kinds, one bit per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u16);

impl KindSet {
    pub const EMPTY: Self = Self(0);

    /// Alphabetic and numeric runs: the word tokens of a document.
    pub const WORDS: Self = Self::of(&[TokenKind::Alpha, TokenKind::Numeric]);

    /// Every kind except `Eof`.
    pub const ALL: Self = Self((1 << (TokenKind::COUNT - 1)) - 1);

    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u8;
            i += 1;
        }
        Self(bits)
    }

    #[inline(always)]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1 << kind as u8) != 0
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | 1 << kind as u8)
    }

    #[must_use]
    pub const fn without(self, kind: TokenKind) -> Self {
        Self(self.0 & !(1 << kind as u8))
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Configuration options for the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Token kinds that are pushed to the posting sink. Everything else is
    /// only counted.
    pub kinds: KindSet,
    /// Tokenizer settings, including the maximum term length.
    pub tokenizer: TokenizerConfig,
    /// Documents accepted before `add` fails. Capped at [`MAX_DOCUMENTS`].
    pub max_documents: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            kinds: KindSet::WORDS,
            tokenizer: TokenizerConfig::default(),
            max_documents: MAX_DOCUMENTS,
        }
    }
}

/// Tokenizes documents and feeds their terms into a [`PostingSink`].
///
/// The tokenizer's output buffer is allocated once and reused for every
/// document.
pub struct Indexer<S: PostingSink = Postings> {
    pub(crate) config: IndexerConfig,
    pub(crate) sink: S,
    pub(crate) buffer: TokenBuffer,
    /// Documents accepted so far; also the next id.
    pub(crate) documents: u64,
    pub(crate) kind_counts: [u64; TokenKind::COUNT],
    pub(crate) tokens_indexed: u64,
    pub(crate) bytes_indexed: u64,
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexer {
    /// Creates an indexer writing into a fresh [`Postings`] map.
    pub fn new() -> Self {
        Self::with_config(IndexerConfig::default())
    }

    pub fn with_config(config: IndexerConfig) -> Self {
        Self::with_sink(Postings::new(), config)
    }

    /// The accumulated posting lists.
    #[inline(always)]
    pub fn postings(&self) -> &Postings {
        &self.sink
    }

    /// Removes all documents and postings.
    pub fn clear(&mut self) {
        self.sink.clear();
        self.reset_counters();
    }
}

impl<S: PostingSink> Indexer<S> {
    pub fn with_sink(sink: S, config: IndexerConfig) -> Self {
        Self {
            buffer: TokenBuffer::with_capacity(config.tokenizer.buffer_capacity),
            config,
            sink,
            documents: 0,
            kind_counts: [0; TokenKind::COUNT],
            tokens_indexed: 0,
            bytes_indexed: 0,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    #[inline(always)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the indexer and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of documents added, saturating where `usize` is narrower
    /// than the id space.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.documents).unwrap_or(usize::MAX)
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents == 0
    }

    pub(crate) fn reset_counters(&mut self) {
        self.documents = 0;
        self.kind_counts = [0; TokenKind::COUNT];
        self.tokens_indexed = 0;
        self.bytes_indexed = 0;
    }
}
