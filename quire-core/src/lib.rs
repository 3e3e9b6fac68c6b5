//! Document tokenizer for a research search engine.
//!
//! `quire-core` turns raw documents (ASCII, UTF-8, XML-tagged text, or
//! broken bytes) into normalized, classified tokens, and accumulates those
//! tokens into posting lists.
//!
//! - [`analyzer`]: classification tables, case folding and the tokenizer
//! - [`index`]: the postings accumulator that consumes tokens
//!
//! Shared value types ([`Token`], [`TokenKind`], [`Document`], [`DocId`])
//! live in `quire-types` and are re-exported here.

pub mod analyzer;
pub mod index;

pub use analyzer::{Tokenizer, TokenizerConfig};
pub use index::{IndexStats, Indexer, IndexerConfig, PostingSink, Postings};
pub use quire_types::{DocId, Document, IndexError, Token, TokenKind};
