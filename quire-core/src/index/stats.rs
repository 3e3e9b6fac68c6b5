//! Statistics and IndexStats.

use quire_types::TokenKind;

use crate::index::postings::PostingSink;
use crate::index::types::Indexer;

/// A snapshot of indexing statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of documents added.
    pub documents: u64,
    /// Total document bytes tokenized.
    pub bytes: u64,
    /// Tokens produced, excluding `Eof`.
    pub tokens_seen: u64,
    /// Tokens pushed to the posting sink.
    pub tokens_indexed: u64,
    /// Tokens produced, per kind, indexed by [`TokenKind::index`].
    pub per_kind: [u64; TokenKind::COUNT],
    /// Distinct terms in the sink.
    pub unique_terms: usize,
}

impl IndexStats {
    /// Tokens of one kind.
    #[inline(always)]
    pub fn count(&self, kind: TokenKind) -> u64 {
        self.per_kind[kind.index()]
    }

    /// Tokens produced by markup recognition.
    pub fn markup_tokens(&self) -> u64 {
        TokenKind::ALL
            .iter()
            .filter(|kind| kind.is_xml())
            .map(|&kind| self.count(kind))
            .sum()
    }
}

impl<S: PostingSink> Indexer<S> {
    /// Returns indexing statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.documents,
            bytes: self.bytes_indexed,
            tokens_seen: self.kind_counts.iter().sum(),
            tokens_indexed: self.tokens_indexed,
            per_kind: self.kind_counts,
            unique_terms: self.sink.term_count(),
        }
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} docs, {} tokens ({} indexed), {} unique terms",
            self.documents, self.tokens_seen, self.tokens_indexed, self.unique_terms
        )?;

        for kind in TokenKind::ALL {
            let n = self.count(kind);
            if n > 0 {
                write!(f, ", {kind}: {n}")?;
            }
        }

        Ok(())
    }
}
