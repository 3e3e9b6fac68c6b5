//! Public API for adding documents.

use std::mem;

use quire_types::{DocId, Document, IndexError};

use crate::analyzer::tokenizer::Tokenizer;
use crate::index::postings::PostingSink;
use crate::index::types::{Indexer, MAX_DOCUMENTS};

impl<S: PostingSink> Indexer<S> {
    /// Tokenizes a document and records its terms.
    ///
    /// Ids are handed out sequentially from 0.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::TooManyDocuments` once the configured document
    /// limit (at most the 32-bit id space) is reached. The document is not
    /// tokenized in that case.
    #[inline]
    pub fn add(&mut self, document: &Document<'_>) -> Result<DocId, IndexError> {
        self.add_bytes(document.as_bytes())
    }

    /// Like [`add`](Self::add), for raw bytes.
    #[inline(never)]
    pub fn add_bytes(&mut self, bytes: &[u8]) -> Result<DocId, IndexError> {
        let limit = self.config.max_documents.min(MAX_DOCUMENTS);
        if self.documents >= limit {
            return Err(IndexError::TooManyDocuments { limit });
        }
        let doc = self.documents as DocId;

        let kinds = self.config.kinds;
        let mut seen = 0u64;
        let mut indexed = 0u64;

        let mut tokenizer = Tokenizer::with_buffer(mem::take(&mut self.buffer));
        tokenizer.set_bytes(bytes);
        loop {
            let token = tokenizer.get_next_token();
            if token.is_eof() {
                break;
            }
            seen += 1;
            self.kind_counts[token.kind.index()] += 1;
            if kinds.contains(token.kind) && !token.text.is_empty() {
                self.sink.push(token.text, doc);
                indexed += 1;
            }
        }
        self.buffer = tokenizer.into_buffer();

        self.documents += 1;
        self.tokens_indexed += indexed;
        self.bytes_indexed += bytes.len() as u64;

        log::debug!(
            target: "quire.index",
            "indexed document {doc}: {} bytes, {seen} tokens, {indexed} terms",
            bytes.len()
        );

        Ok(doc)
    }

    /// Adds several documents.
    ///
    /// Returns (success_count, error_count) and the last error encountered.
    pub fn add_batch<'a, I>(&mut self, documents: I) -> (usize, usize, Option<IndexError>)
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut added = 0;
        let mut failed = 0;
        let mut last_error = None;

        for bytes in documents {
            match self.add_bytes(bytes) {
                Ok(_) => added += 1,
                Err(e) => {
                    failed += 1;
                    last_error = Some(e);
                }
            }
        }
        (added, failed, last_error)
    }
}
