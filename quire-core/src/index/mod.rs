//! Postings accumulation for the search engine.
//!
//! The [`Indexer`] is the downstream consumer of the tokenizer: it binds each
//! document, pulls tokens until `Eof`, and pushes the ones it is configured
//! to keep into a [`PostingSink`], keyed by the token's text bytes.
//!
//! Single-threaded. Run one `Indexer` per worker and merge the sinks
//! afterwards if documents are spread across threads.

mod api;
mod postings;
mod stats;
mod types;

pub use postings::{Posting, PostingList, PostingSink, Postings};
pub use stats::IndexStats;
pub use types::{Indexer, IndexerConfig, KindSet, MAX_DOCUMENTS};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tokenizer::TokenizerConfig;
    use quire_types::{DocId, Document, IndexError, TokenKind};

    #[test]
    fn basic_add_and_lookup() {
        let mut indexer = Indexer::new();

        let id1 = indexer.add(&Document::from("hello world")).expect("should add doc");
        let id2 = indexer.add(&Document::from("Hello Rust")).expect("should add doc");
        let id3 = indexer.add(&Document::from("goodbye world")).expect("should add doc");

        assert_eq!((id1, id2, id3), (0, 1, 2));
        assert_eq!(indexer.len(), 3);

        let postings = indexer.postings();
        let hello: Vec<DocId> = postings.get(b"hello").expect("hello indexed").docs().collect();
        assert_eq!(hello, [0, 1]);
        let world: Vec<DocId> = postings.get(b"world").expect("world indexed").docs().collect();
        assert_eq!(world, [0, 2]);
        assert!(postings.get(b"Hello").is_none());
    }

    #[test]
    fn term_frequency_within_document() {
        let mut indexer = Indexer::new();
        indexer.add_bytes(b"to be or not to be").expect("should add doc");

        let be = indexer.postings().get(b"be").expect("be indexed");
        assert_eq!(be.frequency(0), 2);
        assert_eq!(indexer.postings().get(b"or").map(|l| l.frequency(0)), Some(1));
    }

    #[test]
    fn default_filter_skips_markup_and_punctuation() {
        let mut indexer = Indexer::new();
        indexer
            .add(&Document::from("<title>Caf\u{e9}, 42!</title>"))
            .expect("should add doc");

        let terms: Vec<&[u8]> = indexer
            .postings()
            .sorted_terms()
            .into_iter()
            .map(|(term, _)| term)
            .collect();
        let expected: [&[u8]; 2] = [b"42", "caf\u{e9}".as_bytes()];
        assert_eq!(terms, expected);

        let stats = indexer.stats();
        assert_eq!(stats.tokens_seen, 6);
        assert_eq!(stats.tokens_indexed, 2);
        assert_eq!(stats.count(TokenKind::XmlStartTag), 1);
        assert_eq!(stats.count(TokenKind::XmlEndTag), 1);
        assert_eq!(stats.count(TokenKind::Other), 2);
        assert_eq!(stats.markup_tokens(), 2);
    }

    #[test]
    fn custom_kinds_index_tags() {
        let mut indexer = Indexer::with_config(IndexerConfig {
            kinds: KindSet::of(&[TokenKind::XmlStartTag, TokenKind::XmlEmptyTag]),
            ..Default::default()
        });
        indexer
            .add_bytes(b"<doc><br/>text</doc>")
            .expect("should add doc");

        let postings = indexer.postings();
        assert!(postings.get(b"doc").is_some());
        assert!(postings.get(b"br").is_some());
        assert!(postings.get(b"text").is_none());
        assert_eq!(postings.len(), 2);
    }

    #[test]
    fn empty_terms_are_not_pushed() {
        let mut indexer = Indexer::with_config(IndexerConfig {
            kinds: KindSet::ALL,
            ..Default::default()
        });
        indexer.add_bytes(b"a\xff<!---->b").expect("should add doc");

        let stats = indexer.stats();
        assert_eq!(stats.tokens_seen, 4);
        assert_eq!(stats.tokens_indexed, 2);
        assert_eq!(stats.unique_terms, 2);
        assert!(indexer.postings().get(b"").is_none());
    }

    #[test]
    fn long_terms_are_truncated_to_capacity() {
        let mut indexer = Indexer::with_config(IndexerConfig {
            tokenizer: TokenizerConfig { buffer_capacity: 4 },
            ..Default::default()
        });
        indexer.add_bytes(b"internationalization intern").expect("should add doc");

        let postings = indexer.postings();
        assert_eq!(postings.get(b"inte").map(|l| l.frequency(0)), Some(2));
        assert_eq!(postings.len(), 1);
    }

    #[test]
    fn document_limit() {
        let mut indexer = Indexer::with_config(IndexerConfig {
            max_documents: 2,
            ..Default::default()
        });
        indexer.add_bytes(b"one").expect("should add doc");
        indexer.add_bytes(b"two").expect("should add doc");

        let err = indexer.add_bytes(b"three").unwrap_err();
        assert_eq!(err, IndexError::TooManyDocuments { limit: 2 });
        assert_eq!(indexer.len(), 2);
        assert!(indexer.postings().get(b"three").is_none());
    }

    #[test]
    fn add_batch_counts() {
        let mut indexer = Indexer::with_config(IndexerConfig {
            max_documents: 2,
            ..Default::default()
        });
        let docs: [&[u8]; 3] = [b"a", b"b", b"c"];
        let (added, failed, last) = indexer.add_batch(docs);
        assert_eq!((added, failed), (2, 1));
        assert_eq!(last, Some(IndexError::TooManyDocuments { limit: 2 }));
    }

    #[test]
    fn clear_resets() {
        let mut indexer = Indexer::new();
        indexer.add_bytes(b"test").expect("should add doc");
        indexer.add_bytes(b"document").expect("should add doc");
        assert_eq!(indexer.len(), 2);

        indexer.clear();

        assert!(indexer.is_empty());
        assert!(indexer.postings().is_empty());
        assert_eq!(indexer.stats().tokens_seen, 0);
        assert_eq!(indexer.add_bytes(b"again"), Ok(0));
    }

    #[test]
    fn custom_sink_sees_tokens_in_order() {
        #[derive(Default)]
        struct Recorder(Vec<(Vec<u8>, DocId)>);

        impl PostingSink for Recorder {
            fn push(&mut self, term: &[u8], doc: DocId) {
                self.0.push((term.to_vec(), doc));
            }

            fn term_count(&self) -> usize {
                self.0.len()
            }
        }

        let mut indexer = Indexer::with_sink(Recorder::default(), IndexerConfig::default());
        indexer.add_bytes("Ωmega 7".as_bytes()).expect("should add doc");
        indexer.add_bytes(b"x").expect("should add doc");

        let recorded = indexer.into_sink().0;
        assert_eq!(
            recorded,
            [
                ("ωmega".as_bytes().to_vec(), 0),
                (b"7".to_vec(), 0),
                (b"x".to_vec(), 1),
            ]
        );
    }

    #[test]
    fn stats_display() {
        let mut indexer = Indexer::new();
        indexer.add_bytes(b"<p>hi 2</p>").expect("should add doc");
        let text = indexer.stats().to_string();
        assert!(text.starts_with("1 docs, 4 tokens (2 indexed), 2 unique terms"), "{text}");
        assert!(text.contains("xml-start-tag: 1"), "{text}");
    }

    #[test]
    fn large_scale() {
        let mut indexer = Indexer::new();
        for i in 0..1000 {
            indexer
                .add(&Document::from(format!("document number {i}")))
                .expect("should add doc");
        }
        let stats = indexer.stats();
        assert_eq!(stats.documents, 1000);
        assert_eq!(indexer.postings().get(b"document").map(PostingList::len), Some(1000));
        assert_eq!(indexer.postings().get(b"999").map(PostingList::len), Some(1));
    }
}
