//! In-memory term to posting list map.

use quire_types::DocId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Where the indexer sends accepted tokens.
///
/// `term` is the token text exactly as the tokenizer produced it. Calls
/// arrive in document order, and within a document in token order.
pub trait PostingSink {
    /// Records one occurrence of `term` in `doc`.
    fn push(&mut self, term: &[u8], doc: DocId);

    /// Number of distinct terms seen so far.
    fn term_count(&self) -> usize;
}

/// One document entry in a posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc: DocId,
    /// Occurrences of the term in `doc`.
    pub frequency: u32,
}

/// Documents containing one term, in ascending `DocId` order.
///
/// Most terms occur in very few documents, so the first two entries are
/// stored inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    entries: SmallVec<[Posting; 2]>,
}

impl PostingList {
    fn single(doc: DocId) -> Self {
        let mut list = Self::default();
        list.record(doc);
        list
    }

    /// Counts an occurrence in `doc`, which must not precede the last
    /// recorded document.
    #[inline]
    fn record(&mut self, doc: DocId) {
        if let Some(last) = self.entries.last_mut() {
            if last.doc == doc {
                last.frequency = last.frequency.saturating_add(1);
                return;
            }
            debug_assert!(last.doc < doc, "documents out of order");
        }
        self.entries.push(Posting { doc, frequency: 1 });
    }

    /// Number of documents containing the term.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[Posting] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.entries.iter()
    }

    pub fn docs(&self) -> impl Iterator<Item = DocId> + '_ {
        self.entries.iter().map(|p| p.doc)
    }

    /// Frequency of the term in `doc`, or 0.
    pub fn frequency(&self, doc: DocId) -> u32 {
        self.entries
            .binary_search_by_key(&doc, |p| p.doc)
            .map_or(0, |i| self.entries[i].frequency)
    }

    /// Occurrences across all documents.
    pub fn total_frequency(&self) -> u64 {
        self.entries.iter().map(|p| u64::from(p.frequency)).sum()
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Hash map from token text to its posting list.
#[derive(Debug, Clone, Default)]
pub struct Postings {
    map: FxHashMap<Box<[u8]>, PostingList>,
}

impl Postings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(terms: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(terms, Default::default()),
        }
    }

    #[inline]
    pub fn get(&self, term: &[u8]) -> Option<&PostingList> {
        self.map.get(term)
    }

    /// Number of distinct terms.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Terms in hash order.
    pub fn terms(&self) -> impl Iterator<Item = (&[u8], &PostingList)> + '_ {
        self.map.iter().map(|(term, list)| (&**term, list))
    }

    /// Terms in byte order, for stable output.
    pub fn sorted_terms(&self) -> Vec<(&[u8], &PostingList)> {
        let mut terms: Vec<_> = self.terms().collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(b.0));
        terms
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl PostingSink for Postings {
    #[inline]
    fn push(&mut self, term: &[u8], doc: DocId) {
        // Only allocate the key the first time a term is seen.
        match self.map.get_mut(term) {
            Some(list) => list.record(doc),
            None => {
                self.map.insert(Box::from(term), PostingList::single(doc));
            }
        }
    }

    #[inline(always)]
    fn term_count(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_term_counts_frequency() {
        let mut postings = Postings::new();
        postings.push(b"rust", 0);
        postings.push(b"rust", 0);
        postings.push(b"rust", 2);

        let list = postings.get(b"rust").expect("term present");
        assert_eq!(
            list.as_slice(),
            [
                Posting { doc: 0, frequency: 2 },
                Posting { doc: 2, frequency: 1 },
            ]
        );
        assert_eq!(list.frequency(0), 2);
        assert_eq!(list.frequency(1), 0);
        assert_eq!(list.total_frequency(), 3);
        assert_eq!(list.docs().collect::<Vec<_>>(), [0, 2]);
    }

    #[test]
    fn distinct_terms() {
        let mut postings = Postings::with_capacity(4);
        assert!(postings.is_empty());
        let terms: [&[u8]; 4] = [b"b", b"a", b"c", b"a"];
        for term in terms {
            postings.push(term, 0);
        }
        assert_eq!(postings.len(), 3);
        assert_eq!(postings.term_count(), 3);
        assert!(postings.get(b"d").is_none());

        let sorted: Vec<&[u8]> = postings.sorted_terms().into_iter().map(|(t, _)| t).collect();
        let expected: [&[u8]; 3] = [b"a", b"b", b"c"];
        assert_eq!(sorted, expected);
    }

    #[test]
    fn binary_terms_are_keys() {
        let mut postings = Postings::new();
        postings.push(b"doc\xc3", 1);
        postings.push("αβγ".as_bytes(), 1);
        assert!(postings.get(b"doc\xc3").is_some());
        assert!(postings.get(b"doc").is_none());
        assert_eq!(postings.get("αβγ".as_bytes()).map(PostingList::len), Some(1));
    }

    #[test]
    fn clear_empties() {
        let mut postings = Postings::new();
        postings.push(b"x", 0);
        postings.clear();
        assert!(postings.is_empty());
        assert!(postings.get(b"x").is_none());
    }

    #[test]
    fn list_iterates_in_doc_order() {
        let mut postings = Postings::new();
        for doc in [1, 1, 4, 9] {
            postings.push(b"t", doc);
        }
        let list = postings.get(b"t").expect("term present");
        let docs: Vec<DocId> = list.into_iter().map(|p| p.doc).collect();
        assert_eq!(docs, [1, 4, 9]);
        assert_eq!(list.len(), 3);
    }
}
