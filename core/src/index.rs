use crate::error::{IndexError, Result};
use std::collections::HashMap;

pub type DocId = u32;
pub type Frequency = u32;

/// Both orderings of one term's postings. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingLists {
    /// Strictly increasing doc ids; drives the DAAT merge.
    pub by_doc_id: Vec<DocId>,
    /// Doc ids by descending term frequency, ties in input order; drives TAAT.
    pub by_frequency: Vec<DocId>,
}

impl PostingLists {
    pub fn len(&self) -> usize { self.by_doc_id.len() }
    pub fn is_empty(&self) -> bool { self.by_doc_id.is_empty() }
}

#[derive(Debug, Default, Clone)]
pub struct Index {
    terms: HashMap<String, PostingLists>,
}

impl Index {
    pub fn postings(&self, term: &str) -> Option<&PostingLists> { self.terms.get(term) }

    pub fn by_doc_id(&self, term: &str) -> Option<&[DocId]> {
        self.terms.get(term).map(|p| p.by_doc_id.as_slice())
    }

    pub fn by_frequency(&self, term: &str) -> Option<&[DocId]> {
        self.terms.get(term).map(|p| p.by_frequency.as_slice())
    }

    /// Postings length used by the optimizer; absent terms count as empty.
    pub fn list_len(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, PostingLists::len)
    }

    pub fn contains(&self, term: &str) -> bool { self.terms.contains_key(term) }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &PostingLists)> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// The `k` terms with the longest postings lists, ties broken by term.
    pub fn top_k(&self, k: usize) -> Vec<(&str, usize)> {
        let mut sized: Vec<(&str, usize)> = self.terms().map(|(t, p)| (t, p.len())).collect();
        sized.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sized.truncate(k);
        sized
    }
}

/// Build both orderings for every term.
///
/// Terms with no postings are left out of the index so lookups report them as
/// missing. A repeated term or a doc id repeated within one term rejects the
/// whole build.
pub fn build_index<I, T>(raw: I) -> Result<Index>
where
    I: IntoIterator<Item = (T, Vec<(DocId, Frequency)>)>,
    T: Into<String>,
{
    let mut terms: HashMap<String, PostingLists> = HashMap::new();
    let mut skipped = 0usize;
    for (term, pairs) in raw {
        let term = term.into();
        if terms.contains_key(&term) {
            return Err(IndexError::DuplicateTerm(term));
        }
        if pairs.is_empty() {
            tracing::debug!(%term, "skipping term without postings");
            skipped += 1;
            continue;
        }
        let lists = sort_postings(&term, pairs)?;
        terms.insert(term, lists);
    }
    tracing::debug!(num_terms = terms.len(), skipped, "index built");
    Ok(Index { terms })
}

fn sort_postings(term: &str, mut pairs: Vec<(DocId, Frequency)>) -> Result<PostingLists> {
    let mut by_doc_id: Vec<DocId> = pairs.iter().map(|&(doc, _)| doc).collect();
    by_doc_id.sort_unstable();
    if let Some(w) = by_doc_id.windows(2).find(|w| w[0] == w[1]) {
        return Err(IndexError::DuplicateDocument { term: term.to_string(), doc_id: w[0] });
    }

    // sort_by is stable: equal frequencies keep their input order
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    let by_frequency = pairs.into_iter().map(|(doc, _)| doc).collect();

    Ok(PostingLists { by_doc_id, by_frequency })
}
