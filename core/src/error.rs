use crate::index::DocId;
use thiserror::Error;

/// Failures while turning a corpus into an [`Index`](crate::Index).
///
/// Every variant is fatal for the build: no partial index is returned.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The line does not have the `term\c<df>\m[...]` shape.
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: &'static str },

    /// A `doc/freq` entry whose numeric fields do not parse.
    #[error("line {line}: malformed posting {entry:?} for term {term:?}")]
    MalformedPosting { line: usize, term: String, entry: String },

    #[error("term {0:?} appears more than once")]
    DuplicateTerm(String),

    #[error("doc {doc_id} appears more than once in postings of {term:?}")]
    DuplicateDocument { term: String, doc_id: DocId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
