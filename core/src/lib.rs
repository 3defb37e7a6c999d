//! Boolean AND/OR query evaluation over an in-memory postings index, with
//! term-at-a-time and document-at-a-time strategies instrumented by a
//! comparison counter and elapsed time.

pub mod corpus;
pub mod daat;
pub mod error;
pub mod eval;
pub mod index;
pub mod optimizer;
pub mod session;
pub mod stats;
pub mod taat;

pub use error::{IndexError, Result};
pub use eval::{evaluate, Evaluation, Outcome, Strategy};
pub use index::{build_index, DocId, Frequency, Index, PostingLists};
pub use session::{run_query, run_session, QueryReport};
pub use taat::TaatReport;
