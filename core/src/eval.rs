use crate::index::{DocId, Index};
use crate::stats::Meter;
use crate::{daat, taat};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    TaatAnd,
    TaatOr,
    DaatAnd,
    DaatOr,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Strategy::TaatAnd, Strategy::TaatOr, Strategy::DaatAnd, Strategy::DaatOr];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::TaatAnd => "termAtATimeQueryAnd",
            Strategy::TaatOr => "termAtATimeQueryOr",
            Strategy::DaatAnd => "docAtATimeQueryAnd",
            Strategy::DaatOr => "docAtATimeQueryOr",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Result of one evaluator call. `TermNotFound` is distinct from an empty
/// document set: it means a required query term has no index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Found(BTreeSet<DocId>),
    TermNotFound,
}

impl Outcome {
    pub fn documents(&self) -> Option<&BTreeSet<DocId>> {
        match self {
            Outcome::Found(docs) => Some(docs),
            Outcome::TermNotFound => None,
        }
    }

    pub fn is_found(&self) -> bool { matches!(self, Outcome::Found(_)) }

    /// Number of matching documents; zero when a term was missing.
    pub fn len(&self) -> usize { self.documents().map_or(0, BTreeSet::len) }

    /// True only for a found, empty result; `TermNotFound` is not empty.
    pub fn is_empty(&self) -> bool { self.documents().is_some_and(BTreeSet::is_empty) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub comparisons: u64,
    pub elapsed: Duration,
}

impl Evaluation {
    pub(crate) fn finish(outcome: Outcome, meter: &Meter) -> Self {
        Self { outcome, comparisons: meter.comparisons(), elapsed: meter.elapsed() }
    }
}

/// Run a single evaluator pass over `terms` in the given order.
pub fn evaluate<T: AsRef<str>>(index: &Index, strategy: Strategy, terms: &[T]) -> Evaluation {
    let eval = match strategy {
        Strategy::TaatAnd => taat::taat_and(index, terms),
        Strategy::TaatOr => taat::taat_or(index, terms),
        Strategy::DaatAnd => daat::daat_and(index, terms),
        Strategy::DaatOr => daat::daat_or(index, terms),
    };
    tracing::debug!(
        %strategy,
        terms = terms.len(),
        docs = eval.outcome.len(),
        found = eval.outcome.is_found(),
        comparisons = eval.comparisons,
        "evaluated query"
    );
    eval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;

    #[test]
    fn not_found_is_not_an_empty_set() {
        let empty = Outcome::Found(BTreeSet::new());
        assert_ne!(empty, Outcome::TermNotFound);
        assert!(empty.is_found());
        assert!(!Outcome::TermNotFound.is_found());
        assert_eq!(Outcome::TermNotFound.len(), 0);
        assert!(Outcome::TermNotFound.documents().is_none());
        assert!(empty.is_empty());
        assert!(!Outcome::TermNotFound.is_empty());
    }

    #[test]
    fn every_strategy_handles_empty_query() {
        let idx = build_index(vec![("a", vec![(1, 1)])]).unwrap();
        let none: [&str; 0] = [];
        for s in Strategy::ALL {
            let e = evaluate(&idx, s, &none);
            assert_eq!(e.outcome, Outcome::Found(BTreeSet::new()), "{s}");
            assert_eq!(e.comparisons, 0);
        }
    }

    #[test]
    fn serializes_outcomes() {
        assert_eq!(Strategy::DaatOr.to_string(), "docAtATimeQueryOr");
        assert_eq!(serde_json::to_string(&Strategy::TaatAnd).unwrap(), "\"taat_and\"");
        let found = Outcome::Found([3, 1].into_iter().collect());
        assert_eq!(serde_json::to_string(&found).unwrap(), r#"{"found":[1,3]}"#);
        assert_eq!(serde_json::to_string(&Outcome::TermNotFound).unwrap(), "\"term_not_found\"");
    }
}
