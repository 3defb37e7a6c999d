use crate::daat::{daat_and, daat_or};
use crate::eval::Evaluation;
use crate::index::Index;
use crate::taat::{taat_and_report, taat_or_report, TaatReport};
use serde::Serialize;

/// Everything computed for one query line, in evaluation order.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub terms: Vec<String>,
    pub taat_and: TaatReport,
    pub taat_or: TaatReport,
    pub daat_and: Evaluation,
    pub daat_or: Evaluation,
}

/// Run the four strategies one after another against a shared index.
pub fn run_query<T: AsRef<str>>(index: &Index, terms: &[T]) -> QueryReport {
    let span = tracing::debug_span!("query", terms = terms.len());
    let _enter = span.enter();

    let taat_and = taat_and_report(index, terms);
    let taat_or = taat_or_report(index, terms);
    let daat_and = daat_and(index, terms);
    let daat_or = daat_or(index, terms);
    QueryReport {
        terms: terms.iter().map(|t| t.as_ref().to_string()).collect(),
        taat_and,
        taat_or,
        daat_and,
        daat_or,
    }
}

pub fn run_session<T: AsRef<str>>(index: &Index, queries: &[Vec<T>]) -> Vec<QueryReport> {
    let reports: Vec<QueryReport> = queries.iter().map(|q| run_query(index, q)).collect();
    tracing::info!(queries = reports.len(), "query session complete");
    reports
}
