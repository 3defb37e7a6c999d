//! Term-at-a-time evaluation.
//!
//! Each term's frequency-ordered list is folded into a running answer with a
//! nested-loop scan, so correctness never depends on posting order.

use crate::eval::{Evaluation, Outcome};
use crate::index::{DocId, Index};
use crate::optimizer::{self, Plan};
use crate::stats::Meter;
use serde::Serialize;

/// The unoptimized pass and the dependent optimized pass of one TAAT query.
#[derive(Debug, Clone, Serialize)]
pub struct TaatReport {
    pub unoptimized: Evaluation,
    pub optimized: Evaluation,
    pub optimized_order: Vec<String>,
    pub optimizer_applied: bool,
}

/// Intersect term by term. Any missing term yields `TermNotFound`.
pub fn taat_and<T: AsRef<str>>(index: &Index, terms: &[T]) -> Evaluation {
    let mut meter = Meter::start();
    let outcome = match terms.split_first() {
        None => Outcome::Found(Default::default()),
        Some((first, rest)) => intersect_all(index, first.as_ref(), rest, &mut meter),
    };
    Evaluation::finish(outcome, &meter)
}

/// Union term by term. Missing terms contribute nothing; the result is
/// `TermNotFound` only when no term is in the index.
pub fn taat_or<T: AsRef<str>>(index: &Index, terms: &[T]) -> Evaluation {
    or_pass(index, terms).0
}

pub fn taat_and_report<T: AsRef<str>>(index: &Index, terms: &[T]) -> TaatReport {
    let unoptimized = taat_and(index, terms);
    let plan = optimizer::plan(index, terms, unoptimized.outcome.is_found());
    let optimized = taat_and(index, &plan.terms);
    report(unoptimized, optimized, plan)
}

pub fn taat_or_report<T: AsRef<str>>(index: &Index, terms: &[T]) -> TaatReport {
    let (unoptimized, valid) = or_pass(index, terms);
    let plan = optimizer::plan(index, terms, valid);
    let (optimized, _) = or_pass(index, &plan.terms);
    report(unoptimized, optimized, plan)
}

fn report(unoptimized: Evaluation, optimized: Evaluation, plan: Plan) -> TaatReport {
    tracing::debug!(
        before = unoptimized.comparisons,
        after = optimized.comparisons,
        applied = plan.applied,
        "taat optimization"
    );
    TaatReport { unoptimized, optimized, optimized_order: plan.terms, optimizer_applied: plan.applied }
}

fn intersect_all<T: AsRef<str>>(index: &Index, first: &str, rest: &[T], meter: &mut Meter) -> Outcome {
    let Some(first) = index.by_frequency(first) else {
        return Outcome::TermNotFound;
    };
    let mut answer: Vec<DocId> = first.to_vec();
    for term in rest {
        let Some(incoming) = index.by_frequency(term.as_ref()) else {
            return Outcome::TermNotFound;
        };
        answer = answer.into_iter().filter(|&doc| scan(incoming, doc, meter)).collect();
    }
    Outcome::Found(answer.into_iter().collect())
}

/// Returns the outcome and whether any of terms 2..n was present, which is
/// what makes the pass eligible for reordering.
fn or_pass<T: AsRef<str>>(index: &Index, terms: &[T]) -> (Evaluation, bool) {
    let mut meter = Meter::start();
    let mut answer: Vec<DocId> = Vec::new();
    let mut first_present = false;
    let mut rest_present = false;

    if let Some((first, rest)) = terms.split_first() {
        if let Some(list) = index.by_frequency(first.as_ref()) {
            answer.extend_from_slice(list);
            first_present = true;
        }
        for term in rest {
            let Some(incoming) = index.by_frequency(term.as_ref()) else {
                continue;
            };
            rest_present = true;
            for &doc in incoming {
                if !scan(&answer, doc, &mut meter) {
                    answer.push(doc);
                }
            }
        }
    }

    let outcome = if terms.is_empty() || first_present || rest_present {
        Outcome::Found(answer.into_iter().collect())
    } else {
        Outcome::TermNotFound
    };
    (Evaluation::finish(outcome, &meter), rest_present)
}

/// Linear search counting every element inspected, the match included.
fn scan(list: &[DocId], doc: DocId, meter: &mut Meter) -> bool {
    for &candidate in list {
        meter.tick();
        if candidate == doc {
            return true;
        }
    }
    false
}
