use boolq_core::{DocId, Evaluation, Index, Outcome, QueryReport, Strategy, TaatReport};
use serde::Serialize;
use std::io::{self, Write};

fn join<I, D>(items: I) -> String
where
    I: IntoIterator<Item = D>,
    D: ToString,
{
    items.into_iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
}

fn result_line(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Found(docs) => join(docs),
        Outcome::TermNotFound => "term not found".to_string(),
    }
}

/// Text blocks: the top-k listing, then per query the postings of every term
/// and one block per strategy.
pub fn write_text<W: Write>(out: &mut W, index: &Index, top_k: usize, reports: &[QueryReport]) -> io::Result<()> {
    writeln!(out, "FUNCTION: getTopK {top_k}")?;
    writeln!(out, "Result: {}", join(index.top_k(top_k).into_iter().map(|(term, _)| term)))?;
    for report in reports {
        for term in &report.terms {
            write_postings(out, index, term)?;
        }
        let line = report.terms.join(", ");
        write_taat(out, Strategy::TaatAnd, &line, &report.taat_and)?;
        write_taat(out, Strategy::TaatOr, &line, &report.taat_or)?;
        write_daat(out, Strategy::DaatAnd, &line, &report.daat_and)?;
        write_daat(out, Strategy::DaatOr, &line, &report.daat_or)?;
    }
    Ok(())
}

fn write_postings<W: Write>(out: &mut W, index: &Index, term: &str) -> io::Result<()> {
    writeln!(out, "FUNCTION: getPostings {term}")?;
    match index.postings(term) {
        Some(lists) => {
            writeln!(out, "Ordered by doc IDs: {}", join(&lists.by_doc_id))?;
            writeln!(out, "Ordered by TF: {}", join(&lists.by_frequency))
        }
        None => writeln!(out, "term not found"),
    }
}

fn write_summary<W: Write>(out: &mut W, strategy: Strategy, line: &str, eval: &Evaluation) -> io::Result<()> {
    writeln!(out, "FUNCTION: {strategy} {line}")?;
    writeln!(out, "{} documents are found", eval.outcome.len())?;
    writeln!(out, "{} comparisons are made", eval.comparisons)?;
    writeln!(out, "{:.6} seconds are used", eval.elapsed.as_secs_f64())
}

fn write_taat<W: Write>(out: &mut W, strategy: Strategy, line: &str, report: &TaatReport) -> io::Result<()> {
    write_summary(out, strategy, line, &report.unoptimized)?;
    writeln!(out, "{} comparisons are made with optimization", report.optimized.comparisons)?;
    writeln!(out, "Result: {}", result_line(&report.optimized.outcome))
}

fn write_daat<W: Write>(out: &mut W, strategy: Strategy, line: &str, eval: &Evaluation) -> io::Result<()> {
    write_summary(out, strategy, line, eval)?;
    writeln!(out, "Result: {}", result_line(&eval.outcome))
}

#[derive(Serialize)]
struct TopKRecord<'a> {
    top_k: Vec<&'a str>,
}

#[derive(Serialize)]
struct QueryRecord<'a> {
    query: &'a [String],
    results: Vec<StrategyRecord>,
}

#[derive(Serialize)]
struct StrategyRecord {
    strategy: Strategy,
    term_not_found: bool,
    total_hits: usize,
    documents: Vec<DocId>,
    comparisons: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimized_comparisons: Option<u64>,
    took_s: f64,
}

impl StrategyRecord {
    fn new(strategy: Strategy, eval: &Evaluation, optimized: Option<&Evaluation>) -> Self {
        let shown = optimized.unwrap_or(eval);
        Self {
            strategy,
            term_not_found: !shown.outcome.is_found(),
            total_hits: eval.outcome.len(),
            documents: shown.outcome.documents().map(|d| d.iter().copied().collect()).unwrap_or_default(),
            comparisons: eval.comparisons,
            optimized_comparisons: optimized.map(|o| o.comparisons),
            took_s: eval.elapsed.as_secs_f64(),
        }
    }
}

/// JSON Lines: a top-k record followed by one record per query.
pub fn write_json<W: Write>(out: &mut W, index: &Index, top_k: usize, reports: &[QueryReport]) -> io::Result<()> {
    let top = TopKRecord { top_k: index.top_k(top_k).into_iter().map(|(t, _)| t).collect() };
    serde_json::to_writer(&mut *out, &top)?;
    out.write_all(b"\n")?;
    for report in reports {
        let rec = QueryRecord {
            query: &report.terms,
            results: vec![
                StrategyRecord::new(Strategy::TaatAnd, &report.taat_and.unoptimized, Some(&report.taat_and.optimized)),
                StrategyRecord::new(Strategy::TaatOr, &report.taat_or.unoptimized, Some(&report.taat_or.optimized)),
                StrategyRecord::new(Strategy::DaatAnd, &report.daat_and, None),
                StrategyRecord::new(Strategy::DaatOr, &report.daat_or, None),
            ],
        };
        serde_json::to_writer(&mut *out, &rec)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
