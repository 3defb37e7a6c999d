use anyhow::{Context, Result};
use boolq_core::corpus::read_queries;
use boolq_core::{run_session, Index};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub mod report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

pub fn load_index(corpus: &Path) -> Result<Index> {
    let file = File::open(corpus).with_context(|| format!("opening corpus {}", corpus.display()))?;
    let index = Index::from_corpus(BufReader::new(file))
        .with_context(|| format!("building index from {}", corpus.display()))?;
    Ok(index)
}

/// Build the index, evaluate every query line and write the result blocks.
pub fn run(corpus: &Path, queries: &Path, output: &Path, top_k: usize, format: Format) -> Result<()> {
    let index = load_index(corpus)?;
    let file = File::open(queries).with_context(|| format!("opening queries {}", queries.display()))?;
    let queries = read_queries(BufReader::new(file))?;
    let reports = run_session(&index, &queries);

    let mut out = BufWriter::new(File::create(output)?);
    match format {
        Format::Text => report::write_text(&mut out, &index, top_k, &reports)?,
        Format::Json => report::write_json(&mut out, &index, top_k, &reports)?,
    }
    out.flush()?;
    tracing::info!(output = %output.display(), queries = reports.len(), "results written");
    Ok(())
}
