//! Readers for the postings corpus and the query file.
//!
//! A corpus line looks like `term\c<df>\m[<doc>/<freq>, <doc>/<freq>]`; a query
//! line is a whitespace separated list of terms.

use crate::error::{IndexError, Result};
use crate::index::{build_index, DocId, Frequency, Index};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;

lazy_static! {
    static ref LINE_RE: Regex =
        Regex::new(r"^(?P<term>.*?)\\c(?P<df>.*?)\\m\[(?P<postings>.*)\]$").expect("valid regex");
}

pub type RawPostings = (String, Vec<(DocId, Frequency)>);

/// Parse one corpus line. Blank lines yield `None`; `line` is 1-based and only
/// used for error reporting.
pub fn parse_corpus_line(line: usize, text: &str) -> Result<Option<RawPostings>> {
    let text = text.trim_end();
    if text.trim().is_empty() {
        return Ok(None);
    }
    let caps = LINE_RE
        .captures(text)
        .ok_or(IndexError::MalformedLine { line, reason: "expected term\\c<df>\\m[...]" })?;

    let term = caps["term"].to_string();
    if term.is_empty() {
        return Err(IndexError::MalformedLine { line, reason: "empty term" });
    }
    let df: usize = caps["df"]
        .trim()
        .parse()
        .map_err(|_| IndexError::MalformedLine { line, reason: "document frequency is not a number" })?;

    let mut pairs = Vec::new();
    for entry in caps["postings"].split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let malformed = || IndexError::MalformedPosting { line, term: term.clone(), entry: entry.to_string() };
        let (doc, freq) = entry.split_once('/').ok_or_else(malformed)?;
        let doc: DocId = doc.trim().parse().map_err(|_| malformed())?;
        let freq: Frequency = freq.trim().parse().map_err(|_| malformed())?;
        pairs.push((doc, freq));
    }

    if df != pairs.len() {
        tracing::warn!(line, %term, declared = df, actual = pairs.len(), "document frequency mismatch");
    }
    Ok(Some((term, pairs)))
}

/// Parse a whole corpus. The first malformed line aborts the read.
pub fn read_corpus<R: BufRead>(reader: R) -> Result<Vec<RawPostings>> {
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(raw) = parse_corpus_line(i + 1, &line)? {
            out.push(raw);
        }
    }
    Ok(out)
}

impl Index {
    /// Read and build in one step; any malformed entry rejects the build.
    pub fn from_corpus<R: BufRead>(reader: R) -> Result<Index> {
        let raw = read_corpus(reader)?;
        let terms = raw.len();
        let index = build_index(raw)?;
        tracing::info!(terms, num_terms = index.num_terms(), "loaded corpus");
        Ok(index)
    }
}

pub fn parse_query_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(|s| s.to_string()).collect()
}

/// One query per non-blank line.
pub fn read_queries<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut queries = Vec::new();
    for line in reader.lines() {
        let terms = parse_query_line(&line?);
        if !terms.is_empty() {
            queries.push(terms);
        }
    }
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corpus_line() {
        let (term, pairs) = parse_corpus_line(1, r"apple\c3\m[1/5, 2/3, 3/9]").unwrap().unwrap();
        assert_eq!(term, "apple");
        assert_eq!(pairs, vec![(1, 5), (2, 3), (3, 9)]);
    }

    #[test]
    fn blank_line_is_skipped() {
        assert!(parse_corpus_line(4, "   ").unwrap().is_none());
    }

    #[test]
    fn empty_postings_parse_to_no_pairs() {
        let (term, pairs) = parse_corpus_line(1, r"ghost\c0\m[]").unwrap().unwrap();
        assert_eq!(term, "ghost");
        assert!(pairs.is_empty());
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = parse_corpus_line(7, r"pear\c2\m[1/2, x/3]").unwrap_err();
        match err {
            IndexError::MalformedPosting { line, term, entry } => {
                assert_eq!(line, 7);
                assert_eq!(term, "pear");
                assert_eq!(entry, "x/3");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse_corpus_line(1, r"pear\c1\m[12]"),
            Err(IndexError::MalformedPosting { .. })
        ));
    }

    #[test]
    fn rejects_missing_markers() {
        assert!(matches!(parse_corpus_line(2, "pear 1/2"), Err(IndexError::MalformedLine { line: 2, .. })));
        assert!(matches!(parse_corpus_line(2, r"pear\cx\m[1/2]"), Err(IndexError::MalformedLine { .. })));
    }

    #[test]
    fn malformed_line_rejects_whole_corpus() {
        let text = "a\\c1\\m[1/1]\nb\\c1\\m[2/oops]\nc\\c1\\m[3/1]\n";
        let err = Index::from_corpus(text.as_bytes()).unwrap_err();
        assert!(matches!(err, IndexError::MalformedPosting { line: 2, .. }));
    }

    #[test]
    fn blank_lines_are_not_terms() {
        let text = "a\\c1\\m[1/1]\n\n   \nghost\\c0\\m[]\nb\\c2\\m[1/1, 2/4]\n";
        assert_eq!(read_corpus(text.as_bytes()).unwrap().len(), 3);
        let idx = Index::from_corpus(text.as_bytes()).unwrap();
        assert_eq!(idx.num_terms(), 2);
        assert!(!idx.contains("ghost"));
    }

    #[test]
    fn reads_queries() {
        let text = "a b\n\n  c   d e \n";
        let qs = read_queries(text.as_bytes()).unwrap();
        assert_eq!(qs, vec![vec!["a", "b"], vec!["c", "d", "e"]]);
    }
}
