//! Document-at-a-time evaluation over the doc-id ordered lists.
//!
//! One forward cursor per query term; the merge is only correct because every
//! `by_doc_id` list is strictly increasing.

use crate::eval::{Evaluation, Outcome};
use crate::index::{DocId, Index};
use crate::stats::Meter;
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    list: &'a [DocId],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(list: &'a [DocId]) -> Self { Self { list, pos: 0 } }

    fn current(&self) -> Option<DocId> { self.list.get(self.pos).copied() }

    fn advance(&mut self) { self.pos += 1; }

    fn remaining(&self) -> &'a [DocId] { self.list.get(self.pos..).unwrap_or(&[]) }
}

/// Multi-way merge intersection. Every term must be indexed, otherwise the
/// result is `TermNotFound` before any cursor moves.
pub fn daat_and<T: AsRef<str>>(index: &Index, terms: &[T]) -> Evaluation {
    let mut meter = Meter::start();
    let cursors: Option<Vec<Cursor<'_>>> =
        terms.iter().map(|t| index.by_doc_id(t.as_ref()).map(Cursor::new)).collect();
    let outcome = match cursors {
        Some(cursors) => Outcome::Found(intersect(cursors, &mut meter)),
        None => Outcome::TermNotFound,
    };
    Evaluation::finish(outcome, &meter)
}

/// Multi-way merge union. Missing terms act as exhausted cursors; the result
/// is `TermNotFound` only if none of the terms is indexed.
pub fn daat_or<T: AsRef<str>>(index: &Index, terms: &[T]) -> Evaluation {
    let mut meter = Meter::start();
    let lists: Vec<Option<&[DocId]>> = terms.iter().map(|t| index.by_doc_id(t.as_ref())).collect();
    let outcome = if !lists.is_empty() && lists.iter().all(Option::is_none) {
        Outcome::TermNotFound
    } else {
        let cursors = lists.into_iter().map(|l| Cursor::new(l.unwrap_or(&[]))).collect();
        Outcome::Found(union(cursors, &mut meter))
    };
    Evaluation::finish(outcome, &meter)
}

fn intersect(mut cursors: Vec<Cursor<'_>>, meter: &mut Meter) -> BTreeSet<DocId> {
    let mut answer = BTreeSet::new();
    if cursors.is_empty() {
        return answer;
    }
    let mut row: Vec<DocId> = Vec::with_capacity(cursors.len());
    loop {
        row.clear();
        for cursor in &cursors {
            match cursor.current() {
                Some(doc) => row.push(doc),
                None => return answer,
            }
        }
        match mismatch_min(&row, meter) {
            None => {
                answer.insert(row[0]);
                cursors.iter_mut().for_each(Cursor::advance);
            }
            Some(min) => cursors[min].advance(),
        }
    }
}

/// Position of the smallest value, or `None` when the whole row is equal.
///
/// The equality pass counts every check up to and including the first
/// mismatch. Only a mismatching row pays for the min scan, n-1 more.
fn mismatch_min(row: &[DocId], meter: &mut Meter) -> Option<usize> {
    let head = row[0];
    let all_equal = row[1..].iter().all(|&doc| {
        meter.tick();
        doc == head
    });
    if all_equal {
        return None;
    }
    let mut min = 0;
    for (i, &doc) in row.iter().enumerate().skip(1) {
        meter.tick();
        if doc < row[min] {
            min = i;
        }
    }
    Some(min)
}

fn union(mut cursors: Vec<Cursor<'_>>, meter: &mut Meter) -> BTreeSet<DocId> {
    let mut answer = BTreeSet::new();
    let mut live: Vec<(usize, DocId)> = Vec::with_capacity(cursors.len());
    let mut tied: Vec<usize> = Vec::with_capacity(cursors.len());
    loop {
        live.clear();
        live.extend(cursors.iter().enumerate().filter_map(|(i, c)| c.current().map(|doc| (i, doc))));
        let Some((&(first, mut min), rest)) = live.split_first() else {
            return answer;
        };
        if rest.is_empty() {
            // last source standing, nothing left to compare against
            answer.extend(cursors[first].remaining());
            return answer;
        }

        tied.clear();
        tied.push(first);
        for &(i, doc) in rest {
            meter.tick();
            match doc.cmp(&min) {
                Ordering::Less => {
                    min = doc;
                    tied.clear();
                    tied.push(i);
                }
                Ordering::Equal => tied.push(i),
                Ordering::Greater => {}
            }
        }
        answer.insert(min);
        for &i in &tied {
            cursors[i].advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;

    fn docs(ids: &[DocId]) -> Outcome { Outcome::Found(ids.iter().copied().collect()) }

    fn sample() -> Index {
        build_index(vec![
            ("a", vec![(1, 5), (2, 3), (3, 9)]),
            ("b", vec![(2, 1), (3, 4), (4, 2)]),
            ("c", vec![(3, 1), (7, 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn and_pays_min_scan_only_on_mismatch() {
        // rows: (1,2) 1+1 advance a, (2,2) 1 emit, (3,3) 1 emit, then a is exhausted
        let e = daat_and(&sample(), &["a", "b"]);
        assert_eq!(e.outcome, docs(&[2, 3]));
        assert_eq!(e.comparisons, 4);
    }

    #[test]
    fn and_three_way() {
        // equality pass stops at the first mismatch, min scan adds 2:
        // (1,2,3) 1+2, (2,2,3) 2+2, (3,2,3) 1+2, (3,3,3) 2 emit, then a is exhausted
        let e = daat_and(&sample(), &["a", "b", "c"]);
        assert_eq!(e.outcome, docs(&[3]));
        assert_eq!(e.comparisons, 12);
    }

    #[test]
    fn and_missing_term_is_not_found() {
        let e = daat_and(&sample(), &["a", "missing"]);
        assert_eq!(e.outcome, Outcome::TermNotFound);
        assert_eq!(e.comparisons, 0);
    }

    #[test]
    fn or_advances_all_tied_cursors() {
        // rows: (1,2) (2,2) (3,3), then only b remains and 4 is drained
        let e = daat_or(&sample(), &["a", "b"]);
        assert_eq!(e.outcome, docs(&[1, 2, 3, 4]));
        assert_eq!(e.comparisons, 3);
    }

    #[test]
    fn or_three_way() {
        // rows: (1,2,3) (2,2,3) (3,3,3) at 2 each, (4,7) at 1, then 7 is drained
        let e = daat_or(&sample(), &["a", "b", "c"]);
        assert_eq!(e.outcome, docs(&[1, 2, 3, 4, 7]));
        assert_eq!(e.comparisons, 7);
    }

    #[test]
    fn or_drains_when_two_cursors_end_together() {
        let idx = build_index(vec![
            ("x", vec![(1, 1), (5, 1)]),
            ("y", vec![(1, 1), (5, 1)]),
            ("z", vec![(2, 1), (5, 1), (9, 1)]),
        ])
        .unwrap();
        // rows: (1,1,2) (5,5,2) (5,5,5) at 2 each; x and y run out on the
        // same step and z alone drains 9
        let e = daat_or(&idx, &["x", "y", "z"]);
        assert_eq!(e.outcome, docs(&[1, 2, 5, 9]));
        assert_eq!(e.comparisons, 6);
    }

    #[test]
    fn or_skips_missing_terms() {
        let e = daat_or(&sample(), &["a", "missing"]);
        assert_eq!(e.outcome, docs(&[1, 2, 3]));
        assert_eq!(e.comparisons, 0);
        assert_eq!(daat_or(&sample(), &["x", "y"]).outcome, Outcome::TermNotFound);
    }

    #[test]
    fn single_term_is_its_postings() {
        let idx = sample();
        for e in [daat_and(&idx, &["c"]), daat_or(&idx, &["c"])] {
            assert_eq!(e.outcome, docs(&[3, 7]));
            assert_eq!(e.comparisons, 0);
        }
    }

    #[test]
    fn repeated_term() {
        let idx = sample();
        assert_eq!(daat_and(&idx, &["c", "c"]).outcome, docs(&[3, 7]));
        assert_eq!(daat_or(&idx, &["c", "c"]).outcome, docs(&[3, 7]));
    }
}
