use crate::index::Index;

/// Term order chosen for the optimized pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub terms: Vec<String>,
    /// False when the optimizer was not triggered and `terms` is the caller's order.
    pub applied: bool,
}

/// Reorder terms by ascending postings length. The sort is stable, so equal
/// lengths keep the caller's order; absent terms sort first as empty lists.
pub fn optimize<T: AsRef<str>>(index: &Index, terms: &[T]) -> Vec<String> {
    let mut sized: Vec<(usize, &str)> = terms.iter().map(|t| (index.list_len(t.as_ref()), t.as_ref())).collect();
    sized.sort_by_key(|&(len, _)| len);
    sized.into_iter().map(|(_, t)| t.to_string()).collect()
}

/// Only reorder multi-term queries whose first pass produced a usable result.
pub fn plan<T: AsRef<str>>(index: &Index, terms: &[T], first_pass_valid: bool) -> Plan {
    if terms.len() >= 2 && first_pass_valid {
        Plan { terms: optimize(index, terms), applied: true }
    } else {
        Plan { terms: terms.iter().map(|t| t.as_ref().to_string()).collect(), applied: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;

    fn idx() -> Index {
        build_index(vec![
            ("big", vec![(1, 1), (2, 1), (3, 1), (4, 1)]),
            ("mid", vec![(1, 1), (2, 1)]),
            ("mid2", vec![(3, 1), (4, 1)]),
            ("one", vec![(2, 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn sorts_by_ascending_length() {
        assert_eq!(optimize(&idx(), &["big", "mid", "one"]), vec!["one", "mid", "big"]);
    }

    #[test]
    fn ties_keep_query_order() {
        assert_eq!(optimize(&idx(), &["mid2", "big", "mid"]), vec!["mid2", "mid", "big"]);
        assert_eq!(optimize(&idx(), &["mid", "mid2"]), vec!["mid", "mid2"]);
    }

    #[test]
    fn missing_terms_count_as_empty() {
        assert_eq!(optimize(&idx(), &["big", "nope"]), vec!["nope", "big"]);
    }

    #[test]
    fn plan_skips_trivial_or_failed_queries() {
        let i = idx();
        assert!(!plan(&i, &["big"], true).applied);
        let p = plan(&i, &["big", "one"], false);
        assert!(!p.applied);
        assert_eq!(p.terms, vec!["big", "one"]);
        let p = plan(&i, &["big", "one"], true);
        assert!(p.applied);
        assert_eq!(p.terms, vec!["one", "big"]);
    }
}
