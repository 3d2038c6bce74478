use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::treemap::LayoutLeaf;

/// One flag per leaf: does its name or category match `query`?
/// A blank query matches everything.
pub fn match_leaves(leaves: &[LayoutLeaf], query: &str) -> Vec<bool> {
    let query = query.trim();
    if query.is_empty() {
        return vec![true; leaves.len()];
    }
    let m = SkimMatcherV2::default().ignore_case();
    leaves
        .iter()
        .map(|leaf| {
            m.fuzzy_match(leaf.name(), query).is_some()
                || m.fuzzy_match(leaf.category(), query).is_some()
        })
        .collect()
}
