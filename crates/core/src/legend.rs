use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::AggregatedNode;
use crate::treemap::{sorted_children, LayoutLeaf};

/// Whether categories carried only by zero-valued leaves show up in the legend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroValueCategories {
    #[default]
    Exclude,
    Include,
}

/// Distinct categories of `leaves`, in order of first appearance.
pub fn distinct_categories(leaves: &[LayoutLeaf]) -> Vec<String> {
    let mut seen = HashSet::new();
    leaves
        .iter()
        .map(LayoutLeaf::category)
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect()
}

/// Legend order for a laid-out tree. Tile categories always come first, so
/// including zero-valued categories never shifts a visible tile's color.
pub fn legend_categories(
    root: &AggregatedNode,
    leaves: &[LayoutLeaf],
    zero_values: ZeroValueCategories,
) -> Vec<String> {
    let mut categories = distinct_categories(leaves);
    if zero_values == ZeroValueCategories::Include {
        let mut seen: HashSet<String> = categories.iter().cloned().collect();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let Some(category) = node.category() {
                if seen.insert(category.to_string()) {
                    categories.push(category.to_string());
                }
            }
            stack.extend(sorted_children(node).into_iter().rev());
        }
    }
    categories
}
