//! Property-based invariants for the treemap layout.
//!
//! 1. The root aggregate equals the sum of all leaf values.
//! 2. Without padding, tile areas add up to the canvas area. With padding,
//!    every tile is its unpadded cell inset, and restoring the padding
//!    recovers the whole canvas.
//! 3. Every tile's area is its value times the same scale factor.
//! 4. Tile interiors never intersect, with or without padding.
//! 5. Tiles stay inside the canvas and never have negative extent.
//! 6. Exactly the positive leaves are laid out.
//! 7. Identical input gives identical output.
//! 8. Legend and tile colors agree.

use pledgemap_core::color::ColorAssigner;
use pledgemap_core::config::TreemapConfig;
use pledgemap_core::hierarchy::build;
use pledgemap_core::{layout, AggregatedNode, LayoutLeaf, Node, Treemap};
use proptest::prelude::*;

const CATEGORIES: [&str; 4] = ["Tech", "Art", "Games", "Food"];

// ── Helpers ─────────────────────────────────────────────────────────────

/// Groups of `(value, category index)` leaves.
fn groups_strategy() -> impl Strategy<Value = Vec<Vec<(u32, usize)>>> {
    prop::collection::vec(
        prop::collection::vec((0u32..1000, 0usize..CATEGORIES.len()), 1..6),
        1..6,
    )
}

fn canvas_strategy() -> impl Strategy<Value = (f64, f64)> {
    (10.0f64..1200.0, 10.0f64..900.0)
}

fn to_node(groups: &[Vec<(u32, usize)>]) -> Node {
    Node::group(
        "root",
        groups
            .iter()
            .enumerate()
            .map(|(g, leaves)| {
                Node::group(
                    format!("g{g}"),
                    leaves
                        .iter()
                        .enumerate()
                        .map(|(l, &(v, c))| Node::leaf(format!("g{g}-l{l}"), CATEGORIES[c], v as f64))
                        .collect(),
                )
            })
            .collect(),
    )
}

fn total(groups: &[Vec<(u32, usize)>]) -> f64 {
    groups
        .iter()
        .flatten()
        .map(|&(v, _)| v as f64)
        .sum()
}

fn aggregated(groups: &[Vec<(u32, usize)>]) -> AggregatedNode {
    build(&to_node(groups)).expect("generated trees are well formed")
}

fn interiors_overlap(a: &LayoutLeaf, b: &LayoutLeaf) -> bool {
    let w = a.rect.x1.min(b.rect.x1) - a.rect.x0.max(b.rect.x0);
    let h = a.rect.y1.min(b.rect.y1) - a.rect.y0.max(b.rect.y0);
    w > 1e-7 && h > 1e-7
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Aggregation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn root_aggregate_is_leaf_sum(groups in groups_strategy()) {
        let tree = aggregated(&groups);
        prop_assert!((tree.aggregate_value - total(&groups)).abs() < 1e-6);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Coverage and proportionality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tiles_cover_the_canvas(groups in groups_strategy(), (w, h) in canvas_strategy()) {
        let sum = total(&groups);
        prop_assume!(sum > 0.0);
        let leaves = layout(&aggregated(&groups), w, h, 0.0);
        let covered: f64 = leaves.iter().map(|l| l.rect.area()).sum();
        prop_assert!(
            (covered - w * h).abs() <= 1e-6 * w * h,
            "covered {} of {}", covered, w * h
        );
    }

    #[test]
    fn padded_tiles_are_inset_cells(
        groups in groups_strategy(),
        (w, h) in canvas_strategy(),
        padding in 0.0f64..3.0,
    ) {
        let tree = aggregated(&groups);
        let bare = layout(&tree, w, h, 0.0);
        let padded = layout(&tree, w, h, padding);
        prop_assert_eq!(bare.len(), padded.len());
        for (cell, tile) in bare.iter().zip(&padded) {
            prop_assert_eq!(cell.name(), tile.name());
            prop_assert_eq!(cell.rect.inset(padding), tile.rect);
        }
    }

    #[test]
    fn padded_tiles_cover_the_canvas_once_padding_is_restored(
        groups in groups_strategy(),
        (w, h) in canvas_strategy(),
        padding in 0.0f64..3.0,
    ) {
        prop_assume!(total(&groups) > 0.0);
        let tree = aggregated(&groups);
        let bare = layout(&tree, w, h, 0.0);
        let padded = layout(&tree, w, h, padding);
        // A collapsed axis has lost its extent, so take it from the bare cell.
        let restore = |inner: f64, cell: f64| if inner > 0.0 { inner + 2.0 * padding } else { cell };
        let covered: f64 = bare
            .iter()
            .zip(&padded)
            .map(|(cell, tile)| {
                restore(tile.rect.width(), cell.rect.width())
                    * restore(tile.rect.height(), cell.rect.height())
            })
            .sum();
        prop_assert!(
            (covered - w * h).abs() <= 1e-6 * w * h,
            "restored {} of {}", covered, w * h
        );
    }

    #[test]
    fn area_is_proportional_to_value(groups in groups_strategy(), (w, h) in canvas_strategy()) {
        let sum = total(&groups);
        prop_assume!(sum > 0.0);
        let scale = w * h / sum;
        for leaf in layout(&aggregated(&groups), w, h, 0.0) {
            let expected = leaf.value() * scale;
            prop_assert!(
                (leaf.rect.area() - expected).abs() <= 1e-6 * w * h,
                "{}: area {} expected {}", leaf.name(), leaf.rect.area(), expected
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–6. Geometry sanity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tiles_never_overlap(
        groups in groups_strategy(),
        (w, h) in canvas_strategy(),
        padding in 0.0f64..3.0,
    ) {
        let leaves = layout(&aggregated(&groups), w, h, padding);
        for (i, a) in leaves.iter().enumerate() {
            for b in &leaves[i + 1..] {
                prop_assert!(!interiors_overlap(a, b), "{:?} overlaps {:?}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn tiles_stay_on_canvas(
        groups in groups_strategy(),
        (w, h) in canvas_strategy(),
        padding in 0.0f64..3.0,
    ) {
        for leaf in layout(&aggregated(&groups), w, h, padding) {
            let r = leaf.rect;
            prop_assert!(r.x1 >= r.x0 && r.y1 >= r.y0, "{:?}", r);
            prop_assert!(r.x0 >= -1e-9 && r.y0 >= -1e-9, "{:?}", r);
            prop_assert!(r.x1 <= w + 1e-9 && r.y1 <= h + 1e-9, "{:?}", r);
        }
    }

    #[test]
    fn only_positive_leaves_are_laid_out(groups in groups_strategy(), (w, h) in canvas_strategy()) {
        let positive = groups.iter().flatten().filter(|&&(v, _)| v > 0).count();
        let leaves = layout(&aggregated(&groups), w, h, 1.0);
        prop_assert_eq!(leaves.len(), positive);
        prop_assert!(leaves.iter().all(|l| l.value() > 0.0));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7–8. Determinism and color agreement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic(groups in groups_strategy(), (w, h) in canvas_strategy()) {
        let tree = aggregated(&groups);
        let first = layout(&tree, w, h, 1.0);
        let second = layout(&aggregated(&groups), w, h, 1.0);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn legend_and_tile_colors_agree(groups in groups_strategy(), (w, h) in canvas_strategy()) {
        let config = TreemapConfig { width: w, height: h, ..TreemapConfig::default() };
        let mut colors = ColorAssigner::default();
        let map = Treemap::from_tree(&aggregated(&groups), &config, &mut colors);
        let again = Treemap::from_tree(&aggregated(&groups), &config, &mut colors);
        for leaf in &map.leaves {
            let (_, legend_color) = map
                .legend_entries()
                .find(|(c, _)| *c == leaf.category())
                .expect("every tile category is in the legend");
            prop_assert_eq!(map.color_of(leaf), legend_color);
        }
        prop_assert_eq!(&map.colors, &again.colors);
    }
}
