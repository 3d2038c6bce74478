use serde::Serialize;

use crate::model::AggregatedNode;

/// Classic squarify: rows grow while the worst cell stays at least as square.
pub const DEFAULT_RATIO: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Shrink by `padding` on every side. An axis that would go negative
    /// collapses to its midpoint instead.
    pub fn inset(self, padding: f64) -> Self {
        let (x0, x1) = shrink_axis(self.x0, self.x1, padding);
        let (y0, y1) = shrink_axis(self.y0, self.y1, padding);
        Self { x0, y0, x1, y1 }
    }

    /// Edge-inclusive containment.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

fn shrink_axis(lo: f64, hi: f64, padding: f64) -> (f64, f64) {
    let (a, b) = (lo + padding, hi - padding);
    if b < a {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (a, b)
    }
}

/// A positioned leaf tile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutLeaf {
    pub node: AggregatedNode,
    pub rect: Rect,
    pub depth: usize,
}

impl LayoutLeaf {
    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn category(&self) -> &str {
        self.node.category().unwrap_or_default()
    }

    pub fn value(&self) -> f64 {
        self.node.value().unwrap_or(self.node.aggregate_value)
    }
}

/// Canvas and tiling parameters for one layout request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreemapLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Target aspect ratio for rows; values below 1 are treated as 1.
    pub ratio: f64,
}

impl TreemapLayout {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
            ratio: DEFAULT_RATIO,
        }
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Tile `root` onto the canvas. Leaves come back depth-first with
    /// siblings in descending value order; zero-valued subtrees are skipped.
    pub fn layout(&self, root: &AggregatedNode) -> Vec<LayoutLeaf> {
        let width = non_negative(self.width);
        let height = non_negative(self.height);
        let padding = non_negative(self.padding);
        let ratio = if self.ratio.is_finite() {
            self.ratio.max(1.0)
        } else {
            DEFAULT_RATIO
        };
        if width != self.width || height != self.height || padding != self.padding {
            tracing::warn!(
                width = self.width,
                height = self.height,
                padding = self.padding,
                "degenerate treemap geometry, clamping to zero"
            );
        }

        let mut out = Vec::new();
        if root.aggregate_value > 0.0 {
            place(
                root,
                Rect::new(0.0, 0.0, width, height),
                0,
                padding,
                ratio,
                &mut out,
            );
        }
        tracing::debug!(
            leaves = out.len(),
            width,
            height,
            padding,
            "treemap laid out"
        );
        out
    }
}

/// Lay out `root` on a `width` x `height` canvas with `padding` around every
/// leaf, using the default row ratio.
pub fn layout(root: &AggregatedNode, width: f64, height: f64, padding: f64) -> Vec<LayoutLeaf> {
    TreemapLayout::new(width, height, padding).layout(root)
}

/// Children in tiling order: descending aggregate value, input order on ties.
pub fn sorted_children(node: &AggregatedNode) -> Vec<&AggregatedNode> {
    let mut children: Vec<&AggregatedNode> = node.children.iter().collect();
    children.sort_by(|a, b| {
        b.aggregate_value
            .total_cmp(&a.aggregate_value)
            .then_with(|| a.order.cmp(&b.order))
    });
    children
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn place(
    node: &AggregatedNode,
    rect: Rect,
    depth: usize,
    padding: f64,
    ratio: f64,
    out: &mut Vec<LayoutLeaf>,
) {
    if node.is_leaf() {
        out.push(LayoutLeaf {
            node: node.clone(),
            rect: rect.inset(padding),
            depth,
        });
        return;
    }

    let visible: Vec<&AggregatedNode> = sorted_children(node)
        .into_iter()
        .filter(|c| c.aggregate_value > 0.0)
        .collect();
    let values: Vec<f64> = visible.iter().map(|c| c.aggregate_value).collect();
    let cells = squarify(&values, rect, ratio);

    for (child, cell) in visible.into_iter().zip(cells) {
        place(child, cell, depth + 1, padding, ratio, out);
    }
}

/// Split `area` into one cell per value, areas proportional to the values.
/// `values` must be positive and already sorted in descending order.
fn squarify(values: &[f64], area: Rect, ratio: f64) -> Vec<Rect> {
    let n = values.len();
    let mut cells = Vec::with_capacity(n);
    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = area;
    let mut remaining: f64 = values.iter().sum();
    let mut start = 0;

    while start < n {
        let dx = x1 - x0;
        let dy = y1 - y0;
        if dx <= 0.0 || dy <= 0.0 || remaining <= 0.0 {
            let collapsed = Rect::new(x0, y0, x0.max(x1), y0.max(y1));
            cells.resize(n, collapsed);
            break;
        }

        // Grow the row while its worst aspect ratio does not get worse.
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut row_sum = values[start];
        let mut min_v = row_sum;
        let mut max_v = row_sum;
        let mut worst = worst_ratio(min_v, max_v, row_sum * row_sum * alpha);
        let mut end = start + 1;
        while end < n {
            let v = values[end];
            let sum = row_sum + v;
            let candidate = worst_ratio(min_v.min(v), max_v.max(v), sum * sum * alpha);
            if candidate > worst {
                break;
            }
            worst = candidate;
            row_sum = sum;
            min_v = min_v.min(v);
            max_v = max_v.max(v);
            end += 1;
        }

        let last = end == n;
        let row = &values[start..end];
        if dx < dy {
            // Row spans the full width and eats into the height.
            let y2 = if last { y1 } else { y0 + dy * row_sum / remaining };
            split_row(row, row_sum, Rect::new(x0, y0, x1, y2), true, &mut cells);
            y0 = y2;
        } else {
            let x2 = if last { x1 } else { x0 + dx * row_sum / remaining };
            split_row(row, row_sum, Rect::new(x0, y0, x2, y1), false, &mut cells);
            x0 = x2;
        }

        remaining -= row_sum;
        start = end;
    }

    cells
}

fn worst_ratio(min_v: f64, max_v: f64, beta: f64) -> f64 {
    (max_v / beta).max(beta / min_v)
}

fn split_row(row: &[f64], row_sum: f64, band: Rect, along_x: bool, cells: &mut Vec<Rect>) {
    let (lo, hi) = if along_x {
        (band.x0, band.x1)
    } else {
        (band.y0, band.y1)
    };
    let span = hi - lo;
    let mut cursor = lo;
    for (i, &v) in row.iter().enumerate() {
        let next = if i + 1 == row.len() {
            hi
        } else {
            cursor + span * v / row_sum
        };
        cells.push(if along_x {
            Rect::new(cursor, band.y0, next, band.y1)
        } else {
            Rect::new(band.x0, cursor, band.x1, next)
        });
        cursor = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build;
    use crate::model::Node;

    fn two_leaf_tree() -> AggregatedNode {
        build(&Node::group(
            "root",
            vec![Node::leaf("A", "Tech", 300.0), Node::leaf("B", "Art", 100.0)],
        ))
        .unwrap()
    }

    #[test]
    fn single_item_fills_canvas() {
        let cells = squarify(&[5.0], Rect::new(0.0, 0.0, 1920.0, 1080.0), 1.0);
        assert_eq!(cells, vec![Rect::new(0.0, 0.0, 1920.0, 1080.0)]);
    }

    #[test]
    fn squarify_preserves_area() {
        let values = [400.0, 300.0, 200.0, 100.0];
        let cells = squarify(&values, Rect::new(0.0, 0.0, 50.0, 20.0), 1.0);
        let total: f64 = cells.iter().map(Rect::area).sum();
        assert!((total - 1000.0).abs() < 1e-9);
        for (cell, v) in cells.iter().zip(values) {
            assert!((cell.area() - v).abs() < 1e-9, "{cell:?} vs {v}");
        }
    }

    #[test]
    fn six_squares_example_stays_close_to_square() {
        // The six-rectangle example from the squarified treemaps paper.
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let cells = squarify(&values, Rect::new(0.0, 0.0, 6.0, 4.0), 1.0);
        let worst = cells
            .iter()
            .map(|c| (c.width() / c.height()).max(c.height() / c.width()))
            .fold(0.0, f64::max);
        assert!(worst < 3.0, "worst aspect {worst}");
        assert_eq!(cells[0], Rect::new(0.0, 0.0, 3.0, 2.0));
        assert_eq!(cells[1], Rect::new(0.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn two_leaves_split_three_to_one() {
        let leaves = layout(&two_leaf_tree(), 400.0, 200.0, 1.0);
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].name(), "A");
        assert_eq!(leaves[0].rect, Rect::new(1.0, 1.0, 299.0, 199.0));
        assert_eq!(leaves[1].rect, Rect::new(301.0, 1.0, 399.0, 199.0));
        let ratio = leaves[0].rect.area() / leaves[1].rect.area();
        assert!((ratio - 3.0).abs() < 0.1, "ratio {ratio}");
    }

    #[test]
    fn zero_value_leaf_is_dropped() {
        let tree = build(&Node::group(
            "root",
            vec![
                Node::leaf("A", "Tech", 10.0),
                Node::leaf("Z", "Art", 0.0),
                Node::group("Empty", vec![]),
            ],
        ))
        .unwrap();
        let leaves = layout(&tree, 100.0, 100.0, 0.0);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].name(), "A");
        assert_eq!(leaves[0].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn ties_keep_input_order() {
        let tree = build(&Node::group(
            "root",
            vec![
                Node::leaf("first", "x", 5.0),
                Node::leaf("second", "x", 5.0),
                Node::leaf("big", "y", 20.0),
            ],
        ))
        .unwrap();
        let names: Vec<String> = layout(&tree, 90.0, 60.0, 0.0)
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["big", "first", "second"]);
    }

    #[test]
    fn nested_groups_stay_inside_their_cell() {
        let tree = build(&Node::group(
            "root",
            vec![
                Node::group(
                    "Games",
                    vec![Node::leaf("g1", "Games", 30.0), Node::leaf("g2", "Games", 10.0)],
                ),
                Node::leaf("solo", "Art", 40.0),
            ],
        ))
        .unwrap();
        let leaves = layout(&tree, 80.0, 40.0, 0.0);
        let names: Vec<&str> = leaves.iter().map(|l| l.name()).collect();
        // Equal aggregates: the group came first in the input.
        assert_eq!(names, vec!["g1", "g2", "solo"]);
        assert_eq!(leaves[0].depth, 2);
        assert_eq!(leaves[2].depth, 1);
        let games_area = leaves[0].rect.area() + leaves[1].rect.area();
        assert!((games_area - 1600.0).abs() < 1e-9);
        assert!(leaves[0].rect.x1 <= 40.0 + 1e-9 && leaves[1].rect.x1 <= 40.0 + 1e-9);
    }

    #[test]
    fn oversized_padding_collapses_instead_of_going_negative() {
        let leaves = layout(&two_leaf_tree(), 40.0, 20.0, 15.0);
        assert_eq!(leaves.len(), 2);
        for leaf in &leaves {
            assert!(leaf.rect.width() >= 0.0);
            assert!(leaf.rect.height() >= 0.0);
            assert_eq!(leaf.rect.area(), 0.0);
        }
    }

    #[test]
    fn degenerate_canvas_yields_zero_size_tiles() {
        let leaves = layout(&two_leaf_tree(), 0.0, 200.0, 0.0);
        assert_eq!(leaves.len(), 2);
        assert!(leaves.iter().all(|l| l.rect.area() == 0.0));

        let leaves = layout(&two_leaf_tree(), f64::NAN, -3.0, -1.0);
        assert_eq!(leaves.len(), 2);
        assert!(leaves.iter().all(|l| l.rect.area() == 0.0));
    }

    #[test]
    fn leaf_root_covers_the_canvas() {
        let tree = build(&Node::leaf("only", "Tech", 7.0)).unwrap();
        let leaves = layout(&tree, 10.0, 10.0, 1.0);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].rect, Rect::new(1.0, 1.0, 9.0, 9.0));
        assert_eq!(leaves[0].depth, 0);
    }

    #[test]
    fn ratio_below_one_behaves_like_default() {
        let tree = two_leaf_tree();
        let a = TreemapLayout::new(300.0, 120.0, 0.0).with_ratio(0.2).layout(&tree);
        let b = layout(&tree, 300.0, 120.0, 0.0);
        assert_eq!(a, b);
    }
}
