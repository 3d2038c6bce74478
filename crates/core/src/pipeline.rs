use crate::color::{Color, ColorAssigner, ColorMap};
use crate::config::TreemapConfig;
use crate::error::MalformedTreeError;
use crate::hierarchy;
use crate::interaction::{hit_payload, leaf_at, TooltipPayload};
use crate::legend::legend_categories;
use crate::model::{AggregatedNode, Node};
use crate::treemap::LayoutLeaf;

/// The result of one layout request: tiles, legend, and the colors both use.
#[derive(Clone, Debug)]
pub struct Treemap {
    pub width: f64,
    pub height: f64,
    pub total: f64,
    pub leaves: Vec<LayoutLeaf>,
    pub legend: Vec<String>,
    pub colors: ColorMap,
}

impl Treemap {
    /// Validate, aggregate and lay out `root` in one go.
    pub fn compute(root: &Node, config: &TreemapConfig) -> Result<Self, MalformedTreeError> {
        let tree = hierarchy::build(root)?;
        let mut colors = ColorAssigner::new(config.palette.clone());
        Ok(Self::from_tree(&tree, config, &mut colors))
    }

    /// Lay out an already aggregated tree, reusing `colors` across requests.
    pub fn from_tree(tree: &AggregatedNode, config: &TreemapConfig, colors: &mut ColorAssigner) -> Self {
        let leaves = config.layout().layout(tree);
        let legend = legend_categories(tree, &leaves, config.legend.zero_value_categories);
        let colors = colors.color_map(&legend).clone();
        tracing::info!(
            root = %tree.name,
            tiles = leaves.len(),
            categories = legend.len(),
            "treemap ready"
        );
        Self {
            width: config.width,
            height: config.height,
            total: tree.aggregate_value,
            leaves,
            legend,
            colors,
        }
    }

    pub fn color_of(&self, leaf: &LayoutLeaf) -> Color {
        self.colors.color_for(leaf.category())
    }

    /// `(category, color)` in legend order.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.legend
            .iter()
            .map(move |c| (c.as_str(), self.colors.color_for(c)))
    }

    /// Hit-test the pointer and build the tooltip for whatever tile is under it.
    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<TooltipPayload> {
        leaf_at(&self.leaves, x, y).map(|leaf| hit_payload(leaf, x, y))
    }
}
