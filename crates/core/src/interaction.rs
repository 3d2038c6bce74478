use serde::Serialize;

use crate::treemap::LayoutLeaf;

/// Tooltip offset from the pointer, in canvas units.
pub const TOOLTIP_OFFSET_X: f64 = 10.0;
pub const TOOLTIP_OFFSET_Y: f64 = -30.0;

/// What a renderer needs to show the hover tooltip for one tile.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipPayload {
    pub text: String,
    pub category: String,
    pub value: f64,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Tooltip for a leaf the pointer is already known to be over.
pub fn hit_payload(leaf: &LayoutLeaf, pointer_x: f64, pointer_y: f64) -> TooltipPayload {
    let value = leaf.value();
    TooltipPayload {
        text: format!("{}: ${}", leaf.name(), value),
        category: leaf.category().to_string(),
        value,
        anchor_x: pointer_x + TOOLTIP_OFFSET_X,
        anchor_y: pointer_y + TOOLTIP_OFFSET_Y,
    }
}

/// First leaf, in layout order, whose rectangle contains the point.
pub fn leaf_at(leaves: &[LayoutLeaf], x: f64, y: f64) -> Option<&LayoutLeaf> {
    leaves.iter().find(|leaf| leaf.rect.contains(x, y))
}
