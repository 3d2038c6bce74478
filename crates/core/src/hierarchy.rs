use std::path::Path;

use crate::error::{MalformedTreeError, Result};
use crate::model::*;

/// Decode a node tree from JSON text.
pub fn parse_tree(json: &str) -> Result<Node> {
    Ok(serde_json::from_str(json)?)
}

/// Read and decode a node tree from a JSON file on disk.
pub fn load_tree(path: &Path) -> Result<Node> {
    let text = std::fs::read_to_string(path)?;
    let node = parse_tree(&text)?;
    tracing::debug!(path = %path.display(), "loaded dataset");
    Ok(node)
}

/// Validate `root` and compute every node's aggregate value bottom-up.
///
/// The source tree is left untouched; the result is a new tree in the same
/// child order, each node tagged with its input position.
pub fn build(root: &Node) -> std::result::Result<AggregatedNode, MalformedTreeError> {
    let mut path = Vec::new();
    let tree = aggregate(root, 0, &mut path)?;
    tracing::debug!(
        root = %tree.name,
        total = tree.aggregate_value,
        "aggregated hierarchy"
    );
    Ok(tree)
}

fn aggregate<'a>(
    node: &'a Node,
    order: usize,
    path: &mut Vec<&'a str>,
) -> std::result::Result<AggregatedNode, MalformedTreeError> {
    path.push(&node.name);

    let aggregated = match &node.children {
        None => {
            let (category, value) = leaf_fields(node, path)?;
            AggregatedNode {
                name: node.name.clone(),
                order,
                aggregate_value: value,
                kind: NodeKind::Leaf { category, value },
                children: Vec::new(),
            }
        }
        Some(children) => {
            let mut total = 0.0;
            let mut out = Vec::with_capacity(children.len());
            for (i, child) in children.iter().enumerate() {
                let child = aggregate(child, i, path)?;
                total += child.aggregate_value;
                out.push(child);
            }
            if !total.is_finite() {
                return Err(MalformedTreeError::NonFiniteTotal {
                    path: path.join("/"),
                });
            }
            AggregatedNode {
                name: node.name.clone(),
                order,
                aggregate_value: total,
                kind: NodeKind::Group,
                children: out,
            }
        }
    };

    path.pop();
    Ok(aggregated)
}

fn leaf_fields(
    node: &Node,
    path: &[&str],
) -> std::result::Result<(String, f64), MalformedTreeError> {
    let at = || path.join("/");

    let raw = node
        .value
        .as_ref()
        .ok_or_else(|| MalformedTreeError::MissingValue { path: at() })?;
    let category = node
        .category
        .clone()
        .ok_or_else(|| MalformedTreeError::MissingCategory { path: at() })?;

    let value = match raw {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            MalformedTreeError::InvalidValue {
                path: at(),
                raw: s.clone(),
            }
        })?,
    };
    if !value.is_finite() {
        return Err(MalformedTreeError::NonFiniteValue { path: at() });
    }
    if value < 0.0 {
        return Err(MalformedTreeError::NegativeValue { path: at(), value });
    }

    Ok((category, value))
}
