use serde::{Deserialize, Serialize};

/// A leaf value as written in the dataset. Funding exports mix JSON numbers
/// and numeric strings (`"value": "20338986.27"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// One node of the input document, exactly as decoded.
///
/// A node without a `children` key is a leaf and must carry `category` and
/// `value`. A node with a `children` array (even an empty one) is a group;
/// its own `value`, if any, is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    pub fn leaf(name: impl Into<String>, category: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            category: Some(category.into()),
            value: Some(RawValue::Number(value)),
            children: None,
        }
    }

    pub fn group(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            category: None,
            value: None,
            children: Some(children),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    Leaf { category: String, value: f64 },
    Group,
}

/// A validated node with its aggregate value computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedNode {
    pub name: String,
    /// Position among the parent's children in the input document.
    pub order: usize,
    pub aggregate_value: f64,
    pub kind: NodeKind,
    pub children: Vec<AggregatedNode>,
}

impl AggregatedNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { category, .. } => Some(category),
            NodeKind::Group => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Leaf { value, .. } => Some(value),
            NodeKind::Group => None,
        }
    }

    /// Leaves beneath this node in input order, zero-valued ones included.
    pub fn leaves(&self) -> Vec<&AggregatedNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                out.push(node);
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }
}
