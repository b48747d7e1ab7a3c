use super::node::NodeKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Depth- and fan-out-bounded copy of a [`super::Node`], safe to hand to a renderer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct SimplifiedNode {
    pub id: String,
    pub label: String,
    #[schemars(with = "String")]
    pub kind: NodeKind,
    /// Distance from the root of the simplified copy
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SimplifiedNode>,
}

impl SimplifiedNode {
    /// Informational child appended when `hidden` children were cut from `parent_id`.
    pub fn more_marker(parent_id: &str, hidden: usize, depth: usize) -> Self {
        Self {
            id: format!("{}_more", parent_id),
            label: format!("… {} more children", hidden),
            kind: NodeKind::Info,
            depth,
            children: Vec::new(),
        }
    }

    pub fn is_marker(&self) -> bool {
        self.kind == NodeKind::Info && self.id.ends_with("_more")
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Deepest `depth` value present in this subtree.
    pub fn max_depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.max_depth())
            .max()
            .unwrap_or(self.depth)
    }
}
