use super::node::NodeKind;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse styling category of a [`NodeKind`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum KindCategory {
    Crate,
    /// `item` and `fn`
    Item,
    Block,
    /// `stmt` and `expr`
    Statement,
    Literal,
    Other,
}

impl From<&NodeKind> for KindCategory {
    fn from(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Crate => KindCategory::Crate,
            NodeKind::Item | NodeKind::Fn => KindCategory::Item,
            NodeKind::Block => KindCategory::Block,
            NodeKind::Stmt | NodeKind::Expr => KindCategory::Statement,
            NodeKind::Lit => KindCategory::Literal,
            _ => KindCategory::Other,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct NodeStyle {
    pub fill: String,
    pub stroke: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    pub font_size: u32,
    pub fill: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub stroke: String,
    pub line_width: f32,
    pub opacity: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub style: NodeStyle,
    pub depth: usize,
    pub shape: String,
    pub size: u32,
    pub label_style: LabelStyle,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
}

/// Node/edge list form of a tree, ready for a graph-drawing library.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Targets of every edge leaving `id`, in emission order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id)
            .map(|e| e.target.as_str())
    }

    /// Converts to a `petgraph` graph weighted by node label.
    ///
    /// Node indices follow the order of `nodes`. Edges whose endpoints are
    /// unknown are dropped; with duplicate ids the first node wins.
    pub fn to_digraph(&self) -> DiGraph<String, String> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.label.clone());
            index.entry(node.id.as_str()).or_insert(idx);
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) {
                graph.add_edge(from, to, String::new());
            }
        }

        graph
    }

    /// Renders the view as Graphviz DOT, carrying the fill colours over.
    pub fn to_dot(&self) -> String {
        let graph = self.to_digraph();
        let edge_attrs = |_: &DiGraph<String, String>, _: EdgeReference<'_, String>| String::new();
        let node_attrs = |_: &DiGraph<String, String>, (idx, _): (NodeIndex, &String)| {
            self.nodes
                .get(idx.index())
                .map(|n| {
                    format!(
                        "style=filled fillcolor=\"{}\" color=\"{}\" fontcolor=\"{}\"",
                        n.style.fill, n.style.stroke, n.label_style.fill
                    )
                })
                .unwrap_or_default()
        };
        Dot::with_attr_getters(&graph, &[Config::EdgeNoLabel], &edge_attrs, &node_attrs).to_string()
    }
}
