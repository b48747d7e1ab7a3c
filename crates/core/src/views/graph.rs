use crate::config::GraphStyle;
use dumpscope_api::models::{
    GraphEdge, GraphNode, GraphView, KindCategory, LabelStyle, Node, NodeStyle, Tree,
};
use tracing::debug;

const FALLBACK_LABEL: &str = "node";
const SYNTHETIC_PREFIX: &str = "synthetic_";

/// Flattens a tree into styled nodes and parent-to-child edges.
///
/// Nodes are emitted in pre-order. A node without an id gets
/// `synthetic_{n}`, which cannot clash with ids issued by the tree builder.
#[derive(Debug, Clone, Default)]
pub struct GraphProjector {
    style: GraphStyle,
}

impl GraphProjector {
    pub fn new(style: GraphStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    pub fn project_tree(&self, tree: &Tree) -> GraphView {
        self.project(Some(tree.root()))
    }

    pub fn project(&self, root: Option<&Node>) -> GraphView {
        let Some(root) = root else {
            return GraphView::default();
        };

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut synthesized = 0usize;
        let mut stack: Vec<(&Node, Option<String>, usize)> = vec![(root, None, 0)];

        while let Some((node, parent, depth)) = stack.pop() {
            let id = if node.has_id() {
                node.id.clone()
            } else {
                synthesized += 1;
                format!("{}{}", SYNTHETIC_PREFIX, synthesized - 1)
            };

            nodes.push(self.graph_node(node, &id, depth));
            if let Some(source) = parent {
                edges.push(GraphEdge {
                    source,
                    target: id.clone(),
                    style: self.style.edge.clone(),
                });
            }

            for child in node.children.iter().rev() {
                stack.push((child, Some(id.clone()), depth + 1));
            }
        }

        debug!(
            "Projected {} nodes and {} edges ({} synthesized ids)",
            nodes.len(),
            edges.len(),
            synthesized
        );
        GraphView::new(nodes, edges)
    }

    fn graph_node(&self, node: &Node, id: &str, depth: usize) -> GraphNode {
        let color = self.style.palette.color(KindCategory::from(&node.kind));
        let label = if node.label.is_empty() {
            FALLBACK_LABEL.to_string()
        } else {
            node.label.clone()
        };

        GraphNode {
            id: id.to_string(),
            label,
            style: NodeStyle {
                fill: color.to_string(),
                stroke: color.to_string(),
            },
            depth,
            shape: self.style.node_shape.clone(),
            size: self.style.node_size(depth),
            label_style: LabelStyle {
                font_size: self.style.font_size(depth),
                fill: self.style.label_color.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumpscope_api::models::NodeKind;

    fn sample() -> Node {
        Node::new("node_0", "Crate {", NodeKind::Crate, "Crate {").with_children(vec![
            Node::new("node_1", "Fn: main", NodeKind::Fn, "  Fn {").with_children(vec![
                Node::new("node_2", "Block {", NodeKind::Block, "    Block {"),
            ]),
            Node::new("node_3", "Lit: \"x\"", NodeKind::Lit, "  Lit {"),
        ])
    }

    #[test]
    fn absent_tree_gives_empty_view() {
        let view = GraphProjector::default().project(None);
        assert!(view.nodes.is_empty());
        assert!(view.edges.is_empty());
    }

    #[test]
    fn emits_pre_order_with_one_edge_per_child() {
        let view = GraphProjector::default().project(Some(&sample()));
        let ids: Vec<_> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["node_0", "node_1", "node_2", "node_3"]);
        assert_eq!(view.edges.len(), view.nodes.len() - 1);
        assert_eq!(view.children_of("node_0").collect::<Vec<_>>(), vec!["node_1", "node_3"]);
        assert_eq!(view.children_of("node_1").collect::<Vec<_>>(), vec!["node_2"]);
    }

    #[test]
    fn styles_follow_kind_and_depth() {
        let view = GraphProjector::default().project(Some(&sample()));

        let root = view.node("node_0").unwrap();
        assert_eq!(root.style.fill, "#722ed1");
        assert_eq!(root.size, 32);
        assert_eq!(root.label_style.font_size, 12);
        assert_eq!(root.shape, "circle");

        let block = view.node("node_2").unwrap();
        assert_eq!(block.style.fill, "#52c41a");
        assert_eq!(block.depth, 2);
        assert_eq!(block.size, 24);

        assert_eq!(view.node("node_3").unwrap().style.stroke, "#f5222d");
        assert!(view.edges.iter().all(|e| e.style.opacity == 0.6));
    }

    #[test]
    fn sizes_never_drop_below_the_floor() {
        let mut node = Node::new("leaf", "Expr", NodeKind::Expr, "");
        for i in 0..20 {
            node = Node::new(format!("n{}", i), "Expr", NodeKind::Expr, "").with_children(vec![node]);
        }
        let view = GraphProjector::default().project(Some(&node));
        assert_eq!(view.nodes.len(), 21);
        assert!(view.nodes.iter().all(|n| n.size >= 8 && n.label_style.font_size >= 6));
    }

    #[test]
    fn missing_ids_and_labels_are_filled_in() {
        let root = Node::new("", "", NodeKind::Unknown, "").with_children(vec![
            Node::new("", "child", NodeKind::Unknown, ""),
        ]);
        let view = GraphProjector::default().project(Some(&root));
        assert_eq!(view.nodes[0].id, "synthetic_0");
        assert_eq!(view.nodes[0].label, "node");
        assert_eq!(view.nodes[1].id, "synthetic_1");
        assert_eq!(view.edges[0].source, "synthetic_0");
        assert_eq!(view.edges[0].target, "synthetic_1");
    }

    #[test]
    fn custom_palette_is_used() {
        let mut style = GraphStyle::default();
        style.palette.other = "#123456".to_string();
        let root = Node::new("a", "Foo", NodeKind::Custom("foo".into()), "Foo");
        let view = GraphProjector::new(style).project(Some(&root));
        assert_eq!(view.nodes[0].style.fill, "#123456");
    }
}
