use crate::config::SimplifyOptions;
use dumpscope_api::models::{Node, SimplifiedNode, Tree};

/// Produces a copy of a tree bounded in depth and fan-out.
///
/// Nodes at `max_depth` keep no children. Above that, only the first
/// `max_children` children survive and a `… N more children` marker is appended
/// when any were cut. Recursion is bounded by `max_depth`.
#[derive(Debug, Clone, Default)]
pub struct TreeSimplifier {
    options: SimplifyOptions,
}

impl TreeSimplifier {
    pub fn new(options: SimplifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SimplifyOptions {
        self.options
    }

    /// `None` in, `None` out.
    pub fn simplify(&self, root: Option<&Node>) -> Option<SimplifiedNode> {
        root.map(|node| self.simplify_node(node, 0))
    }

    pub fn simplify_tree(&self, tree: &Tree) -> SimplifiedNode {
        self.simplify_node(tree.root(), 0)
    }

    fn simplify_node(&self, node: &Node, depth: usize) -> SimplifiedNode {
        let SimplifyOptions {
            max_depth,
            max_children,
        } = self.options;

        let mut children = Vec::new();
        if depth < max_depth && !node.children.is_empty() {
            children.extend(
                node.children
                    .iter()
                    .take(max_children)
                    .map(|child| self.simplify_node(child, depth + 1)),
            );

            if node.children.len() > max_children {
                children.push(SimplifiedNode::more_marker(
                    &node.id,
                    node.children.len() - max_children,
                    depth + 1,
                ));
            }
        }

        SimplifiedNode {
            id: node.id.clone(),
            label: node.label.clone(),
            kind: node.kind.clone(),
            depth,
            children,
        }
    }
}
