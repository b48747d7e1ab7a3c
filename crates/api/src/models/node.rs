use crate::error::{ApiError, ApiResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower-cased node-type tag taken from the leading capitalised word of a dump line.
///
/// Only the tags that drive styling or summaries get their own variant; anything
/// else is kept verbatim in `Custom`. On the wire it is always a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    Crate,
    Item,
    Fn,
    Block,
    Stmt,
    Expr,
    Lit,
    Struct,
    Enum,
    Trait,
    Impl,
    Local,
    Pat,
    // Synthetic
    Info,
    Error,
    Empty,
    #[default]
    Unknown,
    // Extension
    Custom(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Crate => "crate",
            NodeKind::Item => "item",
            NodeKind::Fn => "fn",
            NodeKind::Block => "block",
            NodeKind::Stmt => "stmt",
            NodeKind::Expr => "expr",
            NodeKind::Lit => "lit",
            NodeKind::Struct => "struct",
            NodeKind::Enum => "enum",
            NodeKind::Trait => "trait",
            NodeKind::Impl => "impl",
            NodeKind::Local => "local",
            NodeKind::Pat => "pat",
            NodeKind::Info => "info",
            NodeKind::Error => "error",
            NodeKind::Empty => "empty",
            NodeKind::Unknown => "unknown",
            NodeKind::Custom(s) => s,
        }
    }

    /// True for the kinds the pipeline invents rather than reads from the dump.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, NodeKind::Info | NodeKind::Error | NodeKind::Empty)
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "crate" => NodeKind::Crate,
            "item" => NodeKind::Item,
            "fn" => NodeKind::Fn,
            "block" => NodeKind::Block,
            "stmt" => NodeKind::Stmt,
            "expr" => NodeKind::Expr,
            "lit" => NodeKind::Lit,
            "struct" => NodeKind::Struct,
            "enum" => NodeKind::Enum,
            "trait" => NodeKind::Trait,
            "impl" => NodeKind::Impl,
            "local" => NodeKind::Local,
            "pat" => NodeKind::Pat,
            "info" => NodeKind::Info,
            "error" => NodeKind::Error,
            "empty" => NodeKind::Empty,
            "unknown" | "" => NodeKind::Unknown,
            other => NodeKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        NodeKind::from(s.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeKind::from(s))
    }
}

/// One element of the parsed tree, produced from one recognised dump line.
///
/// Field aliases accept trees exported by the browser front-end (`type`, `fullText`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
pub struct Node {
    /// Opaque linking token. Empty when the node came from an external tree without ids.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "type")]
    #[schemars(with = "String")]
    pub kind: NodeKind,
    /// Verbatim text of the line that produced this node
    #[serde(default, alias = "fullText")]
    pub source_line: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: NodeKind,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            source_line: source_line.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order traversal yielding each node with its distance from `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0)],
        }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Largest distance from `self` to any descendant (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.walk().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Reads an already-structured tree: a node object, or an array of node
    /// objects which is wrapped under a synthetic `root` node.
    pub fn from_json(text: &str) -> ApiResult<Node> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| ApiError::InvalidArgument(format!("not JSON: {}", e)))?;

        match value {
            serde_json::Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| ApiError::InvalidArgument(format!("not a node object: {}", e))),
            serde_json::Value::Array(_) => {
                let children: Vec<Node> = serde_json::from_value(value)
                    .map_err(|e| ApiError::InvalidArgument(format!("not a node array: {}", e)))?;
                Ok(Node::new(String::new(), "root", NodeKind::Custom("root".into()), "")
                    .with_children(children))
            }
            other => Err(ApiError::InvalidArgument(format!(
                "expected object or array, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Iterator returned by [`Node::walk`]. Uses an explicit stack so arbitrarily
/// deep dumps cannot overflow the call stack.
pub struct Walk<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TreeStatus {
    /// Rebuilt from indented dump text
    Parsed,
    /// Read directly from a JSON tree
    Structured,
    /// Input had no non-blank line
    Empty,
    /// Building faulted; the root is an error node
    Failed,
}

/// A single rooted tree, or one of the sentinel trees (`Empty`, `Failed`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Tree {
    pub status: TreeStatus,
    pub root: Node,
}

impl Tree {
    pub const EMPTY_LABEL: &'static str = "empty tree";
    pub const FAILED_LABEL: &'static str = "parse failed";

    pub fn parsed(root: Node) -> Self {
        Self {
            status: TreeStatus::Parsed,
            root,
        }
    }

    pub fn structured(root: Node) -> Self {
        Self {
            status: TreeStatus::Structured,
            root,
        }
    }

    /// Placeholder for input without any parseable line.
    pub fn empty() -> Self {
        Self {
            status: TreeStatus::Empty,
            root: Node::new("empty", Self::EMPTY_LABEL, NodeKind::Empty, ""),
        }
    }

    /// Error tree carrying `description` as the only child of the root.
    pub fn failed(description: impl Into<String>) -> Self {
        let message = Node::new("error-msg", description, NodeKind::Info, "");
        Self {
            status: TreeStatus::Failed,
            root: Node::new("error", Self::FAILED_LABEL, NodeKind::Error, "")
                .with_children(vec![message]),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.status == TreeStatus::Empty
    }

    pub fn is_failed(&self) -> bool {
        self.status == TreeStatus::Failed
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
