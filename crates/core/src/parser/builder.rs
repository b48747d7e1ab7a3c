//! Tree builder
//!
//! Rebuilds a rooted tree from an indented dump using an explicit stack of open
//! ancestors. This is a heuristic, not a grammar: irregular indentation yields a
//! plausible tree rather than an error, and `build` never fails.

use super::classifier::{ClassifiedLine, LineClassifier};
use super::container::{ContainerPredicate, OpenerSet};
use super::ids::{IdGenerator, SequentialIds};
use super::indent::IndentTracker;
use crate::config::ParseOptions;
use crate::error::{DumpscopeError, Result};
use crate::util::split_lines;
use dumpscope_api::models::{Node, NodeKind, Tree};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Node waiting for its children to be attached.
struct PendingNode {
    node: Node,
    type_name: String,
    ident: Option<String>,
    literal: Option<String>,
    /// The producing line had its own `ident:` or `symbol:` value
    labelled_by_own_line: bool,
    children: Vec<usize>,
}

impl PendingNode {
    fn new(line: ClassifiedLine, id: String) -> Self {
        Self {
            type_name: line.type_name.clone(),
            labelled_by_own_line: line.ident.is_some() || line.literal.is_some(),
            ident: line.ident.clone(),
            literal: line.literal.clone(),
            node: line.into_node(id),
            children: Vec::new(),
        }
    }

    /// Takes over the `ident:`/`symbol:` value of a field line. The first value
    /// wins; the label is re-synthesized only if the node's own line carried none.
    fn absorb(&mut self, field: ClassifiedLine) {
        if self.ident.is_none() {
            self.ident = field.ident;
        }
        if self.literal.is_none() {
            self.literal = field.literal;
        }
        if self.labelled_by_own_line {
            return;
        }

        match (&self.ident, &self.literal) {
            (Some(ident), _) => self.node.label = format!("{}: {}", self.type_name, ident),
            (None, Some(literal)) => {
                self.node.label = format!("{}: \"{}\"", self.type_name, literal)
            }
            (None, None) => {}
        }
    }
}

/// `}`, `]`, `),` and friends: pure punctuation closing an earlier opener.
fn is_closer(content: &str) -> bool {
    content.starts_with(['}', ']', ')'])
        && content
            .chars()
            .all(|c| matches!(c, '}' | ']' | ')' | ',' | ';') || c.is_whitespace())
}

fn is_field(line: &ClassifiedLine) -> bool {
    line.kind == NodeKind::Unknown && (line.ident.is_some() || line.literal.is_some())
}

pub struct TreeBuilder {
    options: ParseOptions,
    classifier: LineClassifier,
    indent: IndentTracker,
    container: Box<dyn ContainerPredicate>,
}

impl TreeBuilder {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            classifier: LineClassifier::new(options.label_limit),
            indent: IndentTracker::new(options.indent_width),
            container: Box::new(OpenerSet::new(options.container_openers.clone())),
            options,
        }
    }

    /// Replaces the opener-based container test.
    pub fn with_container<P>(mut self, predicate: P) -> Self
    where
        P: ContainerPredicate + 'static,
    {
        self.container = Box::new(predicate);
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Builds with fresh `node_N` ids, so identical input gives identical trees.
    pub fn build(&self, text: &str) -> Tree {
        self.build_with_ids(text, &mut SequentialIds::default())
    }

    /// Total: any error or panic while building becomes a `Failed` error tree.
    pub fn build_with_ids(&self, text: &str, ids: &mut dyn IdGenerator) -> Tree {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_build(text, ids))) {
            Ok(Ok(tree)) => tree,
            Ok(Err(e)) => {
                warn!("Tree build failed: {}", e);
                Tree::failed(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Tree build panicked: {}", message);
                Tree::failed(message)
            }
        }
    }

    /// Fallible core of [`Self::build_with_ids`].
    pub fn try_build(&self, text: &str, ids: &mut dyn IdGenerator) -> Result<Tree> {
        if self.options.structured_input {
            if let Some(tree) = self.read_structured(text, ids) {
                return Ok(tree);
            }
        }
        self.parse_text(text, ids)
    }

    fn read_structured(&self, text: &str, ids: &mut dyn IdGenerator) -> Option<Tree> {
        let trimmed = text.trim_start();
        if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
            return None;
        }

        match Node::from_json(trimmed) {
            Ok(root) if root.label.is_empty() && root.children.is_empty() => {
                debug!("JSON input carries no node fields, parsing as text");
                None
            }
            Ok(mut root) => {
                assign_missing_ids(&mut root, ids);
                debug!("Read structured tree with {} nodes", root.node_count());
                Some(Tree::structured(root))
            }
            Err(e) => {
                debug!("Input is not a structured tree, parsing as text: {}", e);
                None
            }
        }
    }

    fn parse_text(&self, text: &str, ids: &mut dyn IdGenerator) -> Result<Tree> {
        let mut arena: Vec<PendingNode> = Vec::new();
        // (arena index, level) of every ancestor that may still take children
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for raw in split_lines(text) {
            let content = raw.trim();
            if content.is_empty() {
                continue;
            }

            let level = self.indent.level(raw);

            if arena.is_empty() {
                let line = self.classifier.classify(raw);
                arena.push(PendingNode::new(line, ids.next_id()));
                stack.push((0, level));
                continue;
            }

            while stack.last().is_some_and(|&(_, top)| top >= level) {
                stack.pop();
            }
            let parent = stack.last().map(|&(idx, _)| idx).unwrap_or(0);

            if self.options.skip_closers && is_closer(content) {
                continue;
            }

            let line = self.classifier.classify(raw);
            let container = self.container.is_container(content);
            let idx = arena.len();
            let parent_node = arena
                .get_mut(parent)
                .ok_or_else(|| DumpscopeError::Internal(format!("missing parent #{}", parent)))?;

            if self.options.fold_fields && !container && is_field(&line) {
                parent_node.absorb(line);
                continue;
            }

            parent_node.children.push(idx);
            arena.push(PendingNode::new(line, ids.next_id()));

            if container {
                stack.push((idx, level));
            }
        }

        if arena.is_empty() {
            debug!("No non-blank lines, returning the empty tree");
            return Ok(Tree::empty());
        }

        debug!("Parsed {} nodes from dump text", arena.len());
        assemble(arena).map(Tree::parsed)
    }
}

impl std::fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// Turns the arena into owned nodes bottom-up. Children always sit at a higher
/// index than their parent, so a reverse sweep sees every child first.
fn assemble(arena: Vec<PendingNode>) -> Result<Node> {
    let mut built: Vec<Option<Node>> = (0..arena.len()).map(|_| None).collect();

    for (idx, pending) in arena.into_iter().enumerate().rev() {
        let mut node = pending.node;
        node.children = pending
            .children
            .into_iter()
            .map(|child| {
                built
                    .get_mut(child)
                    .and_then(Option::take)
                    .ok_or_else(|| {
                        DumpscopeError::Internal(format!("node #{} attached twice or never built", child))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        built[idx] = Some(node);
    }

    built
        .first_mut()
        .and_then(Option::take)
        .ok_or_else(|| DumpscopeError::Internal("root was never built".to_string()))
}

fn assign_missing_ids(root: &mut Node, ids: &mut dyn IdGenerator) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !node.has_id() {
            node.id = ids.next_id();
        }
        stack.extend(node.children.iter_mut().rev());
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic while building tree".to_string()
    }
}
