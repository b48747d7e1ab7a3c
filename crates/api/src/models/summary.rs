use super::graph::GraphView;
use super::node::Tree;
use super::simplified::SimplifiedNode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Names scraped straight from the raw dump text, in order of appearance.
///
/// Categories are filled by independent scanners; duplicates and overlaps
/// between categories are kept as found.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct SymbolSummary {
    pub functions: Vec<String>,
    pub variables: Vec<String>,
    pub literals: Vec<String>,
    /// Prefixed with the declaration kind, e.g. `Struct: Foo`
    pub structures: Vec<String>,
}

impl SymbolSummary {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.functions.len() + self.variables.len() + self.literals.len() + self.structures.len()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_lines: usize,
    pub non_empty_lines: usize,
    pub max_indent_level: usize,
    /// Lines that look like the start of a bracketed node
    pub approx_node_count: usize,
    pub raw_byte_size: usize,
}

/// Every view of one dump, computed with a single configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Analysis {
    pub tree: Tree,
    pub simplified: Option<SimplifiedNode>,
    pub graph: GraphView,
    pub symbols: SymbolSummary,
    pub stats: Stats,
}
