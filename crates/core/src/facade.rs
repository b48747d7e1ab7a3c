use crate::config::DumpscopeConfig;
use crate::parser::{IndentTracker, TreeBuilder};
use crate::scan::{StatsCollector, SymbolExtractor};
use crate::views::{GraphProjector, TreeSimplifier};
use dumpscope_api::models::{Analysis, GraphView, SimplifiedNode, Stats, SymbolSummary, Tree};
use tracing::info;

/// Analyzer - one entry point for every view of a dump
///
/// Each operation is independent and holds no state between calls; the same
/// analyzer can be shared across threads.
#[derive(Debug)]
pub struct Analyzer {
    config: DumpscopeConfig,
    builder: TreeBuilder,
    simplifier: TreeSimplifier,
    projector: GraphProjector,
    extractor: SymbolExtractor,
    stats: StatsCollector,
}

impl Analyzer {
    pub fn new(config: DumpscopeConfig) -> Self {
        Self {
            builder: TreeBuilder::new(config.parse.clone()),
            simplifier: TreeSimplifier::new(config.simplify),
            projector: GraphProjector::new(config.style.clone()),
            extractor: SymbolExtractor::default(),
            stats: StatsCollector::new(IndentTracker::new(config.parse.indent_width)),
            config,
        }
    }

    /// Replaces the tree builder, e.g. to install a custom container predicate.
    pub fn with_builder(mut self, builder: TreeBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_extractor(mut self, extractor: SymbolExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &DumpscopeConfig {
        &self.config
    }

    // ---- Independent operations ----

    pub fn build_tree(&self, text: &str) -> Tree {
        self.builder.build(text)
    }

    pub fn simplify(&self, tree: &Tree) -> SimplifiedNode {
        self.simplifier.simplify_tree(tree)
    }

    pub fn project(&self, tree: &Tree) -> GraphView {
        self.projector.project_tree(tree)
    }

    pub fn extract_symbols(&self, text: &str) -> SymbolSummary {
        self.extractor.extract(text)
    }

    pub fn collect_stats(&self, text: &str) -> Stats {
        self.stats.collect(text)
    }

    // ---- Everything at once ----

    pub fn analyze(&self, text: &str) -> Analysis {
        let tree = self.build_tree(text);
        let simplified = self.simplify(&tree);
        let graph = self.project(&tree);
        let symbols = self.extract_symbols(text);
        let stats = self.collect_stats(text);

        info!(
            "Analyzed dump: {} lines, {} tree nodes ({:?}), {} symbols",
            stats.total_lines,
            tree.node_count(),
            tree.status,
            symbols.total()
        );

        Analysis {
            tree,
            simplified: Some(simplified),
            graph,
            symbols,
            stats,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(DumpscopeConfig::default())
    }
}
