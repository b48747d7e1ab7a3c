use clap::ValueEnum;
use dumpscope_api::models::{Analysis, GraphView, SimplifiedNode, Stats, SymbolSummary, Tree};
use schemars::schema_for;

/// Output types a JSON schema can be printed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SchemaTarget {
    Analysis,
    Tree,
    Simplified,
    Graph,
    Symbols,
    Stats,
}

pub fn schema_json(target: SchemaTarget) -> serde_json::Result<String> {
    let schema = match target {
        SchemaTarget::Analysis => schema_for!(Analysis),
        SchemaTarget::Tree => schema_for!(Tree),
        SchemaTarget::Simplified => schema_for!(SimplifiedNode),
        SchemaTarget::Graph => schema_for!(GraphView),
        SchemaTarget::Symbols => schema_for!(SymbolSummary),
        SchemaTarget::Stats => schema_for!(Stats),
    };
    serde_json::to_string_pretty(&schema)
}
