//! Pattern scans over the raw dump text. Independent of the tree, so they
//! still report something when tree building degrades.

pub mod stats;
pub mod symbols;

pub use stats::StatsCollector;
pub use symbols::{
    FunctionScanner, LiteralScanner, StructureScanner, SymbolExtractor, VariableScanner,
};

use std::fmt;

/// The [`SymbolSummary`](dumpscope_api::models::SymbolSummary) list a scanner fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    Functions,
    Variables,
    Literals,
    Structures,
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolCategory::Functions => "functions",
            SymbolCategory::Variables => "variables",
            SymbolCategory::Literals => "literals",
            SymbolCategory::Structures => "structures",
        };
        f.write_str(name)
    }
}

/// One independent best-effort scan.
///
/// A scanner returns every name it finds in order of appearance. A fragment
/// it cannot make sense of is skipped; it never aborts the scan.
pub trait SymbolScanner: Send + Sync {
    fn category(&self) -> SymbolCategory;

    fn scan(&self, text: &str) -> Vec<String>;
}
