pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub mod facade;
pub mod parser;
pub mod scan;
pub mod views;

pub use config::{DumpscopeConfig, GraphStyle, Palette, ParseOptions, SimplifyOptions};
pub use error::{DumpscopeError, Result};
pub use facade::Analyzer;
pub use parser::{
    ClassifiedLine, ContainerPredicate, IdGenerator, IndentTracker, LineClassifier, OpenerSet,
    SequentialIds, TreeBuilder,
};
pub use scan::{StatsCollector, SymbolCategory, SymbolExtractor, SymbolScanner};
pub use views::{GraphProjector, TreeSimplifier};
