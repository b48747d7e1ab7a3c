//! Display-oriented projections of a built tree.

pub mod graph;
pub mod simplify;

pub use graph::GraphProjector;
pub use simplify::TreeSimplifier;
