pub mod graph;
pub mod node;
pub mod simplified;
pub mod summary;

pub use graph::*;
pub use node::*;
pub use simplified::*;
pub use summary::*;
