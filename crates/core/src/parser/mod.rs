//! Heuristic reconstruction of a tree from an indented debug dump.

pub mod builder;
pub mod classifier;
pub mod container;
pub mod ids;
pub mod indent;

pub use builder::TreeBuilder;
pub use classifier::{ClassifiedLine, LineClassifier};
pub use container::{ContainerPredicate, OpenerSet};
pub use ids::{IdGenerator, SequentialIds};
pub use indent::IndentTracker;
