//! Evolution families: edge graph, connected-family resolution, tree layout
//! and method formatting.

pub mod graph;
pub mod method;
pub mod resolver;
pub mod tree;

pub use graph::{EvolutionEdge, EvolutionGraph};
pub use method::format_method;
pub use resolver::Family;
pub use tree::{FamilyRoles, build_tree};
