//! Nodes, edges and identifiers of a process graph.

mod attributes;
mod edge;
mod ids;
mod node;

pub use attributes::*;
pub use edge::*;
pub use ids::*;
pub use node::*;
