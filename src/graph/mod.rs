//! The graph store: the only sanctioned way to mutate a process graph.

mod analysis;
mod policy;
mod snapshot;
mod store;

pub use analysis::{GraphReport, analyze};
pub use policy::ConnectionPolicy;
pub use snapshot::{GraphData, ProcessSnapshot};
pub use store::GraphStore;
