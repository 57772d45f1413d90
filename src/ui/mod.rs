//! Interop with the canvas JSON the browser front-end produces.

mod conversion;
mod types;

pub use conversion::IntoGraph;
pub use types::*;
