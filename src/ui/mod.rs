pub mod graph;
pub mod types;

pub use types::*;
