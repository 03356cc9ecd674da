pub use common::*;

pub mod algo;
mod common;
mod petgraph_impl;
pub mod visit;
