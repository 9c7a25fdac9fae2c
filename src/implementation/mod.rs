/// A graph implementation based on the `petgraph` crate.
pub mod petgraph_impl;
