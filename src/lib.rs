#![recursion_limit = "1024"]
//! Shortest path and spanning tree algorithms over abstract weighted graphs.
//!
//! The algorithms are generic over the graph traits in [interface](interface) and over a weight algebra from [weight](weight).
//! A graph implementation based on `petgraph` is provided in [implementation::petgraph_impl](implementation::petgraph_impl).

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

pub mod algo;
pub mod collections;
pub mod error;
pub mod implementation;
pub mod index;
pub mod interface;
pub mod weight;

pub use algo::*;
pub use error::{Error, ErrorKind};
pub use index::*;
pub use interface::*;
