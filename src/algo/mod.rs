/// Algorithms to create certain parameterisable graph classes, like binary trees, grids and random graphs.
pub mod predefined_graphs;
/// A trait for bidirected queues to abstract over the different implementations in the standard library.
pub mod queue;
/// Single-source, single-pair and all-pairs shortest path algorithms, as well as the data structures to reconstruct paths.
pub mod shortest_path;
/// Minimum spanning tree (or forest) algorithms.
pub mod spanning_tree;
/// Graph traversals driven by visitors, i.e. breadth or depth first search with early termination.
pub mod traversal;
