//! The errors that can occur in this crate.
//!
//! Node and edge indices are reported by their `usize` value, since the error types cannot be generic over the graph.

error_chain! {
    errors {
        InvalidArgument(reason: String) {
            description("an argument had an illegal value")
            display("illegal argument: {}", reason)
        }

        NodeNotInGraph(node: usize) {
            description("a node is not part of the graph")
            display("node {} is not part of the graph", node)
        }

        EdgeNotInGraph(edge: usize) {
            description("an edge is not part of the graph")
            display("edge {} is not part of the graph", edge)
        }

        PathNotFound(source: usize, target: usize) {
            description("there is no path between the given nodes")
            display("there is no path from node {} to node {}", source, target)
        }

        NegativeWeightCycle(node: usize) {
            description("the graph contains a negative-weight cycle reachable from the source")
            display("the graph contains a negative-weight cycle through node {}", node)
        }

        NoSuchElement {
            description("the requested element does not exist")
            display("the requested element does not exist")
        }
    }
}
