use crate::algo::spanning_tree::{compare_edges, SpanningTree};
use crate::algo::traversal::{GraphVisitor, UndirectedBfs, VisitState};
use crate::index::GraphIndex;
use crate::interface::{GraphBase, StaticGraph};
use crate::weight::{OrderedMonoid, WeightedEdgeData};
use bitvector::BitVector;

/// Decides if a traversal reaches `target` without using deleted edges.
struct ConnectivityVisitor<'a, NodeIndex> {
    deleted_edges: &'a BitVector,
    target: NodeIndex,
    found: bool,
}

impl<'a, Graph: GraphBase> GraphVisitor<Graph> for ConnectivityVisitor<'a, Graph::NodeIndex> {
    type Output = bool;

    fn discover_edge(
        &mut self,
        _head: Graph::NodeIndex,
        edge: Graph::EdgeIndex,
        _tail: Graph::NodeIndex,
    ) -> VisitState {
        if self.deleted_edges.contains(edge.as_usize()) {
            VisitState::Skip
        } else {
            VisitState::Continue
        }
    }

    fn discover_vertex(&mut self, vertex: Graph::NodeIndex) -> VisitState {
        if vertex == self.target {
            self.found = true;
            VisitState::Abort
        } else {
            VisitState::Continue
        }
    }

    fn on_completed(self) -> bool {
        self.found
    }
}

/// Computes a minimum spanning forest with the reverse-delete algorithm.
///
/// Edges are considered by descending weight, and an edge is deleted if its endpoints stay connected without it.
/// Connectivity is checked with an undirected breadth-first search that skips deleted edges.
/// This takes `O(|E| * (|V| + |E|))` time, so it is mostly useful to cross-check the other algorithms.
pub fn reverse_delete<Graph, WeightType, Operations>(
    graph: &Graph,
    weight_operations: &Operations,
) -> SpanningTree<Graph::NodeIndex, Graph::EdgeIndex, WeightType>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    debug!(
        "Reverse-delete in a graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    let mut edges: Vec<_> = graph.edge_indices().collect();
    edges.sort_unstable_by(|&a, &b| compare_edges(graph, weight_operations, b, a));

    let mut deleted_edges = BitVector::new(graph.edge_count());
    let mut traversal = UndirectedBfs::new(graph);

    for &edge in &edges {
        deleted_edges.insert(edge.as_usize());
        let endpoints = graph.edge_endpoints(edge);
        if endpoints.is_self_loop() {
            continue;
        }

        let visitor = ConnectivityVisitor {
            deleted_edges: &deleted_edges,
            target: endpoints.to_node,
            found: false,
        };
        let still_connected = traversal
            .traverse(endpoints.from_node, visitor)
            .unwrap_or_else(|_| unreachable!("edge endpoints are part of the graph"));
        if !still_connected {
            trace!("Keeping edge {:?}, it is a bridge", edge);
            deleted_edges.remove(edge.as_usize());
        }
    }

    let tree_edges = edges
        .into_iter()
        .rev()
        .filter(|edge| !deleted_edges.contains(edge.as_usize()))
        .collect();
    SpanningTree::from_edges(graph, tree_edges, weight_operations)
}

#[cfg(test)]
mod tests {
    use crate::algo::spanning_tree::{kruskal, reverse_delete};
    use crate::implementation::petgraph_impl;
    use crate::interface::MutableGraphContainer;
    use crate::weight::BaseWeightOperations;

    #[test]
    fn test_reverse_delete_parallel_edges_and_self_loops() {
        let mut graph = petgraph_impl::new_undirected();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        graph.add_edge(n0, n1, 3i32);
        let light = graph.add_edge(n0, n1, 1);
        graph.add_edge(n1, n1, -5);
        let bridge = graph.add_edge(n1, n2, 10);

        let tree = reverse_delete(&graph, &BaseWeightOperations);
        assert_eq!(tree.edges(), &[light, bridge]);
        assert_eq!(*tree.weight(), 11);
    }

    #[test]
    fn test_reverse_delete_directed_cycle() {
        let mut graph = petgraph_impl::new();
        let n: Vec<_> = (0..5).map(|_| graph.add_node(())).collect();
        graph.add_edge(n[0], n[1], 5i64);
        graph.add_edge(n[1], n[2], 4);
        graph.add_edge(n[2], n[3], 3);
        graph.add_edge(n[3], n[0], 2);
        graph.add_edge(n[2], n[0], 6);
        graph.add_edge(n[4], n[3], 1);

        let tree = reverse_delete(&graph, &BaseWeightOperations);
        assert_eq!(tree.weight(), kruskal(&graph, &BaseWeightOperations).weight());
        assert_eq!(*tree.weight(), 10);
        assert_eq!(tree.component_count(), 1);
    }
}
