use crate::algo::spanning_tree::{compare_edges, SpanningTree};
use crate::collections::disjoint_set::DisjointSet;
use crate::interface::ImmutableGraphContainer;
use crate::weight::{OrderedMonoid, WeightedEdgeData};

/// Computes a minimum spanning forest with Kruskal's algorithm.
///
/// Edges are considered by ascending weight, and an edge is added if it connects two different components of the forest built so far.
/// Self loops are never added.
pub fn kruskal<Graph, WeightType, Operations>(
    graph: &Graph,
    weight_operations: &Operations,
) -> SpanningTree<Graph::NodeIndex, Graph::EdgeIndex, WeightType>
where
    Graph: ImmutableGraphContainer,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    debug!(
        "Kruskal in a graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    let mut edges: Vec<_> = graph.edge_indices().collect();
    edges.sort_unstable_by(|&a, &b| compare_edges(graph, weight_operations, a, b));

    let mut components = DisjointSet::with_capacity(graph.node_count());
    let mut tree_edges = Vec::new();
    let max_edge_count = graph.node_count().saturating_sub(1);

    for edge in edges {
        if tree_edges.len() == max_edge_count {
            break;
        }
        let endpoints = graph.edge_endpoints(edge);
        if components.union(&endpoints.from_node, &endpoints.to_node) {
            tree_edges.push(edge);
        } else {
            trace!("Discarding edge {:?}, it would close a cycle", edge);
        }
    }

    SpanningTree::from_edges(graph, tree_edges, weight_operations)
}

#[cfg(test)]
mod tests {
    use crate::algo::spanning_tree::kruskal;
    use crate::implementation::petgraph_impl;
    use crate::interface::MutableGraphContainer;
    use crate::weight::BaseWeightOperations;

    #[test]
    fn test_kruskal_prefers_light_edges() {
        let mut graph = petgraph_impl::new_undirected();
        let n: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        let e0 = graph.add_edge(n[0], n[1], 1.0f64);
        let e1 = graph.add_edge(n[1], n[2], 2.0);
        let e2 = graph.add_edge(n[2], n[0], 0.5);
        let e3 = graph.add_edge(n[2], n[3], 4.0);
        graph.add_edge(n[3], n[3], -1.0);
        graph.add_edge(n[3], n[0], 7.0);

        let tree = kruskal(&graph, &BaseWeightOperations);
        assert_eq!(tree.edges(), &[e2, e0, e3]);
        assert!(!tree.contains_edge(e1));
        assert_eq!(*tree.weight(), 5.5);
    }

    #[test]
    fn test_kruskal_ignores_direction() {
        let mut graph = petgraph_impl::new();
        let n: Vec<_> = (0..3).map(|_| graph.add_node(())).collect();
        graph.add_edge(n[1], n[0], 3i32);
        graph.add_edge(n[2], n[0], 1);
        graph.add_edge(n[1], n[2], 5);

        let tree = kruskal(&graph, &BaseWeightOperations);
        assert_eq!(*tree.weight(), 4);
        assert_eq!(tree.component_count(), 1);
    }
}
