use crate::algo::spanning_tree::{compare_edges, SpanningTree};
use crate::collections::disjoint_set::DisjointSet;
use crate::interface::ImmutableGraphContainer;
use crate::weight::{OrderedMonoid, WeightedEdgeData};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Computes a minimum spanning forest with Boruvka's algorithm.
///
/// In each round, every component of the forest built so far selects its lightest edge leaving the component,
/// and all selected edges are added at once.
/// The rounds stop when no edge connects two different components anymore.
/// Ties between edges of equal weight are broken by edge index, such that the selected edges never close a cycle.
pub fn boruvka<Graph, WeightType, Operations>(
    graph: &Graph,
    weight_operations: &Operations,
) -> SpanningTree<Graph::NodeIndex, Graph::EdgeIndex, WeightType>
where
    Graph: ImmutableGraphContainer,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    debug!(
        "Boruvka in a graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    let mut components = DisjointSet::with_capacity(graph.node_count());
    let mut tree_edges = Vec::new();
    let mut round = 0;

    loop {
        round += 1;
        let mut cheapest_edges: HashMap<Graph::NodeIndex, Graph::EdgeIndex> = HashMap::new();
        for edge in graph.edge_indices() {
            let endpoints = graph.edge_endpoints(edge);
            let from_component = components.find(&endpoints.from_node);
            let to_component = components.find(&endpoints.to_node);
            if from_component == to_component {
                continue;
            }

            for component in [from_component, to_component] {
                let is_cheaper = match cheapest_edges.get(&component) {
                    Some(&cheapest) => {
                        compare_edges(graph, weight_operations, edge, cheapest) == Ordering::Less
                    }
                    None => true,
                };
                if is_cheaper {
                    cheapest_edges.insert(component, edge);
                }
            }
        }

        if cheapest_edges.is_empty() {
            break;
        }

        let mut selected_edges: Vec<_> = cheapest_edges.into_values().collect();
        selected_edges.sort_unstable();
        selected_edges.dedup();
        trace!(
            "Boruvka round {} selected {} edges",
            round,
            selected_edges.len()
        );
        for edge in selected_edges {
            let endpoints = graph.edge_endpoints(edge);
            if components.union(&endpoints.from_node, &endpoints.to_node) {
                tree_edges.push(edge);
            }
        }
    }

    debug!("Boruvka finished after {} rounds", round);
    SpanningTree::from_edges(graph, tree_edges, weight_operations)
}

#[cfg(test)]
mod tests {
    use crate::algo::spanning_tree::{boruvka, kruskal};
    use crate::implementation::petgraph_impl;
    use crate::interface::MutableGraphContainer;
    use crate::weight::BaseWeightOperations;

    #[test]
    fn test_boruvka_with_equal_weights() {
        // A cycle of equal weights, where choosing by weight alone could select all edges.
        let mut graph = petgraph_impl::new_undirected();
        let n: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        for i in 0..4 {
            graph.add_edge(n[i], n[(i + 1) % 4], 1i32);
        }

        let tree = boruvka(&graph, &BaseWeightOperations);
        assert_eq!(tree.edge_count(), 3);
        assert_eq!(*tree.weight(), 3);
        assert_eq!(tree.component_count(), 1);
    }

    #[test]
    fn test_boruvka_agrees_with_kruskal() {
        let mut graph = petgraph_impl::new();
        let n: Vec<_> = (0..9).map(|_| graph.add_node(())).collect();
        for &(from, to, weight) in &[
            (0, 1, 4i64),
            (0, 7, 8),
            (1, 2, 8),
            (1, 7, 11),
            (2, 3, 7),
            (2, 5, 4),
            (2, 8, 2),
            (3, 4, 9),
            (3, 5, 14),
            (4, 5, 10),
            (5, 6, 2),
            (6, 7, 1),
            (6, 8, 6),
            (7, 8, 7),
        ] {
            graph.add_edge(n[from], n[to], weight);
        }

        let expected = kruskal(&graph, &BaseWeightOperations);
        let tree = boruvka(&graph, &BaseWeightOperations);
        assert_eq!(tree.weight(), expected.weight());
        assert_eq!(*tree.weight(), 37);
        assert_eq!(tree.edge_count(), 8);
    }
}
