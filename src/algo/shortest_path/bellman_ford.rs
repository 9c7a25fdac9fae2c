use crate::algo::shortest_path::{
    check_node, edge_weight, PredecessorTrail, ShortestDistances, ShortestPathTree,
};
use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::StaticGraph;
use crate::weight::{OrderedMonoid, WeightedEdgeData};

/// Relaxes the edge `(from, to)`, returning true if the distance of `to` improved.
fn relax<Graph, WeightType, Operations>(
    graph: &Graph,
    weight_operations: &Operations,
    distances: &mut ShortestDistances<Graph, WeightType>,
    trail: &mut PredecessorTrail<Graph>,
    from: Graph::NodeIndex,
    to: Graph::NodeIndex,
    edge: Graph::EdgeIndex,
) -> bool
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
{
    let new_distance = match distances.get(from) {
        Some(distance) => weight_operations.append(distance, &edge_weight(graph, edge)),
        None => return false,
    };
    let improves = match distances.get(to) {
        Some(old_distance) => weight_operations.is_less(&new_distance, old_distance),
        None => true,
    };
    if improves {
        distances.set(to, new_distance);
        trail.add_predecessor(to, from, edge);
    }
    improves
}

/// Computes the shortest distances and paths from `source` to all reachable nodes with the Bellman-Ford algorithm.
///
/// Edge weights may be negative.
/// All edges are relaxed in at most `|V| - 1` rounds, stopping early if a round changes nothing.
/// If afterwards an edge can still be relaxed, then there is a negative-weight cycle reachable from `source`,
/// and the computation fails with `NegativeWeightCycle`, naming a node on the cycle.
///
/// Undirected edges are relaxed in both directions, hence an undirected edge with negative weight is a negative cycle.
pub fn bellman_ford<'a, Graph, WeightType, Operations>(
    graph: &'a Graph,
    source: Graph::NodeIndex,
    weight_operations: &'a Operations,
) -> Result<ShortestPathTree<'a, Graph, WeightType, Operations>>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
{
    check_node(graph, source)?;
    debug!(
        "Bellman-Ford from {} in a graph with {} nodes and {} edges",
        source.as_usize(),
        graph.node_count(),
        graph.edge_count()
    );

    let mut distances = ShortestDistances::new(graph);
    let mut trail = PredecessorTrail::new(graph);
    distances.set(source, weight_operations.zero());
    let directed = graph.is_directed();

    let relax_all = |distances: &mut ShortestDistances<Graph, WeightType>,
                     trail: &mut PredecessorTrail<Graph>|
     -> Option<Graph::NodeIndex> {
        let mut last_relaxed = None;
        for edge in graph.edge_indices() {
            let endpoints = graph.edge_endpoints(edge);
            let (from, to) = (endpoints.from_node, endpoints.to_node);
            if relax(graph, weight_operations, distances, trail, from, to, edge) {
                last_relaxed = Some(to);
            }
            if !directed && relax(graph, weight_operations, distances, trail, to, from, edge) {
                last_relaxed = Some(from);
            }
        }
        last_relaxed
    };

    for round in 1..graph.node_count() {
        if relax_all(&mut distances, &mut trail).is_none() {
            debug!("Bellman-Ford converged after {} rounds", round);
            break;
        }
    }

    if let Some(relaxed_node) = relax_all(&mut distances, &mut trail) {
        // Walking back |V| steps from a node that is still relaxable ends on the cycle.
        let mut node = relaxed_node;
        for _ in 0..graph.node_count() {
            match trail.predecessor(node) {
                Some(predecessor) => node = predecessor.node_id,
                None => break,
            }
        }
        warn!(
            "Bellman-Ford found a negative-weight cycle through node {}",
            node.as_usize()
        );
        bail!(ErrorKind::NegativeWeightCycle(node.as_usize()));
    }

    Ok(ShortestPathTree::new(
        graph,
        weight_operations,
        source,
        distances,
        trail,
    ))
}

#[cfg(test)]
mod tests {
    use crate::algo::shortest_path::{bellman_ford, single_source_dijkstra};
    use crate::error::ErrorKind;
    use crate::implementation::petgraph_impl;
    use crate::interface::MutableGraphContainer;
    use crate::weight::BaseWeightOperations;

    #[test]
    fn test_negative_weights() {
        let mut graph = petgraph_impl::new();
        let n: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        graph.add_edge(n[0], n[1], 4i32);
        graph.add_edge(n[0], n[2], 5);
        graph.add_edge(n[2], n[1], -3);
        graph.add_edge(n[1], n[3], 2);

        let tree = bellman_ford(&graph, n[0], &BaseWeightOperations).unwrap();
        assert_eq!(tree.distance(n[1]), Some(&2));
        assert_eq!(tree.distance(n[3]), Some(&4));
        let path = tree.shortest_path(n[3]).unwrap();
        assert_eq!(path.nodes(), &[n[0], n[2], n[1], n[3]]);
        assert_eq!(*path.weight(), 4);
    }

    #[test]
    fn test_negative_cycle() {
        let mut graph = petgraph_impl::new();
        let n: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        graph.add_edge(n[3], n[0], 1i32);
        graph.add_edge(n[0], n[1], -2);
        graph.add_edge(n[1], n[2], -4);
        graph.add_edge(n[2], n[0], -1);

        let error = bellman_ford(&graph, n[3], &BaseWeightOperations)
            .err()
            .unwrap();
        match error.kind() {
            ErrorKind::NegativeWeightCycle(node) => assert!(*node < 3, "node {}", node),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_negative_cycle_is_ignored() {
        let mut graph = petgraph_impl::new();
        let n: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        graph.add_edge(n[0], n[1], -2i32);
        graph.add_edge(n[1], n[0], -4);
        graph.add_edge(n[3], n[2], 3);

        let tree = bellman_ford(&graph, n[2], &BaseWeightOperations).unwrap();
        assert_eq!(tree.reachable_nodes().collect::<Vec<_>>(), vec![n[2]]);
        assert!(tree.paths().unwrap().is_empty());
        assert!(matches!(
            tree.shortest_path(n[3]).err().unwrap().kind(),
            ErrorKind::PathNotFound(2, 3)
        ));
    }

    #[test]
    fn test_agrees_with_dijkstra() {
        let mut graph = petgraph_impl::new_undirected();
        let n: Vec<_> = (0..5).map(|_| graph.add_node(())).collect();
        graph.add_edge(n[0], n[1], 3i64);
        graph.add_edge(n[1], n[2], 1);
        graph.add_edge(n[0], n[2], 5);
        graph.add_edge(n[2], n[3], 7);
        graph.add_edge(n[1], n[3], 9);

        let expected = single_source_dijkstra(&graph, n[0], &BaseWeightOperations).unwrap();
        let actual = bellman_ford(&graph, n[0], &BaseWeightOperations).unwrap();
        for &node in &n {
            assert_eq!(expected.distance(node), actual.distance(node));
        }
        assert_eq!(actual.distance(n[3]), Some(&11));
    }
}
