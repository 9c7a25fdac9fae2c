use crate::algo::shortest_path::{
    check_node, edge_weight, PredecessorTrail, ShortestDistances, WeightedPath,
};
use crate::collections::fibonacci_heap::FibonacciHeap;
use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::{GraphBase, StaticGraph};
use crate::weight::{OrderedMonoid, WeightOrder, WeightedEdgeData};
use bitvector::BitVector;

/// The state of one of the two searches.
/// The backward search records successors in its trail.
struct SearchFrontier<'a, Graph: GraphBase, WeightType, Operations> {
    queue: FibonacciHeap<Graph::NodeIndex, WeightType, WeightOrder<'a, Operations>>,
    distances: ShortestDistances<Graph, WeightType>,
    settled: BitVector,
    trail: PredecessorTrail<Graph>,
    backward: bool,
}

impl<'a, Graph, WeightType, Operations> SearchFrontier<'a, Graph, WeightType, Operations>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
{
    fn new(
        graph: &Graph,
        weight_operations: &'a Operations,
        start: Graph::NodeIndex,
        backward: bool,
    ) -> Self {
        let mut result = Self {
            queue: FibonacciHeap::with_order(WeightOrder::new(weight_operations)),
            distances: ShortestDistances::new(graph),
            settled: BitVector::new(graph.node_count()),
            trail: PredecessorTrail::new(graph),
            backward,
        };
        let zero = weight_operations.zero();
        result.queue.push(start, zero.clone());
        result.distances.set(start, zero);
        result
    }

    fn min_key(&self) -> Option<&WeightType> {
        self.queue.peek().map(|(_, key)| key)
    }

    /// Settles the next node of this frontier and relaxes its edges.
    /// Whenever a relaxed edge leads to a node known to the other frontier, the best meeting node is updated.
    fn step(
        &mut self,
        graph: &Graph,
        weight_operations: &Operations,
        other: &Self,
        best: &mut Option<(WeightType, Graph::NodeIndex)>,
    ) {
        let (node, distance) = match self.queue.pop() {
            Some(entry) => entry,
            None => return,
        };
        self.settled.insert(node.as_usize());
        trace!(
            "Settled node {} in {} search",
            node.as_usize(),
            if self.backward { "backward" } else { "forward" }
        );

        let neighbors: Vec<_> = if self.backward {
            graph.in_neighbors(node).collect()
        } else {
            graph.out_neighbors(node).collect()
        };

        for neighbor in neighbors {
            let neighbor_node = neighbor.node_id;
            if self.settled.contains(neighbor_node.as_usize()) {
                continue;
            }

            let new_distance =
                weight_operations.append(&distance, &edge_weight(graph, neighbor.edge_id));
            let improves = match self.distances.get(neighbor_node) {
                Some(old_distance) => weight_operations.is_less(&new_distance, old_distance),
                None => true,
            };
            if improves {
                self.queue.push(neighbor_node, new_distance.clone());
                self.distances.set(neighbor_node, new_distance);
                self.trail
                    .add_predecessor(neighbor_node, node, neighbor.edge_id);
            }

            if let (Some(own_distance), Some(other_distance)) = (
                self.distances.get(neighbor_node),
                other.distances.get(neighbor_node),
            ) {
                let total = weight_operations.append(own_distance, other_distance);
                let is_better = match best {
                    Some((best_total, _)) => weight_operations.is_less(&total, best_total),
                    None => true,
                };
                if is_better {
                    trace!("New best meeting node {}", neighbor_node.as_usize());
                    *best = Some((total, neighbor_node));
                }
            }
        }
    }
}

/// Computes a shortest path from `source` to `target` by searching forward from `source` and backward from `target` simultaneously.
///
/// The search that has the smaller minimum distance in its queue advances.
/// It stops when the sum of both minimum distances is at least the weight of the best path found so far.
/// Edge weights must be non-negative.
pub fn bidirectional_dijkstra<'a, Graph, WeightType, Operations>(
    graph: &'a Graph,
    source: Graph::NodeIndex,
    target: Graph::NodeIndex,
    weight_operations: &'a Operations,
) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
{
    check_node(graph, source)?;
    check_node(graph, target)?;
    debug!(
        "Bidirectional Dijkstra from {} to {} in a graph with {} nodes",
        source.as_usize(),
        target.as_usize(),
        graph.node_count()
    );
    if source == target {
        return Ok(WeightedPath::trivial(source, weight_operations.zero()));
    }

    let mut forward = SearchFrontier::new(graph, weight_operations, source, false);
    let mut backward = SearchFrontier::new(graph, weight_operations, target, true);
    let mut best = None;

    loop {
        let (forward_min, backward_min) = match (forward.min_key(), backward.min_key()) {
            (Some(forward_min), Some(backward_min)) => (forward_min, backward_min),
            _ => break,
        };
        if let Some((best_total, _)) = &best {
            let frontier_total = weight_operations.append(forward_min, backward_min);
            if !weight_operations.is_less(&frontier_total, best_total) {
                break;
            }
        }

        if weight_operations.is_less(backward_min, forward_min) {
            backward.step(graph, weight_operations, &forward, &mut best);
        } else {
            forward.step(graph, weight_operations, &backward, &mut best);
        }
    }

    match best {
        Some((_, meeting_node)) => {
            debug!(
                "Bidirectional Dijkstra met in node {}, settled {} nodes forward and {} backward",
                meeting_node.as_usize(),
                forward.settled.len(),
                backward.settled.len()
            );
            forward.trail.build_bidirectional_path(
                graph,
                source,
                meeting_node,
                target,
                &backward.trail,
                weight_operations,
            )
        }
        None => Err(ErrorKind::PathNotFound(source.as_usize(), target.as_usize()).into()),
    }
}
