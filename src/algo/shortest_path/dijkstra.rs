use crate::algo::shortest_path::{
    check_node, edge_weight, Heuristic, PredecessorTrail, ShortestDistances, ShortestPathTree,
    WeightedPath,
};
use crate::collections::fibonacci_heap::FibonacciHeap;
use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::{GraphBase, StaticGraph};
use crate::weight::{OrderedMonoid, WeightOrder, WeightedEdgeData};
use bitvector::BitVector;
use std::collections::{HashMap, HashSet};

/// Reusable data structures for Dijkstra's shortest path algorithm and A*.
///
/// Edge weights must be non-negative with respect to the order of the weight operations.
/// This is not checked, and negative weights result in wrong distances.
pub struct Dijkstra<'a, Graph: GraphBase, WeightType, Operations> {
    graph: &'a Graph,
    weight_operations: &'a Operations,
    queue: FibonacciHeap<Graph::NodeIndex, WeightType, WeightOrder<'a, Operations>>,
    distances: ShortestDistances<Graph, WeightType>,
    settled: BitVector,
    trail: PredecessorTrail<Graph>,
}

impl<'a, Graph, WeightType, Operations> Dijkstra<'a, Graph, WeightType, Operations>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
{
    /// Create the data structures for the given graph.
    pub fn new(graph: &'a Graph, weight_operations: &'a Operations) -> Self {
        Self {
            graph,
            weight_operations,
            queue: FibonacciHeap::with_order(WeightOrder::new(weight_operations)),
            distances: ShortestDistances::new(graph),
            settled: BitVector::new(graph.node_count()),
            trail: PredecessorTrail::new(graph),
        }
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.distances.clear();
        self.settled.clear();
        self.trail.clear();
    }

    /// Settles nodes in the order of their distance from `source` plus their heuristic estimate towards `goal`.
    /// `stop` is called for each settled node with its distance, and ends the search when it returns true.
    ///
    /// If `allow_reopening` is set, settled nodes whose distance improves are settled again.
    fn search(
        &mut self,
        source: Graph::NodeIndex,
        goal: Option<(Graph::NodeIndex, &dyn Heuristic<Graph::NodeIndex, WeightType>)>,
        allow_reopening: bool,
        mut stop: impl FnMut(Graph::NodeIndex, &WeightType) -> bool,
    ) {
        let graph = self.graph;
        let weight_operations = self.weight_operations;
        let key_of = |node: Graph::NodeIndex, distance: &WeightType| match goal {
            Some((goal, heuristic)) => {
                weight_operations.append(distance, &heuristic.estimate(node, goal))
            }
            None => distance.clone(),
        };

        self.reset();
        let zero = weight_operations.zero();
        self.queue.push(source, key_of(source, &zero));
        self.distances.set(source, zero);

        while let Some((node, _)) = self.queue.pop() {
            self.settled.insert(node.as_usize());
            let distance = self
                .distances
                .get(node)
                .cloned()
                .expect("queued nodes have a distance");
            trace!("Settled node {}", node.as_usize());

            if stop(node, &distance) {
                return;
            }

            for neighbor in graph.out_neighbors(node) {
                let neighbor_node = neighbor.node_id;
                if !allow_reopening && self.settled.contains(neighbor_node.as_usize()) {
                    continue;
                }

                let new_distance = weight_operations
                    .append(&distance, &edge_weight(graph, neighbor.edge_id));
                let improves = match self.distances.get(neighbor_node) {
                    Some(old_distance) => weight_operations.is_less(&new_distance, old_distance),
                    None => true,
                };

                if improves {
                    if self.settled.contains(neighbor_node.as_usize()) {
                        trace!("Reopening node {}", neighbor_node.as_usize());
                        self.settled.remove(neighbor_node.as_usize());
                    }
                    self.queue
                        .push(neighbor_node, key_of(neighbor_node, &new_distance));
                    self.distances.set(neighbor_node, new_distance);
                    self.trail
                        .add_predecessor(neighbor_node, node, neighbor.edge_id);
                }
            }
        }
    }

    fn reconstruct_path(
        &self,
        source: Graph::NodeIndex,
        target: Graph::NodeIndex,
    ) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>> {
        if !self.settled.contains(target.as_usize()) {
            bail!(ErrorKind::PathNotFound(
                source.as_usize(),
                target.as_usize()
            ));
        }
        self.trail
            .build_path(self.graph, source, target, self.weight_operations)
    }

    /// Computes a shortest path from `source` to `target`.
    /// The search stops as soon as `target` is settled.
    pub fn shortest_path(
        &mut self,
        source: Graph::NodeIndex,
        target: Graph::NodeIndex,
    ) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>> {
        check_node(self.graph, source)?;
        check_node(self.graph, target)?;
        debug!(
            "Dijkstra from {} to {} in a graph with {} nodes",
            source.as_usize(),
            target.as_usize(),
            self.graph.node_count()
        );

        self.search(source, None, false, |node, _| node == target);
        let path = self.reconstruct_path(source, target);
        debug!("Dijkstra finished, path found: {}", path.is_ok());
        path
    }

    /// Computes a shortest path from `source` to `goal` with A*, guided by the given heuristic.
    ///
    /// The heuristic must be admissible.
    /// It does not need to be consistent, since settled nodes are reopened if a shorter path to them is found.
    pub fn astar_path<H: Heuristic<Graph::NodeIndex, WeightType>>(
        &mut self,
        source: Graph::NodeIndex,
        goal: Graph::NodeIndex,
        heuristic: &H,
    ) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>> {
        check_node(self.graph, source)?;
        check_node(self.graph, goal)?;
        debug!(
            "A* from {} to {} in a graph with {} nodes",
            source.as_usize(),
            goal.as_usize(),
            self.graph.node_count()
        );

        self.search(source, Some((goal, heuristic)), true, |node, _| node == goal);
        let path = self.reconstruct_path(source, goal);
        debug!("A* finished, path found: {}", path.is_ok());
        path
    }

    /// Computes the shortest distances from `source` to all reachable nodes.
    pub fn shortest_path_tree(
        &mut self,
        source: Graph::NodeIndex,
    ) -> Result<ShortestPathTree<'a, Graph, WeightType, Operations>> {
        check_node(self.graph, source)?;
        debug!(
            "Single-source Dijkstra from {} in a graph with {} nodes",
            source.as_usize(),
            self.graph.node_count()
        );

        self.search(source, None, false, |_, _| false);
        let distances = std::mem::replace(&mut self.distances, ShortestDistances::new(self.graph));
        let trail = std::mem::replace(&mut self.trail, PredecessorTrail::new(self.graph));
        debug!(
            "Single-source Dijkstra settled {} nodes",
            self.settled.len()
        );
        Ok(ShortestPathTree::new(
            self.graph,
            self.weight_operations,
            source,
            distances,
            trail,
        ))
    }

    /// Compute the shortest distances from `source` to all `targets` that are at most `max_weight` away.
    /// Targets that are further away or unreachable are missing from the result.
    ///
    /// The search stops when all targets were found, or when the distance of the settled nodes exceeds `max_weight`.
    pub fn shortest_path_lens(
        &mut self,
        source: Graph::NodeIndex,
        targets: &HashSet<Graph::NodeIndex>,
        max_weight: &WeightType,
    ) -> Result<HashMap<Graph::NodeIndex, WeightType>> {
        check_node(self.graph, source)?;
        for &target in targets {
            check_node(self.graph, target)?;
        }

        let weight_operations = self.weight_operations;
        let mut shortest_path_lens = HashMap::new();
        if targets.is_empty() {
            return Ok(shortest_path_lens);
        }

        self.search(source, None, false, |node, distance| {
            if weight_operations.is_less(max_weight, distance) {
                warn!(
                    "Maximum weight reached, {} of {} targets not found",
                    targets.len() - shortest_path_lens.len(),
                    targets.len()
                );
                return true;
            }
            if targets.contains(&node) {
                shortest_path_lens.insert(node, distance.clone());
            }
            shortest_path_lens.len() == targets.len()
        });

        Ok(shortest_path_lens)
    }
}

/// Computes a shortest path from `source` to `target` with Dijkstra's algorithm.
///
/// Fails with `NodeNotInGraph` if one of the nodes is not part of the graph, and with `PathNotFound` if `target` is not reachable from `source`.
/// Edge weights must be non-negative.
pub fn dijkstra<'a, Graph, WeightType, Operations>(
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
    Dijkstra::new(graph, weight_operations).shortest_path(source, target)
}

/// Computes the shortest distances and paths from `source` to all reachable nodes with Dijkstra's algorithm.
/// Edge weights must be non-negative.
pub fn single_source_dijkstra<'a, Graph, WeightType, Operations>(
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
    Dijkstra::new(graph, weight_operations).shortest_path_tree(source)
}

/// Computes a shortest path from `source` to `goal` with A*.
///
/// The priority of a node is its distance from `source` plus the estimate of `heuristic` towards `goal`.
/// The heuristic must be admissible, i.e. never overestimate the true remaining distance.
/// Edge weights must be non-negative.
pub fn astar<'a, Graph, WeightType, Operations, H>(
    graph: &'a Graph,
    source: Graph::NodeIndex,
    goal: Graph::NodeIndex,
    heuristic: &H,
    weight_operations: &'a Operations,
) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
    H: Heuristic<Graph::NodeIndex, WeightType>,
{
    Dijkstra::new(graph, weight_operations).astar_path(source, goal, heuristic)
}

#[cfg(test)]
mod tests {
    use crate::algo::shortest_path::{astar, dijkstra, single_source_dijkstra, Dijkstra};
    use crate::error::ErrorKind;
    use crate::implementation::petgraph_impl;
    use crate::interface::{ImmutableGraphContainer, MutableGraphContainer};
    use crate::weight::BaseWeightOperations;
    use std::collections::HashSet;

    #[test]
    fn test_dijkstra_classic_example() {
        let mut graph = petgraph_impl::new();
        let n: Vec<_> = (1..=6).map(|i| graph.add_node(i)).collect();
        graph.add_edge(n[0], n[5], 14);
        graph.add_edge(n[0], n[2], 9);
        graph.add_edge(n[0], n[1], 7);
        graph.add_edge(n[1], n[2], 10);
        graph.add_edge(n[1], n[3], 15);
        graph.add_edge(n[2], n[5], 2);
        graph.add_edge(n[2], n[3], 11);
        graph.add_edge(n[3], n[4], 6);
        graph.add_edge(n[5], n[4], 9);

        let path = dijkstra(&graph, n[0], n[4], &BaseWeightOperations).unwrap();
        assert_eq!(path.nodes(), &[n[0], n[2], n[5], n[4]]);
        assert_eq!(*path.weight(), 20i32);
        let labels: Vec<_> = path.nodes().iter().map(|&node| *graph.node_data(node)).collect();
        assert_eq!(labels, vec![1, 3, 6, 5]);
    }

    #[test]
    fn test_dijkstra_unreachable_and_invalid() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        graph.add_edge(n1, n0, 1.5f64);

        let error = dijkstra(&graph, n0, n1, &BaseWeightOperations).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::PathNotFound(0, 1)));
        let error = dijkstra(&graph, n0, 7usize.into(), &BaseWeightOperations).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::NodeNotInGraph(7)));

        let path = dijkstra(&graph, n1, n0, &BaseWeightOperations).unwrap();
        assert_eq!(*path.weight(), 1.5);
        let trivial = dijkstra(&graph, n0, n0, &BaseWeightOperations).unwrap();
        assert!(trivial.is_trivial());
        assert_eq!(*trivial.weight(), 0.0);
    }

    #[test]
    fn test_dijkstra_undirected() {
        let mut graph = petgraph_impl::new_undirected();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        graph.add_edge(n1, n0, 4i64);
        graph.add_edge(n2, n1, 1);
        graph.add_edge(n2, n0, 6);

        let path = dijkstra(&graph, n0, n2, &BaseWeightOperations).unwrap();
        assert_eq!(path.nodes(), &[n0, n1, n2]);
        assert_eq!(*path.weight(), 5);
    }

    #[test]
    fn test_single_source_dijkstra() {
        let mut graph = petgraph_impl::new();
        let nodes: Vec<_> = (0..5).map(|_| graph.add_node(())).collect();
        graph.add_edge(nodes[0], nodes[1], 2i32);
        graph.add_edge(nodes[1], nodes[2], 2);
        graph.add_edge(nodes[0], nodes[2], 5);
        graph.add_edge(nodes[2], nodes[3], 1);

        let tree = single_source_dijkstra(&graph, nodes[0], &BaseWeightOperations).unwrap();
        assert_eq!(tree.source(), nodes[0]);
        assert_eq!(tree.distance(nodes[3]), Some(&5));
        assert_eq!(tree.distance(nodes[4]), None);
        assert_eq!(tree.shortest_distance(nodes[2]).unwrap(), 4);
        assert!(matches!(
            tree.shortest_distance(nodes[4]).unwrap_err().kind(),
            ErrorKind::PathNotFound(0, 4)
        ));
        assert_eq!(
            tree.reachable_nodes().collect::<Vec<_>>(),
            nodes[0..4].to_vec()
        );

        let paths = tree.paths().unwrap();
        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert_eq!(path.nodes().len(), path.edges().len() + 1);
            assert_eq!(Some(path.weight()), tree.distance(path.target()));
        }
        assert_eq!(
            tree.shortest_path(nodes[3]).unwrap().nodes(),
            &[nodes[0], nodes[1], nodes[2], nodes[3]]
        );
    }

    #[test]
    fn test_shortest_path_tree_queries_with_foreign_node() {
        let mut graph = petgraph_impl::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, 3i64);

        let tree = single_source_dijkstra(&graph, a, &BaseWeightOperations).unwrap();
        let foreign = 9usize.into();
        assert_eq!(tree.distance(foreign), None);
        assert!(matches!(
            tree.shortest_distance(foreign).unwrap_err().kind(),
            ErrorKind::NodeNotInGraph(9)
        ));
        assert!(matches!(
            tree.shortest_path(foreign).unwrap_err().kind(),
            ErrorKind::NodeNotInGraph(9)
        ));
        assert_eq!(tree.distance(b), Some(&3));
    }

    #[test]
    fn test_shortest_path_lens() {
        let mut graph = petgraph_impl::new();
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        let n3 = graph.add_node(());
        graph.add_edge(n1, n2, 2i64);
        graph.add_edge(n2, n3, 2);
        graph.add_edge(n1, n3, 5);

        let operations = BaseWeightOperations;
        let mut dijkstra = Dijkstra::new(&graph, &operations);
        let targets: HashSet<_> = [n3].iter().copied().collect();
        let shortest_path_lens = dijkstra.shortest_path_lens(n1, &targets, &6).unwrap();
        assert_eq!(shortest_path_lens, [(n3, 4)].iter().copied().collect());

        // The data structures are reusable.
        let shortest_path_lens = dijkstra.shortest_path_lens(n2, &targets, &6).unwrap();
        assert_eq!(shortest_path_lens, [(n3, 2)].iter().copied().collect());

        let shortest_path_lens = dijkstra.shortest_path_lens(n3, &targets, &6).unwrap();
        assert_eq!(shortest_path_lens, [(n3, 0)].iter().copied().collect());

        let shortest_path_lens = dijkstra.shortest_path_lens(n1, &targets, &3).unwrap();
        assert!(shortest_path_lens.is_empty());

        let targets: HashSet<_> = [n1].iter().copied().collect();
        let shortest_path_lens = dijkstra.shortest_path_lens(n3, &targets, &6).unwrap();
        assert!(shortest_path_lens.is_empty());
    }

    #[test]
    fn test_astar_on_grid() {
        // A 4x4 grid with unit weights, nodes annotated with their coordinates.
        let mut graph = petgraph_impl::new_undirected();
        let nodes: Vec<Vec<_>> = (0..4)
            .map(|y| (0..4).map(|x| graph.add_node((x, y))).collect())
            .collect();
        for y in 0..4 {
            for x in 0..4 {
                if x < 3 {
                    graph.add_edge(nodes[y][x], nodes[y][x + 1], 1i32);
                }
                if y < 3 {
                    graph.add_edge(nodes[y][x], nodes[y + 1][x], 1);
                }
            }
        }

        let manhattan = |node, goal| {
            let (x1, y1): (i32, i32) = *graph.node_data(node);
            let (x2, y2): (i32, i32) = *graph.node_data(goal);
            (x1 - x2).abs() + (y1 - y2).abs()
        };
        let path = astar(
            &graph,
            nodes[0][0],
            nodes[3][2],
            &manhattan,
            &BaseWeightOperations,
        )
        .unwrap();
        assert_eq!(*path.weight(), 5);
        assert_eq!(path.len(), 5);
        assert_eq!(path.target(), nodes[3][2]);

        let reference = dijkstra(&graph, nodes[0][0], nodes[3][2], &BaseWeightOperations).unwrap();
        assert_eq!(reference.weight(), path.weight());
    }

    #[test]
    fn test_astar_reopens_settled_nodes() {
        let mut graph = petgraph_impl::new();
        let s = graph.add_node(0);
        let a = graph.add_node(4);
        let b = graph.add_node(0);
        let c = graph.add_node(0);
        let t = graph.add_node(0);
        graph.add_edge(s, a, 1i32);
        graph.add_edge(a, c, 1);
        graph.add_edge(s, b, 1);
        graph.add_edge(b, c, 3);
        graph.add_edge(c, t, 5);

        // Admissible, but not consistent: c is settled through b before the shorter path through a is known.
        let heuristic = |node, _goal| *graph.node_data(node);
        let path = astar(&graph, s, t, &heuristic, &BaseWeightOperations).unwrap();
        assert_eq!(*path.weight(), 7);
        assert_eq!(path.nodes(), &[s, a, c, t]);
    }
}
