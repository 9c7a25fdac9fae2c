use crate::algo::shortest_path::{check_node, edge_weight, WeightedPath};
use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::{GraphBase, ImmutableGraphContainer};
use crate::weight::{OrderedMonoid, WeightedEdgeData};

/// The shortest distances between all pairs of nodes of a graph, as computed by [floyd_warshall](floyd_warshall).
///
/// For each pair it stores the distance, the intermediate node that last improved the pair, and the lightest direct edge.
/// Paths are reconstructed by splitting at the intermediate nodes until only direct edges remain.
pub struct AllPairsShortestPaths<'a, Graph: GraphBase, WeightType, Operations> {
    graph: &'a Graph,
    weight_operations: &'a Operations,
    node_count: usize,
    distances: Vec<Option<WeightType>>,
    midpoints: Vec<Option<Graph::NodeIndex>>,
    direct_edges: Vec<Option<Graph::EdgeIndex>>,
}

/// Computes the shortest distances between all pairs of nodes with the Floyd-Warshall algorithm in `O(|V|^3)` time.
///
/// Parallel edges are collapsed to the lightest one, and undirected edges are used in both directions.
/// Negative edge weights are allowed, but the graph must not contain a negative-weight cycle.
/// This precondition is not checked, and the resulting distances are meaningless if it is violated.
/// Reconstructing a path in such a graph may fail with `InvalidArgument` instead of returning a path.
pub fn floyd_warshall<'a, Graph, WeightType, Operations>(
    graph: &'a Graph,
    weight_operations: &'a Operations,
) -> AllPairsShortestPaths<'a, Graph, WeightType, Operations>
where
    Graph: ImmutableGraphContainer,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
{
    let node_count = graph.node_count();
    debug!(
        "Floyd-Warshall in a graph with {} nodes and {} edges",
        node_count,
        graph.edge_count()
    );

    let mut result = AllPairsShortestPaths {
        graph,
        weight_operations,
        node_count,
        distances: vec![None; node_count * node_count],
        midpoints: vec![None; node_count * node_count],
        direct_edges: vec![None; node_count * node_count],
    };

    for node in graph.node_indices() {
        let index = result.pair_index(node, node);
        result.distances[index] = Some(weight_operations.zero());
    }

    for edge in graph.edge_indices() {
        let endpoints = graph.edge_endpoints(edge);
        if endpoints.is_self_loop() {
            continue;
        }
        result.offer_direct_edge(endpoints.from_node, endpoints.to_node, edge);
        if !graph.is_directed() {
            result.offer_direct_edge(endpoints.to_node, endpoints.from_node, edge);
        }
    }

    for k in graph.node_indices() {
        for i in graph.node_indices() {
            let first_half = match &result.distances[result.pair_index(i, k)] {
                Some(distance) => distance.clone(),
                None => continue,
            };
            for j in graph.node_indices() {
                let candidate = match &result.distances[result.pair_index(k, j)] {
                    Some(second_half) => weight_operations.append(&first_half, second_half),
                    None => continue,
                };
                let index = result.pair_index(i, j);
                let improves = match &result.distances[index] {
                    Some(distance) => weight_operations.is_less(&candidate, distance),
                    None => true,
                };
                if improves {
                    result.distances[index] = Some(candidate);
                    result.midpoints[index] = Some(k);
                }
            }
        }
    }

    debug!("Floyd-Warshall finished");
    result
}

impl<'a, Graph, WeightType, Operations> AllPairsShortestPaths<'a, Graph, WeightType, Operations>
where
    Graph: ImmutableGraphContainer,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    WeightType: Clone,
    Operations: OrderedMonoid<WeightType>,
{
    #[inline]
    fn pair_index(&self, from: Graph::NodeIndex, to: Graph::NodeIndex) -> usize {
        from.as_usize() * self.node_count + to.as_usize()
    }

    /// Uses `edge` as direct connection from `from` to `to` if it is lighter than the current one.
    fn offer_direct_edge(
        &mut self,
        from: Graph::NodeIndex,
        to: Graph::NodeIndex,
        edge: Graph::EdgeIndex,
    ) {
        let index = self.pair_index(from, to);
        let weight = edge_weight(self.graph, edge);
        let improves = match &self.distances[index] {
            Some(distance) => self.weight_operations.is_less(&weight, distance),
            None => true,
        };
        if improves {
            self.distances[index] = Some(weight);
            self.direct_edges[index] = Some(edge);
        }
    }

    /// Returns the distance from `source` to `target`, or `None` if `target` is not reachable from `source`.
    pub fn distance(&self, source: Graph::NodeIndex, target: Graph::NodeIndex) -> Option<&WeightType> {
        if !self.graph.contains_node_index(source) || !self.graph.contains_node_index(target) {
            return None;
        }
        self.distances[self.pair_index(source, target)].as_ref()
    }

    /// Returns the distance from `source` to `target`.
    /// Fails with `PathNotFound` if `target` is not reachable from `source`.
    pub fn shortest_distance(
        &self,
        source: Graph::NodeIndex,
        target: Graph::NodeIndex,
    ) -> Result<WeightType> {
        check_node(self.graph, source)?;
        check_node(self.graph, target)?;
        self.distances[self.pair_index(source, target)]
            .clone()
            .ok_or_else(|| ErrorKind::PathNotFound(source.as_usize(), target.as_usize()).into())
    }

    /// Returns a shortest path from `source` to `target`.
    /// Fails with `PathNotFound` if `target` is not reachable from `source`,
    /// and with `InvalidArgument` if the path cannot be reconstructed because the graph violates the precondition of [floyd_warshall](floyd_warshall).
    pub fn shortest_path(
        &self,
        source: Graph::NodeIndex,
        target: Graph::NodeIndex,
    ) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>> {
        check_node(self.graph, source)?;
        check_node(self.graph, target)?;
        if self.distances[self.pair_index(source, target)].is_none() {
            bail!(ErrorKind::PathNotFound(source.as_usize(), target.as_usize()));
        }
        if source == target {
            return Ok(WeightedPath::trivial(source, self.weight_operations.zero()));
        }

        let mut nodes = vec![source];
        let mut edges = Vec::new();
        let mut stack = vec![(source, target)];
        let mut steps = 0usize;
        while let Some((from, to)) = stack.pop() {
            // Midpoints only form a cycle if the graph contains a negative-weight cycle.
            steps += 1;
            if steps > 2 * self.node_count * self.node_count {
                bail!(ErrorKind::InvalidArgument(format!(
                    "cannot reconstruct a path from {} to {}, the graph must not contain negative-weight cycles",
                    source.as_usize(),
                    target.as_usize()
                )));
            }

            let index = self.pair_index(from, to);
            if let Some(midpoint) = self.midpoints[index] {
                stack.push((midpoint, to));
                stack.push((from, midpoint));
            } else if let Some(edge) = self.direct_edges[index] {
                edges.push(edge);
                nodes.push(to);
            } else {
                bail!(ErrorKind::PathNotFound(source.as_usize(), target.as_usize()));
            }
        }

        trace!(
            "Reconstructed path from {} to {} with {} edges",
            source.as_usize(),
            target.as_usize(),
            edges.len()
        );
        WeightedPath::from_nodes_and_edges(self.graph, nodes, edges, self.weight_operations)
    }
}
