use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::{GraphBase, ImmutableGraphContainer};
use crate::weight::{Monoid, WeightedEdgeData};
use std::marker::PhantomData;

pub use bellman_ford::bellman_ford;
pub use bidirectional::bidirectional_dijkstra;
pub use dijkstra::{astar, dijkstra, single_source_dijkstra, Dijkstra};
pub use floyd_warshall::{floyd_warshall, AllPairsShortestPaths};
pub use trail::PredecessorTrail;

/// The Bellman-Ford algorithm, supporting negative edge weights and detecting negative cycles.
pub mod bellman_ford;
/// Dijkstra's algorithm, searching from both ends at the same time.
pub mod bidirectional;
/// Dijkstra's algorithm and A*.
pub mod dijkstra;
/// The Floyd-Warshall all-pairs shortest path algorithm.
pub mod floyd_warshall;
/// Reconstructing paths from predecessor pointers.
pub mod trail;

/// Returns the weight of the given edge.
#[inline]
pub(crate) fn edge_weight<Graph: ImmutableGraphContainer, WeightType>(
    graph: &Graph,
    edge: Graph::EdgeIndex,
) -> WeightType
where
    Graph::EdgeData: WeightedEdgeData<WeightType>,
{
    graph.edge_data(edge).weight()
}

/// Returns an error if the node is not part of the graph.
pub(crate) fn check_node<Graph: ImmutableGraphContainer>(
    graph: &Graph,
    node: Graph::NodeIndex,
) -> Result<()> {
    if graph.contains_node_index(node) {
        Ok(())
    } else {
        Err(ErrorKind::NodeNotInGraph(node.as_usize()).into())
    }
}

/// Returns an error if the edge is not part of the graph.
pub(crate) fn check_edge<Graph: ImmutableGraphContainer>(
    graph: &Graph,
    edge: Graph::EdgeIndex,
) -> Result<()> {
    if graph.contains_edge_index(edge) {
        Ok(())
    } else {
        Err(ErrorKind::EdgeNotInGraph(edge.as_usize()).into())
    }
}

/// A path in a graph together with its weight.
///
/// The path contains exactly one more node than edges, and the weight is the combination of the edge weights in path order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WeightedPath<NodeIndex, EdgeIndex, WeightType> {
    nodes: Vec<NodeIndex>,
    edges: Vec<EdgeIndex>,
    weight: WeightType,
}

impl<NodeIndex: Copy, EdgeIndex: Copy, WeightType> WeightedPath<NodeIndex, EdgeIndex, WeightType> {
    /// Creates a path from its parts.
    /// Panics if `nodes` does not contain exactly one more element than `edges`.
    pub fn new(nodes: Vec<NodeIndex>, edges: Vec<EdgeIndex>, weight: WeightType) -> Self {
        assert_eq!(
            nodes.len(),
            edges.len() + 1,
            "a path must contain exactly one more node than edges"
        );
        Self {
            nodes,
            edges,
            weight,
        }
    }

    /// Creates a path from its nodes and edges, computing its weight from the edge weights of the graph.
    /// Fails with `EdgeNotInGraph` if one of the edges is not part of the graph.
    pub fn from_nodes_and_edges<
        Graph: ImmutableGraphContainer<NodeIndex = NodeIndex, EdgeIndex = EdgeIndex>,
        Operations: Monoid<WeightType>,
    >(
        graph: &Graph,
        nodes: Vec<NodeIndex>,
        edges: Vec<EdgeIndex>,
        weight_operations: &Operations,
    ) -> Result<Self>
    where
        Graph::EdgeData: WeightedEdgeData<WeightType>,
    {
        let mut weight = weight_operations.zero();
        for &edge in &edges {
            check_edge(graph, edge)?;
            weight = weight_operations.append(&weight, &edge_weight(graph, edge));
        }
        Ok(Self::new(nodes, edges, weight))
    }

    /// Creates a path that consists of a single node and no edges.
    pub fn trivial(node: NodeIndex, zero: WeightType) -> Self {
        Self::new(vec![node], Vec::new(), zero)
    }

    /// The first node of the path.
    pub fn source(&self) -> NodeIndex {
        self.nodes[0]
    }

    /// The last node of the path.
    pub fn target(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    /// The nodes of the path in order.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// The edges of the path in order.
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// The combined weight of all edges of the path.
    pub fn weight(&self) -> &WeightType {
        &self.weight
    }

    /// The amount of edges in the path.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the path has no edges.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the nodes, edges and weight of this path.
    pub fn into_parts(self) -> (Vec<NodeIndex>, Vec<EdgeIndex>, WeightType) {
        (self.nodes, self.edges, self.weight)
    }
}

/// The best known distance of each node from the source of a search.
///
/// A node without a distance has not been reached yet, which is different from having the zero distance.
pub struct ShortestDistances<Graph, WeightType> {
    distances: Vec<Option<WeightType>>,
    graph: PhantomData<Graph>,
}

impl<Graph: ImmutableGraphContainer, WeightType: Clone> ShortestDistances<Graph, WeightType> {
    /// Creates a distance map where no node has been reached.
    pub fn new(graph: &Graph) -> Self {
        Self {
            distances: vec![None; graph.node_count()],
            graph: Default::default(),
        }
    }

    /// Returns the distance of `node`, or `None` if the node has not been reached or is not part of the graph.
    #[inline]
    pub fn get(&self, node: Graph::NodeIndex) -> Option<&WeightType> {
        self.distances
            .get(node.as_usize())
            .and_then(|distance| distance.as_ref())
    }

    /// Sets the distance of `node`.
    #[inline]
    pub fn set(&mut self, node: Graph::NodeIndex, distance: WeightType) {
        self.distances[node.as_usize()] = Some(distance);
    }

    /// Returns true if `node` has been reached.
    #[inline]
    pub fn is_visited(&self, node: Graph::NodeIndex) -> bool {
        self.get(node).is_some()
    }

    /// Resets all nodes to not being reached.
    pub fn clear(&mut self) {
        for distance in self.distances.iter_mut() {
            *distance = None;
        }
    }
}

/// A heuristic estimating the remaining distance from a node to the goal of an A* search.
///
/// The heuristic must be admissible, i.e. never overestimate the true distance, otherwise A* may return suboptimal paths.
pub trait Heuristic<NodeIndex, WeightType> {
    /// Estimates the distance from `node` to `goal`.
    fn estimate(&self, node: NodeIndex, goal: NodeIndex) -> WeightType;
}

impl<NodeIndex, WeightType, F: Fn(NodeIndex, NodeIndex) -> WeightType>
    Heuristic<NodeIndex, WeightType> for F
{
    fn estimate(&self, node: NodeIndex, goal: NodeIndex) -> WeightType {
        self(node, goal)
    }
}

/// The result of a single-source shortest path computation.
/// Stores the distance of each reachable node and a trail to reconstruct the shortest paths.
pub struct ShortestPathTree<'a, Graph: GraphBase, WeightType, Operations> {
    graph: &'a Graph,
    weight_operations: &'a Operations,
    source: Graph::NodeIndex,
    distances: ShortestDistances<Graph, WeightType>,
    trail: PredecessorTrail<Graph>,
}

impl<
        'a,
        Graph: ImmutableGraphContainer,
        WeightType: Clone,
        Operations: Monoid<WeightType>,
    > ShortestPathTree<'a, Graph, WeightType, Operations>
where
    Graph::EdgeData: WeightedEdgeData<WeightType>,
{
    pub(crate) fn new(
        graph: &'a Graph,
        weight_operations: &'a Operations,
        source: Graph::NodeIndex,
        distances: ShortestDistances<Graph, WeightType>,
        trail: PredecessorTrail<Graph>,
    ) -> Self {
        Self {
            graph,
            weight_operations,
            source,
            distances,
            trail,
        }
    }

    /// The source node of the search.
    pub fn source(&self) -> Graph::NodeIndex {
        self.source
    }

    /// Returns the distance of `node` from the source, or `None` if `node` is not reachable or not part of the graph.
    pub fn distance(&self, node: Graph::NodeIndex) -> Option<&WeightType> {
        if !self.graph.contains_node_index(node) {
            return None;
        }
        self.distances.get(node)
    }

    /// Returns the distance of `node` from the source.
    /// Fails with `PathNotFound` if `node` is not reachable.
    pub fn shortest_distance(&self, node: Graph::NodeIndex) -> Result<WeightType> {
        check_node(self.graph, node)?;
        self.distances.get(node).cloned().ok_or_else(|| {
            ErrorKind::PathNotFound(self.source.as_usize(), node.as_usize()).into()
        })
    }

    /// Returns a shortest path from the source to `node`.
    /// Fails with `PathNotFound` if `node` is not reachable.
    pub fn shortest_path(
        &self,
        node: Graph::NodeIndex,
    ) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>> {
        check_node(self.graph, node)?;
        if !self.distances.is_visited(node) {
            bail!(ErrorKind::PathNotFound(
                self.source.as_usize(),
                node.as_usize()
            ));
        }
        self.trail
            .build_path(self.graph, self.source, node, self.weight_operations)
    }

    /// Returns an iterator over all nodes reachable from the source, including the source itself.
    pub fn reachable_nodes(&self) -> impl '_ + Iterator<Item = Graph::NodeIndex> {
        let distances = &self.distances;
        self.graph
            .node_indices()
            .filter(move |&node| distances.is_visited(node))
    }

    /// Returns a shortest path to each reachable node other than the source.
    pub fn paths(&self) -> Result<Vec<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>>> {
        self.reachable_nodes()
            .filter(|&node| node != self.source)
            .map(|node| self.shortest_path(node))
            .collect()
    }

    /// Returns the predecessor trail of the search.
    pub fn trail(&self) -> &PredecessorTrail<Graph> {
        &self.trail
    }
}
