use crate::algo::shortest_path::{check_edge, check_node, edge_weight};
use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::{ImmutableGraphContainer, MutableGraphContainer, Neighbor, StaticGraph};
use crate::weight::{Monoid, OrderedMonoid, WeightedEdgeData};
use std::cmp::Ordering;

pub use boruvka::boruvka;
pub use kruskal::kruskal;
pub use prim::{prim, prim_from};
pub use reverse_delete::reverse_delete;

/// Boruvka's algorithm, merging all components along their lightest outgoing edge in rounds.
pub mod boruvka;
/// Kruskal's algorithm, adding edges by ascending weight.
pub mod kruskal;
/// Prim's algorithm, growing a tree from a start node.
pub mod prim;
/// The reverse-delete algorithm, removing edges by descending weight.
pub mod reverse_delete;

/// A minimum spanning forest of a graph.
///
/// Contains every node of the graph, and the edges of a minimum spanning tree for each connected component.
/// Edge directions are ignored when computing spanning trees.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SpanningTree<NodeIndex, EdgeIndex, WeightType> {
    nodes: Vec<NodeIndex>,
    edges: Vec<EdgeIndex>,
    weight: WeightType,
}

impl<NodeIndex: GraphIndex, EdgeIndex: GraphIndex, WeightType>
    SpanningTree<NodeIndex, EdgeIndex, WeightType>
{
    /// Creates the spanning forest of `graph` consisting of the given edges.
    /// The weight is computed from the edge weights of the graph.
    pub(crate) fn from_edges<
        Graph: ImmutableGraphContainer<NodeIndex = NodeIndex, EdgeIndex = EdgeIndex>,
        Operations: Monoid<WeightType>,
    >(
        graph: &Graph,
        edges: Vec<EdgeIndex>,
        weight_operations: &Operations,
    ) -> Self
    where
        Graph::EdgeData: WeightedEdgeData<WeightType>,
    {
        debug_assert!(edges.len() <= graph.node_count().saturating_sub(1));
        let weight = edges
            .iter()
            .fold(weight_operations.zero(), |weight, &edge| {
                weight_operations.append(&weight, &edge_weight(graph, edge))
            });
        let result = Self {
            nodes: graph.node_indices().collect(),
            edges,
            weight,
        };
        debug!(
            "Computed spanning forest with {} nodes, {} edges and {} components",
            result.node_count(),
            result.edge_count(),
            result.component_count()
        );
        result
    }

    /// The nodes of the spanning forest, which are all nodes of the graph.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// The edges of the spanning forest.
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// The combined weight of all edges of the spanning forest.
    pub fn weight(&self) -> &WeightType {
        &self.weight
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the given edge is part of the spanning forest.
    /// Runs in `O(|E|)` time, as the edges are stored as a list.
    pub fn contains_edge(&self, edge: EdgeIndex) -> bool {
        self.edges.contains(&edge)
    }

    /// The amount of trees in the spanning forest, i.e. the amount of connected components of the graph.
    pub fn component_count(&self) -> usize {
        self.nodes.len() - self.edges.len()
    }

    /// Copies the spanning forest into `result`, cloning node and edge data from `graph`.
    /// Nodes are added in the order of [nodes](SpanningTree::nodes) and edges in the order of [edges](SpanningTree::edges).
    ///
    /// Fails with `NodeNotInGraph` or `EdgeNotInGraph` if the forest refers to nodes or edges that are not part of `graph`,
    /// and with `InvalidArgument` if an edge of the forest has an endpoint outside of the forest.
    /// In these cases `result` may already contain some of the nodes.
    pub fn materialize<
        Graph: ImmutableGraphContainer<NodeIndex = NodeIndex, EdgeIndex = EdgeIndex>,
        ResultGraph: MutableGraphContainer<NodeData = Graph::NodeData, EdgeData = Graph::EdgeData>,
    >(
        &self,
        graph: &Graph,
        result: &mut ResultGraph,
    ) -> Result<()>
    where
        Graph::NodeData: Clone,
        Graph::EdgeData: Clone,
    {
        for &node in &self.nodes {
            check_node(graph, node)?;
        }
        for &edge in &self.edges {
            check_edge(graph, edge)?;
        }

        let mut node_map = vec![None; graph.node_count()];
        for &node in &self.nodes {
            node_map[node.as_usize()] = Some(result.add_node(graph.node_data(node).clone()));
        }
        for &edge in &self.edges {
            let endpoints = graph.edge_endpoints(edge);
            let (from, to) = match (
                node_map[endpoints.from_node.as_usize()],
                node_map[endpoints.to_node.as_usize()],
            ) {
                (Some(from), Some(to)) => (from, to),
                _ => bail!(ErrorKind::InvalidArgument(format!(
                    "edge {} has an endpoint that is not part of the spanning forest",
                    edge.as_usize()
                ))),
            };
            result.add_edge(from, to, graph.edge_data(edge).clone());
        }
        Ok(())
    }
}

/// Iterates over all edges incident to `node`, ignoring edge directions.
/// In an undirected graph, the outgoing neighbors already contain every incident edge.
pub(crate) fn undirected_neighbors<Graph: StaticGraph>(
    graph: &Graph,
    node: Graph::NodeIndex,
) -> impl '_ + Iterator<Item = Neighbor<Graph::NodeIndex, Graph::EdgeIndex>> {
    let directed = graph.is_directed();
    graph
        .out_neighbors(node)
        .chain(graph.in_neighbors(node).filter(move |_| directed))
}

/// Compares two edges by weight, breaking ties by edge index.
pub(crate) fn compare_edges<Graph, WeightType, Operations>(
    graph: &Graph,
    weight_operations: &Operations,
    a: Graph::EdgeIndex,
    b: Graph::EdgeIndex,
) -> Ordering
where
    Graph: ImmutableGraphContainer,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    weight_operations
        .compare(&edge_weight(graph, a), &edge_weight(graph, b))
        .then_with(|| a.cmp(&b))
}
