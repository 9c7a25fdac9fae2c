use crate::index::{GraphIndex, GraphIndices};
use crate::interface::{
    DynamicGraph, GraphBase, ImmutableGraphContainer, MutableGraphContainer, NavigableGraph,
    Neighbor, VertexPair,
};
use num_traits::{PrimInt, ToPrimitive};
use petgraph::graph::{DiGraph, Edges, Graph, UnGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Direction, EdgeType};

pub use petgraph;

/// The node index type of the petgraph-based graphs.
pub type PetgraphNodeIndex = crate::index::NodeIndex<usize>;
/// The edge index type of the petgraph-based graphs.
pub type PetgraphEdgeIndex = crate::index::EdgeIndex<usize>;

/// Creates a new empty directed graph.
pub fn new<NodeData: 'static + Clone, EdgeData: 'static + Clone>() -> impl DynamicGraph<
    NodeData = NodeData,
    EdgeData = EdgeData,
    NodeIndex = PetgraphNodeIndex,
    EdgeIndex = PetgraphEdgeIndex,
> + Default + Clone {
    DiGraph::<NodeData, EdgeData, usize>::default()
}

/// Creates a new empty undirected graph.
pub fn new_undirected<NodeData: 'static + Clone, EdgeData: 'static + Clone>() -> impl DynamicGraph<
    NodeData = NodeData,
    EdgeData = EdgeData,
    NodeIndex = PetgraphNodeIndex,
    EdgeIndex = PetgraphEdgeIndex,
> + Default + Clone {
    UnGraph::<NodeData, EdgeData, usize>::default()
}

impl<NodeData, EdgeData, Ty: EdgeType> GraphBase for Graph<NodeData, EdgeData, Ty, usize> {
    type NodeData = NodeData;
    type EdgeData = EdgeData;
    type NodeIndex = PetgraphNodeIndex;
    type EdgeIndex = PetgraphEdgeIndex;
}

impl<NodeData, EdgeData, Ty: EdgeType> ImmutableGraphContainer
    for Graph<NodeData, EdgeData, Ty, usize>
{
    fn node_indices(&self) -> GraphIndices<Self::NodeIndex> {
        GraphIndices::from((0, self.node_count()))
    }

    fn edge_indices(&self) -> GraphIndices<Self::EdgeIndex> {
        GraphIndices::from((0, self.edge_count()))
    }

    fn contains_node_index(&self, node_id: Self::NodeIndex) -> bool {
        self.node_weight(node_id.into()).is_some()
    }

    fn contains_edge_index(&self, edge_id: Self::EdgeIndex) -> bool {
        self.edge_weight(edge_id.into()).is_some()
    }

    fn node_count(&self) -> usize {
        self.node_count()
    }

    fn edge_count(&self) -> usize {
        self.edge_count()
    }

    fn node_data(&self, node_id: Self::NodeIndex) -> &Self::NodeData {
        self.node_weight(node_id.into())
            .unwrap_or_else(|| panic!("node {:?} is not part of the graph", node_id))
    }

    fn edge_data(&self, edge_id: Self::EdgeIndex) -> &Self::EdgeData {
        self.edge_weight(edge_id.into())
            .unwrap_or_else(|| panic!("edge {:?} is not part of the graph", edge_id))
    }

    fn contains_edge_between(&self, from: Self::NodeIndex, to: Self::NodeIndex) -> bool {
        self.find_edge(from.into(), to.into()).is_some()
    }

    fn edge_endpoints(&self, edge_id: Self::EdgeIndex) -> VertexPair<Self::NodeIndex> {
        let (from_node, to_node) = self
            .edge_endpoints(edge_id.into())
            .unwrap_or_else(|| panic!("edge {:?} is not part of the graph", edge_id));
        VertexPair::new(from_node.index().into(), to_node.index().into())
    }

    fn is_directed(&self) -> bool {
        self.is_directed()
    }
}

impl<NodeData, EdgeData, Ty: EdgeType> MutableGraphContainer
    for Graph<NodeData, EdgeData, Ty, usize>
{
    fn add_node(&mut self, node_data: NodeData) -> Self::NodeIndex {
        self.add_node(node_data).index().into()
    }

    fn add_edge(
        &mut self,
        from: Self::NodeIndex,
        to: Self::NodeIndex,
        edge_data: EdgeData,
    ) -> Self::EdgeIndex {
        self.add_edge(from.into(), to.into(), edge_data)
            .index()
            .into()
    }

    fn clear(&mut self) {
        self.clear();
    }
}

/// Translates the edges of a petgraph node into [Neighbor](Neighbor)s.
/// The neighbor is always the endpoint of the edge that is not the node itself, which makes this work for undirected graphs as well.
pub struct PetgraphNeighborTranslator<'a, EdgeData, Ty: EdgeType> {
    edges: Edges<'a, EdgeData, Ty, usize>,
    node_id: petgraph::graph::NodeIndex<usize>,
}

impl<'a, EdgeData, Ty: EdgeType> Iterator for PetgraphNeighborTranslator<'a, EdgeData, Ty> {
    type Item = Neighbor<crate::index::NodeIndex<usize>, crate::index::EdgeIndex<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        let node_id = self.node_id;
        self.edges.next().map(|edge| {
            let neighbor_id = if edge.source() == node_id {
                edge.target()
            } else {
                edge.source()
            };
            Neighbor {
                edge_id: edge.id().index().into(),
                node_id: neighbor_id.index().into(),
            }
        })
    }
}

impl<'a, NodeData, EdgeData: 'a, Ty: 'a + EdgeType> NavigableGraph<'a>
    for Graph<NodeData, EdgeData, Ty, usize>
{
    type OutNeighbors = PetgraphNeighborTranslator<'a, EdgeData, Ty>;
    type InNeighbors = PetgraphNeighborTranslator<'a, EdgeData, Ty>;
    type EdgesBetween = std::vec::IntoIter<<Self as GraphBase>::EdgeIndex>;

    fn out_neighbors(&'a self, node_id: <Self as GraphBase>::NodeIndex) -> Self::OutNeighbors {
        debug_assert!(node_id.as_usize() < self.node_count());
        PetgraphNeighborTranslator {
            edges: self.edges_directed(node_id.into(), Direction::Outgoing),
            node_id: node_id.into(),
        }
    }

    fn in_neighbors(&'a self, node_id: <Self as GraphBase>::NodeIndex) -> Self::InNeighbors {
        debug_assert!(node_id.as_usize() < self.node_count());
        PetgraphNeighborTranslator {
            edges: self.edges_directed(node_id.into(), Direction::Incoming),
            node_id: node_id.into(),
        }
    }

    fn edges_between(
        &'a self,
        from_node_id: <Self as GraphBase>::NodeIndex,
        to_node_id: <Self as GraphBase>::NodeIndex,
    ) -> Self::EdgesBetween {
        self.out_neighbors(from_node_id)
            .filter(|neighbor| neighbor.node_id == to_node_id)
            .map(|neighbor| neighbor.edge_id)
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl<IndexType: PrimInt + ToPrimitive + petgraph::graph::IndexType>
    From<crate::index::NodeIndex<IndexType>> for petgraph::graph::NodeIndex<IndexType>
{
    fn from(index: crate::index::NodeIndex<IndexType>) -> Self {
        petgraph::graph::NodeIndex::new(index.as_usize())
    }
}

impl<IndexType: PrimInt + ToPrimitive + petgraph::graph::IndexType>
    From<crate::index::EdgeIndex<IndexType>> for petgraph::graph::EdgeIndex<IndexType>
{
    fn from(index: crate::index::EdgeIndex<IndexType>) -> Self {
        petgraph::graph::EdgeIndex::new(index.as_usize())
    }
}

#[cfg(test)]
mod tests {
    use crate::implementation::petgraph_impl;
    use crate::interface::{
        ImmutableGraphContainer, MutableGraphContainer, NavigableGraph, VertexPair,
    };

    #[test]
    fn test_directed_neighbors() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(0);
        let n1 = graph.add_node(1);
        let n2 = graph.add_node(2);
        let e0 = graph.add_edge(n0, n1, 10);
        let e1 = graph.add_edge(n2, n1, 11);

        assert!(graph.is_directed());
        assert_eq!(graph.out_degree(n0), 1);
        assert_eq!(graph.in_degree(n0), 0);
        assert_eq!(graph.in_degree(n1), 2);
        assert_eq!(
            graph.in_neighbors(n1).map(|n| n.node_id).collect::<Vec<_>>(),
            vec![n2, n0]
        );
        assert_eq!(graph.edge_endpoints(e1), VertexPair::new(n2, n1));
        assert!(graph.contains_edge_between(n0, n1));
        assert!(!graph.contains_edge_between(n1, n0));
        assert_eq!(graph.edges_between(n0, n1).collect::<Vec<_>>(), vec![e0]);
        assert_eq!(graph.edges_between(n1, n0).count(), 0);
        assert_eq!(*graph.edge_data(e0), 10);
    }

    #[test]
    fn test_undirected_neighbors() {
        let mut graph = petgraph_impl::new_undirected();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        let e0 = graph.add_edge(n0, n1, 1);
        let e1 = graph.add_edge(n2, n1, 2);

        assert!(!graph.is_directed());
        let mut neighbors: Vec<_> = graph.out_neighbors(n1).map(|n| n.node_id).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![n0, n2]);
        assert_eq!(graph.out_degree(n0), 1);
        assert_eq!(graph.out_neighbors(n0).next().unwrap().node_id, n1);
        assert!(graph.contains_edge_between(n1, n0));
        assert_eq!(graph.edges_between(n1, n2).collect::<Vec<_>>(), vec![e1]);
        assert_eq!(graph.edges_between(n1, n0).collect::<Vec<_>>(), vec![e0]);
    }
}
