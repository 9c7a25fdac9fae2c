use crate::algo::shortest_path::WeightedPath;
use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::{GraphBase, ImmutableGraphContainer, Neighbor};
use crate::weight::{Monoid, WeightedEdgeData};

/// Records for each node the node and edge preceding it on the best path found so far.
///
/// A backward search records successors instead, i.e. the node and edge following a node on its best path towards the target.
/// [build_bidirectional_path](PredecessorTrail::build_bidirectional_path) joins a forward and a backward trail.
pub struct PredecessorTrail<Graph: GraphBase> {
    predecessors: Vec<Option<Neighbor<Graph::NodeIndex, Graph::EdgeIndex>>>,
}

impl<Graph: ImmutableGraphContainer> PredecessorTrail<Graph> {
    /// Creates an empty trail for the given graph.
    pub fn new(graph: &Graph) -> Self {
        Self {
            predecessors: vec![None; graph.node_count()],
        }
    }

    /// Records `predecessor` as the node preceding `node`, reaching `node` via `edge`.
    /// A previously recorded predecessor is overwritten.
    pub fn add_predecessor(
        &mut self,
        node: Graph::NodeIndex,
        predecessor: Graph::NodeIndex,
        edge: Graph::EdgeIndex,
    ) {
        self.predecessors[node.as_usize()] = Some(Neighbor {
            edge_id: edge,
            node_id: predecessor,
        });
    }

    /// Returns the predecessor of `node` together with the edge connecting them, if any.
    pub fn predecessor(
        &self,
        node: Graph::NodeIndex,
    ) -> Option<Neighbor<Graph::NodeIndex, Graph::EdgeIndex>> {
        self.predecessors.get(node.as_usize()).copied().flatten()
    }

    /// Forgets all recorded predecessors.
    pub fn clear(&mut self) {
        for predecessor in self.predecessors.iter_mut() {
            *predecessor = None;
        }
    }

    /// Walks the trail backwards from `target` to `source`.
    /// Returns the nodes and edges of the walk in reverse order, i.e. starting from `target`.
    fn walk_back(
        &self,
        source: Graph::NodeIndex,
        target: Graph::NodeIndex,
    ) -> Result<(Vec<Graph::NodeIndex>, Vec<Graph::EdgeIndex>)> {
        let mut nodes = vec![target];
        let mut edges = Vec::new();
        let mut current = target;

        while current != source {
            // A chain longer than the node count must contain a cycle.
            if edges.len() >= self.predecessors.len() {
                bail!(ErrorKind::PathNotFound(source.as_usize(), target.as_usize()));
            }
            match self.predecessor(current) {
                Some(Neighbor { edge_id, node_id }) => {
                    edges.push(edge_id);
                    nodes.push(node_id);
                    current = node_id;
                }
                None => bail!(ErrorKind::PathNotFound(source.as_usize(), target.as_usize())),
            }
        }

        Ok((nodes, edges))
    }

    /// Reconstructs the path from `source` to `target` by walking the trail backwards from `target`.
    ///
    /// Fails with `PathNotFound` if the chain of predecessors does not reach `source`,
    /// and with `EdgeNotInGraph` if the trail records an edge that is not part of `graph`.
    pub fn build_path<WeightType, Operations: Monoid<WeightType>>(
        &self,
        graph: &Graph,
        source: Graph::NodeIndex,
        target: Graph::NodeIndex,
        weight_operations: &Operations,
    ) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>>
    where
        Graph::EdgeData: WeightedEdgeData<WeightType>,
    {
        let (mut nodes, mut edges) = self.walk_back(source, target)?;
        nodes.reverse();
        edges.reverse();
        WeightedPath::from_nodes_and_edges(graph, nodes, edges, weight_operations)
    }

    /// Reconstructs the path from `source` over `meeting_node` to `target`.
    /// The part from `source` to `meeting_node` is taken from this trail,
    /// and the part from `meeting_node` to `target` from `backward_trail`, which records successors towards `target`.
    pub fn build_bidirectional_path<WeightType, Operations: Monoid<WeightType>>(
        &self,
        graph: &Graph,
        source: Graph::NodeIndex,
        meeting_node: Graph::NodeIndex,
        target: Graph::NodeIndex,
        backward_trail: &PredecessorTrail<Graph>,
        weight_operations: &Operations,
    ) -> Result<WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, WeightType>>
    where
        Graph::EdgeData: WeightedEdgeData<WeightType>,
    {
        let (mut nodes, mut edges) = self
            .walk_back(source, meeting_node)
            .map_err(|_| ErrorKind::PathNotFound(source.as_usize(), target.as_usize()))?;
        nodes.reverse();
        edges.reverse();

        let (backward_nodes, backward_edges) = backward_trail
            .walk_back(target, meeting_node)
            .map_err(|_| ErrorKind::PathNotFound(source.as_usize(), target.as_usize()))?;
        nodes.extend(backward_nodes.into_iter().skip(1));
        edges.extend(backward_edges);

        WeightedPath::from_nodes_and_edges(graph, nodes, edges, weight_operations)
    }
}

#[cfg(test)]
mod tests {
    use crate::algo::shortest_path::PredecessorTrail;
    use crate::error::ErrorKind;
    use crate::implementation::petgraph_impl;
    use crate::interface::MutableGraphContainer;
    use crate::weight::BaseWeightOperations;

    #[test]
    fn test_build_path() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        let e0 = graph.add_edge(n0, n1, 3i32);
        let e1 = graph.add_edge(n1, n2, 4);

        let mut trail = PredecessorTrail::new(&graph);
        trail.add_predecessor(n1, n0, e0);
        trail.add_predecessor(n2, n1, e1);

        let path = trail
            .build_path(&graph, n0, n2, &BaseWeightOperations)
            .unwrap();
        assert_eq!(path.nodes(), &[n0, n1, n2]);
        assert_eq!(path.edges(), &[e0, e1]);
        assert_eq!(*path.weight(), 7);

        let trivial = trail
            .build_path(&graph, n1, n1, &BaseWeightOperations)
            .unwrap();
        assert!(trivial.is_trivial());
        assert_eq!(*trivial.weight(), 0);
    }

    #[test]
    fn test_broken_chain() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        let e1 = graph.add_edge(n1, n2, 4i32);

        let mut trail = PredecessorTrail::new(&graph);
        trail.add_predecessor(n2, n1, e1);
        let error = trail
            .build_path(&graph, n0, n2, &BaseWeightOperations)
            .unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::PathNotFound(0, 2)));
    }

    #[test]
    fn test_edge_not_in_graph() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        graph.add_edge(n0, n1, 2i32);

        let mut trail = PredecessorTrail::new(&graph);
        trail.add_predecessor(n1, n0, 5usize.into());
        let error = trail
            .build_path(&graph, n0, n1, &BaseWeightOperations)
            .unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::EdgeNotInGraph(5)));
    }

    #[test]
    fn test_cyclic_chain() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        let e0 = graph.add_edge(n1, n2, 1i32);
        let e1 = graph.add_edge(n2, n1, 1);

        let mut trail = PredecessorTrail::new(&graph);
        trail.add_predecessor(n2, n1, e0);
        trail.add_predecessor(n1, n2, e1);
        let error = trail
            .build_path(&graph, n0, n2, &BaseWeightOperations)
            .unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::PathNotFound(0, 2)));
    }

    #[test]
    fn test_build_bidirectional_path() {
        let mut graph = petgraph_impl::new();
        let nodes: Vec<_> = (0..5).map(|_| graph.add_node(())).collect();
        let edges: Vec<_> = nodes
            .windows(2)
            .enumerate()
            .map(|(i, window)| graph.add_edge(window[0], window[1], i as i64 + 1))
            .collect();

        let mut forward = PredecessorTrail::new(&graph);
        forward.add_predecessor(nodes[1], nodes[0], edges[0]);
        forward.add_predecessor(nodes[2], nodes[1], edges[1]);
        let mut backward = PredecessorTrail::new(&graph);
        backward.add_predecessor(nodes[3], nodes[4], edges[3]);
        backward.add_predecessor(nodes[2], nodes[3], edges[2]);

        let path = forward
            .build_bidirectional_path(
                &graph,
                nodes[0],
                nodes[2],
                nodes[4],
                &backward,
                &BaseWeightOperations,
            )
            .unwrap();
        assert_eq!(path.nodes(), nodes.as_slice());
        assert_eq!(path.edges(), edges.as_slice());
        assert_eq!(*path.weight(), 10);
        assert_eq!(path.source(), nodes[0]);
        assert_eq!(path.target(), nodes[4]);
    }
}
