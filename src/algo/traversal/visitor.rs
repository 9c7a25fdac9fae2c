use crate::index::GraphIndex;
use crate::interface::{GraphBase, ImmutableGraphContainer, MutableGraphContainer};

/// The answer of a [GraphVisitor](GraphVisitor) to a traversal event.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VisitState {
    /// Proceed normally.
    Continue,
    /// Do not explore this node or edge, but continue the traversal elsewhere.
    Skip,
    /// Terminate the whole traversal.
    Abort,
}

/// Receives the events of a [VisitingTraversal](super::VisitingTraversal) and decides how the traversal proceeds.
///
/// All callbacks have a default implementation that does nothing and answers [Continue](VisitState::Continue).
pub trait GraphVisitor<Graph: GraphBase> {
    /// The result of the visitor after the traversal completed.
    type Output;

    /// Called once before the traversal starts.
    fn discover_graph(&mut self, _graph: &Graph) {}

    /// Called when the traversal is about to enter the unvisited node `tail` through `edge` from the visited node `head`.
    fn discover_edge(
        &mut self,
        _head: Graph::NodeIndex,
        _edge: Graph::EdgeIndex,
        _tail: Graph::NodeIndex,
    ) -> VisitState {
        VisitState::Continue
    }

    /// Called after each discovered edge, regardless of the answer to `discover_edge`.
    fn finish_edge(
        &mut self,
        _head: Graph::NodeIndex,
        _edge: Graph::EdgeIndex,
        _tail: Graph::NodeIndex,
    ) -> VisitState {
        VisitState::Continue
    }

    /// Called when a node is visited for the first time.
    fn discover_vertex(&mut self, _vertex: Graph::NodeIndex) -> VisitState {
        VisitState::Continue
    }

    /// Called after the neighbors of a discovered node were enqueued (or skipped).
    fn finish_vertex(&mut self, _vertex: Graph::NodeIndex) -> VisitState {
        VisitState::Continue
    }

    /// Called once after the traversal ended, also if it was aborted.
    fn finish_graph(&mut self, _graph: &Graph) {}

    /// Consumes the visitor and returns its result.
    fn on_completed(self) -> Self::Output;
}

/// A visitor that copies the search tree of a traversal into a new graph.
/// Node and edge data are cloned from the traversed graph.
pub struct SearchTreeBuilder<'a, Graph: GraphBase, ResultGraph: GraphBase> {
    graph: &'a Graph,
    result: ResultGraph,
    node_map: Vec<Option<ResultGraph::NodeIndex>>,
    pending_edge: Option<(Graph::NodeIndex, Graph::EdgeIndex)>,
}

impl<
        'a,
        Graph: ImmutableGraphContainer,
        ResultGraph: MutableGraphContainer<NodeData = Graph::NodeData, EdgeData = Graph::EdgeData>
            + Default,
    > SearchTreeBuilder<'a, Graph, ResultGraph>
{
    /// Creates a builder for search trees of the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            result: ResultGraph::default(),
            node_map: vec![None; graph.node_count()],
            pending_edge: None,
        }
    }
}

impl<
        'a,
        Graph: ImmutableGraphContainer,
        ResultGraph: MutableGraphContainer<NodeData = Graph::NodeData, EdgeData = Graph::EdgeData>,
    > GraphVisitor<Graph> for SearchTreeBuilder<'a, Graph, ResultGraph>
where
    Graph::NodeData: Clone,
    Graph::EdgeData: Clone,
{
    type Output = ResultGraph;

    fn discover_edge(
        &mut self,
        head: Graph::NodeIndex,
        edge: Graph::EdgeIndex,
        _tail: Graph::NodeIndex,
    ) -> VisitState {
        self.pending_edge = Some((head, edge));
        VisitState::Continue
    }

    fn discover_vertex(&mut self, vertex: Graph::NodeIndex) -> VisitState {
        let result_node = self.result.add_node(self.graph.node_data(vertex).clone());
        self.node_map[vertex.as_usize()] = Some(result_node);

        if let Some((head, edge)) = self.pending_edge.take() {
            let result_head = self.node_map[head.as_usize()]
                .expect("the head of a discovered edge was visited before");
            self.result.add_edge(
                result_head,
                result_node,
                self.graph.edge_data(edge).clone(),
            );
        }
        VisitState::Continue
    }

    fn on_completed(self) -> Self::Output {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use crate::algo::traversal::{breadth_first_search, depth_first_search, SearchTreeBuilder};
    use crate::implementation::petgraph_impl;
    use crate::implementation::petgraph_impl::petgraph::graph::DiGraph;
    use crate::interface::{ImmutableGraphContainer, MutableGraphContainer, NavigableGraph};

    type Tree<NodeData, EdgeData> = DiGraph<NodeData, EdgeData, usize>;

    #[test]
    fn test_search_tree_of_diamond() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node('a');
        let n1 = graph.add_node('b');
        let n2 = graph.add_node('c');
        let n3 = graph.add_node('d');
        graph.add_edge(n0, n1, 1);
        graph.add_edge(n0, n2, 2);
        graph.add_edge(n1, n3, 3);
        graph.add_edge(n2, n3, 4);

        let tree: Tree<char, i32> =
            breadth_first_search(&graph, n0, SearchTreeBuilder::new(&graph)).unwrap();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.edge_count(), 3);
        let root = ImmutableGraphContainer::node_indices(&tree).next().unwrap();
        assert_eq!(*tree.node_data(root), 'a');
        assert_eq!(tree.out_degree(root), 2);
        for node in ImmutableGraphContainer::node_indices(&tree).skip(1) {
            assert_eq!(tree.in_degree(node), 1);
        }
    }

    #[test]
    fn test_search_tree_of_unreachable_part() {
        let mut graph = petgraph_impl::new();
        let n0 = graph.add_node(());
        let n1 = graph.add_node(());
        let n2 = graph.add_node(());
        graph.add_edge(n1, n0, 7);
        graph.add_edge(n1, n2, 8);

        let tree: Tree<(), u8> =
            depth_first_search(&graph, n0, SearchTreeBuilder::new(&graph)).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.edge_count(), 0);

        let tree: Tree<(), u8> =
            depth_first_search(&graph, n1, SearchTreeBuilder::new(&graph)).unwrap();
        assert_eq!(tree.node_count(), 3);
        let mut weights: Vec<_> = ImmutableGraphContainer::edge_indices(&tree)
            .map(|e| *tree.edge_data(e))
            .collect();
        weights.sort_unstable();
        assert_eq!(weights, vec![7, 8]);
    }
}
