use crate::algo::queue::BidirectedQueue;
use crate::error::{ErrorKind, Result};
use crate::index::GraphIndex;
use crate::interface::{GraphBase, ImmutableGraphContainer, NavigableGraph, Neighbor, StaticGraph};
use bitvector::BitVector;
use std::collections::VecDeque;
use std::marker::PhantomData;

pub use visitor::{GraphVisitor, SearchTreeBuilder, VisitState};

/// The visitor trait driving a [VisitingTraversal](VisitingTraversal) and some basic visitors.
pub mod visitor;

/// The queue type used by the traversal type aliases.
pub type TraversalQueue<Graph> =
    VecDeque<TraversalItem<<Graph as GraphBase>::NodeIndex, <Graph as GraphBase>::EdgeIndex>>;

/// A forward BFS in a directed graph.
pub type ForwardBfs<'a, Graph> = VisitingTraversal<
    'a,
    Graph,
    ForwardNeighborStrategy,
    BfsQueueStrategy,
    TraversalQueue<Graph>,
>;
/// A backward BFS in a directed graph.
pub type BackwardBfs<'a, Graph> = VisitingTraversal<
    'a,
    Graph,
    BackwardNeighborStrategy,
    BfsQueueStrategy,
    TraversalQueue<Graph>,
>;
/// A BFS that treats each directed edge as an undirected edge, i.e. that traverses edges both in forward and backward direction.
pub type UndirectedBfs<'a, Graph> = VisitingTraversal<
    'a,
    Graph,
    UndirectedNeighborStrategy,
    BfsQueueStrategy,
    TraversalQueue<Graph>,
>;

/// A forward DFS in a directed graph.
pub type ForwardDfs<'a, Graph> = VisitingTraversal<
    'a,
    Graph,
    ForwardNeighborStrategy,
    DfsQueueStrategy,
    TraversalQueue<Graph>,
>;
/// A backward DFS in a directed graph.
pub type BackwardDfs<'a, Graph> = VisitingTraversal<
    'a,
    Graph,
    BackwardNeighborStrategy,
    DfsQueueStrategy,
    TraversalQueue<Graph>,
>;
/// A DFS that treats each directed edge as an undirected edge, i.e. that traverses edges both in forward and backward direction.
pub type UndirectedDfs<'a, Graph> = VisitingTraversal<
    'a,
    Graph,
    UndirectedNeighborStrategy,
    DfsQueueStrategy,
    TraversalQueue<Graph>,
>;

/// An entry of the traversal worklist: a node together with the edge it was reached by.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TraversalItem<NodeIndex, EdgeIndex> {
    /// The node to be visited.
    pub node_id: NodeIndex,
    /// The node and the edge the node was reached from, or `None` for the start node.
    pub reached_by: Option<(NodeIndex, EdgeIndex)>,
}

/// A generic graph traversal driven by a [GraphVisitor](GraphVisitor).
/// The traversal is generic over the graph implementation,
/// as well as the direction of the search (`NeighborStrategy`),
/// the order of processing (`QueueStrategy`) and the queue implementation itself (`Queue`).
///
/// Callbacks happen in the order
/// `discover_graph`, then per visited node `[discover_edge, finish_edge,] discover_vertex, finish_vertex`, and finally `finish_graph`.
///  * An edge into an already visited node is not reported.
///  * If `discover_edge` does not return `Continue`, then the head of the edge is not visited through this edge, but may be visited later through a different edge.
///  * If `discover_vertex` does not return `Continue`, then the neighbors of the node are not enqueued.
///  * `Abort` from any callback stops the traversal after the current node was finished.
pub struct VisitingTraversal<
    'a,
    Graph: GraphBase,
    NeighborStrategy,
    QueueStrategy,
    Queue: BidirectedQueue<TraversalItem<Graph::NodeIndex, Graph::EdgeIndex>>,
> {
    graph: &'a Graph,
    queue: Queue,
    visited: BitVector,
    neighbor_strategy: PhantomData<NeighborStrategy>,
    queue_strategy: PhantomData<QueueStrategy>,
}

impl<
        'a,
        Graph: StaticGraph,
        NeighborStrategy: TraversalNeighborStrategy<'a, Graph>,
        QueueStrategy: TraversalQueueStrategy<TraversalItem<Graph::NodeIndex, Graph::EdgeIndex>, Queue>,
        Queue: BidirectedQueue<TraversalItem<Graph::NodeIndex, Graph::EdgeIndex>>,
    > VisitingTraversal<'a, Graph, NeighborStrategy, QueueStrategy, Queue>
{
    /// Creates a new traversal that operates on the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            queue: Queue::default(),
            visited: BitVector::new(graph.node_count()),
            neighbor_strategy: Default::default(),
            queue_strategy: Default::default(),
        }
    }

    /// Returns true if the given node was visited by the last traversal.
    pub fn is_visited(&self, node: Graph::NodeIndex) -> bool {
        self.visited.contains(node.as_usize())
    }

    /// Traverses the graph from the given start node, reporting to the given visitor.
    /// Returns the output of the visitor after the traversal completed.
    ///
    /// The set of visited nodes is reset before the traversal starts.
    pub fn traverse<Visitor: GraphVisitor<Graph>>(
        &mut self,
        start: Graph::NodeIndex,
        mut visitor: Visitor,
    ) -> Result<Visitor::Output> {
        if !self.graph.contains_node_index(start) {
            bail!(ErrorKind::NodeNotInGraph(start.as_usize()));
        }

        self.queue.clear();
        self.visited.clear();
        QueueStrategy::push(
            &mut self.queue,
            TraversalItem {
                node_id: start,
                reached_by: None,
            },
        );
        debug!(
            "Starting traversal from node {} in a graph with {} nodes",
            start.as_usize(),
            self.graph.node_count()
        );

        visitor.discover_graph(self.graph);
        let mut aborted = false;
        while let Some(item) = QueueStrategy::pop(&mut self.queue) {
            if aborted {
                break;
            }
            let node = item.node_id;
            if self.visited.contains(node.as_usize()) {
                continue;
            }

            let mut skip_node = false;
            if let Some((head, edge)) = item.reached_by {
                match visitor.discover_edge(head, edge, node) {
                    VisitState::Continue => {}
                    VisitState::Skip => skip_node = true,
                    VisitState::Abort => {
                        skip_node = true;
                        aborted = true;
                    }
                }
                if visitor.finish_edge(head, edge, node) == VisitState::Abort {
                    skip_node = true;
                    aborted = true;
                }
            }
            if skip_node {
                continue;
            }

            self.visited.insert(node.as_usize());
            trace!("Discovered node {}", node.as_usize());
            match visitor.discover_vertex(node) {
                VisitState::Continue => {
                    for neighbor in NeighborStrategy::neighbor_iterator(self.graph, node) {
                        if !self.visited.contains(neighbor.node_id.as_usize()) {
                            QueueStrategy::push(
                                &mut self.queue,
                                TraversalItem {
                                    node_id: neighbor.node_id,
                                    reached_by: Some((node, neighbor.edge_id)),
                                },
                            );
                        }
                    }
                }
                VisitState::Skip => {}
                VisitState::Abort => aborted = true,
            }
            if visitor.finish_vertex(node) == VisitState::Abort {
                aborted = true;
            }
        }

        visitor.finish_graph(self.graph);
        Ok(visitor.on_completed())
    }
}

/// Runs a forward breadth-first search from `start`, reporting to the given visitor.
pub fn breadth_first_search<Graph: StaticGraph, Visitor: GraphVisitor<Graph>>(
    graph: &Graph,
    start: Graph::NodeIndex,
    visitor: Visitor,
) -> Result<Visitor::Output> {
    ForwardBfs::new(graph).traverse(start, visitor)
}

/// Runs a forward depth-first search from `start`, reporting to the given visitor.
pub fn depth_first_search<Graph: StaticGraph, Visitor: GraphVisitor<Graph>>(
    graph: &Graph,
    start: Graph::NodeIndex,
    visitor: Visitor,
) -> Result<Visitor::Output> {
    ForwardDfs::new(graph).traverse(start, visitor)
}

/// A type that defines the strategy for computing the neighborhood of a node, i.e. forward, backward or undirected.
pub trait TraversalNeighborStrategy<'a, Graph: GraphBase> {
    /// The iterator type used to iterate over the neighbors of a node.
    type Iterator: Iterator<Item = Neighbor<Graph::NodeIndex, Graph::EdgeIndex>>;

    /// Returns an iterator over the neighbors of a given node.
    fn neighbor_iterator(graph: &'a Graph, node: Graph::NodeIndex) -> Self::Iterator;
}

/// A type that defines the order of processing in a traversal, i.e. queue-based or stack-based.
pub trait TraversalQueueStrategy<Item, Queue: BidirectedQueue<Item>> {
    /// Insert an item into the queue.
    fn push(queue: &mut Queue, item: Item);
    /// Remove and return an item from the queue.
    fn pop(queue: &mut Queue) -> Option<Item>;
}

/// A neighbor strategy that traverses all outgoing edges of a node.
pub struct ForwardNeighborStrategy;

impl<'a, Graph: NavigableGraph<'a> + ImmutableGraphContainer> TraversalNeighborStrategy<'a, Graph>
    for ForwardNeighborStrategy
{
    type Iterator = Graph::OutNeighbors;

    fn neighbor_iterator(graph: &'a Graph, node: Graph::NodeIndex) -> Self::Iterator {
        graph.out_neighbors(node)
    }
}

/// A neighbor strategy that traverses all incoming edges of a node.
pub struct BackwardNeighborStrategy;

impl<'a, Graph: NavigableGraph<'a> + ImmutableGraphContainer> TraversalNeighborStrategy<'a, Graph>
    for BackwardNeighborStrategy
{
    type Iterator = Graph::InNeighbors;

    fn neighbor_iterator(graph: &'a Graph, node: Graph::NodeIndex) -> Self::Iterator {
        graph.in_neighbors(node)
    }
}

/// A neighbor strategy that traverses all incoming and all outgoing edges of a node.
/// In an undirected graph, this reports each incident edge twice.
pub struct UndirectedNeighborStrategy;
type InOutNeighborsChain<OutNeighbors, InNeighbors> = std::iter::Chain<OutNeighbors, InNeighbors>;

impl<'a, Graph: NavigableGraph<'a> + ImmutableGraphContainer> TraversalNeighborStrategy<'a, Graph>
    for UndirectedNeighborStrategy
{
    type Iterator = InOutNeighborsChain<Graph::OutNeighbors, Graph::InNeighbors>;

    fn neighbor_iterator(graph: &'a Graph, node: Graph::NodeIndex) -> Self::Iterator {
        graph.out_neighbors(node).chain(graph.in_neighbors(node))
    }
}

/// A queue strategy that works by the first-in first-out principle.
pub struct BfsQueueStrategy;

impl<Item, Queue: BidirectedQueue<Item>> TraversalQueueStrategy<Item, Queue> for BfsQueueStrategy {
    fn push(queue: &mut Queue, item: Item) {
        queue.push_back(item)
    }

    fn pop(queue: &mut Queue) -> Option<Item> {
        queue.pop_front()
    }
}

/// A queue strategy that works by the last-in first-out principle.
pub struct DfsQueueStrategy;

impl<Item, Queue: BidirectedQueue<Item>> TraversalQueueStrategy<Item, Queue> for DfsQueueStrategy {
    fn push(queue: &mut Queue, item: Item) {
        queue.push_back(item)
    }

    fn pop(queue: &mut Queue) -> Option<Item> {
        queue.pop_back()
    }
}
