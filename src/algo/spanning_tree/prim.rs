use crate::algo::shortest_path::{check_node, edge_weight};
use crate::algo::spanning_tree::{undirected_neighbors, SpanningTree};
use crate::collections::fibonacci_heap::FibonacciHeap;
use crate::error::Result;
use crate::index::GraphIndex;
use crate::interface::StaticGraph;
use crate::weight::{OrderedMonoid, WeightOrder, WeightedEdgeData};
use bitvector::BitVector;

/// Computes a minimum spanning forest with Prim's algorithm, starting from the node with the lowest index.
///
/// See [prim_from](prim_from).
pub fn prim<Graph, WeightType, Operations>(
    graph: &Graph,
    weight_operations: &Operations,
) -> SpanningTree<Graph::NodeIndex, Graph::EdgeIndex, WeightType>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    let tree_edges = match graph.node_indices().next() {
        Some(first) => grow_forest(graph, first, weight_operations),
        None => Vec::new(),
    };
    SpanningTree::from_edges(graph, tree_edges, weight_operations)
}

/// Computes a minimum spanning forest with Prim's algorithm, starting from `source`.
///
/// The tree grows from `source` by repeatedly adding the lightest edge connecting a node outside of the tree.
/// The lightest known connecting edge of each node outside the tree is kept in a priority queue.
/// If the graph is disconnected, then the growth restarts from the lowest unreached node until all nodes are part of the forest.
///
/// Fails with `NodeNotInGraph` if `source` is not part of the graph.
pub fn prim_from<Graph, WeightType, Operations>(
    graph: &Graph,
    source: Graph::NodeIndex,
    weight_operations: &Operations,
) -> Result<SpanningTree<Graph::NodeIndex, Graph::EdgeIndex, WeightType>>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    check_node(graph, source)?;
    let tree_edges = grow_forest(graph, source, weight_operations);
    Ok(SpanningTree::from_edges(graph, tree_edges, weight_operations))
}

fn grow_forest<Graph, WeightType, Operations>(
    graph: &Graph,
    source: Graph::NodeIndex,
    weight_operations: &Operations,
) -> Vec<Graph::EdgeIndex>
where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    debug!(
        "Prim from {} in a graph with {} nodes and {} edges",
        source.as_usize(),
        graph.node_count(),
        graph.edge_count()
    );
    let mut queue = FibonacciHeap::with_order(WeightOrder::new(weight_operations));
    let mut shortest_edges = vec![None; graph.node_count()];
    let mut in_tree = BitVector::new(graph.node_count());
    let mut tree_edges = Vec::new();

    let roots = std::iter::once(source).chain(graph.node_indices());
    for root in roots {
        if in_tree.contains(root.as_usize()) {
            continue;
        }
        if root != source {
            trace!("Restarting Prim from node {}", root.as_usize());
        }
        in_tree.insert(root.as_usize());
        relax_neighbors(graph, root, &in_tree, &mut queue, &mut shortest_edges);

        while let Some((node, _)) = queue.pop() {
            in_tree.insert(node.as_usize());
            if let Some(edge) = shortest_edges[node.as_usize()] {
                tree_edges.push(edge);
            }
            relax_neighbors(graph, node, &in_tree, &mut queue, &mut shortest_edges);
        }
    }

    tree_edges
}

/// Offers all edges from `node` to nodes outside of the tree as new connections.
fn relax_neighbors<Graph, WeightType, Operations>(
    graph: &Graph,
    node: Graph::NodeIndex,
    in_tree: &BitVector,
    queue: &mut FibonacciHeap<Graph::NodeIndex, WeightType, WeightOrder<'_, Operations>>,
    shortest_edges: &mut [Option<Graph::EdgeIndex>],
) where
    Graph: StaticGraph,
    Graph::EdgeData: WeightedEdgeData<WeightType>,
    Operations: OrderedMonoid<WeightType>,
{
    for neighbor in undirected_neighbors(graph, node) {
        let neighbor_node = neighbor.node_id;
        if in_tree.contains(neighbor_node.as_usize()) {
            continue;
        }
        if queue.push(neighbor_node, edge_weight(graph, neighbor.edge_id)) {
            shortest_edges[neighbor_node.as_usize()] = Some(neighbor.edge_id);
        }
    }
}
