use crate::interface::DynamicGraph;
use rand::seq::IteratorRandom;
use rand::Rng;

/// Adds a binary tree to the given graph.
/// The first added node is the root of the tree, and all edges point away from the root.
/// A negative depth adds no nodes to the graph, a depth of 0 just the root, a depth of 1 the root an its children, and so on.
pub fn create_binary_tree<Graph: DynamicGraph>(
    graph: &mut Graph,
    depth: i32,
) -> Option<Graph::NodeIndex>
where
    Graph::NodeData: Default,
    Graph::EdgeData: Default,
{
    if depth < 0 {
        return None;
    }

    let root = graph.add_node(Default::default());
    create_binary_tree_recursively(graph, depth - 1, root);
    Some(root)
}

fn create_binary_tree_recursively<Graph: DynamicGraph>(
    graph: &mut Graph,
    depth: i32,
    root: Graph::NodeIndex,
) where
    Graph::NodeData: Default,
    Graph::EdgeData: Default,
{
    if depth < 0 {
        return;
    }

    let l = graph.add_node(Default::default());
    let r = graph.add_node(Default::default());
    graph.add_edge(root, l, Default::default());
    graph.add_edge(root, r, Default::default());
    create_binary_tree_recursively(graph, depth - 1, l);
    create_binary_tree_recursively(graph, depth - 1, r);
}

/// Adds a `width` times `height` grid to the given graph and returns its nodes in row-major order.
///
/// Each node is connected to its right and lower neighbor.
/// In a directed graph, the edges are added in both directions.
/// The data of each edge is computed by `edge_data` from the grid coordinates `(x, y)` of its endpoints.
pub fn create_grid_graph<Graph: DynamicGraph, EdgeDataGenerator>(
    graph: &mut Graph,
    width: usize,
    height: usize,
    mut edge_data: EdgeDataGenerator,
) -> Vec<Graph::NodeIndex>
where
    Graph::NodeData: Default,
    EdgeDataGenerator: FnMut((usize, usize), (usize, usize)) -> Graph::EdgeData,
{
    let nodes: Vec<_> = (0..width * height)
        .map(|_| graph.add_node(Default::default()))
        .collect();
    let directed = graph.is_directed();
    let mut connect = |graph: &mut Graph, from: (usize, usize), to: (usize, usize)| {
        let from_node = nodes[from.1 * width + from.0];
        let to_node = nodes[to.1 * width + to.0];
        graph.add_edge(from_node, to_node, edge_data(from, to));
        if directed {
            graph.add_edge(to_node, from_node, edge_data(to, from));
        }
    };

    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                connect(graph, (x, y), (x + 1, y));
            }
            if y + 1 < height {
                connect(graph, (x, y), (x, y + 1));
            }
        }
    }

    nodes
}

/// Computes the amount of edges in a graph with n nodes, given the edge factor c.
pub fn compute_m_from_n_and_c(n: usize, c: f64) -> usize {
    let node_amount_f64 = n as f64;
    let target_edge_amount =
        c * node_amount_f64 * (node_amount_f64.ln().max(1.0) + node_amount_f64.ln().ln().max(0.0));
    target_edge_amount.round() as usize
}

/// Creates a random graph with the given amount of nodes and without parallel edges or self loops.
/// Assumes that the graph is empty.
///
/// The amount of edges will be `c * n * (log(n) + log(log(n)))`, where `n` is the amount of nodes,
/// capped at the amount of edges of a complete graph.
/// The data of each edge is drawn by `edge_data` from the same random generator.
pub fn create_random_graph<Graph: DynamicGraph, Random: Rng, EdgeDataGenerator>(
    graph: &mut Graph,
    node_amount: usize,
    c: f64,
    random: &mut Random,
    mut edge_data: EdgeDataGenerator,
) where
    Graph::NodeData: Default,
    EdgeDataGenerator: FnMut(&mut Random) -> Graph::EdgeData,
{
    if node_amount == 0 {
        return;
    }

    for _ in 0..node_amount {
        graph.add_node(Default::default());
    }

    let directed = graph.is_directed();
    let complete_edge_amount = if directed {
        node_amount * (node_amount - 1)
    } else {
        node_amount * (node_amount - 1) / 2
    };
    let target_edge_amount = compute_m_from_n_and_c(node_amount, c).min(complete_edge_amount);
    debug!(
        "Creating random graph with {} nodes and {} edges",
        node_amount, target_edge_amount
    );

    while graph.edge_count() < target_edge_amount {
        let n1 = graph.node_indices().choose(random).unwrap();
        let n2 = graph.node_indices().choose(random).unwrap();

        if n1 != n2
            && !graph.contains_edge_between(n1, n2)
            && (directed || !graph.contains_edge_between(n2, n1))
        {
            let data = edge_data(random);
            graph.add_edge(n1, n2, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{create_binary_tree, create_grid_graph, create_random_graph};
    use crate::implementation::petgraph_impl;
    use crate::interface::{ImmutableGraphContainer, NavigableGraph};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_create_binary_tree_2() {
        let mut graph = petgraph_impl::new::<(), ()>();
        create_binary_tree(&mut graph, 2);
        debug_assert_eq!(graph.node_count(), 7);
        debug_assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_create_grid_graph() {
        let mut graph = petgraph_impl::new::<(), usize>();
        let nodes = create_grid_graph(&mut graph, 3, 2, |from, to| from.0 + to.1);
        assert_eq!(nodes.len(), 6);
        // 2 * 2 horizontal and 3 vertical connections, each in both directions
        assert_eq!(graph.edge_count(), 14);
        assert_eq!(graph.out_degree(nodes[4]), 3);

        let mut undirected = petgraph_impl::new_undirected::<(), usize>();
        create_grid_graph(&mut undirected, 3, 2, |_, _| 1);
        assert_eq!(undirected.edge_count(), 7);
    }

    #[test]
    fn test_create_random_graph() {
        let mut random = StdRng::seed_from_u64(42);
        let mut graph = petgraph_impl::new_undirected::<(), u8>();
        create_random_graph(&mut graph, 4, 10.0, &mut random, |random| {
            random.gen_range(1..10)
        });
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 6);
        for edge in graph.edge_indices() {
            let endpoints = graph.edge_endpoints(edge);
            assert!(!endpoints.is_self_loop());
            assert!((1..10).contains(graph.edge_data(edge)));
        }
    }
}
