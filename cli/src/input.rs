use crate::{ErrorKind, Result};
use error_chain::bail;
use log::{debug, info};
use std::collections::HashMap;
use std::io::BufRead;
use traitgraph_weighted::interface::DynamicGraph;

/// A graph read from an edge list, with node names as node data and weights as edge data.
pub struct NamedGraph<Graph: DynamicGraph> {
    pub graph: Graph,
    node_names: HashMap<String, Graph::NodeIndex>,
}

impl<Graph: DynamicGraph<NodeData = String, EdgeData = f64>> NamedGraph<Graph> {
    /// Returns the node with the given name.
    pub fn node(&self, name: &str) -> Result<Graph::NodeIndex> {
        self.node_names
            .get(name)
            .copied()
            .ok_or_else(|| ErrorKind::UnknownNode(name.to_string()).into())
    }

    pub fn name(&self, node: Graph::NodeIndex) -> &str {
        self.graph.node_data(node)
    }

    fn node_or_insert(&mut self, name: &str) -> Graph::NodeIndex {
        if let Some(&node) = self.node_names.get(name) {
            node
        } else {
            let node = self.graph.add_node(name.to_string());
            self.node_names.insert(name.to_string(), node);
            node
        }
    }
}

/// Reads an edge list into the given empty graph.
///
/// Each line contains an edge `from to weight`, separated by whitespace.
/// Nodes are created on their first occurrence, and their names may be arbitrary tokens.
/// Empty lines and lines starting with `#` are ignored.
pub fn read_edge_list<Graph: DynamicGraph<NodeData = String, EdgeData = f64>, Reader: BufRead>(
    reader: Reader,
    graph: Graph,
) -> Result<NamedGraph<Graph>> {
    let mut result = NamedGraph {
        graph,
        node_names: HashMap::new(),
    };

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<_> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            bail!(ErrorKind::MalformedInput(
                line_number,
                format!("expected 3 columns `from to weight`, but found {}", tokens.len())
            ));
        }
        let weight: f64 = tokens[2].parse().map_err(|_| {
            ErrorKind::MalformedInput(line_number, format!("'{}' is not a number", tokens[2]))
        })?;
        if weight.is_nan() {
            bail!(ErrorKind::MalformedInput(
                line_number,
                "the weight must not be NaN".to_string()
            ));
        }

        let from = result.node_or_insert(tokens[0]);
        let to = result.node_or_insert(tokens[1]);
        result.graph.add_edge(from, to, weight);
    }

    debug!(
        "Read edge list with {} nodes and {} edges",
        result.graph.node_count(),
        result.graph.edge_count()
    );
    Ok(result)
}

/// Reads an edge list from the file with the given name.
pub fn read_edge_list_file<Graph: DynamicGraph<NodeData = String, EdgeData = f64>>(
    file_name: &str,
    graph: Graph,
) -> Result<NamedGraph<Graph>> {
    info!("Reading edge list from '{}'", file_name);
    let file = std::fs::File::open(file_name)?;
    read_edge_list(std::io::BufReader::new(file), graph)
}
