use crate::input::{read_edge_list_file, NamedGraph};
use crate::{CliOptions, ErrorKind};
use clap::Parser;
use error_chain::bail;
use log::{error, info};
use traitgraph_weighted::algo::shortest_path::{
    bellman_ford, bidirectional_dijkstra, dijkstra, floyd_warshall, single_source_dijkstra,
    WeightedPath,
};
use traitgraph_weighted::implementation::petgraph_impl;
use traitgraph_weighted::interface::DynamicGraph;
use traitgraph_weighted::weight::BaseWeightOperations;

#[derive(Parser)]
pub struct ShortestPathCommand {
    #[clap(
        short,
        long,
        help = "The input file, containing one edge per line as `from to weight`"
    )]
    pub input: String,

    #[clap(short, long, help = "The name of the source node")]
    pub source: String,

    #[clap(
        short,
        long,
        help = "The name of the target node. If not given, a shortest path to each node reachable from the source is printed"
    )]
    pub target: Option<String>,

    #[clap(
        short,
        long,
        default_value = "dijkstra",
        help = "The algorithm to use, one of dijkstra, bidirectional, bellman-ford, floyd-warshall. Only bellman-ford and floyd-warshall support negative weights, and bidirectional requires a target"
    )]
    pub algorithm: String,

    #[clap(short, long, help = "Interpret the edges as undirected")]
    pub undirected: bool,
}

pub(crate) fn shortest_path(
    _options: &CliOptions,
    subcommand: &ShortestPathCommand,
) -> crate::Result<()> {
    if subcommand.undirected {
        let graph = read_edge_list_file(
            &subcommand.input,
            petgraph_impl::new_undirected::<String, f64>(),
        )?;
        compute_shortest_paths(&graph, subcommand)
    } else {
        let graph = read_edge_list_file(&subcommand.input, petgraph_impl::new::<String, f64>())?;
        compute_shortest_paths(&graph, subcommand)
    }
}

fn compute_shortest_paths<Graph: DynamicGraph<NodeData = String, EdgeData = f64>>(
    graph: &NamedGraph<Graph>,
    subcommand: &ShortestPathCommand,
) -> crate::Result<()> {
    let weight_operations = BaseWeightOperations;
    let source = graph.node(&subcommand.source)?;
    let target = match &subcommand.target {
        Some(target) => Some(graph.node(target)?),
        None => None,
    };
    info!(
        "Computing shortest paths from '{}' with {}",
        subcommand.source, subcommand.algorithm
    );

    let paths = match (subcommand.algorithm.as_str(), target) {
        ("dijkstra", Some(target)) => {
            vec![dijkstra(&graph.graph, source, target, &weight_operations)?]
        }
        ("dijkstra", None) => {
            single_source_dijkstra(&graph.graph, source, &weight_operations)?.paths()?
        }
        ("bidirectional", Some(target)) => vec![bidirectional_dijkstra(
            &graph.graph,
            source,
            target,
            &weight_operations,
        )?],
        ("bidirectional", None) => {
            error!("The bidirectional algorithm requires a target");
            bail!(ErrorKind::Parameter);
        }
        ("bellman-ford", target) => {
            let tree = bellman_ford(&graph.graph, source, &weight_operations)?;
            match target {
                Some(target) => vec![tree.shortest_path(target)?],
                None => tree.paths()?,
            }
        }
        ("floyd-warshall", Some(target)) => {
            vec![floyd_warshall(&graph.graph, &weight_operations).shortest_path(source, target)?]
        }
        ("floyd-warshall", None) => {
            let all_pairs = floyd_warshall(&graph.graph, &weight_operations);
            let mut paths = Vec::new();
            for target in graph.graph.node_indices() {
                if target != source && all_pairs.distance(source, target).is_some() {
                    paths.push(all_pairs.shortest_path(source, target)?);
                }
            }
            paths
        }
        (unknown, _) => {
            error!("Unknown shortest path algorithm: {}", unknown);
            bail!(ErrorKind::Parameter);
        }
    };

    info!("Found {} shortest paths", paths.len());
    for path in &paths {
        println!("{}", format_path(graph, path));
    }
    Ok(())
}

/// Formats a path as its node names followed by its weight.
fn format_path<Graph: DynamicGraph<NodeData = String, EdgeData = f64>>(
    graph: &NamedGraph<Graph>,
    path: &WeightedPath<Graph::NodeIndex, Graph::EdgeIndex, f64>,
) -> String {
    let names: Vec<_> = path.nodes().iter().map(|&node| graph.name(node)).collect();
    format!("{}\t{}", names.join(" -> "), path.weight())
}
