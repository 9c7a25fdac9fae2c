use crate::input::{read_edge_list_file, NamedGraph};
use crate::{CliOptions, ErrorKind};
use clap::Parser;
use error_chain::bail;
use log::{error, info};
use traitgraph_weighted::algo::spanning_tree::{boruvka, kruskal, prim, reverse_delete};
use traitgraph_weighted::implementation::petgraph_impl;
use traitgraph_weighted::interface::DynamicGraph;
use traitgraph_weighted::weight::BaseWeightOperations;

#[derive(Parser)]
pub struct SpanningTreeCommand {
    #[clap(
        short,
        long,
        help = "The input file, containing one edge per line as `from to weight`"
    )]
    pub input: String,

    #[clap(
        short,
        long,
        default_value = "kruskal",
        help = "The algorithm to use, one of kruskal, prim, boruvka, reverse-delete"
    )]
    pub algorithm: String,

    #[clap(
        short,
        long,
        help = "Interpret the edges as undirected. Spanning trees ignore edge directions, so this only affects how the input is stored"
    )]
    pub undirected: bool,
}

pub(crate) fn spanning_tree(
    _options: &CliOptions,
    subcommand: &SpanningTreeCommand,
) -> crate::Result<()> {
    if subcommand.undirected {
        let graph = read_edge_list_file(
            &subcommand.input,
            petgraph_impl::new_undirected::<String, f64>(),
        )?;
        compute_spanning_tree(&graph, subcommand)
    } else {
        let graph = read_edge_list_file(&subcommand.input, petgraph_impl::new::<String, f64>())?;
        compute_spanning_tree(&graph, subcommand)
    }
}

fn compute_spanning_tree<Graph: DynamicGraph<NodeData = String, EdgeData = f64>>(
    graph: &NamedGraph<Graph>,
    subcommand: &SpanningTreeCommand,
) -> crate::Result<()> {
    let weight_operations = BaseWeightOperations;
    info!("Computing spanning forest with {}", subcommand.algorithm);

    let tree = match subcommand.algorithm.as_str() {
        "kruskal" => kruskal(&graph.graph, &weight_operations),
        "prim" => prim(&graph.graph, &weight_operations),
        "boruvka" => boruvka(&graph.graph, &weight_operations),
        "reverse-delete" => reverse_delete(&graph.graph, &weight_operations),
        unknown => {
            error!("Unknown spanning tree algorithm: {}", unknown);
            bail!(ErrorKind::Parameter);
        }
    };

    info!(
        "The spanning forest has {} edges, {} components and weight {}",
        tree.edge_count(),
        tree.component_count(),
        tree.weight()
    );
    for &edge in tree.edges() {
        let endpoints = graph.graph.edge_endpoints(edge);
        println!(
            "{}\t{}\t{}",
            graph.name(endpoints.from_node),
            graph.name(endpoints.to_node),
            graph.graph.edge_data(edge)
        );
    }
    Ok(())
}
