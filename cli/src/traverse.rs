use crate::input::{read_edge_list_file, NamedGraph};
use crate::{CliOptions, ErrorKind};
use clap::Parser;
use error_chain::bail;
use log::{error, info};
use traitgraph_weighted::algo::traversal::{
    breadth_first_search, depth_first_search, GraphVisitor, VisitState,
};
use traitgraph_weighted::implementation::petgraph_impl;
use traitgraph_weighted::interface::{DynamicGraph, GraphBase};

#[derive(Parser)]
pub struct TraverseCommand {
    #[clap(
        short,
        long,
        help = "The input file, containing one edge per line as `from to weight`"
    )]
    pub input: String,

    #[clap(short, long, help = "The name of the start node")]
    pub source: String,

    #[clap(
        short,
        long,
        default_value = "bfs",
        help = "The traversal order, one of bfs, dfs"
    )]
    pub order: String,

    #[clap(short, long, help = "Interpret the edges as undirected")]
    pub undirected: bool,
}

/// Records the visited nodes in order, each with the node it was reached from.
struct DiscoveryOrderVisitor<NodeIndex> {
    reached_from: Option<NodeIndex>,
    order: Vec<(NodeIndex, Option<NodeIndex>)>,
}

impl<Graph: GraphBase> GraphVisitor<Graph> for DiscoveryOrderVisitor<Graph::NodeIndex> {
    type Output = Vec<(Graph::NodeIndex, Option<Graph::NodeIndex>)>;

    fn discover_edge(
        &mut self,
        head: Graph::NodeIndex,
        _edge: Graph::EdgeIndex,
        _tail: Graph::NodeIndex,
    ) -> VisitState {
        self.reached_from = Some(head);
        VisitState::Continue
    }

    fn discover_vertex(&mut self, vertex: Graph::NodeIndex) -> VisitState {
        self.order.push((vertex, self.reached_from.take()));
        VisitState::Continue
    }

    fn on_completed(self) -> Self::Output {
        self.order
    }
}

pub(crate) fn traverse(_options: &CliOptions, subcommand: &TraverseCommand) -> crate::Result<()> {
    if subcommand.undirected {
        let graph = read_edge_list_file(
            &subcommand.input,
            petgraph_impl::new_undirected::<String, f64>(),
        )?;
        traverse_graph(&graph, subcommand)
    } else {
        let graph = read_edge_list_file(&subcommand.input, petgraph_impl::new::<String, f64>())?;
        traverse_graph(&graph, subcommand)
    }
}

fn traverse_graph<Graph: DynamicGraph<NodeData = String, EdgeData = f64>>(
    graph: &NamedGraph<Graph>,
    subcommand: &TraverseCommand,
) -> crate::Result<()> {
    let source = graph.node(&subcommand.source)?;
    let visitor = DiscoveryOrderVisitor {
        reached_from: None,
        order: Vec::new(),
    };

    let order = match subcommand.order.as_str() {
        "bfs" => breadth_first_search(&graph.graph, source, visitor)?,
        "dfs" => depth_first_search(&graph.graph, source, visitor)?,
        unknown => {
            error!("Unknown traversal order: {}", unknown);
            bail!(ErrorKind::Parameter);
        }
    };

    info!("Visited {} nodes", order.len());
    for (node, reached_from) in order {
        match reached_from {
            Some(reached_from) => println!("{}\t{}", graph.name(node), graph.name(reached_from)),
            None => println!("{}", graph.name(node)),
        }
    }
    Ok(())
}
