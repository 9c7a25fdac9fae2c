#![recursion_limit = "1024"]

use clap::Parser;
use error_chain::{error_chain, ChainedError, ExitCode};
use log::{error, info};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

mod input;
mod shortest_path;
mod spanning_tree;
mod traverse;

error_chain! {
    foreign_links {
        Io(std::io::Error);
    }

    links {
        Graph(traitgraph_weighted::error::Error, traitgraph_weighted::error::ErrorKind);
    }

    errors {
        Parameter {
            description("a parameter was missing, superfluous or had an illegal value, see the log for more details")
            display("a parameter was missing, superfluous or had an illegal value, see the log for more details")
        }

        MalformedInput(line: usize, reason: String) {
            description("the input file is malformed")
            display("malformed input in line {}: {}", line, reason)
        }

        UnknownNode(name: String) {
            description("a node name does not occur in the input file")
            display("node '{}' does not occur in the input file", name)
        }
    }
}

#[derive(Parser)]
#[clap(name = "Weighted Graph Algorithms", version = env!("CARGO_PKG_VERSION"), author = "Sebastian Schmidt <sebastian.schmidt@helsinki.fi>")]
struct CliOptions {
    #[clap(subcommand)]
    pub subcommand: Command,

    #[clap(
        long,
        default_value = "Info",
        help = "The log level to use, one of Error, Warn, Info, Debug, Trace"
    )]
    pub log_level: LevelFilter,
}

#[derive(Parser)]
enum Command {
    #[clap(about = "Computes a shortest path, or the shortest paths from a source to all reachable nodes.")]
    ShortestPath(shortest_path::ShortestPathCommand),
    #[clap(about = "Computes a minimum spanning forest.")]
    SpanningTree(spanning_tree::SpanningTreeCommand),
    #[clap(about = "Prints the nodes reachable from a source in traversal order, together with the node they were reached from.")]
    Traverse(traverse::TraverseCommand),
}

// The main is unpacked from an error-chain macro.
// The real main (programmed manually) is run(), below this method.
fn main() {
    ::std::process::exit(match run() {
        Ok(()) => ExitCode::code(()),
        Err(ref e) => {
            error!("{}", ChainedError::display_chain(e));
            1
        }
    });
}

fn initialise_logging(level_filter: LevelFilter) {
    CombinedLogger::init(vec![TermLogger::new(
        level_filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .unwrap();

    info!("Logging initialised successfully");
}

fn run() -> Result<()> {
    let options = &CliOptions::parse();
    initialise_logging(options.log_level);

    match &options.subcommand {
        Command::ShortestPath(subcommand) => shortest_path::shortest_path(options, subcommand),
        Command::SpanningTree(subcommand) => spanning_tree::spanning_tree(options, subcommand),
        Command::Traverse(subcommand) => traverse::traverse(options, subcommand),
    }?;

    info!("Goodbye");
    Ok(())
}
