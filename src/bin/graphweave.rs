//! Graphweave CLI: query graph documents from the command line.
//!
//! Usage:
//!   graphweave traverse --graph FILE --start NAME [--order bft|dft|dft-iter]
//!   graphweave search --graph FILE --start NAME --key K --value V
//!   graphweave path --graph FILE --from A --to B [--weighted]
//!   graphweave render --graph FILE [--sorted] [--format plain|plantuml]

use clap::{Parser, Subcommand, ValueEnum};
use graphweave::builder::document::{NAME_ATTRIBUTE, WEIGHT_ATTRIBUTE};
use graphweave::builder::{GraphDocument, LoadedGraph};
use graphweave::render::{basic_render, render_plantuml, PlantUmlOptions, RenderOptions};
use graphweave::{
    bfs, bft, dfs_iterative, dfs_recursive, dft_iterative, dft_recursive, edge_attribute_weight,
    AttributeValue, Direction, GraphConfig, GraphResult, NeighborOptions, NodeId, PathMethod,
    PathQuery,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "graphweave",
    version,
    about = "Typed graph container with traversal and shortest paths"
)]
struct Cli {
    /// Graph document (YAML, or JSON by extension)
    #[arg(long, global = true)]
    graph: Option<PathBuf>,
    /// Graph config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print neighbor cache statistics to stderr when done
    #[arg(long, global = true)]
    cache_report: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Traverse from a node and print the visiting order
    Traverse {
        /// Name of the start node
        #[arg(long)]
        start: String,
        #[arg(long, value_enum, default_value = "bft")]
        order: TraversalOrder,
        #[arg(long, value_enum, default_value = "forward")]
        direction: DirectionArg,
    },
    /// Find the first node whose attribute matches a value
    Search {
        /// Name of the start node
        #[arg(long)]
        start: String,
        /// Attribute key
        #[arg(long)]
        key: String,
        /// Attribute value, parsed as YAML (so `3` is an integer)
        #[arg(long)]
        value: String,
        #[arg(long, value_enum, default_value = "bfs")]
        order: SearchOrder,
    },
    /// Find the shortest path between two nodes
    Path {
        /// Name of the start node
        #[arg(long)]
        from: String,
        /// Name of the destination node
        #[arg(long)]
        to: String,
        /// Shortest path algorithm
        #[arg(long, default_value = "dijkstra")]
        method: String,
        /// Use edge `weight` attributes instead of unit steps
        #[arg(long)]
        weighted: bool,
        #[arg(long, value_enum, default_value = "forward")]
        direction: DirectionArg,
    },
    /// Print each node with its neighbors, or PlantUML source
    Render {
        /// Sort nodes and neighbors by name (plain format)
        #[arg(long)]
        sorted: bool,
        #[arg(long, value_enum, default_value = "plain")]
        format: RenderFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TraversalOrder {
    Bft,
    Dft,
    DftIter,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchOrder {
    Bfs,
    Dfs,
    DfsIter,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderFormat {
    Plain,
    Plantuml,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
    Any,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Forward => Direction::Forward,
            DirectionArg::Backward => Direction::Backward,
            DirectionArg::Any => Direction::Any,
        }
    }
}

fn open_graph(graph: Option<&Path>, config: Option<&Path>) -> GraphResult<LoadedGraph> {
    let config = match config {
        Some(path) => GraphConfig::load(path)?,
        None => GraphConfig::default(),
    };
    let document = match graph {
        Some(path) => GraphDocument::load(path)?,
        None => GraphDocument::from_yaml_str(&std::io::read_to_string(std::io::stdin())?)?,
    };
    document.build(config)
}

/// Display name of a node: its document name, or its handle
fn display_name(loaded: &LoadedGraph, node: NodeId) -> String {
    loaded
        .name_of(node)
        .map(str::to_string)
        .unwrap_or_else(|| node.to_string())
}

fn report_error(e: impl std::fmt::Display) -> i32 {
    eprintln!("Error: {}", e);
    1
}

fn cmd_traverse(loaded: &LoadedGraph, start: &str, order: TraversalOrder, direction: Direction) -> i32 {
    let start = match loaded.node(start) {
        Ok(id) => id,
        Err(e) => return report_error(e),
    };
    let options = NeighborOptions::new().direction(direction);
    let graph = &loaded.graph;
    let uni = Some(loaded.universe);
    let result = match order {
        TraversalOrder::Bft => bft(graph, uni, start, &options),
        TraversalOrder::Dft => dft_recursive(graph, uni, start, &options),
        TraversalOrder::DftIter => dft_iterative(graph, uni, start, &options),
    };
    match result {
        Ok(Some(nodes)) => {
            let names: Vec<String> = nodes.iter().map(|&n| display_name(loaded, n)).collect();
            println!("{}", names.join(" "));
            0
        }
        Ok(None) => {
            println!("(empty graph)");
            0
        }
        Err(e) => report_error(e),
    }
}

fn cmd_search(loaded: &LoadedGraph, start: &str, key: &str, raw: &str, order: SearchOrder) -> i32 {
    let start = match loaded.node(start) {
        Ok(id) => id,
        Err(e) => return report_error(e),
    };
    let value: AttributeValue =
        serde_yaml::from_str(raw).unwrap_or_else(|_| AttributeValue::from(raw));
    let options = NeighborOptions::new();
    let graph = &loaded.graph;
    let uni = Some(loaded.universe);
    let result = match order {
        SearchOrder::Bfs => bfs(graph, uni, start, key, &value, &options),
        SearchOrder::Dfs => dfs_recursive(graph, uni, start, key, &value, &options),
        SearchOrder::DfsIter => dfs_iterative(graph, uni, start, key, &value, &options),
    };
    match result {
        Ok(Some(found)) => {
            println!("{}", display_name(loaded, found));
            0
        }
        Ok(None) => {
            println!("No match for {}={}", key, value);
            0
        }
        Err(e) => report_error(e),
    }
}

fn cmd_path(
    loaded: &LoadedGraph,
    from: &str,
    to: &str,
    method: &str,
    weighted: bool,
    direction: Direction,
) -> i32 {
    let ends = loaded.node(from).and_then(|a| Ok((a, loaded.node(to)?)));
    let (start, dest) = match ends {
        Ok(ends) => ends,
        Err(e) => return report_error(e),
    };
    let method: PathMethod = match method.parse() {
        Ok(m) => m,
        Err(e) => return report_error(e),
    };

    let mut query = PathQuery::between(start, dest)
        .within(loaded.universe)
        .direction(direction)
        .method(method);
    if weighted {
        query = query.weight(edge_attribute_weight(WEIGHT_ATTRIBUTE, direction));
    }

    match query.execute(&loaded.graph) {
        Ok(result) if result.found => {
            let names: Vec<String> = result.path.iter().map(|&n| display_name(loaded, n)).collect();
            println!("{}", names.join(" -> "));
            if let Some(distance) = result.distance {
                println!("Distance: {}", distance);
            }
            0
        }
        Ok(_) => {
            println!("No path from '{}' to '{}'", from, to);
            0
        }
        Err(e) => report_error(e),
    }
}

fn cmd_render(loaded: &LoadedGraph, sorted: bool, format: RenderFormat) -> i32 {
    let label = |graph: &graphweave::Graph, node: NodeId| -> String {
        graph
            .node(node)
            .ok()
            .and_then(|n| n.attribute(NAME_ATTRIBUTE).and_then(AttributeValue::as_str).map(str::to_string))
            .unwrap_or_else(|| node.to_string())
    };
    let rendered = match format {
        RenderFormat::Plain => {
            let mut options = RenderOptions::new().label(label);
            if sorted {
                options = options.sort_by(label);
            }
            basic_render(&loaded.graph, loaded.universe, &options)
        }
        RenderFormat::Plantuml => render_plantuml(&loaded.graph, loaded.universe, &PlantUmlOptions::new()),
    };
    match rendered {
        Ok(Some(text)) => {
            println!("{}", text);
            0
        }
        Ok(None) => {
            println!("(empty graph)");
            0
        }
        Err(e) => report_error(e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let loaded = match open_graph(cli.graph.as_deref(), cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Traverse {
            start,
            order,
            direction,
        } => cmd_traverse(&loaded, &start, order, direction.into()),
        Commands::Search {
            start,
            key,
            value,
            order,
        } => cmd_search(&loaded, &start, &key, &value, order),
        Commands::Path {
            from,
            to,
            method,
            weighted,
            direction,
        } => cmd_path(&loaded, &from, &to, &method, weighted, direction.into()),
        Commands::Render { sorted, format } => cmd_render(&loaded, sorted, format),
    };

    if cli.cache_report {
        eprintln!("{}", loaded.graph.cache_report());
    }
    std::process::exit(code);
}
