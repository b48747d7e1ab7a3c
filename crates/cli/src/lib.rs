mod schema;
mod view;

pub use schema::SchemaTarget;

use clap::{Parser, Subcommand, ValueEnum};
use dumpscope_core::logging::{LogOptions, init_logging};
use dumpscope_core::{Analyzer, DumpscopeConfig};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "dumpscope",
    version,
    about = "Turns indented compiler debug dumps into trees, graphs and summaries",
    long_about = "Dumpscope rebuilds the tree behind an indentation-formatted compiler debug dump \
                  (such as rustc's -Zunpretty=ast-tree output) and derives display-ready views from it: \
                  a bounded tree, a styled node/edge graph, a symbol summary and size statistics."
)]
pub struct Cli {
    /// JSON file overriding parse, simplify and style settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level, also to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the full tree
    Tree {
        /// Dump file to read; `-` or nothing reads stdin
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = TreeFormat::Text)]
        format: TreeFormat,
    },
    /// Rebuild the tree and bound its depth and fan-out
    Simplify {
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[arg(long)]
        max_depth: Option<usize>,

        #[arg(long)]
        max_children: Option<usize>,
    },
    /// Project the tree into styled nodes and edges
    Graph {
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,
    },
    /// List functions, variables, literals and structures found in the text
    Symbols {
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Line, indentation and size figures
    Stats {
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Every view at once, as JSON
    Analyze {
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
    },
    /// Print the JSON schema of an output
    Schema {
        #[arg(value_enum, default_value_t = SchemaTarget::Analysis)]
        target: SchemaTarget,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Json,
    Dot,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = init_logging(&LogOptions::new("cli").verbose(cli.verbose))?;

    let config = load_config(cli.config.as_deref())?;
    let output = execute(&cli.command, config, std::io::stdout().is_terminal())?;
    println!("{}", output);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<DumpscopeConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Ok(DumpscopeConfig::from_json_file(path)?)
        }
        None => Ok(DumpscopeConfig::default()),
    }
}

/// Runs one command and returns what should be printed.
pub fn execute(
    command: &Commands,
    mut config: DumpscopeConfig,
    color: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Commands::Simplify {
        max_depth,
        max_children,
        ..
    } = command
    {
        if let Some(depth) = max_depth {
            config.simplify.max_depth = *depth;
        }
        if let Some(children) = max_children {
            config.simplify.max_children = *children;
        }
    }
    let analyzer = Analyzer::new(config);

    let output = match command {
        Commands::Tree { input, format } => {
            let tree = analyzer.build_tree(&read_input(input.as_deref())?);
            match format {
                TreeFormat::Text => view::render_tree(tree.root(), color),
                TreeFormat::Json => serde_json::to_string_pretty(&tree)?,
            }
        }
        Commands::Simplify { input, .. } => {
            let tree = analyzer.build_tree(&read_input(input.as_deref())?);
            serde_json::to_string_pretty(&analyzer.simplify(&tree))?
        }
        Commands::Graph { input, format } => {
            let tree = analyzer.build_tree(&read_input(input.as_deref())?);
            let graph = analyzer.project(&tree);
            match format {
                GraphFormat::Json => serde_json::to_string_pretty(&graph)?,
                GraphFormat::Dot => graph.to_dot(),
            }
        }
        Commands::Symbols { input, json } => {
            let symbols = analyzer.extract_symbols(&read_input(input.as_deref())?);
            if *json {
                serde_json::to_string_pretty(&symbols)?
            } else {
                view::symbols_table(&symbols)
            }
        }
        Commands::Stats { input, json } => {
            let stats = analyzer.collect_stats(&read_input(input.as_deref())?);
            if *json {
                serde_json::to_string_pretty(&stats)?
            } else {
                view::stats_table(&stats)
            }
        }
        Commands::Analyze { input } => {
            serde_json::to_string_pretty(&analyzer.analyze(&read_input(input.as_deref())?))?
        }
        Commands::Schema { target } => schema::schema_json(*target)?,
    };

    Ok(output)
}

/// Reads the whole dump from `path`, or from stdin when absent or `-`.
fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            info!("Reading dump from {}", path.display());
            std::fs::read_to_string(path)
        }
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
