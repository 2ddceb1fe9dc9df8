use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use depgraph_core::{FilterQuery, GraphView, Jitter, LayoutConfig, LayoutStrategy, ViewMode};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

mod report;

use report::{ClassifyReport, FilterReport, LayoutReport};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "depgraph")]
#[command(about = "Dependency graph layout and relationship analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute node positions with a layout strategy
    Layout(LayoutArgs),

    /// List the nodes visible in a view
    Filter(FilterArgs),

    /// Classify every link relative to the focus node
    Classify(InputArgs),

    /// Print graph statistics
    Stats(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Analysis JSON file (reads stdin when omitted)
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Compact single-line JSON output
    #[arg(long)]
    compact: bool,
}

#[derive(Args)]
struct LayoutArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Layout strategy: hierarchical, grid, circular or radial
    #[arg(
        long,
        short = 's',
        value_parser = |s: &str| s.parse::<LayoutStrategy>(),
        default_value = "hierarchical"
    )]
    strategy: LayoutStrategy,

    /// Seed for positional jitter
    #[arg(long, conflicts_with = "no_jitter")]
    seed: Option<u64>,

    /// Disable positional jitter entirely
    #[arg(long)]
    no_jitter: bool,

    /// Layout configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct FilterArgs {
    #[command(flatten)]
    input: InputArgs,

    /// View mode: all, dependencies, dependents or cross-repo
    #[arg(
        long,
        short = 'm',
        value_parser = |s: &str| s.parse::<ViewMode>(),
        default_value = "all"
    )]
    mode: ViewMode,

    /// Case-insensitive search over name, path and repository
    #[arg(long)]
    search: Option<String>,

    /// Reference repository for cross-repo mode
    #[arg(long)]
    repository: Option<String>,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Layout(args) => run_layout(args),
        Commands::Filter(args) => run_filter(args),
        Commands::Classify(args) => {
            let view = load_view(&args)?;
            emit(&ClassifyReport::new(&view), args.compact)
        }
        Commands::Stats(args) => {
            let view = load_view(&args)?;
            emit(&view.stats(), args.compact)
        }
    }
}

fn run_layout(args: LayoutArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => LayoutConfig::from_path(path)
            .with_context(|| format!("Failed to load layout config {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    let mut jitter = if args.no_jitter {
        Jitter::disabled()
    } else if let Some(seed) = args.seed {
        Jitter::seeded(seed)
    } else {
        Jitter::from_entropy()
    };

    let view = load_view(&args.input)?;
    let strategy = args.strategy;
    let positions = view.layout(strategy, &config, &mut jitter);
    log::info!("Laid out {} nodes with {strategy} strategy", positions.len());

    emit(&LayoutReport::new(&view, strategy, positions), args.input.compact)
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let view = load_view(&args.input)?;

    let mut query = FilterQuery::new(args.mode);
    if let Some(term) = args.search {
        query = query.search(term);
    }
    if let Some(repository) = args.repository {
        query = query.reference_repository(repository);
    }

    emit(&FilterReport::new(&view, &query), args.input.compact)
}

fn load_view(args: &InputArgs) -> Result<GraphView> {
    let raw = read_input(args)?;
    let view = GraphView::from_json_str(&raw).context("Invalid analysis document")?;
    log::debug!(
        "Loaded analysis: {} nodes, {} links",
        view.model().node_count(),
        view.model().links().len()
    );
    Ok(view)
}

fn read_input(args: &InputArgs) -> Result<String> {
    if let Some(path) = &args.input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read analysis from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read analysis from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Analysis input is empty. Provide --input or pipe JSON via stdin.");
    }

    Ok(buffer)
}

fn emit<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let output = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    print_stdout(&output)
}
