use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::stdout;
use std::path::PathBuf;
use trends_core::config::{default_config_path, load_config};
use trends_core::core::matcher::Candidate;
use trends_core::core::state::Action;
use trends_core::core::types::Year;
use trends_core::{presets, render, Explorer};

const DEFAULT_BASE_URL: &str = "https://localhost/baby-name-charts/";

#[derive(Parser)]
#[command(name = "trends", about = "Explore baby name popularity over time")]
struct Cli {
    /// Directory with manifest.json and the chunk files
    #[arg(long, global = true, env = "TRENDS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Always parse the chunks instead of using the cached snapshot
    #[arg(long, global = true)]
    no_snapshot: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List suggestions for a name prefix or a /regex/
    Search { query: String },
    /// Print per-year values for one or more selections, e.g. "Kai (M)" or "/^Ka/"
    Series {
        #[arg(required = true)]
        selections: Vec<String>,
        #[arg(long)]
        from: Option<Year>,
        #[arg(long)]
        to: Option<Year>,
        /// Emit chart series as JSON
        #[arg(long)]
        json: bool,
        /// Chart width in columns
        #[arg(long, default_value_t = 72)]
        width: usize,
    },
    /// Build a share link for the given selections
    Link {
        #[arg(required = true)]
        selections: Vec<String>,
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base: String,
    },
    /// Chart the selections stored in a share link
    Open {
        url: String,
        #[arg(long, default_value_t = 72)]
        width: usize,
    },
    /// Chart a curated name group, picked at random unless --index is given
    Preset {
        #[arg(long)]
        index: Option<usize>,
        #[arg(long, default_value_t = 72)]
        width: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(default_config_path);
    let config = match &config_path {
        Some(path) => load_config(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => Default::default(),
    };
    let mut explorer = Explorer::open(&config, cli.data_dir.clone(), !cli.no_snapshot)
        .context("Error loading data")?;

    match cli.command {
        Commands::Search { query } => cmd_search(&explorer, &query),
        Commands::Series { selections, from, to, json, width } => {
            select_all(&mut explorer, &selections)?;
            if let Some(from) = from {
                explorer.dispatch(Action::SetStartYear(from));
            }
            if let Some(to) = to {
                explorer.dispatch(Action::SetEndYear(to));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&explorer.chart())?);
                Ok(())
            } else {
                print_series(&explorer, width)
            }
        }
        Commands::Link { selections, base } => {
            select_all(&mut explorer, &selections)?;
            println!("{}", explorer.permalink(&base));
            Ok(())
        }
        Commands::Open { url, width } => {
            explorer.dispatch(Action::Restore(url));
            if explorer.state().selections.is_empty() {
                bail!("The link does not contain any selections");
            }
            print_series(&explorer, width)
        }
        Commands::Preset { index, width } => {
            let list = match index {
                Some(i) => presets::get(i)
                    .with_context(|| format!("No preset {} (there are {})", i, presets::len()))?,
                None => presets::random(&mut rand::rng()),
            };
            explorer.dispatch(Action::LoadSelections(list));
            print_series(&explorer, width)?;
            println!("{}", explorer.permalink(DEFAULT_BASE_URL));
            Ok(())
        }
    }
}

fn cmd_search(explorer: &Explorer, query: &str) -> Result<()> {
    let result = explorer.search(query);
    if result.is_empty() {
        println!("No results found");
    }
    for candidate in &result.candidates {
        println!("{}", candidate);
    }
    if result.truncated {
        println!("... more results not shown, refine the search");
    }
    Ok(())
}

fn select_all(explorer: &mut Explorer, labels: &[String]) -> Result<()> {
    for label in labels {
        let candidate = Candidate::parse(label)
            .with_context(|| format!("Expected \"Name (M|F|All)\" or /pattern/, got {:?}", label))?;
        let before = explorer.state().selections.len();
        explorer.dispatch(Action::Select(candidate));
        if explorer.state().selections.len() == before {
            eprintln!("Skipping {:?}: no matching names or already selected", label);
        }
    }
    Ok(())
}

fn print_series(explorer: &Explorer, width: usize) -> Result<()> {
    let chart = explorer.chart();
    render::render_chart(&mut stdout(), &chart, explorer.state().year_range, width)?;
    for series in &chart {
        println!("\n{}", series.label);
        for point in &series.points {
            println!("  {}  {}", point.year, point.label);
        }
    }
    Ok(())
}
