//! CLI for the Venn circle puzzle.
//!
//! Provides:
//! - Region and adjacency-graph extraction for a circle layout
//! - Random target generation, single or batched (in parallel)
//! - Match checking between a current and a target layout
//! - SVG rendering

mod batch;
mod render;

use std::{fs, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::de::DeserializeOwned;
use serde_json::json;

use venn_core::{
    circle::Circle,
    config::{AdjacencyPolicy, Config, MatchRule, Strategy},
    layout::Layout,
    parse_log_level,
    structure::Structure,
    target,
};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VENN_BUILD_SHA"), ")");

#[derive(Parser)]
#[command(name = "venn")]
#[command(about = "Venn circle puzzle: regions, adjacency graphs, targets", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Config (JSON, or path to a JSON file); omitted fields take their defaults
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a layout's regions and adjacency graph (JSON)
    Regions {
        /// Circles (JSON, or path to a JSON file)
        #[arg(short, long)]
        circles: String,

        /// Region extraction strategy (sampling, analytic)
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Adjacency policy (lattice, overlap, geometric)
        #[arg(long)]
        policy: Option<AdjacencyPolicy>,

        /// Sampling grid step
        #[arg(long)]
        step: Option<f64>,
    },

    /// Generate a random target layout (JSON)
    Target {
        /// Base circles (JSON, or path to a JSON file); defaults to the canvas' default layout
        #[arg(short, long)]
        circles: Option<String>,

        #[arg(long, default_value = "600")]
        width: f64,

        #[arg(long, default_value = "400")]
        height: f64,

        /// RNG seed; random if omitted
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Compare a current layout against a target; exits 1 if they don't match
    Check {
        /// Current circles (JSON, or path to a JSON file)
        #[arg(long)]
        current: String,

        /// Target circles (JSON, or path to a JSON file)
        #[arg(long)]
        target: String,

        /// Match rule (edges, labels)
        #[arg(long)]
        rule: Option<MatchRule>,
    },

    /// Render a layout and its region labels as SVG
    Render {
        /// Circles (JSON, or path to a JSON file)
        #[arg(short, long)]
        circles: String,

        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value = "800")]
        width: f64,

        #[arg(long, default_value = "600")]
        height: f64,

        /// Omit region labels
        #[arg(long)]
        no_regions: bool,
    },

    /// Generate many targets in parallel and print a histogram of their structures
    Batch {
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        #[arg(short, long, default_value = "0")]
        seed: u64,

        #[arg(long, default_value = "600")]
        width: f64,

        #[arg(long, default_value = "400")]
        height: f64,
    },
}

/// Parse `arg` as inline JSON if it looks like JSON, otherwise as a path to a JSON file.
fn load_json<T: DeserializeOwned>(arg: &str, what: &str) -> Result<T> {
    let trimmed = arg.trim_start();
    let text = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        arg.to_string()
    } else {
        fs::read_to_string(arg).with_context(|| format!("reading {} from {}", what, arg))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing {}", what))
}

fn load_circles(arg: &str, what: &str) -> Result<Vec<Circle>> {
    let layout: Layout = load_json(arg, what)?;
    Ok(layout.into())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = &cli.log_level {
        logger.filter_level(parse_log_level(Some(level))?);
    }
    logger.init();

    let mut config = match &cli.config {
        Some(arg) => load_json::<Config>(arg, "config")?,
        None => Config::default(),
    };
    debug!("Config: {:?}", config);

    match cli.command {
        Commands::Regions { circles, strategy, policy, step } => {
            let circles = load_circles(&circles, "circles")?;
            if let Some(strategy) = strategy {
                config.extract.strategy = strategy;
            }
            if let Some(policy) = policy {
                config.adjacency = policy;
            }
            if let Some(step) = step {
                config.extract.grid_step = step;
            }
            let structure = Structure::new(&circles, &config);
            info!("{}", structure.graph);
            print_json(&structure)?;
        }
        Commands::Target { circles, width, height, seed } => {
            let base = match circles {
                Some(arg) => load_circles(&arg, "circles")?,
                None => Layout::for_canvas(width, height)?.into(),
            };
            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
            info!("Target seed: {}", seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let circles = target::generate(&base, &mut rng, &config);
            print_json(&circles)?;
        }
        Commands::Check { current, target, rule } => {
            let current = load_circles(&current, "current circles")?;
            let target = load_circles(&target, "target circles")?;
            let rule = rule.unwrap_or(config.rule);
            let current = Structure::new(&current, &config);
            let target = Structure::new(&target, &config);
            let comparison = current.compare(&target);
            let matched = comparison.is_match(rule);
            info!("current {}, target {}: {}", current.graph, target.graph, if matched { "match" } else { "no match" });
            print_json(&json!({
                "matched": matched,
                "rule": rule,
                "comparison": comparison,
            }))?;
            if !matched {
                process::exit(1);
            }
        }
        Commands::Render { circles, output, width, height, no_regions } => {
            let circles = load_circles(&circles, "circles")?;
            let structure = Structure::new(&circles, &config);
            let render_config = render::RenderConfig {
                width,
                height,
                show_regions: !no_regions,
                ..render::RenderConfig::default()
            };
            let svg = render::render_svg(&circles, &structure.regions, &render_config)?;
            match output {
                Some(path) => {
                    fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => print!("{}", svg),
            }
        }
        Commands::Batch { count, seed, width, height } => {
            let base: Vec<Circle> = Layout::for_canvas(width, height)?.into();
            let summary = batch::run(&base, count, seed, &config);
            print_json(&summary)?;
        }
    }
    Ok(())
}
