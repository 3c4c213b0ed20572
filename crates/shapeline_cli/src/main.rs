//! shapeline CLI
//!
//! Resolves the field set of one or all resources from an already-parsed
//! shape graph document and a generator configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod render;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::bail;
use indexmap::IndexMap;
use render::Outcome;
use shapeline_config::GeneratorConfig;
use shapeline_resolve::Resolver;
use shapeline_shape::{GraphDocument, ShapeGraph};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter
const LOG_ENV: &str = "SHAPELINE_LOG";

#[derive(Parser)]
#[command(name = "shapeline")]
#[command(about = "shapeline - resolve resource fields from API operation shapes", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print the field set
    Resolve {
        /// Shape graph document
        #[arg(short, long)]
        graph: PathBuf,
        /// Generator configuration
        #[arg(short, long)]
        config: PathBuf,
        /// Only this resource
        #[arg(short, long)]
        resource: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Resolve every configured resource and print diagnostics only
    Check {
        /// Shape graph document
        #[arg(short, long)]
        graph: PathBuf,
        /// Generator configuration
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.log_json);

    match cli.command {
        Commands::Resolve {
            graph,
            config,
            resource,
            format,
        } => {
            let (graph, config) = load(&graph, &config)?;
            let outcomes = match resource {
                Some(name) => resolve_one(&graph, &config, &name)?,
                None => Resolver::new(&graph).resolve_all(&config),
            };

            let mut stdout = std::io::stdout().lock();
            match format {
                Format::Text => render::write_text(&mut stdout, &graph, &outcomes)?,
                Format::Json => render::write_json(&mut stdout, &outcomes)?,
            }
            stdout.flush()?;
            finish(&outcomes)
        }
        Commands::Check { graph, config } => {
            let (graph, config) = load(&graph, &config)?;
            let resolver = Resolver::new(&graph);
            let outcomes: IndexMap<String, Outcome> = config
                .resources
                .iter()
                .map(|(name, resource)| (name.clone(), resolver.resolve(name, resource)))
                .collect();

            let mut stdout = std::io::stdout().lock();
            for (name, outcome) in &outcomes {
                match outcome {
                    Ok(resolution) => {
                        writeln!(stdout, "{name}: ok ({} fields)", resolution.fields.len())?;
                        render::write_diagnostics(&mut stdout, &resolution.diagnostics)?;
                    }
                    Err(failure) => {
                        writeln!(stdout, "{name}: failed")?;
                        render::write_diagnostics(&mut stdout, &failure.diagnostics)?;
                    }
                }
            }
            stdout.flush()?;
            finish(&outcomes)
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn load(graph: &Path, config: &Path) -> Result<(ShapeGraph, GeneratorConfig)> {
    let graph = GraphDocument::load(graph)?.into_graph()?;
    let config = GeneratorConfig::load(config)?;
    tracing::info!(
        shapes = graph.shape_count(),
        resources = config.resources.len(),
        "inputs loaded"
    );
    Ok((graph, config))
}

fn resolve_one(graph: &ShapeGraph, config: &GeneratorConfig, name: &str) -> Result<IndexMap<String, Outcome>> {
    if !graph.resources().contains(&name) {
        config.resource(name)?;
    }
    let resource = config.resource_or_default(name);
    let mut outcomes = IndexMap::new();
    outcomes.insert(name.to_string(), Resolver::new(graph).resolve(name, &resource));
    Ok(outcomes)
}

fn finish(outcomes: &IndexMap<String, Outcome>) -> Result<()> {
    let failed = outcomes.values().filter(|o| o.is_err()).count();
    if failed > 0 {
        bail!("{failed} of {} resource(s) failed to resolve", outcomes.len());
    }
    Ok(())
}
