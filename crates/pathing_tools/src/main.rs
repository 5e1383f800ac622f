//! Pathing - Development Tools

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use pathing_tools::ascii::{render_route, AsciiConfig};
use pathing_tools::route::run_route;
use pathing_tools::scenario::RouteScenario;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pathing-tools")]
#[command(about = "Development tools for the RTS pathfinder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a scenario and print the map with its path
    Route {
        /// Path to a scenario RON file
        scenario: PathBuf,
        /// Keep and draw the nodes the search expanded
        #[arg(long)]
        debug: bool,
        /// Use ANSI colors
        #[arg(long)]
        color: bool,
        /// Seconds to wait for the result
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
    /// Check that a scenario file loads and describes a valid terrain
    Validate {
        /// Path to a scenario RON file
        scenario: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Route {
            scenario,
            debug,
            color,
            timeout,
        } => {
            let scenario = load_or_exit(&scenario);
            let terrain = match scenario.terrain() {
                Ok(terrain) => terrain,
                Err(e) => {
                    tracing::error!("Invalid scenario: {e}");
                    std::process::exit(1);
                }
            };
            match run_route(&scenario, debug, Duration::from_secs(timeout)) {
                Ok(report) => {
                    let config = AsciiConfig {
                        use_color: color,
                        ..AsciiConfig::default()
                    };
                    print!(
                        "{}",
                        render_route(
                            &terrain,
                            &report.cells,
                            report.path.visited.as_deref(),
                            &config
                        )
                    );
                    println!(
                        "{}: {} waypoints, cost {}, {} nodes visited",
                        scenario.name,
                        report.path.len(),
                        report.path.cost,
                        report.path.total_visited
                    );
                }
                Err(e) => {
                    tracing::error!("Routing failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { scenario } => {
            tracing::info!("Validating scenario: {}", scenario.display());
            match load_or_exit(&scenario).validate() {
                Ok(()) => tracing::info!("Validation passed"),
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn load_or_exit(path: &Path) -> RouteScenario {
    match RouteScenario::load(path) {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::error!("Failed to load scenario: {e}");
            std::process::exit(1);
        }
    }
}
