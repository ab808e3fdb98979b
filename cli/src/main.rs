//! campus-nav: terminal front end for the campus route engine.
//!
//! Loads a campus graph (builtin or from a TOML file), validates the
//! requested endpoints and prints the route with its turn instructions.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod config;
mod logging;
mod route;
mod state;
mod status;

use route::{Outcome, OutputFormat};
use state::CampusState;

#[derive(Parser, Debug)]
#[command(name = "campus-nav", version, about = "Find the shortest route between two campus locations")]
struct Cli {
    /// Campus graph TOML file. Defaults to the builtin campus.
    #[arg(long, global = true, env = "CAMPUS_NAV_FILE")]
    campus: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). CAMPUS_NAV_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Route and turn-by-turn directions between two locations
    Route {
        /// Starting location (exact, case-sensitive name)
        from: String,
        /// Destination location
        to: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List all known locations
    Locations,
    /// Show counts and load information for the campus graph
    Status,
}

/// Exit code for no route between valid locations.
const EXIT_NO_PATH: u8 = 1;
/// Exit code for bad user input.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    load(cli.campus)?;

    state::with_campus(|campus| execute(campus, cli.command))
        .context("campus graph not loaded")?
}

fn load(path: Option<PathBuf>) -> anyhow::Result<()> {
    let start = Instant::now();
    let (config, source) = config::load_campus(path.as_deref())
        .with_context(|| format!("loading campus from {}", describe(path.as_deref())))?;
    let name = config.name.clone();
    let graph = config.into_graph().context("building campus graph")?;

    state::set_campus(CampusState {
        graph,
        name,
        source,
        load_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        loaded_at: Instant::now(),
    })
    .map_err(|_| anyhow::anyhow!("campus graph already loaded"))
}

fn describe(path: Option<&std::path::Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin campus".to_string())
}

fn execute(campus: &CampusState, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Route { from, to, format } => match route::run(&campus.graph, &from, &to, format) {
            Ok(Outcome::Found(text)) => {
                println!("{}", text);
                Ok(ExitCode::SUCCESS)
            }
            Ok(Outcome::NoPath) => {
                println!("{}", route::NO_PATH_MESSAGE);
                Ok(ExitCode::from(EXIT_NO_PATH))
            }
            Err(e) if e.is_user_error() => {
                eprintln!("Error: {}", e);
                Ok(ExitCode::from(EXIT_USAGE))
            }
            Err(e) => Err(e).context("route query failed"),
        },
        Command::Locations => {
            println!("{}", status::render_locations(campus));
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => {
            println!("{}", status::render(campus));
            Ok(ExitCode::SUCCESS)
        }
    }
}
