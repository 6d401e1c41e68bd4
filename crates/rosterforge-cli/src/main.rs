//! RosterForge command line driver
//!
//! Reads a problem as JSON, starts a solver worker and ticks it round by
//! round until it finishes. Ctrl-C cancels the run; the best schedule found
//! so far is still printed.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use rosterforge::{
    console, decode_request, encode_response, spawn_solver, IterationInfo, ProblemInput, Request,
    Response, Schedule, SolverConfig,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "rosterforge")]
#[command(about = "Solve a rotation schedule round by round")]
struct Args {
    /// Problem file: a `start` message or a bare problem input
    input: PathBuf,

    /// Solver configuration (TOML or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many rounds
    #[arg(long)]
    max_rounds: Option<u64>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print every progress response as a JSON line
    #[arg(long)]
    progress: bool,

    /// Pretty-print the final response
    #[arg(long)]
    pretty: bool,

    /// Colored run summary on stdout instead of plain logs on stderr
    #[arg(long)]
    console: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args);

    let config = load_config(&args)?;
    let input = read_input(&args.input)?;
    info!(
        event = "input_loaded",
        path = %args.input.display(),
        days = input.day_count(),
        resources = input.resources.len(),
    );

    let mut client = spawn_solver(&config)?;
    client.start(input)?;

    let last = loop {
        let response = tokio::select! {
            response = client.next_response() => response?,
            _ = tokio::signal::ctrl_c() => {
                warn!(event = "interrupted");
                client.cancel()?;
                continue;
            }
        };
        if args.progress && !response.is_finished() {
            println!("{}", encode_response(&response)?);
        }
        if response.is_finished() {
            break response;
        }
        client.tick()?;
    };
    client.shutdown()?;

    print_final(&last, args.pretty)?;
    match last.error() {
        Some(error) => Err(format!("solver failed: {}", error.message).into()),
        None => Ok(()),
    }
}

fn init_logging(args: &Args) {
    use tracing_subscriber::{fmt, EnvFilter};

    if args.console {
        console::init();
        return;
    }

    let default = if args.verbose {
        "rosterforge=debug"
    } else {
        "rosterforge=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn load_config(args: &Args) -> Result<SolverConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    if let Some(rounds) = args.max_rounds {
        config = config.with_round_count_limit(rounds);
    }
    if let Some(seed) = args.seed {
        config = config.with_random_seed(seed);
    }
    Ok(config)
}

fn read_input(path: &Path) -> Result<ProblemInput, Box<dyn Error>> {
    let json = std::fs::read_to_string(path)?;
    parse_input(&json)
}

/// Accepts either `{"eventType": "start", ...}` or the bare problem fields.
fn parse_input(json: &str) -> Result<ProblemInput, Box<dyn Error>> {
    match decode_request(json) {
        Ok(Request::Start(input)) => Ok(input),
        Ok(other) => Err(format!("expected a start message, got {}", other.name()).into()),
        Err(_) => Ok(serde_json::from_str(json)?),
    }
}

fn print_final(
    response: &Response<Schedule, IterationInfo>,
    pretty: bool,
) -> Result<(), Box<dyn Error>> {
    let output = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        encode_response(response)?
    };
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rosterforge_test::{start_message, week_input};

    use super::*;

    #[test]
    fn parses_start_message() {
        let json = start_message(&week_input()).to_string();
        assert_eq!(parse_input(&json).unwrap(), week_input());
    }

    #[test]
    fn parses_bare_problem() {
        let json = r#"{
            "startDate": "2024-01-01",
            "endDate": "2024-01-03",
            "resources": [{"id": 1}, {"id": 2, "unavailability": ["2024-01-02"]}]
        }"#;
        let input = parse_input(json).unwrap();

        assert_eq!(input.day_count(), 3);
        assert_eq!(input.resources[1].unavailability.len(), 1);
    }

    #[test]
    fn rejects_other_requests() {
        assert!(parse_input(r#"{"eventType": "tick"}"#).is_err());
    }

    #[test]
    fn command_line_overrides_config() {
        let args = Args::parse_from([
            "rosterforge",
            "problem.json",
            "--max-rounds",
            "7",
            "--seed",
            "9",
        ]);
        let config = load_config(&args).unwrap();

        assert_eq!(
            config.termination.and_then(|t| t.round_count_limit),
            Some(7)
        );
        assert_eq!(config.random_seed, Some(9));
    }
}
