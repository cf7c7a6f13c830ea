mod animate;
mod menu;
mod table;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use pagelib::config::{check_frames, PolicyKind, ReferenceConfig, SimulationConfig, MAX_PAGE};
use pagelib::Page;
use pagelib::engine::StepRecord;
use pagelib::error::ConfigError;
use pagelib::reference::{parse_reference_string, resolve};
use pagelib::simulator::Simulator;
use pagelib::summary::{Comparison, SimulationSummary};
use crate::menu::Menu;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

const DEFAULT_FRAMES: usize = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum OutputMode {
    Table,
    Json,
    Animate,
}

#[derive(Parser, Debug)]
#[command(about = String::from("Page replacement simulator for FIFO, LRU and Optimal"))]
struct Args {
    /// JSON configuration file, flags given on the command line take precedence
    config: Option<PathBuf>,

    /// Policies to run, all three if omitted
    #[arg(short = 'a', long = "policy", value_enum, value_delimiter = ',')]
    policies: Vec<PolicyKind>,

    #[arg(short, long)]
    frames: Option<usize>,

    /// Reference string, e.g. "7 0 1 2 0 3"
    #[arg(long, conflicts_with_all = ["trace", "random"])]
    pages: Option<String>,

    /// File containing the reference string
    #[arg(short, long, conflicts_with = "random")]
    trace: Option<PathBuf>,

    /// Generate a random reference string of this length
    #[arg(short, long)]
    random: Option<usize>,

    /// Seed for --random, for reproducible runs
    #[arg(short, long, requires = "random")]
    seed: Option<u64>,

    #[arg(short, long)]
    max_page: Option<Page>,

    #[arg(short, long, value_enum, default_value_t = OutputMode::Table)]
    output: OutputMode,

    /// Milliseconds between steps when animating
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Run the interactive menu instead
    #[arg(short, long)]
    interactive: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

/// One policy's run, as written by --output json
#[derive(Serialize)]
struct RunReport<'a> {
    summary: SimulationSummary,
    steps: &'a [StepRecord],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    references: &'a [Page],
    runs: Vec<RunReport<'a>>,
    comparison: Comparison,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    let delay = Duration::from_millis(args.delay_ms);

    if args.interactive {
        let stdin = io::stdin();
        return Menu::new(stdin.lock(), io::stdout(), rand::rng(), Some(delay))
            .run()
            .map_err(|e| format!("Terminal error: {e}"));
    }

    let config = load_config(&args)?;
    // Diagnostics go to stderr so --output json stays parseable
    if args.debug {
        #[cfg(debug_assertions)]
        eprintln!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        eprintln!("Parsed input configuration: {config:?}");
    }
    config.validate().map_err(|e| e.to_string())?;
    let references = resolve(&config.reference, config.max_page).map_err(|e| e.to_string())?;
    if args.debug {
        eprintln!("Reference string ({} pages): {references:?}", references.len());
    }

    let mut simulators: Vec<Simulator<'_>> = config
        .policies
        .iter()
        .map(|&policy| Simulator::new(policy, &references, config.frames))
        .collect();

    match args.output {
        OutputMode::Table => {
            for simulator in &mut simulators {
                let summary = simulator.run_to_end();
                println!("{}", table::full_table(simulator.policy(), config.frames, simulator.records(), &summary));
            }
        }
        OutputMode::Animate => {
            let mut quit = false;
            for simulator in &mut simulators {
                // Quitting one run skips the rest
                if quit {
                    simulator.abort();
                    continue;
                }
                quit = animate::run(simulator, delay).map_err(|e| format!("Terminal error: {e}"))?.aborted;
            }
        }
        OutputMode::Json => {
            let summaries: Vec<SimulationSummary> = simulators.iter_mut().map(|s| s.run_to_end()).collect();
            let report = JsonReport {
                references: &references,
                runs: simulators
                    .iter()
                    .zip(summaries.iter().cloned())
                    .map(|(simulator, summary)| RunReport { summary, steps: simulator.records() })
                    .collect(),
                comparison: Comparison { summaries },
            };
            println!("{}", serde_json::to_string_pretty(&report).map_err(|e| format!("Couldn't serialise the output {e}"))?);
        }
    }

    if simulators.len() > 1 && args.output != OutputMode::Json {
        let comparison = Comparison {
            summaries: simulators.iter().map(Simulator::summary).collect(),
        };
        print!("{}", table::comparison(&comparison));
    }

    if args.performance {
        let end = Instant::now();
        let simulation_time: Duration = simulators.iter().map(|s| *s.get_execution_time()).sum();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9);
    }
    Ok(())
}

/// Builds the run configuration from the optional config file, then applies command line overrides
fn load_config(args: &Args) -> Result<SimulationConfig, String> {
    let reference = command_line_reference(args)?;
    let mut config = match &args.config {
        Some(path) => {
            let config_file = File::open(path).map_err(|e| format!("Couldn't open the config file at path {}: {e}", path.display()))?;
            let mut config: SimulationConfig = serde_json::from_reader(BufReader::new(config_file))
                .map_err(|e| format!("Couldn't parse the config file: {e}"))?;
            config.reference = relative_to_config(path, config.reference);
            config
        }
        None => SimulationConfig {
            frames: DEFAULT_FRAMES,
            policies: PolicyKind::all(),
            max_page: MAX_PAGE,
            reference: reference.clone().ok_or_else(|| ConfigError::MissingReference.to_string())?,
        },
    };
    if let Some(max_page) = args.max_page {
        config.max_page = max_page;
    }
    if let Some(frames) = args.frames {
        config.frames = check_frames(frames).map_err(|e| e.to_string())?;
    }
    if !args.policies.is_empty() {
        config.policies = args.policies.clone();
    }
    if let Some(reference) = reference {
        config.reference = reference;
    }
    Ok(config)
}

/// Trace paths in a config file are relative to the file, not to the working directory
fn relative_to_config(config_path: &Path, reference: ReferenceConfig) -> ReferenceConfig {
    match reference {
        ReferenceConfig::Trace(trace) if trace.is_relative() => {
            let base = config_path.parent().unwrap_or_else(|| Path::new(""));
            ReferenceConfig::Trace(base.join(trace))
        }
        other => other,
    }
}

/// The reference string given on the command line, if any
///
/// Page bounds are checked later against the final configuration
fn command_line_reference(args: &Args) -> Result<Option<ReferenceConfig>, String> {
    if let Some(text) = &args.pages {
        let pages = parse_reference_string(text, Page::MAX).map_err(|e| e.to_string())?;
        return Ok(Some(ReferenceConfig::Pages(pages)));
    }
    if let Some(path) = &args.trace {
        return Ok(Some(ReferenceConfig::Trace(path.clone())));
    }
    if let Some(count) = args.random {
        return Ok(Some(ReferenceConfig::Random { count, seed: args.seed }));
    }
    Ok(None)
}
