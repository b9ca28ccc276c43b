use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use scorecard::config;
use scorecard::session::store::MemoryStore;
use scorecard::{ScorecardError, WeightVector, Workbench};

// cargo install --path cli

#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "score employee performance sheets with adjustable weights")]
struct CLI {
    /// Metrics file (.csv, .xls or .xlsx) to load on startup
    #[arg(long)]
    file: Option<PathBuf>,
}

// CLI struct for the interactive prompt
#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "Available commands:")]
#[command(override_usage = "<COMMAND> <ARGS>")]
struct InteractiveCLI {
    #[command(subcommand)]
    command: InteractiveCommand,
}

#[derive(Subcommand)]
enum InteractiveCommand {
    /// Upload a metrics file and score it with the current weights
    Load {
        /// Path to a .csv, .xls or .xlsx file
        file: PathBuf,
    },
    /// Adjust the weights and recalculate the composite scores
    Weights {
        /// Productivity weight, between 0.0 and 1.0
        #[arg(short, long)]
        productivity: Option<f64>,

        /// Quality weight, between 0.0 and 1.0
        #[arg(short, long)]
        quality: Option<f64>,

        /// Timeliness weight, between 0.0 and 1.0
        #[arg(short, long)]
        timeliness: Option<f64>,

        /// JSON file with the weights, e.g. {"productivity": 0.5}
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Print the scored table
    Show {
        /// Number of rows to display
        #[arg(short, long, default_value = "25")]
        window: u32,
    },
    /// Write the scored table to disk
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output path (defaults to scorecard.csv / scorecard.xlsx)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show the active session token
    Session,
    /// Exit
    Quit,
}

#[derive(ValueEnum, Clone, Copy)]
enum ExportFormat {
    Csv,
    Xlsx,
}

struct AppState {
    workbench: Workbench<MemoryStore>,
    token: Option<String>,
    weights: WeightVector,
}

impl AppState {
    fn init() -> Self {
        AppState {
            workbench: Workbench::new(MemoryStore::new()),
            token: None,
            weights: WeightVector::default(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = CLI::parse();
    let mut state = AppState::init();

    if let Some(file) = cli.file {
        if let Err(e) = load(&mut state, &file, 25) {
            eprintln!("{}", e.to_string().red());
        }
    }

    interact(state);
}

fn interact(mut state: AppState) {
    println!("Scorecard CLI -- type 'help' for the command list");
    loop {
        let prompt = match &state.token {
            // the first few token chars are enough to tell sessions apart
            Some(token) => format!("{}@scorecard> ", &token[..8.min(token.len())]),
            None => "scorecard> ".to_string(),
        };
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }

                match input {
                    "help" => {
                        if let Err(e) = InteractiveCLI::try_parse_from(vec!["scorecard", "--help"]) {
                            println!("{e}")
                        }
                        continue;
                    }
                    "quit" => {
                        break;
                    }
                    _ => {}
                }

                let args: Vec<&str> = input.split_whitespace().collect();
                let mut full_args = vec!["scorecard"];
                full_args.extend(args);
                match InteractiveCLI::try_parse_from(full_args) {
                    Ok(cli) => {
                        if handle(cli.command, &mut state) {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(e) => {
                eprintln!("An error occurred!: {e}");
                break;
            }
        }
    }
}

macro_rules! guarantee_session {
    ($state: expr) => {
        if $state.token.is_none() {
            eprintln!("{}", "Error: load a metrics file first!".red());
            return false;
        }
    };
}

fn handle(cmd: InteractiveCommand, state: &mut AppState) -> bool {
    match cmd {
        InteractiveCommand::Load { file } => {
            if let Err(e) = load(state, &file, 25) {
                eprintln!("{}", e.to_string().red());
            }
            false
        }
        InteractiveCommand::Weights { productivity, quality, timeliness, file } => {
            guarantee_session!(state);

            let weights = match weights_from_args(&state.weights, productivity, quality, timeliness, file) {
                Ok(w) => w,
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    return false;
                }
            };

            let token = state.token.clone().unwrap();
            match state.workbench.recalculate(&token, &weights) {
                Ok(scored) => {
                    state.weights = weights;
                    println!("{}", scored.to_ascii_window(25));
                    print_weights(&weights);
                }
                Err(e) => eprintln!("{}", e.to_string().red()),
            }
            false
        }
        InteractiveCommand::Show { window } => {
            guarantee_session!(state);

            let token = state.token.clone().unwrap();
            match state.workbench.scored(&token) {
                Some(scored) => println!("{}", scored.to_ascii_window(window as usize)),
                None => println!("Nothing scored yet."),
            }
            false
        }
        InteractiveCommand::Export { format, out } => {
            guarantee_session!(state);

            let token = state.token.clone().unwrap();
            let (bytes, default_name) = match format {
                ExportFormat::Csv => (state.workbench.export_csv(&token), config::CSV_EXPORT_NAME),
                ExportFormat::Xlsx => (state.workbench.export_xlsx(&token), config::XLSX_EXPORT_NAME),
            };

            match bytes {
                Ok(Some(bytes)) => {
                    let path = out.unwrap_or_else(|| PathBuf::from(default_name));
                    match fs::write(&path, bytes) {
                        Ok(()) => println!("{}", format!("Wrote {}", path.display()).green()),
                        Err(e) => eprintln!(
                            "{}",
                            ScorecardError::IOFailure(path.display().to_string(), e.to_string())
                                .to_string()
                                .red()
                        ),
                    }
                }
                Ok(None) => println!("Nothing scored yet, nothing exported."),
                Err(e) => eprintln!("{}", e.to_string().red()),
            }
            false
        }
        InteractiveCommand::Session => {
            match &state.token {
                Some(token) => println!("Active session: {token}"),
                None => println!("No active session."),
            }
            false
        }
        InteractiveCommand::Quit => {
            println!("Exiting...");
            true
        }
    }
}

fn load(state: &mut AppState, file: &Path, window: usize) -> Result<(), ScorecardError> {
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    let bytes = fs::read(file)
        .map_err(|e| ScorecardError::IOFailure(file.display().to_string(), e.to_string()))?;

    let token = state.workbench.upload(&bytes, &filename)?;
    let scored = state.workbench.recalculate(&token, &state.weights)?;

    state.token = Some(token.clone());
    println!("{}", scored.to_ascii_window(window));
    print_weights(&state.weights);
    println!("Session: {token}");
    Ok(())
}

fn weights_from_args(
    current: &WeightVector,
    productivity: Option<f64>,
    quality: Option<f64>,
    timeliness: Option<f64>,
    file: Option<PathBuf>,
) -> Result<WeightVector, ScorecardError> {
    let mut weights = match file {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .map_err(|e| ScorecardError::IOFailure(path.display().to_string(), e.to_string()))?;
            WeightVector::from_json(&json)?
        }
        None => *current,
    };

    if let Some(p) = productivity {
        weights.productivity = p;
    }
    if let Some(q) = quality {
        weights.quality = q;
    }
    if let Some(t) = timeliness {
        weights.timeliness = t;
    }

    weights.validate()?;
    Ok(weights)
}

fn print_weights(weights: &WeightVector) {
    println!(
        "Weights: productivity={} quality={} timeliness={}",
        weights.productivity, weights.quality, weights.timeliness
    );
}
