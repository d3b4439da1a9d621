use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use fairdice::error::logging;
use fairdice::{FairDiceError, DICE_EXAMPLE};
use std::path::PathBuf;
use std::process::ExitCode;

mod app;
mod config;
mod console;
mod repl;
mod table;

use app::GameApp;

#[derive(Parser)]
#[command(name = "fairdice")]
#[command(about = "A non-transitive dice game with provably fair rolls")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,

    /// Log level (overrides FAIRDICE_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<tracing::Level>,
}

#[derive(Args)]
struct PlayArgs {
    /// Dice as comma-separated faces, e.g. 2,2,4,4,9,9 (use `--` before a die starting with a negative face)
    dice: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON transcript of the game for later verification
    #[arg(short, long)]
    transcript: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the win probability table and exit
    Table {
        /// Dice as comma-separated faces
        dice: Vec<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Check a revealed key and secret against a published HMAC
    Verify {
        /// HMAC shown before your answer
        #[arg(long, required_unless_present = "transcript", requires_all = ["key", "secret"])]
        digest: Option<String>,
        /// KEY revealed after your answer
        #[arg(long)]
        key: Option<String>,
        /// Number revealed after your answer
        #[arg(long)]
        secret: Option<u64>,
        /// Audit every session of a saved transcript instead
        #[arg(long, conflicts_with = "digest")]
        transcript: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let mut log_config = logging::config_from_env();
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    if let Err(e) = logging::init_logging(log_config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match cli.command {
        Some(Command::Table { dice, config }) => {
            let result = config::load_config(config.as_deref())
                .and_then(|config| app::print_table(&config, &dice));
            Ok(report_startup(result))
        }
        Some(Command::Verify {
            digest,
            key,
            secret,
            transcript,
        }) => match (transcript, digest, key, secret) {
            (Some(path), ..) => match app::verify_transcript(&path) {
                Ok(count) => {
                    println!("{}", format!("All {} sessions verified.", count).green());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    println!("{}", format!("Verification failed: {}", e).red());
                    Ok(ExitCode::FAILURE)
                }
            },
            (None, Some(digest), Some(key), Some(secret)) => {
                if app::verify(&digest, &key, secret)? {
                    println!("{}", "The HMAC matches: the number was fixed in advance.".green());
                    Ok(ExitCode::SUCCESS)
                } else {
                    println!("{}", "The HMAC does NOT match the revealed key and number.".red());
                    Ok(ExitCode::FAILURE)
                }
            }
            _ => anyhow::bail!("pass --digest, --key and --secret, or --transcript"),
        },
        None => {
            let PlayArgs {
                dice,
                config,
                transcript,
            } = cli.play;

            let app = config::load_config(config.as_deref())
                .and_then(|config| GameApp::new(config, &dice, transcript));
            let mut app = match app {
                Ok(app) => app,
                Err(e) => return Ok(report_startup(Err(e))),
            };

            app.run()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Configuration problems end the process with a corrective example
fn report_startup(result: Result<(), FairDiceError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            if e.is_configuration() {
                eprintln!("Pass three or more dice with the same number of faces, for example:");
                eprintln!("  {}", DICE_EXAMPLE.cyan());
            }
            ExitCode::from(1)
        }
    }
}
