use anyhow::{Context, Result};
use colored::*;
use fairdice::{
    parse_dice, CommitmentDigest, CommitmentKey, Die, FairDiceConfig, GameEnd, RecordingSink,
    Transcript, TurnMachine,
};
use std::path::{Path, PathBuf};

use crate::config::ReplConfig;
use crate::console::ConsoleDisplay;
use crate::repl::ReplInput;
use crate::table::render_probability_table;

/// One interactive game against the computer
pub struct GameApp {
    config: FairDiceConfig,
    dice: Vec<Die>,
    transcript_path: Option<PathBuf>,
}

impl GameApp {
    /// Dice are validated here, before any commitment is made
    pub fn new(
        config: FairDiceConfig,
        dice_args: &[String],
        transcript_path: Option<PathBuf>,
    ) -> fairdice::GameResult<Self> {
        let dice = parse_dice(dice_args, &config.game)?;
        tracing::debug!(dice = dice.len(), "Dice configuration accepted");

        Ok(Self {
            config,
            dice,
            transcript_path,
        })
    }

    pub fn run(&mut self) -> Result<GameEnd> {
        let mut machine = TurnMachine::new(self.dice.clone())?;
        let mut input = ReplInput::new(ReplConfig::default(), self.config.input.clone())?;

        let console = ConsoleDisplay::new(self.config.display.clone());
        console.display_welcome();
        let mut display = RecordingSink::new(console);

        let end = machine.run(&mut input, &mut display);
        input.save_history();
        let end = end?;

        if let Some(path) = &self.transcript_path {
            display
                .transcript()
                .save(path)
                .with_context(|| format!("writing transcript to {}", path.display()))?;
            println!("{}", format!("Transcript written to {}", path.display()).dimmed());
        }

        if end == GameEnd::Aborted {
            println!("Goodbye!");
        }
        Ok(end)
    }
}

/// Print the probability table for a dice configuration
pub fn print_table(config: &FairDiceConfig, dice_args: &[String]) -> fairdice::GameResult<()> {
    colored::control::set_override(config.display.color);
    let dice = parse_dice(dice_args, &config.game)?;
    let table = fairdice::ProbabilityTable::build(&dice);
    println!(
        "{}",
        render_probability_table(&table, config.display.probability_precision, config.display.color)
    );
    Ok(())
}

/// Check a revealed key and secret against a published digest
pub fn verify(digest: &str, key: &str, secret: u64) -> fairdice::GameResult<bool> {
    let digest = CommitmentDigest::from_hex(digest)?;
    let key = CommitmentKey::from_hex(key)?;
    Ok(fairdice::verify_commitment(&digest, &key, secret))
}

/// Audit a saved transcript, returning the number of sessions checked
pub fn verify_transcript(path: &Path) -> fairdice::GameResult<usize> {
    Transcript::load(path)?.check()
}
