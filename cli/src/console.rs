use colored::*;
use fairdice::{DisplayConfig, DisplaySink, GameEvent, Party, ProbabilityTable, SessionPurpose};

use crate::table::render_probability_table;

/// Writes game events to the terminal
pub struct ConsoleDisplay {
    config: DisplayConfig,
}

impl ConsoleDisplay {
    pub fn new(config: DisplayConfig) -> Self {
        colored::control::set_override(config.color);
        Self { config }
    }

    pub fn display_welcome(&self) {
        println!("{}", "Welcome to Fairdice!".bright_blue().bold());
        println!(
            "{}",
            "Every random number is committed before you answer and revealed afterwards.".cyan()
        );
        println!();
    }

    fn describe(&self, event: &GameEvent) -> Option<String> {
        let text = match event {
            GameEvent::GameStarted { game_id, dice } => format!(
                "Game {} with {} dice. Let's determine who makes the first move.",
                game_id.to_string().dimmed(),
                dice.len()
            ),
            GameEvent::CommitmentPublished {
                purpose,
                range,
                digest,
            } => {
                let intro = match purpose {
                    SessionPurpose::FirstMover => "",
                    SessionPurpose::Roll {
                        party: Party::Computer,
                    } => "It's time for my roll.\n",
                    SessionPurpose::Roll { party: Party::User } => "It's time for your roll.\n",
                };
                format!(
                    "{}I selected a random value in the range 0..{} (HMAC={}).",
                    intro,
                    range.saturating_sub(1),
                    digest.to_string().yellow()
                )
            }
            GameEvent::InvalidChoice { value, range } => format!(
                "{}",
                format!("{} is not between 0 and {}", value, range.saturating_sub(1)).red()
            ),
            GameEvent::SecretRevealed(reveal) => {
                let mut text = match reveal.purpose {
                    SessionPurpose::FirstMover => format!("My selection: {}", reveal.secret),
                    SessionPurpose::Roll { .. } => format!("My number is {}", reveal.secret),
                };
                text.push_str(&format!(" (KEY={}).", reveal.key.to_string().yellow()));
                text.push_str(&format!(
                    "\nThe fair number generation result is {} + {} = {} (mod {}).",
                    reveal.secret, reveal.counterpart, reveal.result, reveal.range
                ));
                text
            }
            GameEvent::FirstMover { party } => match party {
                Party::Computer => "I make the first move.".to_string(),
                Party::User => "You make the first move.".to_string(),
            },
            GameEvent::DieSelected { party, die, .. } => match party {
                Party::Computer => format!("I choose the {} dice.", die.to_string().bold()),
                Party::User => format!("You choose the {} dice.", die.to_string().bold()),
            },
            GameEvent::Rolled { party, value, .. } => match party {
                Party::Computer => format!("My roll result is {}.", value.to_string().bold()),
                Party::User => format!("Your roll result is {}.", value.to_string().bold()),
            },
            GameEvent::GameFinished {
                outcome,
                computer_roll,
                user_roll,
            } => match outcome.winner() {
                Some(Party::User) => format!(
                    "{}",
                    format!("You win ({} > {})!", user_roll, computer_roll)
                        .green()
                        .bold()
                ),
                Some(Party::Computer) => format!(
                    "{}",
                    format!("I win ({} > {})!", computer_roll, user_roll)
                        .red()
                        .bold()
                ),
                None => format!("It's a draw ({} = {}).", user_roll, computer_roll),
            },
            GameEvent::GameAborted => return None,
        };
        Some(text)
    }
}

impl DisplaySink for ConsoleDisplay {
    fn emit(&mut self, event: &GameEvent) {
        if let Some(text) = self.describe(event) {
            println!("{}", text);
        }
    }

    fn show_table(&mut self, table: &ProbabilityTable) {
        println!(
            "{}",
            render_probability_table(table, self.config.probability_precision, self.config.color)
        );
    }
}
