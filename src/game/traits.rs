//! Boundary traits between the game core and its front-ends

use crate::dice::ProbabilityTable;
use crate::error::GameResult;
use crate::events::GameEvent;

/// One selectable menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: u64,
    pub label: String,
}

/// Request for an integer in `[0, choices.len())`
#[derive(Debug, Clone)]
pub struct Prompt {
    pub message: String,
    pub choices: Vec<Choice>,
}

impl Prompt {
    /// Prompt whose choices are the integers `0..range`
    pub fn numeric(message: &str, range: u64) -> Self {
        Self {
            message: message.to_string(),
            choices: (0..range)
                .map(|value| Choice {
                    value,
                    label: value.to_string(),
                })
                .collect(),
        }
    }

    /// Prompt over labelled options, numbered from zero
    pub fn labelled<I, S>(message: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.to_string(),
            choices: labels
                .into_iter()
                .enumerate()
                .map(|(i, label)| Choice {
                    value: i as u64,
                    label: label.into(),
                })
                .collect(),
        }
    }

    pub fn range(&self) -> u64 {
        self.choices.len() as u64
    }
}

/// What the counterpart answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Value(u64),
    /// Abandon the whole game
    Exit,
    /// Show the probability table and ask again
    Help,
}

/// Source of counterpart input.
///
/// Implementations re-prompt on malformed text themselves; a returned
/// `Value` may still be out of range and is checked by the caller.
pub trait InputCollector {
    fn request_integer(&mut self, prompt: &Prompt) -> GameResult<InputEvent>;
}

/// Sink for everything the core publishes
pub trait DisplaySink {
    fn emit(&mut self, event: &GameEvent);

    /// Help output; not part of the game record
    fn show_table(&mut self, table: &ProbabilityTable);
}
