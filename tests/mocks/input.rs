//! Counterpart input replayed from a script

use fairdice::{FairDiceError, GameResult, InputCollector, InputEvent, Prompt};
use std::collections::VecDeque;

/// Replays answers and remembers every prompt it was shown
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<InputEvent>,
    pub prompts: Vec<Prompt>,
}

impl ScriptedInput {
    pub fn new(answers: &[InputEvent]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            prompts: Vec::new(),
        }
    }

    /// Shorthand for a script of plain numbers
    pub fn values(values: &[u64]) -> Self {
        Self::new(&values.iter().map(|v| InputEvent::Value(*v)).collect::<Vec<_>>())
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl InputCollector for ScriptedInput {
    fn request_integer(&mut self, prompt: &Prompt) -> GameResult<InputEvent> {
        self.prompts.push(prompt.clone());
        self.answers
            .pop_front()
            .ok_or_else(|| FairDiceError::InvalidState("Input script exhausted".to_string()))
    }
}
