use anyhow::Result;
use colored::*;
use fairdice::{FairDiceError, GameResult, InputCollector, InputConfig, InputEvent, Prompt};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use crate::config::ReplConfig;

/// Reads the user's contributions and choices from the terminal
pub struct ReplInput {
    editor: DefaultEditor,
    config: ReplConfig,
    keywords: InputConfig,
}

impl ReplInput {
    pub fn new(config: ReplConfig, keywords: InputConfig) -> Result<Self> {
        let editor_config = Config::builder().auto_add_history(true).build();
        let mut editor = DefaultEditor::with_config(editor_config)?;

        // Load history if configured
        if let Some(history_file) = &config.history_file {
            let _ = editor.load_history(history_file);
        }

        Ok(Self {
            editor,
            config,
            keywords,
        })
    }

    /// Save history if configured
    pub fn save_history(&mut self) {
        if let Some(history_file) = &self.config.history_file {
            if let Err(e) = self.editor.save_history(history_file) {
                tracing::debug!("Could not save history to {}: {}", history_file, e);
            }
        }
    }

    fn display_menu(&self, prompt: &Prompt) {
        println!("{}", prompt.message.bold());
        for choice in &prompt.choices {
            println!("{} - {}", choice.value.to_string().cyan(), choice.label);
        }
        println!("{} - exit", self.keywords.exit_keyword.cyan());
        println!("{} - help", self.keywords.help_keyword.cyan());
    }
}

impl InputCollector for ReplInput {
    fn request_integer(&mut self, prompt: &Prompt) -> GameResult<InputEvent> {
        self.display_menu(prompt);

        loop {
            match self.editor.readline(&self.config.prompt) {
                Ok(line) => match parse_answer(&line, prompt.range(), &self.keywords) {
                    Ok(event) => return Ok(event),
                    Err(message) => eprintln!("{}", message.red()),
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    return Ok(InputEvent::Exit)
                }
                Err(e) => {
                    return Err(FairDiceError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        e.to_string(),
                    )))
                }
            }
        }
    }
}

/// Interpret one line of input against a menu of `range` choices
pub fn parse_answer(
    line: &str,
    range: u64,
    keywords: &InputConfig,
) -> std::result::Result<InputEvent, String> {
    let answer = line.trim();

    if answer.is_empty() {
        return Err("Please enter a choice".to_string());
    }
    if answer.eq_ignore_ascii_case(keywords.exit_keyword.trim()) {
        return Ok(InputEvent::Exit);
    }
    if answer.eq_ignore_ascii_case(keywords.help_keyword.trim()) {
        return Ok(InputEvent::Help);
    }

    match answer.parse::<u64>() {
        Ok(value) if value < range => Ok(InputEvent::Value(value)),
        Ok(_) => Err(format!(
            "Choose a number between 0 and {}",
            range.saturating_sub(1)
        )),
        Err(_) => Err(format!(
            "'{}' is not a valid choice. Type {} for help or {} to exit",
            answer, keywords.help_keyword, keywords.exit_keyword
        )),
    }
}
