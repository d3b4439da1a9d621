//! Configuration management for the fair dice game

use crate::error::FairDiceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fewest dice a game can be played with: both parties pick one and the
/// choice must still mean something for the second mover.
pub const MIN_DICE: usize = 3;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FairDiceConfig {
    /// Game rules
    pub game: GameConfig,
    /// Keywords recognised by input collectors
    pub input: InputConfig,
    /// Presentation settings
    pub display: DisplayConfig,
}

/// Game-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Minimum number of dice on the command line
    pub min_dice: usize,
    /// Maximum number of faces per die
    pub max_faces: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_dice: MIN_DICE,
            max_faces: 1000,
        }
    }
}

/// Input keywords
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Abandons the whole game
    pub exit_keyword: String,
    /// Shows the probability table without consuming a turn
    pub help_keyword: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            exit_keyword: "X".to_string(),
            help_keyword: "?".to_string(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places in the probability table
    pub probability_precision: usize,
    /// Colored terminal output
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            probability_precision: 4,
            color: true,
        }
    }
}

impl FairDiceConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FairDiceError> {
        let content =
            fs::read_to_string(path).map_err(|e| FairDiceError::Configuration {
                message: format!("Failed to read config file: {}", e),
                field: "config_file".to_string(),
            })?;

        let config: FairDiceConfig =
            toml::from_str(&content).map_err(|e| FairDiceError::Configuration {
                message: format!("Failed to parse config file: {}", e),
                field: "config_format".to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FairDiceError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| FairDiceError::Configuration {
                message: format!("Failed to serialize config: {}", e),
                field: "config_serialization".to_string(),
            })?;

        fs::write(path, content).map_err(|e| FairDiceError::Configuration {
            message: format!("Failed to write config file: {}", e),
            field: "config_write".to_string(),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), FairDiceError> {
        if self.game.min_dice < MIN_DICE {
            return Err(FairDiceError::Configuration {
                message: format!("At least {} dice are required", MIN_DICE),
                field: "game.min_dice".to_string(),
            });
        }

        if self.game.max_faces == 0 {
            return Err(FairDiceError::Configuration {
                message: "Max faces must be greater than 0".to_string(),
                field: "game.max_faces".to_string(),
            });
        }

        let exit = self.input.exit_keyword.trim();
        let help = self.input.help_keyword.trim();

        for (field, keyword) in [("input.exit_keyword", exit), ("input.help_keyword", help)] {
            if keyword.is_empty() {
                return Err(FairDiceError::Configuration {
                    message: "Keyword must not be empty".to_string(),
                    field: field.to_string(),
                });
            }
            // A numeric keyword would shadow a menu choice.
            if keyword.parse::<i64>().is_ok() {
                return Err(FairDiceError::Configuration {
                    message: format!("Keyword '{}' must not be a number", keyword),
                    field: field.to_string(),
                });
            }
        }

        if exit.eq_ignore_ascii_case(help) {
            return Err(FairDiceError::Configuration {
                message: "Exit and help keywords must differ".to_string(),
                field: "input".to_string(),
            });
        }

        if !(1..=8).contains(&self.display.probability_precision) {
            return Err(FairDiceError::Configuration {
                message: "Probability precision must be between 1 and 8".to_string(),
                field: "display.probability_precision".to_string(),
            });
        }

        Ok(())
    }
}
