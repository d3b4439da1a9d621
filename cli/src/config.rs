use fairdice::FairDiceConfig;
use std::path::Path;

/// Line editor settings
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub prompt: String,
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "Your selection: ".to_string(),
            history_file: Some(".fairdice_history".to_string()),
        }
    }
}

/// Game configuration from `path`, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> fairdice::GameResult<FairDiceConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            FairDiceConfig::from_file(path)
        }
        None => Ok(FairDiceConfig::default()),
    }
}
