//! Error types for the fair dice game

use thiserror::Error;

/// Main error type for the fair dice game
#[derive(Debug, Error)]
pub enum FairDiceError {
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: String,
    },

    #[error("Invalid dice configuration: {message}")]
    InvalidDice {
        message: String,
        die_index: Option<usize>,
    },

    #[error("Cryptographic error: {source}")]
    Cryptographic {
        source: CryptoError,
        context: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Hex decoding error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cryptographic error types
#[derive(Debug, Clone, Error)]
pub enum CryptoError {
    #[error("Secure randomness unavailable: {message}")]
    RandomnessUnavailable { message: String },

    #[error("Invalid key: {message}")]
    InvalidKey { message: String },

    #[error("Invalid range: {range}")]
    InvalidRange { range: u64 },

    #[error("Commitment verification failed: {message}")]
    CommitmentVerificationFailed { message: String },
}

impl FairDiceError {
    /// Wrap a crypto error with the operation it interrupted
    pub fn crypto(source: CryptoError, context: &str) -> Self {
        FairDiceError::Cryptographic {
            source,
            context: context.to_string(),
        }
    }

    /// Errors a front-end should report as a bad startup configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FairDiceError::Configuration { .. } | FairDiceError::InvalidDice { .. }
        )
    }
}

impl From<CryptoError> for FairDiceError {
    fn from(err: CryptoError) -> Self {
        FairDiceError::Cryptographic {
            source: err,
            context: String::new(),
        }
    }
}

impl From<serde_json::Error> for FairDiceError {
    fn from(err: serde_json::Error) -> Self {
        FairDiceError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Type alias for the main result type used throughout the library
pub type GameResult<T> = Result<T, FairDiceError>;

/// Hex helpers shared by the protocol and the front-ends
pub mod utils {
    /// Convert bytes to an uppercase hexadecimal string
    pub fn to_hex(bytes: &[u8]) -> String {
        hex::encode_upper(bytes)
    }

    /// Decode a 32-byte value from hex, accepting either case
    pub fn from_hex_32(hex_str: &str) -> Result<[u8; 32], hex::FromHexError> {
        let mut out = [0u8; 32];
        hex::decode_to_slice(hex_str.trim(), &mut out)?;
        Ok(out)
    }
}

/// Logging configuration and initialization
pub mod logging {
    use std::env;
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    /// Logging output format
    #[derive(Debug, Clone)]
    pub enum LogFormat {
        Human,
        Json,
    }

    /// Logging output destination
    #[derive(Debug, Clone)]
    pub enum LogOutput {
        Stdout,
        Stderr,
    }

    /// Logging configuration
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        pub level: Level,
        pub format: LogFormat,
        pub output: LogOutput,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            // Interactive play shares the terminal with the log output.
            Self {
                level: Level::WARN,
                format: LogFormat::Human,
                output: LogOutput::Stderr,
            }
        }
    }

    /// Initialize structured logging with the given configuration
    pub fn init_logging(
        config: LoggingConfig,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::builder()
            .with_default_directive(config.level.into())
            .from_env_lossy();

        let registry = tracing_subscriber::registry().with(env_filter);

        match config.format {
            LogFormat::Human => {
                let fmt_layer = fmt::layer().with_target(true).with_line_number(true);

                match config.output {
                    LogOutput::Stdout => registry
                        .with(fmt_layer.with_writer(std::io::stdout))
                        .try_init()?,
                    LogOutput::Stderr => registry
                        .with(fmt_layer.with_writer(std::io::stderr))
                        .try_init()?,
                }
            }
            LogFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE);

                match config.output {
                    LogOutput::Stdout => registry
                        .with(fmt_layer.with_writer(std::io::stdout))
                        .try_init()?,
                    LogOutput::Stderr => registry
                        .with(fmt_layer.with_writer(std::io::stderr))
                        .try_init()?,
                }
            }
        }

        Ok(())
    }

    /// Build a logging configuration from `FAIRDICE_LOG_*` variables
    pub fn config_from_env() -> LoggingConfig {
        let defaults = LoggingConfig::default();

        let level = env::var("FAIRDICE_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse::<Level>().ok())
            .unwrap_or(defaults.level);

        let format = match env::var("FAIRDICE_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };

        let output = match env::var("FAIRDICE_LOG_OUTPUT").as_deref() {
            Ok("stdout") => LogOutput::Stdout,
            _ => LogOutput::Stderr,
        };

        LoggingConfig {
            level,
            format,
            output,
        }
    }
}
