//! Fairdice - a non-transitive dice game with provably fair randomness
//!
//! Every random decision that affects the outcome (who moves first, which
//! face a die shows) is produced by a commit-reveal round:
//! - the computer commits to a secret with an HMAC-SHA3-256 digest
//! - the user contributes a number without knowing the secret
//! - the result is `(secret + contribution) mod range`
//! - the secret and one-time key are revealed so the digest can be checked

pub mod config;
pub mod dice;
pub mod error;
pub mod events;
pub mod game;
pub mod protocol;

// Re-export commonly used types for convenience
pub use error::{CryptoError, FairDiceError, GameResult};

pub use config::{DisplayConfig, FairDiceConfig, GameConfig, InputConfig};

pub use dice::{
    parse_dice, tie_fraction, win_probability, DicePool, Die, DieId, ProbabilityTable,
    WinProbability, DICE_EXAMPLE,
};

pub use protocol::{
    verify_commitment, Commitment, CommitmentDigest, CommitmentGenerator, CommitmentKey,
    FairRandomSession, Reveal, SecureCommitmentGenerator, SessionOutcome, SessionPurpose,
    SessionState,
};

pub use events::{GameEvent, RecordingSink, Transcript};

pub use game::{
    Choice, DisplaySink, GameEnd, GameReport, InputCollector, InputEvent, Outcome, Party, Prompt,
    Roll, TurnMachine, TurnState,
};
