//! Events the game core publishes to its display sink

pub mod transcript;

pub use transcript::{RecordingSink, Transcript, TranscriptEntry};

use crate::dice::{Die, DieId};
use crate::game::{Outcome, Party};
use crate::protocol::{CommitmentDigest, Reveal, SessionPurpose};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a verifier needs to audit a game, in publication order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        game_id: Uuid,
        dice: Vec<Die>,
    },
    /// Digest shown before the counterpart contributes
    CommitmentPublished {
        purpose: SessionPurpose,
        range: u64,
        digest: CommitmentDigest,
    },
    /// Counterpart answered outside the offered range
    InvalidChoice {
        value: u64,
        range: u64,
    },
    SecretRevealed(Reveal),
    FirstMover {
        party: Party,
    },
    DieSelected {
        party: Party,
        die_id: DieId,
        die: Die,
    },
    Rolled {
        party: Party,
        face_index: u64,
        value: i64,
    },
    GameFinished {
        outcome: Outcome,
        computer_roll: i64,
        user_roll: i64,
    },
    GameAborted,
}
