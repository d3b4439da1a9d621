//! Serialisable record of one play-through

use super::GameEvent;
use crate::dice::ProbabilityTable;
use crate::error::{CryptoError, FairDiceError, GameResult};
use crate::game::traits::DisplaySink;
use crate::protocol::{CommitmentDigest, Reveal, SessionPurpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// One timestamped event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub at: DateTime<Utc>,
    pub event: GameEvent,
}

/// Game record suitable for offline verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub game_id: Option<Uuid>,
    pub started_at: DateTime<Utc>,
    pub entries: Vec<TranscriptEntry>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            game_id: None,
            started_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, event: &GameEvent) {
        if let GameEvent::GameStarted { game_id, .. } = event {
            self.game_id = Some(*game_id);
        }
        self.entries.push(TranscriptEntry {
            at: Utc::now(),
            event: event.clone(),
        });
    }

    /// Every revealed session, in order
    pub fn reveals(&self) -> impl Iterator<Item = &Reveal> {
        self.entries.iter().filter_map(|entry| match &entry.event {
            GameEvent::SecretRevealed(reveal) => Some(reveal),
            _ => None,
        })
    }

    /// True when every revealed key and secret reproduce their digest
    pub fn verify_all(&self) -> bool {
        self.reveals().all(Reveal::verify)
    }

    /// Audit every session against what was shown before the counterpart
    /// answered. Each reveal must follow an unrevealed publication of the
    /// same purpose carrying the same digest and range, reproduce that
    /// digest from its key and secret, and report
    /// `(secret + counterpart) mod range`. A finished game may not leave a
    /// publication unrevealed. Returns how many sessions were checked.
    pub fn check(&self) -> GameResult<usize> {
        let mut pending: Vec<(SessionPurpose, u64, CommitmentDigest)> = Vec::new();
        let mut checked = 0;

        for entry in &self.entries {
            match &entry.event {
                GameEvent::CommitmentPublished {
                    purpose,
                    range,
                    digest,
                } => pending.push((*purpose, *range, *digest)),
                GameEvent::SecretRevealed(reveal) => {
                    checked += 1;
                    let position = pending
                        .iter()
                        .rposition(|(purpose, _, _)| *purpose == reveal.purpose)
                        .ok_or_else(|| {
                            verification_failed(format!(
                                "session {} was revealed without a prior commitment",
                                checked
                            ))
                        })?;
                    let (_, range, digest) = pending.remove(position);
                    check_reveal(checked, reveal, range, &digest)?;
                }
                GameEvent::GameFinished { .. } if !pending.is_empty() => {
                    return Err(verification_failed(format!(
                        "{} published commitment(s) were never revealed",
                        pending.len()
                    )));
                }
                _ => {}
            }
        }

        Ok(checked)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn check_reveal(
    session: usize,
    reveal: &Reveal,
    published_range: u64,
    published_digest: &CommitmentDigest,
) -> GameResult<()> {
    if reveal.digest != *published_digest || reveal.range != published_range {
        return Err(verification_failed(format!(
            "session {} reveals digest {} over 0..{} but {} over 0..{} was published",
            session, reveal.digest, reveal.range, published_digest, published_range
        )));
    }
    if !reveal.verify() {
        return Err(verification_failed(format!(
            "session {} digest {} does not match the revealed key and secret",
            session, reveal.digest
        )));
    }
    if reveal.range == 0 {
        return Err(verification_failed(format!(
            "session {} has an empty range",
            session
        )));
    }
    let expected = (reveal.secret as u128 + reveal.counterpart as u128) % reveal.range as u128;
    if reveal.result as u128 != expected {
        return Err(verification_failed(format!(
            "session {} reports result {} but {} + {} mod {} = {}",
            session, reveal.result, reveal.secret, reveal.counterpart, reveal.range, expected
        )));
    }
    Ok(())
}

fn verification_failed(message: String) -> FairDiceError {
    FairDiceError::crypto(
        CryptoError::CommitmentVerificationFailed { message },
        "transcript",
    )
}

/// Display sink that records events before forwarding them
pub struct RecordingSink<D: DisplaySink> {
    inner: D,
    transcript: Transcript,
}

impl<D: DisplaySink> RecordingSink<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_parts(self) -> (D, Transcript) {
        (self.inner, self.transcript)
    }
}

impl<D: DisplaySink> DisplaySink for RecordingSink<D> {
    fn emit(&mut self, event: &GameEvent) {
        self.transcript.record(event);
        self.inner.emit(event);
    }

    fn show_table(&mut self, table: &ProbabilityTable) {
        self.inner.show_table(table);
    }
}
