//! One round of the commit, contribute, combine, reveal protocol

use super::commitment::{
    verify_commitment, Commitment, CommitmentDigest, CommitmentGenerator, CommitmentKey,
};
use crate::dice::ProbabilityTable;
use crate::error::{FairDiceError, GameResult};
use crate::events::GameEvent;
use crate::game::traits::{DisplaySink, InputCollector, InputEvent, Prompt};
use crate::game::Party;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Decision a session is run for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionPurpose {
    FirstMover,
    Roll { party: Party },
}

/// Everything a verifier needs once the session is resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub purpose: SessionPurpose,
    pub range: u64,
    pub digest: CommitmentDigest,
    pub key: CommitmentKey,
    pub secret: u64,
    pub counterpart: u64,
    pub result: u64,
}

impl Reveal {
    /// Recompute the digest from the revealed key and secret
    pub fn verify(&self) -> bool {
        verify_commitment(&self.digest, &self.key, self.secret)
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Secret chosen, digest not yet shown
    Committed,
    /// Digest published, waiting for the counterpart's number
    AwaitingCounterpart,
    /// Result combined, secret and key revealed
    Resolved(Reveal),
}

/// How an interactive session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Resolved(Reveal),
    Aborted,
}

/// One fair random integer in `[0, range)`.
///
/// Sessions are single use: each decision opens a new one.
#[derive(Debug)]
pub struct FairRandomSession {
    purpose: SessionPurpose,
    commitment: Commitment,
    state: SessionState,
}

impl FairRandomSession {
    /// Commit to a fresh secret
    pub fn open<G>(generator: &mut G, range: u64, purpose: SessionPurpose) -> GameResult<Self>
    where
        G: CommitmentGenerator + ?Sized,
    {
        let commitment = generator.commit(range)?;
        debug!(?purpose, range, digest = %commitment.digest(), "Session committed");

        Ok(Self {
            purpose,
            commitment,
            state: SessionState::Committed,
        })
    }

    pub fn purpose(&self) -> SessionPurpose {
        self.purpose
    }

    pub fn range(&self) -> u64 {
        self.commitment.range()
    }

    pub fn digest(&self) -> &CommitmentDigest {
        self.commitment.digest()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Resolved reveal, if any
    pub fn reveal(&self) -> Option<&Reveal> {
        match &self.state {
            SessionState::Resolved(reveal) => Some(reveal),
            _ => None,
        }
    }

    /// Show the digest to the counterpart
    pub fn publish(&mut self, display: &mut dyn DisplaySink) -> GameResult<()> {
        if self.state != SessionState::Committed {
            return Err(FairDiceError::InvalidState(
                "Commitment already published".to_string(),
            ));
        }

        display.emit(&GameEvent::CommitmentPublished {
            purpose: self.purpose,
            range: self.range(),
            digest: *self.digest(),
        });
        self.state = SessionState::AwaitingCounterpart;
        Ok(())
    }

    /// Combine the counterpart's number with the secret and reveal
    pub fn contribute(&mut self, counterpart: u64) -> GameResult<&Reveal> {
        if self.state != SessionState::AwaitingCounterpart {
            return Err(FairDiceError::InvalidState(format!(
                "Session cannot accept a contribution in state {:?}",
                self.state
            )));
        }

        let range = self.range();
        if counterpart >= range {
            return Err(FairDiceError::InvalidInput(format!(
                "Contribution {} outside 0..{}",
                counterpart,
                range - 1
            )));
        }

        let secret = self.commitment.secret();
        let result = ((secret as u128 + counterpart as u128) % range as u128) as u64;

        self.state = SessionState::Resolved(Reveal {
            purpose: self.purpose,
            range,
            digest: *self.digest(),
            key: self.commitment.key().clone(),
            secret,
            counterpart,
            result,
        });
        debug!(secret, counterpart, result, "Session resolved");

        match &self.state {
            SessionState::Resolved(reveal) => Ok(reveal),
            _ => Err(FairDiceError::InvalidState(
                "Session failed to resolve".to_string(),
            )),
        }
    }

    /// Drive the session against a counterpart until it resolves or the
    /// counterpart exits. Help requests show `table` and ask again.
    pub fn run(
        mut self,
        message: &str,
        input: &mut dyn InputCollector,
        display: &mut dyn DisplaySink,
        table: &ProbabilityTable,
    ) -> GameResult<SessionOutcome> {
        self.publish(display)?;
        let prompt = Prompt::numeric(message, self.range());

        let counterpart = loop {
            match input.request_integer(&prompt)? {
                InputEvent::Value(value) if value < self.range() => break value,
                InputEvent::Value(value) => {
                    warn!(value, range = self.range(), "Contribution out of range");
                    display.emit(&GameEvent::InvalidChoice {
                        value,
                        range: self.range(),
                    });
                }
                InputEvent::Help => display.show_table(table),
                InputEvent::Exit => {
                    debug!(purpose = ?self.purpose, "Session aborted by counterpart");
                    return Ok(SessionOutcome::Aborted);
                }
            }
        };

        let reveal = self.contribute(counterpart)?.clone();
        display.emit(&GameEvent::SecretRevealed(reveal.clone()));
        Ok(SessionOutcome::Resolved(reveal))
    }
}
