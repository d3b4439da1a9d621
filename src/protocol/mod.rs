//! Commit-reveal fair random number protocol
//!
//! - `commitment`: secret, one-time key and HMAC digest
//! - `session`: one commit, contribute, combine, reveal round

pub mod commitment;
pub mod session;

pub use commitment::{
    compute_digest, encode_secret, uniform_below, verify_commitment, Commitment,
    CommitmentDigest, CommitmentGenerator, CommitmentKey, SecureCommitmentGenerator, KEY_LEN,
};
pub use session::{FairRandomSession, Reveal, SessionOutcome, SessionPurpose, SessionState};
