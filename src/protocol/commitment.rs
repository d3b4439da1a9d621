//! HMAC commitment construction utilities
//!
//! A commitment binds a secret integer to a one-time key:
//! `digest = HMAC-SHA3-256(key, be_bytes_u64(secret))`. The digest is
//! published before the counterpart contributes; the key and secret are
//! revealed afterwards so anyone can recompute it.

use crate::error::{utils, CryptoError, FairDiceError, GameResult};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;

type HmacSha3 = Hmac<Sha3_256>;

/// Key length in bytes (256 bits)
pub const KEY_LEN: usize = 32;

/// Serde adapter writing 32-byte values as uppercase hex strings
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        hex::encode_upper(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        let mut array = [0u8; 32];
        hex::decode_to_slice(&hex_string, &mut array).map_err(serde::de::Error::custom)?;
        Ok(array)
    }
}

/// One-time HMAC key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentKey(#[serde(with = "hex_bytes")] [u8; KEY_LEN]);

impl CommitmentKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn from_hex(hex_str: &str) -> GameResult<Self> {
        Ok(Self(utils::from_hex_32(hex_str)?))
    }
}

impl fmt::Debug for CommitmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentKey({}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for CommitmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", utils::to_hex(&self.0))
    }
}

/// Published HMAC digest
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentDigest(#[serde(with = "hex_bytes")] [u8; 32]);

impl CommitmentDigest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_hex(hex_str: &str) -> GameResult<Self> {
        Ok(Self(utils::from_hex_32(hex_str)?))
    }
}

impl fmt::Debug for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", utils::to_hex(&self.0))
    }
}

/// Canonical message encoding of a secret: 8 bytes, big-endian
pub fn encode_secret(secret: u64) -> [u8; 8] {
    secret.to_be_bytes()
}

fn keyed_mac(key: &CommitmentKey) -> GameResult<HmacSha3> {
    HmacSha3::new_from_slice(key.as_bytes()).map_err(|e| {
        FairDiceError::crypto(
            CryptoError::InvalidKey {
                message: e.to_string(),
            },
            "hmac_init",
        )
    })
}

/// Compute `HMAC-SHA3-256(key, encode_secret(secret))`
pub fn compute_digest(key: &CommitmentKey, secret: u64) -> GameResult<CommitmentDigest> {
    let mut mac = keyed_mac(key)?;
    mac.update(&encode_secret(secret));
    Ok(CommitmentDigest(mac.finalize().into_bytes().into()))
}

/// Check a revealed `(key, secret)` against a published digest in constant time
pub fn verify_commitment(digest: &CommitmentDigest, key: &CommitmentKey, secret: u64) -> bool {
    match keyed_mac(key) {
        Ok(mut mac) => {
            mac.update(&encode_secret(secret));
            mac.verify_slice(digest.as_bytes()).is_ok()
        }
        Err(_) => false,
    }
}

/// Secret, key and digest of one commitment.
///
/// Fields are private so a published commitment cannot be altered.
#[derive(Clone)]
pub struct Commitment {
    secret: u64,
    range: u64,
    key: CommitmentKey,
    digest: CommitmentDigest,
}

impl Commitment {
    /// Bind an already chosen secret to a key
    pub fn from_parts(secret: u64, range: u64, key: CommitmentKey) -> GameResult<Self> {
        check_range(range)?;
        if secret >= range {
            return Err(FairDiceError::crypto(
                CryptoError::InvalidRange { range },
                "secret outside range",
            ));
        }
        let digest = compute_digest(&key, secret)?;
        Ok(Self {
            secret,
            range,
            key,
            digest,
        })
    }

    pub fn digest(&self) -> &CommitmentDigest {
        &self.digest
    }

    pub fn range(&self) -> u64 {
        self.range
    }

    pub(crate) fn secret(&self) -> u64 {
        self.secret
    }

    pub(crate) fn key(&self) -> &CommitmentKey {
        &self.key
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret and key stay hidden until the session reveals them.
        f.debug_struct("Commitment")
            .field("range", &self.range)
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

fn check_range(range: u64) -> GameResult<()> {
    if range == 0 {
        return Err(FairDiceError::crypto(
            CryptoError::InvalidRange { range },
            "empty range",
        ));
    }
    Ok(())
}

/// Source of fresh commitments
pub trait CommitmentGenerator {
    /// Pick a uniform secret in `[0, range)` under a fresh key
    fn commit(&mut self, range: u64) -> GameResult<Commitment>;
}

/// Commitments backed by the operating system CSPRNG
pub struct SecureCommitmentGenerator<R: RngCore = OsRng> {
    rng: R,
}

impl SecureCommitmentGenerator<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for SecureCommitmentGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> SecureCommitmentGenerator<R> {
    /// Use another randomness source; it must be cryptographically secure
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn fresh_key(&mut self) -> GameResult<CommitmentKey> {
        let mut bytes = [0u8; KEY_LEN];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(randomness_unavailable)?;
        Ok(CommitmentKey(bytes))
    }
}

impl<R: RngCore> CommitmentGenerator for SecureCommitmentGenerator<R> {
    fn commit(&mut self, range: u64) -> GameResult<Commitment> {
        check_range(range)?;
        let key = self.fresh_key()?;
        let secret = uniform_below(&mut self.rng, range)?;
        Commitment::from_parts(secret, range, key)
    }
}

fn randomness_unavailable(err: rand::Error) -> FairDiceError {
    FairDiceError::crypto(
        CryptoError::RandomnessUnavailable {
            message: err.to_string(),
        },
        "commit",
    )
}

/// Uniform integer in `[0, range)` without modulo bias.
///
/// Draws below `2^64 mod range` are rejected so every residue is backed
/// by the same number of accepted draws.
pub fn uniform_below<R: RngCore>(rng: &mut R, range: u64) -> GameResult<u64> {
    check_range(range)?;
    let threshold = range.wrapping_neg() % range;
    loop {
        let mut buf = [0u8; 8];
        rng.try_fill_bytes(&mut buf).map_err(randomness_unavailable)?;
        let draw = u64::from_le_bytes(buf);
        if draw >= threshold {
            return Ok(draw % range);
        }
    }
}
