//! A single die and its stable handle

use crate::error::{FairDiceError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a die: its position in the original configuration.
///
/// Two dice with identical faces still carry different ids, so pool
/// membership never depends on face equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DieId(pub usize);

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable ordered sequence of face values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    faces: Vec<i64>,
}

impl Die {
    /// Create a die; at least one face is required
    pub fn new(faces: Vec<i64>) -> GameResult<Self> {
        if faces.is_empty() {
            return Err(FairDiceError::InvalidDice {
                message: "A die needs at least one face".to_string(),
                die_index: None,
            });
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[i64] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Face at `index`, as produced by a fair random session
    pub fn face(&self, index: u64) -> GameResult<i64> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.faces.get(i).copied())
            .ok_or_else(|| {
                FairDiceError::InvalidInput(format!(
                    "Face index {} out of range for a {}-sided die",
                    index,
                    self.faces.len()
                ))
            })
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", faces.join(","))
    }
}
