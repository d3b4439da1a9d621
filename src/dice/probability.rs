//! Win probabilities between dice

use super::die::Die;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exact win probability `wins / total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinProbability {
    pub wins: u64,
    pub total: u64,
}

impl WinProbability {
    pub fn value(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total as f64
    }

    /// Fixed-precision decimal rendering
    pub fn format(&self, precision: usize) -> String {
        format!("{:.*}", precision, self.value())
    }
}

impl fmt::Display for WinProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(4))
    }
}

/// Probability that `a` rolls strictly higher than `b`
pub fn win_probability(a: &Die, b: &Die) -> WinProbability {
    let wins = a
        .faces()
        .iter()
        .map(|fa| b.faces().iter().filter(|fb| *fa > **fb).count() as u64)
        .sum();

    WinProbability {
        wins,
        total: (a.num_faces() * b.num_faces()) as u64,
    }
}

/// Probability that `a` and `b` roll the same value
pub fn tie_fraction(a: &Die, b: &Die) -> WinProbability {
    let ties = a
        .faces()
        .iter()
        .map(|fa| b.faces().iter().filter(|fb| **fb == *fa).count() as u64)
        .sum();

    WinProbability {
        wins: ties,
        total: (a.num_faces() * b.num_faces()) as u64,
    }
}

/// Win probability of every die (rows) against every die (columns)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityTable {
    dice: Vec<Die>,
    cells: Vec<Vec<WinProbability>>,
}

impl ProbabilityTable {
    /// Evaluate all ordered pairs; the relation is not symmetric so the
    /// lower triangle cannot be derived from the upper one.
    pub fn build(dice: &[Die]) -> Self {
        let cells = dice
            .iter()
            .map(|row| dice.iter().map(|col| win_probability(row, col)).collect())
            .collect();

        Self {
            dice: dice.to_vec(),
            cells,
        }
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn size(&self) -> usize {
        self.dice.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<WinProbability> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Diagonal cells compare a die with itself and carry no information
    pub fn is_self_comparison(&self, row: usize, col: usize) -> bool {
        row == col
    }

    /// Row dice that beat the column die with probability above one half
    pub fn beats(&self, row: usize, col: usize) -> bool {
        !self.is_self_comparison(row, col)
            && self
                .get(row, col)
                .map(|p| p.wins * 2 > p.total)
                .unwrap_or(false)
    }
}
