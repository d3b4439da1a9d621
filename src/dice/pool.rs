//! Dice pool with identity-based selection

use super::die::{Die, DieId};
use crate::error::{FairDiceError, GameResult};

/// All dice of a game plus the ones still available for selection
#[derive(Debug, Clone)]
pub struct DicePool {
    dice: Vec<Die>,
    available: Vec<DieId>,
}

impl DicePool {
    pub fn new(dice: Vec<Die>) -> Self {
        let available = (0..dice.len()).map(DieId).collect();
        Self { dice, available }
    }

    /// Every die of the original configuration
    pub fn all(&self) -> &[Die] {
        &self.dice
    }

    pub fn get(&self, id: DieId) -> GameResult<&Die> {
        self.dice
            .get(id.0)
            .ok_or_else(|| FairDiceError::InvalidState(format!("Unknown die {}", id)))
    }

    /// Ids still on offer, in configuration order
    pub fn remaining(&self) -> &[DieId] {
        &self.available
    }

    pub fn remaining_count(&self) -> usize {
        self.available.len()
    }

    pub fn contains(&self, id: DieId) -> bool {
        self.available.contains(&id)
    }

    /// Remove the die at `position` of the remaining list
    pub fn take(&mut self, position: usize) -> GameResult<DieId> {
        if position >= self.available.len() {
            return Err(FairDiceError::InvalidInput(format!(
                "Die choice {} out of range, {} dice remaining",
                position,
                self.available.len()
            )));
        }
        Ok(self.available.remove(position))
    }

    /// Put every die back on offer
    pub fn reset(&mut self) {
        self.available = (0..self.dice.len()).map(DieId).collect();
    }
}
