//! Game turn sequencing and its boundary traits

pub mod machine;
pub mod traits;

pub use machine::{GameEnd, GameReport, Roll, TurnMachine, TurnState};
pub use traits::{Choice, DisplaySink, InputCollector, InputEvent, Prompt};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A participant. The computer is always the committing party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Computer,
    User,
}

impl Party {
    pub fn other(self) -> Party {
        match self {
            Party::Computer => Party::User,
            Party::User => Party::Computer,
        }
    }

    /// Published first-mover convention: result 0 means the committing
    /// party (the computer) moves first, result 1 means the user does.
    pub fn first_mover_from(result: u64) -> Party {
        if result == 0 {
            Party::Computer
        } else {
            Party::User
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Computer => write!(f, "computer"),
            Party::User => write!(f, "user"),
        }
    }
}

/// Result of comparing the two rolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    ComputerWins,
    UserWins,
    Draw,
}

impl Outcome {
    /// Strictly greater wins; equal rolls draw
    pub fn from_rolls(computer: i64, user: i64) -> Self {
        match computer.cmp(&user) {
            Ordering::Greater => Outcome::ComputerWins,
            Ordering::Less => Outcome::UserWins,
            Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(&self) -> Option<Party> {
        match self {
            Outcome::ComputerWins => Some(Party::Computer),
            Outcome::UserWins => Some(Party::User),
            Outcome::Draw => None,
        }
    }
}
