//! Dice, the dice pool and the probability engine

pub mod die;
pub mod parse;
pub mod pool;
pub mod probability;

pub use die::{Die, DieId};
pub use parse::{parse_dice, DICE_EXAMPLE};
pub use pool::DicePool;
pub use probability::{tie_fraction, win_probability, ProbabilityTable, WinProbability};
