//! Dice configuration parsing

use super::die::Die;
use crate::config::GameConfig;
use crate::error::{FairDiceError, GameResult};

/// Shown next to configuration errors
pub const DICE_EXAMPLE: &str = "fairdice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

/// Parse one comma-separated argument per die.
///
/// Every die must have the same number of faces as the first one.
pub fn parse_dice<S: AsRef<str>>(args: &[S], config: &GameConfig) -> GameResult<Vec<Die>> {
    if args.len() < config.min_dice {
        return Err(FairDiceError::Configuration {
            message: format!(
                "At least {} dice are required, got {}",
                config.min_dice,
                args.len()
            ),
            field: "dice".to_string(),
        });
    }

    let mut dice = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        let die = parse_die(arg.as_ref(), index)?;

        if die.num_faces() > config.max_faces {
            return Err(FairDiceError::InvalidDice {
                message: format!(
                    "Die {} has {} faces, at most {} are allowed",
                    index + 1,
                    die.num_faces(),
                    config.max_faces
                ),
                die_index: Some(index),
            });
        }

        if let Some(first) = dice.first().map(Die::num_faces) {
            if die.num_faces() != first {
                return Err(FairDiceError::InvalidDice {
                    message: format!(
                        "Die {} has {} faces but the first die has {}",
                        index + 1,
                        die.num_faces(),
                        first
                    ),
                    die_index: Some(index),
                });
            }
        }

        dice.push(die);
    }

    Ok(dice)
}

fn parse_die(arg: &str, index: usize) -> GameResult<Die> {
    if arg.trim().is_empty() {
        return Err(FairDiceError::InvalidDice {
            message: format!("Die {} has no faces", index + 1),
            die_index: Some(index),
        });
    }

    let faces = arg
        .split(',')
        .map(|face| {
            let face = face.trim();
            face.parse::<i64>().map_err(|_| FairDiceError::InvalidDice {
                message: format!("Die {} has a non-integer face '{}'", index + 1, face),
                die_index: Some(index),
            })
        })
        .collect::<GameResult<Vec<i64>>>()?;

    Die::new(faces)
}
