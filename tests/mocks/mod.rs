//! Scripted implementations of the game boundary traits

pub mod display;
pub mod input;

pub use display::RecordingDisplay;
pub use generator::FixedSecretGenerator;
pub use input::ScriptedInput;

use fairdice::Die;

/// The classic intransitive set: A beats B, B beats C, C beats A
pub fn intransitive_dice() -> Vec<Die> {
    vec![
        Die::new(vec![2, 2, 4, 4, 9, 9]).unwrap(),
        Die::new(vec![1, 1, 6, 6, 8, 8]).unwrap(),
        Die::new(vec![3, 3, 5, 5, 7, 7]).unwrap(),
    ]
}
