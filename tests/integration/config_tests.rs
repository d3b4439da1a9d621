//! Configuration is rejected before any session starts

use fairdice::{parse_dice, FairDiceConfig, TurnMachine};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::mocks::{intransitive_dice, FixedSecretGenerator};

#[test]
fn test_malformed_dice_never_reach_a_session() {
    let config = FairDiceConfig::default();
    let mut machines = 0;

    let result = parse_dice(&["1,2,3,4,5,6", "1,2,3,4,5,6", "1,2,3"], &config.game).and_then(
        |dice| {
            machines += 1;
            TurnMachine::with_generator(dice, FixedSecretGenerator::new(&[]))
        },
    );

    assert!(result.err().map(|e| e.is_configuration()).unwrap_or(false));
    assert_eq!(machines, 0);
}

#[test]
fn test_new_machine_has_committed_nothing() {
    let game =
        TurnMachine::with_generator(intransitive_dice(), FixedSecretGenerator::new(&[])).unwrap();

    assert!(game.reveals().is_empty());
    assert!(game.first_mover().is_none());
}

#[test]
fn test_machine_requires_three_dice() {
    let two = intransitive_dice().into_iter().take(2).collect();

    let err = TurnMachine::with_generator(two, FixedSecretGenerator::new(&[]))
        .err()
        .unwrap();

    assert!(err.is_configuration());
}

#[test]
fn test_config_file_round_trip() {
    let mut config = FairDiceConfig::default();
    config.input.exit_keyword = "quit".to_string();
    config.display.probability_precision = 2;
    let file = NamedTempFile::new().unwrap();

    config.to_file(file.path()).unwrap();
    let loaded = FairDiceConfig::from_file(file.path()).unwrap();

    assert_eq!(loaded.input.exit_keyword, "quit");
    assert_eq!(loaded.display.probability_precision, 2);
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[display]\ncolor = false").unwrap();

    let loaded = FairDiceConfig::from_file(file.path()).unwrap();

    assert!(!loaded.display.color);
    assert_eq!(loaded.game.min_dice, 3);
    assert_eq!(loaded.input.help_keyword, "?");
}

#[test]
fn test_invalid_config_file_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[input]\nexit_keyword = \"5\"").unwrap();

    let err = FairDiceConfig::from_file(file.path()).unwrap_err();

    assert!(err.is_configuration());
}
