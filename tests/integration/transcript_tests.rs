//! Recorded games can be saved and verified offline

use fairdice::protocol::{compute_digest, KEY_LEN};
use fairdice::{CommitmentKey, GameEnd, GameEvent, RecordingSink, Transcript, TurnMachine};
use tempfile::NamedTempFile;

use crate::mocks::{intransitive_dice, FixedSecretGenerator, RecordingDisplay, ScriptedInput};

fn played() -> (RecordingDisplay, Transcript, GameEnd) {
    let mut game =
        TurnMachine::with_generator(intransitive_dice(), FixedSecretGenerator::new(&[1, 4, 2]))
            .unwrap()
            .with_selection_seed(3);
    let mut sink = RecordingSink::new(RecordingDisplay::new());

    let end = game
        .run(&mut ScriptedInput::values(&[0, 1, 5, 5]), &mut sink)
        .unwrap();
    let (display, transcript) = sink.into_parts();
    (display, transcript, end)
}

#[test]
fn test_transcript_mirrors_displayed_events() {
    let (display, transcript, end) = played();

    assert!(matches!(end, GameEnd::Finished(_)));
    assert_eq!(transcript.entries.len(), display.events.len());
    assert_eq!(transcript.reveals().count(), 3);
    assert!(transcript.verify_all());
    assert_eq!(transcript.check().unwrap(), 3);
    assert!(transcript.game_id.is_some());
}

#[test]
fn test_saved_transcript_verifies_after_reload() {
    let (_, transcript, _) = played();
    let file = NamedTempFile::new().unwrap();

    transcript.save(file.path()).unwrap();
    let loaded = Transcript::load(file.path()).unwrap();

    assert_eq!(loaded.game_id, transcript.game_id);
    assert_eq!(loaded.entries.len(), transcript.entries.len());
    assert!(loaded.verify_all());
}

#[test]
fn test_altered_secret_fails_verification() {
    let (_, mut transcript, _) = played();

    let altered = transcript.entries.iter_mut().find_map(|entry| match &mut entry.event {
        GameEvent::SecretRevealed(reveal) => Some(reveal),
        _ => None,
    });
    let reveal = altered.unwrap();
    reveal.secret = (reveal.secret + 1) % reveal.range;

    assert!(!transcript.verify_all());
    assert!(transcript.check().is_err());
}

#[test]
fn test_transcript_json_is_tagged() {
    let (_, transcript, _) = played();

    let json = transcript.to_json().unwrap();

    assert!(json.contains("\"type\": \"game_started\""));
    assert!(json.contains("\"type\": \"secret_revealed\""));
    assert!(json.contains("\"type\": \"game_finished\""));
}

#[test]
fn test_reveal_under_a_different_commitment_is_rejected() {
    let (_, mut transcript, _) = played();
    assert!(transcript.check().is_ok());

    // Swap in a reveal that is internally consistent but was never published.
    let replaced = transcript.entries.iter_mut().find_map(|entry| match &mut entry.event {
        GameEvent::SecretRevealed(reveal) => Some(reveal),
        _ => None,
    });
    let reveal = replaced.unwrap();
    let key = CommitmentKey::from_bytes([0xEE; KEY_LEN]);
    let secret = (reveal.secret + 1) % reveal.range;
    reveal.digest = compute_digest(&key, secret).unwrap();
    reveal.key = key;
    reveal.secret = secret;
    reveal.result = (secret + reveal.counterpart) % reveal.range;

    assert!(transcript.verify_all());
    let err = transcript.check().unwrap_err();
    assert!(err.to_string().contains("was published"));
}

#[test]
fn test_finished_game_with_unrevealed_commitment_is_rejected() {
    let (_, mut transcript, _) = played();

    let last_reveal = transcript
        .entries
        .iter()
        .rposition(|entry| matches!(entry.event, GameEvent::SecretRevealed(_)))
        .unwrap();
    transcript.entries.remove(last_reveal);

    let err = transcript.check().unwrap_err();
    assert!(err.to_string().contains("never revealed"));
}

#[test]
fn test_reveal_without_publication_is_rejected() {
    let (_, mut transcript, _) = played();

    transcript
        .entries
        .retain(|entry| !matches!(entry.event, GameEvent::CommitmentPublished { .. }));

    assert!(transcript.check().is_err());
}
