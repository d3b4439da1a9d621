//! Single commit-reveal sessions

use fairdice::{
    FairRandomSession, GameEvent, InputEvent, Party, ProbabilityTable, SessionOutcome,
    SessionPurpose, SessionState,
};

use crate::mocks::{intransitive_dice, FixedSecretGenerator, RecordingDisplay, ScriptedInput};

fn table() -> ProbabilityTable {
    ProbabilityTable::build(&intransitive_dice())
}

#[test]
fn test_first_mover_guess_resolves_to_user() {
    let mut generator = FixedSecretGenerator::new(&[0]);
    let session = FairRandomSession::open(&mut generator, 2, SessionPurpose::FirstMover).unwrap();
    let mut input = ScriptedInput::values(&[1]);
    let mut display = RecordingDisplay::new();

    let outcome = session
        .run("Try to guess my selection.", &mut input, &mut display, &table())
        .unwrap();

    let SessionOutcome::Resolved(reveal) = outcome else {
        panic!("session should resolve");
    };
    assert_eq!(reveal.result, 1);
    assert_eq!(Party::first_mover_from(reveal.result), Party::User);
    assert!(reveal.verify());
}

#[test]
fn test_digest_published_before_prompt_and_unchanged_at_reveal() {
    let mut generator = FixedSecretGenerator::new(&[4]);
    let session =
        FairRandomSession::open(&mut generator, 6, SessionPurpose::Roll { party: Party::User })
            .unwrap();
    let published = *session.digest();
    let mut input = ScriptedInput::values(&[5]);
    let mut display = RecordingDisplay::new();

    session
        .run("Add your number modulo 6.", &mut input, &mut display, &table())
        .unwrap();

    match (&display.events[0], &display.events[1]) {
        (
            GameEvent::CommitmentPublished { digest, range, .. },
            GameEvent::SecretRevealed(reveal),
        ) => {
            assert_eq!(*digest, published);
            assert_eq!(*range, 6);
            assert_eq!(reveal.digest, published);
            assert_eq!(reveal.result, 3);
        }
        other => panic!("unexpected events: {:?}", other),
    }
    assert_eq!(input.prompts[0].range(), 6);
}

#[test]
fn test_out_of_range_and_help_reprompt() {
    let mut generator = FixedSecretGenerator::new(&[1]);
    let session = FairRandomSession::open(&mut generator, 2, SessionPurpose::FirstMover).unwrap();
    let mut input = ScriptedInput::new(&[
        InputEvent::Value(7),
        InputEvent::Help,
        InputEvent::Value(1),
    ]);
    let mut display = RecordingDisplay::new();

    let outcome = session
        .run("Try to guess my selection.", &mut input, &mut display, &table())
        .unwrap();

    assert!(matches!(outcome, SessionOutcome::Resolved(ref r) if r.result == 0));
    assert_eq!(input.prompts.len(), 3);
    assert_eq!(display.tables_shown, 1);
    assert_eq!(
        display.count(|e| matches!(e, GameEvent::InvalidChoice { value: 7, .. })),
        1
    );
}

#[test]
fn test_exit_aborts_without_reveal() {
    let mut generator = FixedSecretGenerator::new(&[1]);
    let session = FairRandomSession::open(&mut generator, 2, SessionPurpose::FirstMover).unwrap();
    let mut input = ScriptedInput::new(&[InputEvent::Exit]);
    let mut display = RecordingDisplay::new();

    let outcome = session
        .run("Try to guess my selection.", &mut input, &mut display, &table())
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Aborted);
    assert_eq!(
        display.count(|e| matches!(e, GameEvent::SecretRevealed(_))),
        0
    );
}

#[test]
fn test_contribute_requires_published_commitment() {
    let mut generator = FixedSecretGenerator::new(&[1]);
    let mut session =
        FairRandomSession::open(&mut generator, 2, SessionPurpose::FirstMover).unwrap();

    assert_eq!(*session.state(), SessionState::Committed);
    assert!(session.contribute(0).is_err());

    session.publish(&mut RecordingDisplay::new()).unwrap();
    assert!(session.contribute(2).is_err());
    assert_eq!(session.contribute(1).unwrap().result, 0);
    assert!(session.reveal().is_some());
    assert!(session.contribute(1).is_err());
}

#[test]
fn test_result_wraps_at_range() {
    let mut generator = FixedSecretGenerator::new(&[5]);
    let mut session =
        FairRandomSession::open(&mut generator, 6, SessionPurpose::Roll { party: Party::Computer })
            .unwrap();
    session.publish(&mut RecordingDisplay::new()).unwrap();

    let reveal = session.contribute(5).unwrap();

    assert_eq!(reveal.secret, 5);
    assert_eq!(reveal.counterpart, 5);
    assert_eq!(reveal.result, 4);
}
