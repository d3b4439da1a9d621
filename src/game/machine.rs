//! Game turn state machine
//!
//! Sequences one play-through: determine the first mover, select dice,
//! roll for the computer, roll for the user, resolve. Every random
//! decision that affects the outcome runs through its own
//! [`FairRandomSession`]; an exit request in any session ends the game.

use super::traits::{DisplaySink, InputCollector, InputEvent, Prompt};
use super::{Outcome, Party};
use crate::config::MIN_DICE;
use crate::dice::{DicePool, Die, DieId, ProbabilityTable};
use crate::error::{FairDiceError, GameResult};
use crate::events::GameEvent;
use crate::protocol::{
    CommitmentGenerator, FairRandomSession, Reveal, SecureCommitmentGenerator, SessionOutcome,
    SessionPurpose,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Turn states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    DetermineFirstMover,
    SelectDice,
    RollComputer,
    RollUser,
    ResolveOutcome,
    /// Outcome computed
    Finished,
    /// Counterpart exited; no winner
    Aborted,
}

impl TurnState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Finished | TurnState::Aborted)
    }

    /// Check if a state transition is valid
    pub fn can_transition_to(&self, next: TurnState) -> bool {
        match (self, next) {
            (TurnState::DetermineFirstMover, TurnState::SelectDice) => true,
            (TurnState::SelectDice, TurnState::RollComputer) => true,
            (TurnState::RollComputer, TurnState::RollUser) => true,
            (TurnState::RollUser, TurnState::ResolveOutcome) => true,
            (TurnState::ResolveOutcome, TurnState::Finished) => true,
            // Any interactive state can be abandoned
            (
                TurnState::DetermineFirstMover
                | TurnState::SelectDice
                | TurnState::RollComputer
                | TurnState::RollUser,
                TurnState::Aborted,
            ) => true,
            _ => false,
        }
    }
}

/// A resolved roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub die_id: DieId,
    pub face_index: u64,
    pub value: i64,
}

/// Summary of a finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub game_id: Uuid,
    pub first_mover: Party,
    pub computer_die: DieId,
    pub user_die: DieId,
    pub computer_roll: Roll,
    pub user_roll: Roll,
    pub outcome: Outcome,
    /// Every resolved session, in play order
    pub reveals: Vec<Reveal>,
}

/// How a play-through ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEnd {
    Finished(GameReport),
    Aborted,
}

/// Drives one game between the computer and a user
pub struct TurnMachine<G: CommitmentGenerator = SecureCommitmentGenerator> {
    game_id: Uuid,
    pool: DicePool,
    table: ProbabilityTable,
    generator: G,
    selector: StdRng,
    state: TurnState,
    first_mover: Option<Party>,
    computer_die: Option<DieId>,
    user_die: Option<DieId>,
    computer_roll: Option<Roll>,
    user_roll: Option<Roll>,
    reveals: Vec<Reveal>,
}

impl TurnMachine<SecureCommitmentGenerator> {
    /// Machine using the operating system CSPRNG for commitments
    pub fn new(dice: Vec<Die>) -> GameResult<Self> {
        Self::with_generator(dice, SecureCommitmentGenerator::new())
    }
}

impl<G: CommitmentGenerator> TurnMachine<G> {
    /// Dice arrive already validated; only the count is rechecked here
    pub fn with_generator(dice: Vec<Die>, generator: G) -> GameResult<Self> {
        if dice.len() < MIN_DICE {
            return Err(FairDiceError::Configuration {
                message: format!("At least {} dice are required, got {}", MIN_DICE, dice.len()),
                field: "dice".to_string(),
            });
        }

        let table = ProbabilityTable::build(&dice);
        Ok(Self {
            game_id: Uuid::new_v4(),
            pool: DicePool::new(dice),
            table,
            generator,
            selector: StdRng::from_entropy(),
            state: TurnState::DetermineFirstMover,
            first_mover: None,
            computer_die: None,
            user_die: None,
            computer_roll: None,
            user_roll: None,
            reveals: Vec::new(),
        })
    }

    /// Seed the computer's die choice; it is not fairness-critical
    pub fn with_selection_seed(mut self, seed: u64) -> Self {
        self.selector = StdRng::seed_from_u64(seed);
        self
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    pub fn first_mover(&self) -> Option<Party> {
        self.first_mover
    }

    pub fn selected_die(&self, party: Party) -> Option<DieId> {
        match party {
            Party::Computer => self.computer_die,
            Party::User => self.user_die,
        }
    }

    pub fn roll_of(&self, party: Party) -> Option<Roll> {
        match party {
            Party::Computer => self.computer_roll,
            Party::User => self.user_roll,
        }
    }

    pub fn reveals(&self) -> &[Reveal] {
        &self.reveals
    }

    /// Play until the game finishes or is abandoned
    pub fn run(
        &mut self,
        input: &mut dyn InputCollector,
        display: &mut dyn DisplaySink,
    ) -> GameResult<GameEnd> {
        if self.state.is_terminal() {
            return Err(FairDiceError::InvalidState(format!(
                "Game is over ({:?}); restart to play again",
                self.state
            )));
        }

        let span = info_span!("game", game_id = %self.game_id);
        let _enter = span.enter();

        while !self.state.is_terminal() {
            self.step(input, display)?;
        }

        match self.state {
            TurnState::Finished => Ok(GameEnd::Finished(self.report()?)),
            _ => Ok(GameEnd::Aborted),
        }
    }

    /// Execute the current state and move to the next one
    pub fn step(
        &mut self,
        input: &mut dyn InputCollector,
        display: &mut dyn DisplaySink,
    ) -> GameResult<TurnState> {
        let next = match self.state {
            TurnState::DetermineFirstMover => self.determine_first_mover(input, display)?,
            TurnState::SelectDice => self.select_dice(input, display)?,
            TurnState::RollComputer => self.roll(Party::Computer, input, display)?,
            TurnState::RollUser => self.roll(Party::User, input, display)?,
            TurnState::ResolveOutcome => self.resolve(display)?,
            TurnState::Finished | TurnState::Aborted => {
                return Err(FairDiceError::InvalidState(format!(
                    "Game is over ({:?}); restart to play again",
                    self.state
                )));
            }
        };

        if !self.state.can_transition_to(next) {
            return Err(FairDiceError::InvalidState(format!(
                "Invalid transition {:?} -> {:?}",
                self.state, next
            )));
        }

        if next == TurnState::Aborted {
            info!(state = ?self.state, "Game abandoned");
            display.emit(&GameEvent::GameAborted);
        }
        debug!(from = ?self.state, to = ?next, "Turn transition");
        self.state = next;
        Ok(next)
    }

    /// Start over with the full dice pool
    pub fn restart(&mut self) {
        self.game_id = Uuid::new_v4();
        self.pool.reset();
        self.state = TurnState::DetermineFirstMover;
        self.first_mover = None;
        self.computer_die = None;
        self.user_die = None;
        self.computer_roll = None;
        self.user_roll = None;
        self.reveals.clear();
    }

    fn determine_first_mover(
        &mut self,
        input: &mut dyn InputCollector,
        display: &mut dyn DisplaySink,
    ) -> GameResult<TurnState> {
        display.emit(&GameEvent::GameStarted {
            game_id: self.game_id,
            dice: self.pool.all().to_vec(),
        });

        let session = FairRandomSession::open(&mut self.generator, 2, SessionPurpose::FirstMover)?;
        match session.run("Try to guess my selection.", input, display, &self.table)? {
            SessionOutcome::Aborted => Ok(TurnState::Aborted),
            SessionOutcome::Resolved(reveal) => {
                let party = Party::first_mover_from(reveal.result);
                self.reveals.push(reveal);
                self.first_mover = Some(party);

                info!(%party, "First mover determined");
                display.emit(&GameEvent::FirstMover { party });
                Ok(TurnState::SelectDice)
            }
        }
    }

    fn select_dice(
        &mut self,
        input: &mut dyn InputCollector,
        display: &mut dyn DisplaySink,
    ) -> GameResult<TurnState> {
        let first = self
            .first_mover
            .ok_or_else(|| FairDiceError::InvalidState("First mover not decided".to_string()))?;

        for party in [first, first.other()] {
            let chosen = match party {
                Party::Computer => Some(self.computer_pick()?),
                Party::User => self.user_pick(input, display)?,
            };
            let Some(die_id) = chosen else {
                return Ok(TurnState::Aborted);
            };

            match party {
                Party::Computer => self.computer_die = Some(die_id),
                Party::User => self.user_die = Some(die_id),
            }
            debug!(%party, die = %die_id, remaining = self.pool.remaining_count(), "Die selected");
            display.emit(&GameEvent::DieSelected {
                party,
                die_id,
                die: self.pool.get(die_id)?.clone(),
            });
        }

        Ok(TurnState::RollComputer)
    }

    fn computer_pick(&mut self) -> GameResult<DieId> {
        let remaining = self.pool.remaining_count();
        if remaining == 0 {
            return Err(FairDiceError::InvalidState("No dice left to choose".to_string()));
        }
        let position = self.selector.gen_range(0..remaining);
        self.pool.take(position)
    }

    fn user_pick(
        &mut self,
        input: &mut dyn InputCollector,
        display: &mut dyn DisplaySink,
    ) -> GameResult<Option<DieId>> {
        let labels = self
            .pool
            .remaining()
            .iter()
            .map(|id| self.pool.get(*id).map(Die::to_string))
            .collect::<GameResult<Vec<String>>>()?;
        let prompt = Prompt::labelled("Choose your dice:", labels);

        loop {
            match input.request_integer(&prompt)? {
                InputEvent::Value(value) if value < prompt.range() => {
                    return Ok(Some(self.pool.take(value as usize)?));
                }
                InputEvent::Value(value) => display.emit(&GameEvent::InvalidChoice {
                    value,
                    range: prompt.range(),
                }),
                InputEvent::Help => display.show_table(&self.table),
                InputEvent::Exit => return Ok(None),
            }
        }
    }

    fn roll(
        &mut self,
        party: Party,
        input: &mut dyn InputCollector,
        display: &mut dyn DisplaySink,
    ) -> GameResult<TurnState> {
        let die_id = self
            .selected_die(party)
            .ok_or_else(|| FairDiceError::InvalidState(format!("No die selected for {}", party)))?;
        let die = self.pool.get(die_id)?.clone();
        let faces = die.num_faces() as u64;

        let session =
            FairRandomSession::open(&mut self.generator, faces, SessionPurpose::Roll { party })?;
        let message = format!("Add your number modulo {}.", faces);

        match session.run(&message, input, display, &self.table)? {
            SessionOutcome::Aborted => Ok(TurnState::Aborted),
            SessionOutcome::Resolved(reveal) => {
                let roll = Roll {
                    die_id,
                    face_index: reveal.result,
                    value: die.face(reveal.result)?,
                };
                self.reveals.push(reveal);

                info!(%party, value = roll.value, "Rolled");
                display.emit(&GameEvent::Rolled {
                    party,
                    face_index: roll.face_index,
                    value: roll.value,
                });

                match party {
                    Party::Computer => {
                        self.computer_roll = Some(roll);
                        Ok(TurnState::RollUser)
                    }
                    Party::User => {
                        self.user_roll = Some(roll);
                        Ok(TurnState::ResolveOutcome)
                    }
                }
            }
        }
    }

    fn resolve(&mut self, display: &mut dyn DisplaySink) -> GameResult<TurnState> {
        let (computer, user) = self.rolls()?;
        let outcome = Outcome::from_rolls(computer.value, user.value);

        info!(?outcome, computer = computer.value, user = user.value, "Game resolved");
        display.emit(&GameEvent::GameFinished {
            outcome,
            computer_roll: computer.value,
            user_roll: user.value,
        });
        Ok(TurnState::Finished)
    }

    fn rolls(&self) -> GameResult<(Roll, Roll)> {
        match (self.computer_roll, self.user_roll) {
            (Some(computer), Some(user)) => Ok((computer, user)),
            _ => Err(FairDiceError::InvalidState("Both rolls are required".to_string())),
        }
    }

    fn report(&self) -> GameResult<GameReport> {
        let missing = |what: &str| FairDiceError::InvalidState(format!("Missing {}", what));
        let (computer_roll, user_roll) = self.rolls()?;

        Ok(GameReport {
            game_id: self.game_id,
            first_mover: self.first_mover.ok_or_else(|| missing("first mover"))?,
            computer_die: self.computer_die.ok_or_else(|| missing("computer die"))?,
            user_die: self.user_die.ok_or_else(|| missing("user die"))?,
            computer_roll,
            user_roll,
            outcome: Outcome::from_rolls(computer_roll.value, user_roll.value),
            reveals: self.reveals.clone(),
        })
    }
}
