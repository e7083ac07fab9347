//! The game controller and state machine
//!
//! [`GameController`] owns the [`GameState`] and drives it forward on a
//! fixed-rate tick: it drains the pending presentation commands, applies
//! time-based phase transitions, and pushes a snapshot back to the
//! presentation for redraw. Everything here is synchronous; the only
//! concurrency is the bounded command queue feeding
//! [`tick`](GameController::tick) from the presentation thread.

use std::{
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Instant;

use crate::{
    constants::{assets, commands, ladder, timing},
    game::{GameState, Phase},
    language::{Language, LanguagePack},
    scheduler::CommandSender,
    sound::Sound,
    store::QuestionStore,
    view::Presentation,
};

/// Unrecoverable game errors
///
/// Everything else in the game degrades or is ignored with a log entry;
/// these are the conditions that must be surfaced to the embedder.
#[derive(Debug, Error)]
pub enum GameError {
    /// The question database yielded no playable questions, so a game
    /// cannot start
    #[error("no playable questions in `{file}`")]
    NoQuestions {
        /// Name of the database file that came up empty
        file: String,
    },
    /// The supplied timing configuration is out of bounds
    #[error("invalid timing configuration: {0}")]
    InvalidTimings(#[from] garde::Report),
    /// The game logic thread could not be spawned
    #[error("failed to spawn the game logic thread")]
    Spawn(#[from] std::io::Error),
}

type ValidationResult = garde::Result;

/// Validates that a phase timeout falls within the accepted bounds
fn validate_timeout<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} is outside of the bounds [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

/// Validates the intro phase timeout
fn validate_begin(val: &Duration) -> ValidationResult {
    validate_timeout::<{ timing::MIN_PHASE_TIMEOUT }, { timing::MAX_PHASE_TIMEOUT }>("begin", val)
}

/// Validates the right-answer phase timeout
fn validate_right_answer(val: &Duration) -> ValidationResult {
    validate_timeout::<{ timing::MIN_PHASE_TIMEOUT }, { timing::MAX_PHASE_TIMEOUT }>(
        "right_answer",
        val,
    )
}

/// Validates the wrong-answer phase timeout
fn validate_wrong_answer(val: &Duration) -> ValidationResult {
    validate_timeout::<{ timing::MIN_PHASE_TIMEOUT }, { timing::MAX_PHASE_TIMEOUT }>(
        "wrong_answer",
        val,
    )
}

/// Validates the joker phase timeout
fn validate_joker(val: &Duration) -> ValidationResult {
    validate_timeout::<{ timing::MIN_PHASE_TIMEOUT }, { timing::MAX_PHASE_TIMEOUT }>("joker", val)
}

/// How long each transient phase of the state machine lasts
///
/// The defaults are the classic pacing of the game; tests shrink them
/// to drive the machine without waiting.
#[serde_with::serde_as]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Timings {
    /// How long the intro screen is shown
    #[garde(custom(|v, _| validate_begin(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub begin: Duration,
    /// How long the right-answer celebration is shown
    #[garde(custom(|v, _| validate_right_answer(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub right_answer: Duration,
    /// How long the wrong-answer screen is shown
    #[garde(custom(|v, _| validate_wrong_answer(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub wrong_answer: Duration,
    /// How long a joker animation is shown
    #[garde(custom(|v, _| validate_joker(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub joker: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            begin: timing::BEGIN_TIMEOUT,
            right_answer: timing::RIGHT_ANSWER_TIMEOUT,
            wrong_answer: timing::WRONG_ANSWER_TIMEOUT,
            joker: timing::JOKER_TIMEOUT,
        }
    }
}

/// The six unordered answer pairs the 50:50 joker can eliminate,
/// e.g. `[0, 1]` means: eliminate A and B
const ELIMINATION_PAIRS: [[usize; 2]; 6] = [[0, 1], [0, 2], [1, 2], [0, 3], [1, 3], [2, 3]];

/// Lookup table: for each correct answer index, which entries of
/// [`ELIMINATION_PAIRS`] do not touch it. E.g. if the correct answer is
/// B (1), the candidates are entries 1, 3 and 5, i.e. {A,C}, {A,D} and
/// {C,D}. There are always exactly three.
const LEGAL_PAIRS: [[usize; 3]; 4] = [[2, 4, 5], [1, 3, 5], [0, 3, 4], [0, 1, 2]];

/// The main game logic driver
///
/// The controller is handed to a [`Ticker`](crate::scheduler::Ticker)
/// (or ticked manually) and communicates with the presentation through
/// the [`CommandSender`] queue one way and the
/// [`Presentation`] trait the other way.
pub struct GameController {
    /// The authoritative game state
    game: GameState,
    /// Question database access
    store: QuestionStore,
    /// Snapshot receiver for redraws
    view: Box<dyn Presentation + Send>,
    /// Audio collaborator
    sound: Box<dyn Sound + Send>,
    /// Commands queued by the presentation thread
    commands: Receiver<String>,
    /// Phase timeout configuration
    timings: Timings,
    /// Time sample of the current tick, taken once per tick
    frame_time: Instant,
    /// When the phase last changed
    last_state_change: Instant,
    /// Phase observed by the previous tick, `None` right after restart
    last_phase: Option<Phase>,
}

impl GameController {
    /// Creates a controller with the default timings
    ///
    /// Returns the controller together with the [`CommandSender`] end
    /// of the bounded command queue for the presentation thread. Call
    /// [`restart`](Self::restart) to start the first game.
    pub fn new(
        store: QuestionStore,
        view: Box<dyn Presentation + Send>,
        sound: Box<dyn Sound + Send>,
    ) -> (Self, CommandSender) {
        Self::build(store, view, sound, Timings::default())
    }

    /// Creates a controller with custom phase timings
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidTimings`] if a timeout is out of
    /// bounds.
    pub fn with_timings(
        store: QuestionStore,
        view: Box<dyn Presentation + Send>,
        sound: Box<dyn Sound + Send>,
        timings: Timings,
    ) -> Result<(Self, CommandSender), GameError> {
        timings.validate()?;
        Ok(Self::build(store, view, sound, timings))
    }

    fn build(
        store: QuestionStore,
        view: Box<dyn Presentation + Send>,
        sound: Box<dyn Sound + Send>,
        timings: Timings,
    ) -> (Self, CommandSender) {
        let (sender, receiver) = CommandSender::new(commands::QUEUE_CAPACITY);
        let now = Instant::now();
        (
            Self {
                game: GameState::new(Language::default()),
                store,
                view,
                sound,
                commands: receiver,
                timings,
                frame_time: now,
                last_state_change: now,
                last_phase: None,
            },
            sender,
        )
    }

    /// Returns the current game state
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Starts a new game in the given language
    ///
    /// Resets the state, draws a fresh random question set and enters
    /// the intro phase. A degraded ladder (some tiers without
    /// questions) is playable and only logged.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoQuestions`] when the database yields no
    /// questions at all; the previous state is left untouched in that
    /// case.
    pub fn restart(&mut self, language: Language) -> Result<(), GameError> {
        log::info!("starting quiz in {language}");

        let pack = LanguagePack::get(language);
        let file = pack.database_file();
        let questions = self.store.select_random(file);
        if questions.is_empty() {
            return Err(GameError::NoQuestions {
                file: file.to_owned(),
            });
        }
        if questions.len() < ladder::LEVELS {
            log::warn!(
                "degraded ladder: only {} of {} tiers are playable",
                questions.len(),
                ladder::LEVELS
            );
        }

        // commands aimed at the previous game are stale now
        while self.commands.try_recv().is_ok() {}

        self.game.reset(language);
        self.game.set_questions(questions);
        self.last_phase = None;
        self.last_state_change = self.frame_time;
        self.view.set_language(&pack, &self.game);

        self.sound.stop();
        self.sound.play(assets::INTRO);

        self.view.update(&self.game, self.frame_time, 0.0, true);
        Ok(())
    }

    /// Advances the game logic by one tick
    ///
    /// Drains all pending commands in FIFO order first, then evaluates
    /// the time-based phase transitions, and finally pushes a snapshot
    /// to the presentation. `now` is sampled once per tick so every
    /// decision within the tick sees the same time.
    pub fn tick(&mut self, now: Instant) {
        self.frame_time = now;

        let language_before = self.game.language();
        loop {
            let command = match self.commands.try_recv() {
                Ok(command) => command,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            self.process_command(&command);
        }
        // a language switch requires a full redraw at the end of the tick
        let language_changed = self.game.language() != language_before;

        // seconds spent in the current phase
        let dt = (self.frame_time - self.last_state_change).as_secs_f32();
        let phase = self.game.phase();
        let phase_changed = self.last_phase != Some(phase);

        match phase {
            Phase::Begin => {
                if dt > self.timings.begin.as_secs_f32() {
                    self.goto_phase(Phase::Asking);
                    self.sound.play_looping(assets::BACKGROUND);
                }
            }
            Phase::Asking => {}
            Phase::RightAnswer => {
                if dt > self.timings.right_answer.as_secs_f32() {
                    if self.game.won() {
                        self.sound.play(assets::WON);
                        self.goto_phase(Phase::GameWon);
                    } else {
                        self.goto_phase(Phase::Asking);
                    }
                }
            }
            Phase::WrongAnswer => {
                if dt > self.timings.wrong_answer.as_secs_f32() {
                    self.goto_phase(Phase::GameOver);
                }
            }
            Phase::GameOver | Phase::GameWon => {
                if phase_changed {
                    self.sound.stop();
                }
            }
            Phase::JokerFifty | Phase::JokerAudience => {
                if dt > self.timings.joker.as_secs_f32() {
                    self.goto_phase(Phase::Asking);
                }
            }
        }

        self.last_phase = Some(phase);
        self.view.update(&self.game, now, dt, language_changed);
    }

    /// Switches the game language, preserving game progress
    ///
    /// A no-op when `language` is already active. Otherwise the current
    /// question ids are reloaded from the other language's database (a
    /// fresh random draw when no questions exist yet). The presentation
    /// is always notified so localized UI text refreshes.
    pub fn change_language(&mut self, language: Language) {
        if self.game.language() != language {
            let pack = LanguagePack::get(language);
            let ids = self.game.question_ids();
            let questions = if ids.is_empty() {
                self.store.select_random(pack.database_file())
            } else {
                self.store.select_by_ids(pack.database_file(), &ids)
            };
            if questions.len() < ids.len() {
                log::warn!(
                    "{} questions have no counterpart in {}",
                    ids.len() - questions.len(),
                    pack.database_file()
                );
            }
            self.game.set_language(language);
            self.game.set_questions(questions);
        }

        let pack = LanguagePack::get(self.game.language());
        self.view.set_language(&pack, &self.game);
    }

    /// Switches between English and German
    fn toggle_language(&mut self) {
        self.change_language(self.game.language().toggled());
    }

    /// Moves the state machine to a new phase and restarts its clock
    fn goto_phase(&mut self, phase: Phase) {
        self.game.set_phase(phase);
        self.last_state_change = self.frame_time;
    }

    /// Dispatches one command string from the presentation
    fn process_command(&mut self, command: &str) {
        log::debug!("command from presentation: {command}");

        if command.eq_ignore_ascii_case("button0") {
            self.on_button(0);
        } else if command.eq_ignore_ascii_case("button1") {
            self.on_button(1);
        } else if command.eq_ignore_ascii_case("button2") {
            self.on_button(2);
        } else if command.eq_ignore_ascii_case("button3") {
            self.on_button(3);
        } else if command.eq_ignore_ascii_case("buttonJokerFifty") {
            self.on_joker_fifty();
        } else if command.eq_ignore_ascii_case("buttonJokerAudience") {
            self.on_joker_audience();
        } else if command.eq_ignore_ascii_case("restart") {
            let language = self.game.language();
            if let Err(err) = self.restart(language) {
                log::error!("restart failed: {err}");
            }
        } else if command.eq_ignore_ascii_case("togglelanguage") {
            self.toggle_language();
        } else {
            log::warn!("unknown command from presentation: {command}");
        }
    }

    /// Handles an answer button press
    ///
    /// Only legal while asking; anywhere else the press is logged and
    /// dropped.
    fn on_button(&mut self, button: usize) {
        if self.game.phase() != Phase::Asking {
            log::debug!("ignoring answer button {button}: not in the asking phase");
            return;
        }
        if self.game.current_question().is_none() {
            log::warn!("no question to answer at level {}", self.game.level());
            return;
        }

        if self.game.answer_question(button) {
            let jingle = assets::CORRECT[fastrand::usize(..assets::CORRECT.len())];
            self.sound.play(jingle);
            self.goto_phase(Phase::RightAnswer);
        } else {
            self.sound.play(assets::LOST);
            self.goto_phase(Phase::WrongAnswer);
        }
    }

    /// Handles the 50:50 joker button
    ///
    /// Legal once per game and only while asking. Two of the three
    /// wrong answers are chosen uniformly at random via the pair
    /// tables; the correct answer can never be eliminated.
    fn on_joker_fifty(&mut self) {
        if self.game.phase() != Phase::Asking {
            log::debug!("50:50 joker only available while asking");
            return;
        }
        if self.game.joker_fifty_level().is_some() {
            log::debug!("50:50 joker already used");
            return;
        }
        let Some(correct) = self.game.current_question().map(|q| q.correct_answer()) else {
            log::warn!("no question to apply the 50:50 joker to");
            return;
        };

        let legal = LEGAL_PAIRS[correct];
        let pair = ELIMINATION_PAIRS[legal[fastrand::usize(..legal.len())]];
        self.game.set_eliminated(pair);
        self.goto_phase(Phase::JokerFifty);
    }

    /// Handles the audience joker button
    ///
    /// The poll itself is a stub: the phase exists and times out back
    /// to asking, but no selection effect is applied.
    fn on_joker_audience(&mut self) {
        if self.game.phase() != Phase::Asking {
            log::debug!("audience joker only available while asking");
            return;
        }
        self.goto_phase(Phase::JokerAudience);
    }
}
