//! Game state for one run up the money ladder
//!
//! [`GameState`] is the authoritative record of a single game: the
//! current phase, the question set, the level the player has reached,
//! the win/loss flags and the 50:50 joker bookkeeping. It is pure data
//! plus the operations on it; timing and input live in the
//! [`controller`](crate::controller).

use serde::{Deserialize, Serialize};

use crate::{
    constants::ladder,
    language::Language,
    question::QuestionRecord,
};

/// The phase of the game state machine
///
/// `Begin` is the unique initial phase. `GameOver` and `GameWon` are
/// terminal; only a restart leaves them. The two joker phases are
/// transient and re-entrant only from and to `Asking`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub enum Phase {
    /// Intro screen before the first question
    Begin,
    /// The player is answering a question
    Asking,
    /// The player picked the right answer
    RightAnswer,
    /// The player picked a wrong answer
    WrongAnswer,
    /// The player has lost
    GameOver,
    /// The player has answered the final question and won
    GameWon,
    /// The audience joker animation is showing (selection effect is
    /// intentionally inert, only the phase exists)
    JokerAudience,
    /// The 50:50 joker animation is showing
    JokerFifty,
}

/// The complete state of one game
///
/// Serializing this struct captures everything a presentation needs to
/// render the game, and would be the basis for a save/restore feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase of the state machine
    phase: Phase,
    /// The question for level N sits at position N-1
    questions: Vec<QuestionRecord>,
    /// Current level, 1-based rung on the money ladder
    level: usize,
    /// Whether the player answered the final question correctly
    won: bool,
    /// Whether the player picked a wrong answer
    lost: bool,
    /// Answer indices removed by the 50:50 joker (empty or two entries)
    eliminated: Vec<usize>,
    /// Level at which the 50:50 joker was invoked, `None` while unused
    joker_fifty_level: Option<usize>,
    /// Current game language
    language: Language,
}

impl GameState {
    /// Creates a fresh game state at level 1 in the given language
    ///
    /// The question set starts empty; the controller fills it in from
    /// the store before play begins.
    pub fn new(language: Language) -> Self {
        Self {
            phase: Phase::Begin,
            questions: Vec::new(),
            level: 1,
            won: false,
            lost: false,
            eliminated: Vec::new(),
            joker_fifty_level: None,
            language,
        }
    }

    /// Resets everything back to the start of a new game
    pub fn reset(&mut self, language: Language) {
        *self = Self::new(language);
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves the state machine to a new phase
    pub(crate) fn set_phase(&mut self, phase: Phase) {
        log::debug!("phase change: {} -> {phase}", self.phase);
        self.phase = phase;
    }

    /// Returns the current language
    pub fn language(&self) -> Language {
        self.language
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Returns the active question set in ladder order
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub(crate) fn set_questions(&mut self, questions: Vec<QuestionRecord>) {
        self.questions = questions;
    }

    /// Returns the ids of the active question set, in ladder order
    pub fn question_ids(&self) -> Vec<u32> {
        self.questions.iter().map(QuestionRecord::id).collect()
    }

    /// Returns the current level (1-based money ladder rung)
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the question the player is currently facing
    ///
    /// `None` when no questions are loaded or the ladder is degraded
    /// and shorter than the current level.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        if self.level == 0 || self.level > self.questions.len() {
            return None;
        }
        Some(&self.questions[self.level - 1])
    }

    /// Whether the player has won the game
    pub fn won(&self) -> bool {
        self.won
    }

    /// Whether the player has lost the game
    pub fn lost(&self) -> bool {
        self.lost
    }

    /// Whether the game has ended either way
    pub fn is_game_over(&self) -> bool {
        self.won || self.lost
    }

    /// Submits an answer to the current question
    ///
    /// A wrong answer marks the game as lost and leaves the level
    /// unchanged. A right answer advances the level by one; answering
    /// the final question clamps the level to the top rung and marks
    /// the game as won. Once the game is over this is a no-op returning
    /// `false`.
    ///
    /// # Returns
    ///
    /// `true` if the answer was correct.
    pub fn answer_question(&mut self, answer: usize) -> bool {
        if self.is_game_over() {
            log::debug!("ignoring answer {answer}: game is already over");
            return false;
        }

        let Some(question) = self.current_question() else {
            log::warn!("no question loaded at level {}", self.level);
            return false;
        };

        if question.correct_answer() != answer {
            self.lost = true;
            return false;
        }

        self.level += 1;
        if self.level >= ladder::SCORE_TABLE.len() {
            self.won = true;
            self.level = ladder::SCORE_TABLE.len() - 1;
        }
        true
    }

    /// Returns the prize amount the current level plays for
    pub fn score(&self) -> u64 {
        ladder::SCORE_TABLE[self.level]
    }

    /// Returns the rung the player falls back to when failing now
    ///
    /// The return value is an index into the score table, not an
    /// amount; see [`fallback_score`](Self::fallback_score) for the
    /// money.
    pub fn fallback_level(&self) -> usize {
        ladder::FALLBACK_TABLE[self.level]
    }

    /// Returns the guaranteed payout when failing at the current level
    pub fn fallback_score(&self) -> u64 {
        ladder::SCORE_TABLE[self.fallback_level()]
    }

    /// Returns the answer indices eliminated by the 50:50 joker
    ///
    /// Empty while the joker is unused. The indices refer to the
    /// question of the round recorded in
    /// [`joker_fifty_level`](Self::joker_fifty_level).
    pub fn eliminated_answers(&self) -> &[usize] {
        &self.eliminated
    }

    /// Returns the level at which the 50:50 joker was invoked
    pub fn joker_fifty_level(&self) -> Option<usize> {
        self.joker_fifty_level
    }

    /// Records the answer pair eliminated by the 50:50 joker
    ///
    /// Refuses to run twice and refuses a pair containing the correct
    /// answer of the current question; both are logged no-ops, the
    /// state stays untouched.
    pub(crate) fn set_eliminated(&mut self, pair: [usize; 2]) {
        if self.joker_fifty_level.is_some() || !self.eliminated.is_empty() {
            log::warn!("50:50 joker already used at level {:?}", self.joker_fifty_level);
            return;
        }
        if let Some(question) = self.current_question() {
            if pair.contains(&question.correct_answer()) {
                log::error!("refusing to eliminate the correct answer {}", question.correct_answer());
                return;
            }
        }
        log::debug!("eliminated answers {pair:?} at level {}", self.level);
        self.eliminated = pair.to_vec();
        self.joker_fifty_level = Some(self.level);
    }

    /// Converts the game state to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never
    /// happen with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    /// A full set of eight questions, correct answer is `tier % 4`
    fn create_test_questions() -> Vec<QuestionRecord> {
        (1..=ladder::LEVELS)
            .map(|tier| {
                QuestionRecord::parse_line(
                    tier as u32,
                    &format!("{tier}; Question {tier}?; A; B; C; D; {}", tier % 4),
                )
                .unwrap()
            })
            .collect()
    }

    fn create_test_state() -> GameState {
        let mut state = GameState::new(Language::English);
        state.set_questions(create_test_questions());
        state
    }

    #[test]
    fn test_new_game_is_fresh() {
        let state = create_test_state();

        assert_eq!(state.phase(), Phase::Begin);
        assert_eq!(state.level(), 1);
        assert!(!state.is_game_over());
        assert!(state.eliminated_answers().is_empty());
        assert_eq!(state.joker_fifty_level(), None);
        assert_eq!(state.score(), 5_000);
        assert_eq!(state.fallback_score(), 0);
    }

    #[test]
    fn test_correct_answer_advances_one_level() {
        let mut state = create_test_state();
        let correct = state.current_question().unwrap().correct_answer();

        assert!(state.answer_question(correct));
        assert_eq!(state.level(), 2);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_wrong_answer_loses_and_keeps_level() {
        let mut state = create_test_state();
        let correct = state.current_question().unwrap().correct_answer();
        let wrong = (correct + 1) % 4;

        assert!(!state.answer_question(wrong));
        assert_eq!(state.level(), 1);
        assert!(state.lost());
        assert!(!state.won());
    }

    #[test]
    fn test_answering_all_questions_wins_with_clamped_level() {
        let mut state = create_test_state();

        for _ in 0..ladder::LEVELS {
            let correct = state.current_question().unwrap().correct_answer();
            assert!(state.answer_question(correct));
        }

        assert!(state.won());
        assert!(!state.lost());
        assert_eq!(state.level(), ladder::LEVELS);
        assert_eq!(state.score(), 1_000_000);
    }

    #[test]
    fn test_answer_after_game_over_is_a_noop() {
        let mut state = create_test_state();
        let correct = state.current_question().unwrap().correct_answer();
        state.answer_question((correct + 1) % 4);

        assert!(!state.answer_question(correct));
        assert_eq!(state.level(), 1);
        assert!(state.lost());
    }

    #[test]
    fn test_fallback_checkpoints() {
        let mut state = create_test_state();
        // climb to level 5, where the checkpoint at tier 4 applies
        for _ in 0..4 {
            let correct = state.current_question().unwrap().correct_answer();
            state.answer_question(correct);
        }

        assert_eq!(state.level(), 5);
        assert_eq!(state.fallback_level(), 1);
        assert_eq!(state.fallback_score(), 5_000);

        let correct = state.current_question().unwrap().correct_answer();
        state.answer_question(correct);
        assert_eq!(state.level(), 6);
        assert_eq!(state.fallback_level(), 4);
        assert_eq!(state.fallback_score(), 50_000);
    }

    #[test]
    fn test_set_eliminated_records_pair_and_level() {
        let mut state = create_test_state();
        let correct = state.current_question().unwrap().correct_answer();
        // a pair that avoids the correct answer
        let pair = [(correct + 1) % 4, (correct + 2) % 4];

        state.set_eliminated(pair);

        assert_eq!(state.eliminated_answers(), &pair);
        assert_eq!(state.joker_fifty_level(), Some(1));
    }

    #[test]
    fn test_set_eliminated_refuses_reuse() {
        let mut state = create_test_state();
        let correct = state.current_question().unwrap().correct_answer();
        let pair = [(correct + 1) % 4, (correct + 2) % 4];

        state.set_eliminated(pair);
        state.set_eliminated([(correct + 2) % 4, (correct + 3) % 4]);

        assert_eq!(state.eliminated_answers(), &pair);
        assert_eq!(state.joker_fifty_level(), Some(1));
    }

    #[test]
    fn test_set_eliminated_refuses_the_correct_answer() {
        let mut state = create_test_state();
        let correct = state.current_question().unwrap().correct_answer();

        state.set_eliminated([correct, (correct + 1) % 4]);

        assert!(state.eliminated_answers().is_empty());
        assert_eq!(state.joker_fifty_level(), None);
    }

    #[test]
    fn test_to_message_is_json() {
        let state = create_test_state();
        let message = state.to_message();

        assert!(message.contains("\"phase\""));
        assert!(message.contains("Begin"));
        assert!(message.contains("English"));
    }
}
