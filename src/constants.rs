//! Configuration constants for the quiz game
//!
//! This module contains the money ladder tables, timing defaults and
//! data-format limits used throughout the game so all components agree
//! on the same boundaries.

/// Money ladder configuration constants
pub mod ladder {
    /// Prize table, one entry per rung. Index 0 is "no question answered
    /// yet", index N is the prize after N correct answers.
    pub const SCORE_TABLE: [u64; 9] = [
        0, 5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000,
    ];
    /// Guaranteed-payout table. The entry at level N is an index back
    /// into [`SCORE_TABLE`] naming the rung the player falls back to on
    /// a wrong answer (safe checkpoints after levels 1 and 4).
    pub const FALLBACK_TABLE: [usize; 9] = [0, 0, 1, 1, 1, 4, 4, 4, 4];
    /// Number of questions in a full game, one per difficulty tier
    pub const LEVELS: usize = SCORE_TABLE.len() - 1;
}

/// Question database format constants
pub mod database {
    /// Field separator in the question database files
    pub const SPLIT: char = ';';
    /// Number of `;`-separated fields in a well-formed record line
    pub const FIELDS: usize = 7;
    /// Number of answers per question
    pub const ANSWER_COUNT: usize = 4;
}

/// Timing constants for the game state machine
pub mod timing {
    use std::time::Duration;

    /// Fixed period of the game logic tick
    pub const TICK_PERIOD: Duration = Duration::from_millis(50);
    /// How long the intro screen is shown before the first question
    pub const BEGIN_TIMEOUT: Duration = Duration::from_millis(4000);
    /// How long the right-answer celebration is shown
    pub const RIGHT_ANSWER_TIMEOUT: Duration = Duration::from_millis(1000);
    /// How long the wrong-answer screen is shown before game over
    pub const WRONG_ANSWER_TIMEOUT: Duration = Duration::from_millis(2000);
    /// How long a joker animation is shown before returning to the question
    pub const JOKER_TIMEOUT: Duration = Duration::from_millis(1500);
    /// Minimum accepted phase timeout in seconds
    pub const MIN_PHASE_TIMEOUT: u64 = 0;
    /// Maximum accepted phase timeout in seconds
    pub const MAX_PHASE_TIMEOUT: u64 = 60;
}

/// Command queue configuration constants
pub mod commands {
    /// How many pending presentation commands are stored at most.
    /// Further commands are dropped until the logic thread catches up.
    pub const QUEUE_CAPACITY: usize = 30;
}

/// Sound asset names handed to the [`Sound`](crate::sound::Sound) collaborator
pub mod assets {
    /// Startup jingle played on every (re)start
    pub const INTRO: &str = "intro.wav";
    /// Looping background music during the question rounds
    pub const BACKGROUND: &str = "background.wav";
    /// Fanfare for answering the final question correctly
    pub const WON: &str = "won.wav";
    /// Buzzer for a wrong answer
    pub const LOST: &str = "lost.wav";
    /// Pool of correct-answer sounds, one is chosen at random
    pub const CORRECT: [&str; 3] = ["correct1.wav", "correct2.wav", "correct3.wav"];
}
