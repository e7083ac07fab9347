//! Presentation boundary
//!
//! This module defines the trait the game controller uses to push state
//! snapshots to whatever renders the game. The implementation (a GUI, a
//! terminal, a test recorder) is opaque to the controller; commands in
//! the other direction travel through the
//! [`CommandSender`](crate::scheduler::CommandSender) queue, so there is
//! no observer list on either side, just one listener each way.

use web_time::Instant;

use crate::{game::GameState, language::LanguagePack};

/// Trait for rendering the game state to the user
pub trait Presentation {
    /// Delivers one state snapshot after a logic tick
    ///
    /// Called once per tick, after all pending commands have been
    /// processed and time-based transitions have been evaluated.
    ///
    /// # Arguments
    ///
    /// * `game` - The current game state
    /// * `tick` - The monotonic time sample of this tick
    /// * `dt` - Seconds since the last phase change (0.0 right after one)
    /// * `force_redraw` - Redraw everything regardless of dirtiness;
    ///   asserted exactly when the language changed this tick
    fn update(&mut self, game: &GameState, tick: Instant, dt: f32, force_redraw: bool);

    /// Announces the active language so localized UI text refreshes
    ///
    /// Called on every restart and on every language switch, before the
    /// next `update`.
    fn set_language(&mut self, pack: &LanguagePack, game: &GameState);
}
