//! Sound boundary
//!
//! Audio playback is fire-and-forget: the controller names an asset and
//! moves on, it never awaits completion and never sees playback errors.
//! Implementations log their own failures. There is one looping slot
//! for background music; starting a new loop releases the previous one.

/// Trait for playing named audio assets
pub trait Sound {
    /// Plays a one-shot sound effect
    fn play(&mut self, name: &str);

    /// Loops a sound until [`stop`](Self::stop) or the next loop
    ///
    /// Implementations hold at most one looping sound; calling this
    /// while a loop is active releases the old loop first.
    fn play_looping(&mut self, name: &str);

    /// Stops the looping sound, if one is active
    fn stop(&mut self);
}

/// A [`Sound`] implementation that plays nothing
///
/// Useful for headless runs and tests that do not care about audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSound;

impl Sound for NullSound {
    fn play(&mut self, name: &str) {
        log::debug!("sound (muted): {name}");
    }

    fn play_looping(&mut self, name: &str) {
        log::debug!("looping sound (muted): {name}");
    }

    fn stop(&mut self) {
        log::debug!("sound stopped (muted)");
    }
}
