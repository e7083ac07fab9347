//! Tick scheduling and the presentation-facing command queue
//!
//! The presentation thread talks to the game logic exclusively through
//! a [`CommandSender`]: a bounded, lossy FIFO queue. The [`Ticker`]
//! owns a [`GameController`] on a dedicated thread and calls
//! [`tick`](GameController::tick) at a fixed rate, correcting for
//! drift so long-running sessions do not slowly fall behind.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, SyncSender, TrySendError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use web_time::Instant;

use crate::controller::{GameController, GameError};

/// Sending half of the bounded command queue
///
/// Cheap to clone; every clone feeds the same queue. Sending never
/// blocks: when the queue is full the command is dropped with a
/// warning, which keeps an unresponsive game logic from freezing the
/// presentation.
#[derive(Debug, Clone)]
pub struct CommandSender {
    sender: SyncSender<String>,
}

impl CommandSender {
    pub(crate) fn new(capacity: usize) -> (Self, Receiver<String>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self { sender }, receiver)
    }

    /// Queues one command for the next tick
    pub fn send(&self, command: impl Into<String>) {
        match self.sender.try_send(command.into()) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                log::warn!("too many pending commands, dropping `{command}`");
            }
            Err(TrySendError::Disconnected(command)) => {
                log::warn!("game logic is gone, dropping `{command}`");
            }
        }
    }
}

/// Drives a [`GameController`] at a fixed tick rate on its own thread
///
/// The thread runs until [`stop`](Self::stop) is called or the ticker
/// is dropped.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<GameController>>,
}

impl Ticker {
    /// Spawns the tick thread
    ///
    /// `period` is the wall-clock time between ticks. The loop sleeps
    /// until the next tick deadline rather than for a fixed duration,
    /// so a slow tick shortens the following sleep instead of shifting
    /// every later tick.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Spawn`] when the OS refuses the thread.
    pub fn spawn(mut controller: GameController, period: Duration) -> Result<Self, GameError> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("game-logic".to_owned())
            .spawn(move || {
                let mut deadline = Instant::now();
                while !flag.load(Ordering::Relaxed) {
                    controller.tick(Instant::now());

                    deadline += period;
                    let now = Instant::now();
                    if deadline > now {
                        thread::sleep(deadline - now);
                    } else {
                        // too far behind to catch up, reset the schedule
                        deadline = now;
                    }
                }
                controller
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stops the tick thread and hands the controller back
    ///
    /// Returns `None` when the thread panicked.
    pub fn stop(mut self) -> Option<GameController> {
        self.stop.store(true, Ordering::Relaxed);
        self.handle.take().and_then(|handle| handle.join().ok())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("game logic thread panicked");
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::{
        fmt::Write as _,
        sync::Mutex,
    };

    use crate::{
        constants::ladder,
        controller::Timings,
        game::{GameState, Phase},
        language::{Language, LanguagePack},
        sound::NullSound,
        store::QuestionStore,
        view::Presentation,
    };

    #[test]
    fn test_commands_arrive_in_fifo_order() {
        let (sender, receiver) = CommandSender::new(8);

        sender.send("button0");
        sender.send("button1");
        sender.send("restart");

        let received: Vec<String> = receiver.try_iter().collect();
        assert_eq!(received, vec!["button0", "button1", "restart"]);
    }

    #[test]
    fn test_full_queue_drops_new_commands() {
        let (sender, receiver) = CommandSender::new(2);

        sender.send("first");
        sender.send("second");
        sender.send("overflow");

        let received: Vec<String> = receiver.try_iter().collect();
        assert_eq!(received, vec!["first", "second"]);
    }

    #[test]
    fn test_clones_feed_the_same_queue() {
        let (sender, receiver) = CommandSender::new(8);
        let clone = sender.clone();

        sender.send("a");
        clone.send("b");

        let received: Vec<String> = receiver.try_iter().collect();
        assert_eq!(received, vec!["a", "b"]);
    }

    struct CountingPresentation {
        updates: Arc<Mutex<usize>>,
    }

    impl Presentation for CountingPresentation {
        fn update(&mut self, _game: &GameState, _tick: Instant, _dt: f32, _force_redraw: bool) {
            *self.updates.lock().unwrap() += 1;
        }

        fn set_language(&mut self, _pack: &LanguagePack, _game: &GameState) {}
    }

    fn create_test_store() -> QuestionStore {
        let dir = std::env::temp_dir().join(format!(
            "millionaire-scheduler-{}-{:016x}",
            std::process::id(),
            fastrand::u64(..)
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let mut english = String::new();
        for tier in 1..=ladder::LEVELS {
            writeln!(
                english,
                "{tier}; Question {tier}?; A; B; C; D; {}",
                tier % 4
            )
            .unwrap();
        }
        std::fs::write(dir.join("en.qdb"), english).unwrap();
        QuestionStore::new(dir)
    }

    #[test]
    fn test_ticker_runs_the_controller_and_stops_on_demand() {
        let updates = Arc::new(Mutex::new(0));
        let (mut controller, _sender) = GameController::with_timings(
            create_test_store(),
            Box::new(CountingPresentation {
                updates: Arc::clone(&updates),
            }),
            Box::new(NullSound),
            Timings {
                begin: Duration::ZERO,
                ..Timings::default()
            },
        )
        .unwrap();
        controller.restart(Language::English).unwrap();

        let ticker = Ticker::spawn(controller, Duration::from_millis(5)).unwrap();
        thread::sleep(Duration::from_millis(100));
        let controller = ticker.stop().unwrap();

        // the zero-length intro timed out on one of the ticks
        assert_eq!(controller.game().phase(), Phase::Asking);
        assert!(*updates.lock().unwrap() > 1);
    }
}
