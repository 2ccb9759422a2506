use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use playground_nn::{Playground, StepStats};

// ---------------------------------------------------------------------------
// Player status
// ---------------------------------------------------------------------------

pub enum PlayerStatus {
    /// No background training.
    Paused,
    /// A player thread is stepping the playground until `stop_flag` is set.
    Playing { stop_flag: Arc<AtomicBool> },
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// The one playground session served by this studio. Every step runs
    /// while holding the state lock, so steps never overlap.
    pub playground: Playground,
    pub player: PlayerStatus,
    /// Open SSE streams; each receives a copy of every step's stats.
    subscribers: Vec<mpsc::Sender<StepStats>>,
}

impl StudioState {
    pub fn new(playground: Playground) -> Self {
        StudioState {
            playground,
            player: PlayerStatus::Paused,
            subscribers: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.player, PlayerStatus::Playing { .. })
    }

    /// Registers a new SSE stream and returns its receiving end.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StepStats> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `stats` to every open stream, dropping the ones whose receiver
    /// has gone away.
    pub fn broadcast(&mut self, stats: &StepStats) {
        self.subscribers.retain(|tx| tx.send(stats.clone()).is_ok());
    }

    /// Runs one training step and broadcasts its stats.
    pub fn step(&mut self) -> playground_nn::Result<StepStats> {
        let stats = self.playground.step()?;
        self.broadcast(&stats);
        Ok(stats)
    }

    /// Player step: checks `stop_flag` again under the lock, so no step runs
    /// after `/pause` has answered. A stopped player gets the current stats
    /// back without training.
    pub fn step_unless_stopped(&mut self, stop_flag: &AtomicBool) -> playground_nn::Result<StepStats> {
        if stop_flag.load(Ordering::Relaxed) {
            return Ok(self.playground.state().stats(0));
        }
        self.step()
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

/// Locks the shared state, recovering the guard if a previous holder
/// panicked.
pub fn lock(state: &SharedState) -> MutexGuard<'_, StudioState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
