use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Training statistics emitted after every step.
///
/// `play_loop` sends one of these per completed step when a `progress_tx`
/// channel is configured; the studio's SSE handler forwards them to the
/// browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStats {
    /// Number of completed passes over the training set.
    pub iter: usize,
    /// Mean half squared error over the training points.
    pub train_loss: f64,
    /// Mean half squared error over the test points.
    pub test_loss: f64,
    /// Wall-clock duration of the step in milliseconds.
    pub elapsed_ms: u64,
}

/// Number of entries a `LossHistory` keeps.
pub const LOSS_HISTORY_LEN: usize = 50;

/// Rolling window of the most recent losses, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LossHistory {
    entries: VecDeque<StepStats>,
}

impl LossHistory {
    pub fn new() -> Self {
        LossHistory::default()
    }

    /// Appends `stats`, dropping the oldest entry when full. A stats value for
    /// iteration 0 marks a fresh run and clears the window first.
    pub fn record(&mut self, stats: StepStats) {
        if stats.iter == 0 {
            self.entries.clear();
        }
        if self.entries.len() >= LOSS_HISTORY_LEN {
            self.entries.pop_front();
        }
        self.entries.push_back(stats);
    }

    pub fn latest(&self) -> Option<&StepStats> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepStats> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
