use std::sync::atomic::Ordering;

use crate::error::Result;
use crate::train::step_stats::StepStats;
use crate::train::train_config::PlayConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Repeatedly calls `step` and returns the stats of the last completed step.
///
/// `step` performs one training iteration; typically `|| playground.step()`,
/// or a closure that locks a shared `Playground` for the duration of a single
/// step so observers can read it between steps. Steps never overlap: the next
/// one starts only after the previous one returned.
///
/// # Termination
/// The loop ends when:
/// - `config.iterations` steps have completed,
/// - the `progress_tx` receiver has been dropped,
/// - `config.stop_flag` is set (checked before every step), **or**
/// - `step` returns an error, which is propagated.
pub fn play_loop<F>(mut step: F, config: &PlayConfig) -> Result<Option<StepStats>>
where
    F: FnMut() -> Result<StepStats>,
{
    let mut last = None;
    let mut completed = 0usize;

    loop {
        if let Some(limit) = config.iterations {
            if completed >= limit {
                break;
            }
        }
        if is_stopped(config) {
            break;
        }

        let stats = step()?;
        completed += 1;
        last = Some(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop playing.
            if tx.send(stats).is_err() {
                break;
            }
        }

        if !config.interval.is_zero() && !is_stopped(config) {
            std::thread::sleep(config.interval);
        }
    }

    log::debug!("play loop finished after {completed} step(s)");
    Ok(last)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn is_stopped(config: &PlayConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}
