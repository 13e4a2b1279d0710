//! Peak and fall-off detection
//!
//! The peak is the first index holding the highest known score. Scanning
//! forward from it, the fall is the first index where any decay condition
//! trips:
//!
//! - adjacent drop: the previous and current scores are known and fell by at
//!   least `adjacent_drop`
//! - cumulative drop: the current score is known and sits at least
//!   `cumulative_drop` below the peak
//! - rolling window: the `window_size` scores ending here are all known and
//!   their mean is below `window_avg_threshold`
//!
//! A window containing an unknown score is skipped, not treated as failing.

use crate::config::FallConfig;
use serde::{Deserialize, Serialize};

/// Peak/fall outcome for one score sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakFall {
    pub peak_index: Option<usize>,
    pub fall_index: Option<usize>,
    pub good_run_length: usize,
}

impl PeakFall {
    fn none() -> Self {
        Self {
            peak_index: None,
            fall_index: None,
            good_run_length: 0,
        }
    }
}

/// Which decay condition ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallTrigger {
    AdjacentDrop,
    CumulativeDrop,
    RollingAverage,
}

/// Index and value of the highest known score, first occurrence on ties
pub fn find_peak(scores: &[Option<f64>]) -> Option<(usize, f64)> {
    scores
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.map(|v| (i, v)))
        .fold(None, |best, (i, v)| match best {
            Some((_, best_v)) if v <= best_v => best,
            _ => Some((i, v)),
        })
}

/// Evaluate the decay conditions at index `i`
///
/// Conditions are checked in a fixed order and the first one that holds is
/// reported. Index 0 has no predecessor and never trips; an index past the
/// end yields `None`.
pub fn fall_trigger_at(
    scores: &[Option<f64>],
    i: usize,
    peak_value: f64,
    cfg: &FallConfig,
) -> Option<FallTrigger> {
    let prev = *scores.get(i.checked_sub(1)?)?;
    let cur = *scores.get(i)?;

    if let (Some(cur), Some(prev)) = (cur, prev) {
        if prev - cur >= cfg.adjacent_drop {
            return Some(FallTrigger::AdjacentDrop);
        }
    }

    if let Some(cur) = cur {
        if peak_value - cur >= cfg.cumulative_drop {
            return Some(FallTrigger::CumulativeDrop);
        }
    }

    if let Some(mean) = full_window_mean(scores, i, cfg.window_size) {
        if mean < cfg.window_avg_threshold {
            return Some(FallTrigger::RollingAverage);
        }
    }

    None
}

/// Mean of the `k` scores ending at `end`, only when all of them are known
/// and the window fits inside the sequence
fn full_window_mean(scores: &[Option<f64>], end: usize, k: usize) -> Option<f64> {
    if k == 0 || end + 1 < k {
        return None;
    }
    let window = scores.get(end + 1 - k..=end)?;
    let sum = window.iter().try_fold(0.0, |acc, s| s.map(|v| acc + v))?;
    Some(sum / k as f64)
}

/// Locate the peak and the first fall after it
pub fn detect(scores: &[Option<f64>], cfg: &FallConfig) -> PeakFall {
    let Some((peak_index, peak_value)) = find_peak(scores) else {
        return PeakFall::none();
    };

    let fall_index = (peak_index + 1..scores.len())
        .find(|&i| fall_trigger_at(scores, i, peak_value, cfg).is_some());

    PeakFall {
        peak_index: Some(peak_index),
        fall_index,
        good_run_length: fall_index.unwrap_or(scores.len()),
    }
}
