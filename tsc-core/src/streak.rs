//! Best streak of "good" items
//!
//! An item is good when its score is known and reaches the threshold; the
//! first item gets `origin_grace` points of slack. Maximal blocks of good
//! items at least `min_length` long are candidates, ranked by
//! [`compare_candidates`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Averages closer than this are treated as tied
pub const AVG_TIE_EPSILON: f64 = 1e-9;

/// A maximal block of good items, inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakCandidate {
    pub start: usize,
    pub end: usize,

    /// Mean of the known scores inside the block
    pub avg: Option<f64>,
}

impl StreakCandidate {
    /// Candidate for the inclusive block `start..=end`; `None` when the bounds
    /// are reversed or run past `scores`
    pub fn from_block(scores: &[Option<f64>], start: usize, end: usize) -> Option<Self> {
        if start > end {
            return None;
        }
        let block = scores.get(start..=end)?;
        Some(Self {
            start,
            end,
            avg: mean_known(block),
        })
    }

    /// Number of items covered; 0 for reversed bounds
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    /// Average used for ranking only; `origin_bias` is added when the block
    /// starts at the first item
    fn ranking_avg(&self, origin_bias: f64) -> f64 {
        let bias = if self.start == 0 { origin_bias } else { 0.0 };
        self.avg.unwrap_or(f64::NEG_INFINITY) + bias
    }
}

/// Mean of the known values, `None` when nothing is known
pub fn mean_known(scores: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = scores
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Per-item good flags
///
/// Index 0 is judged against `base_threshold - origin_grace`, every other
/// index against `base_threshold`.
pub fn good_flags(scores: &[Option<f64>], base_threshold: f64, origin_grace: f64) -> Vec<bool> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let threshold = if i == 0 {
                base_threshold - origin_grace
            } else {
                base_threshold
            };
            matches!(score, Some(v) if *v >= threshold)
        })
        .collect()
}

/// Maximal runs of `true`, as inclusive `(start, end)` pairs
pub fn good_blocks(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    for (i, &good) in flags.iter().enumerate() {
        match (good, open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                blocks.push((start, i - 1));
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        blocks.push((start, flags.len() - 1));
    }

    blocks
}

/// Rank two candidates; `Greater` means `a` should win over `b`
///
/// 1. longer block wins
/// 2. higher biased average wins
/// 3. averages within [`AVG_TIE_EPSILON`]: lower start wins
pub fn compare_candidates(a: &StreakCandidate, b: &StreakCandidate, origin_bias: f64) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        let (x, y) = (a.ranking_avg(origin_bias), b.ranking_avg(origin_bias));
        if x == y || (x - y).abs() < AVG_TIE_EPSILON {
            b.start.cmp(&a.start)
        } else if x > y {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    })
}

/// Pick the best streak, if any block is long enough
///
/// The reported candidate carries its unbiased average.
pub fn select(
    scores: &[Option<f64>],
    flags: &[bool],
    min_length: usize,
    origin_bias: f64,
) -> Option<StreakCandidate> {
    good_blocks(flags)
        .into_iter()
        .filter_map(|(start, end)| StreakCandidate::from_block(scores, start, end))
        .filter(|c| c.len() >= min_length)
        .fold(None, |best: Option<StreakCandidate>, candidate| match best {
            Some(b) if compare_candidates(&candidate, &b, origin_bias) != Ordering::Greater => {
                Some(b)
            }
            _ => Some(candidate),
        })
}
