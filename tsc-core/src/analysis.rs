//! Per-sequence analysis: fuse scores, find peak and fall, pick the best
//! streak and reshape everything into a [`RunResult`]
//!
//! Every call is stateless. Given the same items and configuration the output
//! is identical; sequences can be analyzed in parallel by the caller.

use crate::config::AnalysisConfig;
use crate::fall::{self, PeakFall};
use crate::fusion;
use crate::models::{Item, RunResult};
use crate::sequence::{group_sequences, Sequence};
use crate::streak::{self, StreakCandidate};
use crate::Result;
use tracing::{debug, warn};

/// Number of leading items averaged into `avg_first_n`
pub const LEADING_ITEMS: usize = 3;

/// Fused score for every item, in sequence order
pub fn score_sequence(sequence: &Sequence, config: &AnalysisConfig) -> Vec<Option<f64>> {
    let fusion = &config.fusion;
    sequence
        .items
        .iter()
        .map(|item| {
            fusion::fuse(
                &item.signals,
                fusion.policy,
                fusion.min_imdb_votes,
                fusion.blend_alpha,
            )
        })
        .collect()
}

/// Analyze one sequence
///
/// Fails only when `config` violates its contract.
pub fn analyze_sequence(sequence: &Sequence, config: &AnalysisConfig) -> Result<RunResult> {
    config.validate()?;
    Ok(analyze_validated(sequence, config))
}

/// Group a catalog into franchise sequences and analyze each of them
///
/// Results are ordered by franchise id, then name.
pub fn analyze_catalog(items: Vec<Item>, config: &AnalysisConfig) -> Result<Vec<RunResult>> {
    config.validate()?;
    Ok(group_sequences(items)
        .iter()
        .map(|sequence| analyze_validated(sequence, config))
        .collect())
}

fn analyze_validated(sequence: &Sequence, config: &AnalysisConfig) -> RunResult {
    let scores = score_sequence(sequence, config);
    let peak_fall = fall::detect(&scores, &config.fall);

    let flags = streak::good_flags(
        &scores,
        config.streak.good_threshold,
        config.streak.origin_grace,
    );
    let best = streak::select(
        &scores,
        &flags,
        config.streak.min_length,
        config.streak.origin_bias,
    );

    if peak_fall.peak_index.is_none() && !scores.is_empty() {
        warn!(
            "Franchise '{}' ({}) has no known scores under policy '{}'",
            sequence.franchise.name, sequence.franchise.id, config.fusion.policy
        );
    }
    debug!(
        "Franchise '{}': peak={:?} fall={:?} streak={:?}",
        sequence.franchise.name,
        peak_fall.peak_index,
        peak_fall.fall_index,
        best.map(|s| (s.start, s.end))
    );

    summarize(sequence, scores, &flags, peak_fall, best, config)
}

/// Compose detector and selector outputs into the per-sequence result
pub fn summarize(
    sequence: &Sequence,
    scores: Vec<Option<f64>>,
    flags: &[bool],
    peak_fall: PeakFall,
    best: Option<StreakCandidate>,
    config: &AnalysisConfig,
) -> RunResult {
    let score_at = |index: Option<usize>| index.and_then(|i| scores.get(i).copied().flatten());
    let cliff_drop = match (score_at(peak_fall.peak_index), score_at(peak_fall.fall_index)) {
        (Some(peak), Some(fall)) => Some(peak - fall),
        _ => None,
    };

    let title_at = |index: Option<usize>| {
        index
            .and_then(|i| sequence.title_at(i))
            .map(str::to_string)
    };

    let leading = LEADING_ITEMS.min(scores.len());

    RunResult {
        franchise: sequence.franchise.clone(),
        item_count: sequence.len(),
        good_run_length: peak_fall.good_run_length,
        peak_index: peak_fall.peak_index,
        peak_title: title_at(peak_fall.peak_index),
        fall_index: peak_fall.fall_index,
        fall_title: title_at(peak_fall.fall_index),
        cliff_drop,
        avg_first_n: streak::mean_known(&scores[..leading]),
        avg_all: streak::mean_known(&scores),
        has_missing_scores: scores.iter().any(Option::is_none),
        streak_start: best.map(|s| s.start),
        streak_end: best.map(|s| s.end),
        streak_length: best.map_or(0, |s| s.len()),
        streak_avg: best.and_then(|s| s.avg),
        good_indices: flags
            .iter()
            .enumerate()
            .filter_map(|(i, &good)| good.then_some(i))
            .collect(),
        good_threshold: config.streak.good_threshold,
        scores,
    }
}
