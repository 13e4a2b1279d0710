//! End-to-end pipeline: load, filter, analyze, report

use crate::args::Args;
use crate::input::load_items;
use crate::output::write_reports;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use tracing::info;
use tsc_core::catalog::{apply_filters, rank_franchises};
use tsc_core::config::TomlConfig;
use tsc_core::analyze_catalog;

/// What a pipeline run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub items_loaded: usize,
    pub items_analyzed: usize,
    pub franchises: usize,
    pub written: Vec<PathBuf>,
}

/// Run the pipeline with an already-resolved configuration
pub fn execute(args: &Args, config: &TomlConfig) -> Result<RunReport> {
    let analysis = &config.analysis;
    analysis
        .validate()
        .context("Refusing to analyze with an invalid configuration")?;

    info!(
        "[Ratings] source={} min_imdb_votes={} blend_alpha={}",
        analysis.fusion.policy, analysis.fusion.min_imdb_votes, analysis.fusion.blend_alpha
    );
    info!(
        "[Fall] adj={} cum={} k={} thresh={}",
        analysis.fall.adjacent_drop,
        analysis.fall.cumulative_drop,
        analysis.fall.window_size,
        analysis.fall.window_avg_threshold
    );
    info!(
        "[Streaks] good_threshold={} first_film_grace={} min_streak_len={} origin_bias={}",
        analysis.streak.good_threshold,
        analysis.streak.origin_grace,
        analysis.streak.min_length,
        analysis.streak.origin_bias
    );

    let items = load_items(&args.input)?;
    let items_loaded = items.len();
    info!("[Load] {} items from {}", items_loaded, args.input.display());

    let as_of: NaiveDate = args.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let filtered = apply_filters(items, &config.catalog, as_of);
    if filtered.unreleased_removed > 0 {
        info!(
            "[Filter] Excluded {} unreleased items (as of {})",
            filtered.unreleased_removed, as_of
        );
    }
    if filtered.franchises_removed > 0 {
        info!(
            "[Filter] Dropped {} franchises with fewer than {} items",
            filtered.franchises_removed, config.catalog.min_items
        );
    }

    let franchises = rank_franchises(&filtered.items);
    let items_analyzed = filtered.items.len();
    let runs = analyze_catalog(filtered.items, analysis)?;
    info!("[Analyze] {} franchises, {} items", runs.len(), items_analyzed);

    let written = write_reports(&args.out_dir, &runs, &franchises)?;

    Ok(RunReport {
        items_loaded,
        items_analyzed,
        franchises: runs.len(),
        written,
    })
}
