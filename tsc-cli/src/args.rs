//! Command-line arguments and their application on top of the config file

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tsc_core::config::TomlConfig;
use tsc_core::FusionPolicy;

/// Command-line arguments for tsc
#[derive(Parser, Debug, Clone)]
#[command(name = "tsc")]
#[command(about = "Find where franchises peak, fall off, and shine")]
#[command(version)]
pub struct Args {
    /// JSON file holding the catalog items
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory for franchise_runs.csv and JSON reports
    #[arg(short, long, default_value = "./out", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// TOML config file (overrides TSC_CONFIG and the user config)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fusion policy: auto, rt, rt_audience, rt_only, rt_audience_only,
    /// imdb, tmdb, blended, blended_rt_tmdb, blended_rt_imdb
    #[arg(long, value_name = "POLICY")]
    pub rating_source: Option<FusionPolicy>,

    /// IMDb ratings with fewer votes are ignored
    #[arg(long)]
    pub min_imdb_votes: Option<u64>,

    /// Weight of the first signal in blended policies (0-1)
    #[arg(long)]
    pub blend_alpha: Option<f64>,

    /// Adjacent drop that counts as a fall
    #[arg(long)]
    pub fall_adj: Option<f64>,

    /// Drop below the peak that counts as a fall
    #[arg(long)]
    pub fall_cum: Option<f64>,

    /// Rolling window width
    #[arg(long)]
    pub fall_k: Option<usize>,

    /// Rolling window average below which the run has fallen
    #[arg(long)]
    pub fall_thresh: Option<f64>,

    /// Score an item needs to count as good
    #[arg(long)]
    pub good_threshold: Option<f64>,

    /// Points of slack for the first item
    #[arg(long)]
    pub first_film_grace: Option<f64>,

    /// Shortest streak worth reporting
    #[arg(long)]
    pub min_streak_len: Option<usize>,

    /// Do not favour streaks that start at the first item
    #[arg(long)]
    pub no_prefer_origin: bool,

    /// Drop franchises with fewer items than this
    #[arg(long)]
    pub min_movies: Option<usize>,

    /// Keep unreleased items and items without a release date
    #[arg(long)]
    pub include_future: bool,

    /// Reference date for the release filter (defaults to today, UTC)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,
}

impl Args {
    /// Overlay command-line values onto the loaded configuration
    pub fn apply_to(&self, config: &mut TomlConfig) {
        let analysis = &mut config.analysis;

        if let Some(policy) = self.rating_source {
            analysis.fusion.policy = policy;
        }
        if let Some(votes) = self.min_imdb_votes {
            analysis.fusion.min_imdb_votes = votes;
        }
        if let Some(alpha) = self.blend_alpha {
            analysis.fusion.blend_alpha = alpha;
        }

        if let Some(v) = self.fall_adj {
            analysis.fall.adjacent_drop = v;
        }
        if let Some(v) = self.fall_cum {
            analysis.fall.cumulative_drop = v;
        }
        if let Some(k) = self.fall_k {
            analysis.fall.window_size = k;
        }
        if let Some(v) = self.fall_thresh {
            analysis.fall.window_avg_threshold = v;
        }

        if let Some(v) = self.good_threshold {
            analysis.streak.good_threshold = v;
        }
        if let Some(v) = self.first_film_grace {
            analysis.streak.origin_grace = v;
        }
        if let Some(n) = self.min_streak_len {
            analysis.streak.min_length = n;
        }
        if self.no_prefer_origin {
            analysis.streak.origin_bias = 0.0;
        }

        if let Some(n) = self.min_movies {
            config.catalog.min_items = n;
        }
        if self.include_future {
            config.catalog.include_unreleased = true;
        }
    }
}
