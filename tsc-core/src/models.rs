//! Data model shared by the analysis engine and its collaborators
//!
//! Items arrive from an acquisition collaborator with whatever signals it
//! could find. Every signal is independently optional: absence means
//! "unknown", never zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Franchise (collection) identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FranchiseRef {
    pub id: u64,
    pub name: String,
}

/// Raw per-source quality signals for one item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signals {
    /// Critic score, percent (0-100)
    pub rt_critic_pct: Option<f64>,

    /// Audience score, percent (0-100)
    pub rt_audience_pct: Option<f64>,

    /// IMDb rating already scaled to 0-100
    pub imdb_rating_100: Option<f64>,

    /// IMDb vote count, used as a reliability gate for `imdb_rating_100`
    pub imdb_votes: Option<u64>,

    /// TMDb vote average on its native 0-10 scale
    pub tmdb_vote_average: Option<f64>,

    /// TMDb vote count
    pub tmdb_vote_count: Option<u64>,
}

/// One release within a franchise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub franchise: FranchiseRef,
    pub title: String,

    /// Release date; unknown dates sort after every known date
    #[serde(default)]
    pub release_date: Option<NaiveDate>,

    /// Provider popularity metric, used only for franchise ranking
    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub signals: Signals,
}

/// Per-sequence analysis output
///
/// All indices refer to positions in the ordered [`crate::Sequence`] the
/// result was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub franchise: FranchiseRef,
    pub item_count: usize,

    /// Items before the fall point (whole sequence when nothing fell)
    pub good_run_length: usize,

    pub peak_index: Option<usize>,
    pub peak_title: Option<String>,
    pub fall_index: Option<usize>,
    pub fall_title: Option<String>,

    /// Peak score minus fall score, when both are known
    pub cliff_drop: Option<f64>,

    /// Mean of known scores among the first three items
    pub avg_first_n: Option<f64>,
    pub avg_all: Option<f64>,
    pub has_missing_scores: bool,

    pub streak_start: Option<usize>,
    pub streak_end: Option<usize>,
    pub streak_length: usize,

    /// Unbiased mean of the winning streak
    pub streak_avg: Option<f64>,

    pub good_indices: Vec<usize>,

    /// Base threshold before the origin grace is applied
    pub good_threshold: f64,

    /// Fused score per item, in sequence order
    pub scores: Vec<Option<f64>>,
}
