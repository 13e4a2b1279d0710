//! Score fusion - one comparable 0-100 score per item
//!
//! Each item carries up to four independent quality signals. A
//! [`FusionPolicy`] decides which of them count and in what order; the
//! result is either a finite score or unknown.

use crate::models::Signals;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule for combining an item's signals into one score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionPolicy {
    /// Critic, then IMDb, then TMDb; first known wins
    #[default]
    Auto,

    /// Critic score, falling back to TMDb then IMDb
    Rt,

    /// Audience score, falling back to TMDb then IMDb
    RtAudience,

    /// Critic score only, no fallback
    RtOnly,

    /// Audience score only, no fallback
    RtAudienceOnly,

    /// IMDb only, and only when it clears the vote gate
    Imdb,

    /// TMDb vote average only
    Tmdb,

    /// IMDb blended with TMDb
    Blended,

    /// Critic score blended with TMDb
    BlendedRtTmdb,

    /// Critic score blended with IMDb
    BlendedRtImdb,
}

impl FusionPolicy {
    pub const ALL: [FusionPolicy; 10] = [
        FusionPolicy::Auto,
        FusionPolicy::Rt,
        FusionPolicy::RtAudience,
        FusionPolicy::RtOnly,
        FusionPolicy::RtAudienceOnly,
        FusionPolicy::Imdb,
        FusionPolicy::Tmdb,
        FusionPolicy::Blended,
        FusionPolicy::BlendedRtTmdb,
        FusionPolicy::BlendedRtImdb,
    ];

    /// Canonical name, as accepted on the command line and in TOML
    pub fn as_str(&self) -> &'static str {
        match self {
            FusionPolicy::Auto => "auto",
            FusionPolicy::Rt => "rt",
            FusionPolicy::RtAudience => "rt_audience",
            FusionPolicy::RtOnly => "rt_only",
            FusionPolicy::RtAudienceOnly => "rt_audience_only",
            FusionPolicy::Imdb => "imdb",
            FusionPolicy::Tmdb => "tmdb",
            FusionPolicy::Blended => "blended",
            FusionPolicy::BlendedRtTmdb => "blended_rt_tmdb",
            FusionPolicy::BlendedRtImdb => "blended_rt_imdb",
        }
    }
}

impl fmt::Display for FusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FusionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        FusionPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = FusionPolicy::ALL.iter().map(|p| p.as_str()).collect();
                Error::InvalidInput(format!(
                    "unknown rating source '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Signals resolved to the 0-100 scale, before any policy is applied
#[derive(Debug, Clone, Copy, PartialEq)]
struct Resolved {
    rt: Option<f64>,
    rt_audience: Option<f64>,
    imdb: Option<f64>,
    tmdb: Option<f64>,
}

impl Resolved {
    fn from_signals(signals: &Signals, min_imdb_votes: u64) -> Self {
        let imdb = match signals.imdb_votes {
            Some(votes) if votes >= min_imdb_votes => signals.imdb_rating_100,
            _ => None,
        };
        let tmdb = signals
            .tmdb_vote_average
            .filter(|avg| *avg > 0.0)
            .map(|avg| avg * 10.0);

        Self {
            rt: signals.rt_critic_pct,
            rt_audience: signals.rt_audience_pct,
            imdb,
            tmdb,
        }
    }
}

/// First known value in priority order
pub fn first_defined(candidates: &[Option<f64>]) -> Option<f64> {
    candidates.iter().copied().flatten().next()
}

/// Weighted blend of two optional scores
///
/// `a * alpha + b * (1 - alpha)` when both are known, otherwise whichever
/// one is known.
pub fn blend(a: Option<f64>, b: Option<f64>, alpha: f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a * alpha + b * (1.0 - alpha)),
        (a, b) => a.or(b),
    }
}

/// Fuse an item's signals into a single score on the 0-100 scale
///
/// Pure function of its inputs. The result is `None` or finite; a NaN or
/// infinite intermediate collapses to `None`.
pub fn fuse(
    signals: &Signals,
    policy: FusionPolicy,
    min_imdb_votes: u64,
    blend_alpha: f64,
) -> Option<f64> {
    let s = Resolved::from_signals(signals, min_imdb_votes);

    let score = match policy {
        FusionPolicy::Auto => first_defined(&[s.rt, s.imdb, s.tmdb]),
        FusionPolicy::Rt => first_defined(&[s.rt, s.tmdb, s.imdb]),
        FusionPolicy::RtAudience => first_defined(&[s.rt_audience, s.tmdb, s.imdb]),
        FusionPolicy::RtOnly => s.rt,
        FusionPolicy::RtAudienceOnly => s.rt_audience,
        FusionPolicy::Imdb => s.imdb,
        FusionPolicy::Tmdb => s.tmdb,
        FusionPolicy::Blended => blend(
            first_defined(&[s.imdb, s.tmdb]),
            first_defined(&[s.tmdb, s.imdb]),
            blend_alpha,
        ),
        FusionPolicy::BlendedRtTmdb => blend(
            first_defined(&[s.rt, s.tmdb]),
            first_defined(&[s.tmdb, s.rt]),
            blend_alpha,
        ),
        FusionPolicy::BlendedRtImdb => blend(
            first_defined(&[s.rt, s.imdb]),
            first_defined(&[s.imdb, s.rt]),
            blend_alpha,
        ),
    };

    score.filter(|v| v.is_finite())
}
