//! Catalog-level preparation: release filtering, franchise size filtering and
//! franchise popularity ranking

use crate::config::CatalogConfig;
use crate::models::{FranchiseRef, Item};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// True when the item has no release date or releases after `as_of`
pub fn is_unreleased(item: &Item, as_of: NaiveDate) -> bool {
    match item.release_date {
        Some(date) => date > as_of,
        None => true,
    }
}

/// Outcome of [`apply_filters`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub items: Vec<Item>,
    pub unreleased_removed: usize,
    pub franchises_removed: usize,
}

/// Drop unreleased items (unless configured otherwise), then drop franchises
/// left with fewer than `min_items` items
///
/// `as_of` is supplied by the caller so the result never depends on the
/// wall clock.
pub fn apply_filters(items: Vec<Item>, config: &CatalogConfig, as_of: NaiveDate) -> FilterOutcome {
    let before = items.len();
    let items: Vec<Item> = if config.include_unreleased {
        items
    } else {
        items
            .into_iter()
            .filter(|item| !is_unreleased(item, as_of))
            .collect()
    };
    let unreleased_removed = before - items.len();

    let mut counts: BTreeMap<&FranchiseRef, usize> = BTreeMap::new();
    for item in &items {
        *counts.entry(&item.franchise).or_default() += 1;
    }
    let too_small: Vec<FranchiseRef> = counts
        .into_iter()
        .filter(|(_, count)| *count < config.min_items)
        .map(|(franchise, _)| franchise.clone())
        .collect();

    let items = items
        .into_iter()
        .filter(|item| !too_small.contains(&item.franchise))
        .collect();

    debug!(
        "Catalog filter: {} unreleased items removed, {} small franchises removed",
        unreleased_removed,
        too_small.len()
    );

    FilterOutcome {
        items,
        unreleased_removed,
        franchises_removed: too_small.len(),
    }
}

/// Aggregate popularity figures for one franchise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseSummary {
    pub franchise: FranchiseRef,
    pub item_count: usize,
    pub sum_popularity: f64,
    pub total_vote_count: u64,

    /// Vote-count weighted mean of TMDb vote averages (0-10); 0 without votes
    pub avg_vote_weighted: f64,
    pub max_popularity: f64,

    /// `0.5·log10(1+sum_popularity) + 0.3·avg_vote_weighted + 0.2·log10(1+total_vote_count)`
    pub score: f64,
}

impl FranchiseSummary {
    pub fn from_items<'a>(franchise: FranchiseRef, items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut item_count = 0;
        let mut sum_popularity = 0.0;
        let mut total_vote_count = 0u64;
        let mut weighted_vote_sum = 0.0;
        let mut max_popularity = 0.0f64;

        for item in items {
            let votes = item.signals.tmdb_vote_count.unwrap_or(0);
            item_count += 1;
            sum_popularity += item.popularity;
            total_vote_count += votes;
            weighted_vote_sum += item.signals.tmdb_vote_average.unwrap_or(0.0) * votes as f64;
            max_popularity = max_popularity.max(item.popularity);
        }

        let avg_vote_weighted = if total_vote_count > 0 {
            weighted_vote_sum / total_vote_count as f64
        } else {
            0.0
        };
        let score = 0.5 * (1.0 + sum_popularity).log10()
            + 0.3 * avg_vote_weighted
            + 0.2 * (1.0 + total_vote_count as f64).log10();

        Self {
            franchise,
            item_count,
            sum_popularity,
            total_vote_count,
            avg_vote_weighted,
            max_popularity,
            score,
        }
    }
}

/// Summaries for every franchise, ranked by score, then popularity, then id
pub fn rank_franchises(items: &[Item]) -> Vec<FranchiseSummary> {
    let mut groups: BTreeMap<&FranchiseRef, Vec<&Item>> = BTreeMap::new();
    for item in items {
        groups.entry(&item.franchise).or_default().push(item);
    }

    let mut summaries: Vec<FranchiseSummary> = groups
        .into_iter()
        .map(|(franchise, members)| FranchiseSummary::from_items(franchise.clone(), members))
        .collect();

    summaries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.sum_popularity.total_cmp(&a.sum_popularity))
            .then_with(|| a.franchise.cmp(&b.franchise))
    });
    summaries
}
