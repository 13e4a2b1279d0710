//! End-to-end tests for catalog analysis
//!
//! Covers grouping, ordering, fusion policy selection and the properties
//! every run result must satisfy.

use chrono::NaiveDate;
use tsc_core::fall::fall_trigger_at;
use tsc_core::streak::good_flags;
use tsc_core::{analyze_catalog, AnalysisConfig, FranchiseRef, FusionPolicy, Item, Signals};

fn franchise(id: u64, name: &str) -> FranchiseRef {
    FranchiseRef {
        id,
        name: name.to_string(),
    }
}

fn film(f: &FranchiseRef, id: u64, title: &str, year: i32, tmdb: Option<f64>) -> Item {
    Item {
        id,
        franchise: f.clone(),
        title: title.to_string(),
        release_date: NaiveDate::from_ymd_opt(year, 6, 1),
        popularity: 10.0,
        poster_path: None,
        signals: Signals {
            tmdb_vote_average: tmdb,
            tmdb_vote_count: Some(1000),
            ..Default::default()
        },
    }
}

fn tmdb_config() -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.fusion.policy = FusionPolicy::Tmdb;
    config
}

fn catalog() -> Vec<Item> {
    let alien = franchise(8091, "Alien Collection");
    let rocky = franchise(1575, "Rocky Collection");
    vec![
        // Deliberately shuffled: ordering comes from release dates
        film(&alien, 4, "Alien Resurrection", 1997, Some(6.2)),
        film(&alien, 1, "Alien", 1979, Some(8.2)),
        film(&rocky, 11, "Rocky II", 1979, Some(6.9)),
        film(&alien, 3, "Alien³", 1992, Some(6.4)),
        film(&alien, 2, "Aliens", 1986, Some(7.9)),
        film(&rocky, 10, "Rocky", 1976, Some(7.8)),
        film(&rocky, 12, "Rocky III", 1982, None),
    ]
}

#[test]
fn test_catalog_is_grouped_and_ordered() {
    let results = analyze_catalog(catalog(), &tmdb_config()).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].franchise.id, 1575);
    assert_eq!(results[1].franchise.id, 8091);
    assert_eq!(results[0].item_count, 3);
    assert_eq!(results[1].item_count, 4);
}

#[test]
fn test_alien_collection_run() {
    let results = analyze_catalog(catalog(), &tmdb_config()).unwrap();
    let alien = &results[1];

    assert_eq!(alien.peak_index, Some(0));
    assert_eq!(alien.peak_title.as_deref(), Some("Alien"));
    // Aliens 79 -> Alien³ 64: adjacent drop of 15
    assert_eq!(alien.fall_index, Some(2));
    assert_eq!(alien.fall_title.as_deref(), Some("Alien³"));
    assert_eq!(alien.good_run_length, 2);
    assert!((alien.cliff_drop.unwrap() - 18.0).abs() < 1e-9);
    assert_eq!(alien.good_indices, vec![0, 1]);
    assert_eq!((alien.streak_start, alien.streak_end), (Some(0), Some(1)));
    assert!((alien.streak_avg.unwrap() - 80.5).abs() < 1e-9);
    assert!(!alien.has_missing_scores);
}

#[test]
fn test_rocky_collection_with_missing_score() {
    let results = analyze_catalog(catalog(), &tmdb_config()).unwrap();
    let rocky = &results[0];

    assert_eq!(rocky.peak_title.as_deref(), Some("Rocky"));
    // Rocky II sits 9 below the peak: no adjacent, no cumulative drop,
    // but the 2-wide window averages 73.5 which is fine; Rocky III is unknown
    assert_eq!(rocky.fall_index, None);
    assert_eq!(rocky.good_run_length, 3);
    assert!(rocky.has_missing_scores);
    assert_eq!(rocky.scores[2], None);
    assert_eq!(rocky.good_indices, vec![0]);
    assert_eq!(rocky.streak_length, 1);
}

#[test]
fn test_policy_changes_the_scores() {
    let f = franchise(1, "Mixed");
    let mut items = vec![
        film(&f, 1, "One", 2000, Some(5.0)),
        film(&f, 2, "Two", 2002, Some(5.0)),
    ];
    items[0].signals.rt_critic_pct = Some(95.0);
    items[1].signals.rt_critic_pct = Some(91.0);

    let tmdb = analyze_catalog(items.clone(), &tmdb_config()).unwrap();
    assert!(tmdb[0].good_indices.is_empty());

    let mut rt = AnalysisConfig::default();
    rt.fusion.policy = FusionPolicy::Rt;
    let rt = analyze_catalog(items, &rt).unwrap();
    assert_eq!(rt[0].good_indices, vec![0, 1]);
    assert_eq!(rt[0].streak_avg, Some(93.0));
}

#[test]
fn test_result_properties_hold() {
    let config = tmdb_config();
    for result in analyze_catalog(catalog(), &config).unwrap() {
        let known: Vec<f64> = result.scores.iter().flatten().copied().collect();

        if let Some(peak) = result.peak_index {
            let max = known.iter().copied().fold(f64::MIN, f64::max);
            assert_eq!(result.scores[peak], Some(max));
            let first = result.scores.iter().position(|s| *s == Some(max));
            assert_eq!(first, Some(peak));

            if let Some(fall) = result.fall_index {
                assert!(fall > peak && fall < result.item_count);
                for i in peak + 1..fall {
                    assert!(fall_trigger_at(&result.scores, i, max, &config.fall).is_none());
                }
            }
        }

        let flags = good_flags(
            &result.scores,
            config.streak.good_threshold,
            config.streak.origin_grace,
        );
        if let (Some(start), Some(end)) = (result.streak_start, result.streak_end) {
            assert!(start <= end && end < result.item_count);
            assert!((start..=end).all(|i| flags[i]));
            assert!(result.streak_length >= config.streak.min_length);
        }
    }
}

#[test]
fn test_origin_bias_selects_first_streak() {
    let f = franchise(5, "Symmetric");
    let items = vec![
        film(&f, 1, "A", 2000, Some(8.0)),
        film(&f, 2, "B", 2001, Some(8.0)),
        film(&f, 3, "C", 2002, Some(3.0)),
        film(&f, 4, "D", 2003, Some(8.0)),
        film(&f, 5, "E", 2004, Some(8.0)),
    ];

    let results = analyze_catalog(items.clone(), &tmdb_config()).unwrap();
    assert_eq!((results[0].streak_start, results[0].streak_end), (Some(0), Some(1)));

    // Without the bias the tie still falls to the lower start
    let mut unbiased = tmdb_config();
    unbiased.streak.origin_bias = 0.0;
    let results = analyze_catalog(items, &unbiased).unwrap();
    assert_eq!(results[0].streak_start, Some(0));
}

#[test]
fn test_analysis_is_deterministic() {
    let config = tmdb_config();
    let first = analyze_catalog(catalog(), &config).unwrap();
    let second = analyze_catalog(catalog(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_blend_scenario() {
    let f = franchise(9, "Blend");
    let mut item = film(&f, 1, "Only", 2010, None);
    item.signals.rt_critic_pct = Some(80.0);
    item.signals.imdb_rating_100 = Some(60.0);
    item.signals.imdb_votes = Some(100_000);

    let mut config = AnalysisConfig::default();
    config.fusion.policy = FusionPolicy::BlendedRtImdb;
    config.fusion.blend_alpha = 0.7;

    let results = analyze_catalog(vec![item], &config).unwrap();
    assert!((results[0].scores[0].unwrap() - 74.0).abs() < 1e-9);
}
