//! Report files: franchise_runs.csv plus JSON dumps of runs and franchise rankings

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tsc_core::catalog::FranchiseSummary;
use tsc_core::RunResult;

pub const RUNS_CSV: &str = "franchise_runs.csv";
pub const RUNS_JSON: &str = "franchise_runs.json";
pub const FRANCHISES_JSON: &str = "franchises.json";

const RUNS_HEADER: &str = "collection_id,collection_name,film_count,good_run_len,peak_index,peak_title,fall_index,fall_title,cliff_drop,avg_first_n,avg_all,missing_ratings,streak_start,streak_end,streak_len,streak_avg,good_indices,good_thresh";

/// Quote a CSV field when it contains a quote, comma or line break
pub fn csv_escape(s: &str) -> String {
    if s.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Up to two decimals, halves rounded away from zero, trailing zeros trimmed
pub fn format_number(v: f64) -> String {
    let s = format!("{:.2}", (v * 100.0).round() / 100.0);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn opt_number(v: Option<f64>) -> String {
    v.map(format_number).unwrap_or_default()
}

fn opt_index(v: Option<usize>) -> String {
    v.map(|i| i.to_string()).unwrap_or_default()
}

/// One CSV row for a run result, without the trailing newline
pub fn run_row(r: &RunResult) -> String {
    let good_indices = r
        .good_indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(";");

    [
        r.franchise.id.to_string(),
        csv_escape(&r.franchise.name),
        r.item_count.to_string(),
        r.good_run_length.to_string(),
        opt_index(r.peak_index),
        csv_escape(r.peak_title.as_deref().unwrap_or("")),
        opt_index(r.fall_index),
        csv_escape(r.fall_title.as_deref().unwrap_or("")),
        opt_number(r.cliff_drop),
        opt_number(r.avg_first_n),
        opt_number(r.avg_all),
        if r.has_missing_scores { "1" } else { "0" }.to_string(),
        opt_index(r.streak_start),
        opt_index(r.streak_end),
        r.streak_length.to_string(),
        opt_number(r.streak_avg),
        csv_escape(&good_indices),
        format_number(r.good_threshold),
    ]
    .join(",")
}

/// Full franchise_runs.csv content, rows ordered by collection id
pub fn build_runs_csv(runs: &[RunResult]) -> String {
    let mut sorted: Vec<&RunResult> = runs.iter().collect();
    sorted.sort_by(|a, b| a.franchise.cmp(&b.franchise));

    let mut out = String::from(RUNS_HEADER);
    out.push('\n');
    for r in sorted {
        out.push_str(&run_row(r));
        out.push('\n');
    }
    out
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write every report into `out_dir`, creating it if needed
pub fn write_reports(
    out_dir: &Path,
    runs: &[RunResult],
    franchises: &[FranchiseSummary],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let csv_path = out_dir.join(RUNS_CSV);
    std::fs::write(&csv_path, build_runs_csv(runs))
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    info!("[Write] {}", csv_path.display());

    let runs_path = out_dir.join(RUNS_JSON);
    write_json(&runs_path, runs)?;
    info!("[Write] {}", runs_path.display());

    let franchises_path = out_dir.join(FRANCHISES_JSON);
    write_json(&franchises_path, franchises)?;
    info!("[Write] {}", franchises_path.display());

    Ok(vec![csv_path, runs_path, franchises_path])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("Alien"), "Alien");
        assert_eq!(csv_escape("Rocky, Part II"), "\"Rocky, Part II\"");
        assert_eq!(csv_escape("The \"Best\" One"), "\"The \"\"Best\"\" One\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(70.0), "70");
        assert_eq!(format_number(78.333333), "78.33");
        assert_eq!(format_number(80.5), "80.5");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn test_format_number_rounds_halves_up() {
        assert_eq!(format_number(80.125), "80.13");
        assert_eq!(format_number(2.675), "2.68");
        assert_eq!(format_number(-1.005), "-1");
    }

    #[test]
    fn test_runs_csv_has_header_and_one_line_per_run() {
        let csv = build_runs_csv(&[]);
        assert_eq!(csv, format!("{}\n", RUNS_HEADER));
    }
}
