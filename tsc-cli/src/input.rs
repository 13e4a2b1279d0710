//! Catalog input: a JSON array of items as produced by the acquisition step

use std::path::Path;
use thiserror::Error;
use tsc_core::Item;

/// Catalog loading failures
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse catalog items from JSON text
pub fn parse_items(json: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load catalog items from a JSON file
pub fn load_items(path: &Path) -> Result<Vec<Item>, InputError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: display.clone(),
        source,
    })?;
    parse_items(&content).map_err(|source| InputError::Parse {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_items_with_partial_signals() {
        let items = parse_items(
            r#"[
                {
                    "id": 348,
                    "franchise": { "id": 8091, "name": "Alien Collection" },
                    "title": "Alien",
                    "release_date": "1979-05-25",
                    "popularity": 40.5,
                    "signals": { "tmdb_vote_average": 8.2, "tmdb_vote_count": 15000 }
                },
                {
                    "id": 679,
                    "franchise": { "id": 8091, "name": "Alien Collection" },
                    "title": "Aliens"
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].release_date, NaiveDate::from_ymd_opt(1979, 5, 25));
        assert_eq!(items[0].signals.tmdb_vote_average, Some(8.2));
        assert_eq!(items[0].signals.rt_critic_pct, None);
        assert_eq!(items[1].release_date, None);
        assert_eq!(items[1].popularity, 0.0);
        assert_eq!(items[1].signals, Default::default());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_items(Path::new("/nonexistent/items.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/items.json"));
    }
}
