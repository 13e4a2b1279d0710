//! # The Sequel Committee - analysis core
//!
//! Finds where a franchise's quality rises, peaks and collapses:
//! - Score fusion of several optional rating signals into one 0-100 score
//! - Peak and fall-off detection with three decay heuristics
//! - Best streak of "good" items with an origin preference
//! - Per-franchise run summaries for reporting collaborators
//! - Catalog filtering and franchise ranking
//! - Configuration loading and validation
//!
//! The core performs no I/O beyond reading its optional config file.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fall;
pub mod fusion;
pub mod models;
pub mod sequence;
pub mod streak;

pub use analysis::{analyze_catalog, analyze_sequence};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use fusion::FusionPolicy;
pub use models::{FranchiseRef, Item, RunResult, Signals};
pub use sequence::Sequence;
