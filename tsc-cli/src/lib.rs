//! tsc command-line front end
//!
//! Loads a catalog from JSON, applies configuration and filters, runs the
//! analysis core and writes the run reports.

pub mod args;
pub mod input;
pub mod output;
pub mod run;

pub use args::Args;
pub use run::{execute, RunReport};
