//! reviewscope - deterministic app-store review analysis
//!
//! Turns a page of store review records into an analysis document with the
//! rating distribution, score-based sentiment counts and keyword themes.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod source;


pub use analysis::AnalysisDocument;
pub use analysis::ReviewAnalyzer;
pub use config::AppConfig;
pub use errors::*;
pub use models::RawReview;

/// Analyze store records with the built-in themes
pub fn analyze(records: &[RawReview]) -> Result<AnalysisDocument> {
    ReviewAnalyzer::new().analyze(records)
}
