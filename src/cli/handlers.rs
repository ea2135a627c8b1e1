//! CLI command handlers

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing::warn;

use crate::analysis::rating_trend;
use crate::analysis::AnalysisDocument;
use crate::analysis::ReviewAnalyzer;
use crate::analysis::ReviewTable;
use crate::cli::output::*;
use crate::errors::ErrorBody;
use crate::models::SortOrder;
use crate::source::FetchQuery;
use crate::source::JsonFileSource;
use crate::source::ReviewSource;
use crate::AppConfig;
use crate::Result;
use crate::ReviewScopeError;

/// App identifier for a review file: its stem, e.g. `com.example.app`
fn app_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Handle analyze command
pub fn handle_analyze_command(
    config: &AppConfig,
    file: &Path,
    count: Option<usize>,
    sort: &str,
    country: Option<String>,
    json: bool,
) -> Result<()> {
    let analyzer = ReviewAnalyzer::from_config(config)?;
    let query = FetchQuery::new(app_id_for(file))
        .with_country(country.unwrap_or_else(|| config.default_country().to_string()))
        .with_sort(SortOrder::from(sort))
        .with_count(count.unwrap_or_else(|| config.default_count()));

    let document = analyzer.analyze_from_source(&JsonFileSource::new(file), &query)?;

    if json {
        print_json(&document)?;
    } else {
        print_analysis(&query.app_id, &document);
    }
    Ok(())
}

/// Per-file results of a batch run, keyed by input path
pub type BatchOutcomes = BTreeMap<PathBuf, Result<AnalysisDocument>>;

/// Analyze files independently on blocking worker threads.
///
/// Every file gets an entry; a failing or panicking analysis never affects
/// the others. A path given twice is analyzed once.
pub async fn analyze_files(
    analyzer: Arc<ReviewAnalyzer>,
    files: Vec<PathBuf>,
    count: usize,
    country: &str,
) -> BatchOutcomes {
    let files: BTreeSet<PathBuf> = files.into_iter().collect();
    info!("Starting batch analysis of {} files", files.len());

    let (paths, tasks): (Vec<_>, Vec<_>) = files
        .into_iter()
        .map(|path| {
            let analyzer = Arc::clone(&analyzer);
            let query = FetchQuery::new(app_id_for(&path))
                .with_country(country)
                .with_count(count);
            let source = JsonFileSource::new(&path);
            let task = tokio::task::spawn_blocking(move || {
                analyzer.analyze_from_source(&source, &query)
            });
            (path, task)
        })
        .unzip();

    let results = futures::future::join_all(tasks).await;

    paths
        .into_iter()
        .zip(results)
        .map(|(path, joined)| {
            let result = joined.unwrap_or_else(|e| {
                Err(ReviewScopeError::Source(format!("analysis task failed: {e}")))
            });
            if let Err(e) = &result {
                warn!("Analysis of {} failed: {}", path.display(), e);
            }
            (path, result)
        })
        .collect()
}

/// Handle batch command
///
/// Each file is reported in place. Fails with `BatchFailed` after reporting
/// when any file could not be analyzed.
pub async fn handle_batch_command(
    config: &AppConfig,
    files: Vec<PathBuf>,
    count: Option<usize>,
    json: bool,
) -> Result<BatchOutcomes> {
    let analyzer = Arc::new(ReviewAnalyzer::from_config(config)?);
    let count = count.unwrap_or_else(|| config.default_count());
    let outcomes = analyze_files(analyzer, files, count, config.default_country()).await;

    let total = outcomes.len();
    let failed = outcomes.values().filter(|result| result.is_err()).count();

    if json {
        let mut json_results = BTreeMap::new();
        for (path, result) in &outcomes {
            let value = match result {
                Ok(document) => serde_json::to_value(document)?,
                Err(e) => serde_json::to_value(ErrorBody::from(e))?,
            };
            json_results.insert(path.display().to_string(), value);
        }
        print_json(&json_results)?;
    } else {
        for (path, result) in &outcomes {
            match result {
                Ok(document) => {
                    print_analysis(&app_id_for(path), document);
                    println!();
                }
                Err(e) => print_error(&format!("{}: {}", path.display(), e)),
            }
        }
        if failed == 0 {
            print_success(&format!("Analyzed {total} files"));
        } else {
            print_warning(&format!("Analyzed {} of {} files", total - failed, total));
        }
    }

    if failed > 0 {
        return Err(ReviewScopeError::BatchFailed { failed, total });
    }
    Ok(outcomes)
}

/// Handle trend command
pub fn handle_trend_command(file: &Path, json: bool) -> Result<()> {
    // Every review in the file, in file order
    let query = FetchQuery::new(app_id_for(file))
        .with_sort(SortOrder::Relevance)
        .with_count(usize::MAX);
    let page = JsonFileSource::new(file).fetch_reviews(&query)?;
    let trend = rating_trend(&ReviewTable::from_records(&page.reviews));

    if json {
        print_json(&trend)?;
    } else {
        print_trend(&query.app_id, &trend);
    }
    Ok(())
}

/// Handle themes command
pub fn handle_themes_command(config: &AppConfig, json: bool) -> Result<()> {
    let analyzer = ReviewAnalyzer::from_config(config)?;
    if json {
        print_json(&analyzer.themes())?;
    } else {
        print_themes(analyzer.themes());
    }
    Ok(())
}

/// Handle config command
pub fn handle_config_command(config: &AppConfig, json: bool) -> Result<()> {
    if json {
        print_json(config)?;
    } else {
        print_config(config);
    }
    Ok(())
}
