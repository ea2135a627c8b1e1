//! Integration tests for file sources, configuration and concurrent analysis

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use reviewscope::analysis::rating_trend;
use reviewscope::analysis::ReviewAnalyzer;
use reviewscope::analysis::ReviewTable;
use reviewscope::cli::handlers::analyze_files;
use reviewscope::cli::handlers::handle_batch_command;
use reviewscope::models::SortOrder;
use reviewscope::source::FetchQuery;
use reviewscope::source::JsonFileSource;
use reviewscope::source::ReviewSource;
use reviewscope::AppConfig;
use reviewscope::Result;
use reviewscope::ReviewScopeError;
use tempfile::NamedTempFile;

const STORE_EXPORT: &str = r#"{
    "reviews": [
        {"reviewId": "gp:1", "userName": "A", "content": "Crashes on startup", "score": 1, "thumbsUpCount": 4, "at": "2024-05-01 08:00:00"},
        {"reviewId": "gp:2", "userName": "B", "content": "Lovely layout", "score": 5, "thumbsUpCount": 0, "at": "2024-05-03 10:00:00"},
        {"reviewId": "gp:3", "userName": "C", "content": "Please add a dark theme", "score": 4, "thumbsUpCount": 1, "at": "2024-05-02 12:00:00"},
        {"reviewId": "gp:4", "userName": "D", "content": null, "score": 3, "at": "2024-05-03 20:00:00"}
    ],
    "continuationToken": "token-123"
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_analyze_store_export() -> Result<()> {
    let file = write_temp(STORE_EXPORT);
    let source = JsonFileSource::new(file.path());

    let document =
        ReviewAnalyzer::new().analyze_from_source(&source, &FetchQuery::new("com.example"))?;

    assert_eq!(document.total_reviews, 4);
    assert!((document.average_rating - 3.25).abs() < f64::EPSILON);
    assert_eq!(document.theme("performance").unwrap().reviews, vec!["gp:1"]);
    assert_eq!(document.theme("ui").unwrap().reviews, vec!["gp:2"]);
    assert_eq!(document.theme("features").unwrap().reviews, vec!["gp:3"]);

    Ok(())
}

#[test]
fn test_count_limits_newest_reviews() -> Result<()> {
    let file = write_temp(STORE_EXPORT);
    let source = JsonFileSource::new(file.path());

    let page = source.fetch_reviews(&FetchQuery::new("com.example").with_count(2))?;
    let ids: Vec<_> = page
        .reviews
        .iter()
        .map(|r| r.review_id.clone().unwrap_or_default())
        .collect();

    assert_eq!(ids, vec!["gp:4", "gp:2"]);
    assert_eq!(page.continuation_token.as_deref(), Some("token-123"));
    Ok(())
}

#[test]
fn test_rating_sort_before_truncation() -> Result<()> {
    let file = write_temp(STORE_EXPORT);
    let query = FetchQuery::new("com.example")
        .with_sort(SortOrder::Rating)
        .with_count(1);

    let document = ReviewAnalyzer::new().analyze_from_source(&JsonFileSource::new(file.path()), &query)?;
    assert_eq!(document.rating_counts.keys().copied().collect::<Vec<_>>(), vec![5]);
    Ok(())
}

#[test]
fn test_config_themes_drive_analysis() -> Result<()> {
    let config = AppConfig::from_toml_str(
        r#"
        [[themes]]
        id = "onboarding"
        name = "Onboarding"
        keywords = ["Startup", "sign up"]
        confidence = 0.6
        "#,
    )?;
    let analyzer = ReviewAnalyzer::from_config(&config)?;
    let file = write_temp(STORE_EXPORT);

    let document =
        analyzer.analyze_from_source(&JsonFileSource::new(file.path()), &FetchQuery::new("app"))?;

    assert_eq!(document.themes.len(), 1);
    assert_eq!(document.themes[0].id, "theme-onboarding");
    assert_eq!(document.themes[0].reviews, vec!["gp:1"]);
    Ok(())
}

#[test]
fn test_unscored_export_fails_whole_analysis() {
    let file = write_temp(r#"[{"reviewId": "a", "content": "slow"}, {"reviewId": "b"}]"#);
    let result = ReviewAnalyzer::new()
        .analyze_from_source(&JsonFileSource::new(file.path()), &FetchQuery::new("app"));
    assert!(matches!(result, Err(ReviewScopeError::InsufficientData)));
}

#[test]
fn test_trend_from_export() -> Result<()> {
    let file = write_temp(STORE_EXPORT);
    let query = FetchQuery::new("app").with_sort(SortOrder::Relevance);
    let page = JsonFileSource::new(file.path()).fetch_reviews(&query)?;

    let trend = rating_trend(&ReviewTable::from_records(&page.reviews));
    let days: Vec<String> = trend.iter().map(|p| p.date.to_string()).collect();

    assert_eq!(days, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);
    assert_eq!(trend[2].review_count, 2);
    assert!((trend[2].average_rating - 4.0).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_analyses_are_independent() {
    let analyzer = Arc::new(ReviewAnalyzer::new());
    let good = Arc::new(write_temp(STORE_EXPORT));
    let bad = Arc::new(write_temp(r#"[{"reviewId": "x"}]"#));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let analyzer = Arc::clone(&analyzer);
            let file = if i % 2 == 0 { Arc::clone(&good) } else { Arc::clone(&bad) };
            tokio::task::spawn_blocking(move || {
                analyzer.analyze_from_source(
                    &JsonFileSource::new(file.path()),
                    &FetchQuery::new(format!("app-{i}")),
                )
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    let mut documents = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        let result = result.expect("task panicked");
        if i % 2 == 0 {
            documents.push(result.expect("analysis of good export").to_json().unwrap());
        } else {
            assert!(matches!(result, Err(ReviewScopeError::InsufficientData)));
        }
    }

    assert!(documents.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_batch_reports_each_file() {
    let good = write_temp(STORE_EXPORT);
    let unscored = write_temp(r#"[{"reviewId": "x", "content": "slow"}]"#);
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("com.missing.app.json");

    let files = vec![
        good.path().to_path_buf(),
        missing.clone(),
        unscored.path().to_path_buf(),
    ];
    let outcomes = analyze_files(Arc::new(ReviewAnalyzer::new()), files, 100, "us").await;

    assert_eq!(outcomes.len(), 3);
    let document = outcomes[good.path()].as_ref().expect("good export analyzed");
    assert_eq!(document.total_reviews, 4);
    assert!((document.average_rating - 3.25).abs() < f64::EPSILON);

    let missing_err = outcomes[&missing].as_ref().unwrap_err();
    assert_eq!(missing_err.code(), "io_error");
    let unscored_err = outcomes[unscored.path()].as_ref().unwrap_err();
    assert_eq!(unscored_err.code(), "insufficient_data");
}

#[tokio::test]
async fn test_batch_command_fails_when_any_file_fails() {
    let good = write_temp(STORE_EXPORT);
    let missing = PathBuf::from("/nonexistent/reviewscope/reviews.json");
    let config = AppConfig::default();

    let err = handle_batch_command(&config, vec![good.path().to_path_buf(), missing], None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewScopeError::BatchFailed { failed: 1, total: 2 }));
    assert_eq!(err.code(), "batch_failed");

    let outcomes = handle_batch_command(&config, vec![good.path().to_path_buf()], None, false)
        .await
        .expect("all files analyzed");
    assert!(outcomes.values().all(|result| result.is_ok()));
}
