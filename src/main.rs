use clap::Parser;
use reviewscope::cli::handlers;
use reviewscope::cli::output::print_failure;
use reviewscope::cli::Cli;
use reviewscope::cli::Commands;
use reviewscope::config::AppConfig;
use reviewscope::logging;
use reviewscope::Result;
use reviewscope::ReviewScopeError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        // Batch JSON output already carries an error body per failed file
        if !(json && matches!(err, ReviewScopeError::BatchFailed { .. })) {
            print_failure(&err, json);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration first
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    if cli.verbose {
        logging::init_logging_with_level("debug")?;
    } else {
        logging::init_logging_with_config(Some(&config))?;
    }

    match cli.command {
        Commands::Analyze {
            file,
            count,
            sort,
            country,
        } => handlers::handle_analyze_command(&config, &file, count, &sort, country, cli.json),
        Commands::Batch { files, count } => {
            handlers::handle_batch_command(&config, files, count, cli.json)
                .await
                .map(|_| ())
        }
        Commands::Trend { file } => handlers::handle_trend_command(&file, cli.json),
        Commands::Themes => handlers::handle_themes_command(&config, cli.json),
        Commands::Config => handlers::handle_config_command(&config, cli.json),
    }
}
