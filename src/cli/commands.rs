//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "reviewscope")]
#[command(about = "Analyze app-store reviews: ratings, sentiment and themes")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one file of exported store reviews
    Analyze {
        /// JSON file with review records
        file: PathBuf,
        /// Maximum number of reviews to analyze (default: from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Review order before truncation (newest, rating, relevance)
        #[arg(short, long, default_value = "newest")]
        sort: String,
        /// Store country (informational for file sources)
        #[arg(long)]
        country: Option<String>,
    },
    /// Analyze several review files concurrently
    Batch {
        /// JSON files with review records
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Maximum number of reviews per file (default: from config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Show the daily rating trend of a review file
    Trend {
        /// JSON file with review records
        file: PathBuf,
    },
    /// List the active theme definitions
    Themes,
    /// Show current configuration
    Config,
}
