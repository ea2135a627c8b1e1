use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::analysis::themes::builtin_themes;
use crate::analysis::themes::validate_themes;
use crate::analysis::ThemeDefinition;
use crate::source::DEFAULT_COUNTRY;
use crate::source::DEFAULT_REVIEW_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
    /// Also write daily rolling log files
    #[serde(default)]
    pub file_output: bool,
    #[serde(default = "default_log_directory")]
    pub directory: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
            file_output: false,
            directory: default_log_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of reviews requested per analysis
    #[serde(default = "default_count")]
    pub default_count: usize,
    #[serde(default = "default_country")]
    pub default_country: String,
}

fn default_count() -> usize {
    DEFAULT_REVIEW_COUNT
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            default_country: default_country(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Ordered theme definitions; the built-in set is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<ThemeDefinition>>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default config file path
    pub fn load() -> crate::Result<Self> {
        // Try config.toml first, then config.example.toml, then built-in defaults
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.analysis.default_count == 0 {
            return Err(crate::ReviewScopeError::InvalidConfig(
                "analysis.default_count must be positive".to_string(),
            ));
        }
        validate_themes(self.theme_definitions())?;
        Ok(())
    }

    /// Configured themes, or the built-in set
    pub fn theme_definitions(&self) -> Vec<ThemeDefinition> {
        self.themes.clone().unwrap_or_else(builtin_themes)
    }

    /// Get log level
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    /// Check if file logging is enabled
    pub fn file_logging_enabled(&self) -> bool {
        self.logging.file_output
    }

    /// Get default review count per analysis
    pub fn default_count(&self) -> usize {
        self.analysis.default_count
    }

    /// Get default store country
    pub fn default_country(&self) -> &str {
        &self.analysis.default_country
    }
}
