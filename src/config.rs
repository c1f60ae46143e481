//! Configuration management for the ATS optimizer

use crate::error::{AtsOptimizerError, Result};
use crate::matching::ScoreThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub suggestions: SuggestionsConfig,
    pub scoring: ScoreThresholds,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionsConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the bearer token, if any.
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://localhost:11434/v1/chat/completions".to_string(),
            model: "llama3.1".to_string(),
            api_key_env: Some("ATS_OPTIMIZER_API_KEY".to_string()),
            timeout_secs: 60,
            temperature: 0.2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Console => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = AtsOptimizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(AtsOptimizerError::Configuration(format!(
                "Unsupported output format: {}. Supported formats: console, json, markdown, html",
                s
            ))),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                AtsOptimizerError::Configuration(format!("Failed to parse config '{}': {}", path.display(), e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsOptimizerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-optimizer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let ScoreThresholds {
            good_threshold,
            excellent_threshold,
        } = self.scoring;

        for (name, value) in [("good_threshold", good_threshold), ("excellent_threshold", excellent_threshold)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(AtsOptimizerError::Configuration(format!(
                    "scoring.{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }

        if good_threshold > excellent_threshold {
            return Err(AtsOptimizerError::Configuration(format!(
                "scoring.good_threshold ({}) must not exceed scoring.excellent_threshold ({})",
                good_threshold, excellent_threshold
            )));
        }

        if self.suggestions.timeout_secs == 0 {
            return Err(AtsOptimizerError::Configuration(
                "suggestions.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.suggestions.endpoint.trim().is_empty() {
            return Err(AtsOptimizerError::Configuration(
                "suggestions.endpoint must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Set a single value by dotted key, e.g. `scoring.good_threshold`.
    /// The resulting configuration is validated before it is kept.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();

        match key {
            "suggestions.enabled" => updated.suggestions.enabled = parse_value(key, value)?,
            "suggestions.endpoint" => updated.suggestions.endpoint = value.to_string(),
            "suggestions.model" => updated.suggestions.model = value.to_string(),
            "suggestions.api_key_env" => {
                updated.suggestions.api_key_env = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "suggestions.timeout_secs" => updated.suggestions.timeout_secs = parse_value(key, value)?,
            "suggestions.temperature" => updated.suggestions.temperature = parse_value(key, value)?,
            "scoring.good_threshold" => updated.scoring.good_threshold = parse_value(key, value)?,
            "scoring.excellent_threshold" => updated.scoring.excellent_threshold = parse_value(key, value)?,
            "output.format" => updated.output.format = value.parse()?,
            "output.detailed" => updated.output.detailed = parse_value(key, value)?,
            "output.color_output" => updated.output.color_output = parse_value(key, value)?,
            "output.pretty_json" => updated.output.pretty_json = parse_value(key, value)?,
            _ => {
                return Err(AtsOptimizerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AtsOptimizerError::Configuration(format!("Invalid value '{}' for {}: {}", value, key, e)))
}
