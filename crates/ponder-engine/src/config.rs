//! Engine configuration.
//!
//! Configuration can be loaded from:
//! - `<workspace>/.ponder/config.toml`
//! - Environment variables (`PONDER_*` prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use ponder_engine::config::PonderConfig;
//!
//! // Workspace config file if present, otherwise environment variables
//! let config = PonderConfig::load(std::path::Path::new(".")).expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = PonderConfig::from_file(std::path::Path::new("ponder.toml")).expect("Failed to load");
//! ```
//!
//! A complete file:
//!
//! ```toml
//! [storage]
//! storage_dir = "/srv/notes/.ponder"
//! task_catalog = "${HOME}/tasks.json"
//!
//! [similarity]
//! inclusion_threshold = 15.0
//! scan_budget_ms = 2000
//!
//! [decision]
//! strong_match_threshold = 35.0
//! related_match_threshold = 15.0
//! strategic_value_threshold = 6
//! ```

use std::env;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use ponder_core::defaults::{
    COMPREHENSIVE_THRESHOLD, CONFIG_FILE_NAME, RELATED_MATCH_THRESHOLD, SEE_ALSO_LIMIT,
    STORAGE_DIR_NAME, STRATEGIC_VALUE_THRESHOLD, STRONG_MATCH_THRESHOLD,
};
use ponder_search::SimilarityConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for ponder_core::Error {
    fn from(err: ConfigError) -> Self {
        ponder_core::Error::Config(err.to_string())
    }
}

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid placeholder pattern"));

/// Where notes live and where tasks come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Workspace whose hidden `.ponder` directory holds the notes
    pub workspace_root: Option<PathBuf>,
    /// Explicit storage directory, overriding the workspace convention
    pub storage_dir: Option<PathBuf>,
    /// JSON file of existing tasks; no catalog when unset
    pub task_catalog: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory holding `thoughts.json` and `index.json`.
    pub fn storage_path(&self) -> PathBuf {
        match &self.storage_dir {
            Some(dir) => dir.clone(),
            None => self
                .workspace_root
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(STORAGE_DIR_NAME),
        }
    }
}

/// Thresholds turning scores into a recommended action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Best match above this merges into it
    pub strong_match_threshold: f32,
    /// Best match above this plus high priority schedules an interview
    pub related_match_threshold: f32,
    /// Strategic value at or above this recommends a new task
    pub strategic_value_threshold: u32,
    /// Creation complexity at or above this takes the comprehensive path
    pub comprehensive_threshold: u32,
    pub see_also_limit: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            strong_match_threshold: STRONG_MATCH_THRESHOLD,
            related_match_threshold: RELATED_MATCH_THRESHOLD,
            strategic_value_threshold: STRATEGIC_VALUE_THRESHOLD,
            comprehensive_threshold: COMPREHENSIVE_THRESHOLD,
            see_also_limit: SEE_ALSO_LIMIT,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PonderConfig {
    pub storage: StorageConfig,
    pub similarity: SimilarityConfig,
    pub decision: DecisionConfig,
}

impl PonderConfig {
    /// Path of the config file inside a workspace.
    pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(STORAGE_DIR_NAME).join(CONFIG_FILE_NAME)
    }

    /// Load the workspace config file, falling back to environment variables.
    ///
    /// `workspace_root` becomes the storage workspace unless the loaded
    /// configuration names one.
    pub fn load(workspace_root: &Path) -> ConfigResult<Self> {
        let path = Self::workspace_config_path(workspace_root);

        let mut config = if path.exists() {
            info!(config_path = %path.display(), "config: loading file");
            Self::from_file(&path)?
        } else {
            debug!(
                config_path = %path.display(),
                "config: file not found, using environment variables"
            );
            Self::from_env()?
        };

        if config.storage.workspace_root.is_none() {
            config.storage.workspace_root = Some(workspace_root.to_path_buf());
        }
        Ok(config)
    }

    /// Load configuration from a TOML file, expanding `${VAR}` placeholders.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let content = Self::substitute_env_vars(&content);
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `PONDER_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::default();

        config.storage.workspace_root = get("PONDER_WORKSPACE").map(PathBuf::from);
        config.storage.storage_dir = get("PONDER_STORAGE_DIR").map(PathBuf::from);
        config.storage.task_catalog = get("PONDER_TASK_CATALOG").map(PathBuf::from);

        if let Some(v) = parse_var(&get, "PONDER_INCLUSION_THRESHOLD")? {
            config.similarity.inclusion_threshold = v;
        }
        if let Some(v) = parse_var(&get, "PONDER_SCAN_BUDGET_MS")? {
            config.similarity.scan_budget_ms = v;
        }
        if let Some(v) = parse_var(&get, "PONDER_STRONG_MATCH_THRESHOLD")? {
            config.decision.strong_match_threshold = v;
        }
        if let Some(v) = parse_var(&get, "PONDER_RELATED_MATCH_THRESHOLD")? {
            config.decision.related_match_threshold = v;
        }
        if let Some(v) = parse_var(&get, "PONDER_STRATEGIC_VALUE_THRESHOLD")? {
            config.decision.strategic_value_threshold = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let s = &self.similarity;
        let weights = [
            ("content_weight", s.content_weight),
            ("tag_weight", s.tag_weight),
            ("context_weight", s.context_weight),
            ("recency_weight", s.recency_weight),
            ("content_overlap_scale", s.content_overlap_scale),
            ("inclusion_threshold", s.inclusion_threshold),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "similarity.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if s.recency_window_days <= 0.0 {
            return Err(ConfigError::Validation(
                "similarity.recency_window_days must be positive".to_string(),
            ));
        }
        if s.scan_budget_ms == 0 {
            return Err(ConfigError::Validation(
                "similarity.scan_budget_ms must be at least 1".to_string(),
            ));
        }

        let d = &self.decision;
        if d.related_match_threshold > d.strong_match_threshold {
            return Err(ConfigError::Validation(format!(
                "decision.related_match_threshold ({}) cannot exceed strong_match_threshold ({})",
                d.related_match_threshold, d.strong_match_threshold
            )));
        }
        Ok(())
    }

    /// Substitute environment variables in the format `${VAR_NAME}`.
    ///
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

fn parse_var<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> ConfigResult<Option<T>> {
    match get(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw,
            }),
    }
}
