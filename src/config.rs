//! Tool configuration loaded from `bylint.toml`.
//!
//! Every value can be overridden through the environment with the `BYLINT`
//! prefix and `__` between path segments, for example
//! `BYLINT__VALIDATION__FAIL_ON=warning`.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::validation::{RuleId, Severity, ValidatorOptions};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "bylint.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration path is not valid UTF-8.
    #[error("invalid configuration path: {0}")]
    InvalidPath(String),

    /// The configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] config::ConfigError),

    /// Inline TOML could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for the validation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Lowest severity that makes `bylint check` exit non-zero
    pub fail_on: Severity,
    /// Headline/topic word overlap (0.0-1.0) treated as a repeat
    pub repetition_threshold: f64,
    /// Maximum excerpts per finding
    pub max_excerpts: usize,
    /// Rules to skip entirely
    pub disabled_rules: Vec<RuleId>,
    /// Per-rule severity overrides
    pub severity_overrides: BTreeMap<RuleId, Severity>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let options = ValidatorOptions::default();
        Self {
            fail_on: Severity::Error,
            repetition_threshold: options.repetition_threshold,
            max_excerpts: options.max_excerpts,
            disabled_rules: Vec::new(),
            severity_overrides: BTreeMap::new(),
        }
    }
}

/// House rules that apply to every publication.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// Phrases banned regardless of the style guide
    pub banned_phrases: Vec<String>,
}

/// File locations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Topic archive JSON used when `--archive` is not given
    pub archive: Option<PathBuf>,
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BylintConfig {
    pub validation: ValidationConfig,
    pub brand: BrandConfig,
    pub paths: PathsConfig,
}

impl BylintConfig {
    /// Load configuration.
    ///
    /// With `Some(path)` the file must exist. With `None`, `bylint.toml` in
    /// the working directory is used if present. Environment overrides are
    /// applied in both cases.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bylint::config::BylintConfig;
    ///
    /// let config = BylintConfig::load(Some("bylint.toml".as_ref()))?;
    /// println!("failing on {}", config.validation.fail_on);
    /// # Ok::<(), bylint::config::ConfigError>(())
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                let path_str = path
                    .to_str()
                    .ok_or_else(|| ConfigError::InvalidPath(format!("{:?}", path)))?;
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path_str.to_string()));
                }
                builder = builder.add_source(File::new(path_str, FileFormat::Toml));
            }
            None => {
                builder = builder
                    .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix("BYLINT")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("validation.disabled_rules")
                    .with_list_parse_key("brand.banned_phrases"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from TOML text, without environment overrides.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Validator options described by this configuration.
    pub fn to_validator_options(&self) -> ValidatorOptions {
        let validation = &self.validation;
        let mut options = ValidatorOptions::new()
            .with_banned_phrases(self.brand.banned_phrases.iter().cloned())
            .with_repetition_threshold(validation.repetition_threshold)
            .with_max_excerpts(validation.max_excerpts);
        for rule in &validation.disabled_rules {
            options = options.with_disabled_rule(*rule);
        }
        for (rule, severity) in &validation.severity_overrides {
            options = options.with_severity(*rule, *severity);
        }
        options
    }
}
