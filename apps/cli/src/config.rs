//! CLI configuration
//!
//! Layered with the `config` crate, later sources winning:
//! 1. built-in defaults
//! 2. a settings file (`--config`, or `formcheck.{toml,yaml,json}` in the working directory)
//! 3. `FORMCHECK__SECTION__KEY` environment variables (a `.env` file is honoured)
//!
//! The rendering rules live in their own file (`validation.rules_path`) and are
//! read with serde directly, since datatype names are case-sensitive.

use anyhow::Context;
use formcheck_terminology_client::TerminologyClientConfig;
use formcheck_validator::{LookupFailurePolicy, ValidatorConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/openmrs/ws/rest/v1";

/// Rules used when no rules file is configured.
pub const DEFAULT_RULES: &str = include_str!("../rules/default.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub terminology: TerminologyClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub validation: ValidationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Overrides applied on top of the rules file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationSettings {
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
    #[serde(default)]
    pub lookup_failures: Option<LookupFailurePolicy>,
    #[serde(default)]
    pub max_concurrent_lookups: Option<usize>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("formcheck").required(false),
        };

        config::Config::builder()
            .set_default("terminology.base_url", DEFAULT_BASE_URL)?
            .set_default("terminology.timeout_secs", 30)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("FORMCHECK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Rules file named by `override_path`, else `validation.rules_path`, else
    /// the built-in defaults; then the settings' overrides.
    pub fn validator_config(&self, override_path: Option<&Path>) -> anyhow::Result<ValidatorConfig> {
        let rules_path = override_path.or(self.validation.rules_path.as_deref());

        let mut validator = match rules_path {
            Some(path) => load_rules(path)?,
            None => ValidatorConfig::from_yaml(DEFAULT_RULES)
                .context("Built-in rendering rules are invalid")?,
        };

        if let Some(policy) = self.validation.lookup_failures {
            validator.lookup_failures = policy;
        }
        if let Some(limit) = self.validation.max_concurrent_lookups {
            validator.max_concurrent_lookups = Some(limit);
        }

        Ok(validator)
    }
}

/// Read a rules file; `.json` files are parsed as JSON, anything else as YAML.
pub fn load_rules(path: &Path) -> anyhow::Result<ValidatorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        ValidatorConfig::from_json(&text)
    } else {
        ValidatorConfig::from_yaml(&text)
    };

    parsed.with_context(|| format!("Invalid rules file {}", path.display()))
}
