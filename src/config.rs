//! Run configuration
//!
//! An immutable [`GeneratorConfig`] holds everything a run needs up front.
//! Run-scoped state (the version stamp, per-entity seen-sets) lives
//! elsewhere and is passed explicitly, so the config can be shared freely
//! and faked in tests.

use std::path::PathBuf;

use regex::Regex;

use crate::error::{ConfigError, Result};

/// Default per-entity cap on processed records
pub const DEFAULT_MAX_RECORDS: usize = 200;

/// Environment variable consulted when `--dir` is not supplied
pub const ENV_CATALOG_DIR: &str = "HOOKCAT_CATALOG_DIR";

/// Environment variable consulted when `--api-key` is not supplied
pub const ENV_API_KEY: &str = "HOOKCAT_API_KEY";

/// Configuration for a catalog generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Target catalog directory
    pub catalog_dir: PathBuf,
    /// Provider API credential
    pub api_key: String,
    /// Optional domain to group generated services under
    pub domain: Option<String>,
    /// Optional pattern matched against connection source names
    pub match_pattern: Option<String>,
    /// Per-entity cap on processed records (default: 200)
    pub max_records_per_entity: usize,
    /// Minimum log verbosity (e.g. "debug", "info"); consumed at startup
    pub log_level: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::new(),
            api_key: String::new(),
            domain: None,
            match_pattern: None,
            max_records_per_entity: DEFAULT_MAX_RECORDS,
            log_level: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a config with the two required settings
    pub fn new<P: Into<PathBuf>, S: Into<String>>(catalog_dir: P, api_key: S) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Fill unset required fields from the environment
    /// (`HOOKCAT_CATALOG_DIR`, `HOOKCAT_API_KEY`)
    pub fn with_env_fallbacks(mut self) -> Self {
        if self.catalog_dir.as_os_str().is_empty() {
            if let Ok(dir) = std::env::var(ENV_CATALOG_DIR) {
                self.catalog_dir = PathBuf::from(dir);
            }
        }
        if self.api_key.is_empty() {
            if let Ok(key) = std::env::var(ENV_API_KEY) {
                self.api_key = key;
            }
        }
        self
    }

    /// Set the domain services are grouped under
    pub fn domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the connection source-name match pattern
    pub fn match_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.match_pattern = Some(pattern.into());
        self
    }

    /// Set the per-entity record cap
    pub fn max_records_per_entity(mut self, max: usize) -> Self {
        self.max_records_per_entity = max;
        self
    }

    /// Validate required settings.
    ///
    /// Fails fast, before any network activity, naming the missing setting.
    pub fn validate(&self) -> Result<()> {
        if self.catalog_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingCatalogDir.into());
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }
        if let Some(pattern) = &self.match_pattern {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidMatchPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Compile the source-name match pattern, if one is configured.
    ///
    /// Call after [`validate`](Self::validate); an invalid pattern is a
    /// configuration error either way.
    pub fn compiled_match(&self) -> Result<Option<Regex>> {
        match &self.match_pattern {
            None => Ok(None),
            Some(pattern) => Regex::new(pattern)
                .map(Some)
                .map_err(|e| {
                    ConfigError::InvalidMatchPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    }
                    .into()
                }),
        }
    }
}
