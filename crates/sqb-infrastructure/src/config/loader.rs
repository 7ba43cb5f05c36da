//! Configuration loader
//!
//! Handles loading configuration from defaults, a TOML file, and
//! environment variables, merged in that order with Figment.

use crate::config::AppConfig;
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use sqb_domain::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
const CONFIG_ENV_PREFIX: &str = "SQB";

/// Default configuration file name looked up in the working directory
const DEFAULT_CONFIG_FILENAME: &str = "sqb.toml";

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources
    /// override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix; nesting uses a double
    ///    underscore so field names keep their own underscores
    ///    (e.g. `SQB_SERVER__PORT`, `SQB_GENERATOR__API_KEY`)
    /// 4. `GEMINI_API_KEY`, as a convenience for the generator key
    pub fn load(&self) -> Result<AppConfig> {
        // Start with default configuration
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        // Add configuration file if specified
        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Add environment variables
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("__"));

        // Extract and deserialize configuration
        let mut app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        // The original deployment configured the model key as a bare
        // GEMINI_API_KEY variable; honor it when nothing more specific is set
        if app_config.generator.api_key.is_none() {
            if let Ok(key) = env::var("GEMINI_API_KEY") {
                if !key.trim().is_empty() {
                    app_config.generator.api_key = Some(key);
                }
            }
        }

        // Validate configuration
        app_config.validate()?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the default configuration file in the working directory
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;
        let candidate = current_dir.join(DEFAULT_CONFIG_FILENAME);
        candidate.exists().then_some(candidate)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
