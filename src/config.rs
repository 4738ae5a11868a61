//! Configuration management for the sports recommender
//!
//! Strongly-typed configuration read from environment variables (optionally
//! via a `.env` file), with defaults and a validation pass.
//!
//! # Example
//! ```no_run
//! use sports_recommender::Config;
//! let config = Config::from_env().expect("failed to load config");
//! println!("Listening on {}:{}", config.api.host, config.api.port);
//! ```

use crate::error::{Error, Result};
use crate::recommendation::forest::ForestParams;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,
    /// Classifier training configuration
    pub model: ModelConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Port to listen on
    pub port: u16,
    /// Host to bind to
    pub host: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Maximum request body size
    pub max_body_size: usize,
    /// Enable permissive CORS
    pub cors_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
            request_timeout: Duration::from_secs(30),
            max_body_size: 64 * 1024,
            cors_enabled: true,
        }
    }
}

/// Classifier training configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Seed for bootstrap sampling and feature selection
    pub seed: u64,
    /// Seed for the train/test shuffle
    pub split_seed: u64,
    /// Fraction of rows held out from training
    pub test_fraction: f64,
    /// Optional file the trained artifact is cached in
    pub artifact_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            split_seed: 42,
            test_fraction: 0.2,
            artifact_path: None,
        }
    }
}

impl ModelConfig {
    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.n_trees,
            seed: self.seed,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore if not found)
        dotenvy::dotenv().ok();

        let config = Self {
            api: ApiConfig::from_env()?,
            model: ModelConfig::from_env()?,
        };

        config.validate()?;
        config.log_summary();

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.host.is_empty() {
            return Err(Error::InvalidConfig {
                key: "API_HOST",
                message: "host cannot be empty".into(),
            });
        }

        if self.model.n_trees == 0 {
            return Err(Error::InvalidConfig {
                key: "MODEL_TREES",
                message: "forest needs at least one tree".into(),
            });
        }

        if !(0.0..1.0).contains(&self.model.test_fraction) {
            return Err(Error::InvalidConfig {
                key: "MODEL_TEST_FRACTION",
                message: format!("{} is outside [0, 1)", self.model.test_fraction).into(),
            });
        }

        Ok(())
    }

    /// Log configuration summary
    fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  API:");
        info!("    Listening on: {}:{}", self.api.host, self.api.port);
        info!("    Request timeout: {:?}", self.api.request_timeout);
        info!("    CORS: {}", self.api.cors_enabled);
        info!("  Model:");
        info!("    Trees: {} (seed {})", self.model.n_trees, self.model.seed);
        info!(
            "    Holdout: {} (split seed {})",
            self.model.test_fraction, self.model.split_seed
        );
        match &self.model.artifact_path {
            Some(path) => info!("    Artifact cache: {}", path.display()),
            None => info!("    Artifact cache: disabled"),
        }
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            port: get_env_parsed_or("API_PORT", defaults.port)?,
            host: get_env_or("API_HOST", &defaults.host),
            request_timeout: Duration::from_secs(get_env_parsed_or(
                "API_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_body_size: get_env_parsed_or("API_MAX_BODY_SIZE", defaults.max_body_size)?,
            cors_enabled: get_env_parsed_or("API_CORS_ENABLED", defaults.cors_enabled)?,
        })
    }
}

impl ModelConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            n_trees: get_env_parsed_or("MODEL_TREES", defaults.n_trees)?,
            seed: get_env_parsed_or("MODEL_SEED", defaults.seed)?,
            split_seed: get_env_parsed_or("MODEL_SPLIT_SEED", defaults.split_seed)?,
            test_fraction: get_env_parsed_or("MODEL_TEST_FRACTION", defaults.test_fraction)?,
            artifact_path: std::env::var("MODEL_ARTIFACT_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get environment variable with default
fn get_env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, rejecting values that don't parse
fn get_env_parsed_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| Error::InvalidConfig {
            key,
            message: format!("Invalid value '{}': {}", value, e).into(),
        }),
        Err(_) => Ok(default),
    }
}
