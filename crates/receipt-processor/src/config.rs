//! Configuration management for the Receipt Processor
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use points_common::AfternoonWindow;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// The only origin allowed to make cross-origin requests
    pub allowed_origin: String,

    /// Whether the afternoon bonus includes hour 16
    pub afternoon_window: AfternoonWindow,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            api_port: lookup("API_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            allowed_origin: lookup("ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),

            afternoon_window: lookup("AFTERNOON_BONUS_UPPER_BOUND")
                .unwrap_or_else(|| "inclusive".to_string())
                .parse()
                .context("Invalid AFTERNOON_BONUS_UPPER_BOUND")?,
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if self.allowed_origin.trim().is_empty() {
            anyhow::bail!("ALLOWED_ORIGIN must not be empty");
        }

        self.allowed_origin_header()?;

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Allowed origin as a CORS header value
    pub fn allowed_origin_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.allowed_origin)
            .with_context(|| format!("Invalid ALLOWED_ORIGIN: {}", self.allowed_origin))
    }
}
