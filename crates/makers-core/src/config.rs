//! Configuration module
//!
//! This module provides the client configuration: API endpoint and credentials,
//! where session drafts and local assets live, and the upload and form limits.

use std::env;

use crate::validation::limits::{MAX_SCREENSHOTS, NARRATIVE_MAX_CHARS};
use crate::validation::DEFAULT_IMAGE_CONTENT_TYPES;

// Common constants
const API_URL: &str = "http://localhost:3000";
const SESSION_DIR: &str = ".makers-session";
const UPLOAD_BATCH_SIZE: usize = 3;
const UPLOAD_BATCH_DELAY_MS: u64 = 500;
const MAX_ASSET_SIZE_MB: usize = 5;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Product Makers client configuration
#[derive(Clone, Debug)]
pub struct MakersConfig {
    pub environment: String,
    // Remote API
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    // Per-session draft store
    pub session_dir: String,
    // Optional local asset store (instead of the remote upload endpoint)
    pub asset_dir: Option<String>,
    pub asset_base_url: Option<String>,
    // Upload behavior
    pub upload_batch_size: usize,
    pub upload_batch_delay_ms: u64,
    pub max_asset_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    // Form limits
    pub max_screenshots: usize,
    pub narrative_max_chars: usize,
}

impl MakersConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let max_asset_size_mb = lookup("MAX_ASSET_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_ASSET_SIZE_MB);

        let allowed_content_types = lookup("ALLOWED_CONTENT_TYPES")
            .map(|s| {
                s.split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                DEFAULT_IMAGE_CONTENT_TYPES
                    .iter()
                    .map(|t| t.to_string())
                    .collect()
            });

        let config = MakersConfig {
            environment,
            api_url: lookup("MAKERS_API_URL")
                .or_else(|| lookup("API_URL"))
                .unwrap_or_else(|| API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_token: lookup("MAKERS_API_TOKEN").filter(|s| !s.trim().is_empty()),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            session_dir: lookup("MAKERS_SESSION_DIR").unwrap_or_else(|| SESSION_DIR.to_string()),
            asset_dir: lookup("MAKERS_ASSET_DIR"),
            asset_base_url: lookup("MAKERS_ASSET_BASE_URL"),
            upload_batch_size: lookup("UPLOAD_BATCH_SIZE")
                .map(|s| {
                    s.parse()
                        .map_err(|_| anyhow::anyhow!("UPLOAD_BATCH_SIZE must be a valid number"))
                })
                .transpose()?
                .unwrap_or(UPLOAD_BATCH_SIZE),
            upload_batch_delay_ms: lookup("UPLOAD_BATCH_DELAY_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(UPLOAD_BATCH_DELAY_MS),
            max_asset_size_bytes: max_asset_size_mb * 1024 * 1024,
            allowed_content_types,
            max_screenshots: lookup("MAX_SCREENSHOTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_SCREENSHOTS),
            narrative_max_chars: lookup("NARRATIVE_MAX_CHARS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(NARRATIVE_MAX_CHARS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_batch_size == 0 {
            return Err(anyhow::anyhow!("UPLOAD_BATCH_SIZE must be at least 1"));
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "MAKERS_API_URL must be an http:// or https:// URL"
            ));
        }

        if self.max_screenshots == 0 {
            return Err(anyhow::anyhow!("MAX_SCREENSHOTS must be at least 1"));
        }

        if self.asset_dir.is_some() && self.asset_base_url.is_none() {
            return Err(anyhow::anyhow!(
                "MAKERS_ASSET_BASE_URL must be set when MAKERS_ASSET_DIR is used"
            ));
        }

        Ok(())
    }

    /// Check if the client is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
