// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
///
/// Missing configuration is treated as a deployment error,
/// not a recoverable runtime condition.
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
///
/// This macro is intended for config unit tests only and enforces
/// consistent error messages across failure cases.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
/// All required configuration is validated eagerly during initialization.
/// Only consulted for the Redis backend; the in-memory backend needs no
/// environment at all.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    /// This function is intended to be called exactly once at startup.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            redis: RedisConfig::from_env()?,
        })
    }
}

// ============================================================
// Redis configuration
// ============================================================

/// Redis-related configuration for the document store holding webinars
/// and attendee registrations.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection string.
    pub url: String,
}

impl RedisConfig {
    /// Builds a [`RedisConfig`] from environment variables.
    ///
    /// # Errors
    /// Returns an error if required configuration is missing.
    pub fn from_env() -> Result<Self> {
        // ---
        let url = required_env!("WEBINAR_REDIS_URL");

        Ok(Self { url })
    }
}

// ============================================================
// Tests
// ============================================================
