//! Configuration validation
//!
//! Checks configuration at startup so misconfigurations surface before the
//! first request.

use anyhow::Result;
use vargo_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if !config.is_production() {
        tracing::warn!(
            environment = %config.environment(),
            "Not running in production mode - error responses include details"
        );
    }

    if config.request_timeout_secs() > 300 {
        tracing::warn!(
            request_timeout_secs = config.request_timeout_secs(),
            "REQUEST_TIMEOUT_SECS is very high - slow clients can hold connections open"
        );
    }

    Ok(())
}
