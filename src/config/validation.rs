use anyhow::{Result, bail};

use super::types::Config;

/// Structural checks only. A missing API key is reported when a plan is
/// requested, so `serve` can start without one.
pub fn validate(config: &Config) -> Result<()> {
    if config.gemini.base_url.trim().is_empty() {
        bail!("Gemini base URL cannot be empty");
    }
    if config.gemini.model.trim().is_empty() {
        bail!("Gemini model name cannot be empty");
    }
    if config.gemini.timeout_secs == 0 {
        bail!("Timeout must be at least one second");
    }
    if config.retry.max_attempts == 0 {
        bail!("Retry max_attempts must be at least 1");
    }
    Ok(())
}
