use anyhow::{Context, Result, anyhow};
use std::env;

use super::builder::ConfigBuilder;
use super::constants::API_KEY_ENV_VAR;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(api_key) = env_string(API_KEY_ENV_VAR)? {
        builder = builder.with_gemini(|gemini| gemini.api_key = api_key);
    }

    if let Some(base_url) = env_string("TRIP_PLANNER_BASE_URL")? {
        builder = builder.with_gemini(|gemini| gemini.base_url = base_url);
    }

    if let Some(model) = env_string("TRIP_PLANNER_MODEL")? {
        builder = builder.with_gemini(|gemini| gemini.model = model);
    }

    if let Some(timeout) = env_u64("TRIP_PLANNER_TIMEOUT_SECS")? {
        builder = builder.with_gemini(|gemini| gemini.timeout_secs = timeout);
    }

    if let Some(max_attempts) = env_u32("TRIP_PLANNER_MAX_ATTEMPTS")? {
        builder = builder.with_retry(|retry| retry.max_attempts = max_attempts);
    }

    if let Some(bind) = env_string("TRIP_PLANNER_BIND")? {
        builder = builder.with_server(|server| server.bind = bind);
    }

    if let Some(port) = env_u16("TRIP_PLANNER_PORT")? {
        builder = builder.with_server(|server| server.port = port);
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_u64(key: &str) -> Result<Option<u64>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {key} as u64"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_u32(key: &str) -> Result<Option<u32>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u32>()
            .with_context(|| format!("Failed to parse {key} as u32"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_u16(key: &str) -> Result<Option<u16>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u16>()
            .with_context(|| format!("Failed to parse {key} as a port number"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
