use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiSettings,
    pub retry: RetrySettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl GeminiSettings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Key with everything but the last four characters hidden, for display.
    pub fn masked_api_key(&self) -> String {
        let key = self.api_key.trim();
        if key.is_empty() {
            return "(not set)".to_string();
        }
        let visible: String = key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{visible}")
    }
}

/// Opt-in retry around the provider call. `max_attempts == 1` means a single
/// attempt with no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_jitter_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub gemini: Option<FileGeminiSettings>,
    #[serde(default)]
    pub retry: Option<FileRetrySettings>,
    #[serde(default)]
    pub server: Option<FileServerSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileGeminiSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileRetrySettings {
    pub max_attempts: Option<u32>,
    pub initial_backoff_ms: Option<u64>,
    pub max_jitter_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileServerSettings {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

// Serialization helpers
#[derive(Serialize)]
pub(super) struct PersistedConfig<'a> {
    pub gemini: PersistedGemini<'a>,
    pub retry: PersistedRetry,
    pub server: PersistedServer<'a>,
}

#[derive(Serialize)]
pub(super) struct PersistedGemini<'a> {
    pub api_key: &'a str,
    pub base_url: &'a str,
    pub model: &'a str,
    pub timeout_secs: u64,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub(super) struct PersistedRetry {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_jitter_ms: u64,
}

#[derive(Serialize)]
pub(super) struct PersistedServer<'a> {
    pub bind: &'a str,
    pub port: u16,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        PersistedConfig {
            gemini: PersistedGemini {
                api_key: &config.gemini.api_key,
                base_url: &config.gemini.base_url,
                model: &config.gemini.model,
                timeout_secs: config.gemini.timeout_secs,
                user_agent: &config.gemini.user_agent,
            },
            retry: PersistedRetry {
                max_attempts: config.retry.max_attempts,
                initial_backoff_ms: config.retry.initial_backoff_ms,
                max_jitter_ms: config.retry.max_jitter_ms,
            },
            server: PersistedServer {
                bind: &config.server.bind,
                port: config.server.port,
            },
        }
    }
}
