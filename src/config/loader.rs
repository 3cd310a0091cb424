use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};

use super::Config;
use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfig, PersistedConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".trip-planner/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = Self::builder();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;

        let config = builder.build()?;
        validate(&config)?;
        Ok(config)
    }

    /// Like [`Config::load`], but never fails. When a layer is broken the
    /// layers below it are used instead and the original error is handed
    /// back, so `config` can still show and rewrite a bad file.
    pub fn load_or_fallback() -> (Self, Option<anyhow::Error>) {
        let err = match Self::load() {
            Ok(config) => return (config, None),
            Err(err) => err,
        };

        let file_only = Self::config_path().and_then(|path| {
            let builder = if path.exists() {
                Self::apply_file(Self::builder(), &path)?
            } else {
                Self::builder()
            };
            let config = builder.build()?;
            validate(&config)?;
            Ok(config)
        });

        let config = match file_only {
            Ok(config) => config,
            Err(_) => Self::defaults(),
        };
        (config, Some(err))
    }

    fn defaults() -> Self {
        let ConfigBuilder {
            gemini,
            retry,
            server,
        } = Self::builder();
        Config {
            gemini,
            retry,
            server,
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        Ok(file.apply(builder))
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> ConfigBuilder {
        let FileConfig {
            gemini,
            retry,
            server,
        } = self;

        let gemini = gemini.unwrap_or_default();
        let retry = retry.unwrap_or_default();
        let server = server.unwrap_or_default();

        builder
            .with_gemini(|settings| {
                if let Some(api_key) = gemini.api_key {
                    settings.api_key = api_key;
                }
                if let Some(base_url) = gemini.base_url {
                    settings.base_url = base_url;
                }
                if let Some(model) = gemini.model {
                    settings.model = model;
                }
                if let Some(timeout) = gemini.timeout_secs {
                    settings.timeout_secs = timeout;
                }
                if let Some(user_agent) = gemini.user_agent {
                    settings.user_agent = user_agent;
                }
            })
            .with_retry(|settings| {
                if let Some(max_attempts) = retry.max_attempts {
                    settings.max_attempts = max_attempts;
                }
                if let Some(backoff) = retry.initial_backoff_ms {
                    settings.initial_backoff_ms = backoff;
                }
                if let Some(jitter) = retry.max_jitter_ms {
                    settings.max_jitter_ms = jitter;
                }
            })
            .with_server(|settings| {
                if let Some(bind) = server.bind {
                    settings.bind = bind;
                }
                if let Some(port) = server.port {
                    settings.port = port;
                }
            })
    }
}
