use anyhow::Result;

use super::types::{Config, GeminiSettings, RetrySettings, ServerSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) gemini: GeminiSettings,
    pub(super) retry: RetrySettings,
    pub(super) server: ServerSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            gemini: GeminiSettings::default(),
            retry: RetrySettings::default(),
            server: ServerSettings::default(),
        }
    }

    pub fn with_gemini<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut GeminiSettings),
    {
        update(&mut self.gemini);
        self
    }

    pub fn with_retry<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut RetrySettings),
    {
        update(&mut self.retry);
        self
    }

    pub fn with_server<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ServerSettings),
    {
        update(&mut self.server);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            gemini: self.gemini,
            retry: self.retry,
            server: self.server,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
