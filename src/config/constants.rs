pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_MAX_JITTER_MS: u64 = 250;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8888;
pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";
