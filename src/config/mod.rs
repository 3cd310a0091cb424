//! Configuration for the trip planner.
//!
//! Settings are layered in this order, later layers winning:
//! - built-in defaults
//! - the JSON file at `~/.trip-planner/config`
//! - environment variables (`GOOGLE_API_KEY`, `TRIP_PLANNER_*`)
//!
//! The resulting [`Config`] is passed explicitly to the Gemini client and the
//! HTTP server; nothing below this module reads the environment.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use types::{Config, GeminiSettings, RetrySettings};

pub use constants::API_KEY_ENV_VAR;
