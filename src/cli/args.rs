use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::commands;

/// Entry point for the `trip-planner` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "trip-planner",
    about = "Turn a destination and trip length into a structured travel plan",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a travel plan and print it.
    Plan(PlanArgs),
    /// Serve the plan generator over HTTP.
    Serve(ServeArgs),
    /// Show or update the saved configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Where to go (e.g. Tokyo, Paris, New York)
    pub destination: String,

    /// How long (e.g. "2 nights 3 days")
    pub duration: String,

    /// Print the plan as raw JSON instead of a formatted itinerary
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (defaults to the configured bind address)
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on (defaults to the configured port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Set the Gemini API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the Gemini model
    #[arg(long)]
    pub model: Option<String>,

    /// Set the request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set how many attempts the provider call may take (1 disables retry)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Only print the current configuration
    #[arg(long)]
    pub show: bool,
}

impl ConfigArgs {
    pub fn has_updates(&self) -> bool {
        self.api_key.is_some()
            || self.model.is_some()
            || self.timeout.is_some()
            || self.max_attempts.is_some()
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
