use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::bridge::BridgeOrchestrator;
use crate::client::GeminiClient;
use crate::config::Config;
use crate::error::BridgeError;
use crate::server;

use super::args::{Cli, Command, PlanArgs, ServeArgs};
use super::config_cmd;
use super::render;

/// Config is loaded per command: `plan` and `serve` need a valid one, while
/// `config` must still work when the saved file is broken.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Plan(args) => run_plan(args, &Config::load()?).await,
        Command::Serve(args) => run_serve(args, &Config::load()?).await,
        Command::Config(args) => {
            let (config, load_error) = Config::load_or_fallback();
            if let Some(err) = load_error {
                eprintln!("⚠️  Could not load configuration: {err:#}");
                eprintln!("   Showing the layers that still load; saving will overwrite the file.");
            }
            config_cmd::handle_config(&args, config)
        }
    }
}

fn build_orchestrator(config: &Config) -> Result<Arc<BridgeOrchestrator>> {
    let client = GeminiClient::new(&config.gemini, &config.retry)?;
    Ok(Arc::new(BridgeOrchestrator::new(Arc::new(client))))
}

async fn run_plan(args: PlanArgs, config: &Config) -> Result<()> {
    let orchestrator = build_orchestrator(config)?;

    eprintln!("✨ Building a travel plan for {}...", args.destination.trim());
    let plan = tokio::select! {
        result = orchestrator.generate_travel_plan(&args.destination, &args.duration) => result?,
        _ = tokio::signal::ctrl_c() => {
            debug!("interrupt received, abandoning plan generation");
            return Err(BridgeError::Cancelled.into());
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&plan).context("Failed to serialize travel plan")?;
        println!("{json}");
    } else {
        render::print_plan(&plan);
    }

    Ok(())
}

async fn run_serve(args: ServeArgs, config: &Config) -> Result<()> {
    if !config.gemini.has_api_key() {
        tracing::warn!(
            "no Gemini API key configured; every request will fail until GOOGLE_API_KEY is set"
        );
    }

    let orchestrator = build_orchestrator(config)?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let port = args.port.unwrap_or(config.server.port);
    server::run_serve(orchestrator, &bind, port).await
}
