use anyhow::Result;

use crate::config::Config;

use super::args::ConfigArgs;

pub(crate) fn handle_config(args: &ConfigArgs, mut config: Config) -> Result<()> {
    if args.show || !args.has_updates() {
        print_config(&config)?;
        return Ok(());
    }

    if let Some(ref api_key) = args.api_key {
        config.gemini.api_key = api_key.trim().to_string();
    }

    if let Some(ref model) = args.model {
        config.gemini.model = model.trim().to_string();
    }

    if let Some(timeout) = args.timeout {
        config.gemini.timeout_secs = timeout;
    }

    if let Some(max_attempts) = args.max_attempts {
        config.retry.max_attempts = max_attempts;
    }

    config.validate()?;
    config.save()?;

    println!(
        "✅ Configuration saved to {}",
        Config::config_path()?.display()
    );
    print_config(&config)
}

fn print_config(config: &Config) -> Result<()> {
    println!("📋 Current configuration ({}):", Config::config_path()?.display());
    println!("   API Key: {}", config.gemini.masked_api_key());
    println!("   Model: {}", config.gemini.model);
    println!("   Base URL: {}", config.gemini.base_url);
    println!("   Timeout: {}s", config.gemini.timeout_secs);
    println!("   Max Attempts: {}", config.retry.max_attempts);
    println!("   Listen: {}:{}", config.server.bind, config.server.port);
    Ok(())
}
