use clap::Parser;
use crypto_seer::cli::{Cli, Commands};
use crypto_seer::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    crypto_seer::telemetry::init_logging(&config.telemetry.log_level)?;

    match cli.command {
        Commands::Predict(args) => {
            tracing::info!(count = args.count, timeframe = %args.timeframe, "Starting prediction");
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Prices: {}", config.history.prices_path.display());
            println!(
                "  News: {}",
                config
                    .history
                    .news_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string())
            );
            println!(
                "  Generator: {} ({})",
                config.generator.base_url, config.generator.model
            );
            println!("  Timeout: {}s", config.generator.timeout_secs);
        }
    }

    Ok(())
}
