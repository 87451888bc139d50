//! Command-line interface
//!
//! Thin glue over the library: loads the history store, runs a single
//! prediction, and prints the forecast paired with its future timestamps.

use crate::config::Config;
use crate::history::HistoryStore;
use crate::llm::OllamaClient;
use crate::predictor::Predictor;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "crypto-seer",
    about = "LLM-backed cryptocurrency price forecaster",
    version
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request one forecast from the configured endpoint
    Predict(PredictArgs),
    /// Print the resolved configuration
    Config,
}

#[derive(Args)]
pub struct PredictArgs {
    /// Number of future prices to request
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Timeframe token pacing the forecast timestamps (1h, 4h, 1d, 5d, 1wk, 1mo)
    #[arg(short, long, default_value = "1d")]
    pub timeframe: String,
}

impl PredictArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = HistoryStore::load(
            &config.history.prices_path,
            config.history.news_path.as_deref(),
        )?;
        let client = OllamaClient::new(config.generator.client_config());
        let predictor = Predictor::new(store, client);

        let prices = predictor.predict(self.count)?;
        let dates = predictor.generate_future_dates(prices.len(), &self.timeframe);

        let forecast: Vec<serde_json::Value> = dates
            .into_iter()
            .zip(prices)
            .map(|(time, price)| serde_json::json!({ "time": time, "price": price }))
            .collect();

        println!("{}", serde_json::to_string_pretty(&forecast)?);
        Ok(())
    }
}
