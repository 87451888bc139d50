//! Prompt construction for prediction requests
//!
//! Renders a bounded instruction text from the history store: the last ten
//! observations, the reference price, the sampling interval, and any news
//! context. The prompt always demands exactly the requested number of
//! positive values as a flat JSON array.

use crate::history::HistoryStore;

/// Builds deterministic prompts over a history store
pub struct PromptBuilder<'a> {
    store: &'a HistoryStore,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(store: &'a HistoryStore) -> Self {
        Self { store }
    }

    /// Render the instruction text for `target_count` predictions
    ///
    /// Never fails for any valid store state; an empty history renders a
    /// reference price of 0.
    pub fn build(&self, target_count: usize) -> String {
        let prices = self.store.prices();
        let reference_price = self.store.last_price().unwrap_or(0.0);
        let tail = &prices[prices.len().saturating_sub(10)..];
        let tail_json =
            serde_json::to_string_pretty(tail).unwrap_or_else(|_| "[]".to_string());

        let mut news_block = String::new();
        if !self.store.news().is_empty() {
            news_block.push_str("RECENT CONTEXT:\n");
            for (i, item) in self.store.news().iter().enumerate() {
                news_block.push_str(&format!("{}. [{}] {}\n", i + 1, item.time, item.text));
            }
            news_block.push('\n');
        }

        format!(
            "You are a financial AI. Predict exactly {target_count} future Bitcoin prices based on the trend.\n\
             \n\
             DATA:\n\
             Last 10 prices: {tail_json}\n\
             Current Price: {reference_price}\n\
             Interval: approx {interval} hours\n\
             \n\
             {news_block}\
             RULES:\n\
             1. Return ONLY a JSON array of {target_count} numbers. e.g. [50100.5, 50200.1, ...]\n\
             2. No text, no explanations.\n\
             3. Prices must be positive.\n",
            interval = self.store.sampling_interval_hours(),
        )
    }
}
