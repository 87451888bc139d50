//! Prediction pipeline orchestration
//!
//! Ties prompt construction, the generation request, and numeric recovery
//! together, and enforces the quantity guarantees: over-generation is
//! clipped to the requested count, moderate under-generation (at least
//! half the target) is accepted as-is and surfaced at its parsed length.

use crate::history::{HistoryStore, TIME_FORMAT};
use crate::llm::TextGenerator;
use crate::parse;
use crate::prompt::PromptBuilder;
use thiserror::Error;

/// Per-call prediction failures; terminal, never retried internally
#[derive(Debug, Error)]
pub enum PredictError {
    /// Transport or endpoint fault, carrying the client's reason
    #[error("AI request failed: {reason}")]
    RequestFailed { reason: String },
    /// No numeric content recoverable from the response
    #[error("AI returned invalid format (could not parse numbers)")]
    UnparseableResponse,
    /// Fewer than half the requested numbers were recovered
    #[error("AI returned too few data points ({parsed} vs {requested} requested)")]
    InsufficientData { parsed: usize, requested: usize },
}

/// Orchestrates one prediction at a time over an immutable history store
///
/// Holds no internal synchronization; concurrent call sites need their own
/// instance.
pub struct Predictor<C: TextGenerator> {
    store: HistoryStore,
    client: C,
}

impl<C: TextGenerator> Predictor<C> {
    pub fn new(store: HistoryStore, client: C) -> Self {
        Self { store, client }
    }

    /// The underlying history store
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Request `target_count` future prices from the generation endpoint
    ///
    /// Returns at most `target_count` values in the model's output order.
    /// The result may be shorter when the model under-generates but still
    /// clears the 50% acceptance threshold.
    pub fn predict(&self, target_count: usize) -> Result<Vec<f64>, PredictError> {
        tracing::info!(target_count, "Requesting predictions from AI");

        let prompt = PromptBuilder::new(&self.store).build(target_count);
        let text = self
            .client
            .generate(&prompt)
            .map_err(|e| PredictError::RequestFailed {
                reason: e.to_string(),
            })?;

        let mut values =
            parse::extract_series(&text, target_count).ok_or(PredictError::UnparseableResponse)?;

        // Model output order is taken as time order
        if values.len() > target_count {
            values.truncate(target_count);
        }

        if (values.len() as f64) < target_count as f64 * 0.5 {
            return Err(PredictError::InsufficientData {
                parsed: values.len(),
                requested: target_count,
            });
        }

        tracing::info!(parsed = values.len(), target_count, "Prediction accepted");
        Ok(values)
    }

    /// Future timestamps paced by the timeframe token, starting one
    /// interval after the last known observation
    ///
    /// Supported tokens: 1h, 4h, 1d, 5d, 1wk, 1mo; anything else paces
    /// daily. Empty history yields an empty sequence.
    pub fn generate_future_dates(&self, count: usize, timeframe: &str) -> Vec<String> {
        let Some(last) = self.store.last_time() else {
            return Vec::new();
        };

        let step_hours = timeframe_hours(timeframe);
        (1..=count as i64)
            .map(|i| {
                (last + chrono::Duration::hours(step_hours * i))
                    .format(TIME_FORMAT)
                    .to_string()
            })
            .collect()
    }
}

fn timeframe_hours(timeframe: &str) -> i64 {
    match timeframe {
        "1h" => 1,
        "4h" => 4,
        "1d" => 24,
        "5d" => 24 * 5,
        "1wk" => 24 * 7,
        "1mo" => 24 * 30,
        _ => 24,
    }
}
