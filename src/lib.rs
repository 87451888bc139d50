//! crypto-seer: LLM-backed cryptocurrency price forecasting
//!
//! This library provides the core components for:
//! - Loading file-backed price history and news context
//! - Bounded prompt construction from noisy historical data
//! - Single-shot requests to a local Ollama text-generation endpoint
//! - Multi-strategy numeric recovery from unstructured model output
//! - Orchestration with truncation and acceptance thresholds
//! - Future timestamp generation aligned to the historical cadence

pub mod cli;
pub mod config;
pub mod history;
pub mod llm;
pub mod parse;
pub mod predictor;
pub mod prompt;
pub mod telemetry;
