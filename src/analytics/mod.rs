//! Normalization and derivation stages
//!
//! Every stage is a synchronous function from immutable input to a new
//! value. Nothing here performs IO or returns an error.

pub mod aggregator;
pub mod fallback;
pub mod growth;
pub mod monthly;
pub mod normalizer;
pub mod pipeline;
pub mod ranking;
pub mod valuation;

pub use pipeline::{process, PipelineOptions};
pub use ranking::RankingMetric;
