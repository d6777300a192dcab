//! Canonical records
//!
//! Value types produced by the analytics stages. Time-series primitives live
//! in their own files, records and output shapes are consolidated in
//! models.rs.

mod models;
mod month_key;
mod monthly_series;

pub use models::*;
pub use month_key::MonthKey;
pub use monthly_series::{DailyPoint, MonthlySeries};
