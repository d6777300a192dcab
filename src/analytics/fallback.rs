//! Annualized revenue fallback.
//!
//! This is an estimation policy, not a model: when a series covers fewer
//! than [`MIN_COVERED_MONTHS`] months, the most recent month stands in for
//! the last 30 days, is annualized (x12) and spread evenly over the twelve
//! months of the processing year. Downstream ratios depend on the exact
//! threshold and the even split.

use chrono::{DateTime, Datelike, Utc};

use crate::model::{MonthKey, MonthlySeries};

pub const MIN_COVERED_MONTHS: usize = 12;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Result of applying the fallback to a series.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOutcome {
    pub series: MonthlySeries,
    pub estimated: bool,
}

pub fn is_covered(series: &MonthlySeries) -> bool {
    series.len() >= MIN_COVERED_MONTHS
}

/// Latest month value scaled to a year. Zero for an empty series.
pub fn annualized_run_rate(series: &MonthlySeries) -> f64 {
    series.latest().map(|(_, value)| value).unwrap_or(0.0) * MONTHS_PER_YEAR
}

pub fn apply(series: &MonthlySeries, now: DateTime<Utc>) -> FallbackOutcome {
    if is_covered(series) {
        return FallbackOutcome {
            series: series.clone(),
            estimated: false,
        };
    }

    let monthly = annualized_run_rate(series) / MONTHS_PER_YEAR;
    let series = MonthKey::months_of_year(now.year())
        .into_iter()
        .map(|key| (key, monthly))
        .collect();

    FallbackOutcome {
        series,
        estimated: true,
    }
}
