use std::{fmt, str::FromStr};

use crate::{error::Error, model::ProcessedProtocol};

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingMetric {
    #[default]
    MarketCap,
    Tvl,
    Fees,
    Revenue,
    QoqGrowth,
}

impl RankingMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMetric::MarketCap => "market_cap",
            RankingMetric::Tvl => "tvl",
            RankingMetric::Fees => "fees",
            RankingMetric::Revenue => "revenue",
            RankingMetric::QoqGrowth => "qoq_growth",
        }
    }

    pub fn value(&self, protocol: &ProcessedProtocol) -> f64 {
        let metrics = &protocol.metrics;
        match self {
            RankingMetric::MarketCap => metrics.market_cap,
            RankingMetric::Tvl => metrics.tvl,
            RankingMetric::Fees => metrics.fees,
            RankingMetric::Revenue => metrics.revenue,
            RankingMetric::QoqGrowth => metrics.qoq_growth,
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RankingMetric {
    type Err = Error;

    fn from_str(value: &str) -> Result<RankingMetric, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "market_cap" | "mcap" => Ok(RankingMetric::MarketCap),
            "tvl" => Ok(RankingMetric::Tvl),
            "fees" => Ok(RankingMetric::Fees),
            "revenue" => Ok(RankingMetric::Revenue),
            "qoq_growth" => Ok(RankingMetric::QoqGrowth),
            _ => Err(Error::InvalidOption {
                option: format!(
                    "ranking metric '{}'. Valid options: market_cap, tvl, fees, revenue, qoq_growth",
                    value
                ),
            }),
        }
    }
}

/// Top `top_n` protocols by `metric`, descending, ties kept in input
/// order. A `must_include` protocol (matched on name, case-insensitive)
/// that missed the cut is appended after the top `top_n`.
pub fn rank(
    candidates: Vec<ProcessedProtocol>,
    metric: RankingMetric,
    top_n: usize,
    must_include: Option<&str>,
) -> Vec<ProcessedProtocol> {
    let mut sorted = candidates;
    sorted.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));

    let mut rest = sorted.split_off(top_n.min(sorted.len()));
    let mut ranked = sorted;

    if let Some(name) = must_include {
        let wanted = name.to_lowercase();
        let matches = |p: &ProcessedProtocol| p.name.to_lowercase() == wanted;
        if !ranked.iter().any(matches) {
            if let Some(position) = rest.iter().position(matches) {
                ranked.push(rest.swap_remove(position));
            }
        }
    }

    ranked
}
