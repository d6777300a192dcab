use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MonthlySeries;

// =============================================================================
// NORMALIZED RECORDS
// =============================================================================

/// One deployment of a protocol, built once from one raw payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub chains: Vec<String>,
    pub tvl: f64,
    pub fees: f64,
    pub revenue: f64,
    pub market_cap: f64,
    pub monthly_revenue: MonthlySeries,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub tvl: f64,
    pub fees: f64,
    pub revenue: f64,
}

/// A protocol family folded from its successfully normalized versions.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolGroupRecord {
    pub name: String,
    /// Fetch order. The first entry is the representative member.
    pub versions: Vec<VersionRecord>,
    pub aggregated: AggregatedMetrics,
    pub monthly_revenue: MonthlySeries,
}

impl ProtocolGroupRecord {
    pub fn representative(&self) -> &VersionRecord {
        &self.versions[0]
    }

    pub fn version(&self, id: &str) -> Option<&VersionRecord> {
        self.versions.iter().find(|version| version.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecord {
    pub monthly_revenue: MonthlySeries,
    /// True when the series was synthesized by the annualized fallback.
    pub estimated: bool,
}

// =============================================================================
// PROCESSED OUTPUT
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMetrics {
    pub tvl: f64,
    pub fees: f64,
    pub revenue: f64,
    pub market_cap: f64,
    pub qoq_growth: f64,
    pub mom_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedProtocol {
    pub name: String,
    pub display_name: String,
    pub symbol: String,
    pub chains: Vec<String>,
    pub metrics: ProtocolMetrics,
    pub monthly_revenue: MonthlySeries,
}

/// FDV over annualized revenue. `ratio` is `None` when annualized revenue
/// is not positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub name: String,
    pub fdv: f64,
    pub annual_revenue: f64,
    pub ratio: Option<f64>,
    pub ratio_defined: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedSnapshot {
    pub timestamp: DateTime<Utc>,
    pub protocols: Vec<ProcessedProtocol>,
    pub chains: BTreeMap<String, ChainRecord>,
    pub valuations: Vec<Valuation>,
}
