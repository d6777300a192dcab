use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RawVersionPayload;

/// Everything retrieved in one fetch cycle. Groups, versions and chains keep
/// the configured fetch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub protocols: Vec<RawProtocolGroup>,
    #[serde(default)]
    pub chains: Vec<RawChain>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProtocolGroup {
    pub id: String,
    #[serde(default)]
    pub versions: Vec<RawVersion>,
}

/// `payload` is `None` when the upstream fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVersion {
    pub id: String,
    #[serde(default)]
    pub payload: Option<RawVersionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChain {
    pub id: String,
    #[serde(default)]
    pub revenue_series: Option<Value>,
}
