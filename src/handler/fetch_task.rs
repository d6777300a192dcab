use std::path::Path;

use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    configuration::{AppState, ProtocolGroupConfig, State},
    error::Error,
    provider::{snapshot, DataType},
    types::{
        RawChain, RawProtocolGroup, RawSnapshot, RawVersion, RawVersionPayload,
    },
};

pub async fn fetch_and_store(app_state: AppState<State>) -> Result<(), Error> {
    let data = fetch_all_data(&app_state).await;
    snapshot::write_raw_snapshot(
        Path::new(&app_state.config.raw_data_path),
        &data,
    )?;
    info!("Data collection completed successfully");

    Ok(())
}

pub fn start_task(app_state: AppState<State>) -> JoinHandle<Result<(), Error>> {
    tokio::spawn(async move { fetch_and_store(app_state).await })
}

/// Retrieves every configured group and chain. Failed requests are recorded
/// as absent payloads, never as errors.
pub async fn fetch_all_data(app_state: &AppState<State>) -> RawSnapshot {
    let timestamp = Utc::now();
    let mut protocols = Vec::new();

    for group in &app_state.config.protocols {
        protocols.push(fetch_group(app_state, group).await);
    }

    let chains = join_all(
        app_state
            .config
            .chains
            .iter()
            .map(|chain| fetch_chain(app_state, chain)),
    )
    .await;

    RawSnapshot {
        timestamp,
        protocols,
        chains,
    }
}

async fn fetch_group(
    app_state: &AppState<State>,
    group: &ProtocolGroupConfig,
) -> RawProtocolGroup {
    let mut versions = Vec::new();

    for id in &group.versions {
        info!("Fetching data for {}", id);
        let payload = fetch_version(app_state, id).await;
        if payload.is_none() {
            error!("Failed to fetch data for {}", id);
        }
        versions.push(RawVersion {
            id: id.to_owned(),
            payload,
        });
    }

    RawProtocolGroup {
        id: group.name.to_owned(),
        versions,
    }
}

async fn fetch_version(
    app_state: &AppState<State>,
    id: &str,
) -> Option<RawVersionPayload> {
    let http = &app_state.http;
    let protocol = http.fetch_protocol_data(id).await?;

    let (fees, revenue) = tokio::join!(
        http.fetch_protocol_fees(id, DataType::DailyFees),
        http.fetch_protocol_fees(id, DataType::DailyRevenue),
    );

    Some(build_payload(&protocol, fees, revenue))
}

async fn fetch_chain(app_state: &AppState<State>, chain: &str) -> RawChain {
    info!("Fetching data for chain {}", chain);
    let revenue_series = app_state
        .http
        .fetch_chain_data(chain, DataType::DailyRevenue)
        .await;

    RawChain {
        id: chain.to_owned(),
        revenue_series,
    }
}

/// Copies the fields the analytics read out of a `/protocol` document,
/// untouched.
pub fn build_payload(
    protocol: &Value,
    fees: Option<Value>,
    revenue: Option<Value>,
) -> RawVersionPayload {
    let field = |name: &str| protocol.get(name).cloned();

    RawVersionPayload {
        tvl: field("tvl"),
        fees_series: fees,
        revenue_series: revenue,
        name: field("name"),
        symbol: field("symbol"),
        chains: field("chains"),
        mcap: field("mcap"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_build_payload() {
        let protocol = json!({
            "name": "Lido",
            "symbol": "LDO",
            "chains": ["Ethereum"],
            "tvl": [{"date": 1, "totalLiquidityUSD": 10}],
            "mcap": 1.5e9,
            "description": "ignored"
        });
        let revenue = json!({"totalDataChart": [[1, 2]]});

        let payload = build_payload(&protocol, None, Some(revenue.clone()));

        assert_eq!(payload.name, Some(json!("Lido")));
        assert_eq!(payload.symbol, Some(json!("LDO")));
        assert_eq!(payload.mcap, Some(json!(1.5e9)));
        assert!(payload.fees_series.is_none());
        assert_eq!(payload.revenue_series, Some(revenue));
    }

    #[test]
    fn test_build_payload_from_non_object() {
        let payload = build_payload(&json!([1, 2]), None, None);
        assert_eq!(payload, RawVersionPayload::default());
    }
}
