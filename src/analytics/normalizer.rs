use serde_json::Value;

use super::monthly;
use crate::{
    helpers::coerce_number_or_zero,
    model::VersionRecord,
    types::{RawVersionPayload, SeriesSource, TvlSource},
};

/// Coerces one raw version payload into a [`VersionRecord`]. Never fails:
/// absent or malformed fields fall back to zero or the documented default.
pub fn normalize_version(id: &str, payload: &RawVersionPayload) -> VersionRecord {
    let tvl = TvlSource::from_value(payload.tvl.as_ref());
    let fees = SeriesSource::from_value(payload.fees_series.as_ref());
    let revenue = SeriesSource::from_value(payload.revenue_series.as_ref());

    VersionRecord {
        id: id.to_owned(),
        name: string_field(payload.name.as_ref())
            .unwrap_or_else(|| id.to_owned()),
        symbol: string_field(payload.symbol.as_ref()).unwrap_or_default(),
        chains: chains_field(payload.chains.as_ref()),
        tvl: tvl.value(),
        fees: fees.total(),
        revenue: revenue.total(),
        market_cap: coerce_number_or_zero(payload.mcap.as_ref()),
        monthly_revenue: monthly::aggregate(revenue.points()),
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.to_owned()),
        _ => None,
    }
}

/// String entries of a chain list, first occurrence wins.
fn chains_field(value: Option<&Value>) -> Vec<String> {
    let mut chains: Vec<String> = Vec::new();

    if let Some(Value::Array(items)) = value {
        for chain in items.iter().filter_map(Value::as_str) {
            if !chains.iter().any(|known| known == chain) {
                chains.push(chain.to_owned());
            }
        }
    }

    chains
}
