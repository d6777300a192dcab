use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    helpers::{coerce_number, coerce_timestamp},
    model::DailyPoint,
};

/// Provider payload for one protocol version. Every field is kept as raw
/// JSON because the provider changes shapes between API versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVersionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvl: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees_series: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_series: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chains: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcap: Option<Value>,
}

pub const POINTS_FIELD: &str = "totalDataChart";
pub const TOTAL_FIELDS: [&str; 2] = ["total", "totalAllTime"];
pub const TVL_HISTORY_FIELD: &str = "totalLiquidityUSD";

/// TVL field resolved to one of its known shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TvlSource {
    /// chain -> amount, non-numeric amounts already zeroed
    ChainBreakdown(Vec<(String, f64)>),
    /// historical values, oldest first
    HistorySeries(Vec<f64>),
    Scalar(f64),
    Missing,
}

impl TvlSource {
    pub fn from_value(value: Option<&Value>) -> TvlSource {
        match value {
            Some(Value::Object(map)) => TvlSource::ChainBreakdown(
                map.iter()
                    .map(|(chain, amount)| {
                        (chain.to_owned(), coerce_number(amount).unwrap_or(0.0))
                    })
                    .collect(),
            ),
            Some(Value::Array(items)) if !items.is_empty() => {
                TvlSource::HistorySeries(
                    items.iter().map(history_value).collect(),
                )
            },
            Some(value) => match coerce_number(value) {
                Some(number) => TvlSource::Scalar(number),
                None => TvlSource::Missing,
            },
            None => TvlSource::Missing,
        }
    }

    /// Breakdowns are summed, histories yield their most recent element.
    pub fn value(&self) -> f64 {
        match self {
            TvlSource::ChainBreakdown(amounts) => {
                amounts.iter().map(|(_, amount)| amount).sum()
            },
            TvlSource::HistorySeries(values) => {
                values.last().copied().unwrap_or(0.0)
            },
            TvlSource::Scalar(value) => *value,
            TvlSource::Missing => 0.0,
        }
    }
}

fn history_value(item: &Value) -> f64 {
    let value = match item {
        Value::Object(map) => map.get(TVL_HISTORY_FIELD).and_then(coerce_number),
        Value::Array(pair) => pair.get(1).and_then(coerce_number),
        scalar => coerce_number(scalar),
    };
    value.unwrap_or(0.0)
}

/// Fees or revenue field resolved to one of its known shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSource {
    /// daily points, from a bare array or the legacy `totalDataChart`
    Points(Vec<DailyPoint>),
    /// simplified shape carrying only an all-time figure
    Total(f64),
    Missing,
}

impl SeriesSource {
    pub fn from_value(value: Option<&Value>) -> SeriesSource {
        match value {
            Some(Value::Array(items)) => SeriesSource::Points(parse_points(items)),
            Some(Value::Object(map)) => {
                if let Some(Value::Array(items)) = map.get(POINTS_FIELD) {
                    return SeriesSource::Points(parse_points(items));
                }

                TOTAL_FIELDS
                    .iter()
                    .find_map(|field| map.get(*field))
                    .map(|total| {
                        SeriesSource::Total(coerce_number(total).unwrap_or(0.0))
                    })
                    .unwrap_or(SeriesSource::Missing)
            },
            _ => SeriesSource::Missing,
        }
    }

    pub fn total(&self) -> f64 {
        match self {
            SeriesSource::Points(points) => {
                points.iter().map(|point| point.value).sum()
            },
            SeriesSource::Total(total) => *total,
            SeriesSource::Missing => 0.0,
        }
    }

    pub fn points(&self) -> &[DailyPoint] {
        match self {
            SeriesSource::Points(points) => points.as_slice(),
            _ => &[],
        }
    }
}

/// `[timestamp, value]` pairs. Entries without a usable timestamp are
/// dropped, unusable values count as zero.
fn parse_points(items: &[Value]) -> Vec<DailyPoint> {
    items
        .iter()
        .filter_map(|item| {
            let pair = item.as_array()?;
            let timestamp = coerce_timestamp(pair.first()?)?;
            let value = pair.get(1).and_then(coerce_number).unwrap_or(0.0);
            Some(DailyPoint::new(timestamp, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tvl_chain_breakdown_is_summed() {
        let value = json!({"ethereum": 100, "polygon": 50});
        let source = TvlSource::from_value(Some(&value));
        assert!(matches!(source, TvlSource::ChainBreakdown(_)));
        assert_eq!(source.value(), 150.0);
    }

    #[test]
    fn test_tvl_breakdown_zeroes_bad_amounts() {
        let value = json!({"ethereum": "100", "base": "n/a", "bsc": null});
        assert_eq!(TvlSource::from_value(Some(&value)).value(), 100.0);
    }

    #[test]
    fn test_tvl_history_takes_last() {
        let value = json!([10, 20, 30]);
        assert_eq!(TvlSource::from_value(Some(&value)).value(), 30.0);

        let value = json!([
            {"date": 1, "totalLiquidityUSD": 5.0},
            {"date": 2, "totalLiquidityUSD": 7.5}
        ]);
        assert_eq!(TvlSource::from_value(Some(&value)).value(), 7.5);

        let value = json!([[1, 3.0], [2, 4.0]]);
        assert_eq!(TvlSource::from_value(Some(&value)).value(), 4.0);
    }

    #[test]
    fn test_tvl_scalar_and_missing() {
        assert_eq!(TvlSource::from_value(Some(&json!("42.5"))).value(), 42.5);
        assert_eq!(TvlSource::from_value(Some(&json!(9))).value(), 9.0);
        assert_eq!(TvlSource::from_value(None), TvlSource::Missing);
        assert_eq!(
            TvlSource::from_value(Some(&json!("lots"))),
            TvlSource::Missing
        );
        assert_eq!(TvlSource::from_value(Some(&json!([]))), TvlSource::Missing);
        assert_eq!(TvlSource::from_value(Some(&json!(null))).value(), 0.0);
    }

    #[test]
    fn test_series_legacy_shape() {
        let value = json!({"totalDataChart": [[1704067200, 10], [1704153600, "5"]]});
        let source = SeriesSource::from_value(Some(&value));
        assert_eq!(source.total(), 15.0);
        assert_eq!(source.points().len(), 2);
    }

    #[test]
    fn test_series_bare_array_drops_bad_timestamps() {
        let value = json!([[1704067200, 10], ["later", 99], [1704153600, "x"], 5]);
        let source = SeriesSource::from_value(Some(&value));
        assert_eq!(
            source.points(),
            &[
                DailyPoint::new(1704067200, 10.0),
                DailyPoint::new(1704153600, 0.0)
            ]
        );
        assert_eq!(source.total(), 10.0);
    }

    #[test]
    fn test_series_simplified_shape() {
        let value = json!({"total": "1200.5"});
        let source = SeriesSource::from_value(Some(&value));
        assert_eq!(source, SeriesSource::Total(1200.5));
        assert!(source.points().is_empty());

        let value = json!({"totalAllTime": 8});
        assert_eq!(SeriesSource::from_value(Some(&value)).total(), 8.0);
    }

    #[test]
    fn test_series_missing() {
        assert_eq!(SeriesSource::from_value(None), SeriesSource::Missing);
        assert_eq!(
            SeriesSource::from_value(Some(&json!({"other": 1}))),
            SeriesSource::Missing
        );
        assert_eq!(SeriesSource::from_value(Some(&json!(12))).total(), 0.0);
    }

    #[test]
    fn test_payload_fields_default_to_none() {
        let payload: RawVersionPayload =
            serde_json::from_value(json!({"name": "Aave"})).unwrap();
        assert_eq!(payload.name, Some(json!("Aave")));
        assert!(payload.tvl.is_none());
        assert!(payload.revenue_series.is_none());
    }
}
