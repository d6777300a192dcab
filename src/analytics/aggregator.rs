use super::monthly;
use crate::model::{AggregatedMetrics, ProtocolGroupRecord, VersionRecord};

/// Folds the normalized versions of one group, in fetch order, into a
/// [`ProtocolGroupRecord`]. Returns `None` when no version was normalized.
///
/// Display metadata always comes from the first version: it is the first
/// member that normalized successfully in fetch order.
pub fn aggregate_group(
    name: &str,
    versions: Vec<VersionRecord>,
) -> Option<ProtocolGroupRecord> {
    if versions.is_empty() {
        return None;
    }

    let aggregated = versions.iter().fold(
        AggregatedMetrics::default(),
        |acc, version| AggregatedMetrics {
            tvl: acc.tvl + version.tvl,
            fees: acc.fees + version.fees,
            revenue: acc.revenue + version.revenue,
        },
    );
    let monthly_revenue =
        monthly::merge(versions.iter().map(|version| &version.monthly_revenue));

    Some(ProtocolGroupRecord {
        name: name.to_owned(),
        versions,
        aggregated,
        monthly_revenue,
    })
}
