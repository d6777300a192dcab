use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{
    aggregator::aggregate_group,
    fallback, growth, monthly,
    normalizer::normalize_version,
    ranking::{rank, RankingMetric, DEFAULT_TOP_N},
    valuation::valuations,
};
use crate::{
    model::{
        ChainRecord, ProcessedProtocol, ProcessedSnapshot, ProtocolGroupRecord,
        ProtocolMetrics, VersionRecord,
    },
    types::{RawChain, RawProtocolGroup, RawSnapshot, SeriesSource},
};

/// Everything the pipeline would otherwise read from the process: ranking
/// parameters, FDV table and the clock used by the fallback policy.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub top_n: usize,
    pub must_include: Option<String>,
    pub metric: RankingMetric,
    pub fdv: Vec<(String, f64)>,
    pub now: DateTime<Utc>,
}

impl PipelineOptions {
    pub fn new(now: DateTime<Utc>) -> PipelineOptions {
        PipelineOptions {
            top_n: DEFAULT_TOP_N,
            must_include: None,
            metric: RankingMetric::default(),
            fdv: Vec::new(),
            now,
        }
    }
}

/// Runs every stage over one raw snapshot. Partial input always yields a
/// complete output: failed versions, empty groups and missing chain series
/// degrade to omissions or defaults.
pub fn process(
    snapshot: &RawSnapshot,
    options: &PipelineOptions,
) -> ProcessedSnapshot {
    let candidates: Vec<ProcessedProtocol> = snapshot
        .protocols
        .iter()
        .filter_map(build_group)
        .map(|group| processed_protocol(&group))
        .collect();

    let protocols = rank(
        candidates,
        options.metric,
        options.top_n,
        options.must_include.as_deref(),
    );
    let valuations = valuations(&protocols, &options.fdv);

    let chains = snapshot
        .chains
        .iter()
        .map(|chain| (chain.id.to_owned(), chain_record(chain, options.now)))
        .collect::<BTreeMap<_, _>>();

    info!(
        "Processed {} protocols, {} chains",
        protocols.len(),
        chains.len()
    );

    ProcessedSnapshot {
        timestamp: options.now,
        protocols,
        chains,
        valuations,
    }
}

/// Normalizes the fetched versions of a group and folds them.
pub fn build_group(group: &RawProtocolGroup) -> Option<ProtocolGroupRecord> {
    let versions: Vec<VersionRecord> = group
        .versions
        .iter()
        .filter_map(|version| match &version.payload {
            Some(payload) => Some(normalize_version(&version.id, payload)),
            None => {
                warn!(
                    "No data for version {} of {}, skipping",
                    version.id, group.id
                );
                None
            },
        })
        .collect();

    let record = aggregate_group(&group.id, versions);
    if record.is_none() {
        warn!("No version of {} could be normalized, omitting", group.id);
    }
    record
}

pub fn processed_protocol(group: &ProtocolGroupRecord) -> ProcessedProtocol {
    let main = group.representative();

    ProcessedProtocol {
        name: group.name.to_owned(),
        display_name: main.name.to_owned(),
        symbol: main.symbol.to_owned(),
        chains: main.chains.clone(),
        metrics: ProtocolMetrics {
            tvl: group.aggregated.tvl,
            fees: group.aggregated.fees,
            revenue: group.aggregated.revenue,
            market_cap: main.market_cap,
            qoq_growth: growth::qoq_growth(&group.monthly_revenue),
            mom_growth: growth::mom_growth(&group.monthly_revenue),
        },
        monthly_revenue: group.monthly_revenue.clone(),
    }
}

pub fn chain_record(chain: &RawChain, now: DateTime<Utc>) -> ChainRecord {
    if chain.revenue_series.is_none() {
        warn!("No revenue data for chain {}", chain.id);
    }

    let source = SeriesSource::from_value(chain.revenue_series.as_ref());
    let observed = monthly::aggregate(source.points());
    let outcome = fallback::apply(&observed, now);

    if outcome.estimated {
        info!(
            "Chain {} covers {} months, using annualized estimate",
            chain.id,
            observed.len()
        );
    }

    ChainRecord {
        monthly_revenue: outcome.series,
        estimated: outcome.estimated,
    }
}
