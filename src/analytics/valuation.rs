use std::cmp::Ordering;

use super::fallback;
use crate::model::{MonthlySeries, ProcessedProtocol, Valuation};

pub const ANNUAL_WINDOW_MONTHS: usize = 12;

/// Sum of the twelve most recent months present in the series.
pub fn last_12_months_revenue(series: &MonthlySeries) -> f64 {
    series.values_desc().take(ANNUAL_WINDOW_MONTHS).sum()
}

/// Trailing twelve months, or the x12 run rate of the latest month when the
/// trailing sum is exactly zero.
pub fn annualized_revenue(series: &MonthlySeries) -> f64 {
    let revenue = last_12_months_revenue(series);
    if revenue == 0.0 {
        return fallback::annualized_run_rate(series);
    }
    revenue
}

/// FDV over annualized revenue, undefined unless revenue is positive.
pub fn fdv_ratio(fdv: f64, annual_revenue: f64) -> Option<f64> {
    (annual_revenue > 0.0).then(|| fdv / annual_revenue)
}

/// Valuations for every protocol with a configured FDV, cheapest first and
/// undefined ratios last. FDV entries match the display name or the group
/// name, case-insensitively.
pub fn valuations(
    protocols: &[ProcessedProtocol],
    fdv: &[(String, f64)],
) -> Vec<Valuation> {
    let mut data: Vec<Valuation> = protocols
        .iter()
        .filter_map(|protocol| {
            let value = lookup_fdv(protocol, fdv)?;
            let annual_revenue = annualized_revenue(&protocol.monthly_revenue);
            let ratio = fdv_ratio(value, annual_revenue);

            Some(Valuation {
                name: protocol.display_name.to_owned(),
                fdv: value,
                annual_revenue,
                ratio,
                ratio_defined: ratio.is_some(),
            })
        })
        .collect();

    data.sort_by(|a, b| match (a.ratio, b.ratio) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    data
}

fn lookup_fdv(protocol: &ProcessedProtocol, fdv: &[(String, f64)]) -> Option<f64> {
    let display_name = protocol.display_name.to_lowercase();
    let name = protocol.name.to_lowercase();

    fdv.iter()
        .find(|(key, _)| {
            let key = key.to_lowercase();
            key == display_name || key == name
        })
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MonthKey, ProtocolMetrics};

    fn series(values: &[f64]) -> MonthlySeries {
        MonthKey::months_of_year(2023)
            .into_iter()
            .chain(MonthKey::months_of_year(2024))
            .zip(values.iter().copied())
            .collect()
    }

    fn protocol(name: &str, display: &str, values: &[f64]) -> ProcessedProtocol {
        ProcessedProtocol {
            name: name.to_owned(),
            display_name: display.to_owned(),
            symbol: String::new(),
            chains: Vec::new(),
            metrics: ProtocolMetrics::default(),
            monthly_revenue: series(values),
        }
    }

    #[test]
    fn test_last_12_months_uses_most_recent() {
        let s = series(&[100.0; 15]);
        assert_eq!(last_12_months_revenue(&s), 1200.0);
        assert_eq!(last_12_months_revenue(&MonthlySeries::new()), 0.0);
    }

    #[test]
    fn test_annualized_falls_back_to_run_rate() {
        let s = series(&[0.0, 0.0]);
        assert_eq!(annualized_revenue(&s), 0.0);

        let s = series(&[5.0, -5.0]);
        assert_eq!(annualized_revenue(&s), -60.0);

        let s = series(&[10.0, 20.0]);
        assert_eq!(annualized_revenue(&s), 30.0);
    }

    #[test]
    fn test_fdv_ratio_undefined_without_revenue() {
        assert_eq!(fdv_ratio(1000.0, 100.0), Some(10.0));
        assert_eq!(fdv_ratio(1000.0, 0.0), None);
        assert_eq!(fdv_ratio(1000.0, -1.0), None);
    }

    #[test]
    fn test_valuations_sorted_with_undefined_last() {
        let protocols = vec![
            protocol("aave", "Aave", &[10.0; 12]),
            protocol("lido", "Lido", &[]),
            protocol("jupiter", "Jupiter", &[100.0; 12]),
            protocol("fluid", "Fluid", &[1.0]),
        ];
        let fdv = vec![
            (String::from("AAVE"), 1200.0),
            (String::from("lido"), 500.0),
            (String::from("JUPITER"), 2400.0),
        ];

        let data = valuations(&protocols, &fdv);

        let names: Vec<&str> = data.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Jupiter", "Aave", "Lido"]);
        assert_eq!(data[0].ratio, Some(2.0));
        assert_eq!(data[1].ratio, Some(10.0));
        assert_eq!(data[2].ratio, None);
        assert!(!data[2].ratio_defined);
    }
}
