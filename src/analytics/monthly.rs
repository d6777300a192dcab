use crate::model::{DailyPoint, MonthKey, MonthlySeries};

/// Buckets daily points into UTC calendar-month totals. Points whose
/// timestamp has no four-digit UTC year are skipped.
pub fn aggregate(points: &[DailyPoint]) -> MonthlySeries {
    points
        .iter()
        .filter_map(|point| {
            MonthKey::from_timestamp(point.timestamp)
                .map(|key| (key, point.value))
        })
        .collect()
}

/// Month-wise sum of several series. A month missing from one input counts
/// as zero for that input.
pub fn merge<'a, I>(series: I) -> MonthlySeries
where
    I: IntoIterator<Item = &'a MonthlySeries>,
{
    let mut merged = MonthlySeries::new();

    for item in series {
        for (key, value) in item {
            merged.accumulate(*key, *value);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    // 2024-01-01T00:00:00Z
    const JAN_1: i64 = 1_704_067_200;

    fn key(value: &str) -> MonthKey {
        value.parse().unwrap()
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_sums_per_month() {
        let points = vec![
            DailyPoint::new(JAN_1, 10.0),
            DailyPoint::new(JAN_1 + DAY, 5.0),
            DailyPoint::new(JAN_1 + 31 * DAY, 7.0),
            DailyPoint::new(JAN_1 + 32 * DAY, -2.0),
        ];
        let series = aggregate(&points);

        assert_eq!(series.len(), 2);
        assert_eq!(series.get(&key("2024-01")), Some(15.0));
        assert_eq!(series.get(&key("2024-02")), Some(5.0));
    }

    #[test]
    fn test_aggregate_preserves_mass() {
        let points: Vec<DailyPoint> = (0..400)
            .map(|day| DailyPoint::new(JAN_1 + day * DAY, (day % 7) as f64))
            .collect();
        let expected: f64 = points.iter().map(|p| p.value).sum();

        let merged = merge([&aggregate(&points)]);
        assert_eq!(merged.total(), expected);
        assert_eq!(merged.len(), 14);
    }

    #[test]
    fn test_aggregate_skips_out_of_range_timestamps() {
        let points = vec![
            DailyPoint::new(JAN_1, 1.0),
            DailyPoint::new(i64::MAX, 100.0),
        ];
        let series = aggregate(&points);
        assert_eq!(series.len(), 1);
        assert_eq!(series.total(), 1.0);
    }

    #[test]
    fn test_merge_treats_absent_months_as_zero() {
        let a: MonthlySeries =
            [(key("2024-01"), 1.0), (key("2024-02"), 2.0)]
                .into_iter()
                .collect();
        let b: MonthlySeries =
            [(key("2024-02"), 3.0), (key("2024-03"), 4.0)]
                .into_iter()
                .collect();

        let merged = merge([&a, &b]);
        assert_eq!(merged.get(&key("2024-01")), Some(1.0));
        assert_eq!(merged.get(&key("2024-02")), Some(5.0));
        assert_eq!(merged.get(&key("2024-03")), Some(4.0));
        assert!(merge(Vec::<&MonthlySeries>::new()).is_empty());
    }
}
