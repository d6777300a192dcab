use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

use super::MonthKey;

/// One sample of a provider time series: epoch seconds and a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub timestamp: i64,
    pub value: f64,
}

impl DailyPoint {
    pub fn new(timestamp: i64, value: f64) -> DailyPoint {
        DailyPoint { timestamp, value }
    }
}

/// Month totals keyed by `YYYY-MM`, iterated oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries(BTreeMap<MonthKey, f64>);

impl MonthlySeries {
    pub fn new() -> MonthlySeries {
        MonthlySeries(BTreeMap::new())
    }

    /// Adds `value` to the bucket of `key`, creating it at zero.
    pub fn accumulate(&mut self, key: MonthKey, value: f64) {
        *self.0.entry(key).or_insert(0.0) += value;
    }

    pub fn get(&self, key: &MonthKey) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Most recent month and its value.
    pub fn latest(&self) -> Option<(MonthKey, f64)> {
        self.0.iter().next_back().map(|(key, value)| (*key, *value))
    }

    /// Values ordered most recent first.
    pub fn values_desc(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().rev().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, MonthKey, f64> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MonthKey> {
        self.0.keys()
    }
}

impl FromIterator<(MonthKey, f64)> for MonthlySeries {
    fn from_iter<I: IntoIterator<Item = (MonthKey, f64)>>(
        iter: I,
    ) -> MonthlySeries {
        let mut series = MonthlySeries::new();
        for (key, value) in iter {
            series.accumulate(key, value);
        }
        series
    }
}

impl<'a> IntoIterator for &'a MonthlySeries {
    type Item = (&'a MonthKey, &'a f64);
    type IntoIter = btree_map::Iter<'a, MonthKey, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
