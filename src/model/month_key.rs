use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Calendar month bucket rendered as `YYYY-MM`.
///
/// Field order makes the derived `Ord` chronological, which matches the
/// lexicographic order of the rendered keys since years are always four
/// digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub const MIN_YEAR: i32 = 0;
    pub const MAX_YEAR: i32 = 9999;

    pub fn new(year: i32, month: u32) -> Option<MonthKey> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month)
        {
            return None;
        }

        Some(MonthKey { year, month })
    }

    /// UTC month of an epoch-seconds timestamp. `None` when the timestamp is
    /// outside chrono's range or outside four-digit years.
    pub fn from_timestamp(timestamp: i64) -> Option<MonthKey> {
        let date = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
        MonthKey::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// All twelve months of `year`, January first.
    pub fn months_of_year(year: i32) -> Vec<MonthKey> {
        (1..=12).filter_map(|month| MonthKey::new(year, month)).collect()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(value: &str) -> Result<MonthKey, Self::Err> {
        let invalid = || Error::InvalidOption {
            option: format!("month key '{}'. Expected YYYY-MM", value),
        };

        if value.len() != 7 {
            return Err(invalid());
        }

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !value.bytes().all(|b| b.is_ascii_digit() || b == b'-')
        {
            return Err(invalid());
        }

        let year: i32 = year.parse()?;
        let month: u32 = month.parse()?;

        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<MonthKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_timestamp_uses_utc() {
        // 2024-01-31T23:30:00Z
        let key = MonthKey::from_timestamp(1_706_743_800).unwrap();
        assert_eq!(key.to_string(), "2024-01");

        // 2024-02-01T00:00:00Z
        let key = MonthKey::from_timestamp(1_706_745_600).unwrap();
        assert_eq!(key.to_string(), "2024-02");
    }

    #[test]
    fn test_display_is_seven_chars() {
        let key = MonthKey::new(987, 3).unwrap();
        assert_eq!(key.to_string(), "0987-03");
        assert_eq!(key.to_string().len(), 7);
    }

    #[test]
    fn test_order_matches_lexicographic_order() {
        let keys = ["2023-12", "2024-01", "2024-10", "2024-02"];
        let mut parsed: Vec<MonthKey> =
            keys.iter().map(|k| k.parse().unwrap()).collect();
        parsed.sort();

        let mut rendered: Vec<&str> = keys.to_vec();
        rendered.sort();

        let parsed: Vec<String> =
            parsed.iter().map(|k| k.to_string()).collect();
        assert_eq!(parsed, rendered);
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        assert!("2024-1".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("24-01-01".parse::<MonthKey>().is_err());
        assert!("abcd-01".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_months_of_year() {
        let months = MonthKey::months_of_year(2025);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].to_string(), "2025-01");
        assert_eq!(months[11].to_string(), "2025-12");
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2024, 6).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-06\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
