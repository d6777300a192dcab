use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::{error::Error, model::ProcessedSnapshot, types::RawSnapshot};

pub fn write_raw_snapshot(path: &Path, data: &RawSnapshot) -> Result<(), Error> {
    write_json(path, data)
}

pub fn read_raw_snapshot(path: &Path) -> Result<RawSnapshot, Error> {
    read_json(path)
}

pub fn write_processed_snapshot(
    path: &Path,
    data: &ProcessedSnapshot,
) -> Result<(), Error> {
    write_json(path, data)
}

pub fn read_processed_snapshot(path: &Path) -> Result<ProcessedSnapshot, Error> {
    read_json(path)
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    info!("Data successfully saved to {}", path.display());

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let data = fs::read_to_string(path)?;
    let value = serde_json::from_str(&data)?;
    info!("Data loaded from {}", path.display());

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::types::{RawChain, RawProtocolGroup, RawVersion};

    #[test]
    fn test_raw_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/raw/protocol_data.json");

        let snapshot = RawSnapshot {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            protocols: vec![RawProtocolGroup {
                id: String::from("aave"),
                versions: vec![
                    RawVersion {
                        id: String::from("aave"),
                        payload: None,
                    },
                    RawVersion {
                        id: String::from("aave-v3"),
                        payload: serde_json::from_value(json!({
                            "tvl": {"Ethereum": 1.5},
                            "name": "Aave V3"
                        }))
                        .unwrap(),
                    },
                ],
            }],
            chains: vec![RawChain {
                id: String::from("base"),
                revenue_series: Some(json!({"totalDataChart": [[1, 2]]})),
            }],
        };

        write_raw_snapshot(&path, &snapshot).unwrap();
        assert_eq!(read_raw_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_processed_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");

        let snapshot = ProcessedSnapshot {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            protocols: Vec::new(),
            chains: BTreeMap::new(),
            valuations: Vec::new(),
        };

        write_processed_snapshot(&path, &snapshot).unwrap();
        assert_eq!(read_processed_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_raw_snapshot(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.json");
        fs::write(&path, "{not json").unwrap();

        let result = read_raw_snapshot(&path);
        assert!(matches!(result, Err(Error::JsonError(_))));
    }
}
