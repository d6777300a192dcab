use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::{
    analytics,
    configuration::Config,
    error::Error,
    model::ProcessedSnapshot,
    provider::snapshot,
};

/// Reads the raw snapshot, runs the analytics with `now` as the clock and
/// writes the processed snapshot.
pub fn process_and_store(
    config: &Config,
    now: DateTime<Utc>,
) -> Result<ProcessedSnapshot, Error> {
    let raw = snapshot::read_raw_snapshot(Path::new(&config.raw_data_path))?;
    let processed = analytics::process(&raw, &config.pipeline_options(now));

    snapshot::write_processed_snapshot(
        Path::new(&config.processed_data_path),
        &processed,
    )?;
    info!("Processed data saved to {}", config.processed_data_path);

    Ok(processed)
}

pub fn start_task(config: Config) -> JoinHandle<Result<(), Error>> {
    tokio::task::spawn_blocking(move || -> Result<(), Error> {
        process_and_store(&config, Utc::now())?;
        Ok(())
    })
}
