use std::{env, fs, ops::Deref, path::Path, sync::Arc};

use chrono::{DateTime, Utc};

use crate::{
    analytics::{PipelineOptions, RankingMetric},
    error::Error,
    helpers::{parse_list, parse_tuple_string},
    provider::HTTP,
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub http: HTTP,
}

impl State {
    pub fn new(config: Config, http: HTTP) -> State {
        State { config, http }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolGroupConfig {
    pub name: String,
    pub versions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: u64,
    pub user_agent: String,
    pub protocols: Vec<ProtocolGroupConfig>,
    pub chains: Vec<String>,
    pub top_n: usize,
    pub must_include: Option<String>,
    pub ranking_metric: RankingMetric,
    pub fdv_values: Vec<(String, f64)>,
    pub raw_data_path: String,
    pub processed_data_path: String,
}

impl Config {
    pub fn pipeline_options(&self, now: DateTime<Utc>) -> PipelineOptions {
        PipelineOptions {
            top_n: self.top_n,
            must_include: self.must_include.to_owned(),
            metric: self.ranking_metric,
            fdv: self.fdv_values.clone(),
            now,
        }
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    let base_url = env::var("BASE_URL")?;
    let timeout = env::var("TIMEOUT")?.parse()?;
    let user_agent = env::var("USER_AGENT")?;
    let protocols = parse_protocol_groups(&env::var("PROTOCOLS")?)?;
    let chains = parse_list(&env::var("CHAINS")?);
    let top_n = env::var("TOP_N")?.parse()?;
    let must_include = env::var("MUST_INCLUDE")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());
    let ranking_metric = env::var("RANKING_METRIC")?.parse()?;
    let fdv_values = parse_fdv_values(&env::var("FDV_VALUES")?)?;
    let raw_data_path = env::var("RAW_DATA_PATH")?;
    let processed_data_path = env::var("PROCESSED_DATA_PATH")?;

    let config = Config {
        base_url,
        timeout,
        user_agent,
        protocols,
        chains,
        top_n,
        must_include,
        ranking_metric,
        fdv_values,
        raw_data_path,
        processed_data_path,
    };

    Ok(config)
}

/// Loads `.env` (optional) and `etl.conf` from `ETL_CONFIG_DIR`, or the
/// crate directory, into the process environment.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let etl_config_file: &str = "etl.conf";

    let directory = env::var("ETL_CONFIG_DIR")
        .unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_owned());
    let directory = Path::new(&directory);

    let path = directory.join(config_file);
    if path.exists() {
        let config_string = fs::read_to_string(path)?;
        apply_config_string(&config_string);
    }

    let etl_config_string = fs::read_to_string(directory.join(etl_config_file))
        .map_err(|e| {
            Error::ConfigurationError(format!(
                "{} in {}: {}",
                etl_config_file,
                directory.display(),
                e
            ))
        })?;
    apply_config_string(&etl_config_string);

    Ok(())
}

/// Values already present in the environment win over file values.
fn apply_config_string(config: &str) {
    for (key, value) in parse_config_string(config) {
        if env::var_os(&key).is_none() {
            env::set_var(key, value);
        }
    }
}

/// `KEY=VALUE` lines; blank lines and `#` comments are skipped.
pub fn parse_config_string(config: &str) -> Vec<(String, String)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// `(group,version,version,...),(...)`. A group listed without versions
/// fetches a single version named after the group.
pub fn parse_protocol_groups(
    data: &str,
) -> Result<Vec<ProtocolGroupConfig>, Error> {
    let mut groups = Vec::new();

    for tuple in parse_tuple_string(data) {
        let mut items = parse_list(&tuple).into_iter();
        let name = items.next().ok_or_else(|| {
            Error::ConfigurationError(format!("empty protocol group in {}", data))
        })?;
        let mut versions: Vec<String> = items.collect();
        if versions.is_empty() {
            versions.push(name.to_owned());
        }
        groups.push(ProtocolGroupConfig { name, versions });
    }

    Ok(groups)
}

/// `(name,value),(...)`
pub fn parse_fdv_values(data: &str) -> Result<Vec<(String, f64)>, Error> {
    let mut values = Vec::new();

    for tuple in parse_tuple_string(data) {
        let (name, value) = tuple.rsplit_once(',').ok_or_else(|| {
            Error::FieldNotExist(format!("FDV value in ({})", tuple))
        })?;
        values.push((name.trim().to_owned(), value.trim().parse()?));
    }

    Ok(values)
}
