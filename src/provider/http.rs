use std::{fmt, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

use crate::{configuration::Config, error::Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    DailyFees,
    DailyRevenue,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::DailyFees => "dailyFees",
            DataType::DailyRevenue => "dailyRevenue",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
pub struct HTTP {
    pub base_url: Url,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: &Config) -> Result<HTTP, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                Error::ConfigurationError(format!("USER_AGENT: {}", e))
            })?,
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .default_headers(headers)
            .build()?;

        Ok(HTTP {
            base_url: Url::parse(&config.base_url)?,
            http,
        })
    }

    /// `/protocol/{id}`: TVL, name, symbol, chains and market cap.
    pub async fn fetch_protocol_data(&self, protocol: &str) -> Option<Value> {
        let url = self.endpoint(&["protocol", protocol], &[]);
        self.get_json(url).await
    }

    /// `/summary/fees/{id}` daily fees or revenue chart.
    pub async fn fetch_protocol_fees(
        &self,
        protocol: &str,
        data_type: DataType,
    ) -> Option<Value> {
        let url = self.endpoint(
            &["summary", "fees", protocol],
            &[("dataType", data_type.as_str())],
        );
        self.get_json(url).await
    }

    /// `/overview/fees/{chain}` daily chart without per-protocol breakdown.
    pub async fn fetch_chain_data(
        &self,
        chain: &str,
        data_type: DataType,
    ) -> Option<Value> {
        let url = self.endpoint(
            &["overview", "fees", chain],
            &[
                ("excludeTotalDataChart", "false"),
                ("excludeTotalDataChartBreakdown", "true"),
                ("dataType", data_type.as_str()),
            ],
        );
        self.get_json(url).await
    }

    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        url
    }

    /// Any transport, status or decoding failure is logged and reported as
    /// an absent payload.
    async fn get_json(&self, url: Url) -> Option<Value> {
        info!("Fetching data from: {}", url);

        match self.request(url.clone()).await {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Error fetching {}: {}", url, e);
                None
            },
        }
    }

    async fn request(&self, url: Url) -> Result<Value, Error> {
        let json = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(json)
    }
}
