//! Seoul real-time subway open-API client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::ArrivalSource;
use crate::config::Config;
use crate::error::DataUnavailable;
use crate::models::{line_label, ArrivalRecord, PositionRecord};

const ARRIVAL_SERVICE: &str = "realtimeStationArrival";
const POSITION_SERVICE: &str = "realtimePosition";

/// Result code the API uses when a query simply matched nothing
const NO_DATA_CODE: &str = "INFO-200";

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Response envelope. Successful answers carry the status under
/// `errorMessage`; failures often put `code`/`message` at the top level
/// instead and omit the list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    #[serde(default)]
    error_message: Option<ApiStatus>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(
        rename = "realtimeArrivalList",
        alias = "realtimePositionList",
        default
    )]
    rows: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    fn into_rows(self) -> Result<Vec<T>, DataUnavailable> {
        let (code, message) = match (self.error_message, self.code) {
            (Some(status), _) => (status.code, status.message),
            (None, Some(code)) => (code, self.message.unwrap_or_default()),
            (None, None) => (String::new(), String::new()),
        };

        if code.is_empty() || code == NO_DATA_CODE || code.starts_with("INFO-0") {
            return Ok(self.rows.unwrap_or_default());
        }

        Err(DataUnavailable::Upstream { code, message })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, DataUnavailable> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    envelope.into_rows()
}

/// Line name the position endpoint expects ("1002" -> "2호선")
fn position_query_name(line_id: &str) -> String {
    match line_label(line_id) {
        "Subway" => line_id.to_string(),
        label => label.to_string(),
    }
}

/// Client for the Seoul open API.
///
/// Endpoints are tried in configured order; the first one that returns a
/// decodable answer wins.
pub struct SeoulOpenApi {
    client: reqwest::Client,
    api_key: String,
    endpoints: Vec<String>,
    arrival_rows: u32,
    position_rows: u32,
}

impl SeoulOpenApi {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("subway-waker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoints: config.endpoints.clone(),
            arrival_rows: config.arrival_rows,
            position_rows: config.position_rows,
        })
    }

    /// Build `{base}/{key}/json/{service}/0/{rows}/{query}?ts=<millis>`
    fn request_url(
        &self,
        base: &str,
        service: &str,
        rows: u32,
        query: &str,
    ) -> Result<Url, DataUnavailable> {
        let bad_endpoint = || DataUnavailable::BadEndpoint(base.to_string());
        let rows = rows.to_string();
        let mut url = Url::parse(base).map_err(|_| bad_endpoint())?;
        url.path_segments_mut()
            .map_err(|_| bad_endpoint())?
            .pop_if_empty()
            .extend([
                self.api_key.as_str(),
                "json",
                service,
                "0",
                rows.as_str(),
                query,
            ]);
        // Defeat caching relays between us and the API
        url.query_pairs_mut()
            .append_pair("ts", &Utc::now().timestamp_millis().to_string());
        Ok(url)
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, DataUnavailable> {
        let network = |source: reqwest::Error| DataUnavailable::Network {
            url: redact(&url, &self.api_key),
            source,
        };
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(network)?;
        let body = response.text().await.map_err(network)?;
        decode(&body)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        service: &str,
        rows: u32,
        query: &str,
    ) -> Result<Vec<T>, DataUnavailable> {
        let mut last_error = None;

        for base in &self.endpoints {
            let url = match self.request_url(base, service, rows, query) {
                Ok(url) => url,
                Err(e) => {
                    warn!("skipping endpoint: {}", e);
                    last_error = Some(e);
                    continue;
                }
            };
            debug!("{} {} via {}", service, query, base);
            match self.fetch_once(url).await {
                Ok(rows) => return Ok(rows),
                Err(e) => {
                    warn!("{} via {} failed, trying next endpoint: {}", service, base, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(DataUnavailable::NoEndpoints))
    }
}

/// URL for error messages, with the API key masked
fn redact(url: &Url, api_key: &str) -> String {
    let text = url.to_string();
    if api_key.is_empty() {
        text
    } else {
        text.replace(api_key, "***")
    }
}

#[async_trait]
impl ArrivalSource for SeoulOpenApi {
    async fn fetch_station_arrivals(
        &self,
        station: &str,
    ) -> Result<Vec<ArrivalRecord>, DataUnavailable> {
        self.fetch_rows(ARRIVAL_SERVICE, self.arrival_rows, station)
            .await
    }

    async fn fetch_line_positions(
        &self,
        line_id: &str,
    ) -> Result<Vec<PositionRecord>, DataUnavailable> {
        let name = position_query_name(line_id);
        self.fetch_rows(POSITION_SERVICE, self.position_rows, &name)
            .await
    }
}
