//! # Rates Client
//!
//! A [`RateSource`] backed by the <https://freecurrencyapi.com/> `latest`
//! endpoint.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use rates_types::{CurrencyCode, FetchError, RateMap, RateSource};
use reqwest::Client;
use serde_json::Value;

/// Public freecurrencyapi.com endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.freecurrencyapi.com";

const LATEST_PATH: &str = "/v1/latest";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for client construction.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// freecurrencyapi.com client.
pub struct FreeCurrencyApiClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl FreeCurrencyApiClient {
    /// Creates a client for the public API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::EmptyApiKey);
        }

        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            http,
        })
    }

    /// Points the client at a different host (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests the latest rates.
    #[tracing::instrument(skip(self, currencies))]
    pub async fn latest(
        &self,
        base: Option<&CurrencyCode>,
        currencies: Option<&BTreeSet<CurrencyCode>>,
    ) -> Result<RateMap, FetchError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, LATEST_PATH))
            .header("apikey", &self.api_key)
            .query(&query_params(base, currencies))
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = resp.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        if status.as_u16() < 300 {
            tracing::info!("Request returned with status {} {}", status.as_u16(), status_text);
        } else {
            tracing::warn!("Request returned with status {} {}", status.as_u16(), status_text);
        }

        let body = resp.text().await.map_err(FetchError::transport)?;

        match serde_json::from_str::<Value>(&body) {
            Ok(json) if status.as_u16() < 300 => Ok(decode_rates(&json)),
            _ => Err(FetchError::Rejected {
                status: status.as_u16(),
                status_text,
                body,
            }),
        }
    }
}

impl std::fmt::Debug for FreeCurrencyApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeCurrencyApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl RateSource for FreeCurrencyApiClient {
    async fn fetch_latest(
        &self,
        base: Option<&CurrencyCode>,
        currencies: Option<&BTreeSet<CurrencyCode>>,
    ) -> Result<RateMap, FetchError> {
        self.latest(base, currencies).await
    }
}

fn query_params(
    base: Option<&CurrencyCode>,
    currencies: Option<&BTreeSet<CurrencyCode>>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(base) = base {
        params.push(("base_currency", base.to_string()));
    }
    if let Some(currencies) = currencies.filter(|set| !set.is_empty()) {
        let joined = currencies
            .iter()
            .map(CurrencyCode::as_str)
            .collect::<Vec<_>>()
            .join(",");
        params.push(("currencies", joined));
    }
    params
}

/// Reads rates from the `data` member if present, else from the root object.
fn decode_rates(json: &Value) -> RateMap {
    let rates = json.get("data").unwrap_or(json);
    let Some(object) = rates.as_object() else {
        return RateMap::new();
    };

    object
        .iter()
        .filter_map(|(code, value)| match value.as_f64() {
            Some(rate) => Some((code.clone(), rate)),
            None => {
                tracing::debug!(%code, %value, "skipping non-numeric rate");
                None
            }
        })
        .collect()
}
