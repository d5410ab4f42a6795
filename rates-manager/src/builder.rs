//! Builder wiring a manager to the freecurrencyapi.com client.

use rates_client::{ClientError, FreeCurrencyApiClient};
use rates_types::{ManagerConfig, ManagerError};

use crate::RatesManager;

/// Builder for a [`RatesManager`] backed by freecurrencyapi.com.
///
/// ```no_run
/// # fn main() -> Result<(), rates_manager::ManagerError> {
/// let manager = rates_manager::RatesManager::builder("my-api-key")
///     .base_currency("NOK")
///     .currencies(["SEK", "DKK", "USD", "EUR"])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RatesManagerBuilder {
    api_key: String,
    base_url: Option<String>,
    base_currency: Option<String>,
    currencies: Vec<String>,
}

impl RatesManagerBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            base_currency: None,
            currencies: Vec::new(),
        }
    }

    /// Base currency for returned rates. Unset or blank means the API
    /// default (USD).
    pub fn base_currency(mut self, code: impl Into<String>) -> Self {
        self.base_currency = Some(code.into());
        self
    }

    /// Currencies to retrieve. Empty means every available currency.
    pub fn currencies<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currencies = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the API host.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<RatesManager<FreeCurrencyApiClient>, ManagerError> {
        let mut config = ManagerConfig::new().with_currencies(&self.currencies)?;
        if let Some(base) = &self.base_currency {
            config = config.with_base_currency(base)?;
        }

        let mut client = FreeCurrencyApiClient::new(self.api_key).map_err(client_error)?;
        if let Some(url) = self.base_url {
            client = client.with_base_url(url);
        }

        Ok(RatesManager::new(client, config))
    }
}

impl RatesManager<FreeCurrencyApiClient> {
    /// Starts building a manager that uses the given freecurrencyapi.com key.
    pub fn builder(api_key: impl Into<String>) -> RatesManagerBuilder {
        RatesManagerBuilder::new(api_key)
    }
}

fn client_error(err: ClientError) -> ManagerError {
    ManagerError::InvalidArgument(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_rejected() {
        let err = RatesManager::builder("").build().unwrap_err();
        assert_eq!(
            err,
            ManagerError::InvalidArgument("API key must not be empty".into())
        );
    }

    #[test]
    fn test_builds_configured_manager() {
        let manager = RatesManager::builder("key")
            .base_currency("nok")
            .currencies(["SEK", "DKK", "USD", "EUR"])
            .base_url("http://localhost:9999/")
            .build()
            .unwrap();

        assert_eq!(manager.config().base_currency().unwrap().as_str(), "NOK");
        assert_eq!(manager.config().currencies().unwrap().len(), 4);
        assert!(!manager.is_running());
    }

    #[test]
    fn test_blank_options_mean_source_defaults() {
        let manager = RatesManager::builder("key")
            .base_currency(" ")
            .currencies(Vec::<String>::new())
            .build()
            .unwrap();
        assert!(manager.config().base_currency().is_none());
        assert!(manager.config().currencies().is_none());
    }

    #[test]
    fn test_invalid_currency_rejected() {
        let err = RatesManager::builder("key")
            .currencies(["SEK", "KRONER"])
            .build()
            .unwrap_err();
        assert!(matches!(err, ManagerError::InvalidArgument(_)));
    }
}
