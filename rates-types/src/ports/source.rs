//! Rate source port.
//!
//! Implementations can be HTTP clients, fixed tables for tests, etc.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{CurrencyCode, RateMap};
use crate::error::FetchError;

/// Port trait for exchange rate sources.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the latest rates.
    ///
    /// `base` of `None` means the source's default base currency;
    /// `currencies` of `None` means every currency the source knows.
    async fn fetch_latest(
        &self,
        base: Option<&CurrencyCode>,
        currencies: Option<&BTreeSet<CurrencyCode>>,
    ) -> Result<RateMap, FetchError>;
}

#[async_trait::async_trait]
impl<T: RateSource + ?Sized> RateSource for Arc<T> {
    async fn fetch_latest(
        &self,
        base: Option<&CurrencyCode>,
        currencies: Option<&BTreeSet<CurrencyCode>>,
    ) -> Result<RateMap, FetchError> {
        (**self).fetch_latest(base, currencies).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait::async_trait]
    impl RateSource for Fixed {
        async fn fetch_latest(
            &self,
            base: Option<&CurrencyCode>,
            _currencies: Option<&BTreeSet<CurrencyCode>>,
        ) -> Result<RateMap, FetchError> {
            let code = base.map(|c| c.to_string()).unwrap_or_else(|| "USD".into());
            Ok(RateMap::from([(code, 1.0)]))
        }
    }

    #[tokio::test]
    async fn test_arc_source_delegates() {
        let source: Arc<dyn RateSource> = Arc::new(Fixed);
        let nok = CurrencyCode::new("NOK").unwrap();
        let rates = source.fetch_latest(Some(&nok), None).await.unwrap();
        assert_eq!(rates.get("NOK"), Some(&1.0));
    }
}
