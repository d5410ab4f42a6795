//! Manager configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::CurrencyCode;
use crate::error::ManagerError;

/// Which rates a manager asks its source for.
///
/// Set once at construction and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    base_currency: Option<CurrencyCode>,
    currencies: Option<BTreeSet<CurrencyCode>>,
}

impl ManagerConfig {
    /// Source default base, all available currencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the base currency. A blank string keeps the source default.
    pub fn with_base_currency(mut self, code: &str) -> Result<Self, ManagerError> {
        self.base_currency = if code.trim().is_empty() {
            None
        } else {
            Some(CurrencyCode::new(code)?)
        };
        Ok(self)
    }

    /// Restricts the target currencies. Blank entries are ignored and an
    /// empty set means "all available".
    pub fn with_currencies<I, S>(mut self, codes: I) -> Result<Self, ManagerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for code in codes {
            let code = code.as_ref();
            if code.trim().is_empty() {
                continue;
            }
            set.insert(CurrencyCode::new(code)?);
        }
        self.currencies = if set.is_empty() { None } else { Some(set) };
        Ok(self)
    }

    pub fn base_currency(&self) -> Option<&CurrencyCode> {
        self.base_currency.as_ref()
    }

    pub fn currencies(&self) -> Option<&BTreeSet<CurrencyCode>> {
        self.currencies.as_ref()
    }
}
