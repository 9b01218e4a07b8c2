use super::{Currency, CurrencyError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

const BUNDLED_CURRENT: &str = include_str!("../../data/exchange_rates.json");
const BUNDLED_REFERENCE: &str = include_str!("../../data/exchange_rates_2011.json");

/// Units of each currency per one unit of `base`, as published on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub base: Currency,
    pub date: NaiveDate,
    pub rates: BTreeMap<Currency, f64>,
}

impl ExchangeRateTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CurrencyError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CurrencyError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn bundled_current() -> Result<Self, CurrencyError> {
        Ok(serde_json::from_str(BUNDLED_CURRENT)?)
    }

    /// The 2011 table the taxonomy intensities are expressed against.
    pub fn bundled_reference() -> Result<Self, CurrencyError> {
        Ok(serde_json::from_str(BUNDLED_REFERENCE)?)
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        if currency == self.base {
            return Some(1.0);
        }
        self.rates.get(&currency).copied()
    }

    /// Every currency the table can convert, the base included even when
    /// `rates` omits it.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.rates.keys().copied().collect();
        if !self.rates.contains_key(&self.base) {
            currencies.push(self.base);
            currencies.sort();
        }
        currencies
    }
}
