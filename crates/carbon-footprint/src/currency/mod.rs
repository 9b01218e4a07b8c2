//! Monetary normalization consumed by the purchase model.
//!
//! The model only depends on [`CurrencyConverter`]. [`TableCurrencyConverter`]
//! is a reference implementation backed by static exchange-rate and CPI tables.

mod converter;
mod cpi;
mod rates;

pub use converter::TableCurrencyConverter;
pub use cpi::CpiSeries;
pub use rates::ExchangeRateTable;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Currencies the rate tables are required to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    EUR,
    DKK,
    SEK,
    NOK,
    GBP,
    USD,
    CHF,
    PLN,
    CZK,
    HUF,
    AUD,
    CAD,
    JPY,
}

impl Currency {
    pub const fn all() -> [Self; 13] {
        [
            Self::EUR,
            Self::DKK,
            Self::SEK,
            Self::NOK,
            Self::GBP,
            Self::USD,
            Self::CHF,
            Self::PLN,
            Self::CZK,
            Self::HUF,
            Self::AUD,
            Self::CAD,
            Self::JPY,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::DKK => "DKK",
            Self::SEK => "SEK",
            Self::NOK => "NOK",
            Self::GBP => "GBP",
            Self::USD => "USD",
            Self::CHF => "CHF",
            Self::PLN => "PLN",
            Self::CZK => "CZK",
            Self::HUF => "HUF",
            Self::AUD => "AUD",
            Self::CAD => "CAD",
            Self::JPY => "JPY",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|currency| currency.code() == code)
    }
}

/// Failures raised while normalizing a monetary amount.
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("unknown currency {0}")]
    UnknownCurrency(String),
    #[error("no exchange rate for {currency:?} in the {table} table")]
    MissingRate {
        currency: Currency,
        table: &'static str,
    },
    #[error("unknown CPI for activity date {date}")]
    MissingCpiData { date: NaiveDate },
    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid exchange rate table: {0}")]
    RateTable(#[from] serde_json::Error),
    #[error("invalid CPI series: {0}")]
    CpiSeries(#[from] csv::Error),
}

/// Collaborator converting a monetary value into the model's reference currency.
///
/// Conversion may be backed by remote or file data, so it is asynchronous.
#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    fn available_currencies(&self) -> Vec<Currency>;

    /// Normalizes `value` expressed in `currency_code` to reference EUR. With a
    /// `date`, the amount is also deflated to the reference year.
    async fn convert_to_amount(
        &self,
        value: f64,
        currency_code: &str,
        date: Option<NaiveDate>,
    ) -> Result<f64, CurrencyError>;
}
