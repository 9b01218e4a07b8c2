use super::{Currency, CpiSeries, CurrencyConverter, CurrencyError, ExchangeRateTable};
use crate::config::DataConfig;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

/// Converter backed by a current rate table, a reference-year rate table and a
/// CPI series.
///
/// Undated amounts use today's rates. Dated amounts are converted at the
/// reference-year rates and deflated by `cpi[reference year] / cpi[year]`.
#[derive(Debug, Clone)]
pub struct TableCurrencyConverter {
    current: ExchangeRateTable,
    reference: ExchangeRateTable,
    cpi: CpiSeries,
}

impl TableCurrencyConverter {
    pub fn new(current: ExchangeRateTable, reference: ExchangeRateTable, cpi: CpiSeries) -> Self {
        Self {
            current,
            reference,
            cpi,
        }
    }

    pub fn bundled() -> Result<Self, CurrencyError> {
        Ok(Self::new(
            ExchangeRateTable::bundled_current()?,
            ExchangeRateTable::bundled_reference()?,
            CpiSeries::bundled()?,
        ))
    }

    /// Loads each table from its configured path, falling back to the bundled copy.
    pub fn from_config(config: &DataConfig) -> Result<Self, CurrencyError> {
        let current = match &config.rates_path {
            Some(path) => ExchangeRateTable::from_path(path)?,
            None => ExchangeRateTable::bundled_current()?,
        };
        let reference = match &config.reference_rates_path {
            Some(path) => ExchangeRateTable::from_path(path)?,
            None => ExchangeRateTable::bundled_reference()?,
        };
        let cpi = match &config.cpi_path {
            Some(path) => CpiSeries::from_path(path)?,
            None => CpiSeries::bundled()?,
        };

        Ok(Self::new(current, reference, cpi))
    }

    pub fn current_rates(&self) -> &ExchangeRateTable {
        &self.current
    }

    pub fn reference_rates(&self) -> &ExchangeRateTable {
        &self.reference
    }

    pub fn reference_year(&self) -> i32 {
        self.reference.date.year()
    }

    fn cpi_correction(&self, date: NaiveDate) -> Result<f64, CurrencyError> {
        let reference = self.cpi.index(self.reference_year());
        let observed = self.cpi.index(date.year());
        match (reference, observed) {
            (Some(reference), Some(observed)) if observed > 0.0 => Ok(reference / observed),
            _ => Err(CurrencyError::MissingCpiData { date }),
        }
    }
}

#[async_trait]
impl CurrencyConverter for TableCurrencyConverter {
    fn available_currencies(&self) -> Vec<Currency> {
        self.current.currencies()
    }

    async fn convert_to_amount(
        &self,
        value: f64,
        currency_code: &str,
        date: Option<NaiveDate>,
    ) -> Result<f64, CurrencyError> {
        let currency = Currency::from_code(currency_code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(currency_code.to_string()))?;

        match date {
            None => {
                let rate = self
                    .current
                    .rate(currency)
                    .ok_or(CurrencyError::MissingRate {
                        currency,
                        table: "current",
                    })?;
                Ok(value / rate)
            }
            Some(date) => {
                let rate = self
                    .reference
                    .rate(currency)
                    .ok_or(CurrencyError::MissingRate {
                        currency,
                        table: "reference",
                    })?;
                Ok(value / rate * self.cpi_correction(date)?)
            }
        }
    }
}
