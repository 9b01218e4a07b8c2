use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::currency::{Currency, CurrencyConverter, CurrencyError};
use crate::purchase::domain::{Activity, ActivityType, LineItem};
use crate::purchase::taxonomy::{TaxonomyDocument, TaxonomyIndex};
use crate::purchase::PurchaseModel;

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Converter with fixed EUR-based rates. Dated conversions before 2010 have
/// no CPI data.
#[derive(Default)]
pub(super) struct StubConverter {
    calls: AtomicUsize,
}

impl StubConverter {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CurrencyConverter for StubConverter {
    fn available_currencies(&self) -> Vec<Currency> {
        vec![Currency::EUR, Currency::DKK]
    }

    async fn convert_to_amount(
        &self,
        value: f64,
        currency_code: &str,
        date: Option<NaiveDate>,
    ) -> Result<f64, CurrencyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(date) = date {
            if date < NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date") {
                return Err(CurrencyError::MissingCpiData { date });
            }
        }
        match currency_code {
            "EUR" => Ok(value),
            "DKK" => Ok(value / 7.5),
            other => Err(CurrencyError::UnknownCurrency(other.to_string())),
        }
    }
}

pub(super) const FIXTURE: &str = r#"{"_children":{
    "Groceries":{"unit":"EUR","intensityKilograms":{"DK":0.8,"SE":0.6,"FR":0.4},"_children":{
        "Butter":{"unit":"kg","intensityKilograms":9.25},
        "Bread":{"unit":"EUR","intensityKilograms":0.5}
    }},
    "Restaurants":{"unit":"EUR","intensityKilograms":0.07964},
    "Transport":{"_children":{
        "Diesel":{"unit":"L","intensityKilograms":3.17},
        "Taxi":{"unit":"EUR","intensityKilograms":1.186},
        "Charging":{"unit":"kWh","intensityKilograms":{"DK":0.2}}
    }},
    "Phones":{"unit":"item","intensityKilograms":60.0},
    "Unrated":{"unit":"EUR"},
    "Loose":{"intensityKilograms":1.0}
}}"#;

pub(super) fn fixture_document() -> TaxonomyDocument {
    TaxonomyDocument::from_reader(FIXTURE.as_bytes()).expect("fixture parses")
}

pub(super) fn fixture_index() -> TaxonomyIndex {
    TaxonomyIndex::build(&fixture_document()).expect("fixture indexes")
}

pub(super) fn fixture_model() -> PurchaseModel<StubConverter> {
    PurchaseModel::new(&fixture_document(), StubConverter::default()).expect("model builds")
}

pub(super) fn purchase(line_items: Vec<LineItem>) -> Activity {
    let mut activity = Activity::new(ActivityType::Purchase);
    activity.line_items = Some(line_items);
    activity
}

pub(super) fn billed(activity_type: ActivityType, amount: f64, currency: &str) -> Activity {
    let mut activity = Activity::new(activity_type);
    activity.cost_amount = Some(amount);
    activity.cost_currency = Some(currency.to_string());
    activity
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
