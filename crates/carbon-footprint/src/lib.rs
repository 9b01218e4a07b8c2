//! Carbon footprint scoring for user-reported activities.
//!
//! Activities are resolved against a hierarchical reference taxonomy of
//! emission-intensity factors. See [`purchase::PurchaseModel`] for the entry point.

pub mod config;
pub mod currency;
pub mod error;
pub mod purchase;
pub mod telemetry;

pub use currency::{Currency, CurrencyConverter, CurrencyError, TableCurrencyConverter};
pub use purchase::{
    Activity, ActivityType, EmissionError, EmissionErrorKind, FootprintEntry, Intensity,
    LineItem, PurchaseModel, TaxonomyError, TaxonomyIndex, TransportationMode, Unit,
};
