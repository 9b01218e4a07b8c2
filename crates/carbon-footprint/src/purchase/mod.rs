//! Purchase footprint model: resolves activities and their line items against
//! the reference taxonomy.

pub mod domain;
pub(crate) mod eligibility;
pub mod emissions;
mod error;
mod model;
pub mod taxonomy;
pub mod units;
pub mod version;

#[cfg(test)]
mod tests;

pub use domain::{Activity, ActivityType, LineItem, TransportationMode, Unit};
pub use eligibility::can_score;
pub use emissions::EmissionCalculator;
pub use error::{EmissionError, EmissionErrorKind};
pub use model::{explanation, Explanation, ExplanationLink, PurchaseModel};
pub use taxonomy::{
    EntryId, FootprintEntry, Intensity, TaxonomyDocument, TaxonomyError, TaxonomyIndex, ROOT_KEY,
};
pub use units::{resolve_unit_and_amount, ResolvedQuantity};
pub use version::{ModelVersion, ELIGIBILITY_VERSION, MODEL_NAME, MODEL_SCHEMA_VERSION};
