use super::domain::{Activity, LineItem};
use super::eligibility::can_score;
use super::emissions::EmissionCalculator;
use super::error::EmissionError;
use super::taxonomy::{FootprintEntry, TaxonomyDocument, TaxonomyError, TaxonomyIndex};
use super::version::ModelVersion;
use crate::config::DataConfig;
use crate::currency::{CurrencyConverter, TableCurrencyConverter};
use crate::error::AppError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The purchase footprint model: an indexed taxonomy, its version and the
/// currency collaborator. Immutable once constructed.
pub struct PurchaseModel<C = TableCurrencyConverter> {
    taxonomy: TaxonomyIndex,
    version: ModelVersion,
    version_label: String,
    converter: C,
}

impl<C> PurchaseModel<C>
where
    C: CurrencyConverter,
{
    pub fn new(document: &TaxonomyDocument, converter: C) -> Result<Self, TaxonomyError> {
        let version = ModelVersion::of(document)?;
        let taxonomy = TaxonomyIndex::build(document)?;
        let version_label = version.to_string();
        tracing::info!(
            version = %version_label,
            entries = taxonomy.len(),
            "loaded purchase footprint model"
        );

        Ok(Self {
            taxonomy,
            version,
            version_label,
            converter,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P, converter: C) -> Result<Self, TaxonomyError> {
        let document = TaxonomyDocument::from_path(path)?;
        Self::new(&document, converter)
    }

    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.taxonomy
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn root_entry(&self) -> &FootprintEntry {
        self.taxonomy.root()
    }

    pub fn entry_by_key(&self, key: &str) -> Option<&FootprintEntry> {
        self.taxonomy.entry_by_key(key)
    }

    pub fn entry_by_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&FootprintEntry> {
        self.taxonomy.entry_by_path(path)
    }

    pub fn descendants<F>(
        &self,
        entry: &FootprintEntry,
        filter: F,
        include_root: bool,
    ) -> Result<BTreeMap<&str, &FootprintEntry>, TaxonomyError>
    where
        F: Fn(&FootprintEntry) -> bool,
    {
        self.taxonomy.descendants(entry, filter, include_root)
    }

    /// Rendered as `purchase_<schema>_<taxonomy checksum>`.
    pub fn model_version(&self) -> &str {
        &self.version_label
    }

    pub fn version(&self) -> &ModelVersion {
        &self.version
    }

    pub fn model_can_run(&self, activity: &Activity) -> bool {
        can_score(activity)
    }

    /// Footprint of `activity` in kgCO2e. Callers should gate with
    /// [`Self::model_can_run`] first.
    pub async fn carbon_emissions(&self, activity: &Activity) -> Result<f64, EmissionError> {
        self.calculator().emission_of_activity(activity).await
    }

    pub async fn carbon_emission_of_line_item(
        &self,
        line_item: &LineItem,
        country_code_iso2: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<f64, EmissionError> {
        self.calculator()
            .emission_of_line_item(line_item, country_code_iso2, date)
            .await
    }

    fn calculator(&self) -> EmissionCalculator<'_, C> {
        EmissionCalculator::new(&self.taxonomy, &self.converter)
    }
}

impl PurchaseModel<TableCurrencyConverter> {
    /// Bundled taxonomy and rate tables.
    pub fn bundled() -> Result<Self, AppError> {
        let converter = TableCurrencyConverter::bundled()?;
        Ok(Self::new(&TaxonomyDocument::bundled()?, converter)?)
    }

    pub fn from_config(config: &DataConfig) -> Result<Self, AppError> {
        let converter = TableCurrencyConverter::from_config(config)?;
        let document = match &config.taxonomy_path {
            Some(path) => TaxonomyDocument::from_path(path)?,
            None => TaxonomyDocument::bundled()?,
        };
        Ok(Self::new(&document, converter)?)
    }
}

/// Source attribution shown next to scores produced by this model.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub text: Option<&'static str>,
    pub links: Vec<ExplanationLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub fn explanation() -> Explanation {
    Explanation {
        text: None,
        links: vec![
            ExplanationLink {
                label: "Tomorrow footprint database",
                href: "https://github.com/tmrowco/northapp-contrib/blob/master/co2eq/purchase/footprints.yml",
            },
            ExplanationLink {
                label: "Baltic project calculator",
                href: "http://www.balticproject.org/en/calculator-page",
            },
        ],
    }
}
