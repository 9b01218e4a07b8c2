use super::TaxonomyError;
use crate::purchase::domain::Unit;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

const BUNDLED_FOOTPRINTS: &str = include_str!("../../../data/footprints.json");

/// Emission intensity in kgCO2e per unit of the entry's declared unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Intensity {
    Scalar(f64),
    /// Keyed by ISO-3166 alpha-2 country code.
    PerCountry(BTreeMap<String, f64>),
}

/// One node of the reference document as supplied on disk.
///
/// Maps are ordered so that serialization is canonical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_kilograms: Option<Intensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conversions: BTreeMap<Unit, f64>,
    #[serde(rename = "_children", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, TaxonomyNode>,
    /// Display metadata the engine does not interpret.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

/// The versioned reference document: a tree rooted at an unnamed node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyDocument {
    pub root: TaxonomyNode,
}

impl TaxonomyDocument {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TaxonomyError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn bundled() -> Result<Self, TaxonomyError> {
        Ok(serde_json::from_str(BUNDLED_FOOTPRINTS)?)
    }
}
