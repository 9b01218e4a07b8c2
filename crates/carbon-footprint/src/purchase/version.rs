use super::taxonomy::{TaxonomyDocument, TaxonomyError};
use sha2::{Digest, Sha256};
use std::fmt;

/// Name under which scores are persisted. Changing it orphans every stored
/// activity, so it is fixed.
pub const MODEL_NAME: &str = "purchase";

/// Bumped whenever scoring logic changes independently of the taxonomy.
pub const MODEL_SCHEMA_VERSION: u32 = 3;

/// Bumped whenever the eligibility predicate changes.
pub const ELIGIBILITY_VERSION: u32 = 1;

/// Identifies the exact scoring behavior an activity was scored with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelVersion {
    pub schema_version: u32,
    pub checksum: String,
}

impl ModelVersion {
    pub fn of(document: &TaxonomyDocument) -> Result<Self, TaxonomyError> {
        Ok(Self {
            schema_version: MODEL_SCHEMA_VERSION,
            checksum: checksum(document)?,
        })
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            MODEL_NAME, self.schema_version, self.checksum
        )
    }
}

/// SHA-256 over the canonical JSON serialization of the document. Every map
/// in the document is ordered, so logically identical documents hash equally
/// regardless of the key order they were written in.
pub fn checksum(document: &TaxonomyDocument) -> Result<String, TaxonomyError> {
    let canonical = serde_json::to_vec(document)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex_encode_lower(&hasher.finalize()))
}

fn hex_encode_lower(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len().saturating_mul(2));
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
