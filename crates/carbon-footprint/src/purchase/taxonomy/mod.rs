mod document;
mod index;

pub use document::{Intensity, TaxonomyDocument, TaxonomyNode};
pub use index::{EntryId, FootprintEntry, TaxonomyIndex, ROOT_KEY};

/// Failures loading or navigating the reference taxonomy.
///
/// `DuplicateKey` and `EmptyKey` indicate a corrupt reference document and
/// must abort model initialization.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("failed to read footprint document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid footprint document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("error while indexing footprint tree: there's already an entry for {key}")]
    DuplicateKey { key: String },
    #[error("error while indexing footprint tree: empty key under {parent:?}")]
    EmptyKey { parent: String },
    #[error("no footprint entry with key {0}")]
    UnknownEntry(String),
    #[error("footprint entry {0:?} does not belong to this taxonomy")]
    ForeignEntry(String),
}
