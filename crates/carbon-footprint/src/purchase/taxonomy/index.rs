use super::document::{Intensity, TaxonomyDocument, TaxonomyNode};
use super::TaxonomyError;
use crate::purchase::domain::Unit;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Key of the unnamed root node. It is never registered for key lookup.
pub const ROOT_KEY: &str = "";

/// Position of an entry inside its owning [`TaxonomyIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(usize);

/// A node of the indexed taxonomy. Key, level and parent are assigned at
/// index time and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintEntry {
    id: EntryId,
    key: String,
    parent: Option<EntryId>,
    parent_key: Option<String>,
    level: usize,
    unit: Option<Unit>,
    intensity: Option<Intensity>,
    icon: Option<String>,
    conversions: BTreeMap<Unit, f64>,
    metadata: BTreeMap<String, Value>,
    children: BTreeMap<String, EntryId>,
}

impl FootprintEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Key of the owning node; `None` for the root and its direct children.
    pub fn parent_key(&self) -> Option<&str> {
        self.parent_key.as_deref()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    pub fn intensity(&self) -> Option<&Intensity> {
        self.intensity.as_ref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn conversions(&self) -> &BTreeMap<Unit, f64> {
        &self.conversions
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    pub fn child_keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }
}

/// Immutable arena over the reference tree with a global key registry.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    entries: Vec<FootprintEntry>,
    by_key: HashMap<String, EntryId>,
}

impl TaxonomyIndex {
    /// Walks the document depth-first, assigning keys, levels and parents.
    /// Any key appearing twice anywhere in the tree aborts the build.
    pub fn build(document: &TaxonomyDocument) -> Result<Self, TaxonomyError> {
        let mut index = Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
        };
        index.insert(ROOT_KEY, &document.root, None, 0)?;

        tracing::debug!(entries = index.by_key.len(), "indexed footprint taxonomy");
        Ok(index)
    }

    fn insert(
        &mut self,
        key: &str,
        node: &TaxonomyNode,
        parent: Option<EntryId>,
        level: usize,
    ) -> Result<EntryId, TaxonomyError> {
        if let Some(parent_id) = parent {
            if key.is_empty() {
                return Err(TaxonomyError::EmptyKey {
                    parent: self.entries[parent_id.0].key.clone(),
                });
            }
            if self.by_key.contains_key(key) {
                return Err(TaxonomyError::DuplicateKey {
                    key: key.to_string(),
                });
            }
        }

        let id = EntryId(self.entries.len());
        let parent_key = parent
            .map(|parent_id| &self.entries[parent_id.0])
            .filter(|parent_entry| !parent_entry.is_root())
            .map(|parent_entry| parent_entry.key.clone());

        self.entries.push(FootprintEntry {
            id,
            key: key.to_string(),
            parent,
            parent_key,
            level,
            unit: node.unit,
            intensity: node.intensity_kilograms.clone(),
            icon: node.icon.clone(),
            conversions: node.conversions.clone(),
            metadata: node.metadata.clone(),
            children: BTreeMap::new(),
        });
        if parent.is_some() {
            self.by_key.insert(key.to_string(), id);
        }

        for (child_key, child) in &node.children {
            let child_id = self.insert(child_key, child, Some(id), level + 1)?;
            self.entries[id.0].children.insert(child_key.clone(), child_id);
        }

        Ok(id)
    }

    pub fn root(&self) -> &FootprintEntry {
        &self.entries[0]
    }

    pub fn get(&self, id: EntryId) -> Option<&FootprintEntry> {
        self.entries.get(id.0)
    }

    pub fn entry_by_key(&self, key: &str) -> Option<&FootprintEntry> {
        self.by_key.get(key).map(|id| &self.entries[id.0])
    }

    /// Follows `path` from the root one child key at a time. An empty path
    /// yields the root.
    pub fn entry_by_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&FootprintEntry> {
        path.iter().try_fold(self.root(), |entry, segment| {
            entry
                .children
                .get(segment.as_ref())
                .map(|id| &self.entries[id.0])
        })
    }

    pub fn parent(&self, entry: &FootprintEntry) -> Option<&FootprintEntry> {
        entry.parent.and_then(|id| self.get(id))
    }

    pub fn children<'a>(
        &'a self,
        entry: &'a FootprintEntry,
    ) -> impl Iterator<Item = &'a FootprintEntry> + 'a {
        entry.children.values().map(move |id| &self.entries[id.0])
    }

    /// Collects every node reachable from `entry` through children that pass
    /// `filter`. A rejected child prunes its whole subtree. `entry` itself is
    /// only included when `include_root` is set, regardless of `filter`.
    pub fn descendants<F>(
        &self,
        entry: &FootprintEntry,
        filter: F,
        include_root: bool,
    ) -> Result<BTreeMap<&str, &FootprintEntry>, TaxonomyError>
    where
        F: Fn(&FootprintEntry) -> bool,
    {
        let own = self
            .entries
            .get(entry.id.0)
            .filter(|own| own.key == entry.key)
            .ok_or_else(|| TaxonomyError::ForeignEntry(entry.key.clone()))?;

        let mut descendants = BTreeMap::new();
        self.collect(own, &filter, include_root, &mut descendants);
        Ok(descendants)
    }

    pub fn descendants_of_key<F>(
        &self,
        key: &str,
        filter: F,
        include_root: bool,
    ) -> Result<BTreeMap<&str, &FootprintEntry>, TaxonomyError>
    where
        F: Fn(&FootprintEntry) -> bool,
    {
        let entry = self
            .entry_by_key(key)
            .ok_or_else(|| TaxonomyError::UnknownEntry(key.to_string()))?;
        self.descendants(entry, filter, include_root)
    }

    fn collect<'a, F>(
        &'a self,
        entry: &'a FootprintEntry,
        filter: &F,
        include_self: bool,
        out: &mut BTreeMap<&'a str, &'a FootprintEntry>,
    ) where
        F: Fn(&FootprintEntry) -> bool,
    {
        if include_self {
            out.insert(entry.key.as_str(), entry);
        }
        for child in self.children(entry).filter(|child| filter(*child)) {
            self.collect(child, filter, true, out);
        }
    }

    /// Icon of every keyed entry that declares one.
    pub fn icons(&self) -> BTreeMap<&str, &str> {
        self.by_key
            .iter()
            .filter_map(|(key, id)| {
                self.entries[id.0]
                    .icon
                    .as_deref()
                    .map(|icon| (key.as_str(), icon))
            })
            .collect()
    }

    /// Number of keyed entries, excluding the root.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
