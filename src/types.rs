//! Shared types passed between the compile and emit stages.

use std::path::PathBuf;

/// One resource after resolving and transforming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Logical name, see [`crate::naming`]
    pub name: String,
    /// Input path the entry was read from
    pub source: PathBuf,
    /// Decoded file content, before minification
    pub raw_text: String,
    /// Final bytes: gzip of the (possibly minified) UTF-8 text
    pub payload: Vec<u8>,
}

/// Resources sorted by name, ready for emission.
///
/// The order is fixed at construction. Names are compared bytewise, and ties
/// (which [`crate::compile`] rejects) fall back to the source path so the
/// order is total.
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    entries: Vec<ResourceEntry>,
}

impl ResourceSet {
    pub fn new(mut entries: Vec<ResourceEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.source.cmp(&b.source)));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Sum of all payload lengths.
    pub fn payload_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.payload.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a ResourceEntry;
    type IntoIter = std::slice::Iter<'a, ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
