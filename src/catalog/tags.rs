// Tue Jan 20 2026 - Alex

use crate::structure::{LayoutError, LayoutResult};
use std::collections::BTreeMap;

/// Closed set of known subtypes and their union member names.
pub struct TagTable<'a> {
    tags: &'a BTreeMap<String, String>,
}

impl<'a> TagTable<'a> {
    pub fn new(tags: &'a BTreeMap<String, String>) -> Self {
        Self { tags }
    }

    pub fn tag_for(&self, type_name: &str) -> Option<&'a str> {
        self.tags.get(type_name).map(String::as_str)
    }

    /// A subtype nobody registered is a hard error: the table has to be
    /// extended whenever the producer grows a new entry type.
    pub fn resolve(&self, type_name: &str) -> LayoutResult<&'a str> {
        self.tag_for(type_name)
            .ok_or_else(|| LayoutError::UnmappedSubtype(type_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
