// Mon Jan 19 2026 - Alex

use crate::structure::{LayoutError, LayoutResult};
use std::collections::BTreeMap;

/// Generated type names and the representation each one stands for.
///
/// Filled while layouts are walked; iteration is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedefTable {
    entries: BTreeMap<String, String>,
}

impl TypedefTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering the same mapping twice is a no-op; a different
    /// representation for an existing name is a conflict.
    pub fn register(&mut self, name: &str, representation: &str) -> LayoutResult<()> {
        match self.entries.get(name) {
            Some(existing) if existing != representation => Err(LayoutError::TypedefConflict {
                name: name.to_string(),
                existing: existing.clone(),
                conflicting: representation.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                log::debug!("typedef {} {}", representation, name);
                self.entries.insert(name.to_string(), representation.to_string());
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
