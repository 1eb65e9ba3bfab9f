//! Table locator dictionary.
//!
//! Tables in one label may declare their element type under differently named field
//! children. The dictionary records, per table, which child holds the `type` keyword. It is
//! filled by the resolver as each table gets its final name and only read afterwards.

use crate::format::{FIELD_PREFIX, KW_TYPE};
use crate::label::LabelNode;

/// Identity of a table: its position among the root's children and its resolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableId {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LocatorEntry {
    id: TableId,
    locator: String,
}

/// Per-document table → locator mapping, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorDictionary {
    entries: Vec<LocatorEntry>,
}

impl LocatorDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the locator of a table. A second insert for the same index replaces the first.
    pub fn insert(&mut self, id: TableId, locator: impl Into<String>) {
        let locator = locator.into();
        match self.entries.iter_mut().find(|e| e.id.index == id.index) {
            Some(entry) => {
                entry.id = id;
                entry.locator = locator;
            }
            None => self.entries.push(LocatorEntry { id, locator }),
        }
    }

    /// Locator of the table at child `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id.index == index)
            .map(|e| e.locator.as_str())
    }

    /// Locator of the table with the given resolved name (case-insensitive).
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id.name.eq_ignore_ascii_case(name))
            .map(|e| e.locator.as_str())
    }

    /// `(table, locator)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&TableId, &str)> {
        self.entries.iter().map(|e| (&e.id, e.locator.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Name of the child of `table` that declares its element type.
///
/// Prefers the first `field*` child with a `type` keyword, then any child with a `type`
/// keyword, then `default`.
#[must_use]
pub fn locate_type_field(table: &LabelNode, default: &str) -> String {
    let typed = |c: &&LabelNode| c.keyword(KW_TYPE).is_some();
    let is_field = |c: &&LabelNode| c.class_starts_with(FIELD_PREFIX);
    table
        .children
        .iter()
        .filter(is_field)
        .find(typed)
        .or_else(|| table.children.iter().find(typed))
        .map_or_else(|| default.to_string(), |c| c.class_name.clone())
}
