//! Format sniffing and object classification.
//!
//! Heuristics only: nothing here fails, and identical input always gives identical answers.

use crate::format::{
    FORMAT_MARKERS, FORMAT_MATCH_THRESHOLD, LARGE_LABEL_THRESHOLD, TABLE_PREFIX,
};
use crate::label::LabelNode;

/// Confidence that a set of top-level identifiers belongs to an ISIS3 label.
///
/// +1 for every identifier equal to one of `isiscube`, `history`, `label`
/// (case-insensitive); -1 when there are [`LARGE_LABEL_THRESHOLD`] or more identifiers.
#[must_use]
pub fn format_confidence<S: AsRef<str>>(keys: &[S]) -> i32 {
    let mut confidence = 0;
    if keys.len() >= LARGE_LABEL_THRESHOLD {
        confidence -= 1;
    }
    for key in keys {
        let key = key.as_ref();
        if FORMAT_MARKERS.iter().any(|m| key.eq_ignore_ascii_case(m)) {
            confidence += 1;
        }
    }
    confidence
}

/// Whether the identifiers look like an ISIS3 label (confidence >= 2).
#[must_use]
pub fn is_format_match<S: AsRef<str>>(keys: &[S]) -> bool {
    format_confidence(keys) >= FORMAT_MATCH_THRESHOLD
}

/// Top-level identifiers of a label: root keyword names, then root child class names.
#[must_use]
pub fn top_level_identifiers(root: &LabelNode) -> Vec<&str> {
    root.keywords
        .iter()
        .map(|kw| kw.name.as_str())
        .chain(root.children.iter().map(|c| c.class_name.as_str()))
        .collect()
}

/// Whether a node is a table: the first 5 bytes of its class name are `table`
/// (case-insensitive). Disambiguated names such as `Table2` still match.
#[must_use]
pub fn is_table_object(node: &LabelNode) -> bool {
    node.class_starts_with(TABLE_PREFIX)
}

/// Root children that are tables, with their child index.
pub fn tables(root: &LabelNode) -> impl Iterator<Item = (usize, &LabelNode)> {
    root.children
        .iter()
        .enumerate()
        .filter(|(_, child)| is_table_object(child))
}

/// Object classes known to ISIS3/PDS labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Histogram,
    History,
    Image,
    Qube,
    Table,
    /// Not a PDS object.
    Group,
    /// Not a PDS object.
    Pointer,
    Other,
}

impl ObjectKind {
    /// Classify a class name, ignoring case and any numeric disambiguation suffix.
    #[must_use]
    pub fn from_class(class_name: &str) -> Self {
        let base = class_name.trim_end_matches(|c: char| c.is_ascii_digit());
        match base.to_ascii_lowercase().as_str() {
            "histogram" => ObjectKind::Histogram,
            "history" => ObjectKind::History,
            "image" => ObjectKind::Image,
            "qube" => ObjectKind::Qube,
            "table" => ObjectKind::Table,
            "group" => ObjectKind::Group,
            "ptr" => ObjectKind::Pointer,
            _ => ObjectKind::Other,
        }
    }

    /// Whether this is a bona fide PDS object (groups and pointers are not).
    #[must_use]
    pub fn is_pds_object(self) -> bool {
        matches!(
            self,
            ObjectKind::Histogram
                | ObjectKind::History
                | ObjectKind::Image
                | ObjectKind::Qube
                | ObjectKind::Table
        )
    }
}
