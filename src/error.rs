//! Error types for label resolution and table materialization.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::ElementType;

/// Errors produced by the duplicate-name resolver. These abort the whole document.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("name \"{name}\" exceeds the {limit}-byte name width")]
    NameOverflow { name: String, limit: usize },
}

/// Per-table errors. A failing table is left without data; other tables still decode.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table {table}: malformed descriptor: {reason}")]
    Descriptor { table: String, reason: String },
    #[error("table {table}: {bytes_per_row}-byte rows do not hold a whole number of {element_type} elements ({element_size} bytes)")]
    RowAlignment {
        table: String,
        bytes_per_row: u64,
        element_type: ElementType,
        element_size: usize,
    },
    #[error("table {table}: field {field} spans columns {column}..{end} but rows hold {columns} elements")]
    FieldOutOfBounds {
        table: String,
        field: String,
        column: usize,
        end: usize,
        columns: usize,
    },
    #[error("table {table}: {element_type} tables have no binary decoding")]
    NotBinary { table: String, element_type: ElementType },
    #[error("table {table}: IO error on {}: {source}", file.display())]
    Io {
        file: PathBuf,
        table: String,
        #[source]
        source: io::Error,
    },
    #[error("table {table}: short read from {}: {expected} bytes at offset {offset}, {available} available", file.display())]
    ShortRead {
        file: PathBuf,
        table: String,
        offset: u64,
        expected: u64,
        available: u64,
    },
    #[error("table {table}: ASCII ingestion failed: {reason}")]
    Ascii { table: String, reason: String },
}

impl TableError {
    /// Table the error belongs to.
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            TableError::Descriptor { table, .. }
            | TableError::RowAlignment { table, .. }
            | TableError::FieldOutOfBounds { table, .. }
            | TableError::NotBinary { table, .. }
            | TableError::Io { table, .. }
            | TableError::ShortRead { table, .. }
            | TableError::Ascii { table, .. } => table,
        }
    }

    pub(crate) fn descriptor(table: &str, reason: impl Into<String>) -> Self {
        TableError::Descriptor {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}
