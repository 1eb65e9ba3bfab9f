//! ISIS3/PDS label tables: duplicate-name resolution, table classification and binary
//! table decoding.
//!
//! This crate provides:
//! - **Label model** (`label`): ordered object tree with keywords and a "data" slot.
//! - **Resolver** (`resolve`): renames duplicate sibling classes and group values and
//!   records where each table declares its element type (`locator`).
//! - **Classifier** (`classify`): ISIS3 format sniff and table detection.
//! - **Descriptors** (`descriptor`): table layout from `StartByte`/`Bytes`/`Records`/`ByteOrder`.
//! - **Decoding** (`decode`, `reader`): byte-order normalization and whole-table or
//!   per-field buffers, attached back onto the tree.
//! - **Pipeline** (`document`): `process_document(root, path, options, ascii)`.
//!
//! The label tree itself comes from an external parser; ASCII tables are handed to an
//! external [`AsciiIngest`] implementation.

pub mod buffer;
pub mod classify;
pub mod config;
pub mod decode;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod format;
pub mod label;
pub mod locator;
pub mod reader;
pub mod resolve;

pub use buffer::TypedBuffer;
pub use classify::{format_confidence, is_format_match, is_table_object, ObjectKind};
#[cfg(feature = "serde")]
pub use config::ConfigError;
pub use config::{ExtractMode, ProcessOptions};
pub use decode::{decode_field, decode_whole, materialize_window, normalize_byte_order};
pub use descriptor::{FieldSpec, TableDescriptor};
pub use document::{
    process_document, AsciiIngest, AsciiTableRequest, CollectAscii, DocumentReport, TableOutcome,
    TableStatus,
};
pub use error::{ResolveError, TableError};
pub use format::{ByteOrder, ElementType, TypeDeclaration};
pub use label::{FieldData, Keyword, LabelNode, TableData, Value};
pub use locator::{LocatorDictionary, TableId};
pub use reader::TableReader;
pub use resolve::{resolve_duplicates, NameKind, NameOccurrence, Rename, Resolution};
