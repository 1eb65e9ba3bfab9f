//! Per-document pipeline: resolve names, classify tables, build descriptors, decode.
//!
//! Per-table failures are collected into the [`DocumentReport`] and never stop the other
//! tables. Only a name overflow during resolution fails the document as a whole.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::classify::{is_format_match, top_level_identifiers};
use crate::config::ProcessOptions;
use crate::descriptor::TableDescriptor;
use crate::error::{ResolveError, TableError};
use crate::label::LabelNode;
use crate::reader::TableReader;
use crate::resolve::{resolve_duplicates, Resolution};

/// Address of an ASCII table handed to the ASCII ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AsciiTableRequest {
    pub file: PathBuf,
    /// Resolved class name of the table object.
    pub object_name: String,
    /// Zero-based byte offset (`start_byte - 1`).
    pub offset: u64,
    pub length: usize,
}

impl AsciiTableRequest {
    #[must_use]
    pub fn new(file: &Path, desc: &TableDescriptor) -> Self {
        Self {
            file: file.to_path_buf(),
            object_name: desc.table.clone(),
            offset: desc.offset(),
            length: desc.total_bytes,
        }
    }
}

/// Ingests ASCII tables; implemented outside this crate.
pub trait AsciiIngest {
    fn ingest(&mut self, request: &AsciiTableRequest, table: &mut LabelNode) -> Result<(), TableError>;
}

impl<F> AsciiIngest for F
where
    F: FnMut(&AsciiTableRequest, &mut LabelNode) -> Result<(), TableError>,
{
    fn ingest(&mut self, request: &AsciiTableRequest, table: &mut LabelNode) -> Result<(), TableError> {
        self(request, table)
    }
}

/// [`AsciiIngest`] that only records the requests it receives.
#[derive(Debug, Clone, Default)]
pub struct CollectAscii {
    pub requests: Vec<AsciiTableRequest>,
}

impl AsciiIngest for CollectAscii {
    fn ingest(&mut self, request: &AsciiTableRequest, _table: &mut LabelNode) -> Result<(), TableError> {
        self.requests.push(request.clone());
        Ok(())
    }
}

/// What happened to one table.
#[derive(Debug)]
pub enum TableStatus {
    /// Binary data decoded and attached.
    Decoded(TableDescriptor),
    /// Handed to the ASCII collaborator.
    Ascii(AsciiTableRequest),
    /// Left without data.
    Failed(TableError),
}

#[derive(Debug)]
pub struct TableOutcome {
    /// Index of the table among the root's children.
    pub index: usize,
    pub name: String,
    pub status: TableStatus,
}

/// Result of [`process_document`].
#[derive(Debug)]
pub struct DocumentReport {
    /// Outcome of the ISIS3 format sniff on the unresolved label.
    pub format_match: bool,
    pub resolution: Resolution,
    /// One entry per table, in document order.
    pub tables: Vec<TableOutcome>,
}

impl DocumentReport {
    pub fn errors(&self) -> impl Iterator<Item = &TableError> {
        self.tables.iter().filter_map(|t| match &t.status {
            TableStatus::Failed(e) => Some(e),
            _ => None,
        })
    }

    #[must_use]
    pub fn decoded(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| matches!(t.status, TableStatus::Decoded(_)))
            .count()
    }
}

/// Lazily opened reader; an open failure is remembered and reported for every table.
enum Source {
    Unopened,
    Open(TableReader),
    Failed(io::ErrorKind, String),
}

impl Source {
    fn reader(&mut self, file: &Path, table: &str) -> Result<&mut TableReader, TableError> {
        if let Source::Unopened = self {
            *self = match TableReader::open(file, table) {
                Ok(reader) => Source::Open(reader),
                Err(TableError::Io { source, .. }) => Source::Failed(source.kind(), source.to_string()),
                Err(e) => Source::Failed(io::ErrorKind::Other, e.to_string()),
            };
        }
        let (kind, message) = match self {
            Source::Open(reader) => return Ok(reader),
            Source::Failed(kind, message) => (*kind, message.clone()),
            Source::Unopened => (io::ErrorKind::NotFound, "file not opened".to_string()),
        };
        Err(TableError::Io {
            file: file.to_path_buf(),
            table: table.to_string(),
            source: io::Error::new(kind, message),
        })
    }
}

fn process_table(
    node: &mut LabelNode,
    locator: &str,
    file: &Path,
    source: &mut Source,
    options: &ProcessOptions,
    ascii: &mut dyn AsciiIngest,
) -> Result<TableStatus, TableError> {
    let desc = TableDescriptor::from_node(node, locator)?;
    if desc.is_ascii() {
        let request = AsciiTableRequest::new(file, &desc);
        ascii.ingest(&request, node)?;
        return Ok(TableStatus::Ascii(request));
    }
    source.reader(file, &desc.table)?.materialize(node, &desc, options.extract)?;
    Ok(TableStatus::Decoded(desc))
}

/// Run the table pipeline over a label tree whose tables live in `data_file`.
///
/// Renames duplicate siblings in `root`, then decodes every table and attaches its data.
/// ASCII tables are handed to `ascii` instead.
pub fn process_document(
    root: &mut LabelNode,
    data_file: &Path,
    options: &ProcessOptions,
    ascii: &mut dyn AsciiIngest,
) -> Result<DocumentReport, ResolveError> {
    let format_match = is_format_match(&top_level_identifiers(root));
    if !format_match {
        warn!(file = %data_file.display(), "label does not look like ISIS3");
    }

    let resolution = resolve_duplicates(root, options)?;

    let mut source = Source::Unopened;
    let mut tables = Vec::with_capacity(resolution.locators.len());
    for (id, locator) in resolution.locators.iter() {
        let node = &mut root.children[id.index];
        let status = process_table(node, locator, data_file, &mut source, options, ascii)
            .unwrap_or_else(|e| {
                warn!(error = %e, "table skipped");
                TableStatus::Failed(e)
            });
        tables.push(TableOutcome {
            index: id.index,
            name: id.name.clone(),
            status,
        });
    }

    let report = DocumentReport {
        format_match,
        resolution,
        tables,
    };
    info!(
        file = %data_file.display(),
        tables = report.tables.len(),
        decoded = report.decoded(),
        failed = report.errors().count(),
        "processed document"
    );
    Ok(report)
}
