//! Table reader: one open file handle, window reads, decode and attach.
//!
//! A document's tables usually live in the same file as its label, so a single reader is
//! opened per file and shared by every table. The handle is closed when the reader drops.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ExtractMode;
use crate::decode::materialize_window;
use crate::descriptor::TableDescriptor;
use crate::error::TableError;
use crate::label::LabelNode;

/// Random-access reader over a file holding table bytes.
pub struct TableReader {
    path: PathBuf,
    reader: BufReader<File>,
    /// File length, for bounds-checking windows before reading.
    len: u64,
}

impl TableReader {
    /// Open `path` for reading. `table` names the table the open is for, for error reporting.
    pub fn open<P: AsRef<Path>>(path: P, table: &str) -> Result<Self, TableError> {
        let path = path.as_ref().to_path_buf();
        let io_error = |source: io::Error| TableError::Io {
            file: path.clone(),
            table: table.to_string(),
            source,
        };
        let file = File::open(&path).map_err(io_error)?;
        let len = file.metadata().map_err(io_error)?.len();
        Ok(TableReader {
            path,
            reader: BufReader::new(file),
            len,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File length in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the table's `total_bytes` bytes starting at `start_byte - 1`.
    pub fn read_window(&mut self, desc: &TableDescriptor) -> Result<Vec<u8>, TableError> {
        let offset = desc.offset();
        let expected = desc.total_bytes as u64;
        let short_read = |available: u64| TableError::ShortRead {
            file: self.path.clone(),
            table: desc.table.clone(),
            offset,
            expected,
            available,
        };
        let available = self.len.saturating_sub(offset);
        if available < expected {
            return Err(short_read(available));
        }

        let io_error = |source: io::Error| TableError::Io {
            file: self.path.clone(),
            table: desc.table.clone(),
            source,
        };
        self.reader.seek(SeekFrom::Start(offset)).map_err(io_error)?;
        let mut window = vec![0u8; desc.total_bytes];
        match self.reader.read_exact(&mut window) {
            Ok(()) => Ok(window),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(short_read(available)),
            Err(e) => Err(io_error(e)),
        }
    }

    /// Read, normalize and decode a binary table, then attach the result to `node`.
    /// On error `node` is left without data.
    pub fn materialize(
        &mut self,
        node: &mut LabelNode,
        desc: &TableDescriptor,
        mode: ExtractMode,
    ) -> Result<(), TableError> {
        let window = self.read_window(desc)?;
        let data = materialize_window(window, desc, mode)?;
        debug!(table = %desc.table, file = %self.path.display(), "attached table data");
        node.attach(data);
        Ok(())
    }
}
