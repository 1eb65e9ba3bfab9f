//! Pure table decoding: byte-order normalization, whole-table and per-field extraction.
//!
//! Functions here work on an in-memory copy of the table window (`total_bytes` bytes
//! starting at the table offset); file access lives in [`crate::reader`].

use crate::buffer::TypedBuffer;
use crate::config::ExtractMode;
use crate::descriptor::{FieldSpec, TableDescriptor};
use crate::error::TableError;
use crate::format::ByteOrder;
use crate::label::{FieldData, TableData};

/// Bring `buf` to big-endian: for LSB data with multi-byte elements, reverse the bytes
/// of every whole element in place. Trailing bytes that do not form an element are left
/// as they are.
pub fn normalize_byte_order(buf: &mut [u8], element_size: usize, order: ByteOrder) {
    if order == ByteOrder::Lsb && element_size > 1 {
        for element in buf.chunks_exact_mut(element_size) {
            element.reverse();
        }
    }
}

fn check_window(window: &[u8], desc: &TableDescriptor) -> Result<(), TableError> {
    if window.len() != desc.total_bytes {
        return Err(TableError::descriptor(
            &desc.table,
            format!("window holds {} bytes, expected {}", window.len(), desc.total_bytes),
        ));
    }
    Ok(())
}

fn check_binary(desc: &TableDescriptor) -> Result<(), TableError> {
    if desc.is_ascii() {
        return Err(TableError::NotBinary {
            table: desc.table.clone(),
            element_type: desc.element_type(),
        });
    }
    Ok(())
}

/// Whole table as one `(records, bytes_per_row / element_size)` buffer.
///
/// `window` must already be normalized.
pub fn decode_whole(window: &[u8], desc: &TableDescriptor) -> Result<TypedBuffer, TableError> {
    check_binary(desc)?;
    check_window(window, desc)?;
    let cols = desc.elements_per_row()?;
    Ok(TypedBuffer::from_be_bytes(
        desc.element_type(),
        desc.records,
        cols,
        window.to_vec(),
    ))
}

/// Elements `column..column + width` of every row, as a `(records, width)` buffer.
///
/// `window` must already be normalized.
pub fn decode_field(
    window: &[u8],
    desc: &TableDescriptor,
    field: &FieldSpec,
) -> Result<TypedBuffer, TableError> {
    check_binary(desc)?;
    check_window(window, desc)?;
    let columns = desc.elements_per_row()?;
    let end = field.column.checked_add(field.width).unwrap_or(usize::MAX);
    if field.width == 0 || end > columns {
        return Err(TableError::FieldOutOfBounds {
            table: desc.table.clone(),
            field: field.name.clone(),
            column: field.column,
            end,
            columns,
        });
    }

    let size = desc.element_size();
    let span = field.width * size;
    let mut out = Vec::with_capacity(desc.records * span);
    for row in window.chunks_exact(desc.bytes_per_row) {
        let start = field.column * size;
        out.extend_from_slice(&row[start..start + span]);
    }
    Ok(TypedBuffer::from_be_bytes(
        desc.element_type(),
        desc.records,
        field.width,
        out,
    ))
}

/// Normalize `window` and decode it into the attachment selected by `mode`.
pub fn materialize_window(
    mut window: Vec<u8>,
    desc: &TableDescriptor,
    mode: ExtractMode,
) -> Result<TableData, TableError> {
    check_binary(desc)?;
    normalize_byte_order(&mut window, desc.element_size(), desc.byte_order);
    // Tables without declared fields always decode whole.
    let per_field = match mode {
        ExtractMode::Whole => false,
        ExtractMode::Fields | ExtractMode::Auto => !desc.fields.is_empty(),
    };
    if !per_field {
        return decode_whole(&window, desc).map(TableData::Whole);
    }
    desc.fields
        .iter()
        .map(|field| {
            decode_field(&window, desc, field).map(|buffer| FieldData {
                name: field.name.clone(),
                buffer,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(TableData::Fields)
}
