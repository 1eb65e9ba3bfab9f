//! Typed, row-major decode output.

use byteorder::{BigEndian, ByteOrder as _};

use crate::format::ElementType;

/// Decoded table block: element type tag, `(rows, cols)` shape and row-major storage.
///
/// Storage holds the normalized big-endian bytes; the typed accessors convert to native
/// values on demand. VAX elements are kept as raw bytes (no floating-point conversion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedBuffer {
    element_type: ElementType,
    rows: usize,
    cols: usize,
    bytes: Vec<u8>,
}

impl TypedBuffer {
    /// Wrap big-endian element bytes. `bytes.len()` must equal `rows * cols * element_size`.
    pub(crate) fn from_be_bytes(element_type: ElementType, rows: usize, cols: usize, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), rows * cols * element_type.size());
        Self {
            element_type,
            rows,
            cols,
            bytes,
        }
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw big-endian storage.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw bytes of one row.
    #[must_use]
    pub fn row_bytes(&self, row: usize) -> Option<&[u8]> {
        let width = self.cols * self.element_type.size();
        self.bytes.get(row * width..(row + 1) * width)
    }

    #[must_use]
    pub fn to_u8(&self) -> Option<&[u8]> {
        (self.element_type == ElementType::Byte).then_some(self.bytes.as_slice())
    }

    #[must_use]
    pub fn to_i16(&self) -> Option<Vec<i16>> {
        (self.element_type == ElementType::Short).then(|| {
            let mut out = vec![0; self.len()];
            BigEndian::read_i16_into(&self.bytes, &mut out);
            out
        })
    }

    /// Int and VAX integer elements.
    #[must_use]
    pub fn to_i32(&self) -> Option<Vec<i32>> {
        matches!(self.element_type, ElementType::Int | ElementType::VaxInteger).then(|| {
            let mut out = vec![0; self.len()];
            BigEndian::read_i32_into(&self.bytes, &mut out);
            out
        })
    }

    #[must_use]
    pub fn to_i64(&self) -> Option<Vec<i64>> {
        (self.element_type == ElementType::Int64).then(|| {
            let mut out = vec![0; self.len()];
            BigEndian::read_i64_into(&self.bytes, &mut out);
            out
        })
    }

    #[must_use]
    pub fn to_f32(&self) -> Option<Vec<f32>> {
        (self.element_type == ElementType::Float).then(|| {
            let mut out = vec![0.0; self.len()];
            BigEndian::read_f32_into(&self.bytes, &mut out);
            out
        })
    }

    #[must_use]
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        (self.element_type == ElementType::Double).then(|| {
            let mut out = vec![0.0; self.len()];
            BigEndian::read_f64_into(&self.bytes, &mut out);
            out
        })
    }
}
