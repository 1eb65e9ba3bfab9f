//! Table element types, byte orders and reserved label names.
//!
//! Binary tables decode to big-endian: LSB tables are byte-swapped per element after
//! reading, MSB tables are used as read.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keyword holding the 1-based offset of the table bytes in the file.
pub const KW_START_BYTE: &str = "startbyte";
/// Keyword holding the total table size in bytes.
pub const KW_BYTES: &str = "bytes";
/// Keyword holding the number of rows.
pub const KW_RECORDS: &str = "records";
/// Keyword holding `LSB` / `MSB`.
pub const KW_BYTE_ORDER: &str = "byteorder";
/// Element type keyword, read from the table's locator field.
pub const KW_TYPE: &str = "type";
/// Field width in elements.
pub const KW_SIZE: &str = "size";
/// Field display name.
pub const KW_NAME: &str = "name";
/// Keyword whose value names a group; duplicate values are disambiguated.
pub const KW_GROUP: &str = "group";

/// Class-name prefix identifying table objects (compared on exactly these 5 bytes).
pub const TABLE_PREFIX: &str = "table";
/// Class-name prefix identifying field children of a table.
pub const FIELD_PREFIX: &str = "field";

/// Top-level identifiers that raise confidence in an ISIS3 label.
pub const FORMAT_MARKERS: [&str; 3] = ["isiscube", "history", "label"];
/// Identifier count at which the format sniff applies its penalty.
pub const LARGE_LABEL_THRESHOLD: usize = 20;
/// Minimum confidence for a format match.
pub const FORMAT_MATCH_THRESHOLD: i32 = 2;

/// Default width limit for object and group names after disambiguation.
pub const DEFAULT_MAX_NAME_LEN: usize = 32;

/// Element type of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum ElementType {
    Byte,
    Short,
    Int,
    Float,
    VaxFloat,
    VaxInteger,
    Int64,
    Double,
    Ascii,
}

impl ElementType {
    /// Parse a declared type string (case-insensitive). `None` when unrecognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let t = match s.trim().to_ascii_lowercase().as_str() {
            "byte" | "char" => ElementType::Byte,
            "short" => ElementType::Short,
            "int" | "integer" => ElementType::Int,
            "float" | "real" => ElementType::Float,
            "vax_float" => ElementType::VaxFloat,
            "vax_integer" => ElementType::VaxInteger,
            "int64" => ElementType::Int64,
            "double" => ElementType::Double,
            "ascii" => ElementType::Ascii,
            _ => return None,
        };
        Some(t)
    }

    /// Size of one element in bytes. ASCII tables are byte-addressed.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            ElementType::Byte | ElementType::Ascii => 1,
            ElementType::Short => 2,
            ElementType::Int | ElementType::Float | ElementType::VaxInteger | ElementType::VaxFloat => 4,
            ElementType::Int64 | ElementType::Double => 8,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ElementType::Byte => "byte",
            ElementType::Short => "short",
            ElementType::Int => "int",
            ElementType::Float => "float",
            ElementType::VaxFloat => "vax_float",
            ElementType::VaxInteger => "vax_integer",
            ElementType::Int64 => "int64",
            ElementType::Double => "double",
            ElementType::Ascii => "ascii",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a table's element type was determined.
///
/// Undeclared and unrecognized types both decode as [`ElementType::Double`]; keeping the
/// reason lets diagnostics tell them apart from a declared double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeclaration {
    /// Type keyword present and recognized.
    Declared(ElementType),
    /// No type keyword found under the locator field.
    Defaulted,
    /// Type keyword present but unrecognized; holds the declared string.
    Fallback(String),
}

impl TypeDeclaration {
    /// Resolve an optional declared type string.
    #[must_use]
    pub fn from_declared(declared: Option<&str>) -> Self {
        match declared {
            None => TypeDeclaration::Defaulted,
            Some(s) => match ElementType::parse(s) {
                Some(t) => TypeDeclaration::Declared(t),
                None => TypeDeclaration::Fallback(s.to_string()),
            },
        }
    }

    /// Element type used for decoding.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            TypeDeclaration::Declared(t) => *t,
            TypeDeclaration::Defaulted | TypeDeclaration::Fallback(_) => ElementType::Double,
        }
    }

    #[must_use]
    pub fn is_declared(&self) -> bool {
        matches!(self, TypeDeclaration::Declared(_))
    }
}

/// Byte order of multi-byte table elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "UPPERCASE"))]
pub enum ByteOrder {
    /// Little-endian; swapped to big-endian on decode.
    Lsb,
    /// Big-endian; decoded as read.
    #[default]
    Msb,
}

impl ByteOrder {
    /// Parse `LSB` / `MSB` (case-insensitive). `None` when unrecognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("lsb") {
            Some(ByteOrder::Lsb)
        } else if s.eq_ignore_ascii_case("msb") {
            Some(ByteOrder::Msb)
        } else {
            None
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Lsb => f.write_str("LSB"),
            ByteOrder::Msb => f.write_str("MSB"),
        }
    }
}
