//! Label tree data model.
//!
//! A label is an ordered tree of objects. Each [`LabelNode`] carries its class name
//! (`IsisCube`, `Table`, `History`, ...), its keywords in declaration order, and its child
//! objects in declaration order. The tree is built by an external label parser; this crate
//! only renames nodes (see [`crate::resolve`]) and attaches decoded table data.
//!
//! All name lookups are ASCII case-insensitive, as in the labels themselves.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::TypedBuffer;

/// Keyword value as produced by the label parser.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Value {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Integer view of the value. Text is accepted when it parses as an integer
    /// (parsers commonly hand back `"128"` for unquoted numbers).
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Real(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Some(*v as i64),
            Value::Real(_) => None,
            Value::Text(s) => s.trim().parse().ok(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

/// `name = value` pair owned by a node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyword {
    pub name: String,
    pub value: Value,
}

impl Keyword {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// One object of the label tree.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelNode {
    /// Declared object class; rewritten in place by the duplicate resolver.
    #[cfg_attr(feature = "serde", serde(rename = "class"))]
    pub class_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub keywords: Vec<Keyword>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<LabelNode>,
    /// Reserved "data" slot, filled by the table materializer.
    #[cfg_attr(feature = "serde", serde(skip))]
    data: Option<TableData>,
}

impl LabelNode {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    /// Builder: append a keyword.
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push(Keyword::new(name, value));
        self
    }

    /// Builder: append a child object.
    #[must_use]
    pub fn with_child(mut self, child: LabelNode) -> Self {
        self.children.push(child);
        self
    }

    /// First keyword with the given name (case-insensitive).
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Keyword> {
        self.keywords.iter().find(|kw| kw.is(name))
    }

    /// Value of the first keyword with the given name (case-insensitive).
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.keyword(name).map(|kw| &kw.value)
    }

    /// First child whose class name matches (case-insensitive).
    #[must_use]
    pub fn child(&self, class_name: &str) -> Option<&LabelNode> {
        self.children
            .iter()
            .find(|c| c.class_name.eq_ignore_ascii_case(class_name))
    }

    /// Whether this node's class is `name` (case-insensitive).
    #[must_use]
    pub fn is_class(&self, name: &str) -> bool {
        self.class_name.eq_ignore_ascii_case(name)
    }

    /// Whether the class name starts with `prefix`, compared on exactly `prefix.len()` bytes
    /// (case-insensitive).
    #[must_use]
    pub fn class_starts_with(&self, prefix: &str) -> bool {
        self.class_name
            .as_bytes()
            .get(..prefix.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(prefix.as_bytes()))
    }

    /// Decoded table data, if the materializer has attached any.
    #[must_use]
    pub fn data(&self) -> Option<&TableData> {
        self.data.as_ref()
    }

    /// Attach decoded data, replacing any previous attachment.
    pub fn attach(&mut self, data: TableData) {
        self.data = Some(data);
    }

    /// Remove and return the data attachment.
    pub fn take_data(&mut self) -> Option<TableData> {
        self.data.take()
    }
}

/// Contents of a node's "data" slot.
#[derive(Debug, Clone, PartialEq)]
pub enum TableData {
    /// Whole table as one `(records, elements_per_row)` buffer.
    Whole(TypedBuffer),
    /// One `(records, width)` buffer per declared field, in declaration order.
    Fields(Vec<FieldData>),
}

impl TableData {
    /// Named field attachment (case-insensitive). `None` for whole-table data.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TypedBuffer> {
        match self {
            TableData::Whole(_) => None,
            TableData::Fields(fields) => fields
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(name))
                .map(|f| &f.buffer),
        }
    }

    /// Whole-table buffer. `None` for per-field data.
    #[must_use]
    pub fn whole(&self) -> Option<&TypedBuffer> {
        match self {
            TableData::Whole(buffer) => Some(buffer),
            TableData::Fields(_) => None,
        }
    }
}

/// Per-field data attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData {
    pub name: String,
    pub buffer: TypedBuffer,
}
