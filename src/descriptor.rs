//! Table descriptors: the binary layout of a table, read from its label keywords.

use tracing::{debug, warn};

use crate::error::TableError;
use crate::format::{
    ByteOrder, ElementType, TypeDeclaration, FIELD_PREFIX, KW_BYTES, KW_BYTE_ORDER, KW_NAME,
    KW_RECORDS, KW_SIZE, KW_START_BYTE, KW_TYPE,
};
use crate::label::LabelNode;

/// One declared field of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// `Name` keyword of the field, or its class name when it has none.
    pub name: String,
    /// Zero-based element column of the field's first element within a row.
    pub column: usize,
    /// Elements per row (`Size` keyword, default 1).
    pub width: usize,
    /// Class name of the field child.
    pub locator_key: String,
}

/// Layout of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Resolved class name of the table object.
    pub table: String,
    /// 1-based offset of the first table byte, as declared.
    pub start_byte: u64,
    pub total_bytes: usize,
    pub records: usize,
    /// `total_bytes / records`; always exact.
    pub bytes_per_row: usize,
    pub byte_order: ByteOrder,
    pub declaration: TypeDeclaration,
    /// Field child the element type was read from.
    pub locator: String,
    pub fields: Vec<FieldSpec>,
}

fn int_keyword(table: &str, node: &LabelNode, name: &str) -> Result<Option<i64>, TableError> {
    match node.value(name) {
        None => Ok(None),
        Some(v) => v
            .as_int()
            .map(Some)
            .ok_or_else(|| TableError::descriptor(table, format!("{name} = {v} is not an integer"))),
    }
}

fn positive<T: TryFrom<i64>>(table: &str, name: &str, value: Option<i64>) -> Result<T, TableError> {
    let v = value.ok_or_else(|| TableError::descriptor(table, format!("missing {name}")))?;
    if v <= 0 {
        return Err(TableError::descriptor(table, format!("{name} must be positive, got {v}")));
    }
    T::try_from(v).map_err(|_| TableError::descriptor(table, format!("{name} = {v} is out of range")))
}

impl TableDescriptor {
    /// Build the descriptor of `node`, reading the element type from its `locator` child.
    ///
    /// Keywords are looked up by name, so their order does not matter. A missing or
    /// unrecognized `ByteOrder` means MSB. A missing `Type` means double.
    pub fn from_node(node: &LabelNode, locator: &str) -> Result<Self, TableError> {
        let table = node.class_name.as_str();

        let start_byte: u64 = positive(table, KW_START_BYTE, int_keyword(table, node, KW_START_BYTE)?)?;
        let total_bytes: usize = positive(table, KW_BYTES, int_keyword(table, node, KW_BYTES)?)?;
        let records: usize = positive(table, KW_RECORDS, int_keyword(table, node, KW_RECORDS)?)?;
        if total_bytes % records != 0 {
            return Err(TableError::descriptor(
                table,
                format!("{total_bytes} bytes do not divide into {records} records"),
            ));
        }

        let byte_order = match node.value(KW_BYTE_ORDER) {
            None => ByteOrder::Msb,
            Some(v) => v.as_str().and_then(ByteOrder::parse).unwrap_or_else(|| {
                warn!(table, byte_order = %v, "unrecognized byte order, assuming MSB");
                ByteOrder::Msb
            }),
        };

        let declared = node
            .child(locator)
            .and_then(|field| field.value(KW_TYPE))
            .map(ToString::to_string);
        let declaration = TypeDeclaration::from_declared(declared.as_deref());
        match &declaration {
            TypeDeclaration::Declared(_) => {}
            TypeDeclaration::Defaulted => debug!(table, locator, "no type declared, decoding as double"),
            TypeDeclaration::Fallback(s) => {
                warn!(table, locator, declared = %s, "unrecognized element type, decoding as double");
            }
        }

        let mut fields = Vec::new();
        let mut column: usize = 0;
        for child in node.children.iter().filter(|c| c.class_starts_with(FIELD_PREFIX)) {
            let name = child
                .value(KW_NAME)
                .map_or_else(|| child.class_name.clone(), ToString::to_string);
            let width = match int_keyword(table, child, KW_SIZE)? {
                None => 1,
                size => positive(table, KW_SIZE, size)?,
            };
            fields.push(FieldSpec {
                name,
                column,
                width,
                locator_key: child.class_name.clone(),
            });
            column = column
                .checked_add(width)
                .ok_or_else(|| TableError::descriptor(table, "field columns overflow"))?;
        }

        let descriptor = TableDescriptor {
            table: table.to_string(),
            start_byte,
            total_bytes,
            records,
            bytes_per_row: total_bytes / records,
            byte_order,
            declaration,
            locator: locator.to_string(),
            fields,
        };
        debug!(
            table,
            start_byte,
            total_bytes,
            records,
            element_type = %descriptor.element_type(),
            byte_order = %byte_order,
            "built table descriptor"
        );
        Ok(descriptor)
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.declaration.element_type()
    }

    #[must_use]
    pub fn element_size(&self) -> usize {
        self.element_type().size()
    }

    /// Zero-based file offset of the first table byte.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.start_byte - 1
    }

    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.element_type() == ElementType::Ascii
    }

    /// Elements per row; rows must hold a whole number of elements.
    pub fn elements_per_row(&self) -> Result<usize, TableError> {
        let size = self.element_size();
        if self.bytes_per_row % size != 0 {
            return Err(TableError::RowAlignment {
                table: self.table.clone(),
                bytes_per_row: self.bytes_per_row as u64,
                element_type: self.element_type(),
                element_size: size,
            });
        }
        Ok(self.bytes_per_row / size)
    }
}
