//! Reader tests: read table windows from a file on disk and attach decoded data.

use std::io::Write;

use isis3_tables::{ExtractMode, LabelNode, TableData, TableDescriptor, TableError, TableReader};

/// 64 bytes of label text followed by `table`.
fn cube_file(table: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[b'L'; 64]).unwrap();
    file.write_all(table).unwrap();
    file.flush().unwrap();
    file
}

fn int_table(records: i64, bytes: i64, byte_order: &str) -> LabelNode {
    LabelNode::new("Table")
        .with_keyword("StartByte", 65)
        .with_keyword("Bytes", bytes)
        .with_keyword("Records", records)
        .with_keyword("ByteOrder", byte_order)
        .with_child(LabelNode::new("Field").with_keyword("Name", "Line").with_keyword("Type", "Integer"))
        .with_child(LabelNode::new("Field").with_keyword("Name", "Sample").with_keyword("Type", "Integer"))
}

fn le_ints(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn read_window_starts_at_zero_based_offset() {
    let file = cube_file(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let desc = TableDescriptor::from_node(&int_table(2, 8, "MSB"), "Field").unwrap();

    let mut reader = TableReader::open(file.path(), "Table").unwrap();
    assert_eq!(reader.len(), 72);
    let window = reader.read_window(&desc).unwrap();
    assert_eq!(window, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

/// LSB integers are decoded per field: each column comes out contiguous.
#[test]
fn materialize_lsb_fields() {
    let file = cube_file(&le_ints(&[1, 100, 2, 200, 3, 300]));
    let mut node = int_table(3, 24, "LSB");
    let desc = TableDescriptor::from_node(&node, "Field").unwrap();

    let mut reader = TableReader::open(file.path(), "Table").unwrap();
    reader.materialize(&mut node, &desc, ExtractMode::Auto).unwrap();

    let data = node.data().unwrap();
    let line = data.field("line").unwrap();
    assert_eq!(line.shape(), (3, 1));
    assert_eq!(line.to_i32().unwrap(), vec![1, 2, 3]);
    assert_eq!(data.field("Sample").unwrap().to_i32().unwrap(), vec![100, 200, 300]);
    assert!(data.whole().is_none());
}

/// MSB data is attached exactly as read.
#[test]
fn materialize_msb_whole_is_byte_identity() {
    let bytes: Vec<u8> = (0u8..40).collect();
    let file = cube_file(&bytes);
    let mut node = int_table(5, 40, "MSB");
    let desc = TableDescriptor::from_node(&node, "Field").unwrap();

    let mut reader = TableReader::open(file.path(), "Table").unwrap();
    reader.materialize(&mut node, &desc, ExtractMode::Whole).unwrap();

    match node.data() {
        Some(TableData::Whole(buffer)) => {
            assert_eq!(buffer.shape(), (5, 2));
            assert_eq!(buffer.as_bytes(), bytes.as_slice());
            assert_eq!(buffer.row_bytes(1).unwrap(), &bytes[8..16]);
        }
        other => panic!("expected whole-table data, got {other:?}"),
    }
}

/// One handle serves several tables in the same file.
#[test]
fn reader_is_reused_across_tables() {
    let mut bytes = le_ints(&[7, 8]);
    bytes.extend_from_slice(&5i16.to_be_bytes());
    bytes.extend_from_slice(&(-6i16).to_be_bytes());
    let file = cube_file(&bytes);

    let mut first = int_table(1, 8, "LSB");
    let mut second = LabelNode::new("Table")
        .with_keyword("StartByte", 73)
        .with_keyword("Bytes", 4)
        .with_keyword("Records", 2)
        .with_child(LabelNode::new("Field").with_keyword("Type", "Short"));

    let mut reader = TableReader::open(file.path(), "Table").unwrap();
    let d1 = TableDescriptor::from_node(&first, "Field").unwrap();
    let d2 = TableDescriptor::from_node(&second, "Field").unwrap();
    reader.materialize(&mut second, &d2, ExtractMode::Whole).unwrap();
    reader.materialize(&mut first, &d1, ExtractMode::Whole).unwrap();

    assert_eq!(first.data().unwrap().whole().unwrap().to_i32().unwrap(), vec![7, 8]);
    assert_eq!(second.data().unwrap().whole().unwrap().to_i16().unwrap(), vec![5, -6]);
}

/// A window running past the end of the file is a short read, not a panic.
#[test]
fn short_read_is_reported() {
    let file = cube_file(&[0u8; 10]);
    let mut node = int_table(2, 16, "MSB");
    let desc = TableDescriptor::from_node(&node, "Field").unwrap();

    let mut reader = TableReader::open(file.path(), "Table").unwrap();
    let err = reader.materialize(&mut node, &desc, ExtractMode::Auto).unwrap_err();
    match err {
        TableError::ShortRead {
            table,
            offset,
            expected,
            available,
            ..
        } => {
            assert_eq!(table, "Table");
            assert_eq!(offset, 64);
            assert_eq!(expected, 16);
            assert_eq!(available, 10);
        }
        other => panic!("expected short read, got {other}"),
    }
    assert!(node.data().is_none());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.cub");
    let err = TableReader::open(&path, "Table2").err().unwrap();
    match err {
        TableError::Io { file, table, source } => {
            assert_eq!(file, path);
            assert_eq!(table, "Table2");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected IO error, got {other}"),
    }
}
