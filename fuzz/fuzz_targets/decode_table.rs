#![no_main]

use isis3_tables::{materialize_window, ExtractMode, LabelNode, TableDescriptor};
use libfuzzer_sys::fuzz_target;

const TYPES: [&str; 9] = [
    "byte", "short", "integer", "real", "vax_float", "vax_integer", "int64", "double", "bogus",
];

// First 4 bytes pick the layout; the rest is the table window.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let (head, window) = data.split_at(4);
    let records = i64::from(head[0]) + 1;
    let order = if head[1] & 1 == 0 { "LSB" } else { "MSB" };
    let ty = TYPES[usize::from(head[2]) % TYPES.len()];
    let width = i64::from(head[3] % 4);

    let node = LabelNode::new("Table")
        .with_keyword("StartByte", 1)
        .with_keyword("Bytes", window.len() as i64)
        .with_keyword("Records", records)
        .with_keyword("ByteOrder", order)
        .with_child(LabelNode::new("Field").with_keyword("Type", ty).with_keyword("Size", width));
    let Ok(desc) = TableDescriptor::from_node(&node, "Field") else {
        return;
    };
    let _ = materialize_window(window.to_vec(), &desc, ExtractMode::Auto);
});
