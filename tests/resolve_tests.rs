//! Resolver tests: duplicate object classes and group values among root children.

use isis3_tables::resolve::count_occurrences;
use isis3_tables::{resolve_duplicates, LabelNode, NameKind, ProcessOptions, ResolveError};

fn root(children: Vec<LabelNode>) -> LabelNode {
    children
        .into_iter()
        .fold(LabelNode::new("root"), LabelNode::with_child)
}

fn classes(root: &LabelNode) -> Vec<&str> {
    root.children.iter().map(|c| c.class_name.as_str()).collect()
}

fn group(value: &str) -> LabelNode {
    LabelNode::new("group").with_keyword("Group", value)
}

/// Three "Table" siblings get 1, 2, 3 in document order; a unique "Image" is untouched.
#[test]
fn duplicate_tables_are_numbered_in_order() {
    let mut label = root(vec![
        LabelNode::new("Table"),
        LabelNode::new("Image"),
        LabelNode::new("Table"),
        LabelNode::new("Table"),
    ]);
    let resolution = resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();

    assert_eq!(classes(&label), ["Table1", "Image", "Table2", "Table3"]);
    assert_eq!(resolution.table_count, 3);
    assert_eq!(resolution.renames.len(), 3);
    assert_eq!(resolution.renames[0].from, "Table");
    assert_eq!(resolution.renames[0].to, "Table1");
}

/// Duplicates are found case-insensitively; each occurrence keeps its own spelling.
#[test]
fn duplicates_match_case_insensitively() {
    let mut label = root(vec![
        LabelNode::new("table"),
        LabelNode::new("TABLE"),
        LabelNode::new("History"),
    ]);
    resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();
    assert_eq!(classes(&label), ["table1", "TABLE2", "History"]);
}

/// Group values get an underscore separator; unique values are untouched.
#[test]
fn duplicate_group_values_use_underscore_suffix() {
    let mut label = root(vec![group("X"), group("Y"), group("x"), group("X")]);
    let resolution = resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();

    let values: Vec<String> = label
        .children
        .iter()
        .map(|c| c.value("group").unwrap().to_string())
        .collect();
    assert_eq!(values, ["X_1", "Y", "x_2", "X_3"]);
    // The "group" class names themselves are duplicates too.
    assert_eq!(classes(&label), ["group1", "group2", "group3", "group4"]);
    assert_eq!(resolution.table_count, 0);
}

/// An object class and a group value with the same text are counted separately.
#[test]
fn object_and_group_names_are_counted_separately() {
    let mut label = root(vec![
        LabelNode::new("Field"),
        LabelNode::new("Pointer").with_keyword("Group", "Field"),
    ]);
    let resolution = resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();
    assert!(resolution.renames.is_empty());
    assert_eq!(classes(&label), ["Field", "Pointer"]);
}

#[test]
fn occurrences_are_counted_in_first_seen_order() {
    let label = root(vec![
        LabelNode::new("Table"),
        group("Kernels"),
        LabelNode::new("TABLE"),
    ]);
    let occurrences = count_occurrences(&label);
    assert_eq!(occurrences.len(), 3);
    assert_eq!(occurrences[0].name, "Table");
    assert_eq!(occurrences[0].kind, NameKind::ObjectClass);
    assert_eq!(occurrences[0].count, 2);
    assert_eq!(occurrences[1].name, "group");
    assert_eq!(occurrences[2].name, "Kernels");
    assert_eq!(occurrences[2].kind, NameKind::GroupValue);
    assert_eq!(occurrences[2].count, 1);
}

/// A single table needs no disambiguation and reports no table count.
#[test]
fn single_table_is_left_alone() {
    let mut label = root(vec![LabelNode::new("IsisCube"), LabelNode::new("Table")]);
    let resolution = resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();
    assert_eq!(classes(&label), ["IsisCube", "Table"]);
    assert_eq!(resolution.table_count, 0);
    assert_eq!(resolution.locators.len(), 1);
}

/// A suffixed name wider than the limit is an error and nothing is renamed.
#[test]
fn name_overflow_is_rejected_without_renaming() {
    let mut label = root(vec![
        LabelNode::new("Table"),
        LabelNode::new("Histogram"),
        LabelNode::new("Table"),
        LabelNode::new("Histogram"),
    ]);
    let options = ProcessOptions {
        max_name_len: 9,
        ..ProcessOptions::default()
    };
    let err = resolve_duplicates(&mut label, &options).unwrap_err();
    match err {
        ResolveError::NameOverflow { name, limit } => {
            assert_eq!(name, "Histogram1");
            assert_eq!(limit, 9);
        }
    }
    assert_eq!(classes(&label), ["Table", "Histogram", "Table", "Histogram"]);
}

/// Each table records the field child that declares its type, keyed by resolved identity.
#[test]
fn locators_are_recorded_per_table() {
    let mut label = root(vec![
        LabelNode::new("IsisCube"),
        LabelNode::new("Table").with_child(LabelNode::new("Field").with_keyword("Type", "Integer")),
        LabelNode::new("Table")
            .with_child(LabelNode::new("Header"))
            .with_child(LabelNode::new("Column").with_keyword("Type", "Double")),
        LabelNode::new("Table").with_child(LabelNode::new("Field")),
    ]);
    let resolution = resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();
    let locators = &resolution.locators;

    assert_eq!(locators.len(), 3);
    assert_eq!(locators.get(1), Some("Field"));
    assert_eq!(locators.get_by_name("table2"), Some("Column"));
    assert_eq!(locators.get_by_name("Table3"), Some("field"));
    assert_eq!(locators.get(0), None);

    let ids: Vec<usize> = locators.iter().map(|(id, _)| id.index).collect();
    assert_eq!(ids, [1, 2, 3]);
}

/// Suffixes already used by a sibling are skipped for both kinds.
#[test]
fn renames_skip_names_already_taken() {
    let mut label = root(vec![
        LabelNode::new("Table"),
        LabelNode::new("Table"),
        LabelNode::new("table1"),
        group("X"),
        group("X"),
        group("x_1"),
    ]);
    let resolution = resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();

    assert_eq!(&classes(&label)[..3], ["Table2", "Table3", "table1"]);
    let values: Vec<String> = label.children[3..]
        .iter()
        .map(|c| c.value("group").unwrap().to_string())
        .collect();
    assert_eq!(values, ["X_2", "X_3", "x_1"]);

    let mut lowered: Vec<String> = label.children.iter().map(|c| c.class_name.to_lowercase()).collect();
    lowered.extend(values.iter().map(|v| v.to_lowercase()));
    let total = lowered.len();
    lowered.sort();
    lowered.dedup();
    assert_eq!(lowered.len(), total);

    assert_eq!(resolution.locators.get_by_name("table1"), Some("field"));
    assert_eq!(resolution.locators.get(2), Some("field"));
}

/// Non-text group values are compared by their text form.
#[test]
fn numeric_group_values_are_disambiguated() {
    let mut label = root(vec![
        LabelNode::new("Kernels").with_keyword("Group", 5),
        LabelNode::new("Instrument").with_keyword("Group", "5"),
    ]);
    resolve_duplicates(&mut label, &ProcessOptions::default()).unwrap();
    let values: Vec<String> = label
        .children
        .iter()
        .map(|c| c.value("group").unwrap().to_string())
        .collect();
    assert_eq!(values, ["5_1", "5_2"]);
}
