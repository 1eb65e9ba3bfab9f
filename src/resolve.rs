//! Duplicate-name resolver.
//!
//! Sibling objects under the label root must have distinct class names, and sibling
//! `group` keywords distinct values, before tables can be addressed by name. Every name
//! that occurs more than once (case-insensitive) gets a sequential suffix on each
//! occurrence, first included, in document order:
//!
//! - object classes: `Table`, `Table`, `Table` → `Table1`, `Table2`, `Table3`
//! - group values: `X`, `X` → `X_1`, `X_2`
//!
//! Object classes and group values are counted separately. A suffix whose result is
//! already taken by a sibling (`Table`, `Table`, `Table1`) is skipped, so the renamed
//! siblings come out `Table2`, `Table3`, `Table1`. Group values are compared in their text
//! form, so `Group = 5` twice is a duplicate too. All renames are planned and
//! width-checked before the tree is touched, so a failed resolution leaves it unchanged.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::classify;
use crate::config::ProcessOptions;
use crate::error::ResolveError;
use crate::format::{KW_GROUP, TABLE_PREFIX};
use crate::label::{LabelNode, Value};
use crate::locator::{locate_type_field, LocatorDictionary, TableId};

/// What a tracked name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    ObjectClass,
    GroupValue,
}

/// Occurrence count of one name among the root's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOccurrence {
    /// Spelling of the first occurrence.
    pub name: String,
    pub kind: NameKind,
    pub count: usize,
}

/// One applied rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub kind: NameKind,
    /// Index of the root child that was renamed (or owns the group keyword).
    pub child: usize,
    /// Index of the group keyword within the child; `None` for class renames.
    pub keyword: Option<usize>,
    pub from: String,
    pub to: String,
}

/// Result of [`resolve_duplicates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub renames: Vec<Rename>,
    /// Occurrences of the class name `table` when it needed disambiguation, else 0.
    pub table_count: usize,
    /// Locator of every table under the root, keyed by its resolved identity.
    pub locators: LocatorDictionary,
}

type NameKey = (NameKind, String);

fn key(kind: NameKind, name: &str) -> NameKey {
    (kind, name.to_ascii_lowercase())
}

fn group_values(node: &LabelNode) -> impl Iterator<Item = (usize, String)> + '_ {
    node.keywords
        .iter()
        .enumerate()
        .filter(|(_, kw)| kw.is(KW_GROUP))
        .map(|(j, kw)| (j, kw.value.to_string()))
}

/// Count class names and group values among the root's children, in first-seen order.
#[must_use]
pub fn count_occurrences(root: &LabelNode) -> Vec<NameOccurrence> {
    let mut occurrences: Vec<NameOccurrence> = Vec::new();
    let mut index: HashMap<NameKey, usize> = HashMap::new();
    let mut bump = |kind: NameKind, name: &str| {
        let i = *index.entry(key(kind, name)).or_insert_with(|| {
            occurrences.push(NameOccurrence {
                name: name.to_string(),
                kind,
                count: 0,
            });
            occurrences.len() - 1
        });
        occurrences[i].count += 1;
    };
    for child in &root.children {
        bump(NameKind::ObjectClass, &child.class_name);
        for (_, value) in group_values(child) {
            bump(NameKind::GroupValue, &value);
        }
    }
    occurrences
}

fn suffixed(kind: NameKind, name: &str, suffix: usize) -> String {
    match kind {
        NameKind::ObjectClass => format!("{name}{suffix}"),
        NameKind::GroupValue => format!("{name}_{suffix}"),
    }
}

/// Next free suffixed name for a duplicated `name`; `None` when `name` is unique.
/// `taken` holds every sibling name and every name handed out so far.
fn next_name(
    counters: &mut HashMap<NameKey, usize>,
    taken: &mut HashSet<NameKey>,
    kind: NameKind,
    name: &str,
) -> Option<String> {
    let counter = counters.get_mut(&key(kind, name))?;
    loop {
        *counter += 1;
        let candidate = suffixed(kind, name, *counter);
        if taken.insert(key(kind, &candidate)) {
            return Some(candidate);
        }
    }
}

fn plan(
    kind: NameKind,
    child: usize,
    keyword: Option<usize>,
    from: &str,
    to: String,
    limit: usize,
) -> Result<Rename, ResolveError> {
    if to.len() > limit {
        return Err(ResolveError::NameOverflow { name: to, limit });
    }
    Ok(Rename {
        kind,
        child,
        keyword,
        from: from.to_string(),
        to,
    })
}

/// Disambiguate duplicate names among the root's children and build the locator
/// dictionary for the resulting tables.
pub fn resolve_duplicates(
    root: &mut LabelNode,
    options: &ProcessOptions,
) -> Result<Resolution, ResolveError> {
    let occurrences = count_occurrences(root);
    let mut counters: HashMap<NameKey, usize> = occurrences
        .iter()
        .filter(|o| o.count > 1)
        .map(|o| (key(o.kind, &o.name), 0))
        .collect();
    let mut taken: HashSet<NameKey> = occurrences.iter().map(|o| key(o.kind, &o.name)).collect();

    let limit = options.max_name_len;
    let mut renames = Vec::new();
    for (i, child) in root.children.iter().enumerate() {
        if let Some(to) = next_name(&mut counters, &mut taken, NameKind::ObjectClass, &child.class_name) {
            renames.push(plan(NameKind::ObjectClass, i, None, &child.class_name, to, limit)?);
        }
        for (j, value) in group_values(child) {
            if let Some(to) = next_name(&mut counters, &mut taken, NameKind::GroupValue, &value) {
                renames.push(plan(NameKind::GroupValue, i, Some(j), &value, to, limit)?);
            }
        }
    }

    for rename in &renames {
        let child = &mut root.children[rename.child];
        match rename.keyword {
            None => child.class_name = rename.to.clone(),
            Some(j) => child.keywords[j].value = Value::Text(rename.to.clone()),
        }
        debug!(kind = ?rename.kind, from = %rename.from, to = %rename.to, "renamed duplicate");
    }

    let table_count = occurrences
        .iter()
        .find(|o| o.kind == NameKind::ObjectClass && o.count > 1 && o.name.eq_ignore_ascii_case(TABLE_PREFIX))
        .map_or(0, |o| o.count);

    let mut locators = LocatorDictionary::new();
    for (index, table) in classify::tables(root) {
        let locator = locate_type_field(table, &options.default_locator);
        debug!(table = %table.class_name, %locator, "located type field");
        locators.insert(
            TableId {
                index,
                name: table.class_name.clone(),
            },
            locator,
        );
    }

    for o in occurrences.iter().filter(|o| o.count > 1) {
        info!(name = %o.name, kind = ?o.kind, count = o.count, "disambiguated duplicate name");
    }

    Ok(Resolution {
        renames,
        table_count,
        locators,
    })
}
