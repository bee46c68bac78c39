//! JSON snapshots as diffable items.
//!
//! A flat snapshot is a JSON array. Objects are identified by their `id_key`
//! member; any other value is its own identity. A sectioned snapshot is an
//! array of objects, each with an `id_key` member and an `items_key` array of
//! rows.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::{Map, Value};

use relist_types::{Diffable, SectionDiffable};

/// Identity of a JSON item: the canonical JSON text of its id value.
///
/// `"1"` and `1` are different identities.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct JsonId(String);

impl JsonId {
    fn of(value: &Value) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for JsonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for JsonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of a snapshot. Content equality is JSON equality of the whole value.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonItem {
    id: JsonId,
    value: Value,
}

impl JsonItem {
    pub fn parse(value: Value, id_key: &str) -> anyhow::Result<Self> {
        let id = match &value {
            Value::Object(map) => match map.get(id_key) {
                Some(id) => JsonId::of(id),
                None => bail!("object has no `{id_key}` member: {value}"),
            },
            other => JsonId::of(other),
        };
        Ok(Self { id, value })
    }
}

impl Diffable for JsonItem {
    type Id = JsonId;

    fn diff_id(&self) -> JsonId {
        self.id.clone()
    }

    fn is_content_equal(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// One section of a sectioned snapshot.
///
/// Content equality compares the section's own members, excluding its rows,
/// so a changed header reloads the section while row changes stay row-level.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonSection {
    id: JsonId,
    header: Map<String, Value>,
    items: Vec<JsonItem>,
}

impl JsonSection {
    pub fn parse(value: Value, id_key: &str, items_key: &str) -> anyhow::Result<Self> {
        let mut header = match value {
            Value::Object(header) => header,
            other => bail!("section is not a JSON object: {other}"),
        };
        let id = match header.get(id_key) {
            Some(id) => JsonId::of(id),
            None => bail!("section has no `{id_key}` member"),
        };
        let rows = match header.remove(items_key) {
            Some(Value::Array(rows)) => rows,
            Some(other) => bail!("section {id}: `{items_key}` is not an array: {other}"),
            None => Vec::new(),
        };
        let items = rows
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                JsonItem::parse(value, id_key).with_context(|| format!("section {id}, row {row}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { id, header, items })
    }
}

impl Diffable for JsonSection {
    type Id = JsonId;

    fn diff_id(&self) -> JsonId {
        self.id.clone()
    }

    fn is_content_equal(&self, other: &Self) -> bool {
        self.header == other.header
    }
}

impl SectionDiffable for JsonSection {
    type Row = JsonItem;

    fn section_items(&self) -> &[JsonItem] {
        &self.items
    }
}

fn read_array(path: &Path) -> anyhow::Result<Vec<Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match value {
        Value::Array(items) => Ok(items),
        _ => bail!("{} does not contain a JSON array", path.display()),
    }
}

/// Load a flat snapshot.
pub fn load_flat(path: &Path, id_key: &str) -> anyhow::Result<Vec<JsonItem>> {
    read_array(path)?
        .into_iter()
        .enumerate()
        .map(|(pos, value)| {
            JsonItem::parse(value, id_key)
                .with_context(|| format!("{}: item {pos}", path.display()))
        })
        .collect()
}

/// Load a sectioned snapshot.
pub fn load_sectioned(
    path: &Path,
    id_key: &str,
    items_key: &str,
) -> anyhow::Result<Vec<JsonSection>> {
    read_array(path)?
        .into_iter()
        .enumerate()
        .map(|(pos, value)| {
            JsonSection::parse(value, id_key, items_key)
                .with_context(|| format!("{}: section {pos}", path.display()))
        })
        .collect()
}
