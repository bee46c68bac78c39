//! Ready-made item and section types.
//!
//! These cover the common shapes so callers only implement [`Diffable`]
//! directly when their model needs a custom identity or comparison.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::diffable::{Diffable, SectionDiffable};

/// An item identified by `key` whose displayable content is `value`.
///
/// Unlike the default contract, content equality compares `value`, so a
/// changed value at a stable position is reported as a reload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyed<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Keyed<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> Diffable for Keyed<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: PartialEq,
{
    type Id = K;

    fn diff_id(&self) -> K {
        self.key.clone()
    }

    fn is_content_equal(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

/// A section identified by `id`, holding ordered rows.
///
/// Content equality is identity only: row changes are reported by the
/// row-level diff, never as a reload of the whole section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<K, R> {
    pub id: K,
    pub items: Vec<R>,
}

impl<K, R> Section<K, R> {
    pub fn new(id: K, items: Vec<R>) -> Self {
        Self { id, items }
    }
}

impl<K, R> Diffable for Section<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    type Id = K;

    fn diff_id(&self) -> K {
        self.id.clone()
    }
}

impl<K, R> SectionDiffable for Section<K, R>
where
    K: Eq + Hash + Clone + fmt::Debug,
    R: Diffable,
{
    type Row = R;

    fn section_items(&self) -> &[R] {
        &self.items
    }
}

/// The implicit section a flat list lives in.
///
/// Every `SingleSection` has the same identity, so diffing two of them never
/// reports section-level changes, only row-level ones in section 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSection<R> {
    pub items: Vec<R>,
}

impl<R> SingleSection<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self { items }
    }
}

impl<R> Diffable for SingleSection<R> {
    type Id = ();

    fn diff_id(&self) -> Self::Id {}
}

impl<R: Diffable> SectionDiffable for SingleSection<R> {
    type Row = R;

    fn section_items(&self) -> &[R] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_compares_value() {
        let a = Keyed::new("k", 1);
        assert!(a.is_content_equal(&Keyed::new("k", 1)));
        assert!(!a.is_content_equal(&Keyed::new("k", 2)));
        assert_eq!(a.diff_id(), "k");
    }

    #[test]
    fn section_ignores_rows_for_content_equality() {
        let a = Section::new("A", vec![1, 2]);
        let b = Section::new("A", vec![3]);
        assert!(a.is_content_equal(&b));
        assert_eq!(b.section_items(), &[3]);
    }

    #[test]
    fn single_sections_share_identity() {
        let a = SingleSection::new(vec!["x"]);
        let b = SingleSection::new(vec!["y", "z"]);
        assert_eq!(a.diff_id(), b.diff_id());
        assert_eq!(b.section_items().len(), 2);
    }

    #[test]
    fn keyed_serde_roundtrip() {
        let item = Keyed::new(7u32, String::from("seven"));
        let json = serde_json::to_string(&item).unwrap();
        let parsed: Keyed<u32, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(item, parsed);
    }
}
