//! The identity and equality contract for reconciled items.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// An item that can be matched across two snapshots of a collection.
///
/// Two items represent the same logical entity iff their [`diff_id`]s are
/// equal. Within one snapshot, ids must be unique.
///
/// [`is_content_equal`] decides whether a matched item must be refreshed in
/// place. The default implementation compares identity only, so a type that
/// does not override it never produces reloads. Types that need reload
/// detection opt in by overriding it with a real comparison.
///
/// [`diff_id`]: Diffable::diff_id
/// [`is_content_equal`]: Diffable::is_content_equal
pub trait Diffable {
    /// The identity type. Must be stable across snapshots.
    type Id: Eq + Hash + Clone + fmt::Debug;

    /// The identity of this item.
    fn diff_id(&self) -> Self::Id;

    /// Whether this item's displayable content equals `other`'s.
    ///
    /// Only called for items with equal ids.
    fn is_content_equal(&self, other: &Self) -> bool {
        self.diff_id() == other.diff_id()
    }
}

/// A diffable group of rows.
///
/// The section's own identity is independent of the identities of its rows.
pub trait SectionDiffable: Diffable {
    /// The row item type.
    type Row: Diffable;

    /// The rows of this section, in display order.
    fn section_items(&self) -> &[Self::Row];
}

macro_rules! self_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Diffable for $ty {
                type Id = $ty;

                fn diff_id(&self) -> Self::Id {
                    self.clone()
                }
            }
        )*
    };
}

self_identified!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String, Uuid,
);

impl Diffable for &str {
    type Id = String;

    fn diff_id(&self) -> Self::Id {
        (*self).to_owned()
    }
}

impl Diffable for f32 {
    type Id = u32;

    fn diff_id(&self) -> Self::Id {
        self.to_bits()
    }
}

impl Diffable for f64 {
    type Id = u64;

    fn diff_id(&self) -> Self::Id {
        self.to_bits()
    }
}

impl<Tz: TimeZone> Diffable for DateTime<Tz> {
    type Id = DateTime<Utc>;

    fn diff_id(&self) -> Self::Id {
        self.with_timezone(&Utc)
    }
}

macro_rules! forward_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Diffable> Diffable for $ptr<T> {
                type Id = T::Id;

                fn diff_id(&self) -> Self::Id {
                    (**self).diff_id()
                }

                fn is_content_equal(&self, other: &Self) -> bool {
                    (**self).is_content_equal(&**other)
                }
            }
        )*
    };
}

forward_pointer!(Box, Rc, Arc);
