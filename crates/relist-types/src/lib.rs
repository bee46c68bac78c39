//! Foundation types for relist.
//!
//! This crate defines the identity and equality contract every reconciled
//! item satisfies, plus the position types that edit scripts are expressed in.
//! Every other relist crate depends on `relist-types`.
//!
//! # Key Types
//!
//! - [`Diffable`]: Stable identity plus content equality for one item
//! - [`SectionDiffable`]: A diffable group holding an ordered list of rows
//! - [`IndexMove`]: Flat `from -> to` position change
//! - [`IndexPath`] / [`RowMove`]: Two-level `(section, row)` positions and moves
//! - [`Keyed`], [`Section`], [`SingleSection`]: Ready-made item and section types

pub mod diffable;
pub mod item;
pub mod position;

pub use diffable::{Diffable, SectionDiffable};
pub use item::{Keyed, Section, SingleSection};
pub use position::{IndexMove, IndexPath, RowMove};
