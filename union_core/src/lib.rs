//! This crate builds the storage behind a variadic union.
//!
//! Given a type-level list of distinct types, [`Build`] picks a node type
//! whose size and alignment fit every member: a flat union for up to five
//! types, and a balanced tree of [`Split`] nodes beyond that. [`Select`]
//! navigates a node down to the slot of one member.
//!
//! Nothing here tracks which member is alive. That is left to whoever owns
//! the storage.

pub mod index;
pub mod layout;
pub mod list;
pub mod select;
pub mod split;
pub mod union;

pub use index::{Left, Pivot, Right, Slot0, Slot1, Slot2, Slot3, Slot4};
pub use layout::{audit, Inspect, LayoutError, Shape, TypeInfo};
pub use list::{Cons, Contains, Halve, Nil, NonEmpty, Reflect, SameAs, TypeList};
pub use select::{Build, Select, StorageNode};
pub use split::Split;
pub use union::{Union0, Union1, Union2, Union3, Union4, Union5};
