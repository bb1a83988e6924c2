use crate::list::TypeList;

/// A node of union storage.
///
/// Every node is a union (or a zero-sized type for the empty list) with one
/// slot per type of `List`. No node ever stores which slot is in use.
pub trait StorageNode: Sized {
    /// The types this node has a slot for, in order.
    type List: TypeList;

    /// Number of [`Split`](crate::Split) levels above the deepest flat union.
    const DEPTH: usize;
}

/// Picks the storage node for a list of distinct types.
///
/// Lists of up to five types get a flat union. Longer lists are halved and
/// stored as a [`Split`](crate::Split), which keeps the nesting (and the
/// work the compiler does to resolve a slot) logarithmic in the length of
/// the list.
pub trait Build: TypeList {
    type Node: StorageNode;
}

/// Navigates from a node to the slot that holds a `T`.
///
/// `P` is the path to that slot. It is meant to be inferred: there is exactly
/// one path for each type of a list without repeats, and none for a type
/// that isn't in the list.
///
/// # Safety
/// Implementations must return a pointer that lies within `*node`, is
/// aligned for `T`, and is derived from `node`.
pub unsafe trait Select<T, P>: StorageNode {
    /// Returns a pointer to the slot of `T`.
    ///
    /// # Safety
    /// `node` must be valid for reads of a `Self`. The slot doesn't need to
    /// be initialized.
    unsafe fn project(node: *const Self) -> *const T;

    /// Returns a mutable pointer to the slot of `T`.
    ///
    /// # Safety
    /// `node` must be valid for reads and writes of a `Self`. The slot
    /// doesn't need to be initialized.
    unsafe fn project_mut(node: *mut Self) -> *mut T;
}
