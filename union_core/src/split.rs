//! Storage for lists of six types or more.
//!
//! A list is cut in half. The first half gets its own node, the first type of
//! the second half becomes the pivot, and the rest of the second half gets
//! another node:
//!
//! ```text
//! [A, B, C, D, E, F, G]  =>  Split< Union3<A, B, C>, D, Union3<E, F, G> >
//! ```
//!
//! The three parts share the same bytes. Resolving a slot follows one side at
//! each level, so its cost grows with the depth of the tree, not with the
//! length of the list.

use std::mem::ManuallyDrop;
use std::ptr;

use crate::index::{Left, Pivot, Right};
use crate::list::{Cons, Halve, NonEmpty, SameAs, TypeList};
use crate::select::{Build, Select, StorageNode};

type Front<L> = <L as Halve>::Front;
type Back<L> = <L as Halve>::Back;
type PivotOf<L> = <Back<L> as NonEmpty>::Head;
type Rest<L> = <Back<L> as NonEmpty>::Tail;

/// A pivot value next to two nested nodes, all sharing the same bytes.
#[repr(C)]
pub union Split<L, P, R> {
    pivot: ManuallyDrop<P>,
    left: ManuallyDrop<L>,
    right: ManuallyDrop<R>,
}

impl<L: StorageNode, P, R: StorageNode> StorageNode for Split<L, P, R> {
    type List = <L::List as TypeList>::Concat<Cons<P, R::List>>;
    const DEPTH: usize = (if L::DEPTH > R::DEPTH { L::DEPTH } else { R::DEPTH }) + 1;
}

/// Where-clauses here double as the checks on the split itself: the halves
/// must concatenate back into the original list, and the back half must hold
/// at least the pivot.
impl<A, B, C, D, E, F, Tail> Build for Cons<A, Cons<B, Cons<C, Cons<D, Cons<E, Cons<F, Tail>>>>>>
where
    Tail: TypeList,
    Self: Halve,
    Front<Self>: Build,
    Back<Self>: NonEmpty,
    Rest<Self>: Build,
    <Front<Self> as TypeList>::Concat<Back<Self>>: SameAs<Self>,
{
    type Node = Split<<Front<Self> as Build>::Node, PivotOf<Self>, <Rest<Self> as Build>::Node>;
}

unsafe impl<L, P, R> Select<P, Pivot> for Split<L, P, R>
where
    L: StorageNode,
    R: StorageNode,
{
    #[inline]
    unsafe fn project(node: *const Self) -> *const P {
        // SAFETY: `node` is valid for a `Self`, the field is not read.
        unsafe { ptr::addr_of!((*node).pivot).cast() }
    }

    #[inline]
    unsafe fn project_mut(node: *mut Self) -> *mut P {
        // SAFETY: see `project`.
        unsafe { ptr::addr_of_mut!((*node).pivot).cast() }
    }
}

unsafe impl<L, P, R, T, I> Select<T, Left<I>> for Split<L, P, R>
where
    L: Select<T, I>,
    R: StorageNode,
{
    #[inline]
    unsafe fn project(node: *const Self) -> *const T {
        // SAFETY: the left node lives inside `*node`.
        unsafe { <L as Select<T, I>>::project(ptr::addr_of!((*node).left).cast()) }
    }

    #[inline]
    unsafe fn project_mut(node: *mut Self) -> *mut T {
        // SAFETY: see `project`.
        unsafe { <L as Select<T, I>>::project_mut(ptr::addr_of_mut!((*node).left).cast()) }
    }
}

unsafe impl<L, P, R, T, I> Select<T, Right<I>> for Split<L, P, R>
where
    L: StorageNode,
    R: Select<T, I>,
{
    #[inline]
    unsafe fn project(node: *const Self) -> *const T {
        // SAFETY: the right node lives inside `*node`.
        unsafe { <R as Select<T, I>>::project(ptr::addr_of!((*node).right).cast()) }
    }

    #[inline]
    unsafe fn project_mut(node: *mut Self) -> *mut T {
        // SAFETY: see `project`.
        unsafe { <R as Select<T, I>>::project_mut(ptr::addr_of_mut!((*node).right).cast()) }
    }
}
