//! Flat unions, used for lists of up to five types.

use std::mem::ManuallyDrop;
use std::ptr;

use crate::index::{Slot0, Slot1, Slot2, Slot3, Slot4};
use crate::list::Nil;
use crate::select::{Build, Select, StorageNode};

macro_rules! doc_comment {
    ($x:expr, $($tt:tt)*) => {
        #[doc = $x]
        $($tt)*
    };
}

/// Storage for the empty list. It has no slots, so nothing can be selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Union0;

impl StorageNode for Union0 {
    type List = Nil;
    const DEPTH: usize = 0;
}

impl Build for Nil {
    type Node = Union0;
}

macro_rules! impl_select {
    (
        UNION = $union:ident,
        SLOTS = [$($slots:ident),*],
        FIELDS = [],
        COPIES = [$($copies:ident),*]
    ) => ();

    (
        UNION = $union:ident,
        SLOTS = [$slot:ident $(, $slots:ident)*],
        FIELDS = [$field:ident: $current:ident $(, $fields:ident: $generics:ident)*],
        COPIES = [$($copies:ident),*]
    ) => (
        unsafe impl<$($copies),*> Select<$current, $slot> for $union<$($copies),*> {
            #[inline]
            unsafe fn project(node: *const Self) -> *const $current {
                // SAFETY: `node` is valid for a `Self`, the field is not read.
                unsafe { ptr::addr_of!((*node).$field).cast() }
            }

            #[inline]
            unsafe fn project_mut(node: *mut Self) -> *mut $current {
                // SAFETY: see `project`.
                unsafe { ptr::addr_of_mut!((*node).$field).cast() }
            }
        }

        impl_select!(
            UNION = $union,
            SLOTS = [$($slots),*],
            FIELDS = [$($fields: $generics),*],
            COPIES = [$($copies),*]
        );
    );
}

macro_rules! Union {
    (
        pub union $name:ident {
            $($field:ident: $generic:ident),*
        }
    ) => (
        doc_comment!(
            concat!("A flat union with one slot for each of: ", stringify!($($generic),*), "."),
            #[repr(C)]
            pub union $name<$($generic),*> {
                $($field: ManuallyDrop<$generic>,)*
            }
        );

        impl<$($generic),*> StorageNode for $name<$($generic),*> {
            type List = crate::type_list![$($generic),*];
            const DEPTH: usize = 0;
        }

        impl<$($generic),*> Build for crate::type_list![$($generic),*] {
            type Node = $name<$($generic),*>;
        }

        impl_select!(
            UNION = $name,
            SLOTS = [Slot0, Slot1, Slot2, Slot3, Slot4],
            FIELDS = [$($field: $generic),*],
            COPIES = [$($generic),*]
        );
    )
}

macro_rules! GenUnion {
    (
        NAMES = [],
        FIELDS = [$($rest:ident: $rest_generic:ident),*],
        TAKEN = [$($field:ident: $generic:ident),*]
    ) => ();

    (
        NAMES = [$name:ident $(, $names:ident)*],
        FIELDS = [$next:ident: $next_generic:ident $(, $rest:ident: $rest_generic:ident)*],
        TAKEN = [$($field:ident: $generic:ident),*]
    ) => {
        Union!(
            pub union $name {
                $($field: $generic,)* $next: $next_generic
            }
        );

        GenUnion!(
            NAMES = [$($names),*],
            FIELDS = [$($rest: $rest_generic),*],
            TAKEN = [$($field: $generic,)* $next: $next_generic]
        );
    };
}

GenUnion!(
    NAMES = [Union1, Union2, Union3, Union4, Union5],
    FIELDS = [value_0: A, value_1: B, value_2: C, value_3: D, value_4: E],
    TAKEN = []
);
