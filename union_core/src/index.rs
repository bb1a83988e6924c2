use std::marker::PhantomData;

macro_rules! IndexStruct {
    ($name: ident $(, $names:ident)*) => (
        /// This type is used to 'index' into a slot of a flat union.
        /// See [`Select`](crate::Select) for the slot it selects.
        #[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
        pub struct $name;

        IndexStruct!($($names),*);
    );

    () => ();
}

IndexStruct!(Slot0, Slot1, Slot2, Slot3, Slot4);

/// Selects the pivot of a [`Split`](crate::Split) node.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Pivot;

/// Continues along `I` inside the left side of a [`Split`](crate::Split) node.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Left<I>(PhantomData<I>);

/// Continues along `I` inside the right side of a [`Split`](crate::Split) node.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Right<I>(PhantomData<I>);

/// The head of a list. See [`Contains`](crate::Contains).
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Here;

/// One past the head of a list.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct There<I>(PhantomData<I>);
