//! Type-level lists.
//!
//! A list is either [`Nil`] or a [`Cons`] of a head type and another list.
//! Neither is ever instantiated; they only carry types around.

use std::any::TypeId;
use std::marker::PhantomData;

use crate::index::{Here, There};
use crate::layout::TypeInfo;

/// The empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nil;

/// A list made of the type `H`, followed by the list `T`.
pub struct Cons<H, T>(PhantomData<fn() -> (H, T)>);

/// Builds a [`Cons`] list out of a sequence of types.
///
/// ```
/// use union_core::{type_list, Cons, Nil, TypeList};
///
/// type Three = type_list![u8, u16, u32];
///
/// assert_eq!(<Three as TypeList>::LEN, 3);
/// let _: Option<Cons<u8, Cons<u16, Cons<u32, Nil>>>> = None::<Three>;
/// ```
#[macro_export]
macro_rules! type_list {
    () => { $crate::list::Nil };
    ($head:ty $(, $tail:ty)* $(,)?) => {
        $crate::list::Cons<$head, $crate::type_list!($($tail),*)>
    };
}

pub trait TypeList {
    /// Number of types in the list.
    const LEN: usize;

    /// This list followed by `R`.
    type Concat<R: TypeList>: TypeList;
}

impl TypeList for Nil {
    const LEN: usize = 0;

    type Concat<R: TypeList> = R;
}

impl<H, T: TypeList> TypeList for Cons<H, T> {
    const LEN: usize = T::LEN + 1;

    type Concat<R: TypeList> = Cons<H, T::Concat<R>>;
}

/// Implemented by every type for itself, and for nothing else.
///
/// Used as a bound to require that two types, usually projections, are the same.
pub trait SameAs<T: ?Sized> {}

impl<T: ?Sized> SameAs<T> for T {}

/// A list that has a first element.
pub trait NonEmpty: TypeList {
    type Head;
    type Tail: TypeList;
}

impl<H, T: TypeList> NonEmpty for Cons<H, T> {
    type Head = H;
    type Tail = T;
}

/// `T` is an element of the list, found at `I`.
///
/// `I` is a chain of [`There`] ending in [`Here`] and is left to inference.
/// If `T` appears twice, inference has two answers and compilation fails.
pub trait Contains<T, I> {
    /// Position of `T` in the list.
    const INDEX: usize;
}

impl<T, Tail> Contains<T, Here> for Cons<T, Tail> {
    const INDEX: usize = 0;
}

impl<H, Tail, T, I> Contains<T, There<I>> for Cons<H, Tail>
where
    Tail: Contains<T, I>,
{
    const INDEX: usize = Tail::INDEX + 1;
}

/// Splits a list in two, by walking `Probe` two elements at a time while
/// walking `Self` one element at a time.
///
/// Start with `Probe = Self`; see [`Halve`].
pub trait SplitAt<Probe> {
    type Front: TypeList;
    type Back: TypeList;
}

impl<L: TypeList> SplitAt<Nil> for L {
    type Front = Nil;
    type Back = L;
}

impl<L: TypeList, X> SplitAt<Cons<X, Nil>> for L {
    type Front = Nil;
    type Back = L;
}

impl<H, T, X, Y, P> SplitAt<Cons<X, Cons<Y, P>>> for Cons<H, T>
where
    T: TypeList + SplitAt<P>,
{
    type Front = Cons<H, <T as SplitAt<P>>::Front>;
    type Back = <T as SplitAt<P>>::Back;
}

/// Splits a list of `n` types into its first `n / 2` types and the rest.
pub trait Halve: TypeList {
    type Front: TypeList;
    type Back: TypeList;
}

impl<L> Halve for L
where
    L: TypeList + SplitAt<L>,
{
    type Front = <L as SplitAt<L>>::Front;
    type Back = <L as SplitAt<L>>::Back;
}

/// Runtime view of a list whose types are all `'static`.
pub trait Reflect: TypeList {
    /// Calls `f` with every type of the list, in order.
    fn each(f: &mut dyn FnMut(TypeInfo));

    /// Returns every type of the list, in order.
    fn infos() -> Vec<TypeInfo> {
        let mut infos = Vec::with_capacity(Self::LEN);
        Self::each(&mut |info| infos.push(info));
        infos
    }

    /// Returns `true` if `T` is one of the types of the list, `false` otherwise.
    fn contains<T: ?Sized + 'static>() -> bool {
        let id = TypeId::of::<T>();
        let mut found = false;
        Self::each(&mut |info| found |= info.id() == id);
        found
    }
}

impl Reflect for Nil {
    #[inline]
    fn each(_: &mut dyn FnMut(TypeInfo)) {}
}

impl<H: 'static, T: Reflect> Reflect for Cons<H, T> {
    #[inline]
    fn each(f: &mut dyn FnMut(TypeInfo)) {
        f(TypeInfo::of::<H>());
        T::each(f);
    }
}
