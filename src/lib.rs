//! Storage for one value out of a fixed list of types, with no discriminant.
//!
//! A [`VariadicUnion`] is as large and as aligned as the largest and most
//! aligned of its types, and nothing more. It never records which type it
//! holds: the owner keeps track of that, and names the type on every access.
//! Naming a type that isn't in the list fails to compile.
//!
//! ```
//! use variadic_union::variadic_union;
//!
//! variadic_union! {
//!     pub union Scalar { i32, f64, i32, String }
//! }
//!
//! assert_eq!(Scalar::ARITY, 3);
//!
//! let mut storage = Scalar::new();
//! storage.construct::<String, _>(String::from("hello, world!"));
//!
//! assert_eq!(unsafe { storage.reference::<String, _>() }, "hello, world!");
//! unsafe { storage.destroy::<String, _>() };
//! ```
//!
//! Lists of up to five types are stored as one flat union. Longer lists are
//! halved, recursively, so a list of `n` types nests about `log2(n / 5)`
//! unions deep. See [`VariadicUnion::shape`].
//!
//! # Features
//! - `tracing`: emits a `trace` event on every construction and destruction.

#[macro_use]
mod macros;

mod occupied;
mod variadic;

pub use occupied::Occupied;
pub use variadic::{Supports, VariadicUnion};

pub use union_core::{
    type_list, Build, Cons, LayoutError, Nil, Select, Shape, StorageNode, TypeInfo, TypeList,
};

#[doc(hidden)]
pub mod __private {
    pub use union_core::{Cons, Nil};
    pub use union_macros::variadic_union;

    /// Fails to compile unless `T` has exactly one slot in `U`.
    #[inline(always)]
    pub const fn require_supported<U, T, I>()
    where
        U: crate::Supports<T, I>,
    {
    }
}
