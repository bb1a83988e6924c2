/// Declares one or more [`VariadicUnion`](crate::VariadicUnion) aliases.
///
/// Each declaration lists the types the storage can hold. A type listed more
/// than once gets a single slot, at the position it was first listed.
///
/// ```
/// use variadic_union::variadic_union;
///
/// variadic_union! {
///     /// Storage for a small set of numbers.
///     pub union Number { i32, f64, i32, bool }
///
///     union Nothing {}
/// }
///
/// assert_eq!(Number::ARITY, 3);
/// assert!(Number::supports::<i32>());
/// assert!(!Number::supports::<u8>());
/// assert_eq!(Nothing::ARITY, 0);
/// ```
///
/// Declarations can be generic. Type aliases don't enforce bounds, so any
/// bounds given here only apply to the check the declaration expands to:
///
/// ```
/// use variadic_union::variadic_union;
///
/// variadic_union! {
///     pub union Slot<T> where T: Clone { T, u8 }
/// }
///
/// fn duplicate<T: Clone>(value: T) -> (T, T) {
///     let mut slot = Slot::<T>::new();
///     let copy = slot.construct::<T, _>(value).clone();
///     (copy, unsafe { slot.take::<T, _>() })
/// }
///
/// assert_eq!(duplicate(String::from("twin")), ("twin".to_owned(), "twin".to_owned()));
/// ```
///
/// Repeats are recognized by how they are spelled. Two spellings of the same
/// type both get a slot, and the declaration is rejected. Likewise, `Slot<u8>`
/// above lists `u8` twice, and none of its members can be accessed:
///
/// ```compile_fail
/// use variadic_union::variadic_union;
///
/// variadic_union! {
///     union Text { String, std::string::String }
/// }
/// ```
///
/// ```compile_fail
/// use variadic_union::variadic_union;
///
/// variadic_union! {
///     union Slot<T> { T, u8 }
/// }
///
/// let mut slot = Slot::<u8>::new();
/// slot.construct::<u8, _>(1);
/// ```
#[macro_export]
macro_rules! variadic_union {
    ($($input:tt)*) => {
        $crate::__private::variadic_union! { $crate; $($input)* }
    };
}

/// Emits a trace event naming the member `$T` of the list `$L`.
macro_rules! trace_member {
    ($op:literal, $T:ty, $L:ty) => {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            member = ::std::any::type_name::<$T>(),
            arity = <$L as ::union_core::TypeList>::LEN,
            $op
        );
    };
}
