use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;

use union_core::{Build, Contains, Inspect, LayoutError, Reflect, Select, Shape};

use crate::occupied::Occupied;

/// Storage for one value of any of the types in `L`, without a discriminant.
///
/// `L` is a list of distinct types, usually written through
/// [`variadic_union!`](crate::variadic_union), which also removes repeats.
/// The storage is as large and as aligned as its largest and most aligned
/// member, and starts out with every member uninitialized.
///
/// Methods that name a member take its type, then a path that should be left
/// as `_`. Naming a type that isn't a member fails to compile:
///
/// ```compile_fail
/// use variadic_union::variadic_union;
///
/// variadic_union! {
///     union Small { u8, u16 }
/// }
///
/// let mut small = Small::new();
/// small.construct::<u32, _>(1);
/// ```
///
/// The empty storage has no members at all, so every access is rejected:
///
/// ```compile_fail
/// use variadic_union::variadic_union;
///
/// variadic_union! {
///     union Nothing {}
/// }
///
/// let nothing = Nothing::new();
/// let _ = nothing.pointer::<(), _>();
/// ```
///
/// The storage never knows which member is alive. Dropping it drops nothing.
/// Keeping track of the active member, and destroying it, is up to the owner;
/// [`occupy`](VariadicUnion::occupy) does it with a guard.
pub struct VariadicUnion<L: Build> {
    cell: MaybeUninit<L::Node>,
}

impl<L: Build> VariadicUnion<L> {
    /// Number of distinct types the storage can hold.
    pub const ARITY: usize = L::LEN;

    /// Creates the storage, with every member uninitialized.
    #[inline]
    pub const fn new() -> Self {
        VariadicUnion {
            cell: MaybeUninit::uninit(),
        }
    }

    /// Returns `true` if `T` is one of the types the storage can hold.
    ///
    /// Use [`Supports`] instead to require it at compile time.
    #[inline]
    pub fn supports<T: ?Sized + 'static>() -> bool
    where
        L: Reflect,
    {
        L::contains::<T>()
    }

    /// Returns a pointer to the slot of `T`.
    ///
    /// The pointer is always valid to write a `T` to, but only valid to read
    /// from while `T` is the active member.
    #[inline]
    pub fn pointer<T, P>(&self) -> *const T
    where
        L::Node: Select<T, P>,
    {
        // SAFETY: `cell` is valid for reads of a node, initialized or not.
        unsafe { <L::Node as Select<T, P>>::project(self.cell.as_ptr()) }
    }

    /// Returns a mutable pointer to the slot of `T`.
    #[inline]
    pub fn pointer_mut<T, P>(&mut self) -> *mut T
    where
        L::Node: Select<T, P>,
    {
        // SAFETY: `cell` is valid for reads and writes of a node.
        unsafe { <L::Node as Select<T, P>>::project_mut(self.cell.as_mut_ptr()) }
    }

    /// Returns a reference to the active member.
    ///
    /// # Safety
    /// `T` must be the active member.
    ///
    /// ```compile_fail
    /// use variadic_union::variadic_union;
    ///
    /// variadic_union! {
    ///     union Small { u8, u16 }
    /// }
    ///
    /// let small = Small::new();
    /// let _ = unsafe { small.reference::<i64, _>() };
    /// ```
    #[inline]
    pub unsafe fn reference<T, P>(&self) -> &T
    where
        L::Node: Select<T, P>,
    {
        // SAFETY: the caller guarantees a `T` lives in the slot.
        unsafe { &*self.pointer::<T, P>() }
    }

    /// Returns a mutable reference to the active member.
    ///
    /// # Safety
    /// `T` must be the active member.
    #[inline]
    pub unsafe fn reference_mut<T, P>(&mut self) -> &mut T
    where
        L::Node: Select<T, P>,
    {
        // SAFETY: the caller guarantees a `T` lives in the slot.
        unsafe { &mut *self.pointer_mut::<T, P>() }
    }

    /// Consumes the storage and returns the active member.
    ///
    /// # Safety
    /// `T` must be the active member.
    #[inline]
    pub unsafe fn into_value<T, P>(self) -> T
    where
        L::Node: Select<T, P>,
    {
        // SAFETY: the caller guarantees a `T` lives in the slot, and `self`
        // has no drop glue to run on it afterwards.
        unsafe { ptr::read(self.pointer::<T, P>()) }
    }

    /// Writes `value` into the slot of `T`, making `T` the active member.
    ///
    /// If another member was active, it is overwritten without being dropped.
    /// Destroy it first if it owns anything.
    ///
    /// ```
    /// use variadic_union::variadic_union;
    ///
    /// variadic_union! {
    ///     union Storage { i32, String }
    /// }
    ///
    /// let mut storage = Storage::new();
    /// let text = storage.construct::<String, _>(String::from("hello"));
    /// text.push_str(", world!");
    ///
    /// assert_eq!(unsafe { storage.reference::<String, _>() }, "hello, world!");
    /// unsafe { storage.destroy::<String, _>() };
    /// ```
    #[inline]
    pub fn construct<T, P>(&mut self, value: T) -> &mut T
    where
        L::Node: Select<T, P>,
    {
        trace_member!("construct", T, L);

        let slot = self.pointer_mut::<T, P>();
        // SAFETY: the slot is valid for writes and aligned for `T`.
        unsafe {
            ptr::write(slot, value);
            &mut *slot
        }
    }

    /// Like [`construct`](VariadicUnion::construct), with the value built by
    /// `f`. If `f` panics, the storage is left untouched.
    #[inline]
    pub fn construct_with<T, P>(&mut self, f: impl FnOnce() -> T) -> &mut T
    where
        L::Node: Select<T, P>,
    {
        let value = f();
        self.construct::<T, P>(value)
    }

    /// Like [`construct_with`](VariadicUnion::construct_with), for a fallible
    /// `f`. Its error is returned as is, and the storage is left untouched.
    #[inline]
    pub fn try_construct_with<T, P, E>(
        &mut self,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, E>
    where
        L::Node: Select<T, P>,
    {
        let value = f()?;
        Ok(self.construct::<T, P>(value))
    }

    /// Drops the active member in place, leaving no member active.
    ///
    /// Returns the pointer to its slot, which now holds no value.
    ///
    /// # Safety
    /// `T` must be the active member.
    ///
    /// ```compile_fail
    /// use variadic_union::variadic_union;
    ///
    /// variadic_union! {
    ///     union Small { u8, String }
    /// }
    ///
    /// let mut small = Small::new();
    /// small.construct::<String, _>(String::new());
    /// unsafe { small.destroy::<Vec<u8>, _>() };
    /// ```
    #[inline]
    pub unsafe fn destroy<T, P>(&mut self) -> *mut T
    where
        L::Node: Select<T, P>,
    {
        trace_member!("destroy", T, L);

        let slot = self.pointer_mut::<T, P>();
        // SAFETY: the caller guarantees a `T` lives in the slot.
        unsafe { ptr::drop_in_place(slot) };
        slot
    }

    /// Moves the active member out, leaving no member active.
    ///
    /// # Safety
    /// `T` must be the active member.
    #[inline]
    pub unsafe fn take<T, P>(&mut self) -> T
    where
        L::Node: Select<T, P>,
    {
        trace_member!("take", T, L);

        // SAFETY: the caller guarantees a `T` lives in the slot.
        unsafe { ptr::read(self.pointer::<T, P>()) }
    }

    /// Constructs `value` and returns a guard that owns it.
    ///
    /// The guard gives safe access to the value and destroys it when
    /// dropped. Any member active before is overwritten, as with
    /// [`construct`](VariadicUnion::construct).
    ///
    /// ```
    /// use variadic_union::variadic_union;
    ///
    /// variadic_union! {
    ///     union Storage { u64, Vec<u8> }
    /// }
    ///
    /// let mut storage = Storage::new();
    ///
    /// let mut bytes = storage.occupy::<Vec<u8>, _>(vec![1, 2]);
    /// bytes.push(3);
    /// let len = bytes.map::<u64, _>(|bytes| bytes.len() as u64);
    ///
    /// assert_eq!(*len, 3);
    /// ```
    #[inline]
    pub fn occupy<T, P>(&mut self, value: T) -> Occupied<'_, L, T, P>
    where
        L::Node: Select<T, P>,
    {
        self.construct::<T, P>(value);
        // SAFETY: `T` was just constructed.
        unsafe { Occupied::new(self) }
    }

    /// Describes how the storage is laid out.
    pub fn shape() -> Shape
    where
        L::Node: Inspect,
    {
        <L::Node as Inspect>::shape()
    }

    /// Describes how the storage is laid out, after checking that every type
    /// has exactly one slot and that the tree is balanced.
    pub fn audit() -> Result<Shape, LayoutError>
    where
        L: Reflect,
        L::Node: Inspect,
    {
        union_core::audit::<L>()
    }
}

impl<L: Build> Default for VariadicUnion<L> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Build> fmt::Debug for VariadicUnion<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VariadicUnion")
            .field("arity", &L::LEN)
            .finish_non_exhaustive()
    }
}

/// `T` is one of the types of the storage.
///
/// `I` is its position in the list and is meant to be inferred.
///
/// ```
/// use variadic_union::{variadic_union, Supports};
///
/// variadic_union! {
///     union Storage { u8, char }
/// }
///
/// fn assert_supports<U: Supports<T, I>, T, I>() {}
///
/// assert_supports::<Storage, char, _>();
/// ```
pub trait Supports<T, I> {
    /// Position of `T` among the types of the storage.
    const INDEX: usize;
}

impl<L, T, I> Supports<T, I> for VariadicUnion<L>
where
    L: Build + Contains<T, I>,
{
    const INDEX: usize = <L as Contains<T, I>>::INDEX;
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::mem::{align_of, size_of};
    use std::rc::Rc;

    use super::*;

    /// Counts how many times it was dropped.
    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn index_of<U: Supports<T, I>, T, I>() -> usize {
        U::INDEX
    }

    variadic_union! {
        union Flat { i32, bool, String }

        union Numbers { i32, f64, i32, bool }

        union Seven { u8, String, u32, Vec<u8>, i8, char, bool }

        union WithTracked { u8, Tracked }

        union Empty {}

        #[cfg(any())]
        union Gone { u8, u16 }

        union Slot<T> { T, u8 }

        union Wide {
            u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
            (), String, [u8; 1], [u8; 2], [u8; 3], [u8; 4], [u8; 5], [u8; 6], [u8; 7], [u8; 8],
            [u8; 9], [u8; 10], [u8; 11], [u8; 12], [u8; 13], [u8; 14]
        }
    }

    #[test]
    fn test_flat_round_trip() {
        let mut storage = Flat::new();

        assert_eq!(*storage.construct::<i32, _>(42), 42);
        assert_eq!(unsafe { *storage.reference::<i32, _>() }, 42);
        unsafe { storage.destroy::<i32, _>() };

        storage.construct::<String, _>(String::from("hi"));
        assert_eq!(unsafe { storage.reference::<String, _>() }, "hi");
        unsafe { storage.destroy::<String, _>() };
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(Numbers::ARITY, 3);
        assert!(Numbers::supports::<i32>());
        assert!(Numbers::supports::<f64>());
        assert!(Numbers::supports::<bool>());
        assert!(!Numbers::supports::<u8>());

        assert_eq!(index_of::<Numbers, i32, _>(), 0);
        assert_eq!(index_of::<Numbers, bool, _>(), 2);
    }

    #[test]
    fn test_reconstruct_with_new_value() {
        let mut storage = Flat::new();

        storage.construct::<String, _>(String::from("first"));
        unsafe { storage.destroy::<String, _>() };
        storage.construct::<String, _>(String::from("second"));

        assert_eq!(unsafe { storage.take::<String, _>() }, "second");
    }

    #[test]
    fn test_repeated_reads_agree() {
        let mut storage = Flat::new();
        storage.construct::<String, _>(String::from("stable"));

        let first = unsafe { storage.reference::<String, _>() }.clone();
        let second = unsafe { storage.reference::<String, _>() }.clone();
        assert_eq!(first, second);
        assert_eq!(unsafe { storage.reference::<String, _>() }, "stable");

        unsafe { storage.destroy::<String, _>() };
    }

    #[test]
    fn test_qualifiers() {
        let mut storage = Flat::new();
        storage.construct::<String, _>(String::from("owned"));

        {
            let shared: &String = unsafe { storage.reference::<String, _>() };
            assert_eq!(shared, "owned");
            let pointer: *const String = storage.pointer::<String, _>();
            assert_eq!(pointer, shared as *const String);
        }
        {
            let exclusive: &mut String = unsafe { storage.reference_mut::<String, _>() };
            exclusive.push('!');
            let pointer: *mut String = storage.pointer_mut::<String, _>();
            assert_eq!(unsafe { &*pointer }, "owned!");
        }

        let value: String = unsafe { storage.into_value::<String, _>() };
        assert_eq!(value, "owned!");
    }

    #[test]
    fn test_members_do_not_corrupt_each_other() {
        let mut storage = Flat::new();

        storage.construct::<String, _>(String::from("a long enough string"));
        unsafe { storage.destroy::<String, _>() };

        storage.construct::<bool, _>(true);
        assert!(unsafe { *storage.reference::<bool, _>() });

        storage.construct::<i32, _>(-7);
        assert_eq!(unsafe { *storage.reference::<i32, _>() }, -7);
    }

    #[test]
    fn test_split_layout() {
        let shape = Seven::audit().unwrap();

        let Shape::Split { left, pivot, right } = &shape else {
            panic!("expected a split, got {shape}");
        };

        let left: Vec<_> = left.members().iter().map(|info| info.name()).collect();
        let right: Vec<_> = right.members().iter().map(|info| info.name()).collect();

        assert_eq!(left, ["u8", "alloc::string::String", "u32"]);
        assert_eq!(pivot.name(), "alloc::vec::Vec<u8>");
        assert_eq!(right, ["i8", "char", "bool"]);
        assert!(left.iter().all(|name| !right.contains(name)));
    }

    #[test]
    fn test_split_round_trips_every_member() {
        let mut storage = Seven::new();

        storage.construct::<u8, _>(1);
        assert_eq!(unsafe { storage.take::<u8, _>() }, 1);

        storage.construct::<String, _>(String::from("two"));
        assert_eq!(unsafe { storage.take::<String, _>() }, "two");

        storage.construct::<u32, _>(3);
        assert_eq!(unsafe { storage.take::<u32, _>() }, 3);

        storage.construct::<Vec<u8>, _>(vec![4]);
        assert_eq!(unsafe { storage.take::<Vec<u8>, _>() }, [4u8]);

        storage.construct::<i8, _>(-5);
        assert_eq!(unsafe { storage.take::<i8, _>() }, -5);

        storage.construct::<char, _>('6');
        assert_eq!(unsafe { storage.take::<char, _>() }, '6');

        storage.construct::<bool, _>(true);
        assert!(unsafe { storage.take::<bool, _>() });
    }

    #[test]
    fn test_destroy_drops_once() {
        let drops = Rc::new(Cell::new(0));
        let mut storage = WithTracked::new();

        storage.construct::<Tracked, _>(Tracked(drops.clone()));
        assert_eq!(drops.get(), 0);

        let slot = unsafe { storage.destroy::<Tracked, _>() };
        assert_eq!(drops.get(), 1);
        assert_eq!(slot as *const Tracked, storage.pointer::<Tracked, _>());
    }

    #[test]
    fn test_nothing_is_dropped_implicitly() {
        let drops = Rc::new(Cell::new(0));

        let mut storage = WithTracked::new();
        storage.construct::<Tracked, _>(Tracked(drops.clone()));
        storage.construct::<u8, _>(0);
        assert_eq!(drops.get(), 0);

        let mut storage = WithTracked::new();
        storage.construct::<Tracked, _>(Tracked(drops.clone()));
        drop(storage);
        assert_eq!(drops.get(), 0);
    }

    #[test]
    fn test_failed_construction_leaves_storage_alone() {
        let mut storage = Flat::new();
        storage.construct::<i32, _>(7);

        let result = storage.try_construct_with::<String, _, _>(|| Err("nope"));
        assert_eq!(result, Err("nope"));
        assert_eq!(unsafe { *storage.reference::<i32, _>() }, 7);

        let text = storage.construct_with::<String, _>(|| "built".to_owned());
        assert_eq!(text, "built");
        unsafe { storage.destroy::<String, _>() };
    }

    #[test]
    fn test_wide_union() {
        assert_eq!(Wide::ARITY, 32);
        assert_eq!(Wide::shape().depth(), 3);

        let mut storage = Wide::new();
        storage.construct::<[u8; 14], _>([9; 14]);
        assert_eq!(unsafe { *storage.reference::<[u8; 14], _>() }, [9; 14]);

        storage.construct::<u128, _>(u128::MAX);
        assert_eq!(unsafe { *storage.reference::<u128, _>() }, u128::MAX);
    }

    fn round_trip<T>(value: T) -> T {
        let mut slot = Slot::<T>::new();
        slot.construct::<T, _>(value);
        unsafe { slot.take::<T, _>() }
    }

    #[test]
    fn test_generic_declaration() {
        assert_eq!(Slot::<String>::ARITY, 2);
        assert!(Slot::<String>::supports::<String>());
        assert!(!Slot::<String>::supports::<u16>());

        let mut slot = Slot::<String>::new();
        slot.construct::<String, _>(String::from("generic"));
        assert_eq!(unsafe { slot.reference::<String, _>() }, "generic");
        unsafe { slot.destroy::<String, _>() };

        slot.construct::<u8, _>(3);
        assert_eq!(unsafe { *slot.reference::<u8, _>() }, 3);

        assert_eq!(round_trip(vec![1u8, 2]), [1u8, 2]);
        assert_eq!(round_trip('x'), 'x');
    }

    #[test]
    fn test_empty() {
        assert_eq!(Empty::ARITY, 0);
        assert_eq!(size_of::<Empty>(), 0);
        assert!(!Empty::supports::<u8>());
        assert_eq!(Empty::audit(), Ok(Shape::Empty));
    }

    #[test]
    fn test_size_and_alignment() {
        assert_eq!(size_of::<Flat>(), size_of::<String>());
        assert_eq!(align_of::<Flat>(), align_of::<String>());

        #[allow(dead_code)]
        union Widest {
            text: std::mem::ManuallyDrop<String>,
            wide: u128,
            bytes: [u8; 14],
        }

        assert_eq!(size_of::<Wide>(), size_of::<Widest>());
        assert_eq!(align_of::<Wide>(), align_of::<Widest>());
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Numbers::new()), "VariadicUnion { arity: 3, .. }");
    }
}
