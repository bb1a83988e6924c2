use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;

use union_core::{Build, Select};

use crate::variadic::VariadicUnion;

/// Exclusive access to a storage whose active member is a `T`.
///
/// Created by [`VariadicUnion::occupy`]. The value is destroyed when the
/// guard is dropped, unless it is moved out first.
pub struct Occupied<'a, L, T, P>
where
    L: Build,
    L::Node: Select<T, P>,
{
    /// The storage, with `T` active.
    storage: &'a mut VariadicUnion<L>,

    /// A marker field, indicating the active member and its path.
    current: PhantomData<(T, fn() -> P)>,
}

impl<'a, L, T, P> Occupied<'a, L, T, P>
where
    L: Build,
    L::Node: Select<T, P>,
{
    /// # Safety
    /// `T` must be the active member of `storage`.
    #[inline]
    pub(crate) unsafe fn new(storage: &'a mut VariadicUnion<L>) -> Self {
        Occupied {
            storage,
            current: PhantomData,
        }
    }

    /// Gives up the guard without destroying the value.
    #[inline]
    fn into_storage(self) -> &'a mut VariadicUnion<L> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never used again, nor dropped.
        unsafe { ptr::read(&this.storage) }
    }

    /// Moves the value out, leaving no member active.
    #[inline]
    pub fn vacate(self) -> T {
        let storage = self.into_storage();
        // SAFETY: the guard held a `T`, and gave it up.
        unsafe { storage.take::<T, P>() }
    }

    /// Replaces the value, returning the old one.
    #[inline]
    pub fn replace(&mut self, value: T) -> T {
        mem::replace(&mut **self, value)
    }

    /// Moves the value out, passes it to `f` and stores the result as the
    /// new active member.
    ///
    /// If `f` panics, the storage is left with no member active.
    pub fn map<U, Q>(self, f: impl FnOnce(T) -> U) -> Occupied<'a, L, U, Q>
    where
        L::Node: Select<U, Q>,
    {
        let storage = self.into_storage();
        // SAFETY: the guard held a `T`, and gave it up.
        let value = f(unsafe { storage.take::<T, P>() });
        storage.occupy::<U, Q>(value)
    }

    /// Gives up the guard, leaving `T` active for the rest of `'a`.
    ///
    /// The value will not be destroyed, unless the owner of the storage
    /// destroys it later on.
    #[inline]
    pub fn leak(self) -> &'a mut T {
        let storage = self.into_storage();
        // SAFETY: `T` is still active.
        unsafe { storage.reference_mut::<T, P>() }
    }
}

impl<L, T, P> Deref for Occupied<'_, L, T, P>
where
    L: Build,
    L::Node: Select<T, P>,
{
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        // SAFETY: a guard only exists while `T` is active.
        unsafe { self.storage.reference::<T, P>() }
    }
}

impl<L, T, P> DerefMut for Occupied<'_, L, T, P>
where
    L: Build,
    L::Node: Select<T, P>,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: a guard only exists while `T` is active.
        unsafe { self.storage.reference_mut::<T, P>() }
    }
}

impl<L, T, P> Drop for Occupied<'_, L, T, P>
where
    L: Build,
    L::Node: Select<T, P>,
{
    fn drop(&mut self) {
        // SAFETY: a guard only exists while `T` is active.
        unsafe {
            self.storage.destroy::<T, P>();
        }
    }
}

impl<L, T, P> fmt::Debug for Occupied<'_, L, T, P>
where
    L: Build,
    L::Node: Select<T, P>,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Occupied").field(&**self).finish()
    }
}
