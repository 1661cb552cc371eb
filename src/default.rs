//! The default order, which makes this crate's collections compare items exactly as the
//! standard library's would, namely through the [`Ord`] trait.

use crate::TotalOrder;
use core::{cmp::Ordering, fmt, marker::PhantomData};

/// A zero-sized total order that delegates to the [`Ord`] implementation
/// of its type parameter `T`.
pub struct OrdTotalOrder<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> Default for OrdTotalOrder<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Clone for OrdTotalOrder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for OrdTotalOrder<T> {}

impl<T: ?Sized> fmt::Debug for OrdTotalOrder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrdTotalOrder")
    }
}

impl<T: ?Sized + Ord> TotalOrder for OrdTotalOrder<T> {
    type OrderedType = T;

    // Delegate to `T`'s implementation of [`Ord`].
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        this.cmp(that)
    }

    // The predicates below go through `T`'s [`PartialEq`] and [`PartialOrd`] rather than
    // through `cmp`, matching the standard library's collections for types whose
    // `PartialOrd` and `Ord` implementations disagree.

    fn eq(&self, this: &T, that: &T) -> bool {
        this == that
    }
    fn ne(&self, this: &T, that: &T) -> bool {
        this != that
    }

    fn ge(&self, this: &T, that: &T) -> bool {
        this >= that
    }
    fn gt(&self, this: &T, that: &T) -> bool {
        this > that
    }
    fn le(&self, this: &T, that: &T) -> bool {
        this <= that
    }
    fn lt(&self, this: &T, that: &T) -> bool {
        this < that
    }
}
