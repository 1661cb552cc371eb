//! Adapters for building a [`TotalOrder`] out of closures or other orders.

use crate::TotalOrder;
use core::{cmp::Ordering, fmt, marker::PhantomData};

/// A total order backed by a comparison closure.
///
/// ```
/// use ordstat::{order, BinaryHeap};
///
/// // Order strings by length only.
/// let by_len = order::from_fn(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// let mut heap = BinaryHeap::new_max(by_len);
/// heap.build(["kiwi", "fig", "banana"]);
///
/// assert_eq!(heap.peek(), Some(&"banana"));
/// ```
pub struct FnTotalOrder<F, T: ?Sized> {
    compare: F,
    _marker: PhantomData<fn(&T)>,
}

/// Wraps `compare` in a [`FnTotalOrder`].
pub fn from_fn<T, F>(compare: F) -> FnTotalOrder<F, T>
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    FnTotalOrder { compare, _marker: PhantomData }
}

impl<F: Clone, T: ?Sized> Clone for FnTotalOrder<F, T> {
    fn clone(&self) -> Self {
        FnTotalOrder { compare: self.compare.clone(), _marker: PhantomData }
    }
}

impl<F, T: ?Sized> fmt::Debug for FnTotalOrder<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnTotalOrder")
    }
}

impl<F, T> TotalOrder for FnTotalOrder<F, T>
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    type OrderedType = T;

    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        (self.compare)(this, that)
    }
}

/// Flips the order it wraps.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reversed<O>(pub O);

impl<O: TotalOrder> TotalOrder for Reversed<O> {
    type OrderedType = O::OrderedType;

    #[inline]
    fn cmp(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> Ordering {
        self.0.cmp(that, this)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrdTotalOrder;

    #[test]
    fn closure_order_is_used_verbatim() {
        let by_abs = from_fn(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
        assert_eq!(by_abs.cmp(&-7, &3), Ordering::Greater);
        assert!(by_abs.eq(&-2, &2));
        assert!(by_abs.lt(&1, &-5));
    }

    #[test]
    fn reversed_flips_every_predicate() {
        let rev = Reversed(OrdTotalOrder::<i32>::default());
        assert_eq!(rev.cmp(&1, &2), Ordering::Greater);
        assert!(rev.gt(&1, &2));
        assert!(rev.le(&2, &1));
        assert!(rev.eq(&4, &4));
    }
}
