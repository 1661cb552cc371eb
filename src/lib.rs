//! Binary heaps that are ordered by a supplied [`TotalOrder`] rather than the [`Ord`] trait,
//! together with the order-statistics structures that are built on top of them:
//!
//! * [`BoundedTopK`] keeps the best `K` items of a stream;
//! * [`KWayMerge`] lazily merges any number of individually sorted sources; and
//! * [`DualHeapMedian`] tracks the running median of a numeric stream.
//!
//! Every structure owns its backing storage outright and hands items out by value or
//! through shared borrows only, so none of them can be left with a broken heap invariant
//! by a caller.
//!
//! ```
//! use ordstat::{BinaryHeap, OrdTotalOrder};
//!
//! let mut heap = BinaryHeap::new_min(OrdTotalOrder::default());
//! for x in [5, 3, 8, 1] {
//!     heap.insert(x);
//! }
//!
//! assert_eq!(heap.extract_top(), Ok(1));
//! assert_eq!(heap.extract_top(), Ok(3));
//! assert_eq!(heap.extract_top(), Ok(5));
//! assert_eq!(heap.extract_top(), Ok(8));
//! assert!(heap.extract_top().is_err());
//! ```
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(feature = "exact_size_is_empty", feature(exact_size_is_empty))]
#![cfg_attr(feature = "trusted_len", feature(trusted_len))]
// documentation controls
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![warn(missing_docs)]

extern crate alloc;

use core::cmp::Ordering;

pub mod default;
pub mod error;
pub mod heap;
pub mod median;
pub mod merge;
pub mod order;
pub mod top_k;

#[cfg(test)]
mod testing;

pub use default::OrdTotalOrder;
pub use error::{HeapError, Result};
pub use heap::BinaryHeap;
pub use median::{DualHeapMedian, Numeric};
pub use merge::KWayMerge;
pub use order::FnTotalOrder;
pub use top_k::{BoundedTopK, Keep};

/// A total order over values of [`Self::OrderedType`].
///
/// Implementations must be consistent: `cmp` must be antisymmetric and transitive, and
/// must not change its verdict on any pair of items while those items are held by one of
/// this crate's collections.  Violating this is a logic error; the behaviour that results
/// is not specified but is confined to the collection that observed it (it may yield items
/// out of order, but will never cause undefined behaviour or lose items).
///
/// Only [`cmp`] is required.  The remaining methods have default implementations in terms
/// of it and exist so that orders with cheaper predicates can override them.
///
/// [`cmp`]: TotalOrder::cmp
pub trait TotalOrder {
    /// The type that this order compares.
    type OrderedType: ?Sized;

    /// Compares `this` with `that`.
    fn cmp(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> Ordering;

    /// Tests whether `this` and `that` are equal under this order.
    #[inline]
    fn eq(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> bool {
        self.cmp(this, that).is_eq()
    }
    /// Tests whether `this` and `that` differ under this order.
    #[inline]
    fn ne(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> bool {
        self.cmp(this, that).is_ne()
    }

    /// Tests whether `this` is ordered at or after `that`.
    #[inline]
    fn ge(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> bool {
        self.cmp(this, that).is_ge()
    }
    /// Tests whether `this` is ordered strictly after `that`.
    #[inline]
    fn gt(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> bool {
        self.cmp(this, that).is_gt()
    }
    /// Tests whether `this` is ordered at or before `that`.
    #[inline]
    fn le(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> bool {
        self.cmp(this, that).is_le()
    }
    /// Tests whether `this` is ordered strictly before `that`.
    #[inline]
    fn lt(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> bool {
        self.cmp(this, that).is_lt()
    }
}

impl<O: ?Sized + TotalOrder> TotalOrder for &O {
    type OrderedType = O::OrderedType;

    #[inline]
    fn cmp(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> Ordering {
        (**self).cmp(this, that)
    }
}

/// Which end of a [`TotalOrder`] a heap keeps at its top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// The greatest item is on top; draining yields descending order.
    #[default]
    Max,
    /// The least item is on top; draining yields ascending order.
    Min,
}

impl Orientation {
    /// Re-expresses `ordering` (of some `this` relative to some `that`) so that
    /// [`Ordering::Greater`] always means "`this` belongs nearer the top".
    #[inline]
    #[must_use]
    pub fn rank(self, ordering: Ordering) -> Ordering {
        match self {
            Orientation::Max => ordering,
            Orientation::Min => ordering.reverse(),
        }
    }

    /// The opposite orientation.
    #[inline]
    #[must_use]
    pub fn flip(self) -> Orientation {
        match self {
            Orientation::Max => Orientation::Min,
            Orientation::Min => Orientation::Max,
        }
    }
}
