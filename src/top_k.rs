//! Bounded selection of the best `K` items of a stream.

use alloc::vec::Vec;

use crate::error::{HeapError, Result};
use crate::heap::BinaryHeap;
use crate::{OrdTotalOrder, Orientation, TotalOrder};

/// Which end of the order a [`BoundedTopK`] retains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Keep {
    /// Retain the `K` greatest items.
    #[default]
    Largest,
    /// Retain the `K` least items.
    Smallest,
}

impl Keep {
    /// Orientation of a heap whose top is the *worst* retained item, i.e. the first one
    /// to be evicted.
    fn eviction_orientation(self) -> Orientation {
        match self {
            Keep::Largest => Orientation::Min,
            Keep::Smallest => Orientation::Max,
        }
    }
}

/// Keeps the best `K` items offered so far, using *O*(`K`) memory however many items
/// are offered.
///
/// Internally this is a heap of at most `K` items whose top is the worst of them. Once
/// full, that top is the admission threshold: a new item gets in only if it is strictly
/// better, in which case it takes the threshold's place.
///
/// ```
/// use ordstat::BoundedTopK;
///
/// let mut top = BoundedTopK::largest(2);
/// for x in [4, 1, 7, 2, 9, 3] {
///     top.offer(x);
/// }
///
/// assert_eq!(top.seen(), 6);
/// assert_eq!(top.threshold(), Some(&7));
/// assert_eq!(top.drain_sorted(), [9, 7]);
/// assert!(top.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct BoundedTopK<T, O = OrdTotalOrder<T>> {
    heap: BinaryHeap<T, O>,
    capacity: usize,
    keep: Keep,
    seen: u64,
}

impl<T: Ord> BoundedTopK<T> {
    /// Keeps the `capacity` greatest items under `T`'s [`Ord`] implementation.
    pub fn largest(capacity: usize) -> Self {
        BoundedTopK::new(capacity, OrdTotalOrder::default(), Keep::Largest)
    }

    /// Keeps the `capacity` least items under `T`'s [`Ord`] implementation.
    pub fn smallest(capacity: usize) -> Self {
        BoundedTopK::new(capacity, OrdTotalOrder::default(), Keep::Smallest)
    }
}

impl<T, O: TotalOrder<OrderedType = T>> BoundedTopK<T, O> {
    /// Creates an empty selector retaining at most `capacity` items.
    ///
    /// A capacity of zero is allowed; such a selector retains nothing.
    pub fn new(capacity: usize, order: O, keep: Keep) -> Self {
        log::debug!("bounded top-k: keeping {keep:?} {capacity}");
        // the heap holds `capacity` items at most, so allocate once up front, but don't let
        // a huge capacity on a short stream reserve memory it will never use
        let reserve = capacity.min(1024);
        BoundedTopK {
            heap: BinaryHeap::with_capacity(order, keep.eviction_orientation(), reserve),
            capacity,
            keep,
            seen: 0,
        }
    }

    /// Creates an empty selector from a capacity of any integer type.
    ///
    /// # Errors
    ///
    /// [`HeapError::CapacityMisuse`] if `capacity` is negative or does not fit in a
    /// `usize`.
    ///
    /// ```
    /// use ordstat::{BoundedTopK, HeapError, Keep, OrdTotalOrder};
    ///
    /// let top = BoundedTopK::<u8>::try_new(-3i64, OrdTotalOrder::default(), Keep::Largest);
    /// assert_eq!(top.unwrap_err(), HeapError::CapacityMisuse);
    /// ```
    pub fn try_new<K: TryInto<usize>>(capacity: K, order: O, keep: Keep) -> Result<Self> {
        let capacity = capacity.try_into().map_err(|_| HeapError::CapacityMisuse)?;
        Ok(BoundedTopK::new(capacity, order, keep))
    }

    /// Offers `item` for selection, returning whether it was retained.
    ///
    /// Below capacity every item is retained. At capacity the item is retained only if it
    /// is strictly better than the current threshold, which it then evicts; otherwise it
    /// is dropped and nothing but [`seen`](Self::seen) changes.
    ///
    /// # Time complexity
    ///
    /// *O*(log(`K`)).
    pub fn offer(&mut self, item: T) -> bool {
        self.seen += 1;

        if self.heap.len() < self.capacity {
            self.heap.insert(item);
            return true;
        }

        let admit = match self.heap.peek() {
            Some(threshold) => self.beats(&item, threshold),
            // only reachable with a capacity of zero
            None => false,
        };
        if admit {
            self.heap.replace_top(item);
        }
        admit
    }

    fn beats(&self, item: &T, threshold: &T) -> bool {
        let order = self.heap.order();
        match self.keep {
            Keep::Largest => order.gt(item, threshold),
            Keep::Smallest => order.lt(item, threshold),
        }
    }

    /// The admission threshold: the `K`-th best item, available once `K` items are held.
    #[must_use]
    pub fn threshold(&self) -> Option<&T> {
        if self.is_full() {
            self.heap.peek()
        } else {
            None
        }
    }

    /// Removes every retained item and returns them best first.
    ///
    /// The selector is left empty but keeps its capacity, order and [`seen`] count.
    ///
    /// [`seen`]: Self::seen
    pub fn drain_sorted(&mut self) -> Vec<T> {
        // the heap yields worst first
        let mut items: Vec<T> = self.heap.drain_sorted().collect();
        items.reverse();
        items
    }

    /// Consumes the selector, returning the retained items best first.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_sorted_vec(self) -> Vec<T> {
        // sorting in place puts the top, the worst item, last
        self.heap.into_sorted_vec()
    }
}

impl<T, O> BoundedTopK<T, O> {
    /// Copies out the retained items in arbitrary order, leaving the selector untouched.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.heap.as_slice().to_vec()
    }

    /// Iterates the retained items in arbitrary order.
    pub fn iter(&self) -> crate::heap::Iter<'_, T> {
        self.heap.iter()
    }

    /// Number of items currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `K` items are retained, so that further offers must beat the threshold.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// `K`.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many items have been offered, retained or not.
    #[must_use]
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Which end of the order is retained.
    #[must_use]
    pub fn keep(&self) -> Keep {
        self.keep
    }

    /// Forgets every retained item and resets the [`seen`](Self::seen) count.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seen = 0;
    }
}

impl<T, O: TotalOrder<OrderedType = T>> Extend<T> for BoundedTopK<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.offer(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order;
    use crate::testing::test_rng;
    use proptest::prelude::*;
    use rand::Rng;
    use rstest::rstest;

    #[test]
    fn test_keeps_two_largest() {
        let mut top = BoundedTopK::largest(2);
        top.extend([4, 1, 7, 2, 9, 3]);

        let mut kept = top.snapshot();
        kept.sort();
        assert_eq!(kept, [7, 9]);
        assert_eq!(top.len(), 2);
        assert_eq!(top.seen(), 6);
    }

    #[test]
    fn test_offer_reports_admission() {
        let mut top = BoundedTopK::largest(2);
        assert!(top.offer(5));
        assert!(top.offer(1));
        assert!(!top.offer(0));
        // ties with the threshold are not admitted
        assert!(!top.offer(1));
        assert!(top.offer(3));
        assert_eq!(top.threshold(), Some(&3));
    }

    #[rstest]
    #[case::zero(0, &[], &[])]
    #[case::fewer_than_k(5, &[3, 1, 2], &[3, 2, 1])]
    #[case::exactly_k(3, &[3, 1, 2], &[3, 2, 1])]
    #[case::duplicates(3, &[5, 5, 1, 5, 5], &[5, 5, 5])]
    #[case::descending_input(2, &[9, 8, 7, 6], &[9, 8])]
    #[case::ascending_input(2, &[6, 7, 8, 9], &[9, 8])]
    fn test_largest(#[case] k: usize, #[case] input: &[i32], #[case] expected: &[i32]) {
        let mut top = BoundedTopK::largest(k);
        top.extend(input.iter().copied());
        assert_eq!(top.drain_sorted(), expected);
    }

    #[rstest]
    #[case::zero(0, &[4, 2], &[])]
    #[case::fewer_than_k(4, &[8, 3], &[3, 8])]
    #[case::mixed(3, &[4, 1, 7, 2, 9, 3], &[1, 2, 3])]
    fn test_smallest(#[case] k: usize, #[case] input: &[i32], #[case] expected: &[i32]) {
        let mut top = BoundedTopK::smallest(k);
        top.extend(input.iter().copied());
        assert_eq!(top.into_sorted_vec(), expected);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut top = BoundedTopK::largest(0);
        assert!(top.is_full());
        assert!(!top.offer(1));
        assert_eq!(top.threshold(), None);
        assert!(top.snapshot().is_empty());
        assert_eq!(top.seen(), 1);
    }

    #[rstest]
    #[case(-1i64)]
    #[case(i64::MIN)]
    fn test_negative_capacity_is_rejected(#[case] k: i64) {
        let top = BoundedTopK::<i32>::try_new(k, OrdTotalOrder::default(), Keep::Largest);
        assert_eq!(top.unwrap_err(), HeapError::CapacityMisuse);
    }

    #[test]
    fn test_try_new_accepts_non_negative() {
        let top = BoundedTopK::<i32>::try_new(3i32, OrdTotalOrder::default(), Keep::Smallest)
            .unwrap();
        assert_eq!(top.capacity(), 3);
        assert_eq!(top.keep(), Keep::Smallest);
    }

    #[test]
    fn test_custom_order_by_score() {
        let by_score = order::from_fn(|a: &(&str, u32), b: &(&str, u32)| a.1.cmp(&b.1));
        let mut top = BoundedTopK::new(2, by_score, Keep::Largest);
        top.extend([("a", 10), ("b", 40), ("c", 20), ("d", 30)]);
        let names: Vec<_> = top.into_sorted_vec().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "d"]);
    }

    #[test]
    fn test_iter_visits_retained_items() {
        let mut top = BoundedTopK::smallest(3);
        top.extend([6, 2, 8, 4, 1]);

        let mut kept: Vec<_> = top.iter().copied().collect();
        kept.sort();
        assert_eq!(kept, [1, 2, 4]);
        assert_eq!(top.iter().len(), top.len());
    }

    #[test]
    fn test_clear_resets() {
        let mut top = BoundedTopK::smallest(2);
        top.extend([3, 1, 2]);
        top.clear();
        assert!(top.is_empty());
        assert_eq!(top.seen(), 0);
        assert!(top.offer(10));
    }

    #[test]
    fn test_random_stream_against_sort() {
        let mut rng = test_rng();
        let stream: Vec<u32> = (0..5_000).map(|_| rng.gen_range(0..1_000)).collect();
        let mut top = BoundedTopK::largest(25);
        top.extend(stream.iter().copied());

        let mut expected = stream.clone();
        expected.sort_by(|a, b| b.cmp(a));
        expected.truncate(25);
        assert_eq!(top.into_sorted_vec(), expected);
    }

    proptest! {
        #[test]
        fn prop_largest_matches_sorted_prefix(
            values in prop::collection::vec(any::<i16>(), 0..300),
            k in 0usize..40,
        ) {
            let mut top = BoundedTopK::largest(k);
            top.extend(values.iter().copied());

            let mut expected = values.clone();
            expected.sort_by(|a, b| b.cmp(a));
            expected.truncate(k);
            prop_assert_eq!(top.drain_sorted(), expected);
        }

        #[test]
        fn prop_smallest_matches_sorted_prefix(
            values in prop::collection::vec(any::<i16>(), 0..300),
            k in 0usize..40,
        ) {
            let mut top = BoundedTopK::smallest(k);
            top.extend(values.iter().copied());

            let mut expected = values.clone();
            expected.sort();
            expected.truncate(k);
            prop_assert_eq!(top.into_sorted_vec(), expected);
        }
    }
}
