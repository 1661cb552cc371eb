//! Running median of a numeric stream, kept across two heaps.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use crate::error::{HeapError, Result};
use crate::heap::BinaryHeap;
use crate::TotalOrder;

/// A number whose median can be tracked.
///
/// Values must be totally ordered (floats are compared with their IEEE 754 `totalOrder`, so
/// `-0.0 < 0.0` and NaNs sort to the ends) and convertible to `f64` for the midpoint of an
/// even-length stream. The conversion may lose precision for integers wider than 53 bits.
pub trait Numeric: Copy {
    /// Compares `self` with `other`.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Widens `self` to an `f64`.
    fn to_f64(self) -> f64;
}

macro_rules! numeric_ints {
    ($($t:ty)*) => {$(
        impl Numeric for $t {
            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! numeric_floats {
    ($($t:ty)*) => {$(
        impl Numeric for $t {
            #[inline]
            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

numeric_ints! { i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize }
numeric_floats! { f32 f64 }

/// The order [`Numeric::total_cmp`] defines.
struct NumericOrder<T>(PhantomData<fn(&T)>);

impl<T> NumericOrder<T> {
    fn new() -> Self {
        NumericOrder(PhantomData)
    }
}

impl<T> Clone for NumericOrder<T> {
    fn clone(&self) -> Self {
        NumericOrder::new()
    }
}

impl<T: Numeric> TotalOrder for NumericOrder<T> {
    type OrderedType = T;

    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        this.total_cmp(that)
    }
}

/// Tracks the median of every value added so far.
///
/// The smaller half of the stream sits in a max-heap and the larger half in a min-heap, so
/// the median is always at one or both of their tops. After every [`add_num`] the lower
/// half holds either as many values as the upper half or exactly one more, and no value in
/// it exceeds any value in the upper half.
///
/// ```
/// use ordstat::DualHeapMedian;
///
/// let mut median = DualHeapMedian::new();
/// median.add_num(5);
/// assert_eq!(median.find_median(), Ok(5.0));
/// median.add_num(2);
/// assert_eq!(median.find_median(), Ok(3.5));
/// median.add_num(8);
/// assert_eq!(median.find_median(), Ok(5.0));
/// ```
///
/// [`add_num`]: DualHeapMedian::add_num
pub struct DualHeapMedian<T = f64> {
    lower: BinaryHeap<T, NumericOrder<T>>,
    upper: BinaryHeap<T, NumericOrder<T>>,
}

impl<T: Numeric> DualHeapMedian<T> {
    /// Creates a tracker that has seen nothing.
    #[must_use]
    pub fn new() -> Self {
        DualHeapMedian {
            lower: BinaryHeap::new_max(NumericOrder::new()),
            upper: BinaryHeap::new_min(NumericOrder::new()),
        }
    }

    /// Adds `value` to the stream. O(log n).
    pub fn add_num(&mut self, value: T) {
        self.lower.insert(value);

        if let (Some(low), Some(high)) = (self.lower.peek(), self.upper.peek()) {
            if low.total_cmp(high).is_gt() {
                self.shift_up();
            }
        }

        if self.lower.len() > self.upper.len() + 1 {
            self.shift_up();
        } else if self.upper.len() > self.lower.len() {
            self.shift_down();
        }
    }

    /// Moves the top of the lower half into the upper half.
    fn shift_up(&mut self) {
        if let Some(value) = self.lower.pop() {
            self.upper.insert(value);
        }
    }

    /// Moves the top of the upper half into the lower half.
    fn shift_down(&mut self) {
        if let Some(value) = self.upper.pop() {
            self.lower.insert(value);
        }
    }

    /// The median of the values added so far. O(1).
    ///
    /// For an even number of values this is the midpoint of the two middle values, computed
    /// in `f64` without overflowing for any pair of finite values.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyStream`] if nothing has been added yet.
    pub fn find_median(&self) -> Result<f64> {
        let low = self.lower.peek().ok_or(HeapError::EmptyStream)?.to_f64();
        if self.lower.len() > self.upper.len() {
            return Ok(low);
        }
        let high = match self.upper.peek() {
            Some(high) => high.to_f64(),
            None => return Ok(low),
        };
        // the sum cannot overflow across a sign change, nor the difference within one sign
        if low.is_sign_negative() != high.is_sign_negative() {
            Ok((low + high) / 2.0)
        } else {
            Ok(low + (high - low) / 2.0)
        }
    }

    #[cfg(test)]
    fn holds_invariants(&self) -> bool {
        let sizes =
            self.lower.len() == self.upper.len() || self.lower.len() == self.upper.len() + 1;
        let split = match (self.lower.peek(), self.upper.peek()) {
            (Some(low), Some(high)) => low.total_cmp(high).is_le(),
            _ => true,
        };
        sizes && split && self.lower.holds_heap_property() && self.upper.holds_heap_property()
    }
}

impl<T> DualHeapMedian<T> {
    /// Number of values added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Whether nothing has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Forgets every value.
    pub fn clear(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }
}

impl<T: Numeric> Default for DualHeapMedian<T> {
    fn default() -> Self {
        DualHeapMedian::new()
    }
}

impl<T: Clone> Clone for DualHeapMedian<T> {
    fn clone(&self) -> Self {
        DualHeapMedian {
            lower: self.lower.clone(),
            upper: self.upper.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DualHeapMedian<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualHeapMedian")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish()
    }
}

impl<T: Numeric> Extend<T> for DualHeapMedian<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.add_num(value));
    }
}

impl<T: Numeric> FromIterator<T> for DualHeapMedian<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut median = DualHeapMedian::new();
        median.extend(iter);
        median
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sorted_median, test_rng};
    use alloc::vec::Vec;
    use proptest::prelude::*;
    use rand::Rng;

    #[test]
    fn test_running_median_of_three() {
        let mut median = DualHeapMedian::new();
        median.add_num(5);
        assert_eq!(median.find_median(), Ok(5.0));
        median.add_num(2);
        assert_eq!(median.find_median(), Ok(3.5));
        median.add_num(8);
        assert_eq!(median.find_median(), Ok(5.0));
        assert_eq!(median.len(), 3);
    }

    #[test]
    fn test_empty_stream_is_reported() {
        let mut median = DualHeapMedian::<i32>::new();
        assert!(median.is_empty());
        assert_eq!(median.find_median(), Err(HeapError::EmptyStream));

        median.add_num(1);
        median.clear();
        assert_eq!(median.find_median(), Err(HeapError::EmptyStream));
    }

    #[test]
    fn test_descending_stream_rebalances() {
        let mut median = DualHeapMedian::new();
        for (value, expected) in [(10, 10.0), (9, 9.5), (8, 9.0), (7, 8.5), (1, 8.0)] {
            median.add_num(value);
            assert!(median.holds_invariants());
            assert_eq!(median.find_median(), Ok(expected));
        }
    }

    #[test]
    fn test_floats() {
        let median: DualHeapMedian = [0.5, -1.25, 3.0, 2.0].into_iter().collect();
        assert_eq!(median.find_median(), Ok(1.25));

        let mut median = DualHeapMedian::<f32>::new();
        median.extend([-0.0, 0.0]);
        assert_eq!(median.find_median(), Ok(0.0));
    }

    #[test]
    fn test_wide_integers_do_not_overflow() {
        let mut median = DualHeapMedian::new();
        median.extend([i64::MAX, i64::MAX]);
        assert_eq!(median.find_median(), Ok(i64::MAX as f64));

        let mut median = DualHeapMedian::new();
        median.extend([u8::MAX, u8::MIN]);
        assert_eq!(median.find_median(), Ok(127.5));
    }

    #[test]
    fn test_extreme_floats_do_not_overflow() {
        let median: DualHeapMedian = [-f64::MAX, f64::MAX].into_iter().collect();
        assert_eq!(median.find_median(), Ok(0.0));

        let median: DualHeapMedian = [f64::MAX, f64::MAX].into_iter().collect();
        assert_eq!(median.find_median(), Ok(f64::MAX));

        let median: DualHeapMedian = [-f64::MAX, -f64::MAX].into_iter().collect();
        assert_eq!(median.find_median(), Ok(-f64::MAX));

        let median: DualHeapMedian = [-f64::MAX, 1.0, f64::MAX, 3.0].into_iter().collect();
        assert_eq!(median.find_median(), Ok(2.0));
    }

    #[test]
    fn test_random_stream_against_sorting() {
        let mut rng = test_rng();
        let mut median = DualHeapMedian::new();
        let mut seen = Vec::new();
        for _ in 0..500 {
            let value: i64 = rng.gen_range(-1_000..1_000);
            median.add_num(value);
            seen.push(value);
            assert!(median.holds_invariants());
            assert_eq!(median.find_median(), Ok(sorted_median(&seen)));
        }
    }

    proptest! {
        #[test]
        fn prop_median_matches_sorted_prefix(
            values in prop::collection::vec(-10_000i64..10_000, 1..150),
        ) {
            let mut median = DualHeapMedian::new();
            for (i, &value) in values.iter().enumerate() {
                median.add_num(value);
                prop_assert!(median.holds_invariants());
                prop_assert_eq!(median.find_median(), Ok(sorted_median(&values[..=i])));
            }
        }
    }
}
