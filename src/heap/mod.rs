//! A priority queue implemented with a binary heap.
//!
//! Insertion and extracting the top item have *O*(log(*n*)) time complexity. Checking the
//! top item is *O*(1). Building a heap from an arbitrary sequence is done in-place with the
//! bottom-up method, and has *O*(*n*) complexity. A heap can also be converted to a sorted
//! vector in-place, allowing it to be used for an *O*(*n* \* log(*n*)) in-place heapsort.
//!
//! Unlike [`std::collections::BinaryHeap`], the order is not taken from an [`Ord`]
//! implementation on the items but from a [`TotalOrder`] supplied at construction, and
//! whether the top is the greatest or the least item is chosen by an [`Orientation`].
//!
//! # Examples
//!
//! ```
//! use ordstat::{order, BinaryHeap};
//!
//! #[derive(Debug, PartialEq)]
//! struct Task {
//!     name: &'static str,
//!     deadline: u32,
//! }
//!
//! // Earliest deadline first.
//! let mut queue = BinaryHeap::new_min(order::from_fn(|a: &Task, b: &Task| {
//!     a.deadline.cmp(&b.deadline)
//! }));
//!
//! queue.insert(Task { name: "report", deadline: 30 });
//! queue.insert(Task { name: "invoice", deadline: 7 });
//! queue.insert(Task { name: "backup", deadline: 12 });
//!
//! let names: Vec<_> = queue.drain_sorted().map(|t| t.name).collect();
//! assert_eq!(names, ["invoice", "backup", "report"]);
//! assert!(queue.is_empty());
//! ```
//!
//! [`std::collections::BinaryHeap`]: https://doc.rust-lang.org/std/collections/struct.BinaryHeap.html

use core::cmp::Ordering;
use core::fmt;
#[cfg(feature = "trusted_len")]
use core::iter::TrustedLen;
use core::iter::{FromIterator, FusedIterator};
use core::mem::{self, swap, ManuallyDrop};
use core::ptr;

use alloc::slice;
use alloc::vec::{self, Vec};

use crate::error::{HeapError, Result};
use crate::{OrdTotalOrder, Orientation, TotalOrder};


/// A priority queue implemented with a binary heap.
///
/// The heap is stored as a dense vector; the children of the item at index `i` live at
/// `2i + 1` and `2i + 2`. After every public method returns, no item is ranked below
/// either of its children, where "ranked" means compared by the heap's order and then
/// flipped if the heap is [`Orientation::Min`].
///
/// It is a logic error for an item to be modified in such a way that its ordering relative
/// to any other item, as determined by the heap's order, changes while it is in the heap.
/// This is normally only possible through interior mutability, global state, I/O, or unsafe
/// code. The behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `BinaryHeap` that observed the logic error and not result in
/// undefined behavior or the loss of any item.
///
/// Items that compare equal come out in an unspecified order. Callers that need a
/// deterministic order between equal items must fold a tie-breaker into the order itself,
/// as [`KWayMerge`](crate::KWayMerge) does.
///
/// # Examples
///
/// ```
/// use ordstat::BinaryHeap;
///
/// // `Default` gives a max-heap over `Ord`.
/// let mut heap = BinaryHeap::default();
///
/// assert_eq!(heap.peek(), None);
///
/// heap.insert(1);
/// heap.insert(5);
/// heap.insert(2);
///
/// assert_eq!(heap.peek(), Some(&5));
/// assert_eq!(heap.len(), 3);
///
/// assert_eq!(heap.pop(), Some(5));
/// assert_eq!(heap.pop(), Some(2));
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), None);
/// ```
///
/// # Time complexity
///
/// | [insert] | [extract_top]  | [peek_top] | [build]    |
/// |----------|----------------|------------|------------|
/// | *O*(1)~  | *O*(log(*n*))  | *O*(1)     | *O*(*n*)   |
///
/// The value for `insert` is an expected cost; the method documentation gives a
/// more detailed analysis.
///
/// [insert]: BinaryHeap::insert
/// [extract_top]: BinaryHeap::extract_top
/// [peek_top]: BinaryHeap::peek_top
/// [build]: BinaryHeap::build
pub struct BinaryHeap<T, O = OrdTotalOrder<T>> {
    data: Vec<T>,
    order: O,
    orientation: Orientation,
}

/// Compares `this` with `that` such that [`Ordering::Greater`] means `this` belongs
/// nearer the top of a heap with the given `orientation`.
#[inline(always)]
fn rank<O: TotalOrder>(
    order: &O,
    orientation: Orientation,
    this: &O::OrderedType,
    that: &O::OrderedType,
) -> Ordering {
    orientation.rank(order.cmp(this, that))
}

impl<T: Clone, O: Clone> Clone for BinaryHeap<T, O> {
    fn clone(&self) -> Self {
        BinaryHeap {
            data: self.data.clone(),
            order: self.order.clone(),
            orientation: self.orientation,
        }
    }
}

impl<T: Ord> Default for BinaryHeap<T> {
    /// Creates an empty max-heap over `T`'s [`Ord`] implementation.
    #[inline]
    fn default() -> BinaryHeap<T> {
        BinaryHeap::new_max(OrdTotalOrder::default())
    }
}

impl<T: fmt::Debug, O> fmt::Debug for BinaryHeap<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, O: TotalOrder<OrderedType = T>> BinaryHeap<T, O> {
    /// Creates an empty `BinaryHeap` that keeps the item ranked first by `orientation`
    /// at its top.
    #[must_use]
    pub fn new(order: O, orientation: Orientation) -> BinaryHeap<T, O> {
        BinaryHeap { data: Vec::new(), order, orientation }
    }

    /// Creates an empty max-heap: the greatest item under `order` is on top.
    #[must_use]
    pub fn new_max(order: O) -> BinaryHeap<T, O> {
        BinaryHeap::new(order, Orientation::Max)
    }

    /// Creates an empty min-heap: the least item under `order` is on top.
    ///
    /// ```
    /// use ordstat::{BinaryHeap, OrdTotalOrder};
    ///
    /// let mut heap = BinaryHeap::new_min(OrdTotalOrder::default());
    /// heap.build([4, 9, 2]);
    /// assert_eq!(heap.peek_top(), Ok(&2));
    /// ```
    #[must_use]
    pub fn new_min(order: O) -> BinaryHeap<T, O> {
        BinaryHeap::new(order, Orientation::Min)
    }

    /// Creates an empty `BinaryHeap` with at least the specified capacity.
    ///
    /// The binary heap will be able to hold at least `capacity` elements without
    /// reallocating. If `capacity` is 0, the binary heap will not allocate.
    #[must_use]
    pub fn with_capacity(order: O, orientation: Orientation, capacity: usize) -> BinaryHeap<T, O> {
        BinaryHeap { data: Vec::with_capacity(capacity), order, orientation }
    }

    /// Removes the top item from the binary heap and returns it.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyHeap`] if there is no item to extract.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat::{BinaryHeap, HeapError};
    ///
    /// let mut heap = BinaryHeap::from([1, 3]);
    ///
    /// assert_eq!(heap.extract_top(), Ok(3));
    /// assert_eq!(heap.extract_top(), Ok(1));
    /// assert_eq!(heap.extract_top(), Err(HeapError::EmptyHeap));
    /// ```
    ///
    /// # Time complexity
    ///
    /// The worst case cost of `extract_top` on a heap containing *n* elements is
    /// *O*(log(*n*)).
    pub fn extract_top(&mut self) -> Result<T> {
        self.pop().ok_or(HeapError::EmptyHeap)
    }

    /// Removes the top item from the binary heap and returns it, or `None` if it is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop().map(|mut item| {
            if !self.is_empty() {
                swap(&mut item, &mut self.data[0]);
                // SAFETY: !self.is_empty() means that self.len() > 0
                unsafe { self.sift_down_to_bottom(0) };
            }
            item
        })
    }

    /// Pushes an item onto the binary heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    /// let mut heap = BinaryHeap::default();
    /// heap.insert(3);
    /// heap.insert(5);
    /// heap.insert(1);
    ///
    /// assert_eq!(heap.len(), 3);
    /// assert_eq!(heap.peek(), Some(&5));
    /// ```
    ///
    /// # Time complexity
    ///
    /// The expected cost of `insert`, averaged over every possible ordering of the elements
    /// being inserted, and over a sufficiently large number of inserts, is *O*(1). The time
    /// complexity degrades if elements arrive predominantly in the order the heap ranks
    /// first; in the worst case the amortized cost per insert is *O*(log(*n*)).
    ///
    /// The worst case cost of a *single* call to `insert` is *O*(*n*), when capacity is
    /// exhausted and needs a resize. The resize cost has been amortized in the previous
    /// figures.
    pub fn insert(&mut self, item: T) {
        let old_len = self.len();
        self.data.push(item);
        // SAFETY: Since we pushed a new item it means that
        //  old_len = self.len() - 1 < self.len()
        unsafe { self.sift_up(0, old_len) };
    }

    /// Replaces the heap's contents with `items`.
    ///
    /// This is the bottom-up build: the items are laid out as they come, then every
    /// internal node is sifted down, starting from the last one. Most nodes sit near the
    /// leaves and barely move, which makes this *O*(*n*) rather than the
    /// *O*(*n* \* log(*n*)) of inserting the items one by one.
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    ///
    /// let mut heap = BinaryHeap::default();
    /// heap.insert(100);
    /// heap.build([3, 1, 4, 1, 5]);
    ///
    /// assert_eq!(heap.into_sorted_vec(), [1, 1, 3, 4, 5]);
    /// ```
    pub fn build<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.data.clear();
        self.data.extend(items);
        log::trace!("building heap of {} items", self.data.len());
        self.rebuild();
    }

    /// Swaps `item` in for the top item with a single sift, returning the old top.
    ///
    /// This is equivalent to, but cheaper than, [`extract_top`](Self::extract_top)
    /// followed by [`insert`](Self::insert). On an empty heap `item` is simply inserted
    /// and `None` is returned.
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    ///
    /// let mut heap = BinaryHeap::from([2, 9, 4]);
    /// assert_eq!(heap.replace_top(1), Some(9));
    /// assert_eq!(heap.into_sorted_vec(), [1, 2, 4]);
    /// ```
    pub fn replace_top(&mut self, mut item: T) -> Option<T> {
        if self.is_empty() {
            self.insert(item);
            return None;
        }
        swap(&mut item, &mut self.data[0]);
        // SAFETY: the heap is not empty, so 0 < self.len()
        unsafe { self.sift_down(0) };
        Some(item)
    }

    /// Consumes the `BinaryHeap` and returns a vector sorted so that the item that would
    /// have been extracted first comes last (ascending for a max-heap, descending for a
    /// min-heap).
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    ///
    /// let mut heap = BinaryHeap::from([1, 2, 4, 5, 7]);
    /// heap.insert(6);
    /// heap.insert(3);
    ///
    /// assert_eq!(heap.into_sorted_vec(), [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut end = self.len();
        while end > 1 {
            end -= 1;
            self.data.swap(0, end);
            // SAFETY: `end` goes from `self.len() - 1` to 1 (both included) so:
            //  0 < 1 <= end <= self.len() - 1 < self.len()
            //  Which means 0 < end and end < self.len().
            unsafe { self.sift_down_range(0, end) };
        }
        self.into_vec()
    }

    // The implementations of sift_up and sift_down use unsafe blocks in
    // order to move an element out of the vector (leaving behind a
    // hole), shift along the others and move the removed element back into the
    // vector at the final location of the hole.
    // The `Hole` type is used to represent this, and make sure
    // the hole is filled back at the end of its scope, even when the order panics.
    // Using a hole reduces the constant factor compared to using swaps,
    // which involves twice as many moves.

    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.len()`.
    unsafe fn sift_up(&mut self, start: usize, pos: usize) -> usize {
        let order = &self.order;
        let orientation = self.orientation;
        // Take out the value at `pos` and create a hole.
        // SAFETY: The caller guarantees that pos < self.len()
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };

        while hole.pos() > start {
            let parent = (hole.pos() - 1) / 2;

            // SAFETY: hole.pos() > start >= 0, which means hole.pos() > 0
            //  and so hole.pos() - 1 can't underflow.
            //  This guarantees that parent < hole.pos() so
            //  it's a valid index and also != hole.pos().
            if rank(order, orientation, hole.element(), unsafe { hole.get(parent) }).is_le() {
                break;
            }

            // SAFETY: Same as above
            unsafe { hole.move_to(parent) };
        }

        hole.pos()
    }

    /// Take an element at `pos` and move it down the heap,
    /// while its children rank higher.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `pos < end <= self.len()`.
    unsafe fn sift_down_range(&mut self, pos: usize, end: usize) {
        let order = &self.order;
        let orientation = self.orientation;
        // SAFETY: The caller guarantees that pos < end <= self.len().
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };
        let mut child = 2 * hole.pos() + 1;

        // Loop invariant: child == 2 * hole.pos() + 1.
        while child <= end.saturating_sub(2) {
            // compare with the higher ranked of the two children
            // SAFETY: child < end - 1 < self.len() and
            //  child + 1 < end <= self.len(), so they're valid indexes.
            //  child == 2 * hole.pos() + 1 != hole.pos() and
            //  child + 1 == 2 * hole.pos() + 2 != hole.pos().
            child += unsafe { rank(order, orientation, hole.get(child), hole.get(child + 1)) }
                .is_le() as usize;

            // if we are already in order, stop.
            // SAFETY: child is now either the old child or the old child+1
            //  We already proven that both are < self.len() and != hole.pos()
            if rank(order, orientation, hole.element(), unsafe { hole.get(child) }).is_ge() {
                return;
            }

            // SAFETY: same as above.
            unsafe { hole.move_to(child) };
            child = 2 * hole.pos() + 1;
        }

        // SAFETY: && short circuit, which means that in the
        //  second condition it's already true that child == end - 1 < self.len().
        if child == end - 1
            && rank(order, orientation, hole.element(), unsafe { hole.get(child) }).is_lt()
        {
            // SAFETY: child is already proven to be a valid index and
            //  child == 2 * hole.pos() + 1 != hole.pos().
            unsafe { hole.move_to(child) };
        }
    }

    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.len()`.
    unsafe fn sift_down(&mut self, pos: usize) {
        let len = self.len();
        // SAFETY: pos < len is guaranteed by the caller and
        //  obviously len = self.len() <= self.len().
        unsafe { self.sift_down_range(pos, len) };
    }

    /// Take an element at `pos` and move it all the way down the heap,
    /// then sift it up to its position.
    ///
    /// Note: This is faster when the element is known to rank low / should
    /// be closer to the bottom, which is always the case for the last leaf
    /// moved to the root by `pop`.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `pos < self.len()`.
    unsafe fn sift_down_to_bottom(&mut self, mut pos: usize) {
        let end = self.len();
        let start = pos;
        let order = &self.order;
        let orientation = self.orientation;

        // SAFETY: The caller guarantees that pos < self.len().
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };
        let mut child = 2 * hole.pos() + 1;

        // Loop invariant: child == 2 * hole.pos() + 1.
        while child <= end.saturating_sub(2) {
            // SAFETY: child < end - 1 < self.len() and
            //  child + 1 < end <= self.len(), so they're valid indexes.
            //  child == 2 * hole.pos() + 1 != hole.pos() and
            //  child + 1 == 2 * hole.pos() + 2 != hole.pos().
            child += unsafe { rank(order, orientation, hole.get(child), hole.get(child + 1)) }
                .is_le() as usize;

            // SAFETY: Same as above
            unsafe { hole.move_to(child) };
            child = 2 * hole.pos() + 1;
        }

        if child == end - 1 {
            // SAFETY: child == end - 1 < self.len(), so it's a valid index
            //  and child == 2 * hole.pos() + 1 != hole.pos().
            unsafe { hole.move_to(child) };
        }
        pos = hole.pos();
        drop(hole);

        // SAFETY: pos is the position in the hole and was already proven
        //  to be a valid index.
        unsafe { self.sift_up(start, pos) };
    }

    /// Rebuild assuming data[0..start] is still a proper heap.
    fn rebuild_tail(&mut self, start: usize) {
        if start == self.len() {
            return;
        }

        let tail_len = self.len() - start;

        #[inline(always)]
        fn log2_fast(x: usize) -> usize {
            (usize::BITS - x.leading_zeros() - 1) as usize
        }

        // `rebuild` takes O(self.len()) operations
        // and about 2 * self.len() comparisons in the worst case
        // while repeating `sift_up` takes O(tail_len * log(start)) operations
        // and about 1 * tail_len * log_2(start) comparisons in the worst case,
        // assuming start >= tail_len. For larger heaps, the crossover point
        // no longer follows this reasoning and was determined empirically.
        let better_to_rebuild = if start < tail_len {
            true
        } else if self.len() <= 2048 {
            2 * self.len() < tail_len * log2_fast(start)
        } else {
            2 * self.len() < tail_len * 11
        };

        if better_to_rebuild {
            self.rebuild();
        } else {
            for i in start..self.len() {
                // SAFETY: The index `i` is always less than self.len().
                unsafe { self.sift_up(0, i) };
            }
        }
    }

    fn rebuild(&mut self) {
        let mut n = self.len() / 2;
        while n > 0 {
            n -= 1;
            // SAFETY: n starts from self.len() / 2 and goes down to 0.
            //  The only case when !(n < self.len()) is if
            //  self.len() == 0, but it's ruled out by the loop condition.
            unsafe { self.sift_down(n) };
        }
    }

    /// Moves all the elements of `other` into `self`, leaving `other` empty.
    ///
    /// `other` is ranked by `self`'s order and orientation from then on.
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    ///
    /// let mut a = BinaryHeap::from([-10, 1, 2, 3, 3]);
    /// let mut b = BinaryHeap::from([-20, 5, 43]);
    ///
    /// a.append(&mut b);
    ///
    /// assert_eq!(a.into_sorted_vec(), [-20, -10, 1, 2, 3, 3, 5, 43]);
    /// assert!(b.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let start = self.data.len();

        self.data.append(&mut other.data);

        self.rebuild_tail(start);
    }

    /// Clears the binary heap, returning an iterator over the removed elements in the order
    /// they would have been extracted. If the iterator is dropped before being fully
    /// consumed, it drops the remaining elements in that order.
    ///
    /// The returned iterator keeps a mutable borrow on the heap to optimize
    /// its implementation.
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    ///
    /// let mut heap = BinaryHeap::from([1, 2, 3, 4, 5]);
    /// assert_eq!(heap.drain_sorted().take(2).collect::<Vec<_>>(), [5, 4]);
    /// assert!(heap.is_empty());
    /// ```
    #[inline]
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, O> {
        DrainSorted { inner: self }
    }

    /// Returns an iterator which retrieves elements in the order they would be extracted.
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    ///
    /// let heap = BinaryHeap::from([1, 2, 3, 4, 5]);
    /// assert_eq!(heap.into_iter_sorted().take(2).collect::<Vec<_>>(), [5, 4]);
    /// ```
    pub fn into_iter_sorted(self) -> IntoIterSorted<T, O> {
        IntoIterSorted { inner: self }
    }

    /// Returns the top item in the binary heap.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyHeap`] if there is no item.
    ///
    /// # Time complexity
    ///
    /// Cost is *O*(1) in the worst case.
    pub fn peek_top(&self) -> Result<&T> {
        self.peek().ok_or(HeapError::EmptyHeap)
    }

    #[cfg(test)]
    pub(crate) fn holds_heap_property(&self) -> bool {
        (1..self.len()).all(|child| {
            let parent = (child - 1) / 2;
            rank(&self.order, self.orientation, &self.data[parent], &self.data[child]).is_ge()
        })
    }
}

impl<T, O> BinaryHeap<T, O> {
    /// Returns an iterator visiting all values in the underlying vector, in
    /// arbitrary order.
    ///
    /// ```
    /// use ordstat::BinaryHeap;
    /// let heap = BinaryHeap::from([1, 2, 3, 4]);
    ///
    /// let mut seen: Vec<_> = heap.iter().copied().collect();
    /// seen.sort();
    /// assert_eq!(seen, [1, 2, 3, 4]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { iter: self.data.iter() }
    }

    /// Returns the top item in the binary heap, or `None` if it is empty.
    ///
    /// # Time complexity
    ///
    /// Cost is *O*(1) in the worst case.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// The order the heap ranks its items by.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Whether the greatest or least item is kept on top.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the number of elements the binary heap can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns a slice of all values in the underlying vector, in arbitrary order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Consumes the `BinaryHeap` and returns the underlying vector in arbitrary order.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_vec(self) -> Vec<T> {
        self.into()
    }

    /// Returns the length of the binary heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if the binary heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all items from the binary heap.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Hole represents a hole in a slice i.e., an index without valid value
/// (because it was moved from or duplicated).
/// In drop, `Hole` will restore the slice by filling the hole
/// position with the value that was originally removed.
struct Hole<'a, T: 'a> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// Create a new `Hole` at index `pos`.
    ///
    /// Unsafe because pos must be within the data slice.
    #[inline]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFE: pos should be inside the slice
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole { data, elt: ManuallyDrop::new(elt), pos }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// Returns a reference to the element removed.
    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe { self.data.get_unchecked(index) }
    }

    /// Move hole to new location
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe {
            let ptr = self.data.as_mut_ptr();
            let index_ptr: *const _ = ptr.add(index);
            let hole_ptr = ptr.add(self.pos);
            ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
        }
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // fill the hole again
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.get_unchecked_mut(pos), 1);
        }
    }
}

/// An iterator over the elements of a `BinaryHeap`.
///
/// This `struct` is created by [`BinaryHeap::iter()`]. See its
/// documentation for more.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    iter: slice::Iter<'a, T>,
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.iter.as_slice()).finish()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { iter: self.iter.clone() }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[cfg(feature = "exact_size_is_empty")]
    fn is_empty(&self) -> bool {
        self.iter.is_empty()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over the elements of a `BinaryHeap`, in arbitrary order.
///
/// This `struct` is created by [`BinaryHeap::into_iter()`]
/// (provided by the [`IntoIterator`] trait).
#[derive(Clone, Debug)]
pub struct IntoIter<T> {
    iter: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// An owning iterator yielding a heap's items in the order they would be extracted.
///
/// This `struct` is created by [`BinaryHeap::into_iter_sorted()`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct IntoIterSorted<T, O = OrdTotalOrder<T>> {
    inner: BinaryHeap<T, O>,
}

impl<T, O: TotalOrder<OrderedType = T>> Iterator for IntoIterSorted<T, O> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.inner.len();
        (exact, Some(exact))
    }
}

impl<T, O: TotalOrder<OrderedType = T>> ExactSizeIterator for IntoIterSorted<T, O> {}

impl<T, O: TotalOrder<OrderedType = T>> FusedIterator for IntoIterSorted<T, O> {}

#[cfg(feature = "trusted_len")]
unsafe impl<T, O: TotalOrder<OrderedType = T>> TrustedLen for IntoIterSorted<T, O> {}

/// A draining iterator yielding a heap's items in the order they would be extracted.
///
/// This `struct` is created by [`BinaryHeap::drain_sorted()`]. See its
/// documentation for more.
#[derive(Debug)]
pub struct DrainSorted<'a, T, O: TotalOrder<OrderedType = T> = OrdTotalOrder<T>> {
    inner: &'a mut BinaryHeap<T, O>,
}

impl<'a, T, O: TotalOrder<OrderedType = T>> Drop for DrainSorted<'a, T, O> {
    /// Removes heap elements in heap order.
    fn drop(&mut self) {
        struct DropGuard<'r, 'a, T, O: TotalOrder<OrderedType = T>>(&'r mut DrainSorted<'a, T, O>);

        impl<'r, 'a, T, O: TotalOrder<OrderedType = T>> Drop for DropGuard<'r, 'a, T, O> {
            fn drop(&mut self) {
                // an item's destructor panicked; there is no order left to respect
                self.0.inner.clear();
            }
        }

        while let Some(item) = self.inner.pop() {
            let guard = DropGuard(self);
            drop(item);
            mem::forget(guard);
        }
    }
}

impl<T, O: TotalOrder<OrderedType = T>> Iterator for DrainSorted<'_, T, O> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.inner.len();
        (exact, Some(exact))
    }
}

impl<T, O: TotalOrder<OrderedType = T>> ExactSizeIterator for DrainSorted<'_, T, O> {}

impl<T, O: TotalOrder<OrderedType = T>> FusedIterator for DrainSorted<'_, T, O> {}

#[cfg(feature = "trusted_len")]
unsafe impl<T, O: TotalOrder<OrderedType = T>> TrustedLen for DrainSorted<'_, T, O> {}

impl<T: Ord> From<Vec<T>> for BinaryHeap<T> {
    /// Converts a `Vec<T>` into a max-heap.
    ///
    /// This conversion happens in-place, and has *O*(*n*) time complexity.
    fn from(vec: Vec<T>) -> BinaryHeap<T> {
        let mut heap = BinaryHeap::new_max(OrdTotalOrder::default());
        heap.data = vec;
        heap.rebuild();
        heap
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for BinaryHeap<T> {
    /// ```
    /// use ordstat::BinaryHeap;
    ///
    /// let mut h1 = BinaryHeap::from([1, 4, 2, 3]);
    /// let mut h2: BinaryHeap<_> = [1, 4, 2, 3].into_iter().collect();
    /// while let Some((a, b)) = h1.pop().zip(h2.pop()) {
    ///     assert_eq!(a, b);
    /// }
    /// ```
    fn from(arr: [T; N]) -> Self {
        Self::from_iter(arr)
    }
}

impl<T, O> From<BinaryHeap<T, O>> for Vec<T> {
    /// Converts a `BinaryHeap<T>` into a `Vec<T>`.
    ///
    /// This conversion requires no data movement or allocation, and has
    /// constant time complexity.
    fn from(heap: BinaryHeap<T, O>) -> Vec<T> {
        heap.data
    }
}

impl<T: Ord> FromIterator<T> for BinaryHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> BinaryHeap<T> {
        BinaryHeap::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T, O> IntoIterator for BinaryHeap<T, O> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Creates a consuming iterator, that is, one that moves each value out of
    /// the binary heap in arbitrary order. The binary heap cannot be used
    /// after calling this.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { iter: self.data.into_iter() }
    }
}

impl<'a, T, O> IntoIterator for &'a BinaryHeap<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, O: TotalOrder<OrderedType = T>> Extend<T> for BinaryHeap<T, O> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let start = self.data.len();
        self.data.extend(iter);
        self.rebuild_tail(start);
    }
}

impl<'a, T: 'a + Copy, O: TotalOrder<OrderedType = T>> Extend<&'a T> for BinaryHeap<T, O> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}
