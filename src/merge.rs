//! Lazy merging of individually sorted sources.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use alloc::vec::Vec;

use crate::error::{HeapError, Result};
use crate::heap::BinaryHeap;
use crate::{OrdTotalOrder, TotalOrder};

/// The head of one source: its next value, which source it came from and how far into
/// that source it sits.
#[derive(Clone, Debug)]
struct Cursor<T> {
    value: T,
    source: usize,
    position: usize,
}

/// Orders cursors by value, and cursors holding equal values by source index, so that the
/// merge is stable across sources.
#[derive(Clone, Debug)]
struct CursorOrder<O>(O);

impl<O> TotalOrder for CursorOrder<O>
where
    O: TotalOrder,
    O::OrderedType: Sized,
{
    type OrderedType = Cursor<O::OrderedType>;

    fn cmp(&self, this: &Self::OrderedType, that: &Self::OrderedType) -> Ordering {
        self.0.cmp(&this.value, &that.value).then(this.source.cmp(&that.source))
    }
}

/// Merges any number of sorted sources into one sorted sequence, pulling from the sources
/// only as values are consumed.
///
/// Each source must already be sorted ascending under the merge's order. This is not
/// checked; if it does not hold, the output is not sorted either (but every value is
/// still produced exactly once).
///
/// The merge holds one cursor per source that still has values, in a min-heap. Each step
/// takes the least cursor, yields its value and replaces it with the next value from the
/// same source. Equal values are yielded lowest source index first, and values from one
/// source in the order that source produced them.
///
/// ```
/// use ordstat::KWayMerge;
///
/// let merged: Vec<_> =
///     KWayMerge::ascending([vec![1, 4, 7], vec![2, 5, 8], vec![3, 6, 9]]).collect();
/// assert_eq!(merged, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
/// ```
pub struct KWayMerge<I: Iterator, O = OrdTotalOrder<<I as Iterator>::Item>> {
    sources: Vec<I>,
    heap: BinaryHeap<Cursor<I::Item>, CursorOrder<O>>,
}

impl<I> KWayMerge<I>
where
    I: Iterator,
    I::Item: Ord,
{
    /// Merges `sources` under the items' [`Ord`] implementation.
    pub fn ascending<S>(sources: S) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        KWayMerge::new(sources, OrdTotalOrder::default())
    }
}

impl<I, O> KWayMerge<I, O>
where
    I: Iterator,
    O: TotalOrder<OrderedType = I::Item>,
{
    /// Merges `sources`, each sorted ascending under `order`.
    ///
    /// ```
    /// use ordstat::{order, KWayMerge};
    ///
    /// // newest first
    /// let newest = order::from_fn(|a: &u64, b: &u64| b.cmp(a));
    /// let merged: Vec<_> = KWayMerge::new([vec![30, 10], vec![], vec![25, 20]], newest).collect();
    /// assert_eq!(merged, [30, 25, 20, 10]);
    /// ```
    pub fn new<S>(sources: S, order: O) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        let mut merge = KWayMerge {
            sources: Vec::new(),
            heap: BinaryHeap::new_min(CursorOrder(order)),
        };
        merge.initialize(sources);
        merge
    }

    /// Discards whatever is left of the current sources and starts over on `sources`,
    /// keeping the same order.
    ///
    /// Sources that are empty from the start never get a cursor.
    pub fn initialize<S>(&mut self, sources: S)
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        self.sources = sources.into_iter().map(IntoIterator::into_iter).collect();
        let heads = self.sources.iter_mut().enumerate().filter_map(|(source, iter)| {
            iter.next().map(|value| Cursor { value, source, position: 0 })
        });
        // the heads arrive all at once, so heapify them rather than inserting one by one
        self.heap.build(heads);
        log::trace!(
            "merging {} sources, {} non-empty",
            self.sources.len(),
            self.heap.len()
        );
    }

    /// Whether another value remains.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.heap.is_empty()
    }

    /// The value the next call to [`next`](Iterator::next) will yield, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&I::Item> {
        self.heap.peek().map(|cursor| &cursor.value)
    }

    /// Yields the next merged value.
    ///
    /// # Errors
    ///
    /// [`HeapError::Exhausted`] once every source has run dry. The merge stays exhausted
    /// until it is [re-initialised](Self::initialize).
    pub fn try_next(&mut self) -> Result<I::Item> {
        self.next().ok_or(HeapError::Exhausted)
    }

    /// Number of sources that still have values.
    #[must_use]
    pub fn live_sources(&self) -> usize {
        self.heap.len()
    }
}

impl<I, O> Iterator for KWayMerge<I, O>
where
    I: Iterator,
    O: TotalOrder<OrderedType = I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let (source, position) = {
            let top = self.heap.peek()?;
            (top.source, top.position)
        };
        let cursor = match self.sources[source].next() {
            // the source's next value takes the place of the one being yielded
            Some(value) => self.heap.replace_top(Cursor { value, source, position: position + 1 }),
            None => self.heap.pop(),
        };
        cursor.map(|cursor| cursor.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.heap.len();
        // only sources with a cursor can contribute more values
        self.heap.iter().fold((buffered, Some(buffered)), |(lo, hi), cursor| {
            let (source_lo, source_hi) = self.sources[cursor.source].size_hint();
            let hi = match (hi, source_hi) {
                (Some(hi), Some(source_hi)) => hi.checked_add(source_hi),
                _ => None,
            };
            (lo.saturating_add(source_lo), hi)
        })
    }
}

impl<I, O> FusedIterator for KWayMerge<I, O>
where
    I: Iterator,
    O: TotalOrder<OrderedType = I::Item>,
{
}

impl<I, O> fmt::Debug for KWayMerge<I, O>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KWayMerge")
            .field("sources", &self.sources.len())
            .field("heads", &self.heap)
            .finish()
    }
}
