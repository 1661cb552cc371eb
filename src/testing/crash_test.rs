use core::cell::Cell;
use core::cmp::Ordering;

use crate::TotalOrder;

/// An order over `i32` that counts its comparisons and panics on the `fuse`-th one.
///
/// Used to check that a comparator blowing up half way through a sift still leaves every
/// item in the collection.
#[derive(Debug, Default)]
pub struct CrashTestOrder {
    comparisons: Cell<usize>,
    fuse: Cell<Option<usize>>,
}

impl CrashTestOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the order to panic after `remaining` further comparisons.
    pub fn arm(&self, remaining: usize) {
        self.fuse.set(Some(self.comparisons.get() + remaining));
    }

    pub fn disarm(&self) {
        self.fuse.set(None);
    }

    pub fn comparisons(&self) -> usize {
        self.comparisons.get()
    }
}

impl TotalOrder for CrashTestOrder {
    type OrderedType = i32;

    fn cmp(&self, this: &i32, that: &i32) -> Ordering {
        let n = self.comparisons.get() + 1;
        self.comparisons.set(n);
        if self.fuse.get() == Some(n) {
            panic!("panic in comparison {n}");
        }
        this.cmp(that)
    }
}
