use super::OSAvlSet;
use crate::compare::Natural;
use crate::raw::RawOSAvlSet;

impl<T> OSAvlSet<T> {
    /// Creates an empty set ordered by [`Ord`] with room for at least
    /// `capacity` elements before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set: OSAvlSet<i32> = OSAvlSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_compare(capacity, Natural)
    }
}

impl<T, C> OSAvlSet<T, C> {
    /// Creates an empty set ordered by `compare` with room for at least
    /// `capacity` elements before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::{OSAvlSet, Reversed};
    ///
    /// let set: OSAvlSet<u64, Reversed> = OSAvlSet::with_capacity_and_compare(8, Reversed);
    /// assert!(set.capacity() >= 8);
    /// ```
    #[must_use]
    pub fn with_capacity_and_compare(capacity: usize, compare: C) -> Self {
        OSAvlSet {
            raw: RawOSAvlSet::with_capacity(capacity, compare),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// [`clear`](Self::clear) keeps the allocation.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
