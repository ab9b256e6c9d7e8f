use core::ops::Index;

use super::OSAvlSet;
use crate::Rank;
use crate::raw::Link;

impl<T, C> OSAvlSet<T, C> {
    /// Returns the element at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        let handle = self.raw.select(rank.checked_add(1)?)?;
        self.raw.get(Link::Node(handle))
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osavl::{OSAvlSet, Rank};
///
/// let set = OSAvlSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T, C> Index<Rank> for OSAvlSet<T, C> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
