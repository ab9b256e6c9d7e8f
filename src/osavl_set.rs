use core::fmt;
use core::iter::FusedIterator;

use crate::compare::{Compare, Natural};
use crate::raw::{Link, RawOSAvlSet};

mod capacity;
mod cursor;
mod order_statistic;

pub use cursor::{Cursor, Position};

/// An ordered set of unique elements based on a threaded AVL tree.
///
/// Elements are ordered by the comparator `C` (see [`Compare`]). Two elements
/// that are *equivalent* under it (neither is less than the other) are never
/// both stored: inserting an element equivalent to a stored one leaves the set
/// unchanged.
///
/// Besides the usual lookups the set answers order-statistic queries in
/// O(log n): [`select_by_rank1`] finds the k-th smallest element and
/// [`rank_of1`] counts the elements ordered before a key. Lookups return a
/// [`Cursor`] that can step to neighbouring elements in O(1).
///
/// Elements cannot be removed individually; [`clear`] empties the set.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element, as determined by the comparator,
/// changes while it is in the set. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `OSAvlSet` that
/// observed the logic error and not result in undefined behavior.
///
/// [`select_by_rank1`]: OSAvlSet::select_by_rank1
/// [`rank_of1`]: OSAvlSet::rank_of1
/// [`clear`]: OSAvlSet::clear
///
/// # Examples
///
/// ```
/// use osavl::OSAvlSet;
///
/// let mut books = OSAvlSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains(&"The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// // "The Great Gatsby" sorts second.
/// assert_eq!(books.rank_of0(&"The Great Gatsby"), 1);
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
pub struct OSAvlSet<T, C = Natural> {
    raw: RawOSAvlSet<T, C>,
}

/// An iterator over the elements of an `OSAvlSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OSAvlSet`].
///
/// # Examples
///
/// ```
/// use osavl::OSAvlSet;
///
/// let set = OSAvlSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OSAvlSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T, C = Natural> {
    raw: &'a RawOSAvlSet<T, C>,
    front: Link,
    back: Link,
    remaining: usize,
}

/// An owning iterator over the elements of an `OSAvlSet`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`OSAvlSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use osavl::OSAvlSet;
///
/// let set = OSAvlSet::from([1, 2, 3]);
/// let mut iter = set.into_iter();
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.next_back(), Some(3));
/// assert_eq!(iter.next(), Some(2));
/// ```
///
/// [`into_iter`]: OSAvlSet#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> OSAvlSet<T> {
    /// Makes a new, empty `OSAvlSet` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set: OSAvlSet<i32> = OSAvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<T, C> OSAvlSet<T, C> {
    /// Makes a new, empty `OSAvlSet` ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::{OSAvlSet, Reversed};
    ///
    /// let mut set = OSAvlSet::with_compare(Reversed);
    /// set.extend([1, 2, 3]);
    /// assert_eq!(set.first(), Some(&3));
    /// ```
    #[must_use]
    pub const fn with_compare(compare: C) -> Self {
        OSAvlSet {
            raw: RawOSAvlSet::new(compare),
        }
    }

    /// Returns a reference to the comparator ordering this set.
    #[must_use]
    pub fn key_compare(&self) -> &C {
        self.raw.compare()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut set = OSAvlSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the largest number of elements a set of this type can hold.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn max_size(&self) -> usize {
        RawOSAvlSet::<T, C>::max_size()
    }

    /// Clears the set, removing all elements.
    ///
    /// Cursors cannot outlive this call, and every [`Position`] taken before it
    /// becomes invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut set = OSAvlSet::from([1, 2]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(set.begin().is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents and comparators of two sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut a = OSAvlSet::from([1, 2]);
    /// let mut b = OSAvlSet::from([3]);
    /// a.swap(&mut b);
    /// assert_eq!(a.iter().copied().collect::<Vec<_>>(), [3]);
    /// assert_eq!(b.iter().copied().collect::<Vec<_>>(), [1, 2]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        self.raw.swap(&mut other.raw);
    }

    /// Moves every element into a new set, leaving `self` empty but ordered by
    /// a clone of the same comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut source = OSAvlSet::from([1, 2, 3]);
    /// let moved = source.take();
    /// assert!(source.is_empty());
    /// assert_eq!(moved.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use = "use `clear` to discard the elements"]
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        OSAvlSet {
            raw: self.raw.take(),
        }
    }

    /// Returns the smallest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([2, 1, 3]);
    /// assert_eq!(set.first(), Some(&1));
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.get(self.raw.first())
    }

    /// Returns the largest element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.get(self.raw.last())
    }

    /// Returns the height of the underlying tree, 0 when empty.
    ///
    /// An AVL tree of `n` elements is never taller than about `1.44 * log2(n + 2)`.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Returns a cursor at the smallest element, or at the end if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 2]);
    /// let mut cursor = set.begin();
    /// assert_eq!(cursor.get(), Some(&1));
    /// cursor.move_next();
    /// cursor.move_next();
    /// assert_eq!(cursor, set.end());
    /// ```
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T, C> {
        Cursor::new(&self.raw, self.raw.first())
    }

    /// Returns a cursor at the end sentinel, one past the largest element.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T, C> {
        Cursor::new(&self.raw, Link::End)
    }

    /// Returns a cursor at the largest element, or at the reverse end if the set is empty.
    #[must_use]
    pub fn rbegin(&self) -> Cursor<'_, T, C> {
        Cursor::new(&self.raw, self.raw.last())
    }

    /// Returns a cursor at the reverse-end sentinel, one before the smallest element.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 2]);
    /// let mut cursor = set.rend();
    /// assert!(cursor.is_rend());
    /// cursor.move_next();
    /// assert_eq!(cursor, set.begin());
    /// ```
    #[must_use]
    pub fn rend(&self) -> Cursor<'_, T, C> {
        Cursor::new(&self.raw, Link::Rend)
    }

    /// Returns a cursor at a position previously taken from this set.
    ///
    /// A [`Position`] taken from a different set, or before the last
    /// [`clear`](Self::clear), names an unspecified element or panics when used.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut set = OSAvlSet::new();
    /// let (position, _) = set.insert_full(10);
    /// set.extend(0..10);
    /// assert_eq!(set.cursor_at(position).get(), Some(&10));
    /// ```
    #[must_use]
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, T, C> {
        Cursor::new(&self.raw, position.link())
    }

    /// Returns a cursor at the element with 1-based `rank`, or at the end if
    /// `rank` is 0 or greater than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([10, 20, 30]);
    /// assert_eq!(set.select_by_rank1(1).get(), Some(&10));
    /// assert!(set.select_by_rank1(0).is_end());
    /// assert!(set.select_by_rank1(4).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select_by_rank1(&self, rank: usize) -> Cursor<'_, T, C> {
        let link = self.raw.select(rank).map_or(Link::End, Link::Node);
        Cursor::new(&self.raw, link)
    }

    /// Returns a cursor at the element with 0-based `rank`, or at the end if
    /// `rank` is not less than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([10, 20, 30]);
    /// assert_eq!(set.select_by_rank0(0).get(), Some(&10));
    /// assert!(set.select_by_rank0(usize::MAX).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select_by_rank0(&self, rank: usize) -> Cursor<'_, T, C> {
        self.select_by_rank1(rank.saturating_add(1))
    }
}

impl<T, C: Compare<T>> OSAvlSet<T, C> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. If an equivalent value is
    /// already present the set is unchanged and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut set = OSAvlSet::new();
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value).1
    }

    /// Adds a value to the set, returning the [`Position`] of the stored element
    /// equivalent to it and whether `value` was newly inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut set = OSAvlSet::new();
    /// let (first, inserted) = set.insert_full(7);
    /// assert!(inserted);
    /// let (again, inserted) = set.insert_full(7);
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert_full(&mut self, value: T) -> (Position, bool) {
        let (handle, inserted) = self.raw.insert(value);
        (Position::new(Link::Node(handle)), inserted)
    }

    /// Returns a cursor at the element equivalent to `value`, or at the end if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 2, 3]);
    /// assert_eq!(set.find(&2).get(), Some(&2));
    /// assert!(set.find(&4).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find(&self, value: &T) -> Cursor<'_, T, C> {
        let link = self.raw.find(value).map_or(Link::End, Link::Node);
        Cursor::new(&self.raw, link)
    }

    /// Returns `true` if the set contains an element equivalent to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.find(value).is_some()
    }

    /// Returns the number of elements equivalent to `value`: 0 or 1.
    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        usize::from(self.contains(value))
    }

    /// Returns a reference to the stored element equivalent to `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// // Pairs are ordered, and therefore deduplicated, by their first field.
    /// let mut set = OSAvlSet::with_compare(|a: &(u8, char), b: &(u8, char)| a.0 < b.0);
    /// set.insert((1, 'a'));
    /// assert_eq!(set.get(&(1, 'z')), Some(&(1, 'a')));
    /// ```
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.find(value).and_then(|handle| self.raw.get(Link::Node(handle)))
    }

    /// Returns a cursor at the first element not ordered before `value`, or at
    /// the end if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 3, 5]);
    /// assert_eq!(set.lower_bound(&3).get(), Some(&3));
    /// assert_eq!(set.lower_bound(&4).get(), Some(&5));
    /// assert!(set.lower_bound(&6).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T, C> {
        Cursor::new(&self.raw, self.raw.lower_bound(value))
    }

    /// Returns a cursor at the first element ordered after `value`, or at the
    /// end if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 3, 5]);
    /// assert_eq!(set.upper_bound(&3).get(), Some(&5));
    /// assert_eq!(set.upper_bound(&0).get(), Some(&1));
    /// assert!(set.upper_bound(&5).is_end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn upper_bound(&self, value: &T) -> Cursor<'_, T, C> {
        Cursor::new(&self.raw, self.raw.upper_bound(value))
    }

    /// Returns `(lower_bound(value), upper_bound(value))`.
    ///
    /// The two cursors are equal when no element is equivalent to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 3, 5]);
    /// let (lower, upper) = set.equal_range(&3);
    /// assert_eq!(lower.get(), Some(&3));
    /// assert_eq!(upper.get(), Some(&5));
    ///
    /// let (lower, upper) = set.equal_range(&4);
    /// assert_eq!(lower, upper);
    /// ```
    #[must_use]
    pub fn equal_range(&self, value: &T) -> (Cursor<'_, T, C>, Cursor<'_, T, C>) {
        (self.lower_bound(value), self.upper_bound(value))
    }

    /// Returns the 1-based position `value` has in the set, or would have once
    /// inserted: one more than the number of elements ordered before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([10, 20, 30]);
    /// assert_eq!(set.rank_of1(&10), 1);
    /// assert_eq!(set.rank_of1(&25), 3);
    /// assert_eq!(OSAvlSet::<i32>::new().rank_of1(&5), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of1(&self, value: &T) -> usize {
        self.raw.rank(value)
    }

    /// Returns the number of elements ordered before `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([10, 20, 30]);
    /// assert_eq!(set.rank_of0(&10), 0);
    /// assert_eq!(set.rank_of0(&99), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of0(&self, value: &T) -> usize {
        self.rank_of1(value) - 1
    }
}

impl<T, C: Compare<T>> PartialEq for OSAvlSet<T, C> {
    /// Two sets are equal when they have the same length and their elements are
    /// pairwise equivalent under `self`'s comparator.
    fn eq(&self, other: &Self) -> bool {
        let compare = self.raw.compare();
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| compare.equivalent(a, b))
    }
}

impl<T, C: Compare<T>> Eq for OSAvlSet<T, C> {}

impl<T: Clone, C: Clone> Clone for OSAvlSet<T, C> {
    fn clone(&self) -> Self {
        OSAvlSet {
            raw: self.raw.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OSAvlSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for OSAvlSet<T, C> {
    /// Creates an empty `OSAvlSet`.
    fn default() -> Self {
        Self::with_compare(C::default())
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for OSAvlSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Compare<T>> Extend<T> for OSAvlSet<T, C> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for OSAvlSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OSAvlSet<T> {
    /// Converts a `[T; N]` into an `OSAvlSet<T>`, dropping duplicates.
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set1 = OSAvlSet::from([1, 2, 3, 4]);
    /// let set2: OSAvlSet<_> = [4, 3, 2, 1, 1].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        let mut set = OSAvlSet::with_capacity(N);
        set.extend(arr);
        set
    }
}

impl<T, C> IntoIterator for OSAvlSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the set's contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OSAvlSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.raw.key(self.front);
        self.front = self.raw.next(self.front);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.raw.key(self.back);
        self.back = self.raw.prev(self.back);
        self.remaining -= 1;
        Some(value)
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `osavl_set::IntoIter`.
    ///
    /// ```
    /// # use osavl::osavl_set;
    /// let iter: osavl_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::compare::Reversed;
    use alloc::vec::Vec;

    #[test]
    fn iterators_report_exact_lengths() {
        let set = OSAvlSet::from([4, 2, 6, 1]);
        let mut iter = set.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        iter.next_back();
        assert_eq!(iter.size_hint(), (2, Some(2)));
        assert_eq!(iter.clone().collect::<Vec<_>>(), [&2, &4]);
        iter.next();
        iter.next();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        let into_iter = set.into_iter();
        assert_eq!(into_iter.len(), 4);
    }

    #[test]
    fn iter_last_is_largest() {
        let set = OSAvlSet::from([9, 3, 5]);
        assert_eq!(set.iter().last(), Some(&9));
        assert_eq!(OSAvlSet::<i32>::new().iter().last(), None);
    }

    #[test]
    fn equality_uses_comparator_equivalence() {
        let by_tens = |a: &i32, b: &i32| a / 10 < b / 10;
        let mut a = OSAvlSet::with_compare(by_tens);
        let mut b = OSAvlSet::with_compare(by_tens);
        a.extend([11, 25]);
        b.extend([19, 21]);
        assert!(a == b);
        b.insert(30);
        assert!(a != b);
    }

    #[test]
    fn debug_formats_as_set() {
        let set: OSAvlSet<i32, Reversed> = [1, 2].into_iter().collect();
        assert_eq!(alloc::format!("{set:?}"), "{2, 1}");
        assert_eq!(alloc::format!("{:?}", set.iter()), "[2, 1]");
    }

    #[test]
    fn count_is_zero_or_one() {
        let set = OSAvlSet::from([1]);
        assert_eq!(set.count(&1), 1);
        assert_eq!(set.count(&2), 0);
    }

    /// Rank selection needs no comparator bound.
    fn median<T, C>(set: &OSAvlSet<T, C>) -> Option<&T> {
        set.select_by_rank0(set.len() / 2).get()
    }

    #[test]
    fn select_works_for_any_comparator_type() {
        let set = OSAvlSet::from([9, 1, 5, 3, 7]);
        assert_eq!(median(&set), Some(&5));

        let mut reversed: OSAvlSet<i32, Reversed> = OSAvlSet::with_compare(Reversed);
        reversed.extend([1, 2, 3, 4]);
        assert_eq!(median(&reversed), Some(&2));
        assert_eq!(reversed.select_by_rank1(1).get(), Some(&4));
        assert_eq!(reversed.get_by_rank(3), Some(&1));

        let empty: OSAvlSet<i32> = OSAvlSet::new();
        assert_eq!(median(&empty), None);
    }

    #[test]
    fn extend_from_references() {
        let mut set: OSAvlSet<i32> = OSAvlSet::new();
        set.extend(&[3, 1, 3]);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
    }
}
