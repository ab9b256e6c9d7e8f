use core::fmt;
use core::ptr;

use crate::compare::Natural;
use crate::raw::{Link, RawOSAvlSet};

/// A read-only position in an [`OSAvlSet`](crate::OSAvlSet).
///
/// A cursor always sits on an element or on one of two sentinels: the *end*,
/// one past the largest element, and the *reverse end*, one before the
/// smallest. Stepping is O(1) and never re-descends the tree. Stepping forward
/// from the end or backward from the reverse end leaves the cursor in place.
///
/// Cursors are created by [`begin`], [`end`], [`rbegin`], [`rend`], the lookup
/// methods and the select methods of [`OSAvlSet`](crate::OSAvlSet). Two
/// cursors are equal when they sit at the same position of the same set.
///
/// # Examples
///
/// ```
/// use osavl::OSAvlSet;
///
/// let set = OSAvlSet::from([10, 20, 30]);
///
/// let mut cursor = set.rbegin();
/// let mut descending = Vec::new();
/// while let Some(value) = cursor.get() {
///     descending.push(*value);
///     cursor.move_prev();
/// }
/// assert_eq!(descending, [30, 20, 10]);
/// assert_eq!(cursor, set.rend());
/// ```
///
/// [`begin`]: crate::OSAvlSet::begin
/// [`end`]: crate::OSAvlSet::end
/// [`rbegin`]: crate::OSAvlSet::rbegin
/// [`rend`]: crate::OSAvlSet::rend
pub struct Cursor<'a, T, C = Natural> {
    raw: &'a RawOSAvlSet<T, C>,
    link: Link,
}

/// A position in an [`OSAvlSet`](crate::OSAvlSet) that does not borrow the set.
///
/// Obtained from [`Cursor::position`] or [`OSAvlSet::insert_full`] and turned
/// back into a cursor with [`OSAvlSet::cursor_at`]. Elements are never removed
/// individually and never move, so a position keeps naming the same element
/// while more elements are inserted. [`OSAvlSet::clear`] invalidates it.
///
/// [`OSAvlSet::insert_full`]: crate::OSAvlSet::insert_full
/// [`OSAvlSet::cursor_at`]: crate::OSAvlSet::cursor_at
/// [`OSAvlSet::clear`]: crate::OSAvlSet::clear
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    link: Link,
}

impl Position {
    pub(crate) const fn new(link: Link) -> Self {
        Position {
            link,
        }
    }

    pub(crate) const fn link(self) -> Link {
        self.link
    }
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) const fn new(raw: &'a RawOSAvlSet<T, C>, link: Link) -> Self {
        Cursor {
            raw,
            link,
        }
    }

    /// Moves to the next larger element, or to the end after the largest.
    pub fn move_next(&mut self) {
        self.link = self.raw.next(self.link);
    }

    /// Moves to the next smaller element, or to the reverse end before the smallest.
    pub fn move_prev(&mut self) {
        self.link = self.raw.prev(self.link);
    }

    /// Returns the element the cursor sits on, or `None` at a sentinel.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.raw.get(self.link)
    }

    /// Returns the element the cursor sits on.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end or the reverse end.
    ///
    /// # Examples
    ///
    /// ```should_panic
    /// use osavl::OSAvlSet;
    ///
    /// let set = OSAvlSet::from([1]);
    /// let _ = set.end().key();
    /// ```
    #[must_use]
    #[track_caller]
    pub fn key(&self) -> &'a T {
        self.raw.key(self.link)
    }

    /// Returns the element after the cursor without moving it.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        self.raw.get(self.raw.next(self.link))
    }

    /// Returns the element before the cursor without moving it.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a T> {
        self.raw.get(self.raw.prev(self.link))
    }

    /// Returns `true` if the cursor is one past the largest element.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.link == Link::End
    }

    /// Returns `true` if the cursor is one before the smallest element.
    #[must_use]
    pub fn is_rend(&self) -> bool {
        self.link == Link::Rend
    }

    /// Returns a borrow-free token for this position.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl::OSAvlSet;
    ///
    /// let mut set = OSAvlSet::from([1, 5]);
    /// let position = set.find(&5).position();
    /// set.extend([2, 3, 4]);
    /// let mut cursor = set.cursor_at(position);
    /// cursor.move_prev();
    /// assert_eq!(cursor.get(), Some(&4));
    /// ```
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.link)
    }
}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Cursor<'_, T, C> {}

impl<T, C> PartialEq for Cursor<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.raw, other.raw) && self.link == other.link
    }
}

impl<T, C> Eq for Cursor<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.link {
            Link::Rend => f.write_str("Cursor(rend)"),
            Link::End => f.write_str("Cursor(end)"),
            Link::Node(_) => f.debug_tuple("Cursor").field(self.key()).finish(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::OSAvlSet;

    #[test]
    fn stepping_saturates_at_sentinels() {
        let set = OSAvlSet::from([1, 2]);
        let mut cursor = set.end();
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.move_prev();
        assert_eq!(cursor, set.rbegin());

        let mut cursor = set.rend();
        cursor.move_prev();
        assert!(cursor.is_rend());
        assert_eq!(cursor.peek_next(), Some(&1));
        assert_eq!(cursor.peek_prev(), None);
    }

    #[test]
    fn empty_set_sentinels_meet() {
        let set: OSAvlSet<u8> = OSAvlSet::new();
        assert_eq!(set.begin(), set.end());
        assert_eq!(set.rbegin(), set.rend());
        let mut cursor = set.rend();
        cursor.move_next();
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), None);
    }

    #[test]
    fn cursors_of_different_sets_differ() {
        let a = OSAvlSet::from([1]);
        let b = OSAvlSet::from([1]);
        assert_ne!(a.end(), b.end());
        assert_eq!(a.end(), a.end());
    }

    #[test]
    #[should_panic(expected = "`Link::node()` - the `rend` sentinel has no node!")]
    fn key_at_rend_panics() {
        let set = OSAvlSet::from([1]);
        let _ = set.rend().key();
    }

    #[test]
    fn debug_shows_element_or_sentinel() {
        let set = OSAvlSet::from([7]);
        assert_eq!(alloc::format!("{:?}", set.begin()), "Cursor(7)");
        assert_eq!(alloc::format!("{:?}", set.end()), "Cursor(end)");
        assert_eq!(alloc::format!("{:?}", set.rend()), "Cursor(rend)");
    }
}
