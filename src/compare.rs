//! Key ordering for [`OSAvlSet`](crate::OSAvlSet).
//!
//! A set orders its elements with a [`Compare`] implementation: a strict weak
//! order expressed as a single "is less than" predicate. Two elements are
//! *equivalent* when neither is less than the other, and a set never holds
//! two equivalent elements.
//!
//! Any `Fn(&T, &T) -> bool` closure is a comparator, so most custom orders
//! need no new type:
//!
//! ```
//! use osavl::OSAvlSet;
//!
//! // Order strings by length only; equal lengths are equivalent.
//! let mut set = OSAvlSet::with_compare(|a: &&str, b: &&str| a.len() < b.len());
//! assert!(set.insert("pear"));
//! assert!(set.insert("fig"));
//! assert!(!set.insert("plum"));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["fig", "pear"]);
//! ```

/// A strict weak order over `T`.
///
/// `less` must be irreflexive and transitive, and equivalence (neither
/// element less than the other) must be transitive. Violating this is a
/// logic error: the set stays memory safe but its contents and ranks are
/// unspecified.
pub trait Compare<T: ?Sized> {
    /// Returns `true` if `a` is ordered strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if neither element is ordered before the other.
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Orders elements by their [`Ord`] implementation. This is the default.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

/// Orders elements by the reverse of their [`Ord`] implementation.
///
/// ```
/// use osavl::{OSAvlSet, Reversed};
///
/// let set: OSAvlSet<i32, Reversed> = [1, 3, 2].into_iter().collect();
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reversed;

impl<T: ?Sized + Ord> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }

    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized + Ord> Compare<T> for Reversed {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }

    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closure_equivalence() {
        let by_tens = |a: &i32, b: &i32| a / 10 < b / 10;
        assert!(by_tens.less(&5, &15));
        assert!(!by_tens.less(&15, &5));
        assert!(by_tens.equivalent(&11, &19));
        assert!(!by_tens.equivalent(&9, &10));
    }

    #[test]
    fn unsized_natural() {
        assert!(Natural.less("apple", "banana"));
        assert!(Natural.equivalent("kiwi", "kiwi"));
        assert!(Reversed.less("banana", "apple"));
    }

    proptest! {
        #[test]
        fn natural_matches_ord(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Natural.less(&a, &b), a < b);
            prop_assert_eq!(Natural.equivalent(&a, &b), a == b);
            prop_assert_eq!(Reversed.less(&a, &b), b < a);
            prop_assert_eq!(Reversed.equivalent(&a, &b), a == b);
        }
    }
}
