use core::num::NonZero;

use super::handle::Handle;

/// Subtree size of a node. A subtree always contains its own root, so a
/// stored size is never zero; absent children count as zero through
/// [`Size::of`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(NonZero<usize>);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX + 1;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size != 0, "`Size::from_usize()` - `size` == 0!");
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(NonZero::new(size).unwrap())
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get()
    }

    /// Size of an optional subtree.
    #[inline]
    pub(crate) fn of(size: Option<Self>) -> usize {
        size.map_or(0, Self::to_usize)
    }

    /// Size of a subtree with the given children, counting its root.
    #[inline]
    pub(crate) fn from_children(left: Option<Self>, right: Option<Self>) -> Self {
        Self::from_usize(Self::of(left) + Self::of(right) + 1)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn incremented(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, Option<Size>);

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` == 0!")]
    fn zero_size() {
        let _ = Size::from_usize(0);
    }

    #[test]
    fn size_of_children() {
        assert_eq!(Size::from_children(None, None), Size::ONE);
        let three = Size::from_usize(3);
        assert_eq!(Size::from_children(Some(three), None).to_usize(), 4);
        assert_eq!(Size::from_children(Some(three), Some(Size::ONE)).to_usize(), 5);
        assert_eq!(Size::ONE.incremented().to_usize(), 2);
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 1..=Size::MAX) {
            prop_assert_eq!(Size::from_usize(size).to_usize(), size);
        }
    }
}
