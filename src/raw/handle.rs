use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Stable index of a node in the arena. Handles never move: rotations rewire
/// links between handles but never relocate the nodes they name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` is non-zero and fits after the bound check.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawHandle).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// A slot in the threaded list: one of the two boundary sentinels or a real node.
///
/// The sentinels are not stored in the arena. The container keeps `rend.next`
/// and `end.prev` itself, so a set can be moved or swapped without re-pointing
/// anything inside the arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Link {
    /// Before the first element.
    Rend,
    Node(Handle),
    /// After the last element.
    End,
}

impl Link {
    /// Returns the node handle.
    ///
    /// # Panics
    ///
    /// Panics if `self` is a sentinel; sentinels have no key, size or balance.
    #[inline]
    #[track_caller]
    pub(crate) fn node(self) -> Handle {
        match self {
            Link::Node(handle) => handle,
            Link::Rend => panic!("`Link::node()` - the `rend` sentinel has no node!"),
            Link::End => panic!("`Link::node()` - the `end` sentinel has no node!"),
        }
    }

    #[inline]
    pub(crate) const fn as_node(self) -> Option<Handle> {
        match self {
            Link::Node(handle) => Some(handle),
            Link::Rend | Link::End => None,
        }
    }
}

impl From<Handle> for Link {
    fn from(handle: Handle) -> Self {
        Link::Node(handle)
    }
}
