use super::handle::{Handle, Link};
use super::size::Size;

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A tree node. The parent's child slot is the only owning reference to a
/// node; `parent`, `prev` and `next` are plain links with no ownership.
pub(crate) struct AvlNode<K> {
    key: K,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    // In-order neighbours in the threaded list, a sentinel at the extremes.
    prev: Link,
    next: Link,
    // Number of nodes in the subtree rooted here, including this one.
    size: Size,
    // height(left) - height(right); +-2 only while a rotation is pending.
    balance: i8,
}

impl<K> AvlNode<K> {
    /// Creates a detached leaf threaded between `prev` and `next`.
    pub(crate) fn new_leaf(key: K, parent: Option<Handle>, prev: Link, next: Link) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
            prev,
            next,
            size: Size::ONE,
            balance: 0,
        }
    }

    /// Creates an unlinked node carrying a copied size and balance.
    pub(crate) fn with_shape(key: K, size: Size, balance: i8) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent: None,
            prev: Link::Rend,
            next: Link::End,
            size,
            balance,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn prev(&self) -> Link {
        self.prev
    }

    pub(crate) fn set_prev(&mut self, prev: Link) {
        self.prev = prev;
    }

    #[inline]
    pub(crate) fn next(&self) -> Link {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Link) {
        self.next = next;
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub(crate) fn balance(&self) -> i8 {
        self.balance
    }

    pub(crate) fn set_balance(&mut self, balance: i8) {
        debug_assert!((-2..=2).contains(&balance), "balance {balance} out of range");
        self.balance = balance;
    }
}
