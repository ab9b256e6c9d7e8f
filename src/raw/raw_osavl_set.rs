use core::cmp::Ordering::{self, Equal, Greater, Less};
use core::mem;

use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{AvlNode, Side};
use super::size::Size;
use crate::compare::Compare;
use crate::tracing_helpers::{debug_log, trace_log};

/// The threaded AVL tree backing `OSAvlSet`.
pub(crate) struct RawOSAvlSet<K, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<AvlNode<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    compare: C,
    /// `rend.next`: the smallest node, or `End` when empty.
    first: Link,
    /// `end.prev`: the largest node, or `Rend` when empty.
    last: Link,
}

/// Where a key sits relative to the current tree.
enum Descent {
    /// An equivalent key is already stored here.
    Found(Handle),
    /// The key would hang from `parent` on `side`, threaded between `prev` and `next`.
    Vacant {
        parent: Option<Handle>,
        side: Side,
        prev: Link,
        next: Link,
    },
}

/// Corrective transformation for a node whose balance reached +-2.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Rotation {
    Left,
    Right,
    RightLeft,
    LeftRight,
}

/// Work items for the iterative copy.
enum CopyStep {
    /// Visit the left subtree of this source node first.
    Descend(Handle),
    /// The left subtree is copied: create the node, then visit the right subtree.
    Emit(Handle),
    /// Both subtrees are copied: attach the right one.
    Finish {
        source: Handle,
        copy: Handle,
    },
}

type Stack<T> = SmallVec<[T; 64]>;

impl<K, C> RawOSAvlSet<K, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            compare,
            first: Link::End,
            last: Link::Rend,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            compare,
            first: Link::End,
            last: Link::Rend,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) fn len(&self) -> usize {
        Size::of(self.subtree_size(self.root))
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Largest element count the tree can address.
    pub(crate) fn max_size() -> usize {
        let per_node = mem::size_of::<AvlNode<K>>().max(1);
        (isize::MAX.unsigned_abs() / per_node).min(Size::MAX)
    }

    pub(crate) fn compare(&self) -> &C {
        &self.compare
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// `rend.next`.
    pub(crate) fn first(&self) -> Link {
        self.first
    }

    /// `end.prev`.
    pub(crate) fn last(&self) -> Link {
        self.last
    }

    #[cfg(test)]
    pub(crate) fn node(&self, handle: Handle) -> &AvlNode<K> {
        self.nodes.get(handle)
    }

    /// Returns the key stored at `link`.
    ///
    /// # Panics
    ///
    /// Panics if `link` is a sentinel.
    #[track_caller]
    pub(crate) fn key(&self, link: Link) -> &K {
        self.nodes.get(link.node()).key()
    }

    /// Returns the key stored at `link`, or `None` for a sentinel.
    pub(crate) fn get(&self, link: Link) -> Option<&K> {
        link.as_node().map(|handle| self.nodes.get(handle).key())
    }

    /// Successor of `link` in the threaded list. `End` is its own successor.
    pub(crate) fn next(&self, link: Link) -> Link {
        match link {
            Link::Rend => self.first,
            Link::Node(handle) => self.nodes.get(handle).next(),
            Link::End => Link::End,
        }
    }

    /// Predecessor of `link` in the threaded list. `Rend` is its own predecessor.
    pub(crate) fn prev(&self, link: Link) -> Link {
        match link {
            Link::Rend => Link::Rend,
            Link::Node(handle) => self.nodes.get(handle).prev(),
            Link::End => self.last,
        }
    }

    /// Height of the tree, 0 when empty. O(n).
    pub(crate) fn height(&self) -> usize {
        let mut tallest = 0;
        let mut stack: Stack<(Handle, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();
        while let Some((handle, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            let node = self.nodes.get(handle);
            stack.extend(node.left().into_iter().chain(node.right()).map(|child| (child, depth + 1)));
        }
        tallest
    }

    /// Drops every node and re-links the sentinels to each other.
    pub(crate) fn clear(&mut self) {
        debug_log!(len = self.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.first = Link::End;
        self.last = Link::Rend;
    }

    /// Exchanges the contents of two trees, sentinel links included.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.nodes, &mut other.nodes);
        mem::swap(&mut self.root, &mut other.root);
        mem::swap(&mut self.compare, &mut other.compare);
        mem::swap(&mut self.first, &mut other.first);
        mem::swap(&mut self.last, &mut other.last);
    }

    /// Moves the whole tree out, leaving `self` empty with a copy of its comparator.
    pub(crate) fn take(&mut self) -> Self
    where
        C: Clone,
    {
        debug_log!(len = self.len(), "moving tree out");
        let empty = Self::new(self.compare.clone());
        mem::replace(self, empty)
    }

    /// Drains all keys in ascending order by walking the threaded list.
    /// O(n); the arena keeps its allocation.
    pub(crate) fn drain_to_vec(&mut self) -> alloc::vec::Vec<K> {
        let mut order = alloc::vec::Vec::with_capacity(self.len());
        let mut link = self.first;
        while let Link::Node(handle) = link {
            order.push(handle);
            link = self.nodes.get(handle).next();
        }

        let mut slots: alloc::vec::Vec<Option<K>> = self.nodes.drain().map(|node| Some(node.into_key())).collect();
        self.root = None;
        self.first = Link::End;
        self.last = Link::Rend;

        order.into_iter().filter_map(|handle| slots[handle.to_index()].take()).collect()
    }

    fn subtree_size(&self, handle: Option<Handle>) -> Option<Size> {
        handle.map(|handle| self.nodes.get(handle).size())
    }

    /// Rank of a node within its own subtree (1-based), or 1 for an absent node.
    fn own_rank(&self, handle: Option<Handle>) -> usize {
        handle.map_or(1, |handle| Size::of(self.subtree_size(self.nodes.get(handle).left())) + 1)
    }

    fn balance_of(&self, handle: Handle) -> i8 {
        self.nodes.get(handle).balance()
    }

    fn set_next_of(&mut self, link: Link, next: Link) {
        match link {
            Link::Rend => self.first = next,
            Link::Node(handle) => self.nodes.get_mut(handle).set_next(next),
            Link::End => unreachable!("`RawOSAvlSet::set_next_of()` - `end` has no successor!"),
        }
    }

    fn set_prev_of(&mut self, link: Link, prev: Link) {
        match link {
            Link::End => self.last = prev,
            Link::Node(handle) => self.nodes.get_mut(handle).set_prev(prev),
            Link::Rend => unreachable!("`RawOSAvlSet::set_prev_of()` - `rend` has no predecessor!"),
        }
    }

    /// Makes `right` the successor of `left` in the threaded list.
    fn link_between(&mut self, left: Link, right: Link) {
        self.set_next_of(left, right);
        self.set_prev_of(right, left);
    }

    fn adopt(&mut self, parent: Handle, side: Side, child: Handle) {
        self.nodes.get_mut(parent).set_child(side, Some(child));
        self.nodes.get_mut(child).set_parent(Some(parent));
    }

    /// Points whatever owned `old` (its parent's slot, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Handle) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let node = self.nodes.get_mut(parent);
                if node.left() == Some(old) {
                    node.set_child(Side::Left, Some(new));
                } else {
                    debug_assert_eq!(node.right(), Some(old), "`old` is not a child of `parent`");
                    node.set_child(Side::Right, Some(new));
                }
            }
        }
        self.nodes.get_mut(new).set_parent(parent);
    }

    fn refresh_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = Size::from_children(self.subtree_size(node.left()), self.subtree_size(node.right()));
        self.nodes.get_mut(handle).set_size(size);
    }

    fn increment_sizes_from(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            node.set_size(node.size().incremented());
            current = node.parent();
        }
    }

    /// Rotates the subtree rooted at `node` to the left and returns its new root.
    /// Sizes are refreshed; balances are the caller's job.
    fn rotate_left(&mut self, node: Handle) -> Handle {
        let pivot = self.nodes.get(node).right().expect("`RawOSAvlSet::rotate_left()` - no right child!");
        let middle = self.nodes.get(pivot).left();
        let parent = self.nodes.get(node).parent();

        self.replace_child(parent, node, pivot);
        self.nodes.get_mut(node).set_child(Side::Right, middle);
        if let Some(middle) = middle {
            self.nodes.get_mut(middle).set_parent(Some(node));
        }
        self.adopt(pivot, Side::Left, node);

        self.refresh_size(node);
        self.refresh_size(pivot);
        pivot
    }

    /// Mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, node: Handle) -> Handle {
        let pivot = self.nodes.get(node).left().expect("`RawOSAvlSet::rotate_right()` - no left child!");
        let middle = self.nodes.get(pivot).right();
        let parent = self.nodes.get(node).parent();

        self.replace_child(parent, node, pivot);
        self.nodes.get_mut(node).set_child(Side::Left, middle);
        if let Some(middle) = middle {
            self.nodes.get_mut(middle).set_parent(Some(node));
        }
        self.adopt(pivot, Side::Right, node);

        self.refresh_size(node);
        self.refresh_size(pivot);
        pivot
    }

    fn rotation_for(&self, handle: Handle) -> Rotation {
        let node = self.nodes.get(handle);
        match node.balance() {
            -2 => {
                let right = node.right().expect("`RawOSAvlSet::rotation_for()` - right-heavy node has no right child!");
                if self.balance_of(right) == 1 { Rotation::RightLeft } else { Rotation::Left }
            }
            2 => {
                let left = node.left().expect("`RawOSAvlSet::rotation_for()` - left-heavy node has no left child!");
                if self.balance_of(left) == -1 { Rotation::LeftRight } else { Rotation::Right }
            }
            balance => unreachable!("`RawOSAvlSet::rotation_for()` - balance {balance} needs no rotation!"),
        }
    }

    /// Applies `rotation` at `handle`, assigns post-rotation balances from the
    /// pre-rotation ones and returns the node now rooting the subtree.
    fn rotate(&mut self, handle: Handle, rotation: Rotation) -> Handle {
        trace_log!(?rotation, index = handle.to_index(), "rotating");
        match rotation {
            Rotation::Left => {
                let pivot = self.nodes.get(handle).right().expect("`RawOSAvlSet::rotate()` - no right child!");
                let (lower, upper) = match self.balance_of(pivot) {
                    -1 => (0, 0),
                    0 => (-1, 1),
                    balance => unreachable!("`RawOSAvlSet::rotate()` - left rotation with pivot balance {balance}!"),
                };
                let top = self.rotate_left(handle);
                self.nodes.get_mut(handle).set_balance(lower);
                self.nodes.get_mut(top).set_balance(upper);
                top
            }
            Rotation::Right => {
                let pivot = self.nodes.get(handle).left().expect("`RawOSAvlSet::rotate()` - no left child!");
                let (lower, upper) = match self.balance_of(pivot) {
                    1 => (0, 0),
                    0 => (1, -1),
                    balance => unreachable!("`RawOSAvlSet::rotate()` - right rotation with pivot balance {balance}!"),
                };
                let top = self.rotate_right(handle);
                self.nodes.get_mut(handle).set_balance(lower);
                self.nodes.get_mut(top).set_balance(upper);
                top
            }
            Rotation::RightLeft => {
                let right = self.nodes.get(handle).right().expect("`RawOSAvlSet::rotate()` - no right child!");
                let middle = self.nodes.get(right).left().expect("`RawOSAvlSet::rotate()` - no inner grandchild!");
                // (node, right) balances keyed by the inner grandchild.
                let (node_balance, right_balance) = match self.balance_of(middle) {
                    1 => (0, -1),
                    -1 => (1, 0),
                    0 => (0, 0),
                    balance => unreachable!("`RawOSAvlSet::rotate()` - inner grandchild balance {balance}!"),
                };
                self.rotate_right(right);
                let top = self.rotate_left(handle);
                debug_assert_eq!(top, middle);
                self.nodes.get_mut(handle).set_balance(node_balance);
                self.nodes.get_mut(right).set_balance(right_balance);
                self.nodes.get_mut(top).set_balance(0);
                top
            }
            Rotation::LeftRight => {
                let left = self.nodes.get(handle).left().expect("`RawOSAvlSet::rotate()` - no left child!");
                let middle = self.nodes.get(left).right().expect("`RawOSAvlSet::rotate()` - no inner grandchild!");
                let (node_balance, left_balance) = match self.balance_of(middle) {
                    -1 => (0, 1),
                    1 => (-1, 0),
                    0 => (0, 0),
                    balance => unreachable!("`RawOSAvlSet::rotate()` - inner grandchild balance {balance}!"),
                };
                self.rotate_left(left);
                let top = self.rotate_right(handle);
                debug_assert_eq!(top, middle);
                self.nodes.get_mut(handle).set_balance(node_balance);
                self.nodes.get_mut(left).set_balance(left_balance);
                self.nodes.get_mut(top).set_balance(0);
                top
            }
        }
    }

    /// Walks from a freshly attached leaf towards the root, updating balances
    /// and rotating at the first node that reaches +-2.
    fn rebalance_after_insert(&mut self, inserted: Handle) {
        let mut child = inserted;
        let mut current = self.nodes.get(inserted).parent();

        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            let balance = if node.child(Side::Left) == Some(child) {
                node.balance() + 1
            } else {
                debug_assert_eq!(node.right(), Some(child));
                node.balance() - 1
            };
            node.set_balance(balance);

            match balance {
                // Subtree height unchanged; nothing above can be affected.
                0 => return,
                1 | -1 => {
                    child = handle;
                    current = node.parent();
                }
                _ => {
                    let rotation = self.rotation_for(handle);
                    let top = self.rotate(handle, rotation);
                    let top_node = self.nodes.get(top);
                    if top_node.balance() == 0 {
                        return;
                    }
                    child = top;
                    current = top_node.parent();
                }
            }
        }
    }

    /// Node at 1-based `rank`, or `None` when `rank` is 0 or exceeds the length.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            let own = self.own_rank(Some(current));
            match remaining.cmp(&own) {
                Equal => return Some(current),
                Less => {
                    current = node.left().expect("`RawOSAvlSet::select()` - size invariant violated!");
                }
                Greater => {
                    remaining -= own;
                    current = node.right().expect("`RawOSAvlSet::select()` - size invariant violated!");
                }
            }
        }
    }
}

impl<K, C: Compare<K>> RawOSAvlSet<K, C> {
    #[inline]
    fn order(&self, key: &K, other: &K) -> Ordering {
        if self.compare.less(key, other) {
            Less
        } else if self.compare.less(other, key) {
            Greater
        } else {
            Equal
        }
    }

    fn descend(&self, key: &K) -> Descent {
        let mut current = self.root;
        let mut parent = None;
        let mut side = Side::Left;
        let mut prev = Link::Rend;
        let mut next = Link::End;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            parent = Some(handle);
            match self.order(key, node.key()) {
                Equal => return Descent::Found(handle),
                Less => {
                    side = Side::Left;
                    next = Link::Node(handle);
                    current = node.left();
                }
                Greater => {
                    side = Side::Right;
                    prev = Link::Node(handle);
                    current = node.right();
                }
            }
        }

        Descent::Vacant {
            parent,
            side,
            prev,
            next,
        }
    }

    /// Searches for a node holding a key equivalent to `key`.
    pub(crate) fn find(&self, key: &K) -> Option<Handle> {
        match self.descend(key) {
            Descent::Found(handle) => Some(handle),
            Descent::Vacant {
                ..
            } => None,
        }
    }

    /// First node whose key is not ordered before `key`, or `End`.
    pub(crate) fn lower_bound(&self, key: &K) -> Link {
        let mut current = self.root;
        let mut best = Link::End;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.order(key, node.key()) {
                Equal => return Link::Node(handle),
                Less => {
                    best = Link::Node(handle);
                    current = node.left();
                }
                Greater => current = node.right(),
            }
        }
        best
    }

    /// First node whose key is ordered after `key`, or `End`.
    pub(crate) fn upper_bound(&self, key: &K) -> Link {
        match self.lower_bound(key) {
            Link::Node(handle) if self.compare.equivalent(self.nodes.get(handle).key(), key) => {
                self.nodes.get(handle).next()
            }
            bound => bound,
        }
    }

    /// Inserts `key` unless an equivalent key is present.
    /// Returns the node holding the key and whether it was inserted.
    pub(crate) fn insert(&mut self, key: K) -> (Handle, bool) {
        let (parent, side, prev, next) = match self.descend(&key) {
            Descent::Found(handle) => return (handle, false),
            Descent::Vacant {
                parent,
                side,
                prev,
                next,
            } => (parent, side, prev, next),
        };

        let handle = self.nodes.alloc(AvlNode::new_leaf(key, parent, prev, next));
        self.link_between(prev, Link::Node(handle));
        self.link_between(Link::Node(handle), next);

        match parent {
            None => self.root = Some(handle),
            Some(parent) => {
                self.nodes.get_mut(parent).set_child(side, Some(handle));
                self.increment_sizes_from(Some(parent));
                self.rebalance_after_insert(handle);
            }
        }
        debug_assert_eq!(self.nodes.len(), self.len());
        (handle, true)
    }

    /// 1-based position `key` has, or would have once inserted: one more than
    /// the number of keys ordered before it.
    pub(crate) fn rank(&self, key: &K) -> usize {
        let mut current = self.root;
        let mut rank = self.own_rank(current);

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.order(key, node.key()) {
                Equal => return rank,
                Less => {
                    let own = self.own_rank(current);
                    current = node.left();
                    rank = rank - own + self.own_rank(current);
                }
                Greater => {
                    current = node.right();
                    rank += self.own_rank(current);
                }
            }
        }
        rank
    }
}

impl<K: Clone, C> RawOSAvlSet<K, C> {
    /// Copies `source`'s shape, sizes, balances and thread into this empty
    /// tree in one in-order pass, without recursion.
    fn copy_tree_from(&mut self, source: &Self) {
        debug_assert!(self.nodes.is_empty(), "`RawOSAvlSet::copy_tree_from()` - destination is not empty!");
        let Some(root) = source.root else {
            return;
        };
        debug_log!(len = source.len(), "copying tree");

        let mut steps: Stack<CopyStep> = smallvec![CopyStep::Descend(root)];
        // Roots of finished destination subtrees waiting for their parent.
        let mut built: Stack<Handle> = SmallVec::new();
        let mut prev = Link::Rend;

        while let Some(step) = steps.pop() {
            match step {
                CopyStep::Descend(handle) => {
                    steps.push(CopyStep::Emit(handle));
                    if let Some(left) = source.nodes.get(handle).left() {
                        steps.push(CopyStep::Descend(left));
                    }
                }
                CopyStep::Emit(handle) => {
                    let original = source.nodes.get(handle);
                    let copy =
                        self.nodes.alloc(AvlNode::with_shape(original.key().clone(), original.size(), original.balance()));
                    self.link_between(prev, Link::Node(copy));
                    prev = Link::Node(copy);

                    if original.left().is_some() {
                        let left = built.pop().expect("`RawOSAvlSet::copy_tree_from()` - left subtree missing!");
                        self.adopt(copy, Side::Left, left);
                    }
                    steps.push(CopyStep::Finish {
                        source: handle,
                        copy,
                    });
                    if let Some(right) = original.right() {
                        steps.push(CopyStep::Descend(right));
                    }
                }
                CopyStep::Finish {
                    source: handle,
                    copy,
                } => {
                    if source.nodes.get(handle).right().is_some() {
                        let right = built.pop().expect("`RawOSAvlSet::copy_tree_from()` - right subtree missing!");
                        self.adopt(copy, Side::Right, right);
                    }
                    built.push(copy);
                }
            }
        }

        self.link_between(prev, Link::End);
        self.root = built.pop();
        debug_assert!(built.is_empty());
    }
}

impl<K: Clone, C: Clone> Clone for RawOSAvlSet<K, C> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len(), self.compare.clone());
        copy.copy_tree_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.nodes.reserve(source.len());
        self.compare = source.compare.clone();
        self.copy_tree_from(source);
    }
}
