//! A threaded, order-statistic AVL set for Rust.
//!
//! This crate provides [`OSAvlSet`], an ordered set of unique elements kept in an
//! AVL-balanced binary search tree with two augmentations:
//!
//! - Every node is threaded into a doubly linked list in sorted order, so
//!   [`Cursor`] steps and iteration are O(1) without re-descending the tree.
//! - Every node records the size of its subtree, so selecting the k-th element
//!   and ranking a key are O(log n).
//!
//! Order is given by a [`Compare`] implementation: [`Natural`] (the default, via
//! [`Ord`]), [`Reversed`], or any `Fn(&T, &T) -> bool` "less than" closure.
//!
//! # Example
//!
//! ```
//! use osavl::{OSAvlSet, Rank};
//!
//! let mut set = OSAvlSet::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     set.insert(key);
//! }
//!
//! // Duplicates are rejected.
//! assert!(!set.insert(4));
//! assert_eq!(set.len(), 7);
//!
//! // The 4th smallest element (1-based) and the same by `Rank` (0-based).
//! assert_eq!(set.select_by_rank1(4).get(), Some(&5));
//! assert_eq!(set[Rank(3)], 5);
//!
//! // Four elements are smaller than 6, whether or not 6 is present.
//! assert_eq!(set.rank_of0(&6), 4);
//!
//! // Bounds return cursors that walk the sorted order in both directions.
//! let mut cursor = set.lower_bound(&6);
//! assert_eq!(cursor.get(), Some(&7));
//! cursor.move_prev();
//! assert_eq!(cursor.get(), Some(&5));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - The library only requires `alloc`
//! - **Stable positions** - There is no removal, so a [`Position`] stays valid
//!   across later insertions and rotations
//! - **`tracing`** - Emits rotation and bulk-operation events through the
//!   `tracing` crate
//! - **`cli`** (default) - Builds the `osavl` command-line front end
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index. Each node owns its
//! children through a single slot, and parent and neighbour links are plain
//! indices. The two ends of the threaded list are symbolic sentinels kept by the
//! set itself, so a set can be moved or swapped without touching its nodes.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;
mod tracing_helpers;

pub mod compare;
pub mod osavl_set;

pub use compare::{Compare, Natural, Reversed};
pub use order_statistic::Rank;
pub use osavl_set::{Cursor, OSAvlSet, Position};
