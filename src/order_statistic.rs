/// A zero-based rank into the sorted order of a set.
///
/// # Examples
///
/// ```
/// use osavl::{OSAvlSet, Rank};
///
/// let set = OSAvlSet::from([30, 10, 20]);
///
/// assert_eq!(set[Rank(0)], 10);
/// assert_eq!(set[Rank(2)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
