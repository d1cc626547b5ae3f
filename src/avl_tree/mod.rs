//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! Each node stores a balance factor. Inserts and removals reuse the structural operations of the
//! unbalanced tree and then walk back up the tree, correcting factors and rotating where a factor
//! reaches two.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{AvlMap, AvlMapIntoIter, AvlMapIter};
pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
