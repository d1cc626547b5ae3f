//! Binary search tree that places keys by comparison and never restructures itself.
//!
//! The node, tree, and iterator types here are shared with the self-balancing variants, which
//! add their own per-node data and fix-up passes on top of the same structural operations.

pub(crate) mod iter;
mod map;
pub(crate) mod node;
pub(crate) mod tree;

pub use self::map::{BstMap, BstMapIntoIter, BstMapIter};
