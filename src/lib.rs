//! Ordered maps built on an arena-backed binary search tree.
//!
//! `bst::BstMap` places keys by comparison and never restructures itself. `avl_tree::AvlMap`
//! and `avl_tree::AvlSet` run the same structural operations and then restore the AVL height
//! invariant with rotations.
//!
//! Rotations and removal fix-ups are reported through the `log` facade at `trace` level.

#[macro_use]
extern crate log;
extern crate serde;

mod entry;
mod serialize;
pub mod arena;
pub mod avl_tree;
pub mod bst;
pub mod error;
