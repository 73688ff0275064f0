//! Ordered map and set collections built on a parent-linked binary search tree.
//!
//! The structural core is a binary search tree whose nodes live in an arena and
//! carry non-owning parent links, so splices, position swaps, and rotations are
//! O(1) index rewiring. [`bst::BstMap`](bst/struct.BstMap.html) exposes the tree
//! unbalanced; [`avl_tree::AvlMap`](avl_tree/struct.AvlMap.html) and
//! [`avl_tree::AvlSet`](avl_tree/struct.AvlSet.html) layer AVL balance-factor
//! maintenance on top of the same structural primitives.

mod entry;
pub mod arena;
pub mod avl_tree;
pub mod bst;
pub mod equal_paths;
