//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one. Balance is tracked with per-node balance factors maintained
//! incrementally on the way up from every structural edit; an insertion performs at most one
//! rotation event and a removal at most one per ancestor level.

mod map;
mod set;
mod tree;

pub use self::map::{AvlMap, AvlMapIntoIter, AvlMapIter};
pub use self::set::{AvlSet, AvlSetIntoIter, AvlSetIter};
