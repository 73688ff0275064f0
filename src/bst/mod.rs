//! Plain binary search tree with parent links. The structural primitives here (search, splice,
//! position swap, in-order walks) are shared with the balanced trees built on top of them.

mod map;
pub(crate) mod node;
pub(crate) mod tree;

pub use self::map::{BstMap, BstMapIntoIter, BstMapIter};
