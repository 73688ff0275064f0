use crate::arena::Index;
use crate::entry::Entry;

/// A struct representing an internal node of a parent-linked binary search tree.
///
/// Children are owned in the structural sense: every node is referenced by exactly one child
/// slot (or the root slot) and `parent` is a plain non-owning back-link for upward walks. The
/// `balance` field is a slot attribute maintained by the AVL layer; the unbalanced tree leaves
/// it at zero.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
    pub balance: i8,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, parent: Option<Index>) -> Self {
        Node {
            entry: Entry { key, value },
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }
}
