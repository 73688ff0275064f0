//! Checks whether every root-to-leaf path in a binary tree has the same length.

use std::cmp;

pub type Tree<T> = Option<Box<BinaryNode<T>>>;

/// A node of a plain box-owned binary tree, unrelated to the map structures in this crate.
pub struct BinaryNode<T> {
    pub value: T,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> BinaryNode<T> {
    pub fn new(value: T) -> Self {
        BinaryNode {
            value,
            left: None,
            right: None,
        }
    }
}

fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(node) => cmp::max(height(&node.left), height(&node.right)) + 1,
    }
}

/// Returns `true` if all root-to-leaf paths in the tree have equal length.
///
/// The empty tree trivially qualifies. At the first node with two children the decision is made
/// by comparing the heights of the two subtrees; a node with a single child defers to that
/// child's subtree.
///
/// # Examples
///
/// ```
/// use ordered_collections::equal_paths::{equal_paths, BinaryNode};
///
/// let mut root = Box::new(BinaryNode::new(2));
/// root.left = Some(Box::new(BinaryNode::new(1)));
/// assert!(equal_paths(&Some(root)));
///
/// let mut root = Box::new(BinaryNode::new(2));
/// let mut left = Box::new(BinaryNode::new(1));
/// left.left = Some(Box::new(BinaryNode::new(0)));
/// root.left = Some(left);
/// root.right = Some(Box::new(BinaryNode::new(3)));
/// assert!(!equal_paths(&Some(root)));
/// ```
pub fn equal_paths<T>(tree: &Tree<T>) -> bool {
    match tree {
        None => true,
        Some(node) => {
            if node.left.is_some() && node.right.is_some() {
                height(&node.left) == height(&node.right)
            } else if node.left.is_none() {
                equal_paths(&node.right)
            } else {
                equal_paths(&node.left)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{equal_paths, BinaryNode, Tree};

    fn leaf(value: u32) -> Tree<u32> {
        Some(Box::new(BinaryNode::new(value)))
    }

    fn node(value: u32, left: Tree<u32>, right: Tree<u32>) -> Tree<u32> {
        let mut node = Box::new(BinaryNode::new(value));
        node.left = left;
        node.right = right;
        Some(node)
    }

    #[test]
    fn test_empty() {
        let tree: Tree<u32> = None;
        assert!(equal_paths(&tree));
    }

    #[test]
    fn test_single_node() {
        assert!(equal_paths(&leaf(1)));
    }

    #[test]
    fn test_chain() {
        // a single path is always equal to itself
        let tree = node(3, node(2, leaf(1), None), None);
        assert!(equal_paths(&tree));
    }

    #[test]
    fn test_balanced() {
        let tree = node(2, leaf(1), leaf(3));
        assert!(equal_paths(&tree));
    }

    #[test]
    fn test_unequal() {
        let tree = node(2, node(1, leaf(0), None), leaf(3));
        assert!(!equal_paths(&tree));
    }

    #[test]
    fn test_equal_heights_deep() {
        let tree = node(4, node(2, leaf(1), leaf(3)), node(6, leaf(5), leaf(7)));
        assert!(equal_paths(&tree));
    }
}
