use crate::arena::{Arena, Index};
use crate::bst::node::Node;
use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Which slot of the tree a node occupies: the root slot, or a child slot of its parent.
enum Slot {
    Root,
    Left(Index),
    Right(Index),
}

/// A parent-linked binary search tree backed by an arena of nodes.
///
/// This is the structural core shared by the unbalanced and the AVL maps. It owns the node
/// storage and the root slot and provides the raw primitives the balancing layer is built from:
/// key search, in-order neighbor lookup, attaching a leaf, splicing out a node with at most one
/// child, and exchanging the positions of two nodes. All link rewiring goes through indices, so
/// no operation can leave a reference dangling; a bug would surface as a panic on a vacant arena
/// slot rather than as memory unsafety.
pub struct Tree<T, U> {
    pub arena: Arena<Node<T, U>>,
    pub root: Option<Index>,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Tree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns the node holding `key`, if present.
    pub fn find<V>(&self, key: &V) -> Option<Index>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(index) = curr {
            match key.cmp(self.arena[index].entry.key.borrow()) {
                Ordering::Less => curr = self.arena[index].left,
                Ordering::Greater => curr = self.arena[index].right,
                Ordering::Equal => return Some(index),
            }
        }
        None
    }

    /// Returns the node holding the largest key not greater than `key`, if one exists.
    pub fn floor<V>(&self, key: &V) -> Option<Index>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut result = None;
        while let Some(index) = curr {
            match key.cmp(self.arena[index].entry.key.borrow()) {
                Ordering::Less => curr = self.arena[index].left,
                Ordering::Greater => {
                    result = Some(index);
                    curr = self.arena[index].right;
                }
                Ordering::Equal => return Some(index),
            }
        }
        result
    }

    /// Returns the node holding the smallest key not less than `key`, if one exists.
    pub fn ceil<V>(&self, key: &V) -> Option<Index>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut result = None;
        while let Some(index) = curr {
            match key.cmp(self.arena[index].entry.key.borrow()) {
                Ordering::Less => {
                    result = Some(index);
                    curr = self.arena[index].left;
                }
                Ordering::Greater => curr = self.arena[index].right,
                Ordering::Equal => return Some(index),
            }
        }
        result
    }

    /// Returns the leftmost node of the subtree rooted at `index`.
    pub fn min_in(&self, index: Index) -> Index {
        let mut curr = index;
        while let Some(left) = self.arena[curr].left {
            curr = left;
        }
        curr
    }

    /// Returns the rightmost node of the subtree rooted at `index`.
    pub fn max_in(&self, index: Index) -> Index {
        let mut curr = index;
        while let Some(right) = self.arena[curr].right {
            curr = right;
        }
        curr
    }

    /// Returns the node holding the smallest key in the tree.
    pub fn first(&self) -> Option<Index> {
        self.root.map(|root| self.min_in(root))
    }

    /// Returns the node holding the largest key in the tree.
    pub fn last(&self) -> Option<Index> {
        self.root.map(|root| self.max_in(root))
    }

    /// Returns the in-order predecessor of `index`: the rightmost node of the left subtree, or
    /// the closest ancestor whose right subtree contains `index`.
    pub fn predecessor(&self, index: Index) -> Option<Index> {
        if let Some(left) = self.arena[index].left {
            return Some(self.max_in(left));
        }
        let mut curr = index;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].right == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Returns the in-order successor of `index`.
    pub fn successor(&self, index: Index) -> Option<Index> {
        if let Some(right) = self.arena[index].right {
            return Some(self.min_in(right));
        }
        let mut curr = index;
        while let Some(parent) = self.arena[curr].parent {
            if self.arena[parent].left == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Links `child` into the empty left slot of `parent`.
    pub fn attach_left(&mut self, parent: Index, child: Index) {
        assert!(
            self.arena[parent].left.is_none(),
            "Error: attaching into an occupied left slot."
        );
        self.arena[parent].left = Some(child);
        self.arena[child].parent = Some(parent);
    }

    /// Links `child` into the empty right slot of `parent`.
    pub fn attach_right(&mut self, parent: Index, child: Index) {
        assert!(
            self.arena[parent].right.is_none(),
            "Error: attaching into an occupied right slot."
        );
        self.arena[parent].right = Some(child);
        self.arena[child].parent = Some(parent);
    }

    /// Redirects the slot currently pointing at `old` (a child slot of `parent`, or the root
    /// slot when `parent` is `None`) to `new`, updating `new`'s parent back-link.
    pub fn replace_child(&mut self, parent: Option<Index>, old: Index, new: Option<Index>) {
        match parent {
            Some(p) => {
                if self.arena[p].left == Some(old) {
                    self.arena[p].left = new;
                } else {
                    self.arena[p].right = new;
                }
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    fn slot_of(&self, index: Index) -> Slot {
        match self.arena[index].parent {
            None => Slot::Root,
            Some(parent) => {
                if self.arena[parent].left == Some(index) {
                    Slot::Left(parent)
                } else {
                    Slot::Right(parent)
                }
            }
        }
    }

    fn set_slot(&mut self, slot: Slot, child: Index) {
        match slot {
            Slot::Root => {
                self.root = Some(child);
                self.arena[child].parent = None;
            }
            Slot::Left(parent) => {
                self.arena[parent].left = Some(child);
                self.arena[child].parent = Some(parent);
            }
            Slot::Right(parent) => {
                self.arena[parent].right = Some(child);
                self.arena[child].parent = Some(parent);
            }
        }
    }

    fn set_left(&mut self, index: Index, child: Option<Index>) {
        self.arena[index].left = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(index);
        }
    }

    fn set_right(&mut self, index: Index, child: Option<Index>) {
        self.arena[index].right = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(index);
        }
    }

    /// Exchanges the structural positions of two nodes.
    ///
    /// Each node keeps its own entry; everything that belongs to the position moves — the
    /// parent/child links and the balance factor, which tracks the shape of the slot, not the
    /// key stored in it. The direct parent-child case needs its own wiring since the generic
    /// link exchange would make a node its own parent.
    pub fn swap_positions(&mut self, a: Index, b: Index) {
        if a == b {
            return;
        }
        if self.arena[b].left == Some(a) || self.arena[b].right == Some(a) {
            return self.swap_positions(b, a);
        }

        let a_slot = self.slot_of(a);
        let a_left = self.arena[a].left;
        let a_right = self.arena[a].right;
        let b_slot = self.slot_of(b);
        let b_left = self.arena[b].left;
        let b_right = self.arena[b].right;

        if a_left == Some(b) {
            self.set_slot(a_slot, b);
            self.set_left(b, Some(a));
            self.set_right(b, a_right);
        } else if a_right == Some(b) {
            self.set_slot(a_slot, b);
            self.set_right(b, Some(a));
            self.set_left(b, a_left);
        } else {
            self.set_slot(a_slot, b);
            self.set_slot(b_slot, a);
            self.set_left(b, a_left);
            self.set_right(b, a_right);
        }
        self.set_left(a, b_left);
        self.set_right(a, b_right);

        let balance = self.arena[a].balance;
        self.arena[a].balance = self.arena[b].balance;
        self.arena[b].balance = balance;
    }

    /// Removes a node with at most one child by connecting its parent directly to that child,
    /// then frees the node and returns its entry.
    ///
    /// # Panics
    ///
    /// Panics if the node has two children.
    pub fn splice(&mut self, index: Index) -> Entry<T, U> {
        let parent = self.arena[index].parent;
        let left = self.arena[index].left;
        let right = self.arena[index].right;
        assert!(
            left.is_none() || right.is_none(),
            "Error: splicing a node with two children."
        );
        self.replace_child(parent, index, left.or(right));
        self.arena.free(index).entry
    }

    /// Inserts a key-value pair as a new leaf, or overwrites the value of an existing key.
    /// Returns the displaced entry in the latter case.
    pub fn insert(&mut self, key: T, value: U) -> Option<Entry<T, U>>
    where
        T: Ord,
    {
        let mut curr = match self.root {
            Some(root) => root,
            None => {
                let index = self.arena.allocate(Node::new(key, value, None));
                self.root = Some(index);
                return None;
            }
        };
        loop {
            match key.cmp(&self.arena[curr].entry.key) {
                Ordering::Equal => {
                    let entry = Entry { key, value };
                    return Some(mem::replace(&mut self.arena[curr].entry, entry));
                }
                Ordering::Less => match self.arena[curr].left {
                    Some(left) => curr = left,
                    None => {
                        let index = self.arena.allocate(Node::new(key, value, None));
                        self.attach_left(curr, index);
                        return None;
                    }
                },
                Ordering::Greater => match self.arena[curr].right {
                    Some(right) => curr = right,
                    None => {
                        let index = self.arena.allocate(Node::new(key, value, None));
                        self.attach_right(curr, index);
                        return None;
                    }
                },
            }
        }
    }

    /// Removes the node holding `key`, if present, and returns its entry. A node with two
    /// children first trades positions with its in-order predecessor so that the node actually
    /// spliced out has at most one child.
    pub fn remove<V>(&mut self, key: &V) -> Option<Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let index = self.find(key)?;
        if self.arena[index].left.is_some() && self.arena[index].right.is_some() {
            let predecessor = self
                .predecessor(index)
                .expect("Error: a node with two children must have a predecessor.");
            self.swap_positions(index, predecessor);
        }
        Some(self.splice(index))
    }
}

impl<T, U> Default for Tree<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::arena::Index;

    fn keys_in_order(tree: &Tree<u32, u32>) -> Vec<u32> {
        let mut keys = Vec::new();
        let mut curr = tree.first();
        while let Some(index) = curr {
            keys.push(tree.arena[index].entry.key);
            curr = tree.successor(index);
        }
        keys
    }

    fn assert_links(tree: &Tree<u32, u32>) {
        fn check(tree: &Tree<u32, u32>, index: Index, parent: Option<Index>) {
            assert_eq!(tree.arena[index].parent, parent);
            if let Some(left) = tree.arena[index].left {
                check(tree, left, Some(index));
            }
            if let Some(right) = tree.arena[index].right {
                check(tree, right, Some(index));
            }
        }
        if let Some(root) = tree.root {
            check(tree, root, None);
        }
    }

    fn build(keys: &[u32]) -> Tree<u32, u32> {
        let mut tree = Tree::new();
        for &key in keys {
            tree.insert(key, key);
        }
        tree
    }

    #[test]
    fn test_insert_find() {
        let tree = build(&[4, 2, 6, 1, 3]);
        assert!(tree.find(&3).is_some());
        assert!(tree.find(&5).is_none());
        assert_eq!(keys_in_order(&tree), vec![1, 2, 3, 4, 6]);
        assert_links(&tree);
    }

    #[test]
    fn test_insert_overwrite() {
        let mut tree = build(&[2, 1]);
        let displaced = tree.insert(2, 20).unwrap();
        assert_eq!(displaced.value, 2);
        let index = tree.find(&2).unwrap();
        assert_eq!(tree.arena[index].entry.value, 20);
        assert_eq!(tree.arena.len(), 2);
    }

    #[test]
    fn test_predecessor_successor() {
        let tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        let four = tree.find(&4).unwrap();
        let three = tree.find(&3).unwrap();
        let one = tree.find(&1).unwrap();
        let seven = tree.find(&7).unwrap();
        assert_eq!(tree.predecessor(four), Some(three));
        assert_eq!(tree.successor(three), Some(four));
        assert_eq!(tree.predecessor(one), None);
        assert_eq!(tree.successor(seven), None);
    }

    #[test]
    fn test_floor_ceil() {
        let tree = build(&[10, 5, 15]);
        assert_eq!(tree.floor(&4), None);
        assert_eq!(tree.floor(&12), tree.find(&10));
        assert_eq!(tree.ceil(&12), tree.find(&15));
        assert_eq!(tree.ceil(&16), None);
        assert_eq!(tree.floor(&10), tree.find(&10));
    }

    #[test]
    fn test_splice_leaf() {
        let mut tree = build(&[2, 1, 3]);
        let one = tree.find(&1).unwrap();
        let entry = tree.splice(one);
        assert_eq!(entry.key, 1);
        assert_eq!(keys_in_order(&tree), vec![2, 3]);
        assert_links(&tree);
    }

    #[test]
    fn test_splice_single_child() {
        let mut tree = build(&[3, 1, 2]);
        let one = tree.find(&1).unwrap();
        tree.splice(one);
        assert_eq!(keys_in_order(&tree), vec![2, 3]);
        assert_links(&tree);
    }

    #[test]
    #[should_panic]
    fn test_splice_two_children() {
        let mut tree = build(&[2, 1, 3]);
        let two = tree.find(&2).unwrap();
        tree.splice(two);
    }

    #[test]
    fn test_swap_positions_parent_child() {
        let mut tree = build(&[4, 2, 6, 1, 3]);
        let four = tree.find(&4).unwrap();
        let two = tree.find(&2).unwrap();
        tree.swap_positions(four, two);
        assert_eq!(tree.root, Some(two));
        assert_eq!(tree.arena[two].left, Some(four));
        assert_links(&tree);
        // order is intentionally broken here; only the structure is exchanged
        assert_eq!(keys_in_order(&tree), vec![1, 4, 3, 2, 6]);
    }

    #[test]
    fn test_swap_positions_siblings() {
        let mut tree = build(&[2, 1, 3]);
        let one = tree.find(&1).unwrap();
        let three = tree.find(&3).unwrap();
        tree.swap_positions(one, three);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].left, Some(three));
        assert_eq!(tree.arena[root].right, Some(one));
        assert_links(&tree);
    }

    #[test]
    fn test_swap_positions_distant() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        let four = tree.find(&4).unwrap();
        let three = tree.find(&3).unwrap();
        tree.swap_positions(four, three);
        assert_eq!(tree.root, Some(three));
        let two = tree.arena[three].left.unwrap();
        assert_eq!(tree.arena[two].right, Some(four));
        assert_links(&tree);
    }

    #[test]
    fn test_swap_positions_balances_stay_with_slot() {
        let mut tree = build(&[2, 1]);
        let two = tree.find(&2).unwrap();
        let one = tree.find(&1).unwrap();
        tree.arena[two].balance = 1;
        tree.swap_positions(two, one);
        assert_eq!(tree.arena[one].balance, 1);
        assert_eq!(tree.arena[two].balance, 0);
    }

    #[test]
    fn test_remove_two_children_uses_predecessor() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        let entry = tree.remove(&4).unwrap();
        assert_eq!(entry.key, 4);
        let root = tree.root.unwrap();
        assert_eq!(tree.arena[root].entry.key, 3);
        assert_eq!(keys_in_order(&tree), vec![1, 2, 3, 5, 6, 7]);
        assert_links(&tree);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut tree = build(&[2, 1, 3]);
        assert!(tree.remove(&5).is_none());
        assert_eq!(keys_in_order(&tree), vec![1, 2, 3]);
        assert_eq!(tree.arena.len(), 3);
    }
}
