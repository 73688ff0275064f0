use crate::arena::Index;
use crate::bst::node::Node;
use crate::bst::tree::Tree;
use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

// Balance convention: `balance == height(left) - height(right)` with `height(nil) == -1`, kept
// in {-1, 0, +1} and maintained incrementally. Heights are never recomputed; every update is a
// +-1 adjustment or an explicit assignment from the rebalancing case analysis below.

/// Inserts a key-value pair as a new leaf and restores the balance invariant, or overwrites the
/// value of an existing key without any structural change. Returns the displaced entry in the
/// latter case.
pub fn insert<T, U>(tree: &mut Tree<T, U>, key: T, value: U) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let mut curr = match tree.root {
        Some(root) => root,
        None => {
            let index = tree.arena.allocate(Node::new(key, value, None));
            tree.root = Some(index);
            return None;
        }
    };
    loop {
        match key.cmp(&tree.arena[curr].entry.key) {
            Ordering::Equal => {
                let entry = Entry { key, value };
                return Some(mem::replace(&mut tree.arena[curr].entry, entry));
            }
            Ordering::Less => match tree.arena[curr].left {
                Some(left) => curr = left,
                None => {
                    let index = tree.arena.allocate(Node::new(key, value, None));
                    tree.attach_left(curr, index);
                    if tree.arena[curr].balance == 0 {
                        tree.arena[curr].balance = 1;
                        insert_fix(tree, curr, index);
                    } else {
                        // the new leaf filled the shorter side; the subtree height is unchanged
                        tree.arena[curr].balance = 0;
                    }
                    return None;
                }
            },
            Ordering::Greater => match tree.arena[curr].right {
                Some(right) => curr = right,
                None => {
                    let index = tree.arena.allocate(Node::new(key, value, None));
                    tree.attach_right(curr, index);
                    if tree.arena[curr].balance == 0 {
                        tree.arena[curr].balance = -1;
                        insert_fix(tree, curr, index);
                    } else {
                        tree.arena[curr].balance = 0;
                    }
                    return None;
                }
            },
        }
    }
}

/// Walks from `p` (whose subtree just grew taller on the side of `n`) toward the root, updating
/// balance factors. At most one rotation event (single or double) happens per insertion; after a
/// rotation the subtree height matches its pre-insertion value and the walk stops.
fn insert_fix<T, U>(tree: &mut Tree<T, U>, p: Index, n: Index) {
    let mut p = p;
    let mut n = n;
    while let Some(g) = tree.arena[p].parent {
        if tree.arena[g].left == Some(p) {
            tree.arena[g].balance += 1;
            match tree.arena[g].balance {
                0 => return,
                1 => {
                    n = p;
                    p = g;
                }
                _ => {
                    if tree.arena[p].left == Some(n) {
                        // zig-zig: one rotation levels all three
                        rotate_right(tree, g, p);
                        tree.arena[p].balance = 0;
                        tree.arena[g].balance = 0;
                    } else {
                        // zig-zag: bring n to the top; the leftovers depend on which side of n
                        // the new leaf went
                        rotate_left(tree, p, n);
                        rotate_right(tree, g, n);
                        match tree.arena[n].balance {
                            1 => {
                                tree.arena[p].balance = 0;
                                tree.arena[g].balance = -1;
                            }
                            0 => {
                                tree.arena[p].balance = 0;
                                tree.arena[g].balance = 0;
                            }
                            _ => {
                                tree.arena[p].balance = 1;
                                tree.arena[g].balance = 0;
                            }
                        }
                        tree.arena[n].balance = 0;
                    }
                    return;
                }
            }
        } else {
            tree.arena[g].balance -= 1;
            match tree.arena[g].balance {
                0 => return,
                -1 => {
                    n = p;
                    p = g;
                }
                _ => {
                    if tree.arena[p].right == Some(n) {
                        rotate_left(tree, g, p);
                        tree.arena[p].balance = 0;
                        tree.arena[g].balance = 0;
                    } else {
                        rotate_right(tree, p, n);
                        rotate_left(tree, g, n);
                        match tree.arena[n].balance {
                            -1 => {
                                tree.arena[p].balance = 0;
                                tree.arena[g].balance = 1;
                            }
                            0 => {
                                tree.arena[p].balance = 0;
                                tree.arena[g].balance = 0;
                            }
                            _ => {
                                tree.arena[p].balance = -1;
                                tree.arena[g].balance = 0;
                            }
                        }
                        tree.arena[n].balance = 0;
                    }
                    return;
                }
            }
        }
    }
}

/// Removes the node holding `key`, if present, restores the balance invariant, and returns the
/// entry. Removing an absent key leaves the tree untouched.
pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let index = tree.find(key)?;
    if tree.arena[index].left.is_some() && tree.arena[index].right.is_some() {
        // trade places with the in-order predecessor so the spliced node has at most one child;
        // balance factors travel with the positions, not the keys
        let predecessor = tree
            .predecessor(index)
            .expect("Error: a node with two children must have a predecessor.");
        tree.swap_positions(index, predecessor);
    }

    let parent = tree.arena[index].parent;
    let diff = match parent {
        Some(p) if tree.arena[p].left == Some(index) => -1,
        Some(_) => 1,
        None => 0,
    };
    let entry = tree.splice(index);
    if let Some(p) = parent {
        remove_fix(tree, p, diff);
    }
    Some(entry)
}

/// Walks from the spliced-out node's former parent toward the root. `diff` is the height-change
/// signal for the current node: the adjustment its balance factor takes from the shrunken side.
/// Unlike insertion, a rotation may be needed at every level on the way up.
fn remove_fix<T, U>(tree: &mut Tree<T, U>, n: Index, diff: i8) {
    let mut n = n;
    let mut diff = diff;
    loop {
        // capture the next level's signal before this one is rewired
        let parent = tree.arena[n].parent;
        let ndiff = match parent {
            Some(p) if tree.arena[p].left == Some(n) => -1,
            Some(_) => 1,
            None => 0,
        };

        match tree.arena[n].balance + diff {
            2 => {
                let c = tree.arena[n]
                    .left
                    .expect("Error: a left-heavy node must have a left child.");
                match tree.arena[c].balance {
                    1 => {
                        rotate_right(tree, n, c);
                        tree.arena[n].balance = 0;
                        tree.arena[c].balance = 0;
                    }
                    0 => {
                        // the subtree height did not change; nothing above can be affected
                        rotate_right(tree, n, c);
                        tree.arena[n].balance = 1;
                        tree.arena[c].balance = -1;
                        return;
                    }
                    _ => {
                        let g = tree.arena[c]
                            .right
                            .expect("Error: a right-leaning child must have a right child.");
                        let g_balance = tree.arena[g].balance;
                        rotate_left(tree, c, g);
                        rotate_right(tree, n, g);
                        match g_balance {
                            -1 => {
                                tree.arena[n].balance = 0;
                                tree.arena[c].balance = 1;
                            }
                            0 => {
                                tree.arena[n].balance = 0;
                                tree.arena[c].balance = 0;
                            }
                            _ => {
                                tree.arena[n].balance = -1;
                                tree.arena[c].balance = 0;
                            }
                        }
                        tree.arena[g].balance = 0;
                    }
                }
            }
            -2 => {
                let c = tree.arena[n]
                    .right
                    .expect("Error: a right-heavy node must have a right child.");
                match tree.arena[c].balance {
                    -1 => {
                        rotate_left(tree, n, c);
                        tree.arena[n].balance = 0;
                        tree.arena[c].balance = 0;
                    }
                    0 => {
                        rotate_left(tree, n, c);
                        tree.arena[n].balance = -1;
                        tree.arena[c].balance = 1;
                        return;
                    }
                    _ => {
                        let g = tree.arena[c]
                            .left
                            .expect("Error: a left-leaning child must have a left child.");
                        let g_balance = tree.arena[g].balance;
                        rotate_right(tree, c, g);
                        rotate_left(tree, n, g);
                        match g_balance {
                            1 => {
                                tree.arena[n].balance = 0;
                                tree.arena[c].balance = -1;
                            }
                            0 => {
                                tree.arena[n].balance = 0;
                                tree.arena[c].balance = 0;
                            }
                            _ => {
                                tree.arena[n].balance = 1;
                                tree.arena[c].balance = 0;
                            }
                        }
                        tree.arena[g].balance = 0;
                    }
                }
            }
            0 => {
                // this subtree shrank by one; the change is visible to the parent
                tree.arena[n].balance = 0;
            }
            balance => {
                // +-1: the shrink is absorbed here and the subtree height is unchanged
                tree.arena[n].balance = balance;
                return;
            }
        }

        match parent {
            Some(p) => {
                n = p;
                diff = ndiff;
            }
            None => return,
        }
    }
}

/// Rotates `p` over its parent `g` to the left: `p` takes `g`'s slot, `g` becomes `p`'s left
/// child, and `p`'s former left subtree becomes `g`'s right subtree. Balance factors are not
/// touched; callers set them from the case analysis.
pub fn rotate_left<T, U>(tree: &mut Tree<T, U>, g: Index, p: Index) {
    #[cfg(test)]
    rotations::record();
    assert_eq!(
        tree.arena[g].right,
        Some(p),
        "Error: rotating left over a node that is not the right child."
    );
    let parent = tree.arena[g].parent;
    tree.replace_child(parent, g, Some(p));
    let inner = tree.arena[p].left;
    tree.arena[g].right = inner;
    if let Some(inner) = inner {
        tree.arena[inner].parent = Some(g);
    }
    tree.arena[p].left = Some(g);
    tree.arena[g].parent = Some(p);
}

/// Mirror image of [`rotate_left`].
pub fn rotate_right<T, U>(tree: &mut Tree<T, U>, g: Index, p: Index) {
    #[cfg(test)]
    rotations::record();
    assert_eq!(
        tree.arena[g].left,
        Some(p),
        "Error: rotating right over a node that is not the left child."
    );
    let parent = tree.arena[g].parent;
    tree.replace_child(parent, g, Some(p));
    let inner = tree.arena[p].right;
    tree.arena[g].left = inner;
    if let Some(inner) = inner {
        tree.arena[inner].parent = Some(g);
    }
    tree.arena[p].right = Some(g);
    tree.arena[g].parent = Some(p);
}

// per-thread tally of rotation primitives, so tests can hold the engine to its
// rebalancing cost bounds
#[cfg(test)]
mod rotations {
    use std::cell::Cell;

    thread_local! {
        static COUNT: Cell<u64> = Cell::new(0);
    }

    pub fn record() {
        COUNT.with(|count| count.set(count.get() + 1));
    }

    pub fn count() -> u64 {
        COUNT.with(|count| count.get())
    }
}
