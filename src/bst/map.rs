use crate::arena::Index;
use crate::bst::tree::Tree;
use crate::entry::Entry;
use std::borrow::Borrow;
use std::ops;

/// An ordered map implemented using an unbalanced binary search tree.
///
/// The tree keeps no balance information, so operations are O(h) where the height depends on the
/// insertion order and can degrade to O(n). Use
/// [`AvlMap`](../avl_tree/struct.AvlMap.html) when a height guarantee is needed.
///
/// # Examples
///
/// ```
/// use ordered_collections::bst::BstMap;
///
/// let mut map = BstMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct BstMap<T, U> {
    tree: Tree<T, U>,
    len: usize,
}

impl<T, U> BstMap<T, U> {
    /// Constructs a new, empty `BstMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
    /// ```
    pub fn new() -> Self {
        BstMap {
            tree: Tree::new(),
            len: 0,
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will
    /// return and replace the old key-value pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        self.len += 1;
        self.tree.insert(key, value).map(|entry| {
            let Entry { key, value } = entry;
            self.len -= 1;
            (key, value)
        })
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None` and leave the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key).map(|entry| {
            let Entry { key, value } = entry;
            self.len -= 1;
            (key, value)
        })
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .find(key)
            .map(|index| &self.tree.arena[index].entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let index = self.tree.find(key)?;
        Some(&mut self.tree.arena[index].entry.value)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .floor(key)
            .map(|index| &self.tree.arena[index].entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .ceil(key)
            .map(|index| &self.tree.arena[index].entry.key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree
            .first()
            .map(|index| &self.tree.arena[index].entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree
            .last()
            .map(|index| &self.tree.arena[index].entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BstMapIter<'_, T, U> {
        BstMapIter {
            tree: &self.tree,
            next: self.tree.first(),
        }
    }
}

impl<T, U> IntoIterator for BstMap<T, U> {
    type IntoIter = BstMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree.root,
            stack: Vec::new(),
            tree: self.tree,
        }
    }
}

impl<'a, T, U> IntoIterator for &'a BstMap<T, U> {
    type IntoIter = BstMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BstMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct BstMapIntoIter<T, U> {
    tree: Tree<T, U>,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<T, U> Iterator for BstMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.tree.arena[index].left;
        }
        self.stack.pop().map(|index| {
            let node = self.tree.arena.free(index);
            self.current = node.right;
            (node.entry.key, node.entry.value)
        })
    }
}

/// An iterator for `BstMap<T, U>`.
///
/// This iterator walks the parent links to traverse the elements of the map in-order and yields
/// immutable references.
pub struct BstMapIter<'a, T, U> {
    tree: &'a Tree<T, U>,
    next: Option<Index>,
}

impl<'a, T, U> Iterator for BstMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = self.tree.successor(index);
        let entry = &self.tree.arena[index].entry;
        Some((&entry.key, &entry.value))
    }
}

impl<T, U> Default for BstMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> ops::Index<&'a V> for BstMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> ops::IndexMut<&'a V> for BstMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::BstMap;

    #[test]
    fn test_len_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = BstMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_replace() {
        let mut map = BstMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert_eq!(map.insert(1, 3), Some((1, 1)));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_remove_missing() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&2), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_min_max() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_into_iter() {
        let mut map = BstMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = BstMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_iter_degenerate_shape() {
        let mut map = BstMap::new();
        for key in 0..100 {
            map.insert(key, key);
        }

        assert_eq!(
            map.iter().map(|pair| *pair.0).collect::<Vec<u32>>(),
            (0..100).collect::<Vec<u32>>(),
        );
    }
}
