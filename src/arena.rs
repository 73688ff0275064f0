//! Slab allocator with stable index handles.

use std::mem;
use std::ops;

/// A handle to an object allocated in an `Arena<T>`.
///
/// Handles are plain indices and stay valid until the object they refer to is freed; objects
/// never move once allocated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Index {
    index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Index>),
}

/// A vec-backed allocator that only allocates a single type of object.
///
/// Freed slots are kept on an intrusive free list and reused by later allocations, so a
/// long-lived arena does not grow past its high-water mark. Objects are addressed through
/// `Index` handles rather than references, which keeps link-heavy structures (trees with parent
/// pointers) free of aliasing concerns and uses no unsafe code. A stale handle resolves to a
/// vacant slot and is reported by `get`/`get_mut` returning `None` or by `free` panicking; it can
/// never reach freed memory.
///
/// # Examples
///
/// ```
/// use ordered_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    head: Option<Index>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns a handle to it. The handle can later be used
    /// to retrieve mutable and immutable references to the object, and to deallocate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Index {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                Index {
                    index: self.slots.len() - 1,
                }
            }
            Some(entry) => {
                let vacant_slot =
                    mem::replace(&mut self.slots[entry.index], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next_entry) => {
                        self.head = next_entry;
                        entry
                    }
                    Slot::Occupied(_) => panic!("Error: expected a vacant slot."),
                }
            }
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle refers to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, entry: Index) -> T {
        if entry.index >= self.slots.len() {
            panic!("Error: attempting to free an invalid slot.");
        }
        let old_slot = mem::replace(&mut self.slots[entry.index], Slot::Vacant(self.head.take()));
        match old_slot {
            Slot::Vacant(_) => panic!("Error: attempting to free a vacant slot."),
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(entry);
                value
            }
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not refer to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, entry: Index) -> Option<&T> {
        match self.slots.get(entry.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not refer to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, entry: Index) -> Option<&mut T> {
        match self.slots.get_mut(entry.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of objects currently allocated in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena contains no objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the arena, dropping all objects and invalidating all handles.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ops::Index<Index> for Arena<T> {
    type Output = T;

    fn index(&self, entry: Index) -> &Self::Output {
        self.get(entry).expect("Error: handle out of bounds.")
    }
}

impl<T> ops::IndexMut<Index> for Arena<T> {
    fn index_mut(&mut self, entry: Index) -> &mut Self::Output {
        self.get_mut(entry).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    #[should_panic]
    fn test_free_invalid_slot() {
        let mut arena: Arena<u32> = Arena::new();
        let entry = arena.allocate(0);
        arena.free(entry);
        arena.free(entry);
    }

    #[test]
    fn test_allocate_reuses_freed_slot() {
        let mut arena = Arena::new();
        let first = arena.allocate(0);
        let second = arena.allocate(1);
        assert_eq!(arena.free(first), 0);
        assert_eq!(arena.allocate(2), first);
        assert_eq!(arena[first], 2);
        assert_eq!(arena[second], 1);
    }

    #[test]
    fn test_free() {
        let mut arena = Arena::new();
        let entry = arena.allocate(5);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.free(entry), 5);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_get() {
        let mut arena = Arena::new();
        let entry = arena.allocate(0);
        assert_eq!(arena.get(entry), Some(&0));
    }

    #[test]
    fn test_get_vacant_slot() {
        let mut arena = Arena::new();
        let entry = arena.allocate(0);
        arena.free(entry);
        assert_eq!(arena.get(entry), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let entry = arena.allocate(0);
        *arena.get_mut(entry).unwrap() = 1;
        assert_eq!(arena.get(entry), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let entry = arena.allocate(0);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(entry), None);
    }
}
