//! Hashed doubly linked list of keys.
//!
//! [`OrderedKeyIndex`] keeps a set of keys in an explicit order and supports
//! O(1) membership tests, O(1) moves to either end and O(1) pops from either
//! end. List nodes live in a vector-backed slot pool and link to each other by
//! slot index; a hash map resolves a key to its slot.

use std::hash::Hash;

use rustc_hash::FxHashMap;

type SlotId = usize;

/// One pooled list node. `key` is `None` while the slot sits on the free list.
#[derive(Debug)]
struct Slot<K> {
    key: Option<K>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Ordered set of keys with O(1) reordering.
///
/// The front of the list is the most recently pushed-to-front key.
#[derive(Debug)]
pub struct OrderedKeyIndex<K> {
    slots: Vec<Slot<K>>,
    free: Vec<SlotId>,
    lookup: FxHashMap<K, SlotId>,
    front: Option<SlotId>,
    back: Option<SlotId>,
    /// Slots handed out over the lifetime of the index.
    acquired: usize,
    /// Slots returned to the pool over the lifetime of the index.
    released: usize,
}

impl<K> OrderedKeyIndex<K> {
    /// Number of keys in the index.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns `true` if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

impl<K: Eq + Hash + Clone> OrderedKeyIndex<K> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            lookup: FxHashMap::default(),
            front: None,
            back: None,
            acquired: 0,
            released: 0,
        }
    }

    /// Creates an empty index with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = Self::new();
        index.slots.reserve(capacity);
        index.lookup.reserve(capacity);
        index
    }

    /// Returns `true` if `key` is in the index.
    pub fn contains(&self, key: &K) -> bool {
        self.lookup.contains_key(key)
    }

    /// The key at the front of the list.
    pub fn front(&self) -> Option<&K> {
        self.front.and_then(|id| self.slots[id].key.as_ref())
    }

    /// The key at the back of the list.
    pub fn back(&self) -> Option<&K> {
        self.back.and_then(|id| self.slots[id].key.as_ref())
    }

    /// Moves `key` to the front, inserting it if absent.
    pub fn push_front(&mut self, key: K) {
        let id = match self.lookup.get(&key) {
            Some(&id) => {
                if self.front == Some(id) {
                    return;
                }
                self.unlink(id);
                id
            }
            None => self.insert_detached(key),
        };
        self.link_front(id);
    }

    /// Moves `key` to the back, inserting it if absent.
    pub fn push_back(&mut self, key: K) {
        let id = match self.lookup.get(&key) {
            Some(&id) => {
                if self.back == Some(id) {
                    return;
                }
                self.unlink(id);
                id
            }
            None => self.insert_detached(key),
        };
        self.link_back(id);
    }

    /// Removes and returns the front key.
    pub fn pop_front(&mut self) -> Option<K> {
        let id = self.front?;
        Some(self.remove_slot(id))
    }

    /// Removes and returns the back key.
    pub fn pop_back(&mut self) -> Option<K> {
        let id = self.back?;
        Some(self.remove_slot(id))
    }

    /// Removes `key` wherever it sits. Returns `false` if it was absent.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.lookup.get(key) {
            Some(&id) => {
                self.remove_slot(id);
                true
            }
            None => false,
        }
    }

    /// Removes every key, returning all slots to the pool.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Iterates keys from front to back. Reverse with `.rev()`.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            slots: &self.slots,
            head: self.front,
            tail: self.back,
            remaining: self.len(),
        }
    }

    fn insert_detached(&mut self, key: K) -> SlotId {
        let id = self.acquire(key.clone());
        self.lookup.insert(key, id);
        id
    }

    fn acquire(&mut self, key: K) -> SlotId {
        self.acquired += 1;
        match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id];
                debug_assert!(slot.key.is_none(), "free slot {id} still holds a key");
                slot.key = Some(key);
                id
            }
            None => {
                self.slots.push(Slot {
                    key: Some(key),
                    prev: None,
                    next: None,
                });
                self.slots.len() - 1
            }
        }
    }

    fn remove_slot(&mut self, id: SlotId) -> K {
        self.unlink(id);
        let key = self.slots[id]
            .key
            .take()
            .expect("linked slot must hold a key");
        self.lookup.remove(&key);
        self.free.push(id);
        self.released += 1;
        key
    }

    fn unlink(&mut self, id: SlotId) {
        let Slot { prev, next, .. } = self.slots[id];
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.front = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.back = prev,
        }
        let slot = &mut self.slots[id];
        slot.prev = None;
        slot.next = None;
    }

    fn link_front(&mut self, id: SlotId) {
        self.slots[id].prev = None;
        self.slots[id].next = self.front;
        match self.front {
            Some(f) => self.slots[f].prev = Some(id),
            None => self.back = Some(id),
        }
        self.front = Some(id);
    }

    fn link_back(&mut self, id: SlotId) {
        self.slots[id].next = None;
        self.slots[id].prev = self.back;
        match self.back {
            Some(b) => self.slots[b].next = Some(id),
            None => self.front = Some(id),
        }
        self.back = Some(id);
    }
}

impl<K: Eq + Hash + Clone> Default for OrderedKeyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for OrderedKeyIndex<K> {
    fn drop(&mut self) {
        // Walk the list once, releasing each linked slot.
        let mut cursor = self.front.take();
        let mut walked = 0usize;
        while let Some(id) = cursor {
            let slot = &mut self.slots[id];
            cursor = slot.next.take();
            slot.prev = None;
            if slot.key.take().is_some() {
                self.released += 1;
            }
            walked += 1;
        }
        self.back = None;

        debug_assert_eq!(
            walked,
            self.lookup.len(),
            "ordered index list length diverged from its hash index"
        );
        debug_assert_eq!(
            self.acquired, self.released,
            "ordered index released a different number of slots than it acquired"
        );
    }
}

/// Front-to-back iterator over an [`OrderedKeyIndex`].
pub struct Iter<'a, K> {
    slots: &'a [Slot<K>],
    head: Option<SlotId>,
    tail: Option<SlotId>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.head?];
        self.head = slot.next;
        self.remaining -= 1;
        slot.key.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.slots[self.tail?];
        self.tail = slot.prev;
        self.remaining -= 1;
        slot.key.as_ref()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<'a, K: Eq + Hash + Clone> IntoIterator for &'a OrderedKeyIndex<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
