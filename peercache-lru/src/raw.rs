//  Copyright 2026 The peercache Authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! The bare, non-thread-safe LRU store (component A).
//!
//! Recency order is a doubly linked list threaded through an arena
//! (`Vec<Option<Slot<V>>>`) rather than built from raw pointers: the index
//! stores stable `usize` slot ids instead of intrusive handles, per the
//! "arena of entry records addressed by stable integer IDs" realization the
//! design notes call out as an alternative to an owned intrusive list. This
//! keeps the store entirely safe code while remaining O(1) amortized for
//! every operation.

use hashbrown::HashMap;

use crate::weighted::Weighted;

struct Slot<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A size-bounded, byte-accounted LRU store.
///
/// Not thread-safe: callers needing concurrent access should go through
/// [`crate::Cache`], which serializes access behind a mutex.
pub struct LruCore<V> {
    slots: Vec<Option<Slot<V>>>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    /// Most-recently-used slot, if any.
    head: Option<usize>,
    /// Least-recently-used slot, if any.
    tail: Option<usize>,
    max_bytes: usize,
    bytes: usize,
    on_evicted: Option<Box<dyn FnMut(&str, &V) + Send>>,
}

impl<V> LruCore<V>
where
    V: Weighted,
{
    /// Creates an empty store. `max_bytes == 0` means unbounded.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
            max_bytes,
            bytes: 0,
            on_evicted: None,
        }
    }

    /// Registers the eviction callback, invoked exactly once per evicted
    /// entry, before the entry's storage is released.
    pub fn set_on_evicted(&mut self, cb: Box<dyn FnMut(&str, &V) + Send>) {
        self.on_evicted = Some(cb);
    }

    /// Number of entries currently present.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current accounted size: `Σ (len(key) + value.weight())`.
    pub fn accounted_bytes(&self) -> usize {
        self.bytes
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = self.slots[idx].as_ref().expect("slot must be live");
            (slot.prev, slot.next)
        };
        match prev {
            Some(p) => self.slots[p].as_mut().expect("slot must be live").next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].as_mut().expect("slot must be live").prev = prev,
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let slot = self.slots[idx].as_mut().expect("slot must be live");
            slot.prev = None;
            slot.next = old_head;
        }
        match old_head {
            Some(h) => self.slots[h].as_mut().expect("slot must be live").prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Promotes `idx` to the head of the recency list.
    fn touch(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.attach_front(idx);
    }

    /// Inserts or replaces `key`, then evicts from the tail while over
    /// budget. On replace, the accounted size moves by exactly
    /// `value.weight() - old_value.weight()`; the key's contribution is
    /// untouched since the key itself does not change.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(&idx) = self.index.get(key.as_str()) {
            let new_weight = value.weight();
            let old_weight = self.slots[idx].as_ref().expect("slot must be live").value.weight();
            self.slots[idx].as_mut().expect("slot must be live").value = value;
            self.bytes = self.bytes + new_weight - old_weight;
            self.touch(idx);
        } else {
            let weight = key.len() + value.weight();
            let slot = Slot {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            };
            let idx = match self.free.pop() {
                Some(idx) => {
                    self.slots[idx] = Some(slot);
                    idx
                }
                None => {
                    self.slots.push(Some(slot));
                    self.slots.len() - 1
                }
            };
            self.index.insert(key, idx);
            self.bytes += weight;
            self.attach_front(idx);
        }
        while self.max_bytes != 0 && self.bytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    /// Looks up `key`, promoting it to the head on hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.touch(idx);
        Some(&self.slots[idx].as_ref().expect("slot must be live").value)
    }

    /// Removes the least-recently-touched entry, if any, invoking the
    /// eviction callback before its storage is released.
    pub fn remove_oldest(&mut self) {
        let Some(idx) = self.tail else { return };
        self.detach(idx);
        let slot = self.slots[idx].take().expect("slot must be live");
        self.index.remove(&slot.key);
        self.bytes -= slot.key.len() + slot.value.weight();
        self.free.push(idx);
        if let Some(cb) = self.on_evicted.as_mut() {
            cb(&slot.key, &slot.value);
        }
    }

    /// Removes `key` unconditionally, without invoking the eviction
    /// callback (used for explicit invalidation, not size-driven eviction).
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.detach(idx);
        let slot = self.slots[idx].take().expect("slot must be live");
        self.bytes -= slot.key.len() + slot.value.weight();
        self.free.push(idx);
        Some(slot.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn get_hit_and_miss() {
        let mut lru = LruCore::new(0);
        lru.add("key1", sized("123"));
        assert_eq!(lru.get("key1").map(String::as_str), Some("123"));
        assert_eq!(lru.get("key2"), None);
    }

    #[test]
    fn add_replace_updates_accounted_size() {
        let mut lru = LruCore::new(0);
        lru.add("key", sized("123"));
        lru.add("key", sized("1234"));
        assert_eq!(lru.accounted_bytes(), "key".len() + "1234".len());
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn eviction_by_size_removes_oldest() {
        let (k1, v1) = ("key1", "value1");
        let (k2, v2) = ("key2", "value2");
        let (k3, v3) = ("key3", "value3");
        let caps = k1.len() + v1.len() + k2.len() + v2.len();
        let mut lru = LruCore::new(caps);
        lru.add(k1, sized(v1));
        lru.add(k2, sized(v2));
        lru.add(k3, sized(v3));

        assert_eq!(lru.get(k1), None);
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn get_promotes_so_next_eviction_skips_it() {
        let mut lru = LruCore::new("key1".len() + "value1".len() + "key2".len() + "value2".len());
        lru.add("key1", sized("value1"));
        lru.add("key2", sized("value2"));
        // touch key1 so key2 becomes the next to go
        lru.get("key1");
        lru.add("key3", sized("value3"));
        assert_eq!(lru.get("key2"), None);
        assert!(lru.get("key1").is_some());
    }

    #[test]
    fn on_evicted_called_in_order() {
        let evicted = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let recorder = evicted.clone();
        let mut lru = LruCore::new(10);
        lru.set_on_evicted(Box::new(move |k, _v: &String| recorder.lock().push(k.to_string())));

        lru.add("key1", sized("12345"));
        lru.add("key2", sized("12345"));
        lru.add("key3", sized("12345"));

        assert_eq!(*evicted.lock(), vec!["key1".to_string(), "key2".to_string()]);
    }

    #[test]
    fn remove_oldest_on_empty_store_is_a_noop() {
        let mut lru: LruCore<String> = LruCore::new(0);
        lru.remove_oldest();
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn len_reflects_live_entries_after_reuse_of_freed_slots() {
        let mut lru = LruCore::new("key1".len() + "aa".len());
        lru.add("key1", sized("aa"));
        lru.add("key2", sized("bb")); // evicts key1, reuses its slot
        lru.add("key3", sized("cc")); // evicts key2, reuses that slot
        assert_eq!(lru.len(), 1);
        assert!(lru.get("key3").is_some());
    }
}
