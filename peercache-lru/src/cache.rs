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

//! The thread-safe wrapper around [`crate::raw::LruCore`] (component B).

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{raw::LruCore, weighted::Weighted};

/// Builds a [`Cache`], mirroring the `with_*` chain style used across the
/// rest of the workspace's configuration types.
pub struct CacheBuilder<V> {
    cache_bytes: usize,
    name: String,
    on_evicted: Option<Box<dyn FnMut(&str, &V) + Send>>,
}

impl<V> CacheBuilder<V>
where
    V: Weighted + Clone + Send + 'static,
{
    /// Starts a builder for a cache budgeted at `cache_bytes` (0 = unbounded).
    pub fn new(cache_bytes: usize) -> Self {
        Self {
            cache_bytes,
            name: String::from("unnamed"),
            on_evicted: None,
        }
    }

    /// Sets the name used to label emitted metrics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Registers a callback invoked exactly once per evicted entry.
    pub fn with_on_evicted(mut self, cb: impl FnMut(&str, &V) + Send + 'static) -> Self {
        self.on_evicted = Some(Box::new(cb));
        self
    }

    /// Builds the cache. The backing store is not allocated until the first
    /// write, so a cache that is built but never written to costs nothing
    /// beyond this struct.
    pub fn build(self) -> Cache<V> {
        Cache {
            cache_bytes: self.cache_bytes,
            name: Arc::from(self.name),
            on_evicted: Mutex::new(self.on_evicted),
            inner: Mutex::new(None),
        }
    }
}

/// A size-bounded LRU cache safe to share across threads.
///
/// Every operation takes the single mutex for its full duration: a plain
/// reader lock would be unsound here, since even `get` mutates recency
/// order.
pub struct Cache<V> {
    cache_bytes: usize,
    name: Arc<str>,
    on_evicted: Mutex<Option<Box<dyn FnMut(&str, &V) + Send>>>,
    inner: Mutex<Option<LruCore<V>>>,
}

impl<V> Cache<V>
where
    V: Weighted + Clone + Send + 'static,
{
    /// Builds an unnamed, budget-only cache. Use [`CacheBuilder`] for
    /// eviction callbacks or metrics labeling.
    pub fn new(cache_bytes: usize) -> Self {
        CacheBuilder::new(cache_bytes).build()
    }

    /// Inserts or replaces `key`, possibly triggering size-driven eviction.
    pub fn add(&self, key: impl Into<String>, value: V) {
        let mut guard = self.inner.lock();
        let lru = guard.get_or_insert_with(|| {
            let mut lru = LruCore::new(self.cache_bytes);
            if let Some(cb) = self.on_evicted.lock().take() {
                lru.set_on_evicted(cb);
            }
            lru
        });
        lru.add(key, value);
        metrics::gauge!("peercache_cache_bytes", "group" => self.name.to_string())
            .set(lru.accounted_bytes() as f64);
    }

    /// Looks up `key`. Returns `None` without allocating a store if the
    /// cache has never been written to.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.inner.lock();
        let lru = guard.as_mut()?;
        let hit = lru.get(key).cloned();
        if hit.is_some() {
            metrics::counter!("peercache_cache_hits", "group" => self.name.to_string()).increment(1);
        } else {
            metrics::counter!("peercache_cache_misses", "group" => self.name.to_string()).increment(1);
        }
        hit
    }

    /// Number of entries currently present; 0 if the store was never
    /// allocated.
    pub fn len(&self) -> usize {
        self.inner.lock().as_ref().map_or(0, LruCore::len)
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
