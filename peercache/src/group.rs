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

//! The group coordinator (component E): the single externally observable
//! `Group::get` contract, tying the LRU cache, the consistent-hash ring
//! (indirectly, through a registered [`crate::PeerPicker`]) and the
//! duplicate-call suppressor together.

use std::sync::Arc;

use parking_lot::RwLock;
use peercache_common::{ByteView, Error};
use peercache_lru::{Cache, CacheBuilder};
use peercache_singleflight::Group as SingleFlight;

use crate::traits::{Loader, PeerPicker};

/// A named cache namespace: its own origin loader, its own bounded cache,
/// an optional registered peer picker, and a private duplicate-call
/// suppressor.
pub struct Group {
    name: Arc<str>,
    loader: Arc<dyn Loader>,
    cache: Cache<ByteView>,
    peers: RwLock<Option<Arc<dyn PeerPicker>>>,
    flight: SingleFlight<ByteView, Error>,
}

impl Group {
    pub(crate) fn new(name: Arc<str>, cache_bytes: usize, loader: Arc<dyn Loader>) -> Self {
        let cache = CacheBuilder::new(cache_bytes).with_name(name.to_string()).build();
        Self {
            name,
            loader,
            cache,
            peers: RwLock::new(None),
            flight: SingleFlight::new(),
        }
    }

    /// This group's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers the peer picker used to route keys to remote owners.
    ///
    /// # Panics
    ///
    /// Panics if called more than once: registering a second picker is a
    /// caller-contract violation, per §4.E.
    pub fn register_peer(&self, picker: Arc<dyn PeerPicker>) {
        let mut guard = self.peers.write();
        assert!(guard.is_none(), "RegisterPeer called more than once");
        *guard = Some(picker);
    }

    /// Fetches `key`: local cache, then (via the duplicate-call suppressor)
    /// a remote peer if one owns the key, falling back to the origin
    /// loader.
    pub fn get(&self, key: &str) -> Result<ByteView, Error> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        if let Some(view) = self.cache.get(key) {
            tracing::trace!(group = %self.name, key, "cache hit");
            return Ok(view);
        }

        tracing::debug!(group = %self.name, key, "cache miss, loading");
        self.flight.do_call(key, || self.load(key))
    }

    /// Runs under the suppressor: at most one of these executes per key at
    /// a time, regardless of how many callers are waiting on `get`.
    fn load(&self, key: &str) -> Result<ByteView, Error> {
        if let Some(picker) = self.peers.read().clone() {
            if let Some(peer) = picker.pick_peer(key) {
                match peer.get(&self.name, key) {
                    Ok(bytes) => {
                        metrics::counter!("peercache_peer_fetch_ok", "group" => self.name.to_string())
                            .increment(1);
                        // The owning peer already caches this value; we act
                        // as a proxy and pay no local memory for a key we
                        // don't own.
                        return Ok(ByteView::new(bytes));
                    }
                    Err(err) => {
                        tracing::warn!(
                            group = %self.name,
                            key,
                            error = %err,
                            "peer fetch failed, falling back to origin"
                        );
                        metrics::counter!("peercache_peer_fetch_err", "group" => self.name.to_string())
                            .increment(1);
                    }
                }
            }
        }
        self.get_locally(key)
    }

    fn get_locally(&self, key: &str) -> Result<ByteView, Error> {
        let bytes = self.loader.load(key).map_err(Error::origin)?;
        let view = ByteView::new(bytes);
        self.cache.add(key, view.clone());
        metrics::counter!("peercache_origin_loads", "group" => self.name.to_string()).increment(1);
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn group(name: &str, cache_bytes: usize, counter: Arc<AtomicUsize>) -> Arc<Group> {
        Arc::new(Group::new(
            Arc::from(name),
            cache_bytes,
            Arc::new(move |key: &str| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(key.as_bytes().to_vec())
            }),
        ))
    }

    #[test]
    fn empty_key_is_rejected() {
        let g = group("g", 1024, Arc::new(AtomicUsize::new(0)));
        assert!(matches!(g.get(""), Err(Error::EmptyKey)));
    }

    #[test]
    fn second_get_is_served_from_cache() {
        let counter = Arc::new(AtomicUsize::new(0));
        let g = group("g", 1 << 20, counter.clone());
        let first = g.get("tom").unwrap();
        let second = g.get("tom").unwrap();
        assert_eq!(first, second);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test_log::test]
    fn concurrent_gets_on_a_cold_cache_load_at_most_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let g = group("g", 1 << 20, counter.clone());
        std::thread::scope(|scope| {
            for _ in 0..16 {
                let g = g.clone();
                scope.spawn(move || g.get("jack").unwrap());
            }
        });
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn origin_error_surfaces_unchanged() {
        let g = Arc::new(Group::new(
            Arc::from("g"),
            1024,
            Arc::new(|_: &str| Err("db is down".into())),
        ));
        let err = g.get("missing").unwrap_err();
        assert_eq!(err.to_string(), "origin loader failed: db is down");
    }

    #[test]
    fn register_peer_twice_panics() {
        struct NoPeers;
        impl crate::traits::PeerPicker for NoPeers {
            fn pick_peer(&self, _key: &str) -> Option<Arc<dyn crate::traits::PeerGetter>> {
                None
            }
        }
        let g = group("g", 1024, Arc::new(AtomicUsize::new(0)));
        g.register_peer(Arc::new(NoPeers));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            g.register_peer(Arc::new(NoPeers));
        }));
        assert!(result.is_err());
    }

    #[test]
    fn peer_failure_falls_back_to_origin() {
        struct FailingPeer;
        impl crate::traits::PeerGetter for FailingPeer {
            fn get(&self, _group: &str, _key: &str) -> Result<Vec<u8>, peercache_common::BoxError> {
                Err("peer unreachable".into())
            }
        }
        struct AlwaysRemote;
        impl crate::traits::PeerPicker for AlwaysRemote {
            fn pick_peer(&self, _key: &str) -> Option<Arc<dyn crate::traits::PeerGetter>> {
                Some(Arc::new(FailingPeer))
            }
        }

        let counter = Arc::new(AtomicUsize::new(0));
        let g = group("g", 1024, counter.clone());
        g.register_peer(Arc::new(AlwaysRemote));

        let view = g.get("bob").unwrap();
        assert_eq!(view.as_str(), "bob");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn peer_hit_does_not_populate_local_cache() {
        struct RemotePeer;
        impl crate::traits::PeerGetter for RemotePeer {
            fn get(&self, _group: &str, key: &str) -> Result<Vec<u8>, peercache_common::BoxError> {
                Ok(format!("remote:{key}").into_bytes())
            }
        }
        struct AlwaysRemote;
        impl crate::traits::PeerPicker for AlwaysRemote {
            fn pick_peer(&self, _key: &str) -> Option<Arc<dyn crate::traits::PeerGetter>> {
                Some(Arc::new(RemotePeer))
            }
        }

        let counter = Arc::new(AtomicUsize::new(0));
        let g = group("g", 1024, counter.clone());
        g.register_peer(Arc::new(AlwaysRemote));

        let view = g.get("k").unwrap();
        assert_eq!(view.as_str(), "remote:k");
        assert_eq!(g.cache.len(), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
