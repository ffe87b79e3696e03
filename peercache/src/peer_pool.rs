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

//! A transport-agnostic [`PeerPicker`] built on [`HashRing`], grounded in
//! the original's `HTTPPool` minus its HTTP transport (out of scope for
//! this crate, see spec §1's "external collaborators").
//!
//! Wiring an actual RPC client in is the caller's job: construct one
//! [`PeerPool`], build a [`crate::PeerGetter`] per remote address however
//! your transport works, and hand the pairs to [`PeerPool::set_peers`].

use std::sync::Arc;

use parking_lot::RwLock;
use peercache_ring::{HashRing, RingConfig};

use crate::traits::{PeerGetter, PeerPicker};

struct State {
    ring: HashRing,
    getters: hashbrown::HashMap<Arc<str>, Arc<dyn PeerGetter>>,
}

/// A pool of peers addressed through a consistent-hash ring.
///
/// `set_peers` is destructive: each call rebuilds the ring and the getter
/// table from scratch, per the design notes' resolution that `set` is not
/// incremental.
pub struct PeerPool {
    self_id: Arc<str>,
    replicas: usize,
    state: RwLock<State>,
}

impl PeerPool {
    /// Creates an empty pool. `self_id` must match one of the ids later
    /// passed to [`PeerPool::set_peers`] for self-recognition to work.
    pub fn new(self_id: impl Into<Arc<str>>) -> Self {
        Self::from_config(self_id, RingConfig::default())
    }

    /// As [`PeerPool::new`], with a non-default virtual point count.
    pub fn with_replicas(self_id: impl Into<Arc<str>>, replicas: usize) -> Self {
        Self::from_config(self_id, RingConfig { replicas })
    }

    /// As [`PeerPool::new`], taking the ring's virtual point count from a
    /// [`RingConfig`].
    pub fn from_config(self_id: impl Into<Arc<str>>, config: RingConfig) -> Self {
        Self {
            self_id: self_id.into(),
            replicas: config.replicas,
            state: RwLock::new(State {
                ring: HashRing::from_config(config),
                getters: hashbrown::HashMap::new(),
            }),
        }
    }

    /// Rebuilds the pool's ring and getter table from `peers`.
    pub fn set_peers(&self, peers: Vec<(Arc<str>, Arc<dyn PeerGetter>)>) {
        let mut ring = HashRing::from_config(RingConfig { replicas: self.replicas });
        ring.add(peers.iter().map(|(id, _)| id.clone()));
        let getters = peers.into_iter().collect();
        *self.state.write() = State { ring, getters };
    }
}

impl PeerPicker for PeerPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let state = self.state.read();
        if state.ring.is_empty() {
            return None;
        }
        let owner = state.ring.get(key)?;
        if owner.as_ref() == self.self_id.as_ref() {
            return None;
        }
        state.getters.get(owner.as_ref()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use peercache_common::BoxError;

    use super::*;

    struct EchoPeer(Arc<str>);
    impl PeerGetter for EchoPeer {
        fn get(&self, group: &str, key: &str) -> Result<Vec<u8>, BoxError> {
            Ok(format!("{}:{group}:{key}", self.0).into_bytes())
        }
    }

    #[test]
    fn self_owned_keys_report_no_remote_peer() {
        let pool = PeerPool::new(Arc::<str>::from("self"));
        pool.set_peers(vec![(Arc::from("self"), Arc::new(EchoPeer(Arc::from("self"))) as Arc<dyn PeerGetter>)]);
        for key in ["a", "b", "c", "d", "e"] {
            assert!(pool.pick_peer(key).is_none());
        }
    }

    #[test]
    fn remote_owned_keys_route_to_that_peer() {
        let pool = PeerPool::new(Arc::<str>::from("self"));
        pool.set_peers(vec![
            (Arc::from("self"), Arc::new(EchoPeer(Arc::from("self"))) as Arc<dyn PeerGetter>),
            (Arc::from("other"), Arc::new(EchoPeer(Arc::from("other"))) as Arc<dyn PeerGetter>),
        ]);

        let mut saw_remote = false;
        for i in 0..100 {
            let key = format!("key-{i}");
            if let Some(getter) = pool.pick_peer(&key) {
                saw_remote = true;
                let bytes = getter.get("g", &key).unwrap();
                assert_eq!(bytes, format!("other:g:{key}").into_bytes());
            }
        }
        assert!(saw_remote, "with two peers some keys should route remotely");
    }

    #[test]
    fn empty_pool_reports_no_owner() {
        let pool = PeerPool::new(Arc::<str>::from("self"));
        assert!(pool.pick_peer("anything").is_none());
    }

    #[test]
    fn from_config_honors_the_given_replica_count() {
        let pool = PeerPool::from_config(Arc::<str>::from("self"), RingConfig { replicas: 1 });
        assert_eq!(pool.replicas, 1);
    }
}
