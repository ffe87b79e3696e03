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

//! Consistent-hash ring (component C).

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::hasher::{Crc32Hasher, RingHasher};

/// The default number of virtual points per peer.
pub const DEFAULT_REPLICAS: usize = 50;

/// Configuration for a [`HashRing`]; only the replica count is
/// serializable, since the hash function is a runtime trait object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingConfig {
    /// Number of virtual points per peer.
    pub replicas: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
        }
    }
}

/// Maps arbitrary key strings onto one member of a peer set, minimizing
/// remapping on membership change.
///
/// The ring is append-only: [`HashRing::add`] only ever adds virtual
/// points. Destructive membership changes ("remove this peer", "replace
/// the whole set") are the enclosing peer pool's responsibility — it
/// rebuilds a fresh ring from scratch, per the design notes' "`set` is
/// destructive, not incremental" resolution.
pub struct HashRing {
    replicas: usize,
    hasher: Arc<dyn RingHasher>,
    /// Sorted hash points.
    points: Vec<u32>,
    /// Point -> owning peer.
    owners: HashMap<u32, Arc<str>>,
}

impl HashRing {
    /// Creates an empty ring with the default hash function (CRC-32 IEEE).
    pub fn new(replicas: usize) -> Self {
        Self::from_config(RingConfig { replicas })
    }

    /// Creates an empty ring with the default hash function, from a
    /// [`RingConfig`].
    pub fn from_config(config: RingConfig) -> Self {
        Self::with_hasher(config.replicas, Arc::new(Crc32Hasher))
    }

    /// Creates an empty ring using a custom hash function.
    pub fn with_hasher(replicas: usize, hasher: Arc<dyn RingHasher>) -> Self {
        Self {
            replicas,
            hasher,
            points: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Adds virtual points for each of `peers`. Duplicate peer ids are
    /// permitted and simply add more virtual points for that id; the ring
    /// itself enforces no "last set wins" policy — that is the enclosing
    /// pool's job when it rebuilds on `set`.
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        for peer in peers {
            let peer: Arc<str> = peer.into();
            for i in 0..self.replicas {
                let data = format!("{i}{peer}");
                let point = self.hasher.hash(data.as_bytes());
                self.points.push(point);
                self.owners.insert(point, peer.clone());
            }
        }
        self.points.sort_unstable();
    }

    /// Returns the owning peer for `key`, or `None` if the ring is empty.
    pub fn get(&self, key: &str) -> Option<Arc<str>> {
        if self.points.is_empty() {
            return None;
        }
        let hash = self.hasher.hash(key.as_bytes());
        let idx = self.points.partition_point(|&p| p < hash);
        let idx = if idx == self.points.len() { 0 } else { idx };
        self.owners.get(&self.points[idx]).cloned()
    }

    /// Whether the ring has no virtual points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
