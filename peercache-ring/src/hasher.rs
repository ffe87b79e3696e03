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

/// A 32-bit hash function usable to place points on a [`crate::HashRing`].
///
/// Implementations should be cheap and deterministic: the ring calls this
/// once per virtual point on `add` and once per lookup on `get`.
pub trait RingHasher: Send + Sync {
    /// Hashes `data` to a point on the ring.
    fn hash(&self, data: &[u8]) -> u32;
}

/// The default hash function: CRC-32 with the IEEE polynomial.
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32Hasher;

impl RingHasher for Crc32Hasher {
    fn hash(&self, data: &[u8]) -> u32 {
        crc32fast::hash(data)
    }
}

impl<F> RingHasher for F
where
    F: Fn(&[u8]) -> u32 + Send + Sync,
{
    fn hash(&self, data: &[u8]) -> u32 {
        self(data)
    }
}
