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

use peercache_common::ByteView;

/// Something an [`crate::raw::LruCore`] can account for in its byte budget.
///
/// The store's accounted size for an entry is always `key.len() +
/// value.weight()`; this trait supplies the second half.
pub trait Weighted {
    /// Number of bytes this value contributes to the cache's accounted
    /// size. Must be stable for the lifetime of the value: the store calls
    /// this once on insertion/replacement and trusts the result afterwards.
    fn weight(&self) -> usize;
}

impl Weighted for ByteView {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl Weighted for Vec<u8> {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl Weighted for String {
    fn weight(&self) -> usize {
        self.len()
    }
}
