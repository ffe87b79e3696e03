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

use std::fmt;

use bytes::Bytes;

/// An immutable view over a byte sequence handed out by the cache.
///
/// A `ByteView` owns its bytes: once constructed it can never be mutated,
/// by the cache or by a caller holding a clone. Accessors that would expose
/// the underlying buffer instead return a defensive copy, so a caller
/// mutating the result never observes or affects cached state.
#[derive(Clone, Eq)]
pub struct ByteView {
    b: Bytes,
}

impl ByteView {
    /// Takes ownership of `bytes`, no copy is made.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self { b: bytes.into() }
    }

    /// Length of the view in bytes.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Returns a defensive copy of the underlying bytes.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Returns the view decoded as a UTF-8 string, replacing invalid
    /// sequences. Prefer [`ByteView::as_bytes`] for opaque payloads.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.b)
    }

    /// Accounted size for LRU bookkeeping: just the byte length, the key's
    /// share is added by the caller (see `peercache_lru`).
    pub fn charge(&self) -> usize {
        self.b.len()
    }
}

impl PartialEq for ByteView {
    fn eq(&self, other: &Self) -> bool {
        self.b == other.b
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView").field("len", &self.len()).finish()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(v: Vec<u8>) -> Self {
        Self::new(v)
    }
}

impl From<&[u8]> for ByteView {
    fn from(v: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(v))
    }
}

impl From<String> for ByteView {
    fn from(v: String) -> Self {
        Self::new(v.into_bytes())
    }
}
