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

//! External collaborator interfaces (§6): the origin loader, and the two
//! halves of peer transport this crate consumes but does not implement.

use std::sync::Arc;

use peercache_common::BoxError;

/// Produces authoritative bytes for a key on a cache miss.
///
/// Blanket-implemented for any matching closure, mirroring the original's
/// `GetterFunc` function-as-interface adapter.
pub trait Loader: Send + Sync + 'static {
    /// Loads `key` from the origin. The cache takes ownership of the
    /// returned bytes by copying them into a [`peercache_common::ByteView`].
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync + 'static,
{
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        self(key)
    }
}

/// A single RPC that fetches a value from one remote peer.
///
/// This crate does not prescribe a wire format: implementations may frame
/// requests however they like, as long as `get` returns the raw value
/// bytes.
pub trait PeerGetter: Send + Sync {
    /// Fetches `key` from `group` on the remote peer this getter addresses.
    fn get(&self, group: &str, key: &str) -> Result<Vec<u8>, BoxError>;
}

/// Locates the peer that owns a given key.
///
/// Implementations are responsible for recognizing "the owner is this very
/// node" and returning `None` in that case — [`crate::Group::get`] treats
/// `None` as "no remote owner, use the origin loader" and never learns its
/// own identity.
pub trait PeerPicker: Send + Sync {
    /// Returns the peer that owns `key`, or `None` if this node owns it
    /// (or no peers are configured).
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}
