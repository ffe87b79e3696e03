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

use std::{error::Error as StdError, sync::Arc};

/// A boxed, thread-safe error, used at the boundary with externally
/// supplied loaders and peer getters whose concrete error types this crate
/// cannot name.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A shared, cloneable error, used once a [`BoxError`] crosses into the
/// suppressor: the duplicate-call suppressor hands the identical result to
/// every waiter in a wave, which requires the error (like the value) to be
/// `Clone`.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Errors returned by a [`crate::ByteView`]-producing `Get`.
///
/// Caller-contract violations (empty group name, nil loader, double peer
/// registration) are not part of this enum: they are programming errors
/// and surface as panics, per the coordinator's contract.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// `Group::get` was called with an empty key.
    #[error("key required")]
    EmptyKey,
    /// The origin loader returned an error; surfaced unchanged to every
    /// waiter in the suppression wave that triggered the load.
    #[error("origin loader failed: {0}")]
    Origin(#[source] SharedError),
    /// A remote peer fetch failed. Recoverable by definition: the
    /// coordinator only ever observes this internally and falls back to
    /// the origin loader, but it is kept in the public enum since a custom
    /// [`crate::ByteView`]-returning caller outside this crate may want to
    /// distinguish the two causes.
    #[error("peer fetch failed: {0}")]
    Peer(#[source] SharedError),
}

impl Error {
    /// Wraps a boxed origin-loader error.
    pub fn origin(err: BoxError) -> Self {
        Error::Origin(Arc::from(err))
    }

    /// Wraps a boxed peer-fetch error.
    pub fn peer(err: BoxError) -> Self {
        Error::Peer(Arc::from(err))
    }
}
