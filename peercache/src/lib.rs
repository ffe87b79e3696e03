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

//! `peercache` — the core of a distributed in-memory byte cache organized
//! as a group of cooperating peers.
//!
//! Clients request a value by `(namespace, key)`: a [`Group`] returns an
//! immutable [`ByteView`] drawn from its memory tier, from a remote peer's
//! memory tier via a registered [`PeerPicker`], or — on a miss — from a
//! user-supplied [`Loader`] whose result is cached.
//!
//! ```
//! use std::sync::Arc;
//!
//! let group = peercache::new_group("scores", 2 << 10, |key: &str| {
//!     Ok(format!("value-for-{key}").into_bytes())
//! });
//! let view = group.get("Tom").unwrap();
//! assert_eq!(view.as_str(), "value-for-Tom");
//! assert!(Arc::ptr_eq(&group, &peercache::get_group("scores").unwrap()));
//! ```

mod config;
mod group;
mod peer_pool;
mod registry;
mod traits;

pub use config::{GroupBuilder, GroupConfig};
pub use group::Group;
pub use peer_pool::PeerPool;
pub use peercache_common::{BoxError, ByteView, Error};
pub use registry::{get_group, new_group};
pub use traits::{Loader, PeerGetter, PeerPicker};
