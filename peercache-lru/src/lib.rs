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

//! Size-bounded LRU store (component A) and its thread-safe wrapper
//! (component B).
//!
//! [`raw::LruCore`] is the bare, single-threaded store; [`Cache`] serializes
//! access to it behind a mutex and defers allocating the store until the
//! first write.

pub mod raw;
mod cache;
mod weighted;

pub use cache::{Cache, CacheBuilder};
pub use weighted::Weighted;
