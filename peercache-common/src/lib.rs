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

//! Shared primitives for `peercache`: the immutable [`ByteView`] carrier and
//! the crate-wide [`Error`] taxonomy. Kept dependency-light and free of any
//! policy (eviction, hashing, coalescing) so every other `peercache-*`
//! crate, and external callers, can depend on it without pulling in more
//! than `bytes` and `thiserror`.

mod byte_view;
mod error;

pub use byte_view::ByteView;
pub use error::{BoxError, Error};
