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

//! Process-wide group registry: a mapping from group name to [`Group`],
//! guarded by a readers-writer lock, populated at group creation and
//! queryable by name.

use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::{group::Group, traits::Loader};

type Registry = RwLock<HashMap<String, Arc<Group>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Creates a new named group, registering it process-wide.
///
/// Rust's type system already rules out the original's "nil Getter is a
/// programming error" case: `loader` must be a real value to type-check at
/// all, so there is no runtime check to perform here.
pub fn new_group(name: impl Into<String>, cache_bytes: usize, loader: impl Loader) -> Arc<Group> {
    new_group_dyn(name.into(), cache_bytes, Arc::new(loader))
}

pub(crate) fn new_group_dyn(name: String, cache_bytes: usize, loader: Arc<dyn Loader>) -> Arc<Group> {
    let name: Arc<str> = Arc::from(name);
    let group = Arc::new(Group::new(name.clone(), cache_bytes, loader));
    registry().write().insert(name.to_string(), group.clone());
    group
}

/// Looks up a previously created group by name.
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    registry().read().get(name).cloned()
}
