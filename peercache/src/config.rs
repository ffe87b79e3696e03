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

//! Builder-pattern configuration for a [`crate::Group`], mirroring
//! `peercache_lru::CacheBuilder`'s `with_*` chain.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{registry::new_group_dyn, traits::Loader, Group};

/// Serializable configuration for a [`crate::Group`].
///
/// Registering two groups under the same name is a caller-contract
/// violation in the original design; this crate instead lets a later
/// [`GroupBuilder::build`] silently replace the earlier registration,
/// matching [`crate::registry::new_group`]'s own behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Maximum bytes the group's local LRU cache may hold (0 = unbounded).
    pub cache_bytes: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self { cache_bytes: 64 << 20 }
    }
}

/// Builds a [`Group`], registering it process-wide on [`GroupBuilder::build`].
pub struct GroupBuilder {
    name: String,
    config: GroupConfig,
}

impl GroupBuilder {
    /// Starts a builder for a group named `name`, with the default config.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: GroupConfig::default(),
        }
    }

    /// Sets the local cache's byte budget.
    pub fn with_cache_bytes(mut self, cache_bytes: usize) -> Self {
        self.config.cache_bytes = cache_bytes;
        self
    }

    /// Replaces the whole config at once.
    pub fn with_config(mut self, config: GroupConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the group and registers it process-wide under its name.
    pub fn build(self, loader: impl Loader) -> Arc<Group> {
        new_group_dyn(self.name, self.config.cache_bytes, Arc::new(loader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_default_cache_budget() {
        assert_eq!(GroupConfig::default().cache_bytes, 64 << 20);
    }

    #[test]
    fn builder_with_cache_bytes_is_honored() {
        let group = GroupBuilder::new("builder-test-group")
            .with_cache_bytes(1024)
            .build(|key: &str| Ok(key.as_bytes().to_vec()));
        let view = group.get("k").unwrap();
        assert_eq!(view.as_str(), "k");
    }

    #[test]
    fn builder_with_config_is_honored() {
        let group = GroupBuilder::new("builder-config-test-group")
            .with_config(GroupConfig { cache_bytes: 512 })
            .build(|key: &str| Ok(key.as_bytes().to_vec()));
        assert_eq!(group.name(), "builder-config-test-group");
    }
}
