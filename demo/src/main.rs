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

//! A small illustration of `peercache`'s public API: one group, backed by
//! a toy "origin" lookup table, with a peer pool whose only configured
//! remote is unreachable (there's no RPC transport in this crate, see
//! `peercache-ring`/`peercache`'s docs) so every `Get` ends up falling
//! back to the origin loader after logging the failed peer attempt.
//!
//! Run with `RUST_LOG=debug cargo run -p demo` to see the coordinator's
//! cache-hit / cache-miss / peer-fallback spans.

use std::{collections::HashMap, sync::Arc};

use anyhow::Context;
use peercache::{BoxError, PeerGetter, PeerPool};

/// A peer getter that stands in for a remote node this process cannot
/// actually reach — there's no peer process behind it, only this struct.
struct UnreachablePeer;

impl PeerGetter for UnreachablePeer {
    fn get(&self, _group: &str, _key: &str) -> Result<Vec<u8>, BoxError> {
        Err("connection refused (demo has no real peer process)".into())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db: HashMap<&str, &str> = HashMap::from([("Tom", "630"), ("Jack", "589"), ("Bob", "700")]);

    let group = peercache::new_group("scores", 2 << 10, move |key: &str| {
        tracing::info!(key, "querying slow origin store");
        db.get(key)
            .map(|v| v.as_bytes().to_vec())
            .ok_or_else(|| format!("{key} not exist").into())
    });

    let pool = PeerPool::new(Arc::<str>::from("local"));
    pool.set_peers(vec![
        (Arc::from("local"), Arc::new(UnreachablePeer) as Arc<dyn PeerGetter>),
        (Arc::from("remote"), Arc::new(UnreachablePeer) as Arc<dyn PeerGetter>),
    ]);
    group.register_peer(Arc::new(pool));

    for key in ["Tom", "Jack", "Bob"] {
        let view = group.get(key).with_context(|| format!("get({key})"))?;
        println!("{key} = {}", view.as_str());
        // second call should be a pure cache hit: no "querying slow origin
        // store" log line for this key on the next pass.
        let cached = group.get(key)?;
        assert_eq!(view, cached);
    }

    match group.get("Nobody") {
        Ok(_) => unreachable!("Nobody is not in the origin table"),
        Err(err) => println!("Nobody = <error: {err}>"),
    }

    Ok(())
}
