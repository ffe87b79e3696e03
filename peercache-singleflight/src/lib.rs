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

//! Duplicate-call suppressor (component D).
//!
//! For any key, [`Group::do_call`] guarantees that at most one call to the
//! supplied closure is in flight at a time: concurrent callers that arrive
//! while a call for the same key is pending join that call's "wave" and
//! receive its result instead of starting a second one.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::{Condvar, Mutex};

/// One in-flight (or just-completed, not yet removed) unit of work for a
/// single key.
struct Call<T, E> {
    /// `None` while pending, `Some` once the closure has returned. The
    /// completion signal is the condvar notified right after this is set —
    /// a waiter that observes `Some` here never blocks further, even if it
    /// arrived after the signal but before the key is removed from the
    /// group's index.
    result: Mutex<Option<Result<T, E>>>,
    done: Condvar,
}

impl<T, E> Call<T, E>
where
    T: Clone,
    E: Clone,
{
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn wait(&self) -> Result<T, E> {
        let mut result = self.result.lock();
        while result.is_none() {
            self.done.wait(&mut result);
        }
        result.clone().expect("checked Some above")
    }

    fn finish(&self, result: Result<T, E>) {
        *self.result.lock() = Some(result);
        self.done.notify_all();
    }
}

/// A namespace of keyed, duplicate-suppressed work.
///
/// The group's own mutex guards only the pending-call index; it is never
/// held while a closure runs, which is what lets `do_call` for one key
/// proceed independently of any other key.
pub struct Group<T, E> {
    calls: Mutex<HashMap<String, Arc<Call<T, E>>>>,
}

impl<T, E> Default for Group<T, E> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }
}

impl<T, E> Group<T, E>
where
    T: Clone,
    E: Clone,
{
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `f`, making sure that only one call is in flight for `key`
    /// at a time. Duplicate callers arriving while a call is pending block
    /// until it completes and then receive an identical `(value, error)`.
    ///
    /// `f` must not itself call `do_call` with the same `key` — that would
    /// deadlock, since the pending call is published before `f` runs.
    pub fn do_call(&self, key: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        enum Role<T, E> {
            Join(Arc<Call<T, E>>),
            Lead(Arc<Call<T, E>>),
        }

        let role = {
            let mut calls = self.calls.lock();
            match calls.get(key) {
                Some(call) => Role::Join(call.clone()),
                None => {
                    let call = Arc::new(Call::new());
                    calls.insert(key.to_string(), call.clone());
                    Role::Lead(call)
                }
            }
        };

        match role {
            Role::Join(call) => {
                tracing::trace!(key, "joining in-flight call");
                call.wait()
            }
            Role::Lead(call) => {
                let result = f();
                call.finish(result.clone());
                self.calls.lock().remove(key);
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Arc,
    };

    use super::*;

    #[test]
    fn single_caller_gets_its_own_result() {
        let group: Group<String, String> = Group::new();
        let value = group.do_call("key", || Ok("foo".to_string())).unwrap();
        assert_eq!(value, "foo");
    }

    #[test_log::test]
    fn concurrent_callers_coalesce_into_one_invocation() {
        let group = Arc::new(Group::<String, String>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = mpsc::sync_channel::<()>(0);
        let release_rx = Arc::new(Mutex::new(release_rx));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let group = group.clone();
            let calls = calls.clone();
            let release_rx = release_rx.clone();
            handles.push(std::thread::spawn(move || {
                group.do_call("key", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    release_rx.lock().recv().ok();
                    Ok("foo".to_string())
                })
            }));
        }

        // give every thread a chance to arrive at do_call before releasing.
        std::thread::sleep(std::time::Duration::from_millis(200));
        release_tx.send(()).ok();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok("foo".to_string()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn different_keys_do_not_block_each_other() {
        let group = Arc::new(Group::<String, String>::new());
        let (tx, rx) = mpsc::channel::<()>();
        let rx = Arc::new(Mutex::new(rx));

        let g1 = group.clone();
        let rx1 = rx.clone();
        let blocked = std::thread::spawn(move || g1.do_call("k1", || {
            rx1.lock().recv().ok();
            Ok::<_, String>("one".to_string())
        }));

        // k2 must not wait on k1's pending call.
        let result = group.do_call("k2", || Ok::<_, String>("two".to_string()));
        assert_eq!(result, Ok("two".to_string()));

        tx.send(()).ok();
        assert_eq!(blocked.join().unwrap(), Ok("one".to_string()));
    }

    #[test]
    fn new_wave_after_completion_invokes_again() {
        let group: Group<String, String> = Group::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let result = group.do_call("key", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("foo".to_string())
            });
            assert_eq!(result, Ok("foo".to_string()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test_log::test]
    fn error_is_broadcast_identically() {
        let group = Arc::new(Group::<String, String>::new());
        let (release_tx, release_rx) = mpsc::sync_channel::<()>(0);
        let release_rx = Arc::new(Mutex::new(release_rx));

        let mut handles = Vec::new();
        for _ in 0..5 {
            let group = group.clone();
            let release_rx = release_rx.clone();
            handles.push(std::thread::spawn(move || {
                group.do_call("key", || {
                    release_rx.lock().recv().ok();
                    Err::<String, _>("origin down".to_string())
                })
            }));
        }

        std::thread::sleep(std::time::Duration::from_millis(200));
        release_tx.send(()).ok();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Err("origin down".to_string()));
        }
    }
}
