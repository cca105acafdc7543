//! Per-key request coalescing (a.k.a. "singleflight").
//!
//! Concurrent callers asking for the same key collapse into a single
//! producer invocation: the first caller runs the closure, every other
//! concurrent caller for that key blocks on a condition variable and
//! observes the same result. Once the producer finishes, the key is removed
//! from the registry — this is a stateless deduplicator, not a cache; a
//! caller arriving after completion starts a fresh flight.
//!
//! # Lock Discipline
//!
//! The registry's own lock is held only across the map lookup and
//! insertion/removal steps — **never** across the producer closure. A
//! thread waiting for another thread's flight blocks on a
//! [`parking_lot::Condvar`] associated with that flight, not on the
//! registry's map lock, so unrelated keys are never blocked by one key's
//! in-flight producer.

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;

struct Call<T> {
    done: Mutex<Option<T>>,
    condvar: Condvar,
}

/// A registry of in-flight calls, keyed by `String`.
///
/// `T` is the shared, cloneable result type every waiter on a key observes —
/// in this crate that is `Result<ByteView, CacheError>`; [`CacheError`] is
/// `Clone` specifically so the same error can be handed to every waiter
/// without the registry needing special-case error plumbing.
///
/// [`CacheError`]: crate::error::CacheError
pub struct FlightGroup<T> {
    calls: Mutex<HashMap<String, Arc<Call<T>>>>,
}

impl<T> std::fmt::Debug for FlightGroup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightGroup")
            .field("in_flight", &self.calls.lock().len())
            .finish()
    }
}

impl<T: Clone> FlightGroup<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        FlightGroup {
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Executes `produce` for `key`, coalescing concurrent calls.
    ///
    /// If a flight for `key` is already in progress, this call blocks until
    /// it completes and returns its result without invoking `produce`.
    /// Otherwise it registers a new flight, runs `produce` outside any lock,
    /// publishes the result to any waiters that arrived in the meantime, and
    /// removes the entry before returning.
    pub fn do_call(&self, key: &str, produce: impl FnOnce() -> T) -> T {
        let mut calls = self.calls.lock();
        if let Some(existing) = calls.get(key) {
            let call = Arc::clone(existing);
            drop(calls);

            // A flight was already in progress: wait for it, without holding
            // the registry's map lock.
            let mut guard = call.done.lock();
            while guard.is_none() {
                call.condvar.wait(&mut guard);
            }
            return guard.clone().expect("condvar only wakes after done is set");
        }

        let call = Arc::new(Call {
            done: Mutex::new(None),
            condvar: Condvar::new(),
        });
        calls.insert(key.to_string(), Arc::clone(&call));
        // This thread is the producer; drop the map lock before running it.
        drop(calls);
        self.run_and_publish(key, call, produce)
    }

    fn run_and_publish(&self, key: &str, call: Arc<Call<T>>, produce: impl FnOnce() -> T) -> T {
        let result = produce();
        {
            let mut guard = call.done.lock();
            *guard = Some(result.clone());
            call.condvar.notify_all();
        }
        self.calls.lock().remove(key);
        result
    }

    /// Number of keys currently in flight. Exposed for tests; should be `0`
    /// between bursts of concurrent misses.
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    /// `true` if no flight is currently registered.
    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

impl<T: Clone> Default for FlightGroup<T> {
    fn default() -> Self {
        FlightGroup::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn registry_is_empty_between_bursts() {
        let group: FlightGroup<i32> = FlightGroup::new();
        let result = group.do_call("k", || 42);
        assert_eq!(result, 42);
        assert!(group.is_empty());
    }

    #[test]
    fn scenario_single_flight_coalescing() {
        // Mirrors spec.md scenario 3: 100 threads call do("k", fn) concurrently,
        // fn sleeps then returns "v". fn must run exactly once; all 100 callers
        // observe the same result.
        let group = Arc::new(FlightGroup::new());
        let invocations = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let group = Arc::clone(&group);
                let invocations = Arc::clone(&invocations);
                thread::spawn(move || {
                    group.do_call("k", || {
                        invocations.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(50));
                        "v".to_string()
                    })
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), "v");
        }
        assert_eq!(invocations.load(Ordering::SeqCst), 1);
        assert!(group.is_empty());
    }

    #[test]
    fn a_later_call_after_completion_starts_a_fresh_flight() {
        let group = Arc::new(FlightGroup::new());
        let invocations = Arc::new(AtomicUsize::new(0));

        let first = {
            let invocations = invocations.clone();
            group.do_call("k", || {
                invocations.fetch_add(1, Ordering::SeqCst);
                1
            })
        };
        let second = {
            let invocations = invocations.clone();
            group.do_call("k", || {
                invocations.fetch_add(1, Ordering::SeqCst);
                2
            })
        };

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(invocations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn errors_are_delivered_identically_to_every_waiter() {
        let group = Arc::new(FlightGroup::new());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let group = Arc::clone(&group);
                thread::spawn(move || {
                    group.do_call("k", || {
                        thread::sleep(Duration::from_millis(10));
                        Err::<i32, String>("boom".to_string())
                    })
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), Err("boom".to_string()));
        }
    }
}
