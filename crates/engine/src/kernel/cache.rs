//! Memoized priority queries
//!
//! Priority queries cost solver calls, and the same (rule, history, call)
//! comes up again and again while auctions are explored. Each rule keeps a
//! [`PriorityCache`]; concurrent misses on one key compute the value once,
//! and the other callers wait for it. A cache that reaches its limit is
//! emptied before the next new key goes in.

use crate::dsl::PriorityOutcome;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use types::Call;

/// Everything a priority query depends on besides the rule itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriorityKey {
    pub session: u64,
    pub history: u64,
    pub call: Call,
    pub hand: u64,
}

/// Entries a rule keeps before starting over.
pub const DEFAULT_CACHE_LIMIT: usize = 4096;

#[derive(Debug)]
pub struct PriorityCache {
    entries: Mutex<HashMap<PriorityKey, Arc<OnceLock<PriorityOutcome>>>>,
    limit: usize,
}

impl Default for PriorityCache {
    fn default() -> Self {
        Self::with_limit(DEFAULT_CACHE_LIMIT)
    }
}

impl PriorityCache {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Mutex::default(),
            limit: limit.max(1),
        }
    }

    pub fn get_or_compute(
        &self,
        key: PriorityKey,
        compute: impl FnOnce() -> PriorityOutcome,
    ) -> PriorityOutcome {
        let cell = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if entries.len() >= self.limit && !entries.contains_key(&key) {
                entries.clear();
            }
            Arc::clone(entries.entry(key).or_default())
        };
        // The map lock is released before computing so other keys proceed.
        *cell.get_or_init(compute)
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn key(session: u64) -> PriorityKey {
        PriorityKey {
            session,
            history: 7,
            call: Call::Pass,
            hand: 11,
        }
    }

    #[test]
    fn test_hit_skips_computation() {
        let cache = PriorityCache::default();
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            PriorityOutcome::DoesNotApply
        };
        assert_eq!(cache.get_or_compute(key(1), compute), PriorityOutcome::DoesNotApply);
        assert_eq!(cache.get_or_compute(key(1), compute), PriorityOutcome::DoesNotApply);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.get_or_compute(key(2), compute);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_limit_bounds_growth() {
        let cache = PriorityCache::with_limit(3);
        for session in 0..10 {
            cache.get_or_compute(key(session), || PriorityOutcome::DoesNotApply);
            assert!(cache.len() <= 3);
        }
        // The most recent key survives the reset.
        let calls = AtomicUsize::new(0);
        cache.get_or_compute(key(9), || {
            calls.fetch_add(1, Ordering::SeqCst);
            PriorityOutcome::DoesNotApply
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_concurrent_misses_compute_once() {
        let cache = Arc::new(PriorityCache::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache.get_or_compute(key(3), || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(10));
                        PriorityOutcome::Undetermined
                    })
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), PriorityOutcome::Undetermined);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
