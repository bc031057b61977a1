//! Bounded, thread-safe LRU cache of loaded verification keys.
//!
//! Keyed by the Blake3 content digest of the raw image envelope. Entries are
//! `Arc<VerificationKey>` built *outside* the lock and inserted whole, so
//! concurrent verifications never observe a partially constructed entry.
//! Capacity is fixed at construction; zero disables caching entirely.
//! Eviction is least-recently-used, which bounds memory under adversarial
//! cache-key churn.

use spv_core::VerificationKey;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

/// Process- or host-scoped cache of loaded images.
///
/// Lifecycle is the owner's concern: the safe API takes `Option<&ImageCache>`
/// explicitly, and the FFI layer owns one lazily initialized instance for
/// the life of the process.
#[derive(Debug)]
pub struct ImageCache {
    cap: usize,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    map: HashMap<[u8; 32], Arc<VerificationKey>>,
    /// Ordering deque: front = LRU, back = MRU.
    order: VecDeque<[u8; 32]>,
}

impl ImageCache {
    /// Create a cache holding at most `cap` entries. `cap == 0` disables it.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            cap,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Configured capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a key by image digest, marking it most recently used.
    #[must_use]
    pub fn get(&self, digest: &[u8; 32]) -> Option<Arc<VerificationKey>> {
        let mut inner = self.lock();
        let hit = inner.map.get(digest).cloned();
        if hit.is_some() {
            touch_back(&mut inner.order, *digest);
        }
        hit
    }

    /// Insert a freshly loaded key, evicting the least recently used entry
    /// if the cache is full. No-op when capacity is zero.
    pub fn insert(&self, digest: [u8; 32], vk: Arc<VerificationKey>) {
        if self.cap == 0 {
            return;
        }
        let mut inner = self.lock();
        if !inner.map.contains_key(&digest) && inner.map.len() == self.cap {
            if let Some(evict) = inner.order.pop_front() {
                inner.map.remove(&evict);
            }
        }
        inner.map.insert(digest, vk);
        touch_back(&mut inner.order, digest);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another verification panicked mid-insert;
        // the map itself is always structurally whole.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn touch_back(order: &mut VecDeque<[u8; 32]>, k: [u8; 32]) {
    if let Some(pos) = order.iter().position(|x| *x == k) {
        order.remove(pos);
    }
    order.push_back(k);
}
