//! # Entity-Keyed Lock Table
//!
//! [`EntityLocks`] hands out one async mutex per key (product id, order id, ...).
//! Holding the [`EntityGuard`] for a key is the critical section for that entity:
//! two tasks working on the same key are serialised, while tasks on different keys
//! never wait for each other.
//!
//! ## Layout
//!
//! The table is an arena of slots (`Vec<Arc<Mutex<()>>>`) plus an index from key to
//! slot. The index sits behind a short `std::sync::Mutex` that is held only long
//! enough to look a key up or append a slot; it is never held while a slot is
//! awaited or owned, so it does not turn into a global lock.
//!
//! Each owner (a ledger, a service) creates its own table; nothing here is a
//! process-wide singleton, which keeps lock scope visible and testable.
//!
//! ## Cancellation
//!
//! [`EntityLocks::acquire`] gives up with [`FrameworkError::Cancelled`] if the
//! caller's token fires while it is waiting for the slot.

use crate::error::FrameworkError;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as SlotMutex, OwnedMutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::trace;

struct LockTable<K> {
    slots: Vec<Arc<SlotMutex<()>>>,
    index: HashMap<K, usize>,
}

/// Table of per-entity critical sections.
///
/// Slots are never released: the table grows with the set of keys ever locked,
/// so it is sized like the store whose entities it guards.
pub struct EntityLocks<K> {
    table: Mutex<LockTable<K>>,
}

/// Proof that the caller currently owns the critical section of `key`.
/// The section is released when the guard is dropped.
#[must_use = "the critical section ends as soon as the guard is dropped"]
pub struct EntityGuard<K> {
    key: K,
    _slot: OwnedMutexGuard<()>,
}

impl<K> EntityGuard<K> {
    /// The key this guard protects.
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K> Default for EntityLocks<K>
where
    K: Eq + Hash + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> EntityLocks<K>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new() -> Self {
        Self {
            table: Mutex::new(LockTable {
                slots: Vec::new(),
                index: HashMap::new(),
            }),
        }
    }

    /// Waits for exclusive ownership of `key`'s critical section.
    ///
    /// # Errors
    /// [`FrameworkError::Cancelled`] if `cancel` fires before the slot is obtained.
    pub async fn acquire(
        &self,
        key: &K,
        cancel: &CancellationToken,
    ) -> Result<EntityGuard<K>, FrameworkError> {
        if cancel.is_cancelled() {
            return Err(FrameworkError::Cancelled);
        }
        let slot = self.slot(key);
        trace!(%key, "Waiting for entity lock");
        let owned = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FrameworkError::Cancelled),
            owned = slot.lock_owned() => owned,
        };
        trace!(%key, "Entity lock acquired");
        Ok(EntityGuard {
            key: key.clone(),
            _slot: owned,
        })
    }

    /// Takes `key`'s critical section only if nobody holds it right now.
    pub fn try_acquire(&self, key: &K) -> Option<EntityGuard<K>> {
        let slot = self.slot(key);
        slot.try_lock_owned().ok().map(|owned| EntityGuard {
            key: key.clone(),
            _slot: owned,
        })
    }

    /// Number of keys that have ever been locked through this table.
    pub fn len(&self) -> usize {
        self.lock_table().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &K) -> Arc<SlotMutex<()>> {
        let mut table = self.lock_table();
        if let Some(&at) = table.index.get(key) {
            return Arc::clone(&table.slots[at]);
        }
        let slot = Arc::new(SlotMutex::new(()));
        let at = table.slots.len();
        table.slots.push(Arc::clone(&slot));
        table.index.insert(key.clone(), at);
        slot
    }

    fn lock_table(&self) -> std::sync::MutexGuard<'_, LockTable<K>> {
        // The index holds no invariants a panicking holder could break halfway.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = EntityLocks::<u32>::new();
        let cancel = CancellationToken::new();

        let guard = locks.acquire(&1, &cancel).await.unwrap();
        assert_eq!(*guard.key(), 1);
        assert!(locks.try_acquire(&1).is_none());

        drop(guard);
        assert!(locks.try_acquire(&1).is_some());
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn test_released_slots_are_kept_and_reused() {
        let locks = EntityLocks::<u32>::new();
        let cancel = CancellationToken::new();

        for key in [1, 2, 3] {
            drop(locks.acquire(&key, &cancel).await.unwrap());
        }
        assert_eq!(locks.len(), 3);

        for key in [3, 2, 1] {
            drop(locks.acquire(&key, &cancel).await.unwrap());
        }
        assert_eq!(locks.len(), 3);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_contend() {
        let locks = EntityLocks::<&'static str>::new();
        let cancel = CancellationToken::new();

        let _a = locks.acquire(&"a", &cancel).await.unwrap();
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&"b", &cancel))
            .await
            .expect("lock on another key must not wait");
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_waiting_acquire_is_cancellable() {
        let locks = Arc::new(EntityLocks::<u32>::new());
        let cancel = CancellationToken::new();
        let _held = locks.acquire(&7, &cancel).await.unwrap();

        let waiter_cancel = CancellationToken::new();
        let waiter = {
            let locks = Arc::clone(&locks);
            let token = waiter_cancel.clone();
            tokio::spawn(async move { locks.acquire(&7, &token).await.map(|_| ()) })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        waiter_cancel.cancel();

        let result = waiter.await.unwrap();
        assert!(matches!(result, Err(FrameworkError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancelled_token_fails_fast() {
        let locks = EntityLocks::<u32>::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(matches!(
            locks.acquire(&1, &cancel).await,
            Err(FrameworkError::Cancelled)
        ));
        assert!(locks.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_critical_section_is_never_shared() {
        let locks = Arc::new(EntityLocks::<u32>::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let max_seen = Arc::clone(&max_seen);
            handles.push(tokio::spawn(async move {
                let cancel = CancellationToken::new();
                let _guard = locks.acquire(&42, &cancel).await.unwrap();
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }
}
