use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::model::Pair;

type Slot = Arc<AsyncMutex<()>>;

/// One async mutex per pair, created on first use and dropped once nobody
/// holds or waits for it.
#[derive(Debug, Default)]
pub struct PairLocks {
    slots: Mutex<HashMap<Pair, Slot>>,
}

impl PairLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, pair: Pair) -> PairGuard<'_> {
        let slot = self.slots().entry(pair).or_default().clone();
        let guard = slot.clone().lock_owned().await;

        PairGuard {
            locks: self,
            pair,
            slot,
            guard: Some(guard),
        }
    }

    /// Number of pairs with a live lock.
    pub fn active(&self) -> usize {
        self.slots().len()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<Pair, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct PairGuard<'a> {
    locks: &'a PairLocks,
    pair: Pair,
    slot: Slot,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PairGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();

        // Map entry + this guard's handle: nobody else is waiting.
        let mut slots = self.locks.slots();
        if Arc::strong_count(&self.slot) == 2 {
            slots.remove(&self.pair);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::PairLocks;
    use crate::model::Pair;

    #[tokio::test]
    async fn released_locks_are_pruned() {
        let locks = PairLocks::new();
        {
            let _guard = locks.acquire(Pair::new(1, 1)).await;
            assert_eq!(locks.active(), 1);
        }
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn different_pairs_do_not_block() {
        let locks = PairLocks::new();
        let _first = locks.acquire(Pair::new(1, 1)).await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(Pair::new(1, 2))).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn same_pair_waits_for_release() {
        let locks = Arc::new(PairLocks::new());
        let pair = Pair::new(7, 7);
        let guard = locks.acquire(pair).await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(pair).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
        assert_eq!(locks.active(), 0);
    }
}
