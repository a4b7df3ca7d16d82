use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::model::{Pair, WarningRecord};

/// Persistent warning history keyed by [`Pair`].
///
/// `append_warning` must be atomic: the returned count includes the appended
/// record and no concurrent append for the same pair.
#[async_trait]
pub trait WarningStore: Send + Sync {
    async fn append_warning(&self, pair: Pair, record: &WarningRecord) -> anyhow::Result<u64>;

    async fn count(&self, pair: Pair) -> anyhow::Result<u64>;

    /// Returns the number of records removed.
    async fn clear_warnings(&self, pair: Pair) -> anyhow::Result<u64>;

    /// Oldest first.
    async fn list_warnings(&self, pair: Pair) -> anyhow::Result<Vec<WarningRecord>>;
}

/// Process-local store, used by tests and DB-less runs.
#[derive(Debug, Default)]
pub struct MemoryWarningStore {
    records: Mutex<HashMap<Pair, Vec<WarningRecord>>>,
}

impl MemoryWarningStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<Pair, Vec<WarningRecord>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WarningStore for MemoryWarningStore {
    async fn append_warning(&self, pair: Pair, record: &WarningRecord) -> anyhow::Result<u64> {
        let mut records = self.records();
        let history = records.entry(pair).or_default();
        history.push(record.clone());
        Ok(history.len() as u64)
    }

    async fn count(&self, pair: Pair) -> anyhow::Result<u64> {
        Ok(self.records().get(&pair).map_or(0, |history| history.len() as u64))
    }

    async fn clear_warnings(&self, pair: Pair) -> anyhow::Result<u64> {
        Ok(self
            .records()
            .remove(&pair)
            .map_or(0, |history| history.len() as u64))
    }

    async fn list_warnings(&self, pair: Pair) -> anyhow::Result<Vec<WarningRecord>> {
        Ok(self.records().get(&pair).cloned().unwrap_or_default())
    }
}
