#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use portfolio_core::storage::StorageResult;
use portfolio_core::{
    KeyValueStore, MemoryKeyValueStore, MemoryRenderer, PortfolioConfig, ProjectDraft,
    ProjectRecord, ProjectRecordStore, StorageError,
};
use std::cell::Cell;
use std::rc::Rc;

pub type TestStore = ProjectRecordStore<SwitchableStore, MemoryRenderer, SteppingClock>;

/// Clock that advances one second on every read.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    next_ms: Rc<Cell<i64>>,
}

impl SteppingClock {
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            next_ms: Rc::new(Cell::new(at.timestamp_millis())),
        }
    }

    /// Moves the clock so the next read returns `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        self.next_ms.set(at.timestamp_millis());
    }
}

impl portfolio_core::Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let current = self.next_ms.get();
        self.next_ms.set(current + 1_000);
        Utc.timestamp_millis_opt(current).unwrap()
    }
}

/// Memory store whose reads and writes can be switched to fail from outside
/// the store.
#[derive(Debug, Clone, Default)]
pub struct SwitchableStore {
    pub inner: MemoryKeyValueStore,
    fail_writes: Rc<Cell<bool>>,
    fail_reads: Rc<Cell<bool>>,
}

impl SwitchableStore {
    pub fn failure_switch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.fail_writes)
    }

    pub fn read_failure_switch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.fail_reads)
    }
}

impl KeyValueStore for SwitchableStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        if self.fail_reads.get() {
            return Err(StorageError::Backend(format!("read of `{key}` refused")));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed: value.len(),
                limit: 0,
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
}

pub fn new_store() -> TestStore {
    store_over(SwitchableStore::default())
}

pub fn store_over(storage: SwitchableStore) -> TestStore {
    ProjectRecordStore::with_clock(
        storage,
        MemoryRenderer::new(),
        PortfolioConfig::default(),
        SteppingClock::starting_at(base_time()),
    )
}

pub fn soc_draft() -> ProjectDraft {
    ProjectDraft {
        title: "SOC Build".to_string(),
        category: "soc".to_string(),
        description: "Home SOC with Wazuh and ELK".to_string(),
        technologies: vec!["Wazuh".to_string(), "ELK".to_string()],
        features: vec!["Alerting".to_string()],
        icon: None,
    }
}

pub fn draft(title: &str, category: &str) -> ProjectDraft {
    ProjectDraft::new(title, category, format!("{title} description"))
}

/// Raw bytes currently held in the project slot.
pub fn slot_bytes(store: &TestStore) -> Option<Vec<u8>> {
    store
        .storage()
        .get(&store.config().storage_key)
        .unwrap()
}

/// Records currently held in the project slot.
pub fn persisted(store: &TestStore) -> Vec<ProjectRecord> {
    slot_bytes(store)
        .map(|bytes| serde_json::from_slice(&bytes).unwrap())
        .unwrap_or_default()
}
