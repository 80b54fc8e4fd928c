//! Record services
//!
//! [`RecordService`] is the async collaborator a page loads from and
//! mirrors mutations to. [`MockService`] keeps its own in-memory collection
//! and simulates network latency on `list`.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{Record, RecordId};

/// Default simulated latency for `list`, inside the 1000–1500 ms range pages use
pub const DEFAULT_LATENCY_MS: u64 = 1200;

/// Async record source/sink for one entity
#[async_trait]
pub trait RecordService<R: Record>: Send + Sync {
    /// Fetch the full collection
    async fn list(&self) -> Result<Vec<R>>;

    /// Store a new record and return it with its assigned identifier
    async fn create(&self, record: R) -> Result<R>;

    /// Replace the record with `id`; `None` when it does not exist
    async fn update(&self, id: RecordId, patch: R) -> Result<Option<R>>;

    /// Remove the record with `id`; `false` when it did not exist
    async fn delete(&self, id: RecordId) -> Result<bool>;
}

#[cfg(feature = "rt")]
pub use mock::MockService;

#[cfg(feature = "rt")]
mod mock {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use tracing::debug;

    use super::{RecordService, DEFAULT_LATENCY_MS};
    use crate::error::{ListError, Result};
    use crate::ids::IdAllocator;
    use crate::record::{Record, RecordId};

    struct Store<R> {
        records: Vec<R>,
        ids: IdAllocator,
    }

    /// In-memory service with simulated latency and optional failure
    pub struct MockService<R> {
        store: Mutex<Store<R>>,
        latency: Duration,
        failure: Option<String>,
    }

    impl<R: Record> MockService<R> {
        /// Service over a fixed dataset with the default latency
        pub fn new(records: Vec<R>) -> Self {
            let ids = IdAllocator::seeded(records.iter().map(Record::id));
            Self {
                store: Mutex::new(Store { records, ids }),
                latency: Duration::from_millis(DEFAULT_LATENCY_MS),
                failure: None,
            }
        }

        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        /// Make every `list` call fail with `reason`
        pub fn failing(mut self, reason: impl Into<String>) -> Self {
            self.failure = Some(reason.into());
            self
        }

        pub fn latency(&self) -> Duration {
            self.latency
        }

        /// Current number of stored records
        pub async fn len(&self) -> usize {
            self.store.lock().await.records.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    #[async_trait]
    impl<R: Record> RecordService<R> for MockService<R> {
        async fn list(&self) -> Result<Vec<R>> {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if let Some(reason) = &self.failure {
                return Err(ListError::load_failed(reason.clone()));
            }

            let store = self.store.lock().await;
            debug!(count = store.records.len(), "mock service list");
            Ok(store.records.clone())
        }

        async fn create(&self, mut record: R) -> Result<R> {
            let mut store = self.store.lock().await;
            let id = store.ids.allocate();
            record.set_id(id);
            store.records.push(record.clone());
            debug!(%id, "mock service create");
            Ok(record)
        }

        async fn update(&self, id: RecordId, mut patch: R) -> Result<Option<R>> {
            let mut store = self.store.lock().await;
            let Some(slot) = store.records.iter_mut().find(|r| r.id() == id) else {
                return Ok(None);
            };
            patch.set_id(id);
            *slot = patch.clone();
            Ok(Some(patch))
        }

        async fn delete(&self, id: RecordId) -> Result<bool> {
            let mut store = self.store.lock().await;
            let before = store.records.len();
            store.records.retain(|r| r.id() != id);
            Ok(store.records.len() != before)
        }
    }

}
