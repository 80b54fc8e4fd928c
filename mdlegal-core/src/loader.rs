//! Loading state machine and the cancellable load task
//!
//! `Idle → Loading → Loaded | Failed`, with `Failed → Loading` on retry and
//! `Loaded → Loading` on refresh. The load itself runs as a task owned by a
//! [`LoadHandle`]; dropping the handle aborts it, so a view that goes away
//! mid-delay never receives records.

use serde::Serialize;

/// Where a list is in its initial population
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Reason shown in the retry banner
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// How a load task ended
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<R> {
    Loaded(Vec<R>),
    Failed(String),
    Cancelled,
}

#[cfg(feature = "rt")]
pub use task::LoadHandle;

#[cfg(feature = "rt")]
mod task {
    use std::sync::Arc;

    use tokio::task::JoinHandle;
    use tracing::debug;

    use super::LoadOutcome;
    use crate::error::{ListError, Result};
    use crate::record::Record;
    use crate::service::RecordService;

    /// Owner of an in-flight load; aborts the task when dropped
    pub struct LoadHandle<R> {
        task: Option<JoinHandle<Result<Vec<R>>>>,
    }

    impl<R: Record> LoadHandle<R> {
        /// Start `service.list()` on the runtime
        pub fn spawn<S>(service: Arc<S>) -> Self
        where
            S: RecordService<R> + ?Sized + 'static,
        {
            let task = tokio::spawn(async move { service.list().await });
            Self { task: Some(task) }
        }

        /// Abort the load; a later `finish` reports `Cancelled`
        pub fn cancel(&mut self) {
            if let Some(task) = self.task.take() {
                debug!("load cancelled");
                task.abort();
            }
        }

        pub fn is_finished(&self) -> bool {
            self.task.as_ref().map_or(true, JoinHandle::is_finished)
        }

        /// Wait for the task and classify how it ended
        pub async fn finish(mut self) -> LoadOutcome<R> {
            let Some(task) = self.task.take() else {
                return LoadOutcome::Cancelled;
            };

            match task.await {
                Ok(Ok(records)) => LoadOutcome::Loaded(records),
                Ok(Err(ListError::LoadFailed { reason })) => LoadOutcome::Failed(reason),
                Ok(Err(err)) => LoadOutcome::Failed(err.to_string()),
                Err(err) if err.is_cancelled() => LoadOutcome::Cancelled,
                Err(err) => LoadOutcome::Failed(format!("load task panicked: {}", err)),
            }
        }
    }

    impl<R> Drop for LoadHandle<R> {
        fn drop(&mut self) {
            if let Some(task) = self.task.take() {
                task.abort();
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use std::time::Duration;

        use super::*;
        use crate::record::DynamicRecord;
        use crate::service::MockService;

        fn service(latency_ms: u64) -> Arc<MockService<DynamicRecord>> {
            Arc::new(
                MockService::new(vec![DynamicRecord::new(1).with("name", "Ana")])
                    .with_latency(Duration::from_millis(latency_ms)),
            )
        }

        #[tokio::test(start_paused = true)]
        async fn finishes_after_delay() {
            let handle = LoadHandle::spawn(service(1000));
            match handle.finish().await {
                LoadOutcome::Loaded(records) => assert_eq!(records.len(), 1),
                other => panic!("unexpected outcome: {:?}", other),
            }
        }

        #[tokio::test(start_paused = true)]
        async fn cancel_before_delay_elapses() {
            let mut handle = LoadHandle::spawn(service(1500));
            tokio::time::sleep(Duration::from_millis(500)).await;
            assert!(!handle.is_finished());

            handle.cancel();
            assert_eq!(handle.finish().await, LoadOutcome::Cancelled);
        }

        #[tokio::test]
        async fn failure_is_reported() {
            let svc = Arc::new(
                MockService::<DynamicRecord>::new(vec![])
                    .with_latency(Duration::ZERO)
                    .failing("offline"),
            );
            let outcome = LoadHandle::spawn(svc).finish().await;
            assert_eq!(
                outcome,
                LoadOutcome::Failed("offline".to_string())
            );
        }
    }
}
