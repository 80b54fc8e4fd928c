//! Command implementations for the mdlegal CLI

pub mod list;
pub mod session;
pub mod settings;

use std::sync::Arc;
use std::time::Duration;

use mdlegal_core::{Entity, ListManager, MockService};

use crate::config::CliConfig;

// Re-export main dispatcher functions for flat access from main.rs
pub use list::run_list;
pub use session::run_session;
pub use settings::run_settings;

/// Settings shared by every command after config and flags are resolved
#[derive(Debug, Clone)]
pub struct Context {
    pub config: CliConfig,
    /// Simulated service latency
    pub latency: Duration,
}

impl Context {
    pub fn new(config: CliConfig, no_delay: bool) -> Self {
        let latency = config.latency(no_delay);
        Self { config, latency }
    }

    /// Mock service over the entity's dataset
    pub fn service<E: Entity>(&self) -> Arc<MockService<E>> {
        Arc::new(MockService::new(E::fixtures()).with_latency(self.latency))
    }

    /// Idle list for the entity, honoring a page size override
    pub fn list_manager<E: Entity>(&self, page_size: Option<usize>) -> ListManager<E> {
        let list = ListManager::new(*E::schema());
        match page_size.or(self.config.page_size) {
            Some(size) => list.with_page_size(size),
            None => list,
        }
    }
}
