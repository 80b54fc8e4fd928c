//! mdlegal-core: the list-management core of the MD Legal Suite dashboard
//!
//! Every dashboard page (cases, clients, staff, finance, support) is a
//! [`ListManager`] over one [`Entity`]: search, categorical filters, sort,
//! pagination and create/update/delete on an in-memory collection populated
//! from a [`RecordService`].

pub mod draft;
pub mod entities;
pub mod error;
pub mod format;
pub mod ids;
pub mod list_manager;
pub mod loader;
pub mod pagination;
pub mod query;
pub mod record;
pub mod schema;
pub mod service;
pub mod settings;

pub use draft::Draft;
pub use entities::Entity;
pub use error::{ListError, Result};
pub use ids::IdAllocator;
pub use list_manager::ListManager;
pub use loader::{LoadOutcome, LoadState};
pub use pagination::{Page, Pagination};
pub use query::{SortDirection, SortState, ViewQuery};
pub use record::{DynamicRecord, FieldKind, FieldValue, Record, RecordId};
pub use schema::EntitySchema;
pub use service::RecordService;
pub use settings::{SettingsBlob, SettingsKey, SettingsStore};

#[cfg(feature = "rt")]
pub use loader::LoadHandle;
#[cfg(feature = "rt")]
pub use service::MockService;
