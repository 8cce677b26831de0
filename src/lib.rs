//! Tasklist: a minimal task list backed by SQLite.
//!
//! Tasks (name, description, sort order) live in a single SQLite table
//! behind a locator-routed CRUD provider. List and detail screen
//! controllers handle loading, presentation, editing, and the
//! confirmation flows around destructive actions; a small CLI binary
//! (`tl`) hosts them in a terminal.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist::contract::COL_NAME;
//! use tasklist::{Database, TaskProvider, TaskUri, ValueSet};
//!
//! let db = Arc::new(Database::open_in_memory().unwrap());
//! let provider = TaskProvider::new(db);
//!
//! // Insert a task; the provider hands back its item locator
//! let mut values = ValueSet::new();
//! values.put(COL_NAME, "Buy milk".to_string());
//! let uri = provider.insert(&TaskUri::Collection, &values).unwrap();
//!
//! // Read it back by that locator
//! let rows = provider.query(&uri, None, None, &[], None).unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

pub mod contract;

mod adapter;
mod database;
mod detail_screen;
mod dialog;
mod list_screen;
mod loader;
mod provider;
mod types;
mod values;

// Re-export public API
pub use adapter::{DisplayRow, INSTRUCTIONS, TaskListAdapter};
pub use contract::{TaskUri, UnrecognizedUri};
pub use database::{DATABASE_NAME, DATABASE_VERSION, Database};
pub use detail_screen::{DetailEvent, DetailScreen, EditMode};
pub use dialog::{ConfigError, ConfirmAction, ConfirmationFlow, ConfirmationRequest, ConfirmationResponse};
pub use list_screen::{BackAction, FlowOutcome, ListScreen, Navigation, PaneLayout};
pub use loader::{QueryLoader, QueryRequest};
pub use provider::{ProviderError, TaskProvider};
pub use types::Task;
pub use values::{RowSet, ValueSet};

// Selection args and value sets speak SQLite's value type directly
pub use rusqlite::types::Value;
