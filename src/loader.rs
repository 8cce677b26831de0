//! Background query loading.
//!
//! Queries run on a worker thread so the interactive side never blocks on
//! the database. The returned handle is the delivery contract: dropping
//! it while a load is outstanding discards the result instead of applying
//! it to a screen that no longer exists. There are no timeouts and no
//! retries; a failed query surfaces its error once, on delivery.

use crate::contract::{DEFAULT_SORT, FULL_PROJECTION, TaskUri};
use crate::provider::{ProviderError, TaskProvider};
use crate::values::RowSet;
use eyre::{Context, Result};
use rusqlite::types::Value;
use std::sync::mpsc;
use std::thread;

/// Parameters for a background query.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub uri: TaskUri,
    pub projection: Option<Vec<String>>,
    pub selection: Option<String>,
    pub selection_args: Vec<Value>,
    pub sort_order: Option<String>,
}

impl QueryRequest {
    /// The list screen's standard request: every column, ordered by sort
    /// order and then name.
    pub fn task_list() -> Self {
        Self {
            uri: TaskUri::Collection,
            projection: Some(FULL_PROJECTION.iter().map(|column| column.to_string()).collect()),
            selection: None,
            selection_args: Vec::new(),
            sort_order: Some(DEFAULT_SORT.to_string()),
        }
    }
}

/// Handle to an in-flight background query.
pub struct QueryLoader {
    rx: mpsc::Receiver<Result<RowSet, ProviderError>>,
}

impl QueryLoader {
    /// Start the query on a worker thread.
    pub fn spawn(provider: TaskProvider, request: QueryRequest) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            log::debug!("loader: running query for {}", request.uri);
            let projection: Option<Vec<&str>> = request
                .projection
                .as_ref()
                .map(|columns| columns.iter().map(String::as_str).collect());

            let result = provider.query(
                &request.uri,
                projection.as_deref(),
                request.selection.as_deref(),
                &request.selection_args,
                request.sort_order.as_deref(),
            );

            // the receiver may already be gone; its result is then discarded
            if tx.send(result).is_err() {
                log::debug!("loader: result discarded, receiver went away");
            }
        });

        Self { rx }
    }

    /// Poll for a finished load without blocking.
    pub fn try_result(&self) -> Option<Result<RowSet>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result.map_err(Into::into)),
            Err(_) => None,
        }
    }

    /// Block until the load finishes and take its result.
    pub fn wait(self) -> Result<RowSet> {
        let result = self
            .rx
            .recv()
            .context("Query worker disappeared before delivering a result")?;
        Ok(result?)
    }
}
