//! Shared test infrastructure for tasklist integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use std::sync::Arc;
use tasklist::contract::{DEFAULT_SORT, FULL_PROJECTION};
use tasklist::{Database, RowSet, Task, TaskProvider, TaskUri, Value, ValueSet};

/// Test environment around an in-memory database.
pub struct TestEnv {
    pub provider: TaskProvider,
}

impl TestEnv {
    /// Create a new test environment with an empty task table.
    pub fn new() -> Self {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        Self {
            provider: TaskProvider::new(Arc::new(db)),
        }
    }

    /// Build a value set for a task.
    pub fn task_values(name: &str, description: Option<&str>, sort_order: i32) -> ValueSet {
        let mut values = ValueSet::new();
        values.put("Name", name.to_string());
        match description {
            Some(description) => values.put("Description", description.to_string()),
            None => values.put_null("Description"),
        }
        values.put("SortOrder", i64::from(sort_order));
        values
    }

    /// Insert a task and return its assigned id.
    pub fn insert_task(&self, name: &str, description: Option<&str>, sort_order: i32) -> i64 {
        let uri = self
            .provider
            .insert(&TaskUri::Collection, &Self::task_values(name, description, sort_order))
            .expect("Failed to insert task");
        uri.task_id().expect("insert returned a collection locator")
    }

    /// Query a task by id, reconstructing it from the row.
    pub fn query_task(&self, id: i64) -> Option<Task> {
        let rows = self
            .provider
            .query(&TaskUri::for_task(id), Some(FULL_PROJECTION), None, &[], None)
            .expect("Failed to query task");
        if rows.is_empty() {
            None
        } else {
            Some(Task::from_row(&rows, 0).expect("Failed to reconstruct task"))
        }
    }

    /// Query every task in display order.
    pub fn query_all(&self) -> RowSet {
        self.provider
            .query(&TaskUri::Collection, Some(FULL_PROJECTION), None, &[], Some(DEFAULT_SORT))
            .expect("Failed to query tasks")
    }

    /// Number of persisted tasks.
    pub fn task_count(&self) -> usize {
        self.query_all().len()
    }

    /// Update a single task by id.
    pub fn update_task(&self, id: i64, values: &ValueSet) -> usize {
        self.provider
            .update(&TaskUri::for_task(id), values, None, &[])
            .expect("Failed to update task")
    }

    /// Delete a single task by id.
    pub fn delete_task(&self, id: i64) -> usize {
        self.provider
            .delete(&TaskUri::for_task(id), None, &[])
            .expect("Failed to delete task")
    }

    /// Assert a stored text cell's value.
    pub fn assert_text(rows: &RowSet, row: usize, column: &str, expected: &str) {
        assert_eq!(
            rows.get(row, column),
            Some(&Value::Text(expected.to_string())),
            "unexpected value in {column} at row {row}"
        );
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
