//! Core data types for the task list.

use crate::contract::{COL_DESCRIPTION, COL_ID, COL_NAME, COL_SORT_ORDER};
use crate::values::RowSet;
use eyre::Result;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// A single task.
///
/// Instances read back from storage are disconnected snapshots: they hold
/// no reference to the database, and edits must be re-submitted through
/// the provider to take effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Row id, assigned by storage on insert.
    pub id: i64,

    /// Display name. Never empty for a persisted task.
    pub name: String,

    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display ordering. Lower sorts first; ties break alphabetically by name.
    #[serde(default)]
    pub sort_order: i32,
}

impl Task {
    /// Reconstruct a task from one row of a query result.
    ///
    /// The projection behind `rows` must include all four task columns;
    /// a missing column or an unusable value is an error, not a default.
    pub fn from_row(rows: &RowSet, row: usize) -> Result<Self> {
        let id = match rows.get(row, COL_ID) {
            Some(Value::Integer(id)) => *id,
            other => eyre::bail!("row {row} has no usable {COL_ID} value: {other:?}"),
        };

        let name = match rows.get(row, COL_NAME) {
            Some(Value::Text(name)) => name.clone(),
            other => eyre::bail!("row {row} has no usable {COL_NAME} value: {other:?}"),
        };

        let description = match rows.get(row, COL_DESCRIPTION) {
            Some(Value::Text(description)) => Some(description.clone()),
            Some(Value::Null) => None,
            other => eyre::bail!("row {row} has no usable {COL_DESCRIPTION} value: {other:?}"),
        };

        // SortOrder carries no NOT NULL constraint; a NULL cell reads back
        // as the default ordering
        let sort_order = match rows.get(row, COL_SORT_ORDER) {
            Some(Value::Integer(sort_order)) => *sort_order as i32,
            Some(Value::Null) => 0,
            other => eyre::bail!("row {row} has no usable {COL_SORT_ORDER} value: {other:?}"),
        };

        Ok(Task { id, name, description, sort_order })
    }
}
