//! Locator-routed CRUD façade over the task table.
//!
//! Every read and write goes through this one dispatch point, so "which
//! table, which row" is decided in exactly one place and all callers get
//! the same validation and SQL construction. Item locators narrow the
//! operation to `id = ?`, ANDed with any caller-supplied filter.

use crate::contract::{COL_ID, COL_NAME, COL_SORT_ORDER, TABLE_NAME, TaskUri};
use crate::database::Database;
use crate::values::{RowSet, ValueSet};
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use std::fmt;
use std::sync::Arc;

/// Errors surfaced by provider operations.
///
/// None of these are caught or retried internally; they propagate to the
/// initiating caller, which is expected to log and leave state unchanged.
#[derive(Debug)]
pub enum ProviderError {
    /// The locator does not address a resource this provider serves, or
    /// addresses it in a shape the operation cannot use.
    UnrecognizedUri(String),
    /// The operation would violate a data constraint (for example, a
    /// missing or empty task name). No rows were written.
    Constraint(String),
    /// Any other failure from the underlying database.
    Sqlite(rusqlite::Error),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::UnrecognizedUri(detail) => write!(f, "unrecognized resource: {detail}"),
            ProviderError::Constraint(detail) => write!(f, "constraint violation: {detail}"),
            ProviderError::Sqlite(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<rusqlite::Error> for ProviderError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(e, message) = &err
            && e.code == rusqlite::ErrorCode::ConstraintViolation
        {
            let detail = message.clone().unwrap_or_else(|| err.to_string());
            return ProviderError::Constraint(detail);
        }
        ProviderError::Sqlite(err)
    }
}

/// CRUD façade for the tasks table.
///
/// Cheap to clone; all clones share the same [`Database`] handle.
#[derive(Clone)]
pub struct TaskProvider {
    db: Arc<Database>,
}

impl TaskProvider {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Run a SELECT against the resource behind `uri`.
    ///
    /// `projection` defaults to all columns; `selection` is a SQL filter
    /// with `?` placeholders bound from `selection_args`; `sort_order` is
    /// a raw ORDER BY expression.
    pub fn query(
        &self,
        uri: &TaskUri,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: &[Value],
        sort_order: Option<&str>,
    ) -> Result<RowSet, ProviderError> {
        log::debug!("query: called with uri {uri}");

        let columns = match projection {
            Some(columns) => columns.join(", "),
            None => "*".to_string(),
        };
        let mut sql = format!("SELECT {columns} FROM {TABLE_NAME}");

        let id_value;
        let mut params: Vec<&Value> = Vec::new();
        match uri {
            TaskUri::Collection => {
                if let Some(selection) = nonempty(selection) {
                    sql.push_str(&format!(" WHERE {selection}"));
                }
            }
            TaskUri::Item(id) => {
                id_value = Value::Integer(*id);
                let mut criteria = format!("{COL_ID} = ?");
                if let Some(selection) = nonempty(selection) {
                    criteria.push_str(&format!(" AND ({selection})"));
                }
                sql.push_str(&format!(" WHERE {criteria}"));
                params.push(&id_value);
            }
        }
        params.extend(selection_args);

        if let Some(sort_order) = nonempty(sort_order) {
            sql.push_str(&format!(" ORDER BY {sort_order}"));
        }
        log::debug!("query: sql is {sql}");

        let conn = self.db.conn();
        let mut stmt = conn.prepare(&sql)?;
        let column_names: Vec<String> = stmt.column_names().iter().map(|name| name.to_string()).collect();
        let column_count = column_names.len();

        let mut result = RowSet::new(column_names);
        let mut rows = stmt.query(params_from_iter(params))?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                values.push(row.get::<_, Value>(index)?);
            }
            result.push_row(values);
        }

        log::debug!("query: returning {} row(s)", result.len());
        Ok(result)
    }

    /// Insert one row and return its item locator.
    ///
    /// Only the collection locator accepts inserts. An omitted sort order
    /// persists as the default 0; a missing or empty name is a constraint
    /// violation and creates no row.
    pub fn insert(&self, uri: &TaskUri, values: &ValueSet) -> Result<TaskUri, ProviderError> {
        log::debug!("insert: called with uri {uri}");

        if let TaskUri::Item(_) = uri {
            return Err(ProviderError::UnrecognizedUri(format!("cannot insert into {uri}")));
        }
        ensure_name_not_blank(values)?;

        let mut columns: Vec<&str> = Vec::new();
        let mut params: Vec<&Value> = Vec::new();
        for (column, value) in values.iter() {
            columns.push(column);
            params.push(value);
        }

        let default_sort = Value::Integer(0);
        if values.get(COL_SORT_ORDER).is_none() {
            columns.push(COL_SORT_ORDER);
            params.push(&default_sort);
        }

        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!("INSERT INTO {TABLE_NAME} ({}) VALUES ({placeholders})", columns.join(", "));

        let conn = self.db.conn();
        conn.execute(&sql, params_from_iter(params))?;
        let id = conn.last_insert_rowid();

        let returned = TaskUri::for_task(id);
        log::debug!("insert: returning {returned}");
        Ok(returned)
    }

    /// Update matching rows; returns the affected-row count.
    pub fn update(
        &self,
        uri: &TaskUri,
        values: &ValueSet,
        selection: Option<&str>,
        selection_args: &[Value],
    ) -> Result<usize, ProviderError> {
        log::debug!("update: called with uri {uri}");

        if values.is_empty() {
            return Err(ProviderError::Constraint("update requires at least one value".to_string()));
        }
        ensure_name_not_blank(values)?;

        let assignments: Vec<String> = values.iter().map(|(column, _)| format!("{column} = ?")).collect();
        let mut sql = format!("UPDATE {TABLE_NAME} SET {}", assignments.join(", "));
        let mut params: Vec<&Value> = values.iter().map(|(_, value)| value).collect();

        let id_value;
        match uri {
            TaskUri::Collection => {
                if let Some(selection) = nonempty(selection) {
                    sql.push_str(&format!(" WHERE {selection}"));
                }
            }
            TaskUri::Item(id) => {
                id_value = Value::Integer(*id);
                let mut criteria = format!("{COL_ID} = ?");
                if let Some(selection) = nonempty(selection) {
                    criteria.push_str(&format!(" AND ({selection})"));
                }
                sql.push_str(&format!(" WHERE {criteria}"));
                params.push(&id_value);
            }
        }
        params.extend(selection_args);

        let conn = self.db.conn();
        let count = conn.execute(&sql, params_from_iter(params))?;
        log::debug!("update: returning {count}");
        Ok(count)
    }

    /// Delete matching rows; returns the affected-row count.
    pub fn delete(
        &self,
        uri: &TaskUri,
        selection: Option<&str>,
        selection_args: &[Value],
    ) -> Result<usize, ProviderError> {
        log::debug!("delete: called with uri {uri}");

        let mut sql = format!("DELETE FROM {TABLE_NAME}");
        let id_value;
        let mut params: Vec<&Value> = Vec::new();
        match uri {
            TaskUri::Collection => {
                if let Some(selection) = nonempty(selection) {
                    sql.push_str(&format!(" WHERE {selection}"));
                }
            }
            TaskUri::Item(id) => {
                id_value = Value::Integer(*id);
                let mut criteria = format!("{COL_ID} = ?");
                if let Some(selection) = nonempty(selection) {
                    criteria.push_str(&format!(" AND ({selection})"));
                }
                sql.push_str(&format!(" WHERE {criteria}"));
                params.push(&id_value);
            }
        }
        params.extend(selection_args);

        let conn = self.db.conn();
        let count = conn.execute(&sql, params_from_iter(params))?;
        log::debug!("delete: returning {count}");
        Ok(count)
    }
}

/// Persisted names are never empty; reject an explicit empty string
/// before it reaches SQLite (which would happily store it).
fn ensure_name_not_blank(values: &ValueSet) -> Result<(), ProviderError> {
    if let Some(Value::Text(name)) = values.get(COL_NAME)
        && name.is_empty()
    {
        return Err(ProviderError::Constraint(format!("{COL_NAME} must not be empty")));
    }
    Ok(())
}

fn nonempty(clause: Option<&str>) -> Option<&str> {
    clause.filter(|clause| !clause.is_empty())
}
