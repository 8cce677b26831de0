//! Column→value pairs and materialized query results.
//!
//! `ValueSet` carries values into insert/update; `RowSet` carries query
//! results back out. Both are untyped on purpose: the provider passes
//! them through to SQLite without interpreting the data, and consumers
//! reconstruct typed entities from the rows they asked for.

use rusqlite::types::Value;

/// An ordered set of column→value pairs for insert and update calls.
///
/// Putting a value for a column that is already present replaces the
/// earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSet {
    entries: Vec<(String, Value)>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column's value, replacing any existing entry.
    pub fn put(&mut self, column: &str, value: impl Into<Value>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == column) {
            entry.1 = value;
        } else {
            self.entries.push((column.to_string(), value));
        }
    }

    /// Set a column to SQL NULL.
    pub fn put_null(&mut self, column: &str) {
        self.put(column, Value::Null);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries.iter().find(|entry| entry.0 == column).map(|entry| &entry.1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(column, value)| (column.as_str(), value))
    }
}

/// A materialized query result: column names plus rows of values.
///
/// The provider returns one of these per query; the adapter holds one at
/// a time. Dropping a `RowSet` releases it, and whoever swapped it out is
/// responsible for doing so.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub(crate) fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows (zero for an empty result).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Value at (row, column name), if both exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut values = ValueSet::new();
        values.put("Name", "Buy milk".to_string());
        values.put("SortOrder", 3i64);

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("Name"), Some(&Value::Text("Buy milk".to_string())));
        assert_eq!(values.get("SortOrder"), Some(&Value::Integer(3)));
        assert_eq!(values.get("Description"), None);
    }

    #[test]
    fn test_put_replaces_existing() {
        let mut values = ValueSet::new();
        values.put("SortOrder", 1i64);
        values.put("SortOrder", 5i64);

        assert_eq!(values.len(), 1);
        assert_eq!(values.get("SortOrder"), Some(&Value::Integer(5)));
    }

    #[test]
    fn test_put_null() {
        let mut values = ValueSet::new();
        values.put_null("Description");
        assert_eq!(values.get("Description"), Some(&Value::Null));
    }

    #[test]
    fn test_row_set_lookup() {
        let mut rows = RowSet::new(vec!["id".to_string(), "Name".to_string()]);
        rows.push_row(vec![Value::Integer(1), Value::Text("First".to_string())]);
        rows.push_row(vec![Value::Integer(2), Value::Text("Second".to_string())]);

        assert_eq!(rows.len(), 2);
        assert!(!rows.is_empty());
        assert_eq!(rows.column_index("Name"), Some(1));
        assert_eq!(rows.get(1, "Name"), Some(&Value::Text("Second".to_string())));
        assert_eq!(rows.get(2, "Name"), None);
        assert_eq!(rows.get(0, "Missing"), None);
    }
}
