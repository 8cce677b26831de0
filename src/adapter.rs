//! Binds query results to list presentation rows.

use crate::types::Task;
use crate::values::RowSet;
use eyre::Result;

/// Instructional text shown when no tasks exist yet.
pub const INSTRUCTIONS: &str = "Use the add action to create new tasks.\n\n\
    Tasks with lower sort orders are placed higher up in the list. \
    Tasks with the same sort order are sorted alphabetically by name.\n\n\
    Each task has edit and delete actions if you want to change its \
    details or remove it.";

/// One presented row.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayRow {
    /// Placeholder shown when no real data is loaded. Carries no edit or
    /// delete actions, and must not be mistaken for a task.
    Instructions(&'static str),

    /// A real task row, with edit and delete affordances.
    Task(Task),
}

type TaskCallback = Box<dyn FnMut(Task)>;
type Observer = Box<dyn FnMut()>;

/// Maps an ordered query result to display rows.
///
/// With no result set (or an empty one) the adapter presents exactly one
/// [`DisplayRow::Instructions`] row; otherwise one row per record. Row
/// actions hand a reconstructed [`Task`] snapshot to the caller-supplied
/// callbacks.
#[derive(Default)]
pub struct TaskListAdapter {
    rows: Option<RowSet>,
    on_edit: Option<TaskCallback>,
    on_delete: Option<TaskCallback>,
    observers: Vec<Observer>,
}

impl TaskListAdapter {
    /// New adapter with no data; it presents instructions until rows are
    /// swapped in.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_edit_listener(&mut self, listener: impl FnMut(Task) + 'static) {
        self.on_edit = Some(Box::new(listener));
    }

    pub fn set_delete_listener(&mut self, listener: impl FnMut(Task) + 'static) {
        self.on_delete = Some(Box::new(listener));
    }

    /// Register to be notified whenever the backing rows are replaced.
    pub fn register_observer(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn data_rows(&self) -> Option<&RowSet> {
        self.rows.as_ref().filter(|rows| !rows.is_empty())
    }

    /// Number of presentation rows. Empty or absent data still presents
    /// one row: the instructions placeholder.
    pub fn item_count(&self) -> usize {
        match self.data_rows() {
            Some(rows) => rows.len(),
            None => 1,
        }
    }

    /// The row to present at `position`.
    pub fn bind(&self, position: usize) -> Result<DisplayRow> {
        match self.data_rows() {
            None => {
                if position != 0 {
                    eyre::bail!("placeholder view has exactly one row, got position {position}");
                }
                log::debug!("bind: providing instructions");
                Ok(DisplayRow::Instructions(INSTRUCTIONS))
            }
            Some(_) => Ok(DisplayRow::Task(self.task_at(position)?)),
        }
    }

    /// Reconstruct the task behind a data row.
    pub fn task_at(&self, position: usize) -> Result<Task> {
        let rows = self
            .data_rows()
            .ok_or_else(|| eyre::eyre!("no task rows are loaded"))?;
        if position >= rows.len() {
            eyre::bail!("position {position} is out of range ({} rows)", rows.len());
        }
        Task::from_row(rows, position)
    }

    /// Invoke the edit callback for the task at `position`.
    pub fn click_edit(&mut self, position: usize) -> Result<()> {
        let task = self.task_at(position)?;
        if let Some(listener) = self.on_edit.as_mut() {
            listener(task);
        }
        Ok(())
    }

    /// Invoke the delete callback for the task at `position`.
    pub fn click_delete(&mut self, position: usize) -> Result<()> {
        let task = self.task_at(position)?;
        if let Some(listener) = self.on_delete.as_mut() {
            listener(task);
        }
        Ok(())
    }

    /// Replace the backing rows, notify observers, and hand back the
    /// previous rows. Releasing the old result set is the caller's
    /// responsibility, not the adapter's.
    pub fn swap_rows(&mut self, rows: Option<RowSet>) -> Option<RowSet> {
        log::debug!(
            "swap_rows: replacing {} row(s) with {}",
            self.rows.as_ref().map(RowSet::len).unwrap_or(0),
            rows.as_ref().map(RowSet::len).unwrap_or(0),
        );
        let previous = std::mem::replace(&mut self.rows, rows);
        for observer in &mut self.observers {
            observer();
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{COL_DESCRIPTION, COL_ID, COL_NAME, COL_SORT_ORDER};
    use rusqlite::types::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rows_with(names: &[&str]) -> RowSet {
        let mut rows = RowSet::new(vec![
            COL_ID.to_string(),
            COL_NAME.to_string(),
            COL_DESCRIPTION.to_string(),
            COL_SORT_ORDER.to_string(),
        ]);
        for (index, name) in names.iter().enumerate() {
            rows.push_row(vec![
                Value::Integer(index as i64 + 1),
                Value::Text(name.to_string()),
                Value::Null,
                Value::Integer(0),
            ]);
        }
        rows
    }

    #[test]
    fn test_empty_adapter_presents_instructions() {
        let adapter = TaskListAdapter::new();

        assert_eq!(adapter.item_count(), 1);
        assert_eq!(adapter.bind(0).unwrap(), DisplayRow::Instructions(INSTRUCTIONS));
        assert!(adapter.bind(1).is_err());
    }

    #[test]
    fn test_empty_row_set_presents_instructions() {
        let mut adapter = TaskListAdapter::new();
        adapter.swap_rows(Some(rows_with(&[])));

        assert_eq!(adapter.item_count(), 1);
        assert!(matches!(adapter.bind(0).unwrap(), DisplayRow::Instructions(_)));
    }

    #[test]
    fn test_data_rows_present_tasks() {
        let mut adapter = TaskListAdapter::new();
        adapter.swap_rows(Some(rows_with(&["First", "Second"])));

        assert_eq!(adapter.item_count(), 2);
        match adapter.bind(1).unwrap() {
            DisplayRow::Task(task) => {
                assert_eq!(task.id, 2);
                assert_eq!(task.name, "Second");
            }
            other => panic!("expected a task row, got {other:?}"),
        }
    }

    #[test]
    fn test_click_callbacks_receive_reconstructed_task() {
        let mut adapter = TaskListAdapter::new();
        adapter.swap_rows(Some(rows_with(&["Only"])));

        let edited: Rc<RefCell<Option<Task>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&edited);
        adapter.set_edit_listener(move |task| *sink.borrow_mut() = Some(task));

        adapter.click_edit(0).unwrap();
        let task = edited.borrow().clone().expect("edit listener not called");
        assert_eq!(task.name, "Only");
        assert_eq!(task.id, 1);
    }

    #[test]
    fn test_click_on_placeholder_fails() {
        let mut adapter = TaskListAdapter::new();
        assert!(adapter.click_delete(0).is_err());
    }

    #[test]
    fn test_swap_notifies_and_returns_previous() {
        let mut adapter = TaskListAdapter::new();
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);
        adapter.register_observer(move || *counter.borrow_mut() += 1);

        let first = rows_with(&["One"]);
        assert_eq!(adapter.swap_rows(Some(first.clone())), None);
        assert_eq!(*notified.borrow(), 1);

        let previous = adapter.swap_rows(None);
        assert_eq!(previous, Some(first));
        assert_eq!(*notified.borrow(), 2);
        assert_eq!(adapter.item_count(), 1);
    }
}
