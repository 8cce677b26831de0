//! Add/edit screen controller.
//!
//! Holds the three editable fields as raw text the way the input widgets
//! would, tracks whether anything differs from the loaded snapshot, and
//! writes only what changed. The host learns the outcome from the typed
//! event `save` returns; there is no callback interface to discover.

use crate::contract::{COL_DESCRIPTION, COL_NAME, COL_SORT_ORDER, TaskUri};
use crate::provider::TaskProvider;
use crate::types::Task;
use crate::values::ValueSet;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Whether the screen is creating a task or editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Add,
    Edit(Task),
}

/// Outcome the host receives when the screen finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailEvent {
    Saved,
    Cancelled,
}

/// Controller for the add/edit screen.
#[derive(Debug)]
pub struct DetailScreen {
    mode: EditMode,
    name: String,
    description: String,
    sort_order: String,
}

impl DetailScreen {
    /// Screen for creating a new task, all fields blank.
    pub fn add() -> Self {
        log::debug!("add: creating empty detail screen");
        Self {
            mode: EditMode::Add,
            name: String::new(),
            description: String::new(),
            sort_order: String::new(),
        }
    }

    /// Screen for editing `task`, fields pre-filled from the snapshot.
    pub fn edit(task: Task) -> Self {
        log::debug!("edit: task details found, editing task {}", task.id);
        Self {
            name: task.name.clone(),
            description: task.description.clone().unwrap_or_default(),
            sort_order: task.sort_order.to_string(),
            mode: EditMode::Edit(task),
        }
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Raw sort order text. Blank parses as 0 on save.
    pub fn set_sort_order(&mut self, sort_order: impl Into<String>) {
        self.sort_order = sort_order.into();
    }

    fn parsed_sort_order(&self) -> Result<i32> {
        let text = self.sort_order.trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse().with_context(|| format!("sort order must be a number, got {text:?}"))
    }

    /// True when the current field values differ from the snapshot the
    /// screen was opened with.
    pub fn is_dirty(&self) -> bool {
        match &self.mode {
            EditMode::Add => {
                !self.name.is_empty() || !self.description.is_empty() || !self.sort_order.trim().is_empty()
            }
            EditMode::Edit(task) => {
                self.name != task.name
                    || self.description != task.description.clone().unwrap_or_default()
                    || self.parsed_sort_order().map(|so| so != task.sort_order).unwrap_or(true)
            }
        }
    }

    /// True when there is nothing unsaved and the screen may be closed
    /// without asking.
    pub fn can_close(&self) -> bool {
        !self.is_dirty()
    }

    /// Persist the fields and report the outcome.
    ///
    /// Editing writes a value set of only the changed fields, and skips
    /// the database entirely when nothing changed. Adding skips the
    /// insert when the name is blank, since a nameless task can never be
    /// persisted. Both paths finish with [`DetailEvent::Saved`].
    pub fn save(&self, provider: &TaskProvider) -> Result<DetailEvent> {
        let sort_order = self.parsed_sort_order()?;

        match &self.mode {
            EditMode::Edit(task) => {
                let mut values = ValueSet::new();
                if self.name != task.name {
                    values.put(COL_NAME, self.name.clone());
                }
                if self.description != task.description.clone().unwrap_or_default() {
                    values.put(COL_DESCRIPTION, self.description.clone());
                }
                if sort_order != task.sort_order {
                    values.put(COL_SORT_ORDER, i64::from(sort_order));
                }

                if values.is_empty() {
                    log::debug!("save: nothing changed, skipping update");
                } else {
                    log::debug!("save: updating task {}", task.id);
                    provider
                        .update(&TaskUri::for_task(task.id), &values, None, &[])
                        .context("Failed to update task")?;
                }
            }
            EditMode::Add => {
                if self.name.is_empty() {
                    log::debug!("save: blank name, skipping insert");
                } else {
                    log::debug!("save: adding new task");
                    let mut values = ValueSet::new();
                    values.put(COL_NAME, self.name.clone());
                    values.put(COL_DESCRIPTION, self.description.clone());
                    values.put(COL_SORT_ORDER, i64::from(sort_order));
                    provider
                        .insert(&TaskUri::Collection, &values)
                        .context("Failed to insert task")?;
                }
            }
        }

        Ok(DetailEvent::Saved)
    }
}
