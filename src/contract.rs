//! Schema constants and resource locators for the tasks table.
//!
//! Everything that needs to name the table, its columns, or a row in it
//! goes through this module, so the provider never has to know where an
//! id sits inside a locator string.

use std::fmt;

/// Fixed authority prefix for task locators.
pub const AUTHORITY: &str = "com.tasklist.provider";

/// The one table this crate manages.
pub const TABLE_NAME: &str = "tasks";

/// Primary key column, assigned by storage on insert.
pub const COL_ID: &str = "id";

/// Required task name column.
pub const COL_NAME: &str = "Name";

/// Optional description column.
pub const COL_DESCRIPTION: &str = "Description";

/// Display ordering column.
pub const COL_SORT_ORDER: &str = "SortOrder";

/// Projection covering every task column, in schema order.
pub const FULL_PROJECTION: &[&str] = &[COL_ID, COL_NAME, COL_DESCRIPTION, COL_SORT_ORDER];

/// Display ordering used by the list screen: lower sort order first,
/// ties broken alphabetically by name.
pub const DEFAULT_SORT: &str = "SortOrder, Name";

/// A parsed resource locator for the tasks table.
///
/// Either the whole collection (`<authority>/tasks`) or a single row
/// (`<authority>/tasks/<id>`). Anything else is not a task resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskUri {
    /// The whole tasks table.
    Collection,

    /// One row, by id.
    Item(i64),
}

/// Error for locator strings that match no known resource shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedUri(pub String);

impl fmt::Display for UnrecognizedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized resource: {}", self.0)
    }
}

impl std::error::Error for UnrecognizedUri {}

impl TaskUri {
    /// Locator for a single task row.
    pub fn for_task(id: i64) -> Self {
        TaskUri::Item(id)
    }

    /// The id carried by an item locator.
    pub fn task_id(&self) -> Option<i64> {
        match self {
            TaskUri::Collection => None,
            TaskUri::Item(id) => Some(*id),
        }
    }

    /// Parse a locator string.
    ///
    /// Accepts `<authority>/tasks` and `<authority>/tasks/<id>` where
    /// `<id>` is a non-negative integer; everything else fails.
    pub fn parse(input: &str) -> Result<Self, UnrecognizedUri> {
        let err = || UnrecognizedUri(input.to_string());

        let rest = input.strip_prefix(AUTHORITY).ok_or_else(err)?;
        let rest = rest.strip_prefix('/').ok_or_else(err)?;

        match rest.split_once('/') {
            None if rest == TABLE_NAME => Ok(TaskUri::Collection),
            Some((table, id)) if table == TABLE_NAME => {
                let id = id.parse::<i64>().ok().filter(|id| *id >= 0).ok_or_else(err)?;
                Ok(TaskUri::Item(id))
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for TaskUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskUri::Collection => write!(f, "{AUTHORITY}/{TABLE_NAME}"),
            TaskUri::Item(id) => write!(f, "{AUTHORITY}/{TABLE_NAME}/{id}"),
        }
    }
}
