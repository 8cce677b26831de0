//! List screen orchestration: loading, navigation, and destructive flows.

use crate::adapter::TaskListAdapter;
use crate::contract::TaskUri;
use crate::detail_screen::{DetailEvent, DetailScreen};
use crate::dialog::{ConfirmAction, ConfirmationFlow, ConfirmationRequest, ConfirmationResponse};
use crate::loader::{QueryLoader, QueryRequest};
use crate::provider::TaskProvider;
use crate::types::Task;
use eyre::Result;

/// How the hosting window is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneLayout {
    /// The detail screen is presented standalone, replacing the list.
    SinglePane,
    /// The detail screen is hosted in a pane alongside the list.
    TwoPane,
}

/// What the host should do with an add/edit request.
#[derive(Debug)]
pub enum Navigation {
    /// Two-pane: the detail screen is now hosted alongside the list;
    /// reach it through [`ListScreen::detail_mut`].
    InPane,
    /// Single-pane: present the returned screen standalone.
    Detached(DetailScreen),
}

/// What the host should do after a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Nothing blocks closing; the host may tear the screen down.
    Close,
    /// An abandon-edit confirmation is now pending; show it and feed the
    /// response to [`ListScreen::resolve_confirmation`].
    ConfirmationShown,
}

/// Host-visible outcome of resolving a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Rows were deleted; the list should be reloaded.
    Deleted(usize),
    /// The hosted edit was abandoned; the host sees the cancel event.
    EditAbandoned(DetailEvent),
    /// Declined or cancelled; nothing changed.
    Unchanged,
}

/// Controller for the task list screen.
pub struct ListScreen {
    provider: TaskProvider,
    adapter: TaskListAdapter,
    confirmations: ConfirmationFlow,
    layout: PaneLayout,
    detail: Option<DetailScreen>,
    loader: Option<QueryLoader>,
}

impl ListScreen {
    pub fn new(provider: TaskProvider, layout: PaneLayout) -> Self {
        log::debug!("new: list screen in {layout:?}");
        Self {
            provider,
            adapter: TaskListAdapter::new(),
            confirmations: ConfirmationFlow::new(),
            layout,
            detail: None,
            loader: None,
        }
    }

    pub fn adapter(&self) -> &TaskListAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut TaskListAdapter {
        &mut self.adapter
    }

    /// Kick off an asynchronous load of the task list.
    ///
    /// Replacing an in-flight load drops its handle, which discards that
    /// load's result.
    pub fn load(&mut self) {
        log::debug!("load: starting task list query");
        self.loader = Some(QueryLoader::spawn(self.provider.clone(), QueryRequest::task_list()));
    }

    /// Apply a finished load, if one is ready. Returns true when the
    /// adapter was refreshed.
    pub fn apply_loaded(&mut self) -> Result<bool> {
        let Some(loader) = self.loader.as_ref() else {
            return Ok(false);
        };
        let Some(result) = loader.try_result() else {
            return Ok(false);
        };
        self.loader = None;

        let rows = result?;
        self.adapter.swap_rows(Some(rows));
        Ok(true)
    }

    /// Block until the outstanding load finishes and apply it.
    pub fn wait_for_load(&mut self) -> Result<()> {
        let Some(loader) = self.loader.take() else {
            return Ok(());
        };
        let rows = loader.wait()?;
        self.adapter.swap_rows(Some(rows));
        Ok(())
    }

    /// Begin adding (`None`) or editing (`Some`) a task. Two-pane layouts
    /// host the detail screen next to the list; single-pane layouts hand
    /// it to the host to present standalone.
    pub fn edit_request(&mut self, task: Option<Task>) -> Navigation {
        let screen = match task {
            Some(task) => DetailScreen::edit(task),
            None => DetailScreen::add(),
        };

        match self.layout {
            PaneLayout::TwoPane => {
                log::debug!("edit_request: hosting detail screen in pane");
                self.detail = Some(screen);
                Navigation::InPane
            }
            PaneLayout::SinglePane => {
                log::debug!("edit_request: handing detail screen to host");
                Navigation::Detached(screen)
            }
        }
    }

    /// The hosted detail screen, when the layout has one open.
    pub fn detail(&self) -> Option<&DetailScreen> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailScreen> {
        self.detail.as_mut()
    }

    /// Remove the hosted detail pane, e.g. after its save event.
    pub fn close_detail(&mut self) {
        log::debug!("close_detail: removing detail pane");
        self.detail = None;
    }

    /// Ask for confirmation before deleting `task`. The prompt names the
    /// task's id and name as of this snapshot.
    pub fn delete_request(&mut self, task: &Task) -> Result<&ConfirmationRequest> {
        let message = format!("Delete task {}, '{}'?", task.id, task.name);
        let request = ConfirmationRequest::new(ConfirmAction::DeleteTask { task_id: task.id }, message)?
            .with_positive_label("Delete");
        Ok(self.confirmations.request(request)?)
    }

    /// Handle a back press. A hosted edit with unsaved changes needs an
    /// abandon confirmation first; anything else may simply close.
    pub fn back_pressed(&mut self) -> Result<BackAction> {
        match &self.detail {
            Some(detail) if !detail.can_close() => {
                let request = ConfirmationRequest::new(
                    ConfirmAction::AbandonEdit,
                    "Abandon the current edit? Your changes will be lost.",
                )?
                .with_positive_label("Abandon")
                .with_negative_label("Keep editing");
                self.confirmations.request(request)?;
                Ok(BackAction::ConfirmationShown)
            }
            _ => Ok(BackAction::Close),
        }
    }

    /// The confirmation currently awaiting a response, if any.
    pub fn pending_confirmation(&self) -> Option<&ConfirmationRequest> {
        self.confirmations.pending()
    }

    /// Feed the user's response to the pending confirmation back in and
    /// carry out whatever it confirmed.
    pub fn resolve_confirmation(&mut self, response: ConfirmationResponse) -> Result<FlowOutcome> {
        match self.confirmations.resolve(response) {
            Some(ConfirmAction::DeleteTask { task_id }) => {
                let count = self.provider.delete(&TaskUri::for_task(task_id), None, &[])?;
                log::debug!("resolve_confirmation: deleted {count} row(s)");
                Ok(FlowOutcome::Deleted(count))
            }
            Some(ConfirmAction::AbandonEdit) => {
                self.detail = None;
                Ok(FlowOutcome::EditAbandoned(DetailEvent::Cancelled))
            }
            None => Ok(FlowOutcome::Unchanged),
        }
    }
}
