//! Per-module list screen controller.
//!
//! A [`ListScreen`] owns one module's collection, its list view model, and
//! its create/edit dialog. All collaborator failures are caught here:
//! logged, turned into a single toast, and returned so callers can react,
//! but never allowed to change state that was valid before the call.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use schoolhub_core::config::ConsoleConfig;
use schoolhub_core::error::AppError;
use schoolhub_core::form::{Form, FormValues};
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Notifier, Resource, ResourceApi, Toast};

use crate::export;
use crate::list::{DerivedView, ListViewModel};

/// What the open dialog will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    /// Create a new record.
    Create,
    /// Update the record with this id.
    Edit {
        /// Record being edited.
        id: String,
    },
}

/// Create/edit dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialog {
    /// `None` while the dialog is closed.
    pub mode: Option<DialogMode>,
    /// Raw text entered so far.
    pub values: FormValues,
}

impl Dialog {
    /// Whether the dialog is showing.
    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }
}

/// Controller for one module's management screen.
#[derive(Debug)]
pub struct ListScreen<R: Resource, A: ResourceApi<R> + ?Sized> {
    /// Backend collaborator.
    api: Arc<A>,
    /// Toast sink.
    notifier: Arc<dyn Notifier>,
    /// Last successfully fetched collection.
    items: Vec<R>,
    /// Filter and page state.
    model: ListViewModel<R>,
    /// Create/edit dialog.
    dialog: Dialog,
}

impl<R: Resource, A: ResourceApi<R> + ?Sized> ListScreen<R, A> {
    /// Create a screen with an explicit page size. Nothing is fetched
    /// until [`ListScreen::refresh`] is called.
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>, page_size: u64) -> Self {
        Self {
            api,
            notifier,
            items: Vec::new(),
            model: ListViewModel::new(page_size),
            dialog: Dialog::default(),
        }
    }

    /// Create a screen using the configured page size for this module.
    pub fn from_config(api: Arc<A>, notifier: Arc<dyn Notifier>, config: &ConsoleConfig) -> Self {
        let page_size = config.page_size_for(R::RESOURCE, Some(R::PAGE_SIZE));
        Self::new(api, notifier, page_size)
    }

    /// Fetch the collection and replace the current one wholesale.
    ///
    /// On failure the previous collection stays in place and an error
    /// toast is shown; the user retries by refreshing again.
    pub async fn refresh(&mut self) -> AppResult<usize> {
        debug!(resource = R::RESOURCE, "Fetching collection");
        match self.api.list(None).await {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                self.model.clamp_to(&self.items);
                debug!(resource = R::RESOURCE, count, "Collection replaced");
                Ok(count)
            }
            Err(e) => {
                error!(resource = R::RESOURCE, error = %e, "Failed to load collection");
                self.notifier
                    .notify(Toast::error(format!("Failed to load {} data", R::LABEL)));
                Err(e)
            }
        }
    }

    /// The last fetched collection.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// The list view model.
    pub fn model(&self) -> &ListViewModel<R> {
        &self.model
    }

    /// Current filtered and paginated view.
    pub fn view(&self) -> DerivedView<'_, R> {
        self.model.view(&self.items)
    }

    /// Update the search box.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.model.set_search(term);
    }

    /// Select a value in a filter dropdown.
    pub fn set_filter(&mut self, field: &str, value: impl Into<String>) -> AppResult<()> {
        self.model.set_filter(field, value).map(|_| ())
    }

    /// Reset search and filters.
    pub fn clear_filters(&mut self) {
        self.model.clear_filters();
    }

    /// Dropdown options for a filter field.
    pub fn filter_options(&self, field: &str) -> Vec<String> {
        self.model.filter_options(field, &self.items)
    }

    /// "Next" button.
    pub fn next_page(&mut self) -> u64 {
        self.model.next_page(&self.items)
    }

    /// "Previous" button.
    pub fn previous_page(&mut self) -> u64 {
        self.model.previous_page(&self.items)
    }

    /// Jump to a page; out-of-range requests clamp.
    pub fn go_to_page(&mut self, page: u64) -> u64 {
        self.model.go_to_page(page, &self.items)
    }

    /// Dialog state.
    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Open the dialog for a new record with the form's default values.
    pub fn open_create(&mut self) {
        self.dialog = Dialog {
            mode: Some(DialogMode::Create),
            values: R::Draft::defaults(),
        };
    }

    /// Open the dialog pre-filled from an existing record.
    pub fn open_edit(&mut self, id: &str) -> AppResult<()> {
        let record = self
            .items
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(format!("{} '{id}' not found", R::LABEL)))?;
        self.dialog = Dialog {
            mode: Some(DialogMode::Edit { id: id.to_string() }),
            values: record.to_form(),
        };
        Ok(())
    }

    /// Type into a dialog field.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> AppResult<()> {
        if !self.dialog.is_open() {
            return Err(AppError::validation("No dialog is open"));
        }
        self.dialog.values.set(field, value);
        Ok(())
    }

    /// Close the dialog, discarding its input.
    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::default();
    }

    /// Submit the open dialog.
    ///
    /// The input is parsed and validated first; nothing invalid is sent.
    /// On success the dialog closes, its form resets, and the collection
    /// is re-fetched. On failure the dialog stays open with the input
    /// intact and the collection is untouched.
    pub async fn submit(&mut self) -> AppResult<R> {
        let Some(mode) = self.dialog.mode.clone() else {
            return Err(AppError::validation("No dialog is open"));
        };

        let draft = match R::Draft::from_values(&self.dialog.values) {
            Ok(draft) => draft,
            Err(e) => {
                warn!(resource = R::RESOURCE, error = %e, "Form rejected");
                self.notifier.notify(Toast::error(e.message.clone()));
                return Err(e);
            }
        };

        let (result, verb_failed, verb_done) = match &mode {
            DialogMode::Create => (self.api.create(&draft).await, "add", "added"),
            DialogMode::Edit { id } => (self.api.update(id, &draft).await, "update", "updated"),
        };

        match result {
            Ok(record) => {
                info!(resource = R::RESOURCE, id = record.id(), "Record {}", verb_done);
                self.notifier.notify(Toast::success(format!(
                    "{} {verb_done} successfully",
                    capitalize(R::LABEL)
                )));
                self.close_dialog();
                // Failure here is already reported by `refresh`.
                let _ = self.refresh().await;
                Ok(record)
            }
            Err(e) => {
                error!(resource = R::RESOURCE, error = %e, "Failed to {} record", verb_failed);
                self.notifier
                    .notify(Toast::error(format!("Failed to {verb_failed} {}", R::LABEL)));
                Err(e)
            }
        }
    }

    /// Delete a record and re-fetch.
    pub async fn delete(&mut self, id: &str) -> AppResult<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                info!(resource = R::RESOURCE, id, "Record deleted");
                self.notifier.notify(Toast::success(format!(
                    "{} deleted successfully",
                    capitalize(R::LABEL)
                )));
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                error!(resource = R::RESOURCE, id, error = %e, "Failed to delete record");
                self.notifier
                    .notify(Toast::error(format!("Failed to delete {}", R::LABEL)));
                Err(e)
            }
        }
    }

    /// Fetch the module's stats. Failures toast like a failed load.
    pub async fn stats(&self) -> AppResult<R::Stats> {
        self.api.stats().await.inspect_err(|e| {
            error!(resource = R::RESOURCE, error = %e, "Failed to load stats");
            self.notifier
                .notify(Toast::error(format!("Failed to load {} stats", R::LABEL)));
        })
    }

    /// CSV of every record matching the current filter (all pages).
    pub fn export_csv(&self) -> AppResult<String> {
        export::to_csv(self.view().filtered.iter().copied())
    }

    /// JSON of every record matching the current filter (all pages).
    pub fn export_json(&self) -> AppResult<String> {
        export::to_json(self.view().filtered.iter().copied())
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
