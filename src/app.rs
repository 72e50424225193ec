use chrono::{DateTime, Local};
use tokio::sync::mpsc;

use crate::error::{AppError, Result};
use crate::form::RecipeForm;
use crate::models::Recipe;
use crate::services::RecipeClient;
use crate::tui::AppAction;

pub const LOAD_ERROR: &str = "Failed to load recipes.";
const SAVE_ERROR: &str = "Failed to save recipe. Please try again.";
const UPDATE_ERROR: &str = "Failed to update recipe.";
const DELETE_ERROR: &str = "Failed to delete recipe.";

/// What the list pane shows. Exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Failed(String),
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Create,
    /// Editing the recipe with this id.
    Edit(i64),
    /// Waiting for the user to confirm deletion of this id.
    ConfirmDelete(i64),
}

/// A finished list fetch, tagged with the reload that started it.
struct ReloadResult {
    generation: u64,
    result: std::result::Result<Vec<Recipe>, String>,
}

pub struct App {
    // Data
    pub recipes: Vec<Recipe>,
    pub list_status: ListStatus,
    pub last_loaded: Option<DateTime<Local>>,

    // UI State
    pub selected_index: usize,
    pub mode: Mode,
    /// Draft of a new recipe. Survives cancel until it is saved.
    pub create_form: RecipeForm,
    /// Copy of the recipe being edited. Dropped on cancel.
    pub edit_form: RecipeForm,
    pub show_help: bool,
    /// Set while a save or delete request is in flight.
    pub busy: Option<&'static str>,
    /// Result of the last successful action, shown in the status line.
    pub notice: Option<String>,
    /// Inline error on the selected card (delete failures).
    pub card_error: Option<String>,
    reload_count: u64,
    /// Recipe to select once the running reload lands.
    pending_selection: Option<i64>,

    // Background reloads
    reload_rx: mpsc::Receiver<ReloadResult>,
    reload_tx: mpsc::Sender<ReloadResult>,

    // Services
    client: RecipeClient,
}

impl App {
    /// Build the app and start the initial load in the background. Must be
    /// called inside a tokio runtime.
    pub fn new(client: RecipeClient) -> Self {
        let (reload_tx, reload_rx) = mpsc::channel(8);

        let mut app = Self {
            recipes: Vec::new(),
            list_status: ListStatus::Loading,
            last_loaded: None,
            selected_index: 0,
            mode: Mode::Browse,
            create_form: RecipeForm::default(),
            edit_form: RecipeForm::default(),
            show_help: false,
            busy: None,
            notice: None,
            card_error: None,
            reload_count: 0,
            pending_selection: None,
            reload_rx,
            reload_tx,
            client,
        };
        app.start_reload();
        app
    }

    pub fn selected_recipe(&self) -> Option<&Recipe> {
        self.recipes.get(self.selected_index)
    }

    /// Number of full reloads started so far, the initial one included.
    pub fn reload_count(&self) -> u64 {
        self.reload_count
    }

    /// The form the current mode is editing, if any.
    pub fn active_form(&self) -> Option<&RecipeForm> {
        match self.mode {
            Mode::Create => Some(&self.create_form),
            Mode::Edit(_) => Some(&self.edit_form),
            _ => None,
        }
    }

    fn active_form_mut(&mut self) -> Option<&mut RecipeForm> {
        match self.mode {
            Mode::Create => Some(&mut self.create_form),
            Mode::Edit(_) => Some(&mut self.edit_form),
            _ => None,
        }
    }

    /// Mark the app busy before an action that waits on the API, so the
    /// caller can draw the indicator first. Returns whether it did.
    pub fn begin_action(&mut self, action: &AppAction) -> bool {
        self.busy = match (action, self.mode) {
            (AppAction::FormSubmit, Mode::Create | Mode::Edit(_))
                if self.active_form().is_some_and(RecipeForm::has_title) =>
            {
                Some("Saving...")
            }
            (AppAction::ConfirmDelete, Mode::ConfirmDelete(_)) => Some("Deleting..."),
            _ => None,
        };
        self.busy.is_some()
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        let quit = self.dispatch(action).await;
        self.busy = None;
        Ok(quit)
    }

    async fn dispatch(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Quit => return true,

            AppAction::MoveUp => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.on_selection_changed();
                }
            }

            AppAction::MoveDown => {
                let len = self.recipes.len();
                if len > 0 && self.selected_index < len - 1 {
                    self.selected_index += 1;
                    self.on_selection_changed();
                }
            }

            AppAction::MoveToTop => {
                self.selected_index = 0;
                self.on_selection_changed();
            }

            AppAction::MoveToBottom => {
                self.selected_index = self.recipes.len().saturating_sub(1);
                self.on_selection_changed();
            }

            AppAction::Reload => {
                self.start_reload();
            }

            AppAction::NewRecipe => {
                self.create_form.error = None;
                self.mode = Mode::Create;
            }

            AppAction::EditRecipe => {
                let selected = self
                    .selected_recipe()
                    .map(|recipe| (recipe.id, RecipeForm::from_recipe(recipe)));
                if let Some((id, form)) = selected {
                    self.edit_form = form;
                    self.mode = Mode::Edit(id);
                }
            }

            AppAction::DeleteRecipe => {
                if let Some(recipe) = self.selected_recipe() {
                    self.mode = Mode::ConfirmDelete(recipe.id);
                }
            }

            AppAction::ConfirmDelete => {
                if let Mode::ConfirmDelete(id) = self.mode {
                    self.mode = Mode::Browse;
                    self.delete_recipe(id).await;
                }
            }

            AppAction::CancelDelete => {
                self.mode = Mode::Browse;
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::FormChar(c) => self.with_form(|form| form.push_char(c)),
            AppAction::FormBackspace => self.with_form(RecipeForm::backspace),
            AppAction::FormNewline => self.with_form(RecipeForm::newline),
            AppAction::FormNextField => self.with_form(RecipeForm::focus_next),
            AppAction::FormPreviousField => self.with_form(RecipeForm::focus_previous),

            AppAction::FormSubmit => match self.mode {
                Mode::Create => self.submit_create().await,
                Mode::Edit(id) => self.submit_update(id).await,
                _ => {}
            },

            AppAction::FormCancel => {
                match self.mode {
                    Mode::Edit(_) => self.edit_form.clear(),
                    Mode::Create => self.create_form.error = None,
                    _ => {}
                }
                self.mode = Mode::Browse;
            }
        }

        false
    }

    fn with_form(&mut self, edit: impl FnOnce(&mut RecipeForm)) {
        if let Some(form) = self.active_form_mut() {
            edit(form);
        }
    }

    fn on_selection_changed(&mut self) {
        self.card_error = None;
    }

    /// Start a full reload of the list. Runs on mount and after every
    /// completed action. The list shows `Loading` until the result is
    /// collected by [`App::poll_reload_result`] or [`App::wait_for_reload`].
    pub fn start_reload(&mut self) {
        self.list_status = ListStatus::Loading;
        self.reload_count += 1;

        let generation = self.reload_count;
        let client = self.client.clone();
        let tx = self.reload_tx.clone();

        tokio::spawn(async move {
            let result = client.list_recipes().await.map_err(|e| e.to_string());
            let _ = tx.send(ReloadResult { generation, result }).await;
        });
    }

    /// Apply a finished reload if there is one (non-blocking).
    pub fn poll_reload_result(&mut self) {
        while let Ok(result) = self.reload_rx.try_recv() {
            self.apply_reload(result);
        }
    }

    /// Wait until the latest reload has been applied.
    pub async fn wait_for_reload(&mut self) {
        while self.list_status == ListStatus::Loading {
            let Some(result) = self.reload_rx.recv().await else {
                break;
            };
            self.apply_reload(result);
        }
    }

    fn apply_reload(&mut self, reload: ReloadResult) {
        // A newer reload superseded this one
        if reload.generation != self.reload_count {
            return;
        }

        match reload.result {
            Ok(recipes) => {
                self.recipes = recipes;
                self.list_status = ListStatus::Loaded;
                self.last_loaded = Some(Local::now());
            }
            Err(e) => {
                tracing::warn!("Failed to load recipes: {}", e);
                self.recipes.clear();
                self.list_status = ListStatus::Failed(LOAD_ERROR.to_string());
            }
        }

        if let Some(id) = self.pending_selection.take() {
            if let Some(index) = self.recipes.iter().position(|r| r.id == id) {
                self.selected_index = index;
            }
        }

        let len = self.recipes.len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    fn on_action_completed(&mut self, notice: String) {
        self.notice = Some(notice);
        self.card_error = None;
        self.start_reload();
    }

    async fn submit_create(&mut self) {
        if !self.create_form.has_title() {
            self.create_form.error = Some("Title is required.".to_string());
            return;
        }

        let payload = self.create_form.to_payload();
        match self.client.create_recipe(&payload).await {
            Ok(recipe) => {
                tracing::info!("Created recipe {}", recipe.id);
                self.create_form.clear();
                self.mode = Mode::Browse;
                self.pending_selection = Some(recipe.id);
                self.on_action_completed(format!("Recipe \"{}\" created.", recipe.title));
            }
            Err(e) => {
                tracing::warn!("Failed to create recipe: {}", e);
                self.create_form.error = Some(error_message(&e, SAVE_ERROR));
            }
        }
    }

    async fn submit_update(&mut self, id: i64) {
        if !self.edit_form.has_title() {
            self.edit_form.error = Some("Title is required.".to_string());
            return;
        }

        let payload = self.edit_form.to_payload();
        match self.client.update_recipe(id, &payload).await {
            Ok(recipe) => {
                self.edit_form.clear();
                self.mode = Mode::Browse;
                self.on_action_completed(format!("Recipe \"{}\" updated.", recipe.title));
            }
            Err(e) => {
                tracing::warn!("Failed to update recipe {}: {}", id, e);
                self.edit_form.error = Some(error_message(&e, UPDATE_ERROR));
            }
        }
    }

    async fn delete_recipe(&mut self, id: i64) {
        let title = self
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.title.clone())
            .unwrap_or_else(|| format!("#{id}"));

        match self.client.delete_recipe(id).await {
            Ok(()) => {
                self.on_action_completed(format!("Recipe \"{title}\" deleted."));
            }
            Err(e) => {
                tracing::warn!("Failed to delete recipe {}: {}", id, e);
                self.card_error = Some(error_message(&e, DELETE_ERROR));
            }
        }
    }
}

/// The server's message for API errors, `fallback` for transport failures.
fn error_message(error: &AppError, fallback: &str) -> String {
    match error {
        AppError::Api { message, .. } => format!("{fallback} {message}"),
        _ => fallback.to_string(),
    }
}
