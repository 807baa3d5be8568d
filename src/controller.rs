//! Catalog Controller
//!
//! Runs every user action through one pipeline: validate locally, call the
//! remote store, reload the whole catalog, re-render, then report.
//!
//! State lives in a `RefCell`; no borrow is held across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Datelike, Utc};

use crate::api::MovieStore;
use crate::catalog::Catalog;
use crate::error::{ActionError, ActionResult, ApiError};
use crate::export;
use crate::favorites::{FavoriteStorage, Favorites};
use crate::feedback::{Feedback, NoticeKind};
use crate::forms::{Field, FormKind, FormState};
use crate::models::{Movie, MovieId};
use crate::view::{self, ViewContent, ViewMode};

const LOAD_FAILED: &str = "Error al cargar las películas";
const DELETE_FAILED: &str = "Error al eliminar la película";
const RELOAD_FAILED: &str = "Los cambios se guardaron, pero no se pudo recargar el catálogo";

/// Where rendered content and form state end up
pub trait Surface {
    fn show_content(&self, content: ViewContent);
    fn show_form(&self, kind: FormKind, form: &FormState);
    fn focus_field(&self, kind: FormKind, field: Field);
}

/// Synchronous yes/no prompt
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Default)]
struct ControllerState {
    catalog: Catalog,
    favorites: Favorites,
    mode: ViewMode,
    add: FormState,
    edit: FormState,
    in_flight: bool,
}

impl ControllerState {
    fn form(&self, kind: FormKind) -> &FormState {
        match kind {
            FormKind::Add => &self.add,
            FormKind::Edit => &self.edit,
        }
    }

    fn form_mut(&mut self, kind: FormKind) -> &mut FormState {
        match kind {
            FormKind::Add => &mut self.add,
            FormKind::Edit => &mut self.edit,
        }
    }
}

/// Marks a mutation in flight until dropped
struct MutationGuard<'a> {
    state: &'a RefCell<ControllerState>,
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().in_flight = false;
    }
}

/// (failure context, success banner, announcement verb)
fn save_messages(kind: FormKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        FormKind::Add => (
            "Error al agregar la película",
            "¡Película agregada exitosamente!",
            "agregada",
        ),
        FormKind::Edit => (
            "Error al actualizar la película",
            "¡Película actualizada exitosamente!",
            "actualizada",
        ),
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

pub struct CatalogController {
    store: Box<dyn MovieStore>,
    surface: Box<dyn Surface>,
    feedback: Box<dyn Feedback>,
    confirm: Box<dyn Confirm>,
    favorites_storage: Box<dyn FavoriteStorage>,
    state: RefCell<ControllerState>,
}

impl CatalogController {
    pub fn new(
        store: Box<dyn MovieStore>,
        surface: Box<dyn Surface>,
        feedback: Box<dyn Feedback>,
        confirm: Box<dyn Confirm>,
        favorites_storage: Box<dyn FavoriteStorage>,
    ) -> Self {
        let favorites = Favorites::load(favorites_storage.as_ref());
        Self {
            store,
            surface,
            feedback,
            confirm,
            favorites_storage,
            state: RefCell::new(ControllerState { favorites, ..Default::default() }),
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn snapshot(&self) -> Rc<[Movie]> {
        self.state.borrow().catalog.current()
    }

    pub fn favorites(&self) -> Favorites {
        self.state.borrow().favorites.clone()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.borrow().mode
    }

    pub fn form(&self, kind: FormKind) -> FormState {
        self.state.borrow().form(kind).clone()
    }

    // ========================
    // Catalog
    // ========================

    /// Initial (or manual) load of the whole catalog
    pub async fn load(&self) -> ActionResult<usize> {
        self.surface.show_content(ViewContent::Loading);
        match self.reload().await {
            Ok(count) => Ok(count),
            Err(source) => {
                self.render();
                self.fail(ActionError::remote(LOAD_FAILED, source))
            }
        }
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.mode != mode;
            state.mode = mode;
            changed
        };
        if changed {
            log::info!("[CONTROLLER] View mode: {:?}", mode);
            self.render();
        }
    }

    pub fn toggle_favorite(&self, id: &MovieId) -> ActionResult<bool> {
        let movie = self.find(id)?;
        let (is_favorite, favorites) = {
            let mut state = self.state.borrow_mut();
            let is_favorite = state.favorites.toggle(id);
            (is_favorite, state.favorites.clone())
        };
        favorites.persist(self.favorites_storage.as_ref());
        self.render();

        let message = if is_favorite {
            format!("{} agregada a favoritos", movie.title)
        } else {
            format!("{} quitada de favoritos", movie.title)
        };
        self.feedback.announce(&message);
        Ok(is_favorite)
    }

    /// Banner for outcomes decided outside the controller, such as a download
    pub fn notify(&self, message: &str, kind: NoticeKind) {
        self.feedback.notify(message, kind);
    }

    pub fn export_snapshot(&self, now: DateTime<Utc>) -> ActionResult<String> {
        let exported = {
            let state = self.state.borrow();
            export::export_json(&state.catalog.current(), &state.favorites, now)
        };
        match exported {
            Ok(json) => Ok(json),
            Err(err) => self.fail(ActionError::Export(err.to_string())),
        }
    }

    // ========================
    // Forms
    // ========================

    pub fn open_add(&self) {
        let opened = {
            let mut state = self.state.borrow_mut();
            if state.add.is_submitting() {
                false
            } else {
                state.add.open(None);
                true
            }
        };
        if opened {
            self.sync_form(FormKind::Add);
            self.surface.focus_field(FormKind::Add, Field::Title);
        }
    }

    /// Open the edit form pre-filled from the current snapshot
    pub fn open_edit(&self, id: &MovieId) -> ActionResult<()> {
        let movie = self.find(id)?;
        if self.state.borrow().edit.is_submitting() {
            return self.fail(ActionError::Busy);
        }
        self.state.borrow_mut().edit.open(Some(&movie));
        self.sync_form(FormKind::Edit);
        self.surface.focus_field(FormKind::Edit, Field::Title);
        self.feedback.announce(&format!("Editando película {}", movie.title));
        Ok(())
    }

    /// Store one input and validate it as typed
    pub fn set_field(&self, kind: FormKind, field: Field, value: String) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let form = state.form_mut(kind);
            let changed = form.set_field(field, value);
            if changed {
                form.check_field(field, current_year());
            }
            changed
        };
        if changed {
            self.sync_form(kind);
        }
    }

    /// Validate one input when it loses focus
    pub fn check_field(&self, kind: FormKind, field: Field) -> bool {
        let (open, valid) = {
            let mut state = self.state.borrow_mut();
            let form = state.form_mut(kind);
            (form.can_submit(), form.check_field(field, current_year()))
        };
        if open {
            self.sync_form(kind);
        }
        valid
    }

    /// Close without saving; false if the form was already closed
    pub fn cancel(&self, kind: FormKind) -> bool {
        let cancelled = self.state.borrow_mut().form_mut(kind).cancel();
        if cancelled {
            self.sync_form(kind);
        }
        cancelled
    }

    pub fn cancel_all(&self) {
        for kind in [FormKind::Add, FormKind::Edit] {
            self.cancel(kind);
        }
    }

    /// Validate, save, reload. On remote failure the form stays open.
    pub async fn submit(&self, kind: FormKind) -> ActionResult<Movie> {
        let prepared = {
            let mut state = self.state.borrow_mut();
            let form = state.form_mut(kind);
            if form.can_submit() {
                Some((form.prepare(current_year()), form.editing.clone()))
            } else {
                None
            }
        };

        let (draft, editing) = match prepared {
            None => return self.fail(ActionError::FormClosed),
            Some((Err(invalid), _)) => {
                self.sync_form(kind);
                self.surface.focus_field(kind, invalid.field());
                return self.fail(invalid.into());
            }
            Some((Ok(draft), editing)) => (draft, editing),
        };
        let target = match (kind, editing) {
            (FormKind::Add, _) => None,
            (FormKind::Edit, Some(id)) => Some(id),
            (FormKind::Edit, None) => return self.fail(ActionError::FormClosed),
        };

        self.sync_form(kind);
        let guard = self.begin_mutation()?;
        self.state.borrow_mut().form_mut(kind).mark_submitting();
        self.sync_form(kind);
        self.surface.show_content(ViewContent::Loading);

        let (failure_context, success_message, verb) = save_messages(kind);
        let result = match &target {
            Some(id) => self.store.update(id, &draft).await,
            None => self.store.create(&draft).await,
        };
        let saved = match result {
            Ok(movie) => movie,
            Err(source) => {
                self.state.borrow_mut().form_mut(kind).fail(source.to_string());
                self.sync_form(kind);
                self.render();
                drop(guard);
                return self.fail(ActionError::remote(failure_context, source));
            }
        };

        let reloaded = self.reload().await;
        self.state.borrow_mut().form_mut(kind).complete();
        self.sync_form(kind);
        drop(guard);

        self.report_saved(reloaded, success_message);
        self.feedback.announce(&format!("Película {} {}", saved.title, verb));
        Ok(saved)
    }

    // ========================
    // Delete
    // ========================

    /// Ask for confirmation, then delete. `Ok(false)` when declined.
    pub async fn request_delete(&self, id: &MovieId) -> ActionResult<bool> {
        let movie = self.find(id)?;
        let prompt = format!(
            "¿Seguro que quieres eliminar \"{}\"?\n\nEsta acción no se puede deshacer.",
            movie.title
        );
        if !self.confirm.confirm(&prompt) {
            self.feedback.announce("Eliminación cancelada");
            return Ok(false);
        }

        let guard = self.begin_mutation()?;
        self.surface.show_content(ViewContent::Loading);
        if let Err(source) = self.store.delete(id).await {
            self.render();
            drop(guard);
            return self.fail(ActionError::remote(DELETE_FAILED, source));
        }

        let pruned = {
            let mut state = self.state.borrow_mut();
            state.favorites.remove(id).then(|| state.favorites.clone())
        };
        if let Some(favorites) = pruned {
            favorites.persist(self.favorites_storage.as_ref());
        }
        let editing_deleted = self.state.borrow().edit.editing.as_ref() == Some(id);
        if editing_deleted {
            self.cancel(FormKind::Edit);
        }

        let reloaded = self.reload().await;
        drop(guard);

        self.report_saved(reloaded, "¡Película eliminada exitosamente!");
        self.feedback.announce(&format!("Película {} eliminada", movie.title));
        Ok(true)
    }

    // ========================
    // Internals
    // ========================

    /// Fetch and apply the catalog; stale responses are dropped
    async fn reload(&self) -> Result<usize, ApiError> {
        let ticket = self.state.borrow_mut().catalog.issue_ticket();
        let movies = self.store.list().await?;
        let accepted = self.state.borrow_mut().catalog.accept(ticket, movies);
        if accepted {
            self.render();
        }
        let count = self.state.borrow().catalog.len();
        Ok(count)
    }

    fn render(&self) {
        let rendered = {
            let state = self.state.borrow();
            view::render(&state.catalog.current(), state.mode, &state.favorites)
        };
        log::debug!("[CONTROLLER] Rendered {} cards ({:?})", rendered.count, rendered.mode);
        let announcement = rendered.announcement.clone();
        self.surface.show_content(ViewContent::Ready(rendered));
        self.feedback.announce(&announcement);
    }

    fn report_saved(&self, reloaded: Result<usize, ApiError>, success_message: &str) {
        match reloaded {
            Ok(_) => self.feedback.notify(success_message, NoticeKind::Success),
            Err(source) => {
                self.render();
                self.report(&ActionError::remote(RELOAD_FAILED, source));
            }
        }
    }

    fn sync_form(&self, kind: FormKind) {
        let form = self.state.borrow().form(kind).clone();
        self.surface.show_form(kind, &form);
    }

    fn find(&self, id: &MovieId) -> ActionResult<Movie> {
        let found = self.state.borrow().catalog.find_by_id(id);
        match found {
            Some(movie) => Ok(movie),
            None => self.fail(ActionError::NotFound(id.clone())),
        }
    }

    fn begin_mutation(&self) -> ActionResult<MutationGuard<'_>> {
        let busy = {
            let mut state = self.state.borrow_mut();
            std::mem::replace(&mut state.in_flight, true)
        };
        if busy {
            return self.fail(ActionError::Busy);
        }
        Ok(MutationGuard { state: &self.state })
    }

    /// Log and, when the user should see it, show an error banner
    fn report(&self, err: &ActionError) {
        if err.is_user_visible() {
            log::warn!("[CONTROLLER] {}", err);
            self.feedback.notify(&err.to_string(), NoticeKind::Error);
        } else {
            log::debug!("[CONTROLLER] Ignored: {}", err);
        }
    }

    fn fail<T>(&self, err: ActionError) -> ActionResult<T> {
        self.report(&err);
        Err(err)
    }
}
