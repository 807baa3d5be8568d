//! In-memory fakes and fixtures shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use crate::api::{ApiResult, MovieStore};
use crate::controller::{CatalogController, Confirm, Surface};
use crate::error::ApiError;
use crate::favorites::FavoriteStorage;
use crate::feedback::{Feedback, NoticeKind};
use crate::forms::{Field, FormKind, FormState};
use crate::models::{Movie, MovieDraft, MovieId};
use crate::view::{RenderedView, ViewContent};

pub fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: MovieId::new(id),
        title: title.to_string(),
        director: "Director".to_string(),
        description: format!("Descripción de {}", title),
        image: None,
        year: None,
        genre: None,
        rating: None,
    }
}

pub fn not_found() -> ApiError {
    ApiError::Rejected { status: 404, status_text: "Not Found".to_string() }
}

/// Text a browser would display: tags dropped, entities decoded once
pub fn visible_text(html: &str) -> String {
    let mut stripped = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    let mut text = String::new();
    let mut rest = stripped.as_str();
    while let Some(pos) = rest.find('&') {
        text.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let decoded = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"'), ("&#39;", '\'')]
            .into_iter()
            .find(|(entity, _)| rest.starts_with(entity));
        match decoded {
            Some((entity, c)) => {
                text.push(c);
                rest = &rest[entity.len()..];
            }
            None => {
                text.push('&');
                rest = &rest[1..];
            }
        }
    }
    text.push_str(rest);
    text
}

// ========================
// Movie store
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    Create,
    Update(MovieId),
    Delete(MovieId),
}

#[derive(Default)]
struct StoreState {
    movies: Vec<Movie>,
    next_id: u64,
    calls: Vec<StoreCall>,
    fail_list: Option<ApiError>,
    fail_mutation: Option<ApiError>,
}

/// Server stand-in; ids are assigned from 101 upwards
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.borrow_mut();
            state.movies = movies;
            state.next_id = 100;
        }
        store
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.state.borrow().movies.clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.borrow().calls.clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.state.borrow().calls.iter().filter(|call| **call != StoreCall::List).count()
    }

    /// Add a movie behind the client's back
    pub fn insert(&self, movie: Movie) {
        self.state.borrow_mut().movies.push(movie);
    }

    /// Drop a movie behind the client's back
    pub fn remove(&self, id: &MovieId) {
        self.state.borrow_mut().movies.retain(|movie| &movie.id != id);
    }

    pub fn fail_next_list(&self, err: ApiError) {
        self.state.borrow_mut().fail_list = Some(err);
    }

    pub fn fail_next_mutation(&self, err: ApiError) {
        self.state.borrow_mut().fail_mutation = Some(err);
    }
}

#[async_trait(?Send)]
impl MovieStore for MemoryStore {
    async fn list(&self) -> ApiResult<Vec<Movie>> {
        let mut state = self.state.borrow_mut();
        state.calls.push(StoreCall::List);
        match state.fail_list.take() {
            Some(err) => Err(err),
            None => Ok(state.movies.clone()),
        }
    }

    async fn create(&self, draft: &MovieDraft) -> ApiResult<Movie> {
        let mut state = self.state.borrow_mut();
        state.calls.push(StoreCall::Create);
        if let Some(err) = state.fail_mutation.take() {
            return Err(err);
        }
        state.next_id += 1;
        let movie = Movie::from_draft(MovieId::new(state.next_id.to_string()), draft.clone());
        state.movies.push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: &MovieId, draft: &MovieDraft) -> ApiResult<Movie> {
        let mut state = self.state.borrow_mut();
        state.calls.push(StoreCall::Update(id.clone()));
        if let Some(err) = state.fail_mutation.take() {
            return Err(err);
        }
        match state.movies.iter_mut().find(|movie| &movie.id == id) {
            Some(slot) => {
                *slot = Movie::from_draft(id.clone(), draft.clone());
                Ok(slot.clone())
            }
            None => Err(not_found()),
        }
    }

    async fn delete(&self, id: &MovieId) -> ApiResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(StoreCall::Delete(id.clone()));
        if let Some(err) = state.fail_mutation.take() {
            return Err(err);
        }
        match state.movies.iter().position(|movie| &movie.id == id) {
            Some(index) => {
                state.movies.remove(index);
                Ok(())
            }
            None => Err(not_found()),
        }
    }
}

/// Answers each call only after yielding to the executor, so concurrent
/// actions interleave. The backing store is updated immediately; only the
/// response is late.
#[derive(Clone)]
pub struct YieldingStore {
    inner: MemoryStore,
    latencies: Rc<RefCell<VecDeque<usize>>>,
}

impl YieldingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self { inner, latencies: Rc::default() }
    }

    /// Yields for the next calls, in order; later calls yield once
    pub fn delay_next(&self, yields: &[usize]) {
        self.latencies.borrow_mut().extend(yields.iter().copied());
    }

    async fn respond<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        let yields = self.latencies.borrow_mut().pop_front().unwrap_or(1);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }
        result
    }
}

#[async_trait(?Send)]
impl MovieStore for YieldingStore {
    async fn list(&self) -> ApiResult<Vec<Movie>> {
        let result = self.inner.list().await;
        self.respond(result).await
    }

    async fn create(&self, draft: &MovieDraft) -> ApiResult<Movie> {
        let result = self.inner.create(draft).await;
        self.respond(result).await
    }

    async fn update(&self, id: &MovieId, draft: &MovieDraft) -> ApiResult<Movie> {
        let result = self.inner.update(id, draft).await;
        self.respond(result).await
    }

    async fn delete(&self, id: &MovieId) -> ApiResult<()> {
        let result = self.inner.delete(id).await;
        self.respond(result).await
    }
}

// ========================
// Surface / feedback / confirm
// ========================

#[derive(Default)]
struct SurfaceLog {
    contents: Vec<ViewContent>,
    forms: HashMap<FormKind, FormState>,
    form_updates: usize,
    focused: Vec<(FormKind, Field)>,
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn contents(&self) -> Vec<ViewContent> {
        self.log.borrow().contents.clone()
    }

    pub fn last_content(&self) -> Option<ViewContent> {
        self.log.borrow().contents.last().cloned()
    }

    pub fn last_view(&self) -> Option<RenderedView> {
        match self.last_content()? {
            ViewContent::Ready(view) => Some(view),
            ViewContent::Loading => None,
        }
    }

    /// Last form state pushed for `kind`, closed if never shown
    pub fn form(&self, kind: FormKind) -> FormState {
        self.log.borrow().forms.get(&kind).cloned().unwrap_or_default()
    }

    pub fn form_updates(&self) -> usize {
        self.log.borrow().form_updates
    }

    pub fn focused(&self) -> Vec<(FormKind, Field)> {
        self.log.borrow().focused.clone()
    }
}

impl Surface for RecordingSurface {
    fn show_content(&self, content: ViewContent) {
        self.log.borrow_mut().contents.push(content);
    }

    fn show_form(&self, kind: FormKind, form: &FormState) {
        let mut log = self.log.borrow_mut();
        log.forms.insert(kind, form.clone());
        log.form_updates += 1;
    }

    fn focus_field(&self, kind: FormKind, field: Field) {
        self.log.borrow_mut().focused.push((kind, field));
    }
}

#[derive(Default)]
struct FeedbackLog {
    notices: Vec<(String, NoticeKind)>,
    announcements: Vec<String>,
}

#[derive(Clone, Default)]
pub struct RecordingFeedback {
    log: Rc<RefCell<FeedbackLog>>,
}

impl RecordingFeedback {
    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        self.log.borrow().notices.clone()
    }

    pub fn last_notice(&self) -> Option<(String, NoticeKind)> {
        self.log.borrow().notices.last().cloned()
    }

    pub fn last_announcement(&self) -> Option<String> {
        self.log.borrow().announcements.last().cloned()
    }
}

impl Feedback for RecordingFeedback {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.log.borrow_mut().notices.push((message.to_string(), kind));
    }

    fn announce(&self, message: &str) {
        self.log.borrow_mut().announcements.push(message.to_string());
    }
}

#[derive(Clone)]
pub struct ScriptedConfirm {
    answer: Rc<Cell<bool>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl Default for ScriptedConfirm {
    fn default() -> Self {
        Self { answer: Rc::new(Cell::new(true)), prompts: Rc::default() }
    }
}

impl ScriptedConfirm {
    pub fn set_answer(&self, answer: bool) {
        self.answer.set(answer);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

// ========================
// Favorites storage
// ========================

#[derive(Clone, Default)]
pub struct MemoryFavorites {
    value: Rc<RefCell<Option<String>>>,
    failing: bool,
}

impl MemoryFavorites {
    pub fn with_json(json: &str) -> Self {
        Self { value: Rc::new(RefCell::new(Some(json.to_string()))), failing: false }
    }

    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn saved(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl FavoriteStorage for MemoryFavorites {
    fn load(&self) -> Result<Option<String>, String> {
        if self.failing {
            return Err("storage disabled".to_string());
        }
        Ok(self.value.borrow().clone())
    }

    fn save(&self, json: &str) -> Result<(), String> {
        if self.failing {
            return Err("quota exceeded".to_string());
        }
        *self.value.borrow_mut() = Some(json.to_string());
        Ok(())
    }
}

// ========================
// Harness
// ========================

/// Shared fakes; every controller built from one harness sees the same server
pub struct Harness {
    pub store: MemoryStore,
    /// Same server as `store`, with late responses
    pub yielding: YieldingStore,
    pub surface: RecordingSurface,
    pub feedback: RecordingFeedback,
    pub confirm: ScriptedConfirm,
    pub favorites: MemoryFavorites,
}

impl Harness {
    pub fn new(movies: Vec<Movie>) -> Self {
        let store = MemoryStore::with_movies(movies);
        Self {
            yielding: YieldingStore::new(store.clone()),
            store,
            surface: RecordingSurface::default(),
            feedback: RecordingFeedback::default(),
            confirm: ScriptedConfirm::default(),
            favorites: MemoryFavorites::default(),
        }
    }

    pub fn controller(&self) -> CatalogController {
        self.controller_over(Box::new(self.store.clone()))
    }

    /// Controller whose store calls suspend, for interleaving tests
    pub fn yielding_controller(&self) -> CatalogController {
        self.controller_over(Box::new(self.yielding.clone()))
    }

    fn controller_over(&self, store: Box<dyn MovieStore>) -> CatalogController {
        CatalogController::new(
            store,
            Box::new(self.surface.clone()),
            Box::new(self.feedback.clone()),
            Box::new(self.confirm.clone()),
            Box::new(self.favorites.clone()),
        )
    }
}
