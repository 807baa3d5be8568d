//! UI State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The controller
//! writes here through [`StoreSurface`] and [`StoreFeedback`]; components
//! only read.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::browser;
use crate::config::{AppConfig, ViewBindings};
use crate::controller::Surface;
use crate::feedback::{Banner, Feedback, NoticeKind, Notices};
use crate::forms::{Field, FormKind, FormState};
use crate::view::{NavState, ViewContent, ViewMode};

/// Everything the page renders from, with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Movie container content: loading placeholder or rendered cards
    pub content: ViewContent,
    pub add_form: FormState,
    pub edit_form: FormState,
    /// At most one banner at a time
    pub banner: Option<Banner>,
    /// Live-region text, cleared shortly after each announcement
    pub announcement: String,
    /// Mode of the last rendered view
    pub view_mode: ViewMode,
    /// Badge count on the favorites tab
    pub favorite_count: usize,
    pub nav: NavState,
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

/// Reactive read of one form
pub fn form_state(store: UiStore, kind: FormKind) -> FormState {
    match kind {
        FormKind::Add => store.add_form().get(),
        FormKind::Edit => store.edit_form().get(),
    }
}

/// [`Surface`] that publishes into the store
pub struct StoreSurface {
    store: UiStore,
    bindings: ViewBindings,
    focus_delay_ms: u32,
}

impl StoreSurface {
    pub fn new(store: UiStore, bindings: ViewBindings, config: &AppConfig) -> Self {
        Self { store, bindings, focus_delay_ms: config.focus_delay_ms }
    }
}

impl Surface for StoreSurface {
    fn show_content(&self, content: ViewContent) {
        if let ViewContent::Ready(view) = &content {
            self.store.view_mode().set(view.mode);
            self.store.favorite_count().set(view.favorite_count);
        }
        self.store.content().set(content);
    }

    fn show_form(&self, kind: FormKind, form: &FormState) {
        match kind {
            FormKind::Add => self.store.add_form().set(form.clone()),
            FormKind::Edit => self.store.edit_form().set(form.clone()),
        }
    }

    fn focus_field(&self, kind: FormKind, field: Field) {
        let id = self.bindings.field(kind, field);
        let delay = self.focus_delay_ms;
        // wait for the modal to become visible
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            browser::focus_element(&id);
        });
    }
}

/// [`Feedback`] that shows banners and announcements, then expires them
pub struct StoreFeedback {
    store: UiStore,
    notices: Rc<RefCell<Notices>>,
    config: AppConfig,
}

impl StoreFeedback {
    pub fn new(store: UiStore, config: AppConfig) -> Self {
        Self { store, notices: Rc::new(RefCell::new(Notices::new())), config }
    }
}

impl Feedback for StoreFeedback {
    fn notify(&self, message: &str, kind: NoticeKind) {
        let banner = self.notices.borrow_mut().show(message, kind);
        let ticket = banner.ticket;
        self.store.banner().set(Some(banner));

        let store = self.store;
        let notices = Rc::clone(&self.notices);
        let duration = self.config.banner_ms(kind);
        spawn_local(async move {
            TimeoutFuture::new(duration).await;
            if notices.borrow_mut().expire_banner(ticket) {
                store.banner().set(None);
            }
        });
    }

    fn announce(&self, message: &str) {
        let announcement = self.notices.borrow_mut().announce(message);
        let ticket = announcement.ticket;
        self.store.announcement().set(announcement.message);

        let store = self.store;
        let notices = Rc::clone(&self.notices);
        let duration = self.config.announce_clear_ms;
        spawn_local(async move {
            TimeoutFuture::new(duration).await;
            if notices.borrow_mut().expire_announcement(ticket) {
                store.announcement().set(String::new());
            }
        });
    }
}
