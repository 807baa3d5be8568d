//! Configuration
//!
//! REST endpoint, feedback timings, and the element ids the shell and the
//! renderer agree on.

use crate::feedback::NoticeKind;
use crate::forms::{Field, FormKind};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_COLLECTION: &str = "films";

/// `<meta>` tag in index.html that overrides the API base URL at runtime
pub const API_BASE_META: &str = "cine-api-base";

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST server, without trailing slash
    pub api_base_url: String,
    /// Collection path under the base URL (`films` or `movies`)
    pub collection: String,
    pub success_banner_ms: u32,
    pub error_banner_ms: u32,
    pub announce_clear_ms: u32,
    /// Delay before focusing a field, lets the modal transition finish
    pub focus_delay_ms: u32,
    /// One card width plus gap
    pub carousel_step_px: i32,
    /// Distance from either end at which a nav button disables
    pub carousel_edge_px: i32,
    /// Time for a smooth scroll to settle before nav state is re-read
    pub carousel_settle_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            success_banner_ms: 4000,
            error_banner_ms: 5000,
            announce_clear_ms: 1000,
            focus_delay_ms: 100,
            carousel_step_px: 320,
            carousel_edge_px: 10,
            carousel_settle_ms: 300,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `CINE_API_BASE_URL` / `CINE_API_COLLECTION` at build time
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("CINE_API_BASE_URL") {
            config = config.with_api_base_url(url);
        }
        if let Some(collection) = option_env!("CINE_API_COLLECTION") {
            config = config.with_collection(collection);
        }
        config
    }

    /// Override the base URL; blank values are ignored
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            self.api_base_url = url.to_string();
        }
        self
    }

    pub fn with_collection(mut self, collection: &str) -> Self {
        let collection = collection.trim().trim_matches('/');
        if !collection.is_empty() {
            self.collection = collection.to_string();
        }
        self
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.api_base_url, self.collection)
    }

    pub fn banner_ms(&self, kind: NoticeKind) -> u32 {
        match kind {
            NoticeKind::Success => self.success_banner_ms,
            NoticeKind::Error => self.error_banner_ms,
        }
    }
}

/// Element ids shared by the shell markup, focus handling, and styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBindings {
    pub container: &'static str,
    pub add_button: &'static str,
    pub add_modal: &'static str,
    pub edit_modal: &'static str,
    pub overlay: &'static str,
    pub announcer: &'static str,
    pub carousel_nav: &'static str,
}

impl Default for ViewBindings {
    fn default() -> Self {
        Self {
            container: "films-container",
            add_button: "add-film-btn",
            add_modal: "add-film-modal",
            edit_modal: "edit-film-modal",
            overlay: "modal-overlay",
            announcer: "sr-announcer",
            carousel_nav: "carousel-navigation",
        }
    }
}

impl ViewBindings {
    pub fn modal(&self, kind: FormKind) -> &'static str {
        match kind {
            FormKind::Add => self.add_modal,
            FormKind::Edit => self.edit_modal,
        }
    }

    pub fn form(&self, kind: FormKind) -> String {
        format!("{}-film-form", kind.prefix())
    }

    /// Input id, e.g. `edit-title`
    pub fn field(&self, kind: FormKind, field: Field) -> String {
        format!("{}-{}", kind.prefix(), field.name())
    }
}
