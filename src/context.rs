//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::{AppConfig, ViewBindings};
use crate::controller::CatalogController;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The controller is `!Send`, so it lives in local storage
    controller: StoredValue<Rc<CatalogController>, LocalStorage>,
    pub config: StoredValue<AppConfig>,
    pub bindings: ViewBindings,
}

impl AppContext {
    pub fn new(controller: CatalogController, config: AppConfig, bindings: ViewBindings) -> Self {
        Self {
            controller: StoredValue::new_local(Rc::new(controller)),
            config: StoredValue::new(config),
            bindings,
        }
    }

    pub fn controller(&self) -> Rc<CatalogController> {
        self.controller.get_value()
    }

    /// Run an async controller action on the page's executor
    pub fn spawn<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<CatalogController>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(action(self.controller()));
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
