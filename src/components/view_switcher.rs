//! View Switcher Component
//!
//! Tabs for grid / carousel / favorites, plus the export button.

use chrono::Utc;
use leptos::prelude::*;

use crate::browser;
use crate::context::use_app_context;
use crate::error::ActionError;
use crate::export::EXPORT_FILE_NAME;
use crate::feedback::NoticeKind;
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view::ViewMode;

#[component]
pub fn ViewSwitcher() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let on_export = move |_| {
        let controller = ctx.controller();
        let Ok(json) = controller.export_snapshot(Utc::now()) else {
            return;
        };
        match browser::download_json(EXPORT_FILE_NAME, &json) {
            Ok(()) => controller.notify("Catálogo exportado", NoticeKind::Success),
            Err(err) => {
                log::error!("[EXPORT] Download failed: {}", err);
                controller.notify(&ActionError::Export(err).to_string(), NoticeKind::Error);
            }
        }
    };

    view! {
        <nav class="view-switcher" role="tablist" aria-label="Modo de vista">
            {ViewMode::ALL
                .into_iter()
                .map(|mode| {
                    let is_active = move || store.view_mode().get() == mode;
                    view! {
                        <button
                            type="button"
                            role="tab"
                            class=move || if is_active() { "view-tab active" } else { "view-tab" }
                            aria-selected=move || is_active().to_string()
                            aria-controls=ctx.bindings.container
                            on:click=move |_| ctx.controller().set_view_mode(mode)
                        >
                            {mode.label()}
                            {(mode == ViewMode::Favorites).then(|| view! {
                                <span class="favorites-count">
                                    {move || store.favorite_count().get()}
                                </span>
                            })}
                        </button>
                    }
                })
                .collect_view()}
            <button type="button" class="btn btn-export" on:click=on_export>
                "Exportar"
            </button>
        </nav>
    }
}
