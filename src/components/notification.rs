//! Notification Component
//!
//! Transient banner plus the screen reader live region.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::feedback::NoticeKind;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn Notification() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let banner = move || {
        store.banner().get().map(|banner| {
            let class = format!("notification {}", banner.kind.css_class());
            let role = if banner.kind == NoticeKind::Error { "alert" } else { "status" };
            view! {
                <div class=class role=role aria-live=banner.kind.aria_live()>
                    <span class="notification-message">{banner.message}</span>
                    <button
                        type="button"
                        class="notification-close"
                        aria-label="Cerrar notificación"
                        on:click=move |_| store.banner().set(None)
                    >
                        "×"
                    </button>
                </div>
            }
        })
    };

    view! {
        {banner}
        <div id=ctx.bindings.announcer class="sr-only" aria-live="polite" aria-atomic="true">
            {move || store.announcement().get()}
        </div>
    }
}
