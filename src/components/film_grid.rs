//! Film Grid Component
//!
//! The movie container. Card markup comes pre-rendered from the controller and
//! is swapped in wholesale; clicks are dispatched from `data-action`.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields, UiStore};
use crate::view::{nav_state, scroll_target, CardAction, ScrollDirection};

/// Re-read the scroll position into the prev/next state
pub fn refresh_nav(container: NodeRef<html::Div>, store: UiStore, edge: i32) {
    let Some(element) = container.get_untracked() else {
        return;
    };
    let nav = nav_state(browser::scroll_metrics(&element), edge);
    if store.nav().get_untracked() != nav {
        store.nav().set(nav);
    }
}

/// Scroll one card in `direction`
pub fn scroll_carousel(container: NodeRef<html::Div>, direction: ScrollDirection, step: i32) {
    let Some(element) = container.get_untracked() else {
        return;
    };
    let target = scroll_target(browser::scroll_metrics(&element), direction, step);
    browser::smooth_scroll_to(&element, target);
}

#[component]
pub fn FilmGrid(container: NodeRef<html::Div>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let edge = ctx.config.with_value(|config| config.carousel_edge_px);

    container.on_load(|element| browser::install_image_fallback(&element));

    // new content changes the scroll range
    Effect::new(move |_| {
        store.content().track();
        request_animation_frame(move || refresh_nav(container, store, edge));
    });

    let on_click = move |ev: web_sys::MouseEvent| {
        let Some((action, id)) = browser::card_action(&ev) else {
            return;
        };
        log::debug!("[GRID] {} #{}", action.as_str(), id);
        let controller = ctx.controller();
        match action {
            CardAction::Edit => {
                let _ = controller.open_edit(&id);
            }
            CardAction::Favorite => {
                let _ = controller.toggle_favorite(&id);
            }
            CardAction::Delete => spawn_local(async move {
                let _ = controller.request_delete(&id).await;
            }),
        }
    };

    view! {
        <div
            id=ctx.bindings.container
            node_ref=container
            class=move || store.view_mode().get().container_class()
            role="list"
            aria-label="Catálogo de películas"
            aria-busy=move || store.content().with(|content| content.is_loading()).to_string()
            inner_html=move || store.content().with(|content| content.html())
            on:click=on_click
            on:scroll=move |_| refresh_nav(container, store, edge)
        ></div>
    }
}
