//! Carousel Navigation Component

use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::film_grid::{refresh_nav, scroll_carousel};
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};
use crate::view::ScrollDirection;

/// Prev/next buttons, shown only for scrollable views
#[component]
pub fn CarouselNav(container: NodeRef<html::Div>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let (step, edge, settle) = ctx.config.with_value(|config| {
        (config.carousel_step_px, config.carousel_edge_px, config.carousel_settle_ms)
    });

    let scroll = move |direction: ScrollDirection| {
        scroll_carousel(container, direction, step);
        spawn_local(async move {
            TimeoutFuture::new(settle).await;
            refresh_nav(container, store, edge);
        });
    };

    view! {
        <Show when=move || store.view_mode().get().is_scrollable()>
            <div id=ctx.bindings.carousel_nav class="carousel-navigation">
                <button
                    type="button"
                    class="carousel-btn carousel-prev"
                    aria-label="Películas anteriores"
                    disabled=move || store.nav().get().prev_disabled
                    on:click=move |_| scroll(ScrollDirection::Left)
                >
                    "‹"
                </button>
                <button
                    type="button"
                    class="carousel-btn carousel-next"
                    aria-label="Películas siguientes"
                    disabled=move || store.nav().get().next_disabled
                    on:click=move |_| scroll(ScrollDirection::Right)
                >
                    "›"
                </button>
            </div>
        </Show>
    }
}
