//! Cine de Verano App
//!
//! Wires the controller to the browser and lays out the single page.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::RestClient;
use crate::browser::{self, BrowserConfirm, LocalFavoriteStorage};
use crate::components::{scroll_carousel, CarouselNav, FilmForm, FilmGrid, Notification, ViewSwitcher};
use crate::config::{AppConfig, ViewBindings, API_BASE_META};
use crate::context::AppContext;
use crate::controller::CatalogController;
use crate::forms::{FormKind, FormState};
use crate::store::{StoreFeedback, StoreSurface, UiState, UiStateStoreFields};
use crate::view::ScrollDirection;

#[component]
pub fn App() -> impl IntoView {
    let config = match browser::meta_content(API_BASE_META) {
        Some(url) => AppConfig::from_build_env().with_api_base_url(&url),
        None => AppConfig::from_build_env(),
    };
    let bindings = ViewBindings::default();
    let client = RestClient::new(&config);
    log::info!("[APP] Catalog endpoint: {}", client.collection_url());

    let store = Store::new(UiState::default());
    provide_context(store);

    let controller = CatalogController::new(
        Box::new(client),
        Box::new(StoreSurface::new(store, bindings, &config)),
        Box::new(StoreFeedback::new(store, config.clone())),
        Box::new(BrowserConfirm),
        Box::new(LocalFavoriteStorage),
    );
    let step = config.carousel_step_px;
    let ctx = AppContext::new(controller, config, bindings);
    provide_context(ctx);

    let container = NodeRef::<html::Div>::new();

    // Initial load
    Effect::new(move |_| {
        ctx.spawn(|controller| async move {
            let _ = controller.load().await;
        });
    });

    let keys = window_event_listener(ev::keydown, move |ev| {
        let direction = match ev.key().as_str() {
            "Escape" => {
                ctx.controller().cancel_all();
                return;
            }
            "ArrowLeft" => ScrollDirection::Left,
            "ArrowRight" => ScrollDirection::Right,
            _ => return,
        };
        if ev.ctrl_key() && store.view_mode().get_untracked().is_scrollable() {
            ev.prevent_default();
            scroll_carousel(container, direction, step);
        }
    });
    on_cleanup(move || keys.remove());

    let any_form_open = move || {
        store.add_form().with(FormState::is_open) || store.edit_form().with(FormState::is_open)
    };

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"🎬 Cine de Verano"</h1>
                <button
                    id=bindings.add_button
                    type="button"
                    class="btn btn-primary"
                    on:click=move |_| ctx.controller().open_add()
                >
                    "+ Agregar película"
                </button>
            </header>

            <Notification />

            <main class="app-main">
                <ViewSwitcher />
                <FilmGrid container=container />
                <CarouselNav container=container />
            </main>

            <Show when=any_form_open>
                <div
                    id=bindings.overlay
                    class="modal-overlay"
                    on:click=move |_| ctx.controller().cancel_all()
                ></div>
            </Show>
            <FilmForm kind=FormKind::Add />
            <FilmForm kind=FormKind::Edit />
        </div>
    }
}
