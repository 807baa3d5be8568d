//! Browser Bindings
//!
//! web-sys glue behind the controller's traits: localStorage, `confirm()`,
//! focus, downloads, and the DOM reads the card container needs.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlElement, MouseEvent,
    ScrollBehavior, ScrollToOptions, Storage, Url,
};

use crate::controller::Confirm;
use crate::favorites::{FavoriteStorage, FAVORITES_KEY};
use crate::models::MovieId;
use crate::view::{CardAction, ScrollMetrics};

fn js_error(err: JsValue) -> String {
    format!("{:?}", err)
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn local_storage() -> Result<Storage, String> {
    web_sys::window()
        .ok_or("no window")?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| "localStorage disabled".to_string())
}

/// Favorites persisted under [`FAVORITES_KEY`]
pub struct LocalFavoriteStorage;

impl FavoriteStorage for LocalFavoriteStorage {
    fn load(&self) -> Result<Option<String>, String> {
        local_storage()?.get_item(FAVORITES_KEY).map_err(js_error)
    }

    fn save(&self, json: &str) -> Result<(), String> {
        local_storage()?.set_item(FAVORITES_KEY, json).map_err(js_error)
    }
}

/// Native `window.confirm()`; a blocked dialog counts as "no"
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub fn focus_element(id: &str) {
    let element = document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    match element {
        Some(element) => {
            let _ = element.focus();
        }
        None => log::debug!("[BROWSER] No #{} to focus", id),
    }
}

/// `content` of `<meta name="...">`, if present and non-blank
pub fn meta_content(name: &str) -> Option<String> {
    let meta = document()?.query_selector(&format!("meta[name=\"{}\"]", name)).ok()??;
    meta.get_attribute("content").filter(|content| !content.trim().is_empty())
}

/// Save `json` through a temporary object URL
pub fn download_json(file_name: &str, json: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor = document()
        .ok_or("no document")?
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "anchor element expected".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_error)
}

/// Swap broken posters for their placeholder.
///
/// `error` does not bubble, so the listener sits on the container in the
/// capture phase and survives every `innerHTML` replacement.
pub fn install_image_fallback(container: &Element) {
    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let Some(image) = ev.target().and_then(|target| target.dyn_into::<Element>().ok()) else {
            return;
        };
        if image.get_attribute("data-fallback").as_deref() != Some("poster") {
            return;
        }
        let _ = image.set_attribute("hidden", "");
        if let Some(placeholder) = image.next_element_sibling() {
            let _ = placeholder.remove_attribute("hidden");
        }
    });
    if let Err(err) = container.add_event_listener_with_callback_and_bool(
        "error",
        handler.as_ref().unchecked_ref(),
        true,
    ) {
        log::warn!("[BROWSER] Poster fallback not installed: {}", js_error(err));
    }
    handler.forget();
}

/// Action and movie id of the card button under a click
pub fn card_action(ev: &MouseEvent) -> Option<(CardAction, MovieId)> {
    let target = ev.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("[data-action]").ok()??;
    let action = CardAction::parse(&button.get_attribute("data-action")?)?;
    let id = button.get_attribute("data-movie-id")?;
    Some((action, MovieId::new(id)))
}

pub fn scroll_metrics(element: &Element) -> ScrollMetrics {
    ScrollMetrics {
        scroll_left: element.scroll_left(),
        scroll_width: element.scroll_width(),
        client_width: element.client_width(),
    }
}

pub fn smooth_scroll_to(element: &Element, left: i32) {
    let options = ScrollToOptions::new();
    options.set_left(f64::from(left));
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_to_with_scroll_to_options(&options);
}
