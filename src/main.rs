#![allow(warnings)]
//! Cine de Verano Frontend Entry Point

mod api;
mod app;
mod browser;
mod catalog;
mod components;
mod config;
mod context;
mod controller;
mod error;
mod export;
mod favorites;
mod feedback;
mod forms;
mod models;
mod store;
mod view;

#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = rolling_logger::init(LevelFilter::Info, rolling_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("[APP] Logger not installed: {}", err).into());
    }
    mount_to_body(App);
}
