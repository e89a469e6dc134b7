#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod boot;
pub mod bundle;
pub mod locale;
pub mod motion;
pub mod navigator;
pub mod projection;
pub mod timeline;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    // only fails if a logger is already installed
    let _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
