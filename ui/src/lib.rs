pub mod config;
pub mod contact;
pub mod debounce;
pub mod nav;

#[cfg(feature = "web")]
pub mod dom;
#[cfg(feature = "web")]
pub mod logger;

pub use crate::config::SiteConfig;

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "web")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    init_site();
}

/// Attaches the navigation tracker and the contact reveal to the current page.
#[cfg(feature = "web")]
pub fn init_site() {
    let cfg = SiteConfig::load(&dom::document());

    if let Err(e) = nav::NavTracker::new(cfg.clone()).install() {
        log::warn!("{e:#}");
    }
    if let Err(e) = contact::install(&cfg) {
        log::warn!("{e:#}");
    }
}
