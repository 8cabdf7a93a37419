//! Corelight Web - WASM entry point for the page
//!
//! Wires the background scene, the page router, and the contact form into
//! the host document.

mod app;
mod config;
mod contact;
mod navigation;

use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Parse configuration first so it can pick the log level
    let loaded = config::load_from_document(&document);
    let level = match &loaded {
        Ok(Some(site)) => config::log_level(&site.logging.level),
        _ => config::log_level(""),
    };
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build(),
    );

    let site = match loaded {
        Ok(Some(site)) => {
            tracing::info!("Using inline site configuration");
            site
        }
        Ok(None) => corelight_core::SiteConfig::default(),
        Err(e) => {
            tracing::warn!("Ignoring invalid site configuration: {}", e);
            corelight_core::SiteConfig::default()
        }
    };

    app::run(&window, &document, site)
}
