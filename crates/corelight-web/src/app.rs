//! Page and Bevy application setup

use bevy::prelude::*;
use corelight_core::SiteConfig;
use corelight_scene::{CorelightScenePlugin, ViewportController};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window as BrowserWindow};

use crate::{config, contact, navigation::Navigator};

/// Canvas the background renders into
const CANVAS_SELECTOR: &str = "#bg-canvas";

/// Hook up the document, then run the background scene
pub fn run(window: &BrowserWindow, document: &Document, site: SiteConfig) -> Result<(), JsValue> {
    let viewport = ViewportController::new();

    let navigator = Navigator::new(
        window.clone(),
        document.clone(),
        viewport.clone(),
        site.transitions.clone(),
    );
    navigator.install_global()?;
    let links = navigator.install_links(document)?;
    tracing::info!("Page router ready ({} navigation links)", links);

    if let Some(page) = config::initial_page(&window.location()) {
        if let Err(e) = navigator.show_page(&page) {
            tracing::warn!("Ignoring initial page '{}': {:?}", page, e);
        }
    }

    contact::install(window, document, &site.form)?;

    App::new()
        // Transparent so the page's own background shows through
        .insert_resource(ClearColor(Color::NONE))
        .insert_resource(viewport)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Corelight".to_string(),
                canvas: Some(CANVAS_SELECTOR.to_string()),
                fit_canvas_to_parent: true,
                transparent: true,
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorelightScenePlugin {
            config: site.scene.clone(),
        })
        .run();

    Ok(())
}
