//! # Blueprint Editor
//!
//! A visual editor for small industrial production chains. A blueprint is a
//! directed graph of two kinds of nodes connected by supply edges:
//! - **Items**: raw or intermediate materials
//! - **Machines**: processing units
//!
//! ## Features
//! - Right-click the canvas to add item or machine nodes
//! - Drag from a node's output handle to another node's input handle to connect them
//! - Double-click a node to rename it in place
//! - Select a node to see its recipe (what feeds it) and usage (what it feeds)
//! - Canvas panning and zooming, grid background and minimap
//! - Save and load blueprints as JSON files

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod error;
mod interaction;
mod recipe;
mod samples;
mod types;
mod ui;

// Re-export public types and functions
pub use constants::DEFAULT_EXPORT_FILE_NAME;
pub use error::LoadError;
pub use interaction::*;
pub use recipe::*;
pub use samples::crude_oil_chain;
pub use types::*;
pub use ui::BlueprintApp;

/// Runs the blueprint editor in a native window.
///
/// File dialogs are driven by `tokio` tasks, so this must be called from a
/// thread that has entered a multi-threaded tokio runtime.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let runtime = tokio::runtime::Runtime::new()?;
///     let _guard = runtime.enter();
///     blueprint_editor::run_app()?;
///     Ok(())
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Blueprint Editor")
            .with_inner_size([1400.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Blueprint Editor",
        options,
        Box::new(|cc| Ok(Box::new(BlueprintApp::new(cc)))),
    )
}

/// Web entry point: mounts the editor on the `<canvas id="blueprint_canvas">` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }

    wasm_bindgen_futures::spawn_local(async {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("blueprint_canvas"))
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            log::error!("no <canvas id=\"blueprint_canvas\"> element found");
            return;
        };

        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(BlueprintApp::new(cc)))),
            )
            .await;
        if let Err(err) = result {
            log::error!("failed to start eframe: {err:?}");
        }
    });

    Ok(())
}
