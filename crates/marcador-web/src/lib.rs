//! Browser entry point for the marcador controllers.
//!
//! Build with `wasm-pack build crates/marcador-web --target web` and load the
//! generated module from the base template. On start it installs the panic
//! hook and logger, then mounts every controller once the DOM is parsed.

mod dom;
mod listen;
mod mount;
mod window;

use anyhow::{Context, Result};
use tracing::error;
use wasm_bindgen::prelude::*;

pub use dom::WebDom;
pub use window::WebWindow;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    if let Err(e) = run() {
        error!(error = %e, "marcador failed to start");
    }
}

fn run() -> Result<()> {
    let window = web_sys::window().context("no global window")?;
    let document = window.document().context("window has no document")?;
    let dom = WebDom::new(document.clone());
    let window = WebWindow::new(window);

    if document.ready_state() == "loading" {
        listen::listen(&document, "DOMContentLoaded", move |_| {
            mount::mount_all(&dom, &window)
        })?;
    } else {
        mount::mount_all(&dom, &window);
    }
    Ok(())
}
