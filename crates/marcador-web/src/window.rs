use marcador::{Location, Window};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Storage};

/// `web_sys` implementation of [`marcador::Window`]
#[derive(Debug, Clone)]
pub struct WebWindow {
    window: web_sys::Window,
}

impl WebWindow {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Option<Storage> {
        self.window.local_storage().ok().flatten()
    }
}

impl Window for WebWindow {
    fn reload(&self) {
        if let Err(e) = self.window.location().reload() {
            warn!(error = ?e, "Reload failed");
        }
    }

    fn navigate(&self, href: &str) {
        if let Err(e) = self.window.location().set_href(href) {
            warn!(href, error = ?e, "Navigation failed");
        }
    }

    fn location(&self) -> Location {
        let location = self.window.location();
        Location {
            origin: location.origin().unwrap_or_default(),
            pathname: location.pathname().unwrap_or_default(),
            hash: location.hash().unwrap_or_default(),
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            warn!(error = ?e, "Alert not shown");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn cookie(&self) -> String {
        self.window
            .document()
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .and_then(|d| d.cookie().ok())
            .unwrap_or_default()
    }

    fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }

    // Safari-only, so not in the generated bindings
    fn is_standalone(&self) -> bool {
        js_sys::Reflect::get(&self.window.navigator(), &JsValue::from_str("standalone"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    fn storage_item(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set_storage_item(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.set_item(key, value) {
                warn!(key, error = ?e, "Could not write local storage");
            }
        }
    }
}
