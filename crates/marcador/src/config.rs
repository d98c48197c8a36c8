//! Page configuration loaded from an embedded JSON element.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::locale::Locale;
use crate::view::Dom;

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "marcador-config";

/// Settings shared by the page controllers. Every field has a default, so
/// pages only embed what differs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Id of the add/edit match form
    pub form_id: String,
    /// Path prefix of the match REST resource, with trailing slash
    pub api_base: String,
    pub locale: Locale,
    /// Name of the hidden form field carrying the CSRF token
    pub csrf_field: String,
    /// Cookie read when the form field is missing
    pub csrf_cookie: String,
    /// Request header the server expects the token in
    pub csrf_header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_id: "add-edit-match-form".to_string(),
            api_base: "/api/games/matches/".to_string(),
            locale: Locale::Es,
            csrf_field: "csrfmiddlewaretoken".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from the page, falling back to defaults when the
    /// element is absent or holds invalid JSON.
    pub fn from_page<D: Dom>(dom: &D) -> Self {
        let Some(json) = dom.text(CONFIG_ELEMENT_ID) else {
            debug!("No page config found, using defaults");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Invalid page config, using defaults");
                Self::default()
            }
        }
    }

    /// REST path of a single match
    pub fn match_path(&self, match_id: u64) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/{}/", base, match_id)
    }
}
