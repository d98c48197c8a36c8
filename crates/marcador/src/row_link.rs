use tracing::debug;

use crate::view::Window;

/// Table rows that navigate when clicked
pub const ROW_SELECTOR: &str = ".table tr[data-href]";

/// Clicks inside these elements keep their own behaviour
pub const INTERACTIVE_SELECTOR: &str = "a, button, input, select, textarea, label";

/// Follows `data-href` of a clicked table row.
pub struct RowLinks<W> {
    window: W,
}

impl<W: Window> RowLinks<W> {
    pub fn new(window: W) -> Self {
        Self { window }
    }

    /// Returns whether the click navigated
    pub fn follow(&self, href: Option<&str>, inside_interactive: bool) -> bool {
        if inside_interactive {
            return false;
        }
        match href.map(str::trim).filter(|h| !h.is_empty()) {
            Some(href) => {
                debug!(href, "Row clicked");
                self.window.navigate(href);
                true
            }
            None => false,
        }
    }
}
