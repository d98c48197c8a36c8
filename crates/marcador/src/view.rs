//! View-binding interface between the controllers and the page.
//!
//! Elements are addressed by their `id`. Lookups return `Option` and
//! mutations return [`Result`] with [`Error::MissingElement`] when the target
//! is absent, so controllers decide for themselves whether a missing element
//! is fatal or a no-op.
//!
//! [`Error::MissingElement`]: crate::Error::MissingElement

use crate::error::Result;

/// Document-level operations: reading and mutating elements.
pub trait Dom {
    /// Whether an element with this id is on the page
    fn exists(&self, id: &str) -> bool;

    /// Current value of a form control
    fn value(&self, id: &str) -> Option<String>;
    fn set_value(&self, id: &str, value: &str) -> Result<()>;

    /// Value of `data-<key>` on the element
    fn data_attribute(&self, id: &str, key: &str) -> Option<String>;

    /// Text content of the element
    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&self, id: &str, text: &str) -> Result<()>;
    fn set_html(&self, id: &str, html: &str) -> Result<()>;

    /// Whether a `<label>` describes the control with this id
    fn has_label(&self, for_id: &str) -> bool;
    /// Text of the `<label>` describing the control with this id
    fn set_label(&self, for_id: &str, text: &str) -> Result<()>;

    /// Toggles read-only and disabled together
    fn set_editable(&self, id: &str, editable: bool) -> Result<()>;
    fn set_disabled(&self, id: &str, disabled: bool) -> Result<()>;

    fn is_checked(&self, id: &str) -> bool;
    fn set_checked(&self, id: &str, checked: bool) -> Result<()>;

    fn class_name(&self, id: &str) -> Option<String>;
    fn set_class_name(&self, id: &str, class_name: &str) -> Result<()>;
    fn add_class(&self, id: &str, class: &str) -> Result<()>;
    fn remove_class(&self, id: &str, class: &str) -> Result<()>;
    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Shows (`display: block`) or hides (`display: none`) the element
    fn set_visible(&self, id: &str, visible: bool) -> Result<()>;

    /// Number of selected options in a `<select multiple>`
    fn selected_count(&self, id: &str) -> usize;

    fn set_custom_validity(&self, id: &str, message: &str) -> Result<()>;

    /// Creates `<input type="hidden" id=.. name=..>` inside the form if it is
    /// missing, then writes the value.
    fn ensure_hidden_input(&self, form_id: &str, id: &str, name: &str, value: &str) -> Result<()>;

    /// Removes the element; absent elements are ignored
    fn remove(&self, id: &str);

    /// The form's successful controls as `(name, value)` pairs, in document
    /// order. Disabled controls and unchecked radios are skipped.
    fn form_fields(&self, form_id: &str) -> Result<Vec<(String, String)>>;

    fn form_action(&self, form_id: &str) -> Option<String>;

    /// Submits the form that contains the element; `false` if there is none
    fn submit_enclosing_form(&self, id: &str) -> Result<bool>;

    fn has_submit_button(&self, form_id: &str) -> bool;
    /// Relabels the form's `type="submit"` button
    fn set_submit_text(&self, form_id: &str, text: &str) -> Result<()>;

    /// Places a secondary button with the given id before the form's submit
    /// button, wrapping both in `#button-wrapper`.
    fn insert_cancel_button(&self, form_id: &str, button_id: &str, text: &str) -> Result<()>;

    fn scroll_into_view(&self, id: &str);
}

/// The parts of `window.location` the controllers read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub origin: String,
    pub pathname: String,
    pub hash: String,
}

/// Window-level effects: navigation, dialogs, cookies and storage.
pub trait Window {
    fn reload(&self);
    fn navigate(&self, href: &str);
    fn location(&self) -> Location;

    /// Blocking alert dialog
    fn alert(&self, message: &str);
    /// Blocking confirm dialog
    fn confirm(&self, message: &str) -> bool;

    /// Raw `document.cookie`
    fn cookie(&self) -> String;
    fn user_agent(&self) -> String;
    /// `navigator.standalone` (iOS home-screen apps)
    fn is_standalone(&self) -> bool;

    fn storage_item(&self, key: &str) -> Option<String>;
    fn set_storage_item(&self, key: &str, value: &str);
}
