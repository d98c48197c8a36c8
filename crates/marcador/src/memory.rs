//! In-memory page used to drive controllers without a browser.
//!
//! [`MemoryDom`] and [`MemoryWindow`] are cheap handles over shared state, the
//! same way `web_sys` handles point at live browser objects: clone one into a
//! controller and keep another to inspect what the controller did.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::view::{Dom, Location, Window};

/// A single element on the in-memory page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub tag: String,
    /// `type` attribute for inputs and buttons
    pub input_type: Option<String>,
    pub name: Option<String>,
    pub value: String,
    pub text: String,
    pub html: String,
    pub class_name: String,
    /// `data-*` attributes keyed without the `data-` prefix
    pub data: BTreeMap<String, String>,
    /// Id of the owning form
    pub form: Option<String>,
    pub action: Option<String>,
    pub disabled: bool,
    pub read_only: bool,
    pub checked: bool,
    /// Inline `display` style, if set
    pub display: Option<String>,
    pub selected: usize,
    pub validity: String,
}

impl Element {
    pub fn new(tag: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn form(id: &str, action: &str) -> Self {
        Self {
            action: Some(action.to_string()),
            ..Self::new("form", id)
        }
    }

    /// Text input whose `name` equals its id
    pub fn input(id: &str, value: &str) -> Self {
        Self {
            input_type: Some("text".to_string()),
            name: Some(id.to_string()),
            value: value.to_string(),
            ..Self::new("input", id)
        }
    }

    pub fn hidden(id: &str, name: &str, value: &str) -> Self {
        Self {
            input_type: Some("hidden".to_string()),
            name: Some(name.to_string()),
            value: value.to_string(),
            ..Self::new("input", id)
        }
    }

    pub fn radio(id: &str, name: &str, value: &str) -> Self {
        Self {
            input_type: Some("radio".to_string()),
            name: Some(name.to_string()),
            value: value.to_string(),
            ..Self::new("input", id)
        }
    }

    pub fn submit_button(id: &str, text: &str) -> Self {
        Self {
            input_type: Some("submit".to_string()),
            text: text.to_string(),
            ..Self::new("button", id)
        }
    }

    pub fn in_form(mut self, form_id: &str) -> Self {
        self.form = Some(form_id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            if !self.class_name.is_empty() {
                self.class_name.push(' ');
            }
            self.class_name.push_str(class);
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.class_name = self
            .class_name
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
    }

    fn is_type(&self, input_type: &str) -> bool {
        self.input_type.as_deref() == Some(input_type)
    }

    fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "select" | "textarea")
            && !self.is_type("submit")
            && !self.is_type("button")
    }
}

#[derive(Debug, Default)]
struct DomState {
    /// Elements in document order
    elements: Vec<Element>,
    /// Label text keyed by the `for` attribute
    labels: BTreeMap<String, String>,
    submitted: Vec<String>,
    scrolled: Vec<String>,
}

/// Shared in-memory document
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    state: Rc<RefCell<DomState>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element, builder style
    pub fn with(self, element: Element) -> Self {
        self.insert(element);
        self
    }

    /// Appends a `<label for=..>`, builder style
    pub fn with_label(self, for_id: &str, text: &str) -> Self {
        self.state
            .borrow_mut()
            .labels
            .insert(for_id.to_string(), text.to_string());
        self
    }

    pub fn insert(&self, element: Element) {
        self.state.borrow_mut().elements.push(element);
    }

    /// Snapshot of an element
    pub fn element(&self, id: &str) -> Option<Element> {
        self.state
            .borrow()
            .elements
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// Ids of all elements in document order
    pub fn ids(&self) -> Vec<String> {
        self.state
            .borrow()
            .elements
            .iter()
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn label(&self, for_id: &str) -> Option<String> {
        self.state.borrow().labels.get(for_id).cloned()
    }

    /// Forms submitted through [`Dom::submit_enclosing_form`]
    pub fn submitted_forms(&self) -> Vec<String> {
        self.state.borrow().submitted.clone()
    }

    pub fn scrolled(&self) -> Vec<String> {
        self.state.borrow().scrolled.clone()
    }

    fn read<T>(&self, id: &str, f: impl FnOnce(&Element) -> T) -> Option<T> {
        self.state
            .borrow()
            .elements
            .iter()
            .find(|e| e.id == id)
            .map(f)
    }

    fn update(&self, id: &str, f: impl FnOnce(&mut Element)) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let element = state
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))?;
        f(element);
        Ok(())
    }

    fn require_form(&self, form_id: &str) -> Result<()> {
        match self.read(form_id, |e| e.tag == "form") {
            Some(true) => Ok(()),
            _ => Err(Error::MissingElement(form_id.to_string())),
        }
    }
}

impl Dom for MemoryDom {
    fn exists(&self, id: &str) -> bool {
        self.read(id, |_| ()).is_some()
    }

    fn value(&self, id: &str) -> Option<String> {
        self.read(id, |e| e.value.clone())
    }

    fn set_value(&self, id: &str, value: &str) -> Result<()> {
        self.update(id, |e| e.value = value.to_string())
    }

    fn data_attribute(&self, id: &str, key: &str) -> Option<String> {
        self.read(id, |e| e.data.get(key).cloned()).flatten()
    }

    fn text(&self, id: &str) -> Option<String> {
        self.read(id, |e| e.text.clone())
    }

    fn set_text(&self, id: &str, text: &str) -> Result<()> {
        self.update(id, |e| e.text = text.to_string())
    }

    fn set_html(&self, id: &str, html: &str) -> Result<()> {
        self.update(id, |e| e.html = html.to_string())
    }

    fn has_label(&self, for_id: &str) -> bool {
        self.state.borrow().labels.contains_key(for_id)
    }

    fn set_label(&self, for_id: &str, text: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let label = state
            .labels
            .get_mut(for_id)
            .ok_or_else(|| Error::MissingElement(format!("label[for={}]", for_id)))?;
        *label = text.to_string();
        Ok(())
    }

    fn set_editable(&self, id: &str, editable: bool) -> Result<()> {
        self.update(id, |e| {
            e.read_only = !editable;
            e.disabled = !editable;
        })
    }

    fn set_disabled(&self, id: &str, disabled: bool) -> Result<()> {
        self.update(id, |e| e.disabled = disabled)
    }

    fn is_checked(&self, id: &str) -> bool {
        self.read(id, |e| e.checked).unwrap_or(false)
    }

    fn set_checked(&self, id: &str, checked: bool) -> Result<()> {
        let name = self
            .read(id, |e| e.name.clone())
            .ok_or_else(|| Error::MissingElement(id.to_string()))?;
        let mut state = self.state.borrow_mut();
        for element in state.elements.iter_mut() {
            if element.id == id {
                element.checked = checked;
            } else if checked && element.is_type("radio") && name.is_some() && element.name == name
            {
                // Radios in a group are mutually exclusive
                element.checked = false;
            }
        }
        Ok(())
    }

    fn class_name(&self, id: &str) -> Option<String> {
        self.read(id, |e| e.class_name.clone())
    }

    fn set_class_name(&self, id: &str, class_name: &str) -> Result<()> {
        self.update(id, |e| e.class_name = class_name.to_string())
    }

    fn add_class(&self, id: &str, class: &str) -> Result<()> {
        self.update(id, |e| e.add_class(class))
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<()> {
        self.update(id, |e| e.remove_class(class))
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.read(id, |e| e.has_class(class)).unwrap_or(false)
    }

    fn set_visible(&self, id: &str, visible: bool) -> Result<()> {
        let display = if visible { "block" } else { "none" };
        self.update(id, |e| e.display = Some(display.to_string()))
    }

    fn selected_count(&self, id: &str) -> usize {
        self.read(id, |e| e.selected).unwrap_or(0)
    }

    fn set_custom_validity(&self, id: &str, message: &str) -> Result<()> {
        self.update(id, |e| e.validity = message.to_string())
    }

    fn ensure_hidden_input(&self, form_id: &str, id: &str, name: &str, value: &str) -> Result<()> {
        self.require_form(form_id)?;
        if self.exists(id) {
            return self.set_value(id, value);
        }
        self.insert(Element::hidden(id, name, value).in_form(form_id));
        Ok(())
    }

    fn remove(&self, id: &str) {
        self.state.borrow_mut().elements.retain(|e| e.id != id);
    }

    fn form_fields(&self, form_id: &str) -> Result<Vec<(String, String)>> {
        self.require_form(form_id)?;
        let state = self.state.borrow();
        let fields = state
            .elements
            .iter()
            .filter(|e| e.form.as_deref() == Some(form_id))
            .filter(|e| e.is_form_control() && !e.disabled)
            .filter(|e| !(e.is_type("radio") || e.is_type("checkbox")) || e.checked)
            .filter_map(|e| e.name.clone().map(|name| (name, e.value.clone())))
            .collect();
        Ok(fields)
    }

    fn form_action(&self, form_id: &str) -> Option<String> {
        self.read(form_id, |e| e.action.clone()).flatten()
    }

    fn submit_enclosing_form(&self, id: &str) -> Result<bool> {
        let form = self
            .read(id, |e| e.form.clone())
            .ok_or_else(|| Error::MissingElement(id.to_string()))?;
        match form {
            Some(form_id) => {
                self.state.borrow_mut().submitted.push(form_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn has_submit_button(&self, form_id: &str) -> bool {
        self.state
            .borrow()
            .elements
            .iter()
            .any(|e| e.form.as_deref() == Some(form_id) && e.is_type("submit"))
    }

    fn set_submit_text(&self, form_id: &str, text: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let button = state
            .elements
            .iter_mut()
            .find(|e| e.form.as_deref() == Some(form_id) && e.is_type("submit"))
            .ok_or_else(|| Error::MissingElement(format!("{} button[type=submit]", form_id)))?;
        button.text = text.to_string();
        Ok(())
    }

    fn insert_cancel_button(&self, form_id: &str, button_id: &str, text: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let mut submit_at = state
            .elements
            .iter()
            .position(|e| e.form.as_deref() == Some(form_id) && e.is_type("submit"))
            .ok_or_else(|| Error::MissingElement(format!("{} button[type=submit]", form_id)))?;

        if !state.elements.iter().any(|e| e.id == "button-wrapper") {
            let wrapper = Element::new("div", "button-wrapper")
                .with_class("d-flex justify-content-end gap-2 mt-3")
                .in_form(form_id);
            state.elements.insert(submit_at, wrapper);
            submit_at += 1;
        }

        let button = Element {
            input_type: Some("button".to_string()),
            ..Element::new("button", button_id)
        }
        .with_class("btn btn-secondary")
        .with_text(text)
        .in_form(form_id);
        state.elements.insert(submit_at, button);
        Ok(())
    }

    fn scroll_into_view(&self, id: &str) {
        self.state.borrow_mut().scrolled.push(id.to_string());
    }
}

#[derive(Debug, Default)]
struct WindowState {
    location: Location,
    cookie: String,
    user_agent: String,
    standalone: bool,
    storage: BTreeMap<String, String>,
    reloads: usize,
    navigations: Vec<String>,
    alerts: Vec<String>,
    confirms: Vec<String>,
    confirm_answers: VecDeque<bool>,
}

/// Shared in-memory window that records every effect
#[derive(Debug, Clone, Default)]
pub struct MemoryWindow {
    state: Rc<RefCell<WindowState>>,
}

impl MemoryWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(self, origin: &str, pathname: &str, hash: &str) -> Self {
        self.state.borrow_mut().location = Location {
            origin: origin.to_string(),
            pathname: pathname.to_string(),
            hash: hash.to_string(),
        };
        self
    }

    pub fn with_cookie(self, cookie: &str) -> Self {
        self.state.borrow_mut().cookie = cookie.to_string();
        self
    }

    pub fn with_user_agent(self, user_agent: &str) -> Self {
        self.state.borrow_mut().user_agent = user_agent.to_string();
        self
    }

    pub fn with_standalone(self, standalone: bool) -> Self {
        self.state.borrow_mut().standalone = standalone;
        self
    }

    /// Queues the answer for the next confirm dialog. Unqueued dialogs
    /// answer `false`.
    pub fn answer_confirm(&self, answer: bool) {
        self.state.borrow_mut().confirm_answers.push_back(answer);
    }

    pub fn reloads(&self) -> usize {
        self.state.borrow().reloads
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.borrow().navigations.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.state.borrow().confirms.clone()
    }
}

impl Window for MemoryWindow {
    fn reload(&self) {
        self.state.borrow_mut().reloads += 1;
    }

    fn navigate(&self, href: &str) {
        self.state.borrow_mut().navigations.push(href.to_string());
    }

    fn location(&self) -> Location {
        self.state.borrow().location.clone()
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.confirms.push(message.to_string());
        state.confirm_answers.pop_front().unwrap_or(false)
    }

    fn cookie(&self) -> String {
        self.state.borrow().cookie.clone()
    }

    fn user_agent(&self) -> String {
        self.state.borrow().user_agent.clone()
    }

    fn is_standalone(&self) -> bool {
        self.state.borrow().standalone
    }

    fn storage_item(&self, key: &str) -> Option<String> {
        self.state.borrow().storage.get(key).cloned()
    }

    fn set_storage_item(&self, key: &str, value: &str) {
        self.state
            .borrow_mut()
            .storage
            .insert(key.to_string(), value.to_string());
    }
}
