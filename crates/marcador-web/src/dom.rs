//! `web_sys` implementation of [`marcador::Dom`].

use marcador::{Dom, Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, FormData, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
};

const BUTTON_WRAPPER_ID: &str = "button-wrapper";

/// Convert a thrown JS value into a library error
pub fn js_error(err: JsValue) -> Error {
    Error::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Handle on the live document
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// All elements matching a CSS selector, in document order
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn require(&self, id: &str) -> Result<Element> {
        self.element(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }

    fn form(&self, id: &str) -> Result<HtmlFormElement> {
        self.require(id)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| Error::Dom(format!("#{} is not a form", id)))
    }

    fn input(&self, id: &str) -> Result<HtmlInputElement> {
        self.require(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| Error::Dom(format!("#{} is not an input", id)))
    }

    /// `<label for=..>`, or the element right after the control
    fn label_for(&self, for_id: &str) -> Option<Element> {
        self.document
            .query_selector(&format!("label[for='{}']", for_id))
            .ok()
            .flatten()
            .or_else(|| self.element(for_id)?.next_element_sibling())
    }

    fn submit_button(&self, form: &HtmlFormElement) -> Option<Element> {
        form.query_selector("button[type='submit']").ok().flatten()
    }
}

impl Dom for WebDom {
    fn exists(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn value(&self, id: &str) -> Option<String> {
        let element = self.element(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            Some(select.value())
        } else {
            element
                .dyn_ref::<HtmlTextAreaElement>()
                .map(HtmlTextAreaElement::value)
        }
    }

    fn set_value(&self, id: &str, value: &str) -> Result<()> {
        let element = self.require(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            return Err(Error::Dom(format!("#{} is not a form control", id)));
        }
        Ok(())
    }

    fn data_attribute(&self, id: &str, key: &str) -> Option<String> {
        self.element(id)?.get_attribute(&format!("data-{}", key))
    }

    fn text(&self, id: &str) -> Option<String> {
        self.element(id)?.text_content()
    }

    fn set_text(&self, id: &str, text: &str) -> Result<()> {
        self.require(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_html(&self, id: &str, html: &str) -> Result<()> {
        self.require(id)?.set_inner_html(html);
        Ok(())
    }

    fn has_label(&self, for_id: &str) -> bool {
        self.label_for(for_id).is_some()
    }

    fn set_label(&self, for_id: &str, text: &str) -> Result<()> {
        let label = self
            .label_for(for_id)
            .ok_or_else(|| Error::MissingElement(format!("label[for={}]", for_id)))?;
        label.set_text_content(Some(text));
        Ok(())
    }

    fn set_editable(&self, id: &str, editable: bool) -> Result<()> {
        let input = self.input(id)?;
        input.set_read_only(!editable);
        input.set_disabled(!editable);
        Ok(())
    }

    fn set_disabled(&self, id: &str, disabled: bool) -> Result<()> {
        let element = self.require(id)?;
        if disabled {
            element.set_attribute("disabled", "true").map_err(js_error)
        } else {
            element.remove_attribute("disabled").map_err(js_error)
        }
    }

    fn is_checked(&self, id: &str) -> bool {
        self.input(id).map(|i| i.checked()).unwrap_or(false)
    }

    fn set_checked(&self, id: &str, checked: bool) -> Result<()> {
        self.input(id)?.set_checked(checked);
        Ok(())
    }

    fn class_name(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.class_name())
    }

    fn set_class_name(&self, id: &str, class_name: &str) -> Result<()> {
        self.require(id)?.set_class_name(class_name);
        Ok(())
    }

    fn add_class(&self, id: &str, class: &str) -> Result<()> {
        self.require(id)?.class_list().add_1(class).map_err(js_error)
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<()> {
        self.require(id)?
            .class_list()
            .remove_1(class)
            .map_err(js_error)
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|e| e.class_list().contains(class))
            .unwrap_or(false)
    }

    fn set_visible(&self, id: &str, visible: bool) -> Result<()> {
        let element = self
            .require(id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| Error::Dom(format!("#{} has no style", id)))?;
        let display = if visible { "block" } else { "none" };
        element
            .style()
            .set_property("display", display)
            .map_err(js_error)
    }

    fn selected_count(&self, id: &str) -> usize {
        self.element(id)
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
            .map(|s| s.selected_options().length() as usize)
            .unwrap_or(0)
    }

    fn set_custom_validity(&self, id: &str, message: &str) -> Result<()> {
        self.input(id)?.set_custom_validity(message);
        Ok(())
    }

    fn ensure_hidden_input(&self, form_id: &str, id: &str, name: &str, value: &str) -> Result<()> {
        if self.exists(id) {
            return self.set_value(id, value);
        }

        let form = self.form(form_id)?;
        let input = self
            .document
            .create_element("input")
            .map_err(js_error)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| Error::Dom("created element is not an input".to_string()))?;
        input.set_type("hidden");
        input.set_id(id);
        input.set_name(name);
        input.set_value(value);
        form.append_child(&input).map_err(js_error)?;
        Ok(())
    }

    fn remove(&self, id: &str) {
        if let Some(element) = self.element(id) {
            element.remove();
        }
    }

    fn form_fields(&self, form_id: &str) -> Result<Vec<(String, String)>> {
        let form = self.form(form_id)?;
        let data = FormData::new_with_form(&form).map_err(js_error)?;
        let entries = js_sys::try_iter(&data)
            .map_err(js_error)?
            .ok_or_else(|| Error::Dom("FormData is not iterable".to_string()))?;

        let mut fields = Vec::new();
        for entry in entries {
            let pair = js_sys::Array::from(&entry.map_err(js_error)?);
            // File entries have no string value
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.push((name, value));
            }
        }
        Ok(fields)
    }

    fn form_action(&self, form_id: &str) -> Option<String> {
        self.form(form_id).ok().map(|f| f.action())
    }

    fn submit_enclosing_form(&self, id: &str) -> Result<bool> {
        let element = self.require(id)?;
        let Some(form) = element.closest("form").map_err(js_error)? else {
            return Ok(false);
        };
        let form = form
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| Error::Dom("closest form is not a form".to_string()))?;
        form.submit().map_err(js_error)?;
        Ok(true)
    }

    fn has_submit_button(&self, form_id: &str) -> bool {
        self.form(form_id)
            .ok()
            .and_then(|form| self.submit_button(&form))
            .is_some()
    }

    fn set_submit_text(&self, form_id: &str, text: &str) -> Result<()> {
        let form = self.form(form_id)?;
        let button = self
            .submit_button(&form)
            .ok_or_else(|| Error::MissingElement(format!("{} button[type=submit]", form_id)))?;
        button.set_text_content(Some(text));
        Ok(())
    }

    fn insert_cancel_button(&self, form_id: &str, button_id: &str, text: &str) -> Result<()> {
        let form = self.form(form_id)?;
        let submit = self
            .submit_button(&form)
            .ok_or_else(|| Error::MissingElement(format!("{} button[type=submit]", form_id)))?;

        let button = self.document.create_element("button").map_err(js_error)?;
        button.set_id(button_id);
        button.set_attribute("type", "button").map_err(js_error)?;
        button.set_class_name("btn btn-secondary");
        button.set_text_content(Some(text));

        let wrapper = match self.element(BUTTON_WRAPPER_ID) {
            Some(wrapper) => wrapper,
            None => {
                let wrapper = self.document.create_element("div").map_err(js_error)?;
                wrapper.set_id(BUTTON_WRAPPER_ID);
                wrapper.set_class_name("d-flex justify-content-end gap-2 mt-3");
                let parent = submit
                    .parent_node()
                    .ok_or_else(|| Error::Dom("submit button has no parent".to_string()))?;
                parent.append_child(&wrapper).map_err(js_error)?;
                wrapper
            }
        };

        wrapper.set_inner_html("");
        wrapper.append_child(&button).map_err(js_error)?;
        wrapper.append_child(&submit).map_err(js_error)?;
        Ok(())
    }

    fn scroll_into_view(&self, id: &str) {
        if let Some(element) = self.element(id) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}
