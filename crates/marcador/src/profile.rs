//! Profile page: inline e-mail editing sent as a JSON `PATCH`.

use std::cell::RefCell;

use maud::html;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::api::{error_message, JsonApi, Method};
use crate::config::Config;
use crate::csrf;
use crate::error::{Error, Result};
use crate::view::{Dom, Window};

#[derive(Debug, Clone)]
pub struct ProfileIds {
    pub form: String,
    pub email: String,
    pub save: String,
    pub cancel: String,
    pub errors: String,
}

impl Default for ProfileIds {
    fn default() -> Self {
        Self {
            form: "user-form".to_string(),
            email: "id_email".to_string(),
            save: "save-btn".to_string(),
            cancel: "cancel-btn".to_string(),
            errors: "error-container".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    Unchanged,
    Saved,
    /// The server rejected the change with this message
    Rejected(String),
}

pub struct ProfileEditor<D, W> {
    dom: D,
    window: W,
    ids: ProfileIds,
    config: Config,
    original_email: RefCell<String>,
}

impl<D: Dom, W: Window> ProfileEditor<D, W> {
    /// Bind to the profile form and remember the current e-mail
    pub fn attach(dom: D, window: W, ids: ProfileIds, config: Config) -> Option<Self> {
        let present = [&ids.form, &ids.email, &ids.save, &ids.cancel]
            .iter()
            .all(|id| dom.exists(id));
        if !present {
            return None;
        }

        let original_email = dom.value(&ids.email).unwrap_or_default();
        info!(email = %original_email, "Profile editor attached");
        Some(Self {
            dom,
            window,
            ids,
            config,
            original_email: RefCell::new(original_email),
        })
    }

    pub fn ids(&self) -> &ProfileIds {
        &self.ids
    }

    fn is_changed(&self) -> bool {
        self.dom.value(&self.ids.email).unwrap_or_default() != *self.original_email.borrow()
    }

    fn set_buttons_enabled(&self, enabled: bool) -> Result<()> {
        self.dom.set_disabled(&self.ids.save, !enabled)?;
        self.dom.set_disabled(&self.ids.cancel, !enabled)
    }

    /// The e-mail field was edited
    pub fn on_input(&self) -> Result<()> {
        if self.is_changed() {
            self.set_buttons_enabled(true)?;
        }
        Ok(())
    }

    /// Put the original e-mail back
    pub fn reset(&self) -> Result<()> {
        let original = self.original_email.borrow().clone();
        self.dom.set_value(&self.ids.email, &original)?;
        self.set_buttons_enabled(false)
    }

    /// Send the new e-mail, if it changed
    pub async fn submit<A: JsonApi>(&self, api: &A) -> Result<ProfileOutcome> {
        if !self.is_changed() {
            info!("No changes to submit");
            return Ok(ProfileOutcome::Unchanged);
        }

        let email = self.dom.value(&self.ids.email).unwrap_or_default();
        let action = self
            .dom
            .form_action(&self.ids.form)
            .ok_or_else(|| Error::MissingElement(format!("{} action", self.ids.form)))?;
        let fields = self.dom.form_fields(&self.ids.form)?;
        let token = csrf::find_token(&fields, &self.window.cookie(), &self.config);

        let response = api
            .send_json(Method::Patch, &action, &json!({ "email": email }), token.as_deref())
            .await;

        let rejected = match response {
            Ok(body) => error_message(&body),
            Err(Error::Http { body, .. }) => {
                let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                Some(error_message(&body).unwrap_or_else(|| "Could not save changes.".to_string()))
            }
            Err(e) => {
                error!(error = %e, "Error submitting profile form");
                return Err(e);
            }
        };

        if let Some(message) = rejected {
            self.show_error(&message)?;
            return Ok(ProfileOutcome::Rejected(message));
        }

        info!("Profile updated");
        self.dom.set_html(&self.ids.errors, "").ok();
        *self.original_email.borrow_mut() = email;
        self.set_buttons_enabled(false)?;
        Ok(ProfileOutcome::Saved)
    }

    fn show_error(&self, message: &str) -> Result<()> {
        let markup = html! {
            div.alert.alert-danger { (message) }
        };
        self.dom.set_html(&self.ids.errors, &markup.into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryDom, MemoryWindow};
    use std::cell::RefCell;

    enum Reply {
        Ok(Value),
        Status(u16, &'static str),
    }

    struct FakeApi {
        reply: Reply,
        requests: RefCell<Vec<(Method, String, Value, Option<String>)>>,
    }

    impl FakeApi {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl JsonApi for FakeApi {
        async fn send_json(
            &self,
            method: Method,
            path: &str,
            body: &Value,
            csrf_token: Option<&str>,
        ) -> Result<Value> {
            self.requests.borrow_mut().push((
                method,
                path.to_string(),
                body.clone(),
                csrf_token.map(String::from),
            ));
            match &self.reply {
                Reply::Ok(value) => Ok(value.clone()),
                Reply::Status(status, body) => Err(Error::Http {
                    status: *status,
                    body: body.to_string(),
                }),
            }
        }
    }

    fn page() -> MemoryDom {
        let disabled = |e: Element| Element { disabled: true, ..e };
        MemoryDom::new()
            .with(Element::form("user-form", "/profile/"))
            .with(Element::hidden("csrf", "csrfmiddlewaretoken", "tok").in_form("user-form"))
            .with(Element::input("id_email", "old@example.com").with_name("email").in_form("user-form"))
            .with(disabled(Element::submit_button("save-btn", "Save").in_form("user-form")))
            .with(disabled(Element::new("button", "cancel-btn")))
            .with(Element::new("div", "error-container"))
    }

    fn editor(dom: &MemoryDom) -> ProfileEditor<MemoryDom, MemoryWindow> {
        ProfileEditor::attach(
            dom.clone(),
            MemoryWindow::new(),
            ProfileIds::default(),
            Config::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_input_enables_buttons_only_when_changed() {
        let dom = page();
        let editor = editor(&dom);

        editor.on_input().unwrap();
        assert!(dom.element("save-btn").unwrap().disabled);

        dom.set_value("id_email", "new@example.com").unwrap();
        editor.on_input().unwrap();
        assert!(!dom.element("save-btn").unwrap().disabled);
        assert!(!dom.element("cancel-btn").unwrap().disabled);
    }

    #[test]
    fn test_reset_restores_original() {
        let dom = page();
        let editor = editor(&dom);
        dom.set_value("id_email", "new@example.com").unwrap();
        editor.on_input().unwrap();

        editor.reset().unwrap();
        assert_eq!(dom.value("id_email").as_deref(), Some("old@example.com"));
        assert!(dom.element("save-btn").unwrap().disabled);
        assert!(dom.element("cancel-btn").unwrap().disabled);
    }

    #[tokio::test]
    async fn test_unchanged_submit_sends_nothing() {
        let dom = page();
        let api = FakeApi::new(Reply::Ok(Value::Null));
        let outcome = editor(&dom).submit(&api).await.unwrap();
        assert_eq!(outcome, ProfileOutcome::Unchanged);
        assert!(api.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_submit_patches_email() {
        let dom = page();
        let editor = editor(&dom);
        let api = FakeApi::new(Reply::Ok(json!({"email": "new@example.com"})));

        dom.set_value("id_email", "new@example.com").unwrap();
        let outcome = editor.submit(&api).await.unwrap();
        assert_eq!(outcome, ProfileOutcome::Saved);

        let requests = api.requests.borrow();
        let (method, path, body, token) = &requests[0];
        assert_eq!(*method, Method::Patch);
        assert_eq!(path, "/profile/");
        assert_eq!(*body, json!({"email": "new@example.com"}));
        assert_eq!(token.as_deref(), Some("tok"));

        // The saved address is the new baseline
        assert_eq!(
            editor.submit(&api).await.unwrap(),
            ProfileOutcome::Unchanged
        );
    }

    #[tokio::test]
    async fn test_error_key_is_rendered_escaped() {
        let dom = page();
        let editor = editor(&dom);
        let api = FakeApi::new(Reply::Ok(json!({"error": "<b>taken</b>"})));

        dom.set_value("id_email", "new@example.com").unwrap();
        let outcome = editor.submit(&api).await.unwrap();
        assert_eq!(outcome, ProfileOutcome::Rejected("<b>taken</b>".to_string()));
        assert_eq!(
            dom.element("error-container").unwrap().html,
            r#"<div class="alert alert-danger">&lt;b&gt;taken&lt;/b&gt;</div>"#
        );
    }

    #[tokio::test]
    async fn test_http_error_body_is_rendered() {
        let dom = page();
        let editor = editor(&dom);
        let api = FakeApi::new(Reply::Status(400, r#"{"error": "Invalid email"}"#));

        dom.set_value("id_email", "nope").unwrap();
        let outcome = editor.submit(&api).await.unwrap();
        assert_eq!(outcome, ProfileOutcome::Rejected("Invalid email".to_string()));
        assert!(dom.element("error-container").unwrap().html.contains("Invalid email"));
    }
}
