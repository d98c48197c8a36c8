use crate::error::Result;
use crate::view::Dom;

pub const MISMATCH_MESSAGE: &str = "Passwords do not match.";

/// Live check that the confirmation field repeats the password.
pub struct PasswordConfirmation<D> {
    dom: D,
    password_id: String,
    confirm_id: String,
}

impl<D: Dom> PasswordConfirmation<D> {
    pub fn attach(dom: D, password_id: &str, confirm_id: &str) -> Option<Self> {
        if !dom.exists(password_id) || !dom.exists(confirm_id) {
            return None;
        }
        Some(Self {
            dom,
            password_id: password_id.to_string(),
            confirm_id: confirm_id.to_string(),
        })
    }

    pub fn confirm_id(&self) -> &str {
        &self.confirm_id
    }

    /// Returns whether both fields match
    pub fn validate(&self) -> Result<bool> {
        let password = self.dom.value(&self.password_id).unwrap_or_default();
        let confirm = self.dom.value(&self.confirm_id).unwrap_or_default();
        let matches = password == confirm;

        let (message, add, remove) = if matches {
            ("", "is-valid", "is-invalid")
        } else {
            (MISMATCH_MESSAGE, "is-invalid", "is-valid")
        };
        self.dom.set_custom_validity(&self.confirm_id, message)?;
        self.dom.add_class(&self.confirm_id, add)?;
        self.dom.remove_class(&self.confirm_id, remove)?;
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryDom};

    fn page(password: &str, confirm: &str) -> MemoryDom {
        MemoryDom::new()
            .with(Element::input("password", password))
            .with(Element::input("confirm_password", confirm).with_class("form-control"))
    }

    #[test]
    fn test_mismatch_marks_invalid() {
        let dom = page("secret", "secre");
        let check = PasswordConfirmation::attach(dom.clone(), "password", "confirm_password").unwrap();

        assert!(!check.validate().unwrap());
        let field = dom.element("confirm_password").unwrap();
        assert_eq!(field.validity, MISMATCH_MESSAGE);
        assert!(field.has_class("is-invalid"));
        assert!(!field.has_class("is-valid"));
    }

    #[test]
    fn test_match_clears_validity() {
        let dom = page("secret", "secre");
        let check = PasswordConfirmation::attach(dom.clone(), "password", "confirm_password").unwrap();
        check.validate().unwrap();

        dom.set_value("confirm_password", "secret").unwrap();
        assert!(check.validate().unwrap());
        let field = dom.element("confirm_password").unwrap();
        assert_eq!(field.validity, "");
        assert_eq!(field.class_name, "form-control is-valid");
    }

    #[test]
    fn test_attach_requires_both_fields() {
        let dom = MemoryDom::new().with(Element::input("password", ""));
        assert!(PasswordConfirmation::attach(dom, "password", "confirm_password").is_none());
    }
}
