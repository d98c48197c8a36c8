use serde::Deserialize;

/// Language used for blocking alerts and confirmation prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// Alert shown when the match update request fails
    pub fn update_failed(self, detail: &str) -> String {
        match self {
            Locale::Es => format!("No se pudo actualizar el partido: {}", detail),
            Locale::En => format!("Could not update the match: {}", detail),
        }
    }

    /// Prompt shown before a match is deleted
    pub fn confirm_delete(self) -> &'static str {
        match self {
            Locale::Es => "Estas seguro?",
            Locale::En => "Are you sure?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_spanish() {
        assert_eq!(Locale::default(), Locale::Es);
        assert_eq!(Locale::default().confirm_delete(), "Estas seguro?");
    }

    #[test]
    fn test_update_failed_includes_detail() {
        let msg = Locale::En.update_failed("server responded with 500");
        assert_eq!(msg, "Could not update the match: server responded with 500");

        let msg = Locale::Es.update_failed("timeout");
        assert!(msg.starts_with("No se pudo actualizar"));
        assert!(msg.ends_with("timeout"));
    }

    #[test]
    fn test_locale_deserializes_lowercase() {
        let locale: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(locale, Locale::En);
        assert!(serde_json::from_str::<Locale>("\"fr\"").is_err());
    }
}
