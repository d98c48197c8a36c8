//! Label hints telling whether a typed name is a registered user, a known
//! player or a new one.

use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;

use crate::error::Result;
use crate::types::Slot;
use crate::view::Dom;

/// `json_script` element listing players with an account
pub const REGISTERED_ELEMENT_ID: &str = "registered-players";
/// `json_script` element listing players without an account
pub const EXISTING_ELEMENT_ID: &str = "existing-players";

/// Slots the user can type into; the first one is always the user
pub const HINTED_SLOTS: [Slot; 3] = [Slot::Team1Player2, Slot::Team2Player1, Slot::Team2Player2];

#[derive(Debug, Clone, Deserialize)]
pub struct KnownPlayer {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Registered,
    Existing,
    New,
}

impl PlayerKind {
    pub fn label(self) -> &'static str {
        match self {
            PlayerKind::Registered => "Registered User",
            PlayerKind::Existing => "Existing Player",
            PlayerKind::New => "New Player",
        }
    }
}

/// Names the server already knows about
#[derive(Debug, Clone, Default)]
pub struct KnownPlayers {
    registered: HashSet<String>,
    existing: HashSet<String>,
}

impl KnownPlayers {
    pub fn new<R, E>(registered: R, existing: E) -> Self
    where
        R: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        Self {
            registered: registered.into_iter().collect(),
            existing: existing.into_iter().collect(),
        }
    }

    /// Load both lists from the page. A missing or malformed list is empty.
    pub fn from_page<D: Dom>(dom: &D) -> Self {
        Self::new(
            read_names(dom, REGISTERED_ELEMENT_ID),
            read_names(dom, EXISTING_ELEMENT_ID),
        )
    }

    /// Exact match on the trimmed name
    pub fn classify(&self, name: &str) -> PlayerKind {
        let name = name.trim();
        if self.registered.contains(name) {
            PlayerKind::Registered
        } else if self.existing.contains(name) {
            PlayerKind::Existing
        } else {
            PlayerKind::New
        }
    }
}

fn read_names<D: Dom>(dom: &D, id: &str) -> Vec<String> {
    let Some(json) = dom.text(id) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<KnownPlayer>>(&json) {
        Ok(players) => players.into_iter().map(|p| p.name).collect(),
        Err(e) => {
            warn!(element = id, error = %e, "Could not read player list");
            Vec::new()
        }
    }
}

pub struct PlayerLabels<D> {
    dom: D,
    known: KnownPlayers,
}

impl<D: Dom> PlayerLabels<D> {
    pub fn new(dom: D, known: KnownPlayers) -> Self {
        Self { dom, known }
    }

    /// Refresh the label of one slot from its current value
    pub fn update(&self, slot: Slot) -> Result<PlayerKind> {
        let value = self.dom.value(slot.field_id()).unwrap_or_default();
        let kind = self.known.classify(&value);
        self.dom.set_label(slot.field_id(), kind.label())?;
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryDom};

    fn known() -> KnownPlayers {
        KnownPlayers::new(
            vec!["alice".to_string(), "bob".to_string()],
            vec!["carol".to_string()],
        )
    }

    #[test]
    fn test_classify() {
        let known = known();
        assert_eq!(known.classify("alice"), PlayerKind::Registered);
        assert_eq!(known.classify("  carol "), PlayerKind::Existing);
        assert_eq!(known.classify("zoe"), PlayerKind::New);
        // Names are matched exactly
        assert_eq!(known.classify("Alice"), PlayerKind::New);
    }

    #[test]
    fn test_from_page() {
        let dom = MemoryDom::new()
            .with(
                Element::new("script", REGISTERED_ELEMENT_ID)
                    .with_text(r#"[{"id": 1, "name": "alice"}]"#),
            )
            .with(
                Element::new("script", EXISTING_ELEMENT_ID)
                    .with_text(r#"[{"id": 2, "name": "carol"}, {"id": 3, "name": "dave"}]"#),
            );
        let known = KnownPlayers::from_page(&dom);
        assert_eq!(known.classify("alice"), PlayerKind::Registered);
        assert_eq!(known.classify("dave"), PlayerKind::Existing);
    }

    #[test]
    fn test_from_page_tolerates_bad_lists() {
        let dom = MemoryDom::new()
            .with(Element::new("script", REGISTERED_ELEMENT_ID).with_text("not json"));
        let known = KnownPlayers::from_page(&dom);
        assert_eq!(known.classify("alice"), PlayerKind::New);
    }

    #[test]
    fn test_update_sets_label() {
        let dom = MemoryDom::new()
            .with(Element::input("team2_player1", "carol"))
            .with_label("team2_player1", "Player");
        let labels = PlayerLabels::new(dom.clone(), known());

        assert_eq!(labels.update(Slot::Team2Player1).unwrap(), PlayerKind::Existing);
        assert_eq!(dom.label("team2_player1").as_deref(), Some("Existing Player"));

        dom.set_value("team2_player1", "newcomer").unwrap();
        labels.update(Slot::Team2Player1).unwrap();
        assert_eq!(dom.label("team2_player1").as_deref(), Some("New Player"));
    }
}
