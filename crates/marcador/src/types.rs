use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::view::Dom;

/// One of the four player fields of a match form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Team1Player1,
    Team1Player2,
    Team2Player1,
    Team2Player2,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::Team1Player1,
        Slot::Team1Player2,
        Slot::Team2Player1,
        Slot::Team2Player2,
    ];

    /// Id and name of the form field
    pub fn field_id(self) -> &'static str {
        match self {
            Slot::Team1Player1 => "team1_player1",
            Slot::Team1Player2 => "team1_player2",
            Slot::Team2Player1 => "team2_player1",
            Slot::Team2Player2 => "team2_player2",
        }
    }

    /// Key of the `data-*` attribute on a match card
    pub fn data_key(self) -> &'static str {
        match self {
            Slot::Team1Player1 => "team1-player1",
            Slot::Team1Player2 => "team1-player2",
            Slot::Team2Player1 => "team2-player1",
            Slot::Team2Player2 => "team2-player2",
        }
    }
}

/// Winning side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    One,
    Two,
}

impl Team {
    /// Anything other than `"1"` means team two; cards only carry 1 or 2.
    pub fn from_indicator(value: &str) -> Self {
        if value.trim() == "1" {
            Team::One
        } else {
            Team::Two
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }

    /// Id of the winner radio for this team
    pub fn radio_id(self) -> &'static str {
        match self {
            Team::One => "team1_wins",
            Team::Two => "team2_wins",
        }
    }

    /// Id of the card showing this team on the match form
    pub fn card_id(self) -> &'static str {
        match self {
            Team::One => "team1-card",
            Team::Two => "team2-card",
        }
    }
}

/// A match as embedded in the `data-*` attributes of its card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub players: [String; 4],
    pub winning_team: Team,
    pub date_played: String,
}

impl MatchRecord {
    /// Id of the card element for a match
    pub fn card_id(match_id: u64) -> String {
        format!("match-card-{}", match_id)
    }

    /// Read a record from a card. Returns `None` when the card is absent;
    /// absent attributes read as empty strings.
    pub fn from_card<D: Dom>(dom: &D, card_id: &str) -> Option<Self> {
        if !dom.exists(card_id) {
            return None;
        }

        let attr = |key: &str| dom.data_attribute(card_id, key).unwrap_or_default();
        let players = Slot::ALL.map(|slot| attr(slot.data_key()));

        Some(Self {
            players,
            winning_team: Team::from_indicator(&attr("winning-team")),
            date_played: attr("date-played"),
        })
    }

    pub fn player(&self, slot: Slot) -> &str {
        let index = Slot::ALL
            .iter()
            .position(|s| *s == slot)
            .unwrap_or_default();
        &self.players[index]
    }
}

/// JSON body of a match update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPayload {
    pub team1_player1: String,
    pub team1_player2: String,
    pub team2_player1: String,
    pub team2_player2: String,
    pub winning_team: u8,
    pub date_played: String,
}

impl MatchPayload {
    /// Build the payload from serialized form fields. Later fields with the
    /// same name win, as with `Object.fromEntries(new FormData(form))`.
    pub fn from_fields(fields: &[(String, String)]) -> Result<Self> {
        let map: HashMap<&str, &str> = fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        let get = |name: &str| -> Result<String> {
            map.get(name)
                .map(|v| v.to_string())
                .ok_or_else(|| Error::MissingField(name.to_string()))
        };

        let winning_team = get("winning_team")?;
        let winning_team = match winning_team.trim() {
            "1" => 1,
            "2" => 2,
            _ => return Err(Error::MissingField("winning_team".to_string())),
        };

        Ok(Self {
            team1_player1: get(Slot::Team1Player1.field_id())?,
            team1_player2: get(Slot::Team1Player2.field_id())?,
            team2_player1: get(Slot::Team2Player1.field_id())?,
            team2_player2: get(Slot::Team2Player2.field_id())?,
            winning_team,
            date_played: get("date_played")?,
        })
    }
}

/// Compare a player name against the logged-in user
pub fn same_player(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryDom};

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_slot_ids() {
        let ids: Vec<_> = Slot::ALL.iter().map(|s| s.field_id()).collect();
        assert_eq!(
            ids,
            vec!["team1_player1", "team1_player2", "team2_player1", "team2_player2"]
        );
        assert_eq!(Slot::Team2Player1.data_key(), "team2-player1");
    }

    #[test]
    fn test_team_from_indicator() {
        assert_eq!(Team::from_indicator("1"), Team::One);
        assert_eq!(Team::from_indicator(" 1 "), Team::One);
        assert_eq!(Team::from_indicator("2"), Team::Two);
        assert_eq!(Team::from_indicator(""), Team::Two);
        assert_eq!(Team::Two.radio_id(), "team2_wins");
    }

    #[test]
    fn test_record_from_card() {
        let dom = MemoryDom::new().with(
            Element::new("div", "match-card-3")
                .with_data("team1-player1", "alice")
                .with_data("team1-player2", "bob")
                .with_data("team2-player1", "carol")
                .with_data("team2-player2", "dave")
                .with_data("winning-team", "1")
                .with_data("date-played", "2025-03-01"),
        );

        let record = MatchRecord::from_card(&dom, &MatchRecord::card_id(3)).unwrap();
        assert_eq!(record.players, ["alice", "bob", "carol", "dave"]);
        assert_eq!(record.player(Slot::Team2Player1), "carol");
        assert_eq!(record.winning_team, Team::One);
        assert_eq!(record.date_played, "2025-03-01");
    }

    #[test]
    fn test_record_from_missing_card() {
        let dom = MemoryDom::new();
        assert!(MatchRecord::from_card(&dom, "match-card-1").is_none());
    }

    #[test]
    fn test_record_missing_attributes_are_empty() {
        let dom = MemoryDom::new().with(Element::new("div", "match-card-9"));
        let record = MatchRecord::from_card(&dom, "match-card-9").unwrap();
        assert!(record.players.iter().all(|p| p.is_empty()));
        assert_eq!(record.winning_team, Team::Two);
    }

    #[test]
    fn test_payload_from_fields() {
        let payload = MatchPayload::from_fields(&fields(&[
            ("csrfmiddlewaretoken", "tok"),
            ("team1_player1", "alice"),
            ("team1_player2", "bob"),
            ("team2_player1", "carol"),
            ("team2_player2", "dave"),
            ("winning_team", "2"),
            ("date_played", "2025-03-01"),
            ("match_id", "42"),
        ]))
        .unwrap();

        assert_eq!(payload.team1_player1, "alice");
        assert_eq!(payload.team2_player2, "dave");
        assert_eq!(payload.winning_team, 2);
        assert_eq!(payload.date_played, "2025-03-01");
    }

    #[test]
    fn test_payload_last_field_wins() {
        let payload = MatchPayload::from_fields(&fields(&[
            ("team1_player1", "stale"),
            ("team1_player2", "bob"),
            ("team2_player1", "carol"),
            ("team2_player2", "dave"),
            ("winning_team", "1"),
            ("date_played", "2025-03-01"),
            ("team1_player1", "alice"),
        ]))
        .unwrap();
        assert_eq!(payload.team1_player1, "alice");
    }

    #[test]
    fn test_payload_missing_field() {
        let result = MatchPayload::from_fields(&fields(&[("team1_player1", "alice")]));
        assert!(matches!(result, Err(Error::MissingField(_))));
    }

    #[test]
    fn test_payload_serialization() {
        let payload = MatchPayload {
            team1_player1: "alice".to_string(),
            team1_player2: "bob".to_string(),
            team2_player1: "carol".to_string(),
            team2_player2: "dave".to_string(),
            winning_team: 1,
            date_played: "2025-03-01".to_string(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"winning_team\":1"));
        assert!(json.contains("\"date_played\":\"2025-03-01\""));
    }

    #[test]
    fn test_same_player() {
        assert!(same_player("Alice", " alice "));
        assert!(!same_player("alice", "alicia"));
    }
}
