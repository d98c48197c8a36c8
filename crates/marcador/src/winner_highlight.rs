use crate::error::Result;
use crate::types::Team;
use crate::view::Dom;

const HIGHLIGHT: &str = "text-bg-success";

/// Paints the card of the team picked as winner on the match form.
pub struct WinnerHighlight<D> {
    dom: D,
}

impl<D: Dom> WinnerHighlight<D> {
    /// `None` unless both radios and both team cards are present
    pub fn attach(dom: D) -> Option<Self> {
        let present = [Team::One, Team::Two]
            .iter()
            .all(|t| dom.exists(t.radio_id()) && dom.exists(t.card_id()));
        present.then_some(Self { dom })
    }

    pub fn update(&self) -> Result<Option<Team>> {
        for team in [Team::One, Team::Two] {
            self.dom.remove_class(team.card_id(), HIGHLIGHT)?;
        }

        let winner = [Team::One, Team::Two]
            .into_iter()
            .find(|t| self.dom.is_checked(t.radio_id()));
        if let Some(team) = winner {
            self.dom.add_class(team.card_id(), HIGHLIGHT)?;
        }
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryDom};

    fn page() -> MemoryDom {
        MemoryDom::new()
            .with(Element::radio("team1_wins", "winning_team", "1"))
            .with(Element::radio("team2_wins", "winning_team", "2"))
            .with(Element::new("div", "team1-card").with_class("card"))
            .with(Element::new("div", "team2-card").with_class("card"))
    }

    #[test]
    fn test_highlights_checked_team() {
        let dom = page();
        let highlight = WinnerHighlight::attach(dom.clone()).unwrap();

        dom.set_checked("team1_wins", true).unwrap();
        assert_eq!(highlight.update().unwrap(), Some(Team::One));
        assert!(dom.has_class("team1-card", HIGHLIGHT));
        assert!(!dom.has_class("team2-card", HIGHLIGHT));

        dom.set_checked("team2_wins", true).unwrap();
        assert_eq!(highlight.update().unwrap(), Some(Team::Two));
        assert!(!dom.has_class("team1-card", HIGHLIGHT));
        assert!(dom.has_class("team2-card", HIGHLIGHT));
        assert_eq!(dom.class_name("team2-card").as_deref(), Some("card text-bg-success"));
    }

    #[test]
    fn test_no_selection_clears_both() {
        let dom = page();
        dom.add_class("team1-card", HIGHLIGHT).unwrap();
        let highlight = WinnerHighlight::attach(dom.clone()).unwrap();
        assert_eq!(highlight.update().unwrap(), None);
        assert!(!dom.has_class("team1-card", HIGHLIGHT));
    }

    #[test]
    fn test_attach_requires_cards() {
        let dom = MemoryDom::new().with(Element::radio("team1_wins", "winning_team", "1"));
        assert!(WinnerHighlight::attach(dom).is_none());
    }
}
