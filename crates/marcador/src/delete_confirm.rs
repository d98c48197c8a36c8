//! Delete confirmation for match cards.
//!
//! A click highlights the card first and asks only after the browser had a
//! chance to repaint, so the user sees which match is about to go. The
//! caller runs [`DeleteConfirm::resolve`] after [`REPAINT_DELAY_MS`].

use tracing::{info, warn};

use crate::error::Result;
use crate::locale::Locale;
use crate::types::MatchRecord;
use crate::view::{Dom, Window};

const HIGHLIGHT: &str = "text-bg-secondary";

/// Delay between highlighting and the confirm dialog
pub const REPAINT_DELAY_MS: u32 = 10;

/// A highlighted card waiting for the user's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub match_id: String,
    pub card_id: String,
    /// Id of the clicked delete button
    pub button_id: String,
    original_class: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Submitted,
    Cancelled,
    /// The button is not inside a form
    NoForm,
}

pub struct DeleteConfirm<D, W> {
    dom: D,
    window: W,
    locale: Locale,
}

impl<D: Dom, W: Window> DeleteConfirm<D, W> {
    pub fn new(dom: D, window: W, locale: Locale) -> Self {
        Self { dom, window, locale }
    }

    /// Highlight the card of `match_id`. `None` when the card is missing.
    pub fn highlight(&self, match_id: &str, button_id: &str) -> Result<Option<PendingDelete>> {
        let card_id = match match_id.trim().parse::<u64>() {
            Ok(id) => MatchRecord::card_id(id),
            Err(_) => format!("match-card-{}", match_id.trim()),
        };

        let Some(original_class) = self.dom.class_name(&card_id) else {
            warn!(match_id, "Match card not found for delete");
            return Ok(None);
        };

        self.dom.add_class(&card_id, HIGHLIGHT)?;
        Ok(Some(PendingDelete {
            match_id: match_id.to_string(),
            card_id,
            button_id: button_id.to_string(),
            original_class,
        }))
    }

    /// Ask for confirmation; submit the button's form or restore the card
    pub fn resolve(&self, pending: &PendingDelete) -> Result<DeleteOutcome> {
        if !self.window.confirm(self.locale.confirm_delete()) {
            self.restore(pending)?;
            return Ok(DeleteOutcome::Cancelled);
        }

        if self.dom.submit_enclosing_form(&pending.button_id)? {
            info!(match_id = %pending.match_id, "Delete submitted");
            Ok(DeleteOutcome::Submitted)
        } else {
            warn!(match_id = %pending.match_id, "Delete form not found");
            self.restore(pending)?;
            Ok(DeleteOutcome::NoForm)
        }
    }

    fn restore(&self, pending: &PendingDelete) -> Result<()> {
        self.dom
            .set_class_name(&pending.card_id, &pending.original_class)
    }
}
