//! Add/edit match form.
//!
//! The match list renders one card per match with the match data in `data-*`
//! attributes. Clicking a card's edit button copies that data into the
//! add-match form and switches the form into edit mode. Slots holding the
//! logged-in user stay locked, with a hidden mirror field so the locked value
//! is still submitted.
//!
//! Submitting a fresh form is a plain POST handled by the server. Once a
//! match id is present, the submit is intercepted and sent as a JSON `PUT` to
//! the match resource instead.

use std::cell::Cell;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::{JsonApi, Method};
use crate::config::Config;
use crate::csrf;
use crate::error::{Error, Result};
use crate::types::{same_player, MatchPayload, MatchRecord, Slot, Team};
use crate::view::{Dom, Window};

/// Label of a slot holding the logged-in user
pub const LABEL_SELF: &str = "You";
/// Label of any other slot
pub const LABEL_PLAYER: &str = "Player";
pub const SUBMIT_EDIT_TEXT: &str = "Edit Match";
pub const CANCEL_TEXT: &str = "Cancel Edit";
pub const CANCEL_BUTTON_ID: &str = "cancel-edit-button";

const MATCH_ID_FIELD: &str = "match_id";
const DATE_FIELD: &str = "date_played";

/// Result of an edit trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The form now holds the match. `cancel_created` is true the first
    /// time, when the caller has to wire the new cancel button.
    Populated { cancel_created: bool },
    /// No card for that id; nothing was touched
    CardMissing,
    /// A form element the edit writes to is absent; nothing was touched
    TargetMissing(String),
}

/// How a submit event should be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Let the browser post the form
    Native,
    /// Intercept and send a `PUT` for this match
    Update { match_id: u64 },
}

/// Controller for one add/edit match form
pub struct MatchFormController<D, W> {
    dom: D,
    window: W,
    config: Config,
    /// Name in the first slot when the page loaded
    current_user: String,
    cancel_created: Cell<bool>,
}

impl<D: Dom, W: Window> MatchFormController<D, W> {
    /// Bind to the form named in `config`. The logged-in user is whatever
    /// the server pre-filled into the first slot.
    pub fn attach(dom: D, window: W, config: Config) -> Result<Self> {
        if !dom.exists(&config.form_id) {
            return Err(Error::MissingElement(config.form_id.clone()));
        }

        let current_user = dom
            .value(Slot::Team1Player1.field_id())
            .unwrap_or_default()
            .trim()
            .to_string();
        debug!(form = %config.form_id, user = %current_user, "Match form attached");

        Ok(Self {
            dom,
            window,
            config,
            current_user,
            cancel_created: Cell::new(false),
        })
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Populate the form from the card of `match_id` and switch to edit mode
    pub fn begin_edit(&self, match_id: &str) -> Result<EditOutcome> {
        let match_id = parse_match_id(match_id)?;
        let card_id = MatchRecord::card_id(match_id);

        let Some(record) = MatchRecord::from_card(&self.dom, &card_id) else {
            warn!(match_id, "Match card not found, ignoring edit");
            return Ok(EditOutcome::CardMissing);
        };

        if let Some(missing) = self.missing_target() {
            warn!(match_id, missing = %missing, "Form element not found, ignoring edit");
            return Ok(EditOutcome::TargetMissing(missing));
        }

        let form_id = self.config.form_id.as_str();
        for slot in Slot::ALL {
            self.fill_slot(form_id, slot, record.player(slot))?;
        }

        self.set_winner(record.winning_team)?;
        self.dom.set_value(DATE_FIELD, &record.date_played)?;
        self.dom.set_submit_text(form_id, SUBMIT_EDIT_TEXT)?;
        self.dom
            .ensure_hidden_input(form_id, MATCH_ID_FIELD, MATCH_ID_FIELD, &match_id.to_string())?;

        let cancel_created = !self.cancel_created.get();
        if cancel_created {
            self.dom
                .insert_cancel_button(form_id, CANCEL_BUTTON_ID, CANCEL_TEXT)?;
            self.cancel_created.set(true);
        }

        self.dom.scroll_into_view(form_id);
        info!(match_id, "Form pre-filled for editing");

        Ok(EditOutcome::Populated { cancel_created })
    }

    /// First element `begin_edit` would write to that is not on the page
    fn missing_target(&self) -> Option<String> {
        let form_id = self.config.form_id.as_str();
        if !self.dom.exists(form_id) {
            return Some(form_id.to_string());
        }
        for slot in Slot::ALL {
            let id = slot.field_id();
            if !self.dom.exists(id) {
                return Some(id.to_string());
            }
            if !self.dom.has_label(id) {
                return Some(format!("label[for={}]", id));
            }
        }
        let fields = [Team::One.radio_id(), Team::Two.radio_id(), DATE_FIELD];
        if let Some(id) = fields.into_iter().find(|id| !self.dom.exists(id)) {
            return Some(id.to_string());
        }
        if !self.dom.has_submit_button(form_id) {
            return Some(format!("{} button[type=submit]", form_id));
        }
        None
    }

    fn fill_slot(&self, form_id: &str, slot: Slot, value: &str) -> Result<()> {
        let id = slot.field_id();
        let mirror_id = format!("hidden-{}", id);
        self.dom.set_value(id, value)?;

        if !self.current_user.is_empty() && same_player(value, &self.current_user) {
            self.dom.set_editable(id, false)?;
            self.dom.set_label(id, LABEL_SELF)?;
            // Disabled controls are not submitted
            self.dom.ensure_hidden_input(form_id, &mirror_id, id, value)?;
        } else {
            self.dom.set_editable(id, true)?;
            self.dom.set_label(id, LABEL_PLAYER)?;
            self.dom.remove(&mirror_id);
        }
        Ok(())
    }

    fn set_winner(&self, winner: Team) -> Result<()> {
        for team in [Team::One, Team::Two] {
            self.dom.set_checked(team.radio_id(), team == winner)?;
        }
        Ok(())
    }

    /// Drop the in-progress edit by reloading the page
    pub fn cancel_edit(&self) {
        info!("Edit cancelled, reloading");
        self.window.reload();
    }

    /// Decide how the next submit is handled, based on the hidden match id
    pub fn submission(&self) -> Submission {
        let raw = self.dom.value(MATCH_ID_FIELD).unwrap_or_default();
        if raw.trim().is_empty() {
            return Submission::Native;
        }

        match parse_match_id(&raw) {
            Ok(match_id) => Submission::Update { match_id },
            Err(e) => {
                warn!(error = %e, "Unusable match id, posting form as-is");
                Submission::Native
            }
        }
    }

    /// Send the edited match as a JSON `PUT`. Reloads on success; on failure
    /// shows an alert, leaves the form populated and returns the error.
    pub async fn submit<A: JsonApi>(&self, api: &A) -> Result<()> {
        let Submission::Update { match_id } = self.submission() else {
            return Ok(());
        };

        let result = self.send_update(api, match_id).await;
        match &result {
            Ok(()) => {
                info!(match_id, "Match updated");
                self.window.reload();
            }
            Err(e) => {
                warn!(match_id, error = %e, "Match update failed");
                self.window
                    .alert(&self.config.locale.update_failed(&e.to_string()));
            }
        }
        result
    }

    async fn send_update<A: JsonApi>(&self, api: &A, match_id: u64) -> Result<()> {
        let fields = self.dom.form_fields(&self.config.form_id)?;
        let payload = MatchPayload::from_fields(&fields)?;
        let token = csrf::find_token(&fields, &self.window.cookie(), &self.config);
        if token.is_none() {
            warn!("No CSRF token found for match update");
        }

        let body: Value = serde_json::to_value(&payload)?;
        api.send_json(
            Method::Put,
            &self.config.match_path(match_id),
            &body,
            token.as_deref(),
        )
        .await?;
        Ok(())
    }
}

fn parse_match_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidMatchId(raw.to_string()))
}
