//! Binds each controller to the events of the page it finds itself on.
//!
//! Every mount is independent: a page without the markup a controller
//! needs simply skips it, and a failing mount is logged without stopping
//! the others.

use std::rc::Rc;

use anyhow::{Context, Result};
use gloo_timers::callback::Timeout;
use marcador::delete_confirm::{DeleteConfirm, REPAINT_DELAY_MS};
use marcador::install_banner::{InstallBanner, DISMISS_ID};
use marcador::match_form::CANCEL_BUTTON_ID;
use marcador::password::PasswordConfirmation;
use marcador::player_labels::{KnownPlayers, PlayerLabels, HINTED_SLOTS};
use marcador::players_remaining::{PlayersRemaining, RemainingIds};
use marcador::profile::{ProfileEditor, ProfileIds};
use marcador::row_link::{RowLinks, INTERACTIVE_SELECTOR, ROW_SELECTOR};
use marcador::tabs::TabPagination;
use marcador::winner_highlight::WinnerHighlight;
use marcador::{
    Config, EditOutcome, Error, HttpClient, MatchFormController, Submission, Team, Window,
};
use tracing::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement};

use crate::dom::WebDom;
use crate::listen::listen;
use crate::window::WebWindow;

type Mount = fn(&WebDom, &WebWindow, &Config) -> Result<()>;

const MOUNTS: &[(&str, Mount)] = &[
    ("match_form", match_form),
    ("players_remaining", players_remaining),
    ("player_labels", player_labels),
    ("winner_highlight", winner_highlight),
    ("delete_confirm", delete_confirm),
    ("tabs", tabs),
    ("password", password),
    ("profile", profile),
    ("row_links", row_links),
    ("install_banner", install_banner),
];

pub fn mount_all(dom: &WebDom, window: &WebWindow) {
    let config = Config::from_page(dom);
    for (name, mount) in MOUNTS {
        if let Err(e) = mount(dom, window, &config) {
            error!(controller = name, error = %e, "Failed to mount controller");
        }
    }
    info!(form_id = %config.form_id, "Controllers mounted");
}

fn client(window: &WebWindow, config: &Config) -> HttpClient {
    HttpClient::new(&window.location().origin, &config.csrf_header)
}

fn match_form(dom: &WebDom, window: &WebWindow, config: &Config) -> Result<()> {
    let controller = match MatchFormController::attach(dom.clone(), window.clone(), config.clone()) {
        Ok(controller) => Rc::new(controller),
        Err(Error::MissingElement(_)) => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    let api = Rc::new(client(window, config));

    for button in dom.query_all("[id^='edit-button-']") {
        let match_id = button.get_attribute("data-match-id").unwrap_or_default();
        let controller = controller.clone();
        listen(&button, "click", move |event| {
            event.prevent_default();
            match controller.begin_edit(&match_id) {
                Ok(EditOutcome::Populated { cancel_created: true }) => {
                    if let Err(e) = wire_cancel(&controller) {
                        warn!(error = %e, "Cancel button not wired");
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(match_id = %match_id, error = %e, "Could not start edit"),
            }
        })?;
    }

    let form = dom
        .element(&config.form_id)
        .context("match form disappeared")?;
    listen(&form, "submit", move |event| {
        if let Submission::Update { match_id } = controller.submission() {
            event.prevent_default();
            debug!(match_id, "Intercepted match form submit");
            let controller = controller.clone();
            let api = api.clone();
            spawn_local(async move {
                // Failures were already shown to the user
                if let Err(e) = controller.submit(api.as_ref()).await {
                    debug!(error = %e, "Match update not applied");
                }
            });
        }
    })?;
    Ok(())
}

fn wire_cancel(controller: &Rc<MatchFormController<WebDom, WebWindow>>) -> Result<()> {
    let button = controller
        .dom()
        .element(CANCEL_BUTTON_ID)
        .context("cancel button missing")?;
    let controller = controller.clone();
    listen(&button, "click", move |_| controller.cancel_edit())?;
    Ok(())
}

fn players_remaining(dom: &WebDom, _window: &WebWindow, _config: &Config) -> Result<()> {
    let Some(counter) = PlayersRemaining::attach(dom.clone(), RemainingIds::default()) else {
        return Ok(());
    };
    counter.update()?;
    if !counter.has_inputs() {
        return Ok(());
    }

    let counter = Rc::new(counter);
    let ids = counter.ids().clone();
    let triggers = [
        (ids.num_players, "input"),
        (ids.players, "change"),
        (ids.new_players, "input"),
    ];
    for (id, event) in triggers {
        let Some(element) = dom.element(&id) else {
            continue;
        };
        let counter = counter.clone();
        listen(&element, event, move |_| {
            if let Err(e) = counter.update() {
                warn!(error = %e, "Players remaining not updated");
            }
        })?;
    }
    Ok(())
}

fn player_labels(dom: &WebDom, _window: &WebWindow, _config: &Config) -> Result<()> {
    let labels = Rc::new(PlayerLabels::new(dom.clone(), KnownPlayers::from_page(dom)));
    for slot in HINTED_SLOTS {
        let Some(input) = dom.element(slot.field_id()) else {
            continue;
        };
        let labels = labels.clone();
        listen(&input, "input", move |_| {
            if let Err(e) = labels.update(slot) {
                warn!(slot = slot.field_id(), error = %e, "Player label not updated");
            }
        })?;
    }
    Ok(())
}

fn winner_highlight(dom: &WebDom, _window: &WebWindow, _config: &Config) -> Result<()> {
    let Some(highlight) = WinnerHighlight::attach(dom.clone()) else {
        return Ok(());
    };
    highlight.update()?;

    let highlight = Rc::new(highlight);
    for team in [Team::One, Team::Two] {
        let Some(radio) = dom.element(team.radio_id()) else {
            continue;
        };
        let highlight = highlight.clone();
        listen(&radio, "change", move |_| {
            if let Err(e) = highlight.update() {
                warn!(error = %e, "Winner highlight not updated");
            }
        })?;
    }
    Ok(())
}

fn delete_confirm(dom: &WebDom, window: &WebWindow, config: &Config) -> Result<()> {
    let confirm = Rc::new(DeleteConfirm::new(dom.clone(), window.clone(), config.locale));

    for button in dom.query_all(".delete-button") {
        let match_id = button.get_attribute("data-match-id").unwrap_or_default();
        if button.id().is_empty() {
            button.set_id(&format!("delete-button-{}", match_id));
        }
        let button_id = button.id();
        let confirm = confirm.clone();
        listen(&button, "click", move |event| {
            event.prevent_default();
            match confirm.highlight(&match_id, &button_id) {
                Ok(Some(pending)) => {
                    // Let the highlight paint before the blocking dialog
                    let confirm = confirm.clone();
                    Timeout::new(REPAINT_DELAY_MS, move || {
                        if let Err(e) = confirm.resolve(&pending) {
                            warn!(error = %e, "Delete not resolved");
                        }
                    })
                    .forget();
                }
                Ok(None) => {}
                Err(e) => warn!(match_id = %match_id, error = %e, "Could not highlight match"),
            }
        })?;
    }
    Ok(())
}

fn tabs(dom: &WebDom, window: &WebWindow, _config: &Config) -> Result<()> {
    let Some(tabs) = TabPagination::attach(dom.clone(), window.clone()) else {
        return Ok(());
    };
    tabs.init()?;

    let tabs = Rc::new(tabs);
    for trigger in dom.query_all("a[data-bs-toggle='tab']") {
        let href = trigger.get_attribute("href").unwrap_or_default();
        let tabs = tabs.clone();
        listen(&trigger, "shown.bs.tab", move |_| {
            if let Err(e) = tabs.on_tab_shown(&href) {
                warn!(href = %href, error = %e, "Tab change not handled");
            }
        })?;
    }
    Ok(())
}

fn password(dom: &WebDom, _window: &WebWindow, _config: &Config) -> Result<()> {
    let Some(check) = PasswordConfirmation::attach(dom.clone(), "password", "confirm_password")
    else {
        return Ok(());
    };
    let confirm = dom
        .element(check.confirm_id())
        .context("confirm field disappeared")?;
    listen(&confirm, "input", move |_| {
        if let Err(e) = check.validate() {
            warn!(error = %e, "Password confirmation not checked");
        }
    })?;
    Ok(())
}

fn profile(dom: &WebDom, window: &WebWindow, config: &Config) -> Result<()> {
    let Some(editor) =
        ProfileEditor::attach(dom.clone(), window.clone(), ProfileIds::default(), config.clone())
    else {
        return Ok(());
    };
    let editor = Rc::new(editor);
    let api = Rc::new(client(window, config));
    let ids = editor.ids().clone();

    let email = dom.element(&ids.email).context("email field disappeared")?;
    let on_input = editor.clone();
    listen(&email, "input", move |_| {
        if let Err(e) = on_input.on_input() {
            warn!(error = %e, "Profile buttons not updated");
        }
    })?;

    let cancel = dom.element(&ids.cancel).context("cancel button disappeared")?;
    let on_cancel = editor.clone();
    listen(&cancel, "click", move |event| {
        event.prevent_default();
        if let Err(e) = on_cancel.reset() {
            warn!(error = %e, "Profile not reset");
        }
    })?;

    let form = dom.element(&ids.form).context("profile form disappeared")?;
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let editor = editor.clone();
        let api = api.clone();
        spawn_local(async move {
            match editor.submit(api.as_ref()).await {
                Ok(outcome) => debug!(?outcome, "Profile submit finished"),
                Err(e) => error!(error = %e, "Profile submit failed"),
            }
        });
    })?;
    Ok(())
}

fn row_links(dom: &WebDom, window: &WebWindow, _config: &Config) -> Result<()> {
    let rows = Rc::new(RowLinks::new(window.clone()));
    for row in dom.query_all(ROW_SELECTOR) {
        if let Some(row) = row.dyn_ref::<HtmlElement>() {
            if let Err(e) = row.style().set_property("cursor", "pointer") {
                warn!(error = ?e, "Row cursor not set");
            }
        }
        let href = row.get_attribute("data-href");
        let rows = rows.clone();
        listen(&row, "click", move |event| {
            let inside_interactive = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
                .is_some();
            rows.follow(href.as_deref(), inside_interactive);
        })?;
    }
    Ok(())
}

fn install_banner(dom: &WebDom, window: &WebWindow, _config: &Config) -> Result<()> {
    let banner = InstallBanner::new(dom.clone(), window.clone());
    if !banner.init()? {
        return Ok(());
    }
    let Some(dismiss) = dom.element(DISMISS_ID) else {
        return Ok(());
    };
    listen(&dismiss, "click", move |_| {
        if let Err(e) = banner.dismiss() {
            warn!(error = %e, "Install banner not dismissed");
        }
    })?;
    Ok(())
}
