//! Marcador - client-side controllers for the padel match tracker.
//!
//! The server renders every page; the controllers in this crate bind to the
//! rendered markup and keep form fields, labels and visible state in sync.
//! All DOM access goes through the [`Dom`] and [`Window`] traits so the same
//! logic runs against the browser (see the `marcador-web` crate) and against
//! `MemoryDom`/`MemoryWindow` in native tests. The in-memory page is only
//! compiled for this crate's tests or with the `testing` feature.

pub mod api;
pub mod config;
pub mod csrf;
pub mod delete_confirm;
pub mod error;
pub mod install_banner;
pub mod locale;
pub mod match_form;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod password;
pub mod player_labels;
pub mod players_remaining;
pub mod profile;
pub mod row_link;
pub mod tabs;
pub mod types;
pub mod view;
pub mod winner_highlight;

pub use api::{HttpClient, JsonApi, Method};
pub use config::Config;
pub use error::{Error, Result};
pub use locale::Locale;
pub use match_form::{EditOutcome, MatchFormController, Submission};
#[cfg(any(test, feature = "testing"))]
pub use memory::{Element, MemoryDom, MemoryWindow};
pub use types::{MatchPayload, MatchRecord, Slot, Team};
pub use view::{Dom, Location, Window};
