//! "My matches" / "All matches" tabs, each with its own paginator.

use tracing::{debug, info};

use crate::error::Result;
use crate::view::{Dom, Location, Window};

/// A tab, the pane it shows and the paginator belonging to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabIds {
    pub tab: &'static str,
    pub pane: &'static str,
    pub pagination: &'static str,
}

pub const USER_TAB: TabIds = TabIds {
    tab: "user-matches-tab",
    pane: "user-matches",
    pagination: "user-pagination",
};

pub const ALL_TAB: TabIds = TabIds {
    tab: "all-matches-tab",
    pane: "all-matches",
    pagination: "all-pagination",
};

/// URL that opens `tab_href` (e.g. `#all-matches`) on its first page
pub fn page_one_url(location: &Location, tab_href: &str) -> String {
    format!("{}{}?page=1{}", location.origin, location.pathname, tab_href)
}

pub struct TabPagination<D, W> {
    dom: D,
    window: W,
}

impl<D: Dom, W: Window> TabPagination<D, W> {
    /// `None` unless both panes and both paginators are present
    pub fn attach(dom: D, window: W) -> Option<Self> {
        let present = [USER_TAB, ALL_TAB]
            .iter()
            .all(|t| dom.exists(t.pane) && dom.exists(t.pagination));
        present.then_some(Self { dom, window })
    }

    /// Page-load setup: honour `#all-matches`, then sync the paginators
    pub fn init(&self) -> Result<()> {
        if self.window.location().hash == format!("#{}", ALL_TAB.pane) {
            debug!("Hash selects all matches tab");
            self.activate(ALL_TAB, USER_TAB)?;
        }
        self.show_pagination_for_active_tab()?;
        Ok(())
    }

    /// Show the paginator of the active pane and hide the other one
    pub fn show_pagination_for_active_tab(&self) -> Result<Option<TabIds>> {
        let active = [USER_TAB, ALL_TAB]
            .into_iter()
            .find(|t| self.dom.has_class(t.pane, "active"));

        if let Some(active) = active {
            for tab in [USER_TAB, ALL_TAB] {
                self.dom.set_visible(tab.pagination, tab == active)?;
            }
        }
        Ok(active)
    }

    /// A tab was shown; reload its list from page one
    pub fn on_tab_shown(&self, tab_href: &str) -> Result<()> {
        self.show_pagination_for_active_tab()?;
        let url = page_one_url(&self.window.location(), tab_href);
        info!(url = %url, "Tab changed, resetting to page 1");
        self.window.navigate(&url);
        Ok(())
    }

    /// Same class changes Bootstrap's `Tab.show()` makes
    fn activate(&self, show: TabIds, hide: TabIds) -> Result<()> {
        if self.dom.exists(hide.tab) {
            self.dom.remove_class(hide.tab, "active")?;
        }
        self.dom.remove_class(hide.pane, "active")?;
        self.dom.remove_class(hide.pane, "show")?;

        if self.dom.exists(show.tab) {
            self.dom.add_class(show.tab, "active")?;
        }
        self.dom.add_class(show.pane, "active")?;
        self.dom.add_class(show.pane, "show")?;
        Ok(())
    }
}
