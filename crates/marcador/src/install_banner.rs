//! "Add to home screen" banner for iOS Safari, which has no install prompt.

use tracing::debug;

use crate::error::Result;
use crate::view::{Dom, Window};

pub const BANNER_ID: &str = "ios-install-banner";
pub const DISMISS_ID: &str = "ios-install-dismiss";
pub const DISMISSED_KEY: &str = "ios-install-dismissed";

pub fn is_ios(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    ["iphone", "ipad", "ipod"].iter().any(|d| ua.contains(d))
}

/// Safari proper: `safari` appears with no `chrome` or `android` before it.
/// Chrome and Android browsers also advertise Safari.
pub fn is_safari(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    match ua.find("safari") {
        Some(at) => {
            let before = &ua[..at];
            !before.contains("chrome") && !before.contains("android")
        }
        None => false,
    }
}

pub struct InstallBanner<D, W> {
    dom: D,
    window: W,
}

impl<D: Dom, W: Window> InstallBanner<D, W> {
    pub fn new(dom: D, window: W) -> Self {
        Self { dom, window }
    }

    pub fn should_show(&self) -> bool {
        let ua = self.window.user_agent();
        is_ios(&ua)
            && is_safari(&ua)
            && !self.window.is_standalone()
            && self.window.storage_item(DISMISSED_KEY).is_none()
    }

    /// Reveal the banner when it applies. Returns whether it is shown.
    pub fn init(&self) -> Result<bool> {
        if !self.should_show() || !self.dom.exists(BANNER_ID) {
            return Ok(false);
        }
        debug!("Showing iOS install banner");
        self.dom.remove_class(BANNER_ID, "d-none")?;
        Ok(true)
    }

    /// Hide the banner for good on this device
    pub fn dismiss(&self) -> Result<()> {
        self.window.set_storage_item(DISMISSED_KEY, "1");
        self.dom.add_class(BANNER_ID, "d-none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Element, MemoryDom, MemoryWindow};

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";
    const IPHONE_CHROME: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) CriOS/123.0 Mobile/15E148 Safari/604.1";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/123.0 Mobile Safari/537.36";

    fn page() -> MemoryDom {
        MemoryDom::new().with(Element::new("div", BANNER_ID).with_class("alert d-none"))
    }

    #[test]
    fn test_detection() {
        assert!(is_ios(IPHONE_SAFARI));
        assert!(is_safari(IPHONE_SAFARI));
        assert!(!is_ios(ANDROID_CHROME));
        assert!(!is_safari(ANDROID_CHROME));
        assert!(!is_safari("Mozilla/5.0 Firefox/124.0"));
    }

    #[test]
    fn test_crios_counts_as_safari() {
        // Chrome on iOS says CriOS, not Chrome
        assert!(is_safari(IPHONE_CHROME));
    }

    #[test]
    fn test_banner_shown_on_ios_safari() {
        let dom = page();
        let window = MemoryWindow::new().with_user_agent(IPHONE_SAFARI);
        let banner = InstallBanner::new(dom.clone(), window);
        assert!(banner.init().unwrap());
        assert_eq!(dom.class_name(BANNER_ID).as_deref(), Some("alert"));
    }

    #[test]
    fn test_banner_hidden_when_standalone_or_dismissed() {
        let dom = page();
        let window = MemoryWindow::new()
            .with_user_agent(IPHONE_SAFARI)
            .with_standalone(true);
        assert!(!InstallBanner::new(dom.clone(), window).init().unwrap());

        let window = MemoryWindow::new().with_user_agent(IPHONE_SAFARI);
        window.set_storage_item(DISMISSED_KEY, "1");
        assert!(!InstallBanner::new(dom.clone(), window).init().unwrap());
        assert!(dom.has_class(BANNER_ID, "d-none"));
    }

    #[test]
    fn test_dismiss_persists() {
        let dom = page();
        let window = MemoryWindow::new().with_user_agent(IPHONE_SAFARI);
        let banner = InstallBanner::new(dom.clone(), window.clone());
        banner.init().unwrap();
        banner.dismiss().unwrap();

        assert!(dom.has_class(BANNER_ID, "d-none"));
        assert_eq!(window.storage_item(DISMISSED_KEY).as_deref(), Some("1"));
        assert!(!banner.should_show());
    }
}
