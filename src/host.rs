//! Interfaces to the collaborators the engine drives but does not implement:
//! the embedded web renderer, its cookie jar, the background message poller,
//! the asset pack check and the UI chrome.

use crate::types::navigation::{HistorySnapshot, Verdict, ViewportReadout};
use crate::types::session::RealmId;

/// Embedded web-content renderer supplied by the host platform.
pub trait Renderer {
    fn load_address(&mut self, address: &str);
    fn reload(&mut self);
    fn stop_loading(&mut self);
    fn clear_history(&mut self);
    fn current_address(&self) -> Option<String>;
    fn scroll_to(&mut self, x: i32, y: i32);
    fn set_zoom_percent(&mut self, percent: u32);
    fn history_snapshot(&self) -> HistorySnapshot;
    /// Moves through history; negative values go back.
    fn go_back_or_forward(&mut self, steps: i32);
    fn viewport(&self) -> ViewportReadout;
}

/// Cookie jar shared by the renderer and the message poller.
pub trait CookieStore {
    fn cookies_for(&self, address: &str) -> Option<String>;
    fn set_cookie(&mut self, address: &str, cookie: &str);
    fn remove_session_cookies(&mut self);
    fn remove_all_cookies(&mut self);
}

/// Background task polling the active universe for new messages.
pub trait MessagePoller {
    fn set_realm(&mut self, realm: Option<RealmId>, auth_cookie: Option<String>);
    /// Polls again right away so the new-message display catches up.
    fn restart(&mut self);
}

/// Tells whether a local image pack has been installed.
pub trait AssetPackProbe {
    fn is_asset_pack_installed(&self) -> bool;
    /// Base address the pack is served under, passed to the game as a cookie.
    fn asset_base_address(&self) -> Option<String> {
        None
    }
}

/// Menus and bars whose contents depend on the active universe.
pub trait ChromeNotifier {
    fn refresh_menu(&mut self);
}

/// Renderer callbacks, implemented independently by each component that
/// reacts to navigation. All defaults are no-ops.
pub trait NavigationObserver {
    /// A page is about to be requested by a link or redirect.
    fn on_navigation_requested(&mut self, _address: &str, _renderer: &mut dyn Renderer) -> Verdict {
        Verdict::Proceed
    }

    /// The renderer started loading `address`.
    fn on_navigation_started(&mut self, _address: &str, _renderer: &mut dyn Renderer) -> Verdict {
        Verdict::Proceed
    }

    /// `address` has loaded and is being displayed.
    fn on_navigation_finished(&mut self, _address: &str, _renderer: &mut dyn Renderer) {}

    fn on_user_touch_down(&mut self) {}
}
