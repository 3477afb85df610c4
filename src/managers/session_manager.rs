//! Session State Machine.
//!
//! Owns the authentication state and the active universe. It reacts to
//! navigation callbacks and emits [`SessionEffect`]s; the owner of the
//! renderer executes them, so loads issued here pass through the same page
//! state bookkeeping as any other load.

use tracing::{debug, info, trace, warn};

use crate::host::{AssetPackProbe, NavigationObserver, Renderer};
use crate::services::navigation_policy::{
    is_authenticated_landing, is_bare_frame, is_login_post, is_login_surface,
    is_logout_confirmation, is_managed_realm_address, is_navigation_allowed,
    is_navigation_allowed_for, is_online_login_form, is_public_landing,
};
use crate::services::page_identity::realm_of;
use crate::types::address::{
    enter_universe_url, universe_url, ASSET_PACK_SCREEN, BLANK, BULLETIN_BOARD_ACCEPT_FRAME,
    BULLETIN_BOARD_PAGE, GAME_FRAME, LOGIN_SCREEN, LOGOUT_HTTPS, MESSAGE_LIST_PAGES, MSG_FRAME,
    NAV_PAGE,
};
use crate::types::navigation::Verdict;
use crate::types::session::{AuthPhase, RealmId, SessionState};

/// Side effect requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    StopLoading,
    ClearHistory,
    Load(String),
    /// Set the game's preference cookies after a login.
    ApplyGameCookies,
    /// Expire the authentication cookies after a logout.
    DestroySessionCookies,
    ClearSessionCookies,
    /// The active universe changed; `cookie_source` is the address whose
    /// cookies authenticate the message poller.
    RealmChanged {
        realm: Option<RealmId>,
        cookie_source: Option<String>,
    },
    RestartPoller,
}

/// Trait defining session state machine operations.
pub trait SessionManagerTrait {
    fn state(&self) -> &SessionState;
    fn set_realm(&mut self, address: &str);
    fn login(&mut self, auto_attempt: bool);
    fn logout(&mut self);
    fn load_universe_page(&mut self, page: &str);
    fn switch_universe(&mut self, realm: RealmId);
    fn clear_realm(&mut self);
    fn take_effects(&mut self) -> Vec<SessionEffect>;
}

pub struct SessionStateMachine {
    state: SessionState,
    auto_login: bool,
    assets: Box<dyn AssetPackProbe>,
    effects: Vec<SessionEffect>,
}

impl SessionStateMachine {
    pub fn new(assets: Box<dyn AssetPackProbe>) -> Self {
        Self {
            state: SessionState::default(),
            auto_login: false,
            assets,
            effects: Vec::new(),
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.state.phase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    pub fn realm(&self) -> Option<RealmId> {
        self.state.realm
    }

    /// Whether the login surface should submit stored credentials on its own.
    pub fn is_auto_login(&self) -> bool {
        self.auto_login
    }

    pub fn assets(&self) -> &dyn AssetPackProbe {
        self.assets.as_ref()
    }

    fn emit(&mut self, effect: SessionEffect) {
        self.effects.push(effect);
    }

    fn load(&mut self, address: impl Into<String>) {
        self.emit(SessionEffect::Load(address.into()));
    }

    fn set_logged_in(&mut self, logged_in: bool) {
        self.state.authenticated = logged_in;
        if logged_in {
            info!("logged in");
            self.emit(SessionEffect::ApplyGameCookies);
        } else {
            info!("logged out");
            self.emit(SessionEffect::DestroySessionCookies);
            self.update_realm(None, None);
        }
    }

    fn update_realm(&mut self, realm: Option<RealmId>, cookie_source: Option<&str>) {
        if realm == self.state.realm {
            return;
        }
        info!(from = ?self.state.realm, to = ?realm, "universe changed");
        self.state.realm = realm;
        self.emit(SessionEffect::RealmChanged {
            realm,
            cookie_source: realm.and(cookie_source.map(str::to_string)),
        });
    }

    /// Leaves a bare frame page: back to where the user came from if that is
    /// a page of the active universe, else to `fallback_page`.
    fn redirect_back(&mut self, renderer: &dyn Renderer, from_page: &str, fallback_page: &str) {
        self.emit(SessionEffect::StopLoading);
        let previous = renderer.current_address();
        let usable = previous.filter(|previous| {
            !previous.contains(&format!(".pardus.at/{}", from_page))
                && is_managed_realm_address(previous)
                && realm_of(previous) == self.state.realm
        });
        match usable {
            Some(previous) => {
                debug!(from_page, %previous, "redirecting back");
                self.load(previous);
            }
            None => {
                debug!(from_page, fallback_page, "redirecting to fallback");
                self.load_universe_page(fallback_page);
            }
        }
    }
}

impl SessionManagerTrait for SessionStateMachine {
    fn state(&self) -> &SessionState {
        &self.state
    }

    /// Follows the universe of `address`. Addresses outside the universes
    /// leave the realm unchanged, as do universe addresses while logged out.
    fn set_realm(&mut self, address: &str) {
        let Some(realm) = realm_of(address) else {
            return;
        };
        if !self.state.authenticated {
            trace!(address, "ignoring universe address while logged out");
            return;
        }
        self.update_realm(Some(realm), Some(address));
    }

    /// Shows the local login surface, or the image pack selection when no
    /// pack is installed yet.
    fn login(&mut self, auto_attempt: bool) {
        self.auto_login = auto_attempt;
        if !self.assets.is_asset_pack_installed() {
            debug!("no image pack installed, showing pack selection");
            self.emit(SessionEffect::StopLoading);
            self.load(ASSET_PACK_SCREEN);
            self.emit(SessionEffect::ClearHistory);
            return;
        }
        debug!(auto_attempt, "showing login screen");
        self.emit(SessionEffect::StopLoading);
        self.emit(SessionEffect::ClearSessionCookies);
        self.update_realm(None, None);
        self.emit(SessionEffect::ClearHistory);
        self.load(LOGIN_SCREEN);
    }

    /// Starts a logout; the state flips once the confirmation page starts loading.
    fn logout(&mut self) {
        if !self.state.authenticated {
            self.login(false);
            return;
        }
        debug!("logging out");
        self.state.logging_out = true;
        self.emit(SessionEffect::StopLoading);
        self.update_realm(None, None);
        self.emit(SessionEffect::ClearHistory);
        self.load(LOGOUT_HTTPS);
    }

    fn load_universe_page(&mut self, page: &str) {
        let Some(realm) = self.state.realm else {
            debug!(page, "cannot load universe page without a universe");
            return;
        };
        self.emit(SessionEffect::StopLoading);
        self.load(universe_url(realm, page));
    }

    fn switch_universe(&mut self, realm: RealmId) {
        if !self.state.authenticated {
            debug!(%realm, "cannot enter universe while logged out");
            return;
        }
        self.emit(SessionEffect::StopLoading);
        self.load(enter_universe_url(realm));
    }

    fn clear_realm(&mut self) {
        self.update_realm(None, None);
    }

    fn take_effects(&mut self) -> Vec<SessionEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl NavigationObserver for SessionStateMachine {
    /// Links and redirects to foreign sites are refused; the game's own login
    /// form is replaced by the local login surface.
    fn on_navigation_requested(&mut self, address: &str, _renderer: &mut dyn Renderer) -> Verdict {
        if is_navigation_allowed(address) {
            return Verdict::Proceed;
        }
        debug!(address, "not loading");
        if is_online_login_form(address) {
            self.login(false);
        }
        Verdict::Abort
    }

    fn on_navigation_started(&mut self, address: &str, renderer: &mut dyn Renderer) -> Verdict {
        if !is_navigation_allowed_for(address, self.state.authenticated) {
            debug!(
                address,
                authenticated = self.state.authenticated,
                "access denied, redirecting to login screen"
            );
            self.login(false);
            return Verdict::Abort;
        }

        self.set_realm(address);
        if is_authenticated_landing(address) {
            self.set_logged_in(true);
        } else if is_logout_confirmation(address) {
            self.set_logged_in(false);
        } else if is_public_landing(address) {
            if self.state.logging_out {
                self.load(BLANK);
                self.emit(SessionEffect::ClearHistory);
                self.state.logging_out = false;
            }
        } else if is_bare_frame(address, GAME_FRAME) {
            self.redirect_back(renderer, GAME_FRAME, NAV_PAGE);
            return Verdict::Abort;
        } else if is_bare_frame(address, MSG_FRAME) {
            self.redirect_back(renderer, MSG_FRAME, BULLETIN_BOARD_PAGE);
            return Verdict::Abort;
        }
        Verdict::Proceed
    }

    fn on_navigation_finished(&mut self, address: &str, _renderer: &mut dyn Renderer) {
        if is_login_surface(address) {
            self.emit(SessionEffect::ClearHistory);
        } else if is_login_post(address) {
            warn!("login failed or aborted");
            self.login(false);
        } else if address.contains(BULLETIN_BOARD_ACCEPT_FRAME) {
            self.load_universe_page(BULLETIN_BOARD_PAGE);
        } else if MESSAGE_LIST_PAGES.iter().any(|page| address.contains(page)) {
            self.emit(SessionEffect::RestartPoller);
        }
    }
}

/// Preference cookies the game reads on every page.
pub fn game_cookies(asset_base: Option<&str>) -> Vec<String> {
    let mut cookies = vec!["usehttps=1".to_string()];
    if let Some(base) = asset_base {
        cookies.push(format!("image_path={}", base));
    }
    cookies.extend(
        ["resolution_tiles=64", "nav_size_dyn=0", "mobile_chat=1"]
            .iter()
            .map(|c| c.to_string()),
    );
    cookies
}

/// Cookies that expire the authentication of the current session.
pub const EXPIRED_SESSION_COOKIES: &[&str] = &[
    "accountid=0; max-age=0",
    "sessionid=0; max-age=0",
    "pardus_cookie=0; max-age=0",
];
