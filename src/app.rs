//! Shell core for the Pardus client.
//!
//! Central struct owning the session state machine, the render-state
//! coordinator and the host collaborators. Renderer callbacks enter here and
//! are dispatched to both observers; session effects are executed here so that
//! every load runs through the coordinator first.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::host::{
    AssetPackProbe, ChromeNotifier, CookieStore, MessagePoller, NavigationObserver, Renderer,
};
use crate::managers::page_state_manager::PageStateStore;
use crate::managers::render_state_manager::{plan_back, RenderStateCoordinator};
use crate::managers::session_manager::{
    game_cookies, SessionEffect, SessionManagerTrait, SessionStateMachine, EXPIRED_SESSION_COOKIES,
};
use crate::platform;
use crate::services::page_identity::{IdentityRules, PageIdentityNormalizer};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::address::{LANDING_HTTPS, SETTINGS_SCREEN};
use crate::types::device::{Capabilities, DeviceContext};
use crate::types::navigation::{BackOutcome, BackPlan, Verdict};
use crate::types::page::Orientation;
use crate::types::session::RealmId;

const COOKIE_SCOPE: &str = "; path=/; domain=.pardus.at;";
const SECURE_COOKIE_SCOPE: &str = "; path=/; domain=.pardus.at; secure;";

/// Host collaborators handed to the shell.
pub struct Collaborators {
    pub renderer: Box<dyn Renderer>,
    pub cookies: Box<dyn CookieStore>,
    pub poller: Box<dyn MessagePoller>,
    pub chrome: Box<dyn ChromeNotifier>,
    pub assets: Box<dyn AssetPackProbe>,
}

/// Where the shell keeps its files and which identity catalog it uses.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub data_dir: PathBuf,
    pub settings_path: Option<PathBuf>,
    pub identity_rules: IdentityRules,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::get_data_dir(),
            settings_path: None,
            identity_rules: IdentityRules::default(),
        }
    }
}

pub struct Shell {
    renderer: Box<dyn Renderer>,
    cookies: Box<dyn CookieStore>,
    poller: Box<dyn MessagePoller>,
    chrome: Box<dyn ChromeNotifier>,
    session: SessionStateMachine,
    render: RenderStateCoordinator,
    settings: SettingsEngine,
    config: ShellConfig,
    capabilities: Capabilities,
}

impl Shell {
    /// Creates the shell: loads settings, then opens the page state store if
    /// remembering is enabled. Unreadable settings fall back to defaults.
    pub fn new(
        collaborators: Collaborators,
        device: DeviceContext,
        capabilities: Capabilities,
        config: ShellConfig,
    ) -> Self {
        let mut settings = SettingsEngine::new(config.settings_path.clone());
        if let Err(err) = settings.load() {
            tracing::warn!("error loading settings, using defaults: {}", err);
        }

        let store = settings
            .remember_page_state()
            .then(|| Self::open_store(&config, &settings));
        let mut render = RenderStateCoordinator::new(store, device);
        if let Some(percent) = settings.get_settings().display.initial_zoom_percent {
            render = render.with_default_zoom(percent);
        }

        Self {
            renderer: collaborators.renderer,
            cookies: collaborators.cookies,
            poller: collaborators.poller,
            chrome: collaborators.chrome,
            session: SessionStateMachine::new(collaborators.assets),
            render,
            settings,
            config,
            capabilities,
        }
    }

    fn open_store(config: &ShellConfig, settings: &SettingsEngine) -> PageStateStore {
        let path = config
            .data_dir
            .join(&settings.get_settings().page_state.file_name);
        PageStateStore::open(path, PageIdentityNormalizer::new(config.identity_rules.clone()))
    }

    pub fn session(&self) -> &SessionStateMachine {
        &self.session
    }

    pub fn render_state(&self) -> &RenderStateCoordinator {
        &self.render
    }

    pub fn settings(&self) -> &SettingsEngine {
        &self.settings
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Startup: shows the login surface, logging in on its own if configured.
    pub fn startup(&mut self) {
        let auto_login = self.settings.get_settings().session.auto_login;
        self.session.login(auto_login);
        self.apply_session_effects();
    }

    /// The app goes to the background: remembered page states are written out.
    pub fn enter_background(&mut self) {
        self.render.persist();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.render.set_orientation(orientation);
    }

    // ─── Renderer callbacks ───

    /// Returns whether the renderer may follow the link or redirect.
    pub fn on_navigation_requested(&mut self, address: &str) -> Verdict {
        let verdict = self
            .session
            .on_navigation_requested(address, self.renderer.as_mut());
        self.apply_session_effects();
        if verdict == Verdict::Abort {
            return Verdict::Abort;
        }
        self.render.on_navigation_requested(address, self.renderer.as_mut())
    }

    /// Returns `Abort` when the page must not be rendered.
    pub fn on_navigation_started(&mut self, address: &str) -> Verdict {
        let verdict = self
            .session
            .on_navigation_started(address, self.renderer.as_mut());
        self.apply_session_effects();
        if verdict == Verdict::Proceed {
            self.render.on_navigation_started(address, self.renderer.as_mut())
        } else {
            verdict
        }
    }

    pub fn on_navigation_finished(&mut self, address: &str) {
        self.render.on_navigation_finished(address, self.renderer.as_mut());
        self.session.on_navigation_finished(address, self.renderer.as_mut());
        self.apply_session_effects();
    }

    pub fn on_user_touch_down(&mut self) {
        self.session.on_user_touch_down();
        self.render.on_user_touch_down();
    }

    /// A scroll request from the renderer or page content; returns whether it was applied.
    pub fn on_scroll_request(&mut self, x: i32, y: i32) -> bool {
        self.render.request_scroll(x, y, self.renderer.as_mut())
    }

    pub fn on_scroll_changed(&mut self, x: i32, y: i32) {
        self.render.on_scroll_changed(x, y, self.renderer.as_mut());
    }

    // ─── User actions ───

    pub fn load(&mut self, address: &str) {
        debug!(address, "loading");
        self.render.before_load(address, self.renderer.as_mut());
        self.renderer.load_address(address);
    }

    pub fn reload(&mut self) {
        self.render.prepare_reload(self.renderer.as_mut());
        self.renderer.reload();
    }

    /// Goes back one page, stepping over skipped entries.
    pub fn back(&mut self) -> BackOutcome {
        match plan_back(&self.renderer.history_snapshot()) {
            BackPlan::NoHistory => BackOutcome::NoHistory,
            BackPlan::ClearHistory => {
                self.renderer.clear_history();
                BackOutcome::NoHistory
            }
            BackPlan::Login => {
                self.renderer.clear_history();
                self.login(false);
                BackOutcome::ReturnedToLogin
            }
            BackPlan::Steps { count, address } => {
                debug!(%address, count, "going back");
                self.render.before_load(&address, self.renderer.as_mut());
                self.renderer.go_back_or_forward(-(count as i32));
                BackOutcome::Stepped(count)
            }
        }
    }

    pub fn login(&mut self, auto_attempt: bool) {
        self.session.login(auto_attempt);
        self.apply_session_effects();
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.apply_session_effects();
    }

    pub fn load_universe_page(&mut self, page: &str) {
        self.session.load_universe_page(page);
        self.apply_session_effects();
    }

    pub fn switch_universe(&mut self, realm: RealmId) {
        self.session.switch_universe(realm);
        self.apply_session_effects();
    }

    pub fn show_settings(&mut self) {
        self.renderer.stop_loading();
        self.load(SETTINGS_SCREEN);
    }

    /// Deletes cookies, remembered page states and the active universe.
    pub fn remove_traces(&mut self) {
        info!("removing traces");
        self.cookies.remove_session_cookies();
        self.cookies.remove_all_cookies();
        self.render.forget();
        self.session.clear_realm();
        self.apply_session_effects();
    }

    /// Turns page state memory on or off and stores the choice.
    pub fn set_remember_page_state(&mut self, remember: bool) {
        if let Err(err) = self
            .settings
            .set_value("page_state.remember", serde_json::Value::Bool(remember))
        {
            tracing::warn!("error saving page state preference: {}", err);
        }
        if remember {
            let store = Self::open_store(&self.config, &self.settings);
            self.render.enable_store(store);
        } else {
            self.render.disable_store();
        }
    }

    /// Zoom buttons are shown on request, and always without multitouch.
    pub fn zoom_controls_visible(&self) -> bool {
        self.settings.get_settings().display.show_zoom_controls || !self.capabilities.multitouch
    }

    fn apply_session_effects(&mut self) {
        for effect in self.session.take_effects() {
            tracing::trace!(?effect, "applying session effect");
            match effect {
                SessionEffect::StopLoading => self.renderer.stop_loading(),
                SessionEffect::ClearHistory => self.renderer.clear_history(),
                SessionEffect::Load(address) => self.load(&address),
                SessionEffect::ApplyGameCookies => {
                    let asset_base = self.session.assets().asset_base_address();
                    for cookie in game_cookies(asset_base.as_deref()) {
                        self.cookies
                            .set_cookie(LANDING_HTTPS, &format!("{}{}", cookie, SECURE_COOKIE_SCOPE));
                    }
                }
                SessionEffect::DestroySessionCookies => {
                    for cookie in EXPIRED_SESSION_COOKIES {
                        self.cookies
                            .set_cookie(LANDING_HTTPS, &format!("{}{}", cookie, COOKIE_SCOPE));
                    }
                    self.cookies.remove_session_cookies();
                    self.poller.set_realm(None, None);
                }
                SessionEffect::ClearSessionCookies => self.cookies.remove_session_cookies(),
                SessionEffect::RealmChanged {
                    realm,
                    cookie_source,
                } => {
                    let auth_cookie = cookie_source.and_then(|source| self.cookies.cookies_for(&source));
                    self.poller.set_realm(realm, auth_cookie);
                    self.chrome.refresh_menu();
                }
                SessionEffect::RestartPoller => self.poller.restart(),
            }
        }
    }
}
