//! Pardus shell: session and page-state engine of a mobile Pardus client.
//!
//! Entry point: runs a console demo that drives the engine with an in-memory
//! renderer standing in for the platform web view.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use pardus_shell::app::{Collaborators, Shell, ShellConfig};
use pardus_shell::host::{AssetPackProbe, ChromeNotifier, CookieStore, MessagePoller, Renderer};
use pardus_shell::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use pardus_shell::types::device::{Capabilities, DeviceContext};
use pardus_shell::types::navigation::{HistorySnapshot, ViewportReadout};
use pardus_shell::types::page::Orientation;
use pardus_shell::types::session::RealmId;

fn main() {
    let data_dir = std::env::temp_dir().join("pardus-shell-demo");
    let settings_path = data_dir.join("settings.json");

    let mut settings = SettingsEngine::new(Some(settings_path.clone()));
    let level = match settings.load() {
        Ok(loaded) => loaded.logging.level,
        Err(err) => {
            eprintln!("error loading settings: {}", err);
            settings.get_settings().logging.level.clone()
        }
    };
    init_tracing(&level);
    info!(version = env!("CARGO_PKG_VERSION"), "pardus shell demo");

    let view = Rc::new(RefCell::new(View::default()));
    let collaborators = Collaborators {
        renderer: Box::new(DemoRenderer(view.clone())),
        cookies: Box::new(DemoCookies::default()),
        poller: Box::new(DemoPoller),
        chrome: Box::new(DemoChrome),
        assets: Box::new(DemoAssets),
    };
    let config = ShellConfig {
        data_dir: data_dir.clone(),
        settings_path: Some(settings_path),
        ..ShellConfig::default()
    };
    let device = DeviceContext {
        display_dpi: 240,
        ..DeviceContext::default()
    };
    let mut shell = Shell::new(collaborators, device, Capabilities::default(), config);

    section("Startup");
    shell.startup();
    println!("  Phase: {:?}", shell.session().phase());

    section("Login");
    navigate(&mut shell, &view, "https://www.pardus.at/index.php?section=account_play");
    println!("  Phase: {:?}", shell.session().phase());

    section("Universe");
    shell.switch_universe(RealmId::Orion);
    finish(&mut shell);
    navigate(&mut shell, &view, "https://orion.pardus.at/main.php");
    println!("  Realm: {:?}", shell.session().realm());
    shell.on_user_touch_down();
    view.borrow_mut().scroll = (0, 420);
    shell.on_scroll_changed(0, 420);
    navigate(&mut shell, &view, "https://orion.pardus.at/overview.php?ship=1");
    println!("  Back: {:?}", shell.back());
    finish(&mut shell);
    println!("  Pending scroll: {:?}", shell.render_state().pending_scroll());

    section("Rotation");
    shell.set_orientation(Orientation::Landscape);
    shell.reload();
    finish(&mut shell);

    section("Background");
    shell.enter_background();
    if let Some(store) = shell.render_state().store() {
        use pardus_shell::managers::page_state_manager::PageStateStoreTrait;
        println!("  Remembered {} page states in {}", store.len(), store.path().display());
    }

    section("Logout");
    shell.logout();
    if let Some(address) = shell.renderer().current_address() {
        shell.on_navigation_started(&address);
    }
    navigate(&mut shell, &view, "https://www.pardus.at/index.php");
    println!("  Phase: {:?}", shell.session().phase());

    println!();
    println!("  Renderer saw {} calls", view.borrow().calls);
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .parse(level)
            .unwrap_or_else(|_| EnvFilter::new("info"))
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_filter(env_filter))
        .init();
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

/// Plays the renderer's callbacks for a link followed by the user.
fn navigate(shell: &mut Shell, view: &Rc<RefCell<View>>, address: &str) {
    use pardus_shell::types::navigation::Verdict;
    if shell.on_navigation_requested(address) == Verdict::Abort {
        println!("  Blocked {}", address);
        return;
    }
    view.borrow_mut().push(address);
    if shell.on_navigation_started(address) == Verdict::Abort {
        println!("  Aborted {}", address);
        return;
    }
    println!("  Loaded {}", address);
    shell.on_navigation_finished(address);
}

fn finish(shell: &mut Shell) {
    if let Some(address) = shell.renderer().current_address() {
        shell.on_navigation_finished(&address);
    }
}

/// What the stand-in web view shows; shared so followed links can be played in.
#[derive(Default)]
struct View {
    history: Vec<String>,
    index: usize,
    scroll: (i32, i32),
    zoom: u32,
    calls: usize,
}

impl View {
    fn push(&mut self, address: &str) {
        if !self.history.is_empty() {
            self.history.truncate(self.index + 1);
        }
        self.history.push(address.to_string());
        self.index = self.history.len() - 1;
        self.scroll = (0, 0);
    }
}

struct DemoRenderer(Rc<RefCell<View>>);

impl Renderer for DemoRenderer {
    fn load_address(&mut self, address: &str) {
        let mut view = self.0.borrow_mut();
        view.calls += 1;
        view.push(address);
    }

    fn reload(&mut self) {
        self.0.borrow_mut().calls += 1;
    }

    fn stop_loading(&mut self) {
        self.0.borrow_mut().calls += 1;
    }

    fn clear_history(&mut self) {
        let mut view = self.0.borrow_mut();
        view.calls += 1;
        if let Some(current) = view.history.get(view.index).cloned() {
            view.history = vec![current];
            view.index = 0;
        }
    }

    fn current_address(&self) -> Option<String> {
        let view = self.0.borrow();
        view.history.get(view.index).cloned()
    }

    fn scroll_to(&mut self, x: i32, y: i32) {
        let mut view = self.0.borrow_mut();
        view.calls += 1;
        view.scroll = (x, y);
    }

    fn set_zoom_percent(&mut self, percent: u32) {
        let mut view = self.0.borrow_mut();
        view.calls += 1;
        view.zoom = percent;
    }

    fn history_snapshot(&self) -> HistorySnapshot {
        let view = self.0.borrow();
        HistorySnapshot::new(view.history.clone(), view.index)
    }

    fn go_back_or_forward(&mut self, steps: i32) {
        let mut view = self.0.borrow_mut();
        view.calls += 1;
        let target = view.index as i64 + steps as i64;
        if target >= 0 && (target as usize) < view.history.len() {
            view.index = target as usize;
        }
    }

    fn viewport(&self) -> ViewportReadout {
        let view = self.0.borrow();
        ViewportReadout {
            scale: view.zoom as f32 / 100.0,
            scroll_x: view.scroll.0,
            scroll_y: view.scroll.1,
            range_x: 480,
            range_y: 2400,
        }
    }
}

#[derive(Default)]
struct DemoCookies {
    jar: Vec<(String, String)>,
}

impl CookieStore for DemoCookies {
    fn cookies_for(&self, address: &str) -> Option<String> {
        let cookies: Vec<&str> = self
            .jar
            .iter()
            .filter(|(scope, _)| scope == address)
            .map(|(_, cookie)| cookie.as_str())
            .collect();
        (!cookies.is_empty()).then(|| cookies.join("; "))
    }

    fn set_cookie(&mut self, address: &str, cookie: &str) {
        self.jar.push((address.to_string(), cookie.to_string()));
    }

    fn remove_session_cookies(&mut self) {
        self.jar.retain(|(_, cookie)| cookie.contains("max-age"));
    }

    fn remove_all_cookies(&mut self) {
        self.jar.clear();
    }
}

struct DemoPoller;

impl MessagePoller for DemoPoller {
    fn set_realm(&mut self, realm: Option<RealmId>, _auth_cookie: Option<String>) {
        println!("  Poller now watching {:?}", realm);
    }

    fn restart(&mut self) {
        println!("  Poller restarted");
    }
}

struct DemoChrome;

impl ChromeNotifier for DemoChrome {
    fn refresh_menu(&mut self) {
        println!("  Menu refreshed");
    }
}

struct DemoAssets;

impl AssetPackProbe for DemoAssets {
    fn is_asset_pack_installed(&self) -> bool {
        true
    }
}
