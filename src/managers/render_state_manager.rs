//! Render-State Coordinator.
//!
//! Restores a page's zoom before it paints and its scroll position once it is
//! laid out. Until the user touches the view, scroll requests other than the
//! restoration target are dropped so the renderer's own layout scrolling
//! cannot undo the restore; after a touch, every scroll request goes through.

use tracing::{debug, trace, warn};

use crate::host::{NavigationObserver, Renderer};
use crate::managers::page_state_manager::{PageStateStore, PageStateStoreTrait};
use crate::services::navigation_policy::{
    is_anchor_address, is_login_surface, is_script_address, is_tracking_skipped,
};
use crate::types::device::DeviceContext;
use crate::types::navigation::{BackPlan, HistorySnapshot, Verdict};
use crate::types::page::{Orientation, PageState};

/// Load phase of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    LoadStart,
    LoadFinish,
}

pub struct RenderStateCoordinator {
    store: Option<PageStateStore>,
    device: DeviceContext,
    default_zoom_percent: u32,
    status: RenderStatus,
    touched_after_load: bool,
    pending_scroll: Option<PageState>,
}

impl RenderStateCoordinator {
    pub fn new(store: Option<PageStateStore>, device: DeviceContext) -> Self {
        Self {
            store,
            default_zoom_percent: device.default_zoom_percent(),
            device,
            status: RenderStatus::LoadFinish,
            touched_after_load: false,
            pending_scroll: None,
        }
    }

    pub fn with_default_zoom(mut self, percent: u32) -> Self {
        self.default_zoom_percent = percent;
        self
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    pub fn pending_scroll(&self) -> Option<PageState> {
        self.pending_scroll
    }

    pub fn default_zoom_percent(&self) -> u32 {
        self.default_zoom_percent
    }

    pub fn store(&self) -> Option<&PageStateStore> {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> Option<&mut PageStateStore> {
        self.store.as_mut()
    }

    pub fn is_remembering(&self) -> bool {
        self.store.is_some()
    }

    /// Starts remembering page states with `store`, unless already doing so.
    pub fn enable_store(&mut self, store: PageStateStore) {
        if self.store.is_none() {
            self.store = Some(store);
        }
    }

    /// Stops remembering: wipes the store and frees it.
    pub fn disable_store(&mut self) {
        if let Some(mut store) = self.store.take() {
            store.forget();
        }
        self.pending_scroll = None;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.device = self.device.with_orientation(orientation);
    }

    fn orientation(&self) -> Orientation {
        self.device.orientation
    }

    /// Saves the displayed page and pre-sets the zoom of `address`.
    pub fn before_load(&mut self, address: &str, renderer: &mut dyn Renderer) {
        if is_script_address(address) {
            return;
        }
        self.status = RenderStatus::LoadStart;
        self.touched_after_load = false;
        self.pending_scroll = None;
        trace!(address, "render status LOAD_START");

        let orientation = self.orientation();
        let default_zoom = self.default_zoom_percent;
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if is_tracking_skipped(Some(address)) {
            return;
        }

        let current = renderer.current_address();
        store.save(current.as_deref(), orientation, renderer.viewport());

        let zoom = match store.get(address, orientation) {
            Some(state) if state.zoom_percent() > 0 => {
                debug!(address, zoom = state.zoom_percent(), "restoring zoom level");
                state.zoom_percent()
            }
            _ => default_zoom,
        };
        renderer.set_zoom_percent(zoom);
    }

    /// Picks the scroll target of the page now displayed and scrolls to it.
    pub fn after_load(&mut self, renderer: &mut dyn Renderer) {
        self.status = RenderStatus::LoadFinish;
        self.touched_after_load = false;
        trace!("render status LOAD_FINISH");

        let address = renderer.current_address();
        let Some(store) = self.store.as_ref() else {
            return;
        };
        let Some(address) = address.filter(|a| !is_tracking_skipped(Some(a))) else {
            self.pending_scroll = None;
            return;
        };

        let target = match store.get(&address, self.orientation()) {
            Some(state) => {
                debug!(%address, x = state.scroll_x, y = state.scroll_y, "restoring scroll position");
                state
            }
            None if is_anchor_address(&address) => PageState::no_scroll(),
            None => PageState::origin(),
        };
        self.pending_scroll = Some(target);
        if !target.is_no_scroll() {
            self.request_scroll(target.scroll_x, target.scroll_y, renderer);
        }
    }

    /// Active restoration target, if scroll requests are currently guarded.
    fn guarded_target(&self) -> Option<PageState> {
        if self.touched_after_load || self.store.is_none() {
            return None;
        }
        self.pending_scroll.filter(|target| !target.is_no_scroll())
    }

    /// Whether a scroll request to (`x`, `y`) would be honored.
    pub fn allows_scroll(&self, x: i32, y: i32) -> bool {
        match self.guarded_target() {
            None => true,
            Some(target) => target.scroll_x == x && target.scroll_y == y,
        }
    }

    /// Scrolls the view if the guard lets the request through.
    pub fn request_scroll(&mut self, x: i32, y: i32, renderer: &mut dyn Renderer) -> bool {
        if !self.allows_scroll(x, y) {
            trace!(x, y, "blocking scroll attempt");
            return false;
        }
        renderer.scroll_to(x, y);
        true
    }

    /// Puts the view back on the restoration target if something else moved it.
    pub fn on_scroll_changed(&mut self, x: i32, y: i32, renderer: &mut dyn Renderer) {
        let Some(target) = self.guarded_target() else {
            return;
        };
        if x != target.scroll_x || y != target.scroll_y {
            trace!(x, y, "scrolling back to initial position");
            renderer.scroll_to(target.scroll_x, target.scroll_y);
        }
    }

    pub fn user_touched(&mut self) {
        self.touched_after_load = true;
    }

    /// Lets the next save of the current page through, then treats the reload
    /// like any other load of it.
    pub fn prepare_reload(&mut self, renderer: &mut dyn Renderer) {
        if let Some(store) = self.store.as_mut() {
            store.reset_last_address();
        }
        if let Some(address) = renderer.current_address() {
            self.before_load(&address, renderer);
        }
    }

    /// Writes remembered states to disk; failures are logged and dropped.
    pub fn persist(&self) {
        if let Some(store) = self.store.as_ref() {
            if let Err(err) = store.persist() {
                warn!("error persisting page states: {}", err);
            }
        }
    }

    pub fn forget(&mut self) {
        if let Some(store) = self.store.as_mut() {
            store.forget();
        }
    }
}

/// Resolves where "back" leads, stepping over one skipped entry.
pub fn plan_back(history: &HistorySnapshot) -> BackPlan {
    if history.current.0 == 0 {
        return BackPlan::NoHistory;
    }
    let mut steps = 1;
    let mut previous = history.behind(1);
    if is_tracking_skipped(previous) {
        if history.current.0 < 2 {
            return BackPlan::ClearHistory;
        }
        steps = 2;
        previous = history.behind(2);
    }
    match previous {
        None => BackPlan::NoHistory,
        Some(address) if is_login_surface(address) => BackPlan::Login,
        Some(address) => BackPlan::Steps {
            count: steps,
            address: address.to_string(),
        },
    }
}

impl NavigationObserver for RenderStateCoordinator {
    fn on_navigation_requested(&mut self, address: &str, renderer: &mut dyn Renderer) -> Verdict {
        self.before_load(address, renderer);
        Verdict::Proceed
    }

    fn on_navigation_finished(&mut self, _address: &str, renderer: &mut dyn Renderer) {
        self.after_load(renderer);
    }

    fn on_user_touch_down(&mut self) {
        self.user_touched();
    }
}
