use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Screen orientation a page was viewed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

/// Normalized, orientation-qualified cache key of a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageIdentity {
    pub canonical_path: String,
    pub orientation: Orientation,
}

impl fmt::Display for PageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.canonical_path, self.orientation)
    }
}

/// Display attributes of a page: zoom level, scroll offsets and content extents.
///
/// Offsets and extents are in scaled pixels. A state is never edited after
/// creation; revisiting a page replaces it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PageState {
    pub scale: f32,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub total_x: i32,
    pub total_y: i32,
    /// Milliseconds since the unix epoch.
    pub saved_at: i64,
}

impl PageState {
    pub fn new(scale: f32, scroll_x: i32, scroll_y: i32, total_x: i32, total_y: i32) -> Self {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
        Self {
            scale,
            scroll_x,
            scroll_y,
            total_x,
            total_y,
            saved_at: now_millis(),
        }
    }

    /// State that leaves scrolling to the content (anchors, pagination).
    pub fn no_scroll() -> Self {
        Self::new(0.0, -1, -1, 0, 0)
    }

    /// State that scrolls to the top-left corner.
    pub fn origin() -> Self {
        Self::new(0.0, 0, 0, 0, 0)
    }

    pub fn is_no_scroll(&self) -> bool {
        self.scroll_x == -1 && self.scroll_y == -1
    }

    /// Zoom level as a whole percentage, rounded half down.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0 - 0.5).ceil().max(0.0) as u32
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scale {}, Scroll-X {}/{}, Scroll-Y {}/{}",
            self.zoom_percent(),
            self.scroll_x,
            self.total_x,
            self.scroll_y,
            self.total_y
        )
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
