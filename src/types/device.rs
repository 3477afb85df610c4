use serde::{Deserialize, Serialize};

use super::page::Orientation;

/// Display characteristics of the device, supplied by the host at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeviceContext {
    pub orientation: Orientation,
    pub display_dpi: u32,
    pub is_tablet: bool,
}

impl DeviceContext {
    /// Zoom percentage for pages without a remembered state.
    ///
    /// Low density screens and tablets show pages at their natural size,
    /// high density phones start zoomed out (240dpi -> 100, 160dpi -> 100, 120dpi -> 75).
    pub fn default_zoom_percent(&self) -> u32 {
        let dpi = self.display_dpi as f32;
        if self.display_dpi <= 160 || self.is_tablet {
            (dpi / 1.6).round() as u32
        } else {
            (dpi / 2.4).round() as u32
        }
    }

    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self { orientation, ..self }
    }
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            display_dpi: 160,
            is_tablet: false,
        }
    }
}

/// Host platform features, resolved once and passed down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capabilities {
    /// Pinch zooming is available; without it the zoom buttons are always shown.
    pub multitouch: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { multitouch: true }
    }
}
