use serde::{Deserialize, Serialize};

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ShellSettings {
    pub page_state: PageStateSettings,
    pub display: DisplaySettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

/// Remembering zoom and scroll per page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageStateSettings {
    pub remember: bool,
    pub file_name: String,
}

impl Default for PageStateSettings {
    fn default() -> Self {
        Self {
            remember: true,
            file_name: "page_state.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DisplaySettings {
    pub show_zoom_controls: bool,
    /// Overrides the zoom derived from the display density.
    pub initial_zoom_percent: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SessionSettings {
    pub auto_login: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
