use serde::{Deserialize, Serialize};

/// Position inside the renderer's back/forward history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HistoryMark(pub usize);

/// Copy of the renderer's history list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub entries: Vec<String>,
    pub current: HistoryMark,
}

impl HistorySnapshot {
    pub fn new(entries: Vec<String>, current: usize) -> Self {
        Self {
            entries,
            current: HistoryMark(current),
        }
    }

    /// Address `steps` entries behind the current one.
    pub fn behind(&self, steps: usize) -> Option<&str> {
        let index = self.current.0.checked_sub(steps)?;
        self.entries.get(index).map(String::as_str)
    }

    pub fn current_address(&self) -> Option<&str> {
        self.entries.get(self.current.0).map(String::as_str)
    }
}

/// Live zoom and scroll readout of the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportReadout {
    pub scale: f32,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub range_x: i32,
    pub range_y: i32,
}

/// Whether a navigation may continue after an observer looked at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Abort,
}

/// Resolution of a "back" request against the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackPlan {
    /// Nothing to go back to.
    NoHistory,
    /// Only a skipped entry is behind us; history gets dropped.
    ClearHistory,
    /// The previous page is the local login surface.
    Login,
    Steps { count: usize, address: String },
}

/// What `back` did, as reported to the screen owning the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// No history left; the caller should leave the screen instead.
    NoHistory,
    ReturnedToLogin,
    Stepped(usize),
}
