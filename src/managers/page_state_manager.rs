//! Page State Store.
//!
//! Remembers zoom level and scroll position per normalized page identity and
//! screen orientation. The whole mapping is written to one private JSON file
//! when the app goes to the background and read back once on construction.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::services::page_identity::PageIdentityNormalizer;
use crate::types::errors::PageStateError;
use crate::types::navigation::ViewportReadout;
use crate::types::page::{Orientation, PageIdentity, PageState};

/// Bumped whenever the persisted layout changes; older files are discarded.
pub const FORMAT_VERSION: u32 = 2;

/// Address fragment of the in-frame game canvas, which is never persisted.
const NEVER_PERSIST_MARKER: &str = "/game.php";

/// Trait defining page state store operations.
pub trait PageStateStoreTrait {
    /// Records the state of the page at `address`. Returns whether anything was stored.
    fn save(&mut self, address: Option<&str>, orientation: Orientation, viewport: ViewportReadout) -> bool;
    fn get(&self, address: &str, orientation: Orientation) -> Option<PageState>;
    fn forget(&mut self);
    fn reset_last_address(&mut self);
    fn persist(&self) -> Result<(), PageStateError>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedPageStates {
    version: u32,
    entries: Vec<PersistedEntry>,
}

#[derive(Serialize, Deserialize)]
struct PersistedEntry {
    identity: PageIdentity,
    state: PageState,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// File-backed page state store.
pub struct PageStateStore {
    path: PathBuf,
    normalizer: PageIdentityNormalizer,
    states: HashMap<PageIdentity, PageState>,
    last_saved: Option<(String, Orientation)>,
}

impl PageStateStore {
    /// Opens the store at `path`. Missing, unreadable or incompatible files
    /// all start an empty store.
    pub fn open<P: AsRef<Path>>(path: P, normalizer: PageIdentityNormalizer) -> Self {
        let path = path.as_ref().to_path_buf();
        let states = match Self::load_from_disk(&path) {
            Ok(states) => states,
            Err(PageStateError::IncompatibleVersion { found, expected }) => {
                info!(found, expected, "discarding page states written by another version");
                HashMap::new()
            }
            Err(err) => {
                warn!(path = %path.display(), "error loading page states: {}", err);
                HashMap::new()
            }
        };
        debug!(count = states.len(), "loaded page states");
        Self {
            path,
            normalizer,
            states,
            last_saved: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> Result<HashMap<PageIdentity, PageState>, PageStateError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no page states saved yet");
                return Ok(HashMap::new());
            }
            Err(err) => return Err(err.into()),
        };

        let probe: VersionProbe = serde_json::from_str(&content)?;
        if probe.version != FORMAT_VERSION {
            return Err(PageStateError::IncompatibleVersion {
                found: probe.version,
                expected: FORMAT_VERSION,
            });
        }
        let persisted: PersistedPageStates = serde_json::from_str(&content)?;
        Ok(persisted
            .entries
            .into_iter()
            .map(|entry| (entry.identity, entry.state))
            .collect())
    }

    fn is_duplicate(&self, address: &str, orientation: Orientation) -> bool {
        self.last_saved
            .as_ref()
            .is_some_and(|(last, last_orientation)| last == address && *last_orientation == orientation)
    }
}

impl PageStateStoreTrait for PageStateStore {
    /// Stores a fresh state for the page unless the address is missing, is the
    /// game canvas, or repeats the previous save for the same orientation (a
    /// redundant lifecycle callback must not clobber a just-restored state).
    fn save(&mut self, address: Option<&str>, orientation: Orientation, viewport: ViewportReadout) -> bool {
        let Some(address) = address else {
            return false;
        };
        if address.contains(NEVER_PERSIST_MARKER) || self.is_duplicate(address, orientation) {
            return false;
        }
        self.last_saved = Some((address.to_string(), orientation));

        let Some(identity) = self.normalizer.normalize(address, orientation) else {
            return false;
        };
        let state = if self.normalizer.is_no_scroll(&identity) {
            PageState::new(viewport.scale, -1, -1, viewport.range_x, viewport.range_y)
        } else {
            PageState::new(
                viewport.scale,
                viewport.scroll_x,
                viewport.scroll_y,
                viewport.range_x,
                viewport.range_y,
            )
        };
        trace!(%identity, address, %state, "saving page state");
        self.states.insert(identity, state);
        true
    }

    fn get(&self, address: &str, orientation: Orientation) -> Option<PageState> {
        let identity = self.normalizer.normalize(address, orientation)?;
        self.states.get(&identity).copied()
    }

    /// Wipes every remembered state, on disk as well.
    fn forget(&mut self) {
        self.states.clear();
        if let Err(err) = self.persist() {
            warn!("error persisting cleared page states: {}", err);
        }
        self.reset_last_address();
    }

    /// Lets the next save for the last address through (after a manual reload).
    fn reset_last_address(&mut self) {
        self.last_saved = None;
    }

    /// Writes the whole mapping as one document, replacing the previous file.
    fn persist(&self) -> Result<(), PageStateError> {
        debug!(count = self.states.len(), "persisting page states");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let persisted = PersistedPageStates {
            version: FORMAT_VERSION,
            entries: self
                .states
                .iter()
                .map(|(identity, state)| PersistedEntry {
                    identity: identity.clone(),
                    state: *state,
                })
                .collect(),
        };
        let json = serde_json::to_vec(&persisted)?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn len(&self) -> usize {
        self.states.len()
    }
}
