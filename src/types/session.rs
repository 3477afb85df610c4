use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the parallel game universes, each served from its own host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RealmId {
    Artemis,
    Orion,
    Pegasus,
}

impl RealmId {
    pub const ALL: [RealmId; 3] = [RealmId::Artemis, RealmId::Orion, RealmId::Pegasus];

    pub fn as_str(&self) -> &'static str {
        match self {
            RealmId::Artemis => "artemis",
            RealmId::Orion => "orion",
            RealmId::Pegasus => "pegasus",
        }
    }

    /// Host name serving this universe.
    pub fn host(&self) -> &'static str {
        match self {
            RealmId::Artemis => "artemis.pardus.at",
            RealmId::Orion => "orion.pardus.at",
            RealmId::Pegasus => "pegasus.pardus.at",
        }
    }

    pub fn from_host(host: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|realm| realm.host() == host)
    }
}

impl fmt::Display for RealmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication state owned by the session state machine.
///
/// `realm` is `None` whenever `authenticated` is false, and `logging_out`
/// stays set only while the logout confirmation page is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub logging_out: bool,
    pub realm: Option<RealmId>,
}

/// Coarse phase derived from a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    LoggedOut,
    LoggedIn,
    LoggingOut,
}

impl SessionState {
    pub fn phase(&self) -> AuthPhase {
        if self.logging_out {
            AuthPhase::LoggingOut
        } else if self.authenticated {
            AuthPhase::LoggedIn
        } else {
            AuthPhase::LoggedOut
        }
    }
}
