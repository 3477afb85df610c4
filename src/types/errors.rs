use std::fmt;

// === PageStateError ===

/// Errors related to persisting remembered page states.
#[derive(Debug)]
pub enum PageStateError {
    /// Reading or writing the state file failed.
    Io(String),
    /// The state file could not be encoded or decoded.
    Serialization(String),
    /// The state file was written by an incompatible version.
    IncompatibleVersion { found: u32, expected: u32 },
}

impl fmt::Display for PageStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageStateError::Io(msg) => write!(f, "Page state I/O error: {}", msg),
            PageStateError::Serialization(msg) => {
                write!(f, "Page state serialization error: {}", msg)
            }
            PageStateError::IncompatibleVersion { found, expected } => write!(
                f,
                "Page state file version {} is incompatible (expected {})",
                found, expected
            ),
        }
    }
}

impl std::error::Error for PageStateError {}

impl From<std::io::Error> for PageStateError {
    fn from(err: std::io::Error) -> Self {
        PageStateError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PageStateError {
    fn from(err: serde_json::Error) -> Self {
        PageStateError::Serialization(err.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
