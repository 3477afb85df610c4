use pardus_shell::types::errors::*;

// === PageStateError Tests ===

#[test]
fn page_state_error_display_variants() {
    assert_eq!(
        PageStateError::Io("disk full".to_string()).to_string(),
        "Page state I/O error: disk full"
    );
    assert_eq!(
        PageStateError::Serialization("eof".to_string()).to_string(),
        "Page state serialization error: eof"
    );
    assert_eq!(
        PageStateError::IncompatibleVersion {
            found: 1,
            expected: 2
        }
        .to_string(),
        "Page state file version 1 is incompatible (expected 2)"
    );
}

#[test]
fn page_state_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: PageStateError = io.into();
    assert!(matches!(err, PageStateError::Io(msg) if msg.contains("denied")));
}

#[test]
fn page_state_error_from_json() {
    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: PageStateError = json.into();
    assert!(matches!(err, PageStateError::Serialization(_)));
}

#[test]
fn page_state_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(PageStateError::Io("x".to_string()));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("no access".to_string()).to_string(),
        "Settings I/O error: no access"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("a.b".to_string()).to_string(),
        "Invalid settings key: a.b"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected bool".to_string()).to_string(),
        "Invalid settings value: expected bool"
    );
}

#[test]
fn settings_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(SettingsError::InvalidKey("k".to_string()));
    assert!(err.source().is_none());
}
