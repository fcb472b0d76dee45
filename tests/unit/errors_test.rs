use tabspace::types::errors::*;
use tabspace::types::ids::{ContainerId, FolderId, TabId};

// === TabError Tests ===

#[test]
fn tab_error_not_found_display() {
    let id: TabId = "6f1c2a9e-3b4d-4c8e-9f10-1a2b3c4d5e6f".parse().unwrap();
    let err = TabError::TabNotFound(id);
    assert_eq!(err.to_string(), "Tab not found: 6f1c2a9e-3b4d-4c8e-9f10-1a2b3c4d5e6f");
}

#[test]
fn tab_error_container_and_folder_display() {
    let space = ContainerId::new();
    let folder = FolderId::new();
    assert_eq!(
        TabError::ContainerNotFound(space).to_string(),
        format!("Space not found: {}", space)
    );
    assert_eq!(
        TabError::FolderNotFound(folder).to_string(),
        format!("Folder not found: {}", folder)
    );
    assert_eq!(
        TabError::FolderNotEmpty(folder).to_string(),
        format!("Folder is not empty: {}", folder)
    );
    assert_eq!(
        TabError::LastContainer(space).to_string(),
        format!("Cannot delete the last space: {}", space)
    );
}

#[test]
fn tab_error_invalid_payload_display() {
    let err = TabError::InvalidPayload("not-a-tab".to_string());
    assert_eq!(err.to_string(), "Invalid tab identifier: not-a-tab");
}

#[test]
fn tab_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(TabError::TabNotFound(TabId::new()));
    assert!(err.source().is_none());
}

// === StoreError Tests ===

#[test]
fn store_error_from_rusqlite() {
    let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StoreError::Database(_)));
    assert!(err.to_string().starts_with("Session database error:"));
}

#[test]
fn store_error_from_serde_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: StoreError = json_err.into();
    assert!(matches!(err, StoreError::Serialization(_)));
    assert!(err.to_string().starts_with("Session serialization error:"));
}

#[test]
fn store_error_unavailable_display() {
    let err = StoreError::Unavailable("disk full".to_string());
    assert_eq!(err.to_string(), "Session store unavailable: disk full");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::Io("permission denied".to_string()).to_string(),
        "Settings I/O error: permission denied"
    );
    assert_eq!(
        SettingsError::Serialization("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("drag.nope".to_string()).to_string(),
        "Invalid settings key: drag.nope"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected bool".to_string()).to_string(),
        "Invalid settings value: expected bool"
    );
}
