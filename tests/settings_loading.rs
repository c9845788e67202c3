//! Settings file loading tests.
//!
//! Run with: cargo test settings_loading

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use lucky_seven::{Controller, Settings, SettingsError};

fn settings_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(text.as_bytes()).expect("write settings");
    file
}

#[test]
fn test_load_full_file() {
    let file = settings_file(
        r#"{
            "SQUAD_MEMBERS_SUBTRACTION": 0,
            "THREAT_COUNT_TOTAL": 20,
            "THREAT_COUNT_MAPPING": {"0": 2, "1": 4, "2": 4, "3": 4, "4": 3, "5": 3},
            "THREAT_CANNOT_ATTACK_AT_ZERO_STRENGTH": true,
            "FINAL_TURNS_INCREASE_FROM_DEFEATED_SQUAD_MEMBERS": true,
            "SELECTABLE_COLUMN_FOR_ENCOUNTERED_THREATS": true
        }"#,
    );
    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(settings.squad_members_subtraction, 0);
    assert_eq!(settings.threat_count_total, 20);
    assert_eq!(settings.threat_count_mapping.tank, 2);
    assert_eq!(settings.threat_count_mapping.mortar, 3);
    assert!(settings.threat_cannot_attack_at_zero_strength);
    assert!(settings.final_turns_increase_from_defeated_squad_members);
    assert!(settings.selectable_column_for_encountered_threats);
}

#[test]
fn test_missing_keys_take_defaults() {
    let file = settings_file(r#"{"THREAT_COUNT_TOTAL": 10}"#);
    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(
        settings,
        Settings {
            threat_count_total: 10,
            ..Settings::default()
        }
    );
}

#[test]
fn test_empty_object_is_default() {
    let file = settings_file("{}");
    assert_eq!(Settings::load(file.path()).unwrap(), Settings::default());
}

#[test]
fn test_saved_settings_load_back() {
    let settings = Settings {
        squad_members_subtraction: 3,
        selectable_column_for_encountered_threats: true,
        ..Settings::default()
    };
    let file = settings_file(&settings.to_json().unwrap());
    assert_eq!(Settings::load(file.path()).unwrap(), settings);
}

#[test]
fn test_bad_json_is_parse_error() {
    let file = settings_file(r#"{"THREAT_COUNT_TOTAL": "lots"}"#);
    let err = Settings::load(file.path()).unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)), "{err}");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Settings::load(&path).unwrap_err();
    match err {
        SettingsError::Io { path: reported, .. } => assert_eq!(reported, path),
        SettingsError::Parse(e) => panic!("expected an I/O error, got {e}"),
    }
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let file = settings_file(
        r#"{"SQUAD_MEMBERS_SUBTRACTION": 9, "THREAT_COUNT_TOTAL": 0, "THREAT_COUNT_MAPPING": {"1": 99}}"#,
    );
    let settings = Settings::load(file.path()).unwrap().normalised();
    assert_eq!(settings.squad_members_subtraction, 7);
    assert_eq!(settings.threat_count_total, 1);
    assert_eq!(settings.threat_count_mapping.infantry1, 12);

    let controller = Controller::new(settings, 5);
    assert_eq!(controller.state().squad.len(), 1);
    assert_eq!(controller.state().threats.len(), 1);
}
