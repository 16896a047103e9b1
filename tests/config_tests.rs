//! Tests for save-file configuration.

use std::collections::HashMap;
use std::path::PathBuf;

use focal::config::{ConfigError, SAVE_DIR_KEY, SaveConfig, TOKEN_LENGTH_KEY};
use focal::storage::SaveFileLens;
use rstest::rstest;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();
    move |key| values.get(key).cloned()
}

#[rstest]
fn all_values_are_read() {
    let config = SaveConfig::from_lookup(lookup_from(&[
        (SAVE_DIR_KEY, "/var/saves"),
        (TOKEN_LENGTH_KEY, "10"),
    ]))
    .unwrap();

    assert_eq!(
        config,
        SaveConfig {
            save_dir: PathBuf::from("/var/saves"),
            token_length: 10,
        }
    );
}

#[rstest]
fn unrelated_keys_are_ignored() {
    let config = SaveConfig::from_lookup(lookup_from(&[("HOME", "/root")])).unwrap();
    assert_eq!(config, SaveConfig::default());
    assert_eq!(config.save_dir, PathBuf::from("."));
    assert_eq!(config.token_length, 6);
}

#[rstest]
#[case("0", "Invalid value for FOCAL_TOKEN_LENGTH: must be between 1 and 32")]
#[case("64", "Invalid value for FOCAL_TOKEN_LENGTH: must be between 1 and 32")]
fn out_of_range_token_length_is_rejected(#[case] value: &str, #[case] message: &str) {
    let error = SaveConfig::from_lookup(lookup_from(&[(TOKEN_LENGTH_KEY, value)])).unwrap_err();
    assert_eq!(error.to_string(), message);
}

#[rstest]
fn non_numeric_token_length_names_the_key() {
    let error = SaveConfig::from_lookup(lookup_from(&[(TOKEN_LENGTH_KEY, "lots")])).unwrap_err();
    assert!(matches!(error, ConfigError::InvalidValue { ref key, .. } if key == TOKEN_LENGTH_KEY));
}

#[rstest]
fn empty_save_dir_is_rejected() {
    let error = SaveConfig::from_lookup(lookup_from(&[(SAVE_DIR_KEY, "")])).unwrap_err();
    assert_eq!(
        error,
        ConfigError::InvalidValue {
            key: SAVE_DIR_KEY.to_string(),
            message: "must not be empty".to_string(),
        }
    );
}

#[rstest]
fn configured_lens_uses_the_save_dir() {
    let directory = tempfile::tempdir().unwrap();
    let save_dir = directory.path().to_string_lossy().into_owned();
    let config = SaveConfig::from_lookup(lookup_from(&[(SAVE_DIR_KEY, save_dir.as_str())])).unwrap();

    let saves = SaveFileLens::from_config(&config);
    assert_eq!(saves.store().root(), directory.path());
}
