use digitduel_core::{ConfigError, LevelTable, Operator};
use digitduel_data::{load_levels, load_levels_or_builtin, LEVELS_FILE};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "digitduel_data_{tag}_{}_{}",
        std::process::id(),
        nanos
    ));
    fs::create_dir_all(&dir).expect("create dir");
    dir
}

fn write_levels(tag: &str, body: &str) -> PathBuf {
    let dir = scratch_dir(tag);
    fs::write(dir.join(LEVELS_FILE), body).expect("write levels");
    dir
}

#[test]
fn shipped_levels_match_builtin_table() {
    let table = load_levels(&assets_root().join(LEVELS_FILE)).expect("load shipped levels");
    assert_eq!(table, LevelTable::builtin());
}

#[test]
fn missing_file_falls_back_to_builtin() {
    let dir = scratch_dir("missing");
    let table = load_levels_or_builtin(&dir).expect("builtin");
    assert_eq!(table, LevelTable::builtin());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn custom_table_is_sorted_and_defaults_time_limit() {
    let dir = write_levels(
        "custom",
        r##"{"levels": [
            {"level": 2, "operators": ["multiply"], "digit_count": 3, "turn_time_limit_secs": 5, "title": "B", "color": "#000000"},
            {"level": 1, "operators": ["add", "divide"], "digit_count": 2, "title": "A", "color": "#FFFFFF"}
        ]}"##,
    );
    let table = load_levels_or_builtin(&dir).expect("custom");
    assert_eq!(table.max_level(), 2);
    assert_eq!(table.get(1).operators, vec![Operator::Add, Operator::Divide]);
    assert_eq!(table.get(1).turn_time_limit_secs, None);
    assert_eq!(table.get(2).turn_time_limit_secs, Some(5));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn invalid_table_reports_config_error() {
    let dir = write_levels(
        "invalid",
        r##"{"levels": [
            {"level": 1, "operators": ["add"], "digit_count": 4, "title": "A", "color": "#FFFFFF"}
        ]}"##,
    );
    let err = load_levels_or_builtin(&dir).expect_err("digit count 4");
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::InvalidDigitCount { level: 1, count: 4 })
    );
    assert!(format!("{err:#}").contains("validate"));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn malformed_json_names_the_file() {
    let dir = write_levels("malformed", "{\"levels\": [");
    let err = load_levels(&dir.join(LEVELS_FILE)).expect_err("malformed");
    assert!(err.to_string().starts_with("parse "));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unknown_operator_is_rejected() {
    let dir = write_levels(
        "operator",
        r##"{"levels": [
            {"level": 1, "operators": ["modulo"], "digit_count": 2, "title": "A", "color": "#FFFFFF"}
        ]}"##,
    );
    assert!(load_levels_or_builtin(&dir).is_err());
    let _ = fs::remove_dir_all(dir);
}
