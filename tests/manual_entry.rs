use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use hamlog::{
    config::AppConfig,
    entry::{
        ManualEntry, UserInputError, build_draft, parse_entry_timestamp, parse_frequency,
        validate_grid_locator,
    },
    export::{export_file_name, today_file_name},
    qso::StationConfig,
};

fn station() -> StationConfig {
    StationConfig {
        my_call: "EA1XYZ".to_string(),
        power: "100".to_string(),
        ..StationConfig::default()
    }
}

fn entry() -> ManualEntry {
    ManualEntry {
        contact_call: " k1abc ".to_string(),
        frequency: 14.2505,
        mode: "ssb".to_string(),
        timestamp: parse_entry_timestamp("2024-01-15 09:30").ok(),
        name: "Ann".to_string(),
        grid_locator: "fn42aa99".to_string(),
        ..ManualEntry::default()
    }
}

#[test]
fn draft_derives_band_power_and_comment() {
    let draft = build_draft(&entry(), &station()).expect("draft");
    assert_eq!(draft.my_call, "EA1XYZ");
    assert_eq!(draft.contact_call, "K1ABC");
    assert_eq!(draft.mode, "SSB");
    assert_eq!(draft.band, "20m");
    assert_eq!(draft.power, Some(100.0));
    assert_eq!(draft.comment.as_deref(), Some("Thanks Ann for the contact, 73!"));
    assert_eq!(draft.grid_locator, "FN42AA");
    assert_eq!(draft.rst_sent, None);
    assert_eq!(draft.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 09:30:00");
}

#[test]
fn out_of_plan_frequency_gets_formatted_band() {
    let draft = build_draft(
        &ManualEntry {
            frequency: 15.0,
            ..entry()
        },
        &station(),
    )
    .expect("draft");
    assert_eq!(draft.band, "15.000MHz");
}

#[test]
fn explicit_power_and_comment_win() {
    let draft = build_draft(
        &ManualEntry {
            power: "5".to_string(),
            comment: "portable".to_string(),
            ..entry()
        },
        &station(),
    )
    .expect("draft");
    assert_eq!(draft.power, Some(5.0));
    assert_eq!(draft.comment.as_deref(), Some("portable"));
}

#[test]
fn bad_input_is_reported() {
    assert_eq!(
        build_draft(&entry(), &StationConfig::default()),
        Err(UserInputError::StationNotConfigured)
    );
    assert_eq!(
        build_draft(
            &ManualEntry {
                power: "lots".to_string(),
                ..entry()
            },
            &station()
        ),
        Err(UserInputError::Power("lots".to_string()))
    );
    assert_eq!(parse_frequency("abc"), Err(UserInputError::Frequency("abc".to_string())));
    assert_eq!(parse_frequency(" 7.074 "), Ok(7.074));
    assert!(matches!(parse_entry_timestamp("15/01/2024"), Err(UserInputError::Timestamp(_))));
    assert!(parse_entry_timestamp("2024-01-15 09:30:15").is_ok());
    assert!(parse_entry_timestamp("").is_ok());
}

#[test]
fn grid_locator_rules() {
    assert_eq!(validate_grid_locator("in53ab"), Ok("IN53AB".to_string()));
    assert_eq!(validate_grid_locator("IN53"), Ok("IN53".to_string()));
    assert_eq!(validate_grid_locator(""), Ok(String::new()));
    assert!(validate_grid_locator("IN5").is_err());
    assert!(validate_grid_locator("1N53").is_err());
}

#[test]
fn file_names() {
    assert_eq!(export_file_name("field_day"), "field_day.adi");
    assert_eq!(export_file_name("  "), "hamradio_logbook.adi");
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
    assert_eq!(today_file_name(date), "logbook_2024-03-09.adi");
}

#[test]
fn config_defaults_and_overrides() {
    let config = AppConfig::from_toml_str("", Path::new("hamlog.toml")).expect("empty config");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.database_path, PathBuf::from("hamradio_logbook.db"));
    assert!(!config.export_options().measure_freq_length);

    let config = AppConfig::from_toml_str(
        "database_path = \"/tmp/log.db\"\nlog_level = \"debug\"\n[export]\nmeasure_freq_length = true\n",
        Path::new("hamlog.toml"),
    )
    .expect("config");
    assert_eq!(config.database_path, PathBuf::from("/tmp/log.db"));
    assert_eq!(config.log_level, "debug");
    assert!(config.export_options().measure_freq_length);

    let config = config.with_database_override(None);
    assert_eq!(config.database_path, PathBuf::from("/tmp/log.db"));
    let config = config.with_database_override(Some(PathBuf::from("cli.db")));
    assert_eq!(config.database_path, PathBuf::from("cli.db"));

    assert!(AppConfig::from_toml_str("log_level = 3", Path::new("bad.toml")).is_err());
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempfile::tempdir().expect("tmp");
    assert!(AppConfig::load(Some(&dir.path().join("missing.toml"))).is_err());

    let path = dir.path().join("hamlog.toml");
    std::fs::write(&path, "export_dir = \"out\"\n").expect("write");
    let config = AppConfig::load(Some(&path)).expect("load");
    assert_eq!(config.export_dir, PathBuf::from("out"));
}
