use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use hamlog::{
    adif::ExportOptions,
    export::{ExportOutcome, ExportScope, export_logbook},
    import::import_adif,
    persist::{ContactStore, sqlite::SqliteContactStore},
    qso::{ContactDraft, StationConfig},
};

fn ts(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .expect("valid timestamp")
}

fn draft(call: &str, timestamp: NaiveDateTime) -> ContactDraft {
    ContactDraft {
        my_call: "EA1XYZ".to_string(),
        contact_call: call.to_string(),
        frequency: Some(7.074),
        band: "40m".to_string(),
        mode: "FT8".to_string(),
        timestamp,
        rst_sent: Some("-10".to_string()),
        rst_received: None,
        comment: None,
        qth: None,
        name: Some("Ann".to_string()),
        power: Some(20.0),
        grid_locator: "IN53".to_string(),
    }
}

#[test]
fn contacts_survive_reopen() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("log.db");

    let mut store = SqliteContactStore::open(&db_path).expect("open sqlite");
    let id1 = store.insert_contact(&draft("W1AW", ts(15, 9, 30))).expect("insert1");
    let id2 = store.insert_contact(&draft("K1ABC", ts(14, 8, 0))).expect("insert2");
    assert_eq!((id1, id2), (1, 2));
    drop(store);

    let reopened = SqliteContactStore::open(&db_path).expect("reopen");
    let all = reopened.select_all().expect("select");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].contact_call, "W1AW");
    assert_eq!(all[0].timestamp, ts(15, 9, 30));
    assert_eq!(all[0].frequency, Some(7.074));
    assert_eq!(all[0].power, Some(20.0));
    assert_eq!(all[0].rst_received, None);
    assert_eq!(all[0].grid_locator, "IN53");

    let listed: Vec<String> = reopened
        .select_by_timestamp_desc()
        .expect("list")
        .into_iter()
        .map(|r| r.contact_call)
        .collect();
    assert_eq!(listed, vec!["W1AW", "K1ABC"]);

    let one = reopened.get_contact(id2).expect("get").expect("present");
    assert_eq!(one.contact_call, "K1ABC");
    assert!(reopened.get_contact(99).expect("get").is_none());
}

#[test]
fn count_matching_compares_to_the_second() {
    let mut store = SqliteContactStore::open_in_memory().expect("open");
    store.insert_contact(&draft("W1AW", ts(15, 9, 30))).expect("insert");

    assert_eq!(store.count_matching("W1AW", "2024-01-15 09:30:00").expect("count"), 1);
    assert_eq!(store.count_matching("W1AW", "2024-01-15 09:30:00.123").expect("count"), 1);
    assert_eq!(store.count_matching("W1AW", "2024-01-15 09:30:01").expect("count"), 0);
    assert_eq!(store.count_matching("K1ABC", "2024-01-15 09:30:00").expect("count"), 0);
}

#[test]
fn created_today_uses_store_clock() {
    let mut store = SqliteContactStore::open_in_memory().expect("open");
    store.insert_contact(&draft("W1AW", ts(15, 9, 30))).expect("insert");
    store.insert_contact(&draft("K1ABC", ts(1, 9, 30))).expect("insert");

    let created = store.select_all().expect("select")[0].created_at.date();
    let today = store.select_created_on(created).expect("today");
    assert_eq!(today.len(), 2);
    // Same-second inserts fall back to id order, newest first.
    assert_eq!(today[0].contact_call, "K1ABC");

    let long_ago = NaiveDate::from_ymd_opt(2000, 1, 1).expect("date");
    assert!(store.select_created_on(long_ago).expect("past").is_empty());
}

#[test]
fn latest_station_config_wins() {
    let mut store = SqliteContactStore::open_in_memory().expect("open");
    assert_eq!(store.station_config().expect("default"), StationConfig::default());
    assert!(store.latest_station_config().expect("none").is_none());

    let first = StationConfig {
        my_call: "EA1XYZ".to_string(),
        power: "100".to_string(),
        ..StationConfig::default()
    };
    let second = StationConfig {
        my_call: "EA1NEW".to_string(),
        grid_locator: "IN53".to_string(),
        ..first.clone()
    };
    store.insert_station_config(&first).expect("save");
    store.insert_station_config(&second).expect("save");

    let active = store.station_config().expect("active");
    assert_eq!(active, second);
    assert_eq!(active.default_power(), Some(100.0));
}

#[test]
fn import_dedups_against_sqlite() {
    let mut store = SqliteContactStore::open_in_memory().expect("open");
    store.insert_contact(&draft("W1AW", ts(15, 9, 30))).expect("insert");

    let text = "<EOH><CALL:4>W1AW <BAND:3>40m <MODE:3>FT8 <QSO_DATE:8>20240115 <TIME_ON:4>0930 <EOR>\n\
                <CALL:4>W1AW <BAND:3>40m <MODE:3>FT8 <QSO_DATE:8>20240115 <TIME_ON:4>0931 <EOR>\n";
    let tally = import_adif(&mut store, text).expect("import");
    assert_eq!((tally.imported, tally.duplicates), (1, 1));
    assert_eq!(store.select_all().expect("select").len(), 2);
}

#[test]
fn export_all_and_today_write_files() {
    let tmp = TempDir::new().expect("tmp");
    let mut store = SqliteContactStore::open_in_memory().expect("open");

    let local_date = NaiveDate::from_ymd_opt(2031, 7, 4).expect("date");
    let today = ExportScope::CreatedToday { local_date };
    let today_path = tmp.path().join("today.adi");
    let outcome = export_logbook(&store, today, &today_path, &ExportOptions::default())
        .expect("export today");
    assert_eq!(outcome, ExportOutcome::Empty);
    assert!(!today_path.exists());

    let all_path = tmp.path().join("all.adi");
    let outcome = export_logbook(&store, ExportScope::All, &all_path, &ExportOptions::default())
        .expect("export empty");
    assert_eq!(outcome, ExportOutcome::Written { count: 0, path: all_path.clone() });
    let text = std::fs::read_to_string(&all_path).expect("read");
    assert!(text.starts_with("HamRadio Logbook Export\n"));
    assert!(!text.contains("<EOR>"));

    store.insert_contact(&draft("W1AW", ts(15, 9, 30))).expect("insert");
    store.insert_contact(&draft("K1ABC", ts(15, 9, 45))).expect("insert");

    let outcome = export_logbook(&store, today, &today_path, &ExportOptions::default())
        .expect("export today");
    assert_eq!(outcome, ExportOutcome::Written { count: 2, path: today_path.clone() });
    let text = std::fs::read_to_string(&today_path).expect("read");
    assert!(text.starts_with("HamRadio Logbook Export - Entries of 2031-07-04\n"));
    assert_eq!(text.matches("<EOR>").count(), 2);
    assert!(text.contains("<FREQ:8>7.074000 "));
}
