use std::sync::Arc;

use iniconf::errors::ConfigError;
use iniconf::fs::mock::MockFileSystem;
use iniconf::ConfigStore;

#[test]
fn test_open_and_save_through_mock_fs() {
    let fs = MockFileSystem::new();
    fs.add_file("/etc/app.ini", "[db]\nhost=localhost\nport = 5432\n");

    let mut store = ConfigStore::open_with(Arc::new(fs.clone()), "/etc/app.ini").unwrap();
    assert_eq!(store.get_integer("db", "port").unwrap(), 5432);

    store.replace_section("db", [("host", "db.internal")]).unwrap();
    store.save().unwrap();

    assert_eq!(
        fs.contents("/etc/app.ini").unwrap(),
        "[db]\nhost = db.internal\n\n"
    );
}

#[test]
fn test_mock_missing_file_uses_absolute_path() {
    let fs = MockFileSystem::new();
    let err = ConfigStore::open_with(Arc::new(fs), "conf/app.ini").unwrap_err();
    assert_eq!(err.code(), 2);
    assert_eq!(err.to_string(), "Cannot locate config file: /mock/conf/app.ini");
}

#[test]
fn test_failed_save_is_io_error_and_keeps_memory_state() {
    let fs = MockFileSystem::new();
    fs.add_file("/etc/app.ini", "[db]\nhost = a\n");

    let mut store = ConfigStore::open_with(Arc::new(fs.clone()), "/etc/app.ini").unwrap();
    store.merge_section("db", [("host", "b")]).unwrap();

    fs.set_read_only(true);
    let err = store.save().unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().contains("Permission denied"));

    assert_eq!(store.get_string("db", "host").unwrap(), "b");
    assert_eq!(fs.contents("/etc/app.ini").unwrap(), "[db]\nhost = a\n");
}

#[test]
fn test_invalid_utf8_is_io_error() {
    let fs = MockFileSystem::new();
    fs.add_file("/bad.ini", vec![b'[', 0xff, b']']);

    let err = ConfigStore::open_with(Arc::new(fs), "/bad.ini").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
