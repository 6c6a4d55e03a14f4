use std::error::Error;
use std::fs;

use clap::Parser;
use iniconf::cli::CliArgs;
use iniconf::errors::ConfigError;
use iniconf::run;
use iniconf_test_utils::builders::IniBuilder;

type TestResult = Result<(), Box<dyn Error>>;

fn args(config: &std::path::Path, rest: &[&str]) -> CliArgs {
    let mut argv = vec!["iniconf", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(rest);
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn set_merges_and_saves() -> TestResult {
    let file = IniBuilder::new()
        .section("db")
        .option("host", "a")
        .option("port", "1")
        .write_temp()?;

    run(args(file.path(), &["set", "db", "port=5432", "user=app"]))?;

    assert_eq!(
        fs::read_to_string(file.path())?,
        "[db]\nhost = a\nport = 5432\nuser = app\n\n"
    );
    Ok(())
}

#[test]
fn set_with_replace_drops_old_options() -> TestResult {
    let file = IniBuilder::new()
        .section("db")
        .option("host", "a")
        .write_temp()?;

    run(args(file.path(), &["set", "db", "port=5432", "--replace"]))?;

    assert_eq!(fs::read_to_string(file.path())?, "[db]\nport = 5432\n\n");
    Ok(())
}

#[test]
fn validate_reports_first_failure() -> TestResult {
    let file = IniBuilder::new()
        .section("db")
        .option("port", "abc")
        .write_temp()?;

    let ok = run(args(file.path(), &["validate", "--require", "db:port"]));
    assert!(ok.is_ok());

    let err = run(args(file.path(), &["validate", "--require", "db:port:int"])).unwrap_err();
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Validation(failure)) => {
            assert_eq!(failure.descriptor(), ("db", Some("port"), Some("integer".to_string())));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn validate_reads_schema_file() -> TestResult {
    let file = IniBuilder::new()
        .section("db")
        .option("enabled", "yes")
        .write_temp()?;
    let schema = tempfile::NamedTempFile::new()?;
    fs::write(
        schema.path(),
        "[[section]]\nname = \"db\"\noptions = [{ name = \"enabled\", type = \"bool\" }]\n",
    )?;

    let err = run(args(
        file.path(),
        &["validate", "--schema", schema.path().to_str().unwrap()],
    ))
    .unwrap_err();
    assert!(err.to_string().contains("must be boolean"));
    Ok(())
}

#[test]
fn missing_config_keeps_code_two() -> TestResult {
    let dir = tempfile::tempdir()?;
    let err = run(args(&dir.path().join("none.ini"), &["sections"])).unwrap_err();
    let code = err.downcast_ref::<ConfigError>().map(ConfigError::code);
    assert_eq!(code, Some(2));
    Ok(())
}

#[test]
fn read_commands_succeed() -> TestResult {
    let file = IniBuilder::new()
        .section("db")
        .option("port", "5432")
        .option("tls", "on")
        .write_temp()?;

    run(args(file.path(), &["get", "db", "port", "--as", "int"]))?;
    run(args(file.path(), &["get", "db", "tls", "--as", "bool"]))?;
    run(args(file.path(), &["list", "db"]))?;
    run(args(file.path(), &["options", "db"]))?;
    run(args(file.path(), &["sections"]))?;

    assert!(run(args(file.path(), &["get", "db", "tls", "--as", "int"])).is_err());
    Ok(())
}

#[test]
fn require_joins_the_schema_entry_for_its_section() -> TestResult {
    let file = IniBuilder::new()
        .section("db")
        .option("port", "abc")
        .write_temp()?;
    let schema = tempfile::NamedTempFile::new()?;
    fs::write(
        schema.path(),
        "[[section]]\nname = \"db\"\n\n[[section]]\nname = \"cache\"\n",
    )?;

    let err = run(args(
        file.path(),
        &[
            "validate",
            "--schema",
            schema.path().to_str().unwrap(),
            "--require",
            "db:port:int",
        ],
    ))
    .unwrap_err();
    // The db option fails before the later schema section is looked at.
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Validation(failure)) => {
            assert_eq!(failure.descriptor(), ("db", Some("port"), Some("integer".to_string())));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    Ok(())
}
