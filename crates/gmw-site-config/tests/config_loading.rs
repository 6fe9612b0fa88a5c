//! Config loading tests for gmw-site-config.
// crates/gmw-site-config/tests/config_loading.rs
// =============================================================================
// Module: Config Loading Tests
// Description: Validate file resolution, limits, and parse failures.
// Purpose: Ensure configuration loading fails closed.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::fs;

use gmw_site_config::ConfigError;
use gmw_site_config::SiteConfig;
use gmw_site_config::StoreType;
use gmw_site_config::config_toml_example;
use gmw_site_store_sqlite::SqliteStoreMode;
use gmw_site_store_sqlite::SqliteSyncMode;
use tempfile::TempDir;

type TestResult = Result<(), String>;

fn write_config(dir: &TempDir, content: &str) -> Result<std::path::PathBuf, String> {
    let path = dir.path().join("gmw-site.toml");
    fs::write(&path, content).map_err(|err| err.to_string())?;
    Ok(path)
}

#[test]
fn example_config_loads_and_matches_defaults() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, &config_toml_example())?;
    let config = SiteConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    let defaults = SiteConfig::default();
    if config.server.bind != defaults.server.bind
        || config.server.max_body_bytes != defaults.server.max_body_bytes
        || config.store.path != defaults.store.path
        || config.store.busy_timeout_ms != defaults.store.busy_timeout_ms
    {
        return Err(format!("example diverges from defaults: {config:?}"));
    }
    Ok(())
}

#[test]
fn explicit_missing_file_is_an_error() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let missing = dir.path().join("absent.toml");
    match SiteConfig::load(Some(&missing)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn sqlite_settings_are_parsed() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(
        &dir,
        "[store]\ntype = \"sqlite\"\npath = \"site.db\"\nbusy_timeout_ms = 250\njournal_mode = \
         \"delete\"\nsync_mode = \"normal\"\n",
    )?;
    let config = SiteConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    let sqlite = config.store.sqlite_config().ok_or("expected sqlite config")?;
    if config.store.store_type != StoreType::Sqlite
        || sqlite.busy_timeout_ms != 250
        || sqlite.journal_mode != SqliteStoreMode::Delete
        || sqlite.sync_mode != SqliteSyncMode::Normal
    {
        return Err(format!("unexpected sqlite config: {sqlite:?}"));
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, "[server]\nbind = \"127.0.0.1:2022\"\nport = 80\n")?;
    match SiteConfig::load(Some(&path)) {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

#[test]
fn invalid_bind_is_rejected() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = write_config(&dir, "[server]\nbind = \"localhost\"\n")?;
    match SiteConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("server.bind") => Ok(()),
        other => Err(format!("expected invalid bind, got {other:?}")),
    }
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    let path = write_config(&dir, &padding)?;
    match SiteConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size limit error, got {other:?}")),
    }
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("gmw-site.toml");
    fs::write(&path, [0xff_u8, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    match SiteConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        other => Err(format!("expected utf-8 error, got {other:?}")),
    }
}

#[test]
fn explicit_origins_are_accepted() -> TestResult {
    let config = SiteConfig::from_toml_str(
        "[server.cors]\nallowed_origins = [\"https://gmwtechgroup.com\", \"http://localhost:3000\"]\n",
    )
    .map_err(|err| err.to_string())?;
    if config.server.cors.allows_any_origin() {
        return Err("explicit origins must not allow any origin".to_string());
    }
    Ok(())
}
