use super::{apply_env, apply_file, load_settings, normalize_server_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_dir(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("inquiry_cli_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();

    apply_file(
        &mut settings,
        r#"
server_url = "http://index.internal:9000"
trusted_detail_markup = true
"#,
    )
    .expect("parse");

    assert_eq!(settings.server_url, "http://index.internal:9000");
    assert!(settings.trusted_detail_markup);
    assert_eq!(settings.log_filter, "info");
    assert_eq!(settings.any_category_label, "すべて");
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "server_url = [").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_with_app_prefix_winning() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("INQUIRY_SERVER_URL", "http://one:8000"),
        ("APP__SERVER_URL", "http://two:8000"),
        ("APP__LOG_FILTER", "debug"),
        ("APP__TRUSTED_DETAIL_MARKUP", "yes"),
    ]);
    let mut settings = Settings::default();

    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://two:8000");
    assert_eq!(settings.log_filter, "debug");
    // Not a bool; previous value kept.
    assert!(!settings.trusted_detail_markup);
}

#[test]
fn server_url_is_trimmed_and_validated() {
    assert_eq!(
        normalize_server_url(" http://localhost:8000/ ").expect("valid"),
        "http://localhost:8000"
    );
    assert!(normalize_server_url("localhost:8000").is_err());
    assert!(normalize_server_url("ftp://localhost").is_err());
    assert!(normalize_server_url("").is_err());
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = temp_dir("missing");
    let error = load_settings(Some(&dir.join("absent.toml"))).expect_err("missing file");
    assert!(error.to_string().contains("absent.toml"));
    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn loads_settings_from_explicit_file() {
    let dir = temp_dir("load");
    let path = dir.join("inquiry.toml");
    fs::write(
        &path,
        "log_filter = \"client_core=debug\"\nany_category_label = \"All\"\n",
    )
    .expect("write config");

    let settings = load_settings(Some(&path)).expect("settings");

    assert_eq!(settings.log_filter, "client_core=debug");
    assert_eq!(settings.any_category_label, "All");

    fs::remove_dir_all(dir).expect("cleanup");
}
