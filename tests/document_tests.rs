use std::fs;

use keyed_config::Document;
use tempfile::TempDir;
use toml::Value;

/// Helper to create a temporary directory for tests
fn temp_config_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

const SAMPLE: &str = r#"
title = "sample"

[server]
host = "localhost"
port = 8080
ratio = 0.75
enabled = true
tags = ["a", "b"]

[server.limits]
depth = 3
"#;

#[test]
fn test_dot_paths_reach_nested_values() {
    let doc = Document::parse(SAMPLE).expect("Failed to parse document");

    assert_eq!(doc.get_str("title"), Some("sample"));
    assert_eq!(doc.get_str("server.host"), Some("localhost"));
    assert_eq!(doc.get_int("server.port"), Some(8080));
    assert_eq!(doc.get_float("server.ratio"), Some(0.75));
    assert_eq!(doc.get_bool("server.enabled"), Some(true));
    assert_eq!(doc.get_int("server.limits.depth"), Some(3));
}

#[test]
fn test_typed_probes_reject_wrong_kinds() {
    let doc = Document::parse(SAMPLE).expect("Failed to parse document");

    assert_eq!(doc.get_int("server.host"), None);
    assert_eq!(doc.get_str("server.port"), None);
    assert_eq!(doc.get_bool("server.ratio"), None);
    // An integer is not a float.
    assert_eq!(doc.get_float("server.port"), None);
    assert_eq!(doc.get_str("server.missing"), None);
}

#[test]
fn test_has_table() {
    let doc = Document::parse(SAMPLE).expect("Failed to parse document");

    assert!(doc.has_table("server"));
    assert!(doc.has_table("server.limits"));
    assert!(!doc.has_table("server.host"), "a string is not a table");
    assert!(!doc.has_table("nope"));
}

#[test]
fn test_string_list_stringifies_scalars() {
    let doc = Document::parse("mixed = [\"a\", 1, true, 0.5, [\"nested\"]]\n")
        .expect("Failed to parse document");

    assert_eq!(
        doc.get_string_list("mixed"),
        Some(vec![
            "a".to_string(),
            "1".to_string(),
            "true".to_string(),
            "0.5".to_string(),
        ])
    );
}

#[test]
fn test_get_array_returns_raw_values() {
    let doc = Document::parse("items = [1, \"x\", 2]\n").expect("Failed to parse document");

    let items = doc.get_array("items").expect("items array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], Value::Integer(1));
}

#[test]
fn test_set_creates_intermediate_tables() {
    let mut doc = Document::new();

    doc.set("a.b.c", Value::Integer(7));

    assert!(doc.has_table("a"));
    assert!(doc.has_table("a.b"));
    assert_eq!(doc.get_int("a.b.c"), Some(7));
}

#[test]
fn test_set_replaces_non_table_intermediates() {
    let mut doc = Document::parse("a = 1\n").expect("Failed to parse document");

    doc.set("a.b", Value::Boolean(true));

    assert!(doc.has_table("a"));
    assert_eq!(doc.get_bool("a.b"), Some(true));
}

#[test]
fn test_set_overwrites_existing_values() {
    let mut doc = Document::parse("[server]\nport = 8080\n").expect("Failed to parse document");

    doc.set("server.port", Value::Integer(9090));

    assert_eq!(doc.get_int("server.port"), Some(9090));
}

#[test]
fn test_write_and_read_round_trip() {
    let dir = temp_config_dir();
    let path = dir.path().join("doc.toml");

    let mut doc = Document::new();
    doc.set("server.host", Value::String("localhost".to_string()));
    doc.set("server.port", Value::Integer(8080));
    doc.write_to(&path).expect("Failed to write document");

    let reread = Document::read_from(&path).expect("Failed to read document");
    assert_eq!(reread.get_str("server.host"), Some("localhost"));
    assert_eq!(reread.get_int("server.port"), Some(8080));
}

#[test]
fn test_read_missing_file_yields_empty_document() {
    let dir = temp_config_dir();
    let path = dir.path().join("missing.toml");

    let doc = Document::read_from(&path).expect("Failed to read document");
    assert_eq!(doc.get_str("anything"), None);
    assert!(!path.exists());
}

#[test]
fn test_read_rejects_invalid_toml() {
    let dir = temp_config_dir();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "not toml = = =").expect("Failed to write file");

    assert!(Document::read_from(&path).is_err());
}

#[test]
fn test_write_creates_parent_directories() {
    let dir = temp_config_dir();
    let path = dir.path().join("plugins").join("app").join("config.toml");

    Document::new().write_to(&path).expect("Failed to write document");

    assert!(path.exists());
}

#[test]
fn test_atomic_write_leaves_no_temp_files() {
    let dir = temp_config_dir();
    let path = dir.path().join("doc.toml");

    let mut doc = Document::new();
    doc.set("key", Value::String("value".to_string()));
    doc.write_to(&path).expect("Failed to write document");
    doc.write_to(&path).expect("Failed to rewrite document");

    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("Failed to read dir")
        .filter_map(|e| e.ok())
        .collect();

    assert_eq!(entries.len(), 1, "only the document itself remains");
}
