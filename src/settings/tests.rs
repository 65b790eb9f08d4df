use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use itemsel::ItemId;
use tempfile::TempDir;

use super::load;
use super::raw::RawConfig;
use super::sources::default_config_files;
use crate::cli::CliArgs;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn cli_with_config(path: &Path, extra: &[&str]) -> CliArgs {
    let mut args = vec!["itemsel", "-n", "-c", path.to_str().expect("utf-8 path")];
    args.extend_from_slice(extra);
    CliArgs::parse_from(args)
}

#[test]
fn default_files_include_current_directory_variants() {
    let files = default_config_files();
    assert!(files.iter().any(|path| path.ends_with(".itemsel.toml")));
    assert!(files.iter().any(|path| path.ends_with("itemsel.toml")));
}

#[test]
fn cli_overrides_take_precedence() {
    let cli = CliArgs::parse_from([
        "itemsel",
        "--catalog",
        "/tmp/items.ljson",
        "-q",
        "/tmp/query.json",
        "-i",
        "4151",
        "-t",
        "Weapon",
    ]);

    let mut config = RawConfig::default();
    config.query.item_id = Some(1);
    config.ui.title = Some("Item".into());
    config.apply_cli_overrides(&cli);

    assert_eq!(config.source.catalog, cli.catalog);
    assert_eq!(config.query.file, cli.query_file);
    assert_eq!(config.query.item_id, Some(4151));
    assert_eq!(config.ui.title.as_deref(), Some("Weapon"));
}

#[test]
fn loads_sections_from_config_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
[source]
catalog = "/srv/items.ljson"
search_limit = 5

[query]
ref_id = "B"
item_id = 42

[ui]
placeholder = "Pick one"

[log]
filter = "debug"
file = "/tmp/itemsel-test.log"
"#,
    );

    let resolved = load(&cli_with_config(&path, &[])).expect("load");
    assert_eq!(resolved.catalog, PathBuf::from("/srv/items.ljson"));
    assert_eq!(resolved.search_limit, 5);
    assert_eq!(resolved.ref_id, "B");
    assert_eq!(resolved.item_id, Some(ItemId::new(42)));
    assert_eq!(resolved.ui.title, "Item");
    assert_eq!(resolved.ui.placeholder, "Pick one");
    assert_eq!(resolved.log_filter, "debug");
    assert_eq!(resolved.log_file, PathBuf::from("/tmp/itemsel-test.log"));
    assert_eq!(resolved.query_file, None);
}

#[test]
fn cli_flags_override_config_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        "[source]\ncatalog = \"/srv/items.ljson\"\n[query]\nitem_id = 42\n[log]\nfile = \"/tmp/x.log\"\n",
    );

    let resolved =
        load(&cli_with_config(&path, &["--catalog", "/other.ljson", "-i", "7"])).expect("load");
    assert_eq!(resolved.catalog, PathBuf::from("/other.ljson"));
    assert_eq!(resolved.item_id, Some(ItemId::new(7)));
}

#[test]
fn rejects_zero_search_limit() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        "[source]\ncatalog = \"/srv/items.ljson\"\nsearch_limit = 0\n[log]\nfile = \"/tmp/x.log\"\n",
    );

    let err = load(&cli_with_config(&path, &[])).expect_err("zero limit");
    assert!(err.to_string().contains("search_limit"));
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent.toml");

    assert!(load(&cli_with_config(&missing, &[])).is_err());
}
