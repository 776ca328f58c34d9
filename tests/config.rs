use std::path::PathBuf;
use clap::Parser;
use metascrub::cli::Args;
use metascrub::config::{load_config, Config, FileConfig};

fn make_args(port: Option<u16>, roots: Vec<PathBuf>) -> Args {
    Args {
        roots,
        port,
        config: None,
        localhost: false,
        ffprobe: None,
        sanitizer: vec![],
        static_dir: None,
    }
}

#[test]
fn test_defaults_when_nothing_set() {
    let args = make_args(None, vec![PathBuf::from("/media")]);
    let config = Config::resolve(None, &args);
    assert_eq!(config.port, 3000);
    assert_eq!(config.roots, vec![PathBuf::from("/media")]);
    assert_eq!(config.ffprobe, "ffprobe");
    assert_eq!(config.sanitizer, vec!["python3", "clean_metadata.py"]);
    assert!(!config.localhost);
    assert!(config.static_dir.is_none());
}

#[test]
fn test_cli_flag_overrides_default() {
    let args = make_args(Some(9000), vec![]);
    let config = Config::resolve(None, &args);
    assert_eq!(config.port, 9000);
}

#[test]
fn test_toml_overrides_default() {
    let file = FileConfig { port: Some(7777), ..Default::default() };
    let config = Config::resolve(Some(file), &make_args(None, vec![]));
    assert_eq!(config.port, 7777);
}

#[test]
fn test_cli_overrides_toml() {
    let file = FileConfig {
        port: Some(7777),
        roots: Some(vec![PathBuf::from("/from/toml")]),
        ..Default::default()
    };
    let args = make_args(Some(9000), vec![PathBuf::from("/from/cli")]);
    let config = Config::resolve(Some(file), &args);
    assert_eq!(config.port, 9000); // CLI wins
    assert_eq!(config.roots, vec![PathBuf::from("/from/cli")]);
}

#[test]
fn test_toml_roots_used_without_cli_roots() {
    let file = FileConfig {
        roots: Some(vec![PathBuf::from("/a"), PathBuf::from("/b")]),
        ..Default::default()
    };
    let config = Config::resolve(Some(file), &make_args(None, vec![]));
    assert_eq!(config.roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
}

#[test]
fn test_roots_are_trimmed_and_blank_entries_dropped() {
    let args = make_args(
        None,
        vec![PathBuf::from("/a"), PathBuf::from(" /b "), PathBuf::from("")],
    );
    let config = Config::resolve(None, &args);
    assert_eq!(config.roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
}

#[test]
fn test_empty_toml_sanitizer_falls_back_to_default() {
    let file = FileConfig { sanitizer: Some(vec![]), ..Default::default() };
    let config = Config::resolve(Some(file), &make_args(None, vec![]));
    assert_eq!(config.sanitizer, vec!["python3", "clean_metadata.py"]);
}

#[test]
fn test_toml_parse() {
    let toml_str = r#"
port = 9000
roots = ["/srv/videos", "/mnt/usb"]
sanitizer = ["/opt/scrub/bin/scrub", "--in-place"]
static_dir = "public"
"#;
    let parsed: FileConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(parsed.port, Some(9000));
    assert_eq!(
        parsed.roots,
        Some(vec![PathBuf::from("/srv/videos"), PathBuf::from("/mnt/usb")])
    );
    assert_eq!(parsed.sanitizer.unwrap().len(), 2);
    assert_eq!(parsed.static_dir, Some(PathBuf::from("public")));
}

#[test]
fn test_toml_unknown_fields_ignored() {
    // Future keys must not break parsing
    let toml_str = "port = 9000\nunknown_future_key = true\n";
    let parsed: Result<FileConfig, _> = toml::from_str(toml_str);
    assert!(parsed.is_ok());
}

#[test]
fn test_load_config_reports_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("metascrub.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();
    assert!(load_config(&path).is_err());
    assert!(load_config(&tmp.path().join("missing.toml")).is_err());
}

#[test]
fn test_cli_parses_roots_and_sanitizer_words() {
    let args = Args::try_parse_from([
        "metascrub",
        "/srv/a",
        "/srv/b",
        "--port",
        "8080",
        "--sanitizer",
        "python3",
        "--sanitizer",
        "scrub.py",
        "--localhost",
    ])
    .unwrap();
    assert_eq!(args.roots, vec![PathBuf::from("/srv/a"), PathBuf::from("/srv/b")]);
    assert_eq!(args.port, Some(8080));
    assert_eq!(args.sanitizer, vec!["python3", "scrub.py"]);
    assert!(args.localhost);
}
