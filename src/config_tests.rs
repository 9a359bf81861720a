#![allow(clippy::unwrap_used)]

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_flag_wins_over_env() {
    let (config, rest) = Config::resolve(
        args(&["finvis", "--data-dir", "/tmp/a", "list"]),
        Some("/tmp/b".into()),
    )
    .unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/tmp/a"));
    assert_eq!(rest, args(&["finvis", "list"]));
}

#[test]
fn test_flag_with_equals() {
    let (config, rest) =
        Config::resolve(args(&["finvis", "summary", "--data-dir=/srv/x"]), None).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/srv/x"));
    assert_eq!(rest, args(&["finvis", "summary"]));
}

#[test]
fn test_env_used_without_flag() {
    let (config, rest) =
        Config::resolve(args(&["finvis", "budget"]), Some("/tmp/env".into())).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/tmp/env"));
    assert_eq!(rest, args(&["finvis", "budget"]));
}

#[test]
fn test_flag_without_value_is_error() {
    assert!(Config::resolve(args(&["finvis", "--data-dir"]), None).is_err());
}

#[test]
fn test_db_path() {
    let config = Config {
        data_dir: PathBuf::from("/data"),
    };
    assert_eq!(config.db_path(), PathBuf::from("/data/finvis.db"));
}

#[test]
fn test_ensure_data_dir_creates_nested() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: tmp.path().join("a").join("b"),
    };
    assert!(config.ensure_data_dir().unwrap().is_dir());
}
