// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn discover_rigs_returns_empty_when_rigs_json_is_absent() {
    let town = Town::new(tempfile::tempdir().unwrap().path());
    assert!(discover_rigs(&town).unwrap().is_empty());
}

#[test]
fn discover_rigs_parses_name_and_optional_remote_url() {
    let dir = tempfile::tempdir().unwrap();
    let town = Town::new(dir.path());
    std::fs::create_dir_all(town.mayor_dir()).unwrap();
    std::fs::write(
        town.rigs_json(),
        r#"[{"name": "alpha", "remote_url": "git@github.com:acme/alpha.git"}, {"name": "beta"}]"#,
    )
    .unwrap();

    let rigs = discover_rigs(&town).unwrap();
    assert_eq!(rigs.len(), 2);
    assert_eq!(rigs[0].name, "alpha");
    assert_eq!(rigs[0].remote_url.as_deref(), Some("git@github.com:acme/alpha.git"));
    assert_eq!(rigs[1].name, "beta");
    assert_eq!(rigs[1].remote_url, None);
}

#[test]
fn discover_rigs_surfaces_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let town = Town::new(dir.path());
    std::fs::create_dir_all(town.mayor_dir()).unwrap();
    std::fs::write(town.rigs_json(), "not json").unwrap();

    assert!(matches!(discover_rigs(&town), Err(DaemonError::RigsJson(_))));
}

#[test]
#[serial]
fn daemon_lock_rejects_a_second_acquisition() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("GASTOWN_HOME", dir.path());
    let config = Config::load().unwrap();

    let first = DaemonLock::acquire(&config).unwrap();
    let second = DaemonLock::acquire(&config);
    assert!(matches!(second, Err(DaemonError::AlreadyRunning(_))));

    drop(first);
    assert!(DaemonLock::acquire(&config).is_ok());

    std::env::remove_var("GASTOWN_HOME");
}

#[test]
#[serial]
fn config_load_honors_gastown_home_override() {
    std::env::set_var("GASTOWN_HOME", "/tmp/my-town");
    let config = Config::load().unwrap();
    assert_eq!(config.town.root(), std::path::Path::new("/tmp/my-town"));
    assert_eq!(config.log_path, std::path::PathBuf::from("/tmp/my-town/daemon/gtd.log"));
    std::env::remove_var("GASTOWN_HOME");
}
