// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn town_paths_are_rooted_under_town_root() {
    let town = Town::new("/home/alice/gastown");
    assert_eq!(
        town.shutdown_lock(),
        PathBuf::from("/home/alice/gastown/daemon/shutdown.lock")
    );
    assert_eq!(
        town.events_journal(),
        PathBuf::from("/home/alice/gastown/.events.jsonl")
    );
    assert_eq!(
        town.town_json(),
        PathBuf::from("/home/alice/gastown/mayor/town.json")
    );
}

#[test]
fn rig_session_names_use_the_gt_grammar() {
    let town = Town::new("/tmp/town");
    let rig = town.rig("myrig");
    assert_eq!(rig.worker_session("alice"), "gt-myrig-alice");
    assert_eq!(rig.role_session("witness"), "gt-myrig-witness");
}

#[test]
fn rig_paths_nest_under_town_root_and_rig_name() {
    let town = Town::new("/tmp/town");
    let rig = town.rig("myrig");
    assert_eq!(rig.root(), PathBuf::from("/tmp/town/myrig"));
    assert_eq!(rig.beads_dir(), PathBuf::from("/tmp/town/myrig/.beads"));
}

#[test]
fn rig_name_validity_follows_identifier_grammar() {
    assert!(is_valid_rig_name("my-rig.01"));
    assert!(!is_valid_rig_name("-leading-dash"));
    assert!(!is_valid_rig_name(""));
}
