// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use caixa::cli::build_cli;
use caixa::config::{self, AppConfig};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.timeout_secs, AppConfig::default().timeout_secs);
    assert_eq!(cfg.recent_limit, 5);
}

#[test]
fn file_values_override_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "base_url = \"http://ledger.local:9000/api\"").unwrap();
    writeln!(file, "recent_limit = 10").unwrap();
    let cfg = config::load_from(file.path()).unwrap();
    assert_eq!(cfg.base_url, "http://ledger.local:9000/api");
    assert_eq!(cfg.recent_limit, 10);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn flags_override_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "base_url = \"http://from-file\"").unwrap();
    let path = file.path().to_string_lossy().to_string();
    let m = build_cli().get_matches_from([
        "caixa",
        "--config",
        path.as_str(),
        "--base-url",
        " http://from-flag ",
        "--log-level",
        "debug",
        "config",
    ]);
    let cfg = config::load(&m).unwrap();
    assert_eq!(cfg.base_url, "http://from-flag");
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn dashboard_accepts_repeated_months() {
    let m = build_cli().get_matches_from([
        "caixa",
        "dashboard",
        "--month",
        "2024-05",
        "--month",
        "2024-06",
        "--recent",
        "3",
        "--json",
    ]);
    let (name, sub) = m.subcommand().unwrap();
    assert_eq!(name, "dashboard");
    let months: Vec<_> = sub.get_many::<String>("month").unwrap().cloned().collect();
    assert_eq!(months, vec!["2024-05", "2024-06"]);
    assert_eq!(sub.get_one::<usize>("recent"), Some(&3));
    assert!(sub.get_flag("json"));
}

#[test]
fn removal_takes_id_and_yes() {
    let m = build_cli().get_matches_from(["caixa", "tx", "rm", "12", "-y"]);
    let (_, tx) = m.subcommand().unwrap();
    let (name, rm) = tx.subcommand().unwrap();
    assert_eq!(name, "rm");
    assert_eq!(rm.get_one::<i64>("id"), Some(&12));
    assert!(rm.get_flag("yes"));
}
