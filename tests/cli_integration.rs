#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("daycares.json")
}

/// A command isolated from the user's config, reading the sample snapshot.
fn hub_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("parent-hub"));
    cmd.env("PARENT_HUB_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    cmd
}

fn with_data(home: &TempDir) -> Command {
    let mut cmd = hub_cmd(home);
    cmd.arg("--data").arg(sample_data());
    cmd
}

#[test]
fn test_naked_run_lists_everything() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 6 licensed programs"))
        .stdout(predicate::str::contains("Harbor Day Camp"));
}

#[test]
fn test_city_and_pfcc_filters() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["browse", "--city", "columbus", "--pfcc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Showing 2 licensed programs (filtered from 6)",
        ))
        .stdout(predicate::str::contains("Little Stars Academy"))
        .stdout(predicate::str::contains("Maple Tree Preschool"))
        .stdout(predicate::str::contains("Sunrise").not());
}

#[test]
fn test_search_covers_address_not_city() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["ls", "--search", "Columbus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lakeside Little Learners"))
        .stdout(predicate::str::contains("Little Stars").not());
}

#[test]
fn test_unrated_includes_missing_ratings() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["browse", "--rating", "unrated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunrise Learning Home"))
        .stdout(predicate::str::contains("Harbor Day Camp"))
        .stdout(predicate::str::contains("Showing 2 licensed programs"));
}

#[test]
fn test_no_matches_is_not_an_error() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["browse", "--county", "LUCAS", "--rating", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No programs match your filters"));
}

#[test]
fn test_limit_and_markers() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["browse", "-n", "1", "--markers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 of 6 licensed programs"))
        .stdout(predicate::str::contains("Map centre: 39.9612, -82.9988"))
        .stdout(predicate::str::contains("/daycare/002001-lakeside-little-learners-sandusky"));
}

#[test]
fn test_worker_flag_gives_same_results() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["browse", "--worker", "--county", "lucas", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Showing 2 licensed programs (filtered from 6)",
        ))
        .stdout(predicate::str::contains("Toledo Kids Club"));
}

#[test]
fn test_missing_data_fails() {
    let home = TempDir::new().unwrap();
    hub_cmd(&home)
        .args(["browse"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Program data is unavailable"))
        .stderr(predicate::str::contains("daycares.json not found"));
}

#[test]
fn test_cities_index() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["cities"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Columbus"))
        .stdout(predicate::str::contains("Sandusky"));

    with_data(&home)
        .args(["cities", "tol"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Toledo"))
        .stdout(predicate::str::contains("Columbus").not());
}

#[test]
fn test_facets() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["facets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Counties (3)"))
        .stdout(predicate::str::contains("Gold Rated (3)"));
}

#[test]
fn test_show_program() {
    let home = TempDir::new().unwrap();
    with_data(&home)
        .args(["show", "001002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Harbor Day Camp #001002"))
        .stdout(predicate::str::contains("/daycare/001002-harbor-day-camp-toledo"));

    with_data(&home)
        .args(["show", "999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Program not found: 999999"));
}

#[test]
fn test_config_data_file_is_used() {
    let home = TempDir::new().unwrap();
    hub_cmd(&home)
        .args(["config", "data-file"])
        .arg(sample_data())
        .assert()
        .success()
        .stdout(predicate::str::contains("data-file set to"));

    hub_cmd(&home)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size = 50"));

    hub_cmd(&home)
        .args(["browse", "--city", "SANDUSKY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lakeside Little Learners"));
}

#[test]
fn test_config_rejects_bad_value() {
    let home = TempDir::new().unwrap();
    hub_cmd(&home)
        .args(["config", "page-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page-size must be at least 1"));
}
