#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn libris_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("libris"));
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

/// Adds a book and returns the short id printed at the start of its list line.
fn add_book(data_dir: &TempDir, title: &str, extra: &[&str]) -> String {
    let output = libris_cmd(data_dir)
        .args(["add", title, "-a", "Le Guin", "-g", "Fantasy", "-c", "cover.jpg"])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .split_whitespace()
        .next()
        .expect("add prints the new book")
        .to_string()
}

#[test]
fn test_empty_catalogue_lists_nothing() {
    let dir = TempDir::new().unwrap();
    libris_cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found."));
}

#[test]
fn test_add_list_show_remove() {
    let dir = TempDir::new().unwrap();
    let id = add_book(&dir, "A Wizard of Earthsea", &["--status", "reading"]);

    assert!(dir.path().join("books.json").exists());

    libris_cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("A Wizard of Earthsea"))
        .stdout(predicate::str::contains("Reading"));

    libris_cmd(&dir)
        .args(["show", &id[..4]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Le Guin"))
        .stdout(predicate::str::contains("Started:"));

    libris_cmd(&dir)
        .args(["remove", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book removed"));

    libris_cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found."));
}

#[test]
fn test_finish_and_stats() {
    let dir = TempDir::new().unwrap();
    let id = add_book(
        &dir,
        "The Dispossessed",
        &["--status", "finished", "--start", "2024-03-01", "--end", "2024-03-11", "-r", "5"],
    );
    add_book(&dir, "The Lathe of Heaven", &[]);

    libris_cmd(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Books           2"))
        .stdout(predicate::str::contains("Average rating  5.0"))
        .stdout(predicate::str::contains("Average days    10.0"))
        .stdout(predicate::str::contains("Finished by genre"));

    libris_cmd(&dir)
        .args(["filter", "-s", "finished", "-r", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Dispossessed"))
        .stdout(predicate::str::contains("Lathe").not());

    libris_cmd(&dir)
        .args(["status", &id, "to-read"])
        .assert()
        .success();

    libris_cmd(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished        0"));
}

#[test]
fn test_search_and_genres() {
    let dir = TempDir::new().unwrap();
    add_book(&dir, "Tehanu", &[]);
    add_book(&dir, "Tales from Earthsea", &[]);

    libris_cmd(&dir)
        .args(["search", "earth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tales from Earthsea"))
        .stdout(predicate::str::contains("Tehanu").not());

    libris_cmd(&dir)
        .arg("genres")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fantasy (2)"));
}

#[test]
fn test_validation_errors_exit_non_zero() {
    let dir = TempDir::new().unwrap();
    libris_cmd(&dir)
        .args([
            "add", "Bad", "-a", "X", "-g", "Fantasy", "-c", "c.jpg", "--status", "finished",
            "--start", "2024-05-02", "--end", "2024-05-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!dir.path().join("books.json").exists());
}

#[test]
fn test_corrupt_store_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("books.json"), "not json").unwrap();
    libris_cmd(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    libris_cmd(&dir)
        .args(["config", "random-picks", "5"])
        .assert()
        .success();

    libris_cmd(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("random-picks = 5"));

    libris_cmd(&dir)
        .args(["config", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
