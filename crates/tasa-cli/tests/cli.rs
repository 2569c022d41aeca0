//! Binary-level tests for the `tasa` command.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn tasa() -> Command {
    let mut cmd = Command::cargo_bin("tasa").unwrap();
    cmd.env_remove("TASA_CONFIG").env("RUST_LOG", "off");
    cmd
}

#[test]
fn help_lists_commands() {
    tasa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("irr"));
}

#[test]
fn irr_values_a_schedule_file() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = dir.path().join("AL30.DAT");
    fs::write(&schedule, "01/01/25,10,100\n").unwrap();

    let output = tasa()
        .current_dir(dir.path())
        .args(["--format", "json", "irr", "--price", "100", "--date", "2024-01-01"])
        .arg("--schedule")
        .arg(&schedule)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let row = &json["results"][0];
    let t = 366.0 / 365.0;
    assert_eq!(row["ticker"], "AL30");
    assert!((row["irr"].as_f64().unwrap() - (1.1_f64.powf(1.0 / t) - 1.0)).abs() < 1e-9);
    assert!((row["macaulay"].as_f64().unwrap() - t).abs() < 1e-9);
}

#[test]
fn irr_rejects_bad_schedule_row() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = dir.path().join("AL29.DAT");
    fs::write(&schedule, "01/01/25,10,100\n2025-07-01,10,0\n").unwrap();

    tasa()
        .current_dir(dir.path())
        .args(["irr", "--price", "100"])
        .arg("--schedule")
        .arg(&schedule)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn update_runs_offline_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("AL30.DAT"), "01/01/25,10,100\n").unwrap();
    let prices = dir.path().join("prices.csv");
    fs::write(&prices, "ticker,price\nAL30,100\nAL29,98\n").unwrap();

    let output = tasa()
        .current_dir(dir.path())
        .args(["--format", "json", "update", "--no-dollar"])
        .args(["--valuation-date", "2024-01-01"])
        .arg("--prices-file")
        .arg(&prices)
        .arg("--data-dir")
        .arg(&data)
        .args(["AL30", "AL29"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
    assert_eq!(json["results"][0]["ticker"], "AL30");
    let failure = &json["failures"][0];
    assert_eq!(failure["ticker"], "AL29");
    assert_eq!(failure["stage"], "build_timeline");
    assert_eq!(failure["kind"], "missing_data");
}

#[test]
fn update_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data").join("AL35.DAT"), "01/01/25,10,100\n").unwrap();
    fs::write(dir.path().join("prices.csv"), "ticker,price\nAL35D,100\n").unwrap();
    fs::write(
        dir.path().join("tasa.toml"),
        r#"
        prices_file = "prices.csv"
        tickers = ["AL35"]

        [pipeline]
        dollar_denominated = true
        valuation_date = "2024-01-01T00:00:00"
        "#,
    )
    .unwrap();

    tasa()
        .current_dir(dir.path())
        .args(["--format", "minimal", "update"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("AL35 0.09"));
}

#[test]
fn update_quotes_dollar_line_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data").join("AL30.DAT"), "01/01/25,10,100\n").unwrap();
    fs::write(dir.path().join("prices.csv"), "ticker,price\nAL30,50\nAL30D,100\n").unwrap();

    tasa()
        .current_dir(dir.path())
        .args(["--format", "minimal", "update", "--prices-file", "prices.csv"])
        .args(["--valuation-date", "2024-01-01", "AL30"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("AL30 0.09"));
}

#[test]
fn no_dollar_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data").join("AL35.DAT"), "01/01/25,10,100\n").unwrap();
    fs::write(dir.path().join("prices.csv"), "ticker,price\nAL35,100\n").unwrap();
    fs::write(
        dir.path().join("tasa.toml"),
        r#"
        prices_file = "prices.csv"
        tickers = ["AL35"]

        [pipeline]
        dollar_denominated = true
        valuation_date = "2024-01-01T00:00:00"
        "#,
    )
    .unwrap();

    tasa()
        .current_dir(dir.path())
        .args(["--format", "minimal", "update"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no ticker could be valued"));

    tasa()
        .current_dir(dir.path())
        .args(["--format", "minimal", "update", "--no-dollar"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("AL35 0.09"));
}

#[test]
fn update_fails_when_nothing_is_valued() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("prices.csv"), "ticker,price\n").unwrap();

    tasa()
        .current_dir(dir.path())
        .args(["update", "--prices-file", "prices.csv", "AL41"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no ticker could be valued"));
}

#[test]
fn unknown_site_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();

    tasa()
        .current_dir(dir.path())
        .args(["update", "--site", "bolsar", "AL30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown site"));
}
