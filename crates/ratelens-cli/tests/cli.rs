use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATEMENT: &str = "\
Merchant Statement
Amounts Submitted $250,000.00
Fees Charged (6,000.00)
Total Transactions 1,000
";

/// Command bound to a fresh config file so the user's own config is never read.
fn ratelens(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }
    let mut cmd = Command::cargo_bin("ratelens").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn extract_prints_json_totals() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "march.txt", STATEMENT);

    ratelens(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"transactions\": 1000"))
        .stdout(predicate::str::contains("\"stages\""));
}

#[test]
fn extract_text_format() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "march.txt", STATEMENT);

    ratelens(&dir)
        .args(["extract", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions: 1000"));
}

#[test]
fn extract_reports_missing_totals() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "letter.txt", "Dear merchant,\nthank you for your business.\n");

    ratelens(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not reliably extract totals"));
}

#[test]
fn extract_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "scan.png", "not really an image");

    ratelens(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn calc_uses_ticket_tiers() {
    let dir = TempDir::new().unwrap();

    ratelens(&dir)
        .args(["calc", "--volume", "250000", "--transactions", "1000", "--fees", "6000", "--text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Proposed rate:      2.5"))
        .stdout(predicate::str::contains("-250"));
}

#[test]
fn calc_rejects_zero_volume() {
    let dir = TempDir::new().unwrap();

    ratelens(&dir)
        .args(["calc", "--volume", "0", "--transactions", "10", "--fees", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("volume must be greater than zero"));
}

#[test]
fn calc_advanced_reports_horizons() {
    let dir = TempDir::new().unwrap();

    ratelens(&dir)
        .args([
            "calc-advanced",
            "--basis",
            "annual",
            "--volume",
            "1200000",
            "--transactions",
            "12000",
            "--fees",
            "36000",
            "--mcc",
            "5812",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"horizons\""))
        .stdout(predicate::str::contains("\"fee_recovery\""))
        .stdout(predicate::str::contains("\"mcc\": \"5812\""));
}

#[test]
fn analyze_applies_category_rates() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "march.txt", STATEMENT);
    let rates = write(dir.path(), "rates.csv", "category,rate_percent\nGrocery,2.00\n");

    ratelens(&dir)
        .arg("analyze")
        .arg(&input)
        .args(["--mcc-category", "grocery", "--text", "--rates"])
        .arg(&rates)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions: 1000"))
        .stdout(predicate::str::contains("Proposed rate:      2"))
        .stdout(predicate::str::contains("$1000"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let statements = dir.path().join("statements");
    fs::create_dir(&statements).unwrap();
    write(&statements, "march.txt", STATEMENT);
    write(&statements, "april.txt", "nothing useful here\n");
    let out = dir.path().join("out");

    ratelens(&dir)
        .arg("batch")
        .arg(statements.join("*.txt").to_string_lossy().to_string())
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out.join("march.json").exists());
    assert!(!out.join("april.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("march.txt,success,250000.00,6000.00,1000"));
    assert!(summary.contains("april.txt,error"));
}

#[test]
fn batch_outputs_do_not_overwrite_on_shared_stem() {
    let dir = TempDir::new().unwrap();
    let statements = dir.path().join("statements");
    fs::create_dir(&statements).unwrap();
    write(&statements, "march.txt", STATEMENT);
    write(&statements, "march.text", STATEMENT);
    let out = dir.path().join("out");

    ratelens(&dir)
        .arg("batch")
        .arg(statements.join("march.*").to_string_lossy().to_string())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    assert!(out.join("march.txt.json").exists());
    assert!(out.join("march.text.json").exists());
    assert!(!out.join("march.json").exists());
}

#[test]
fn batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "april.txt", "nothing useful here\n");

    ratelens(&dir)
        .arg("batch")
        .arg(dir.path().join("*.txt").to_string_lossy().to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ratelens.json");

    let run = |args: &[&str]| {
        let mut cmd = Command::cargo_bin("ratelens").unwrap();
        cmd.arg("--config").arg(&path).args(args);
        cmd.assert()
    };

    run(&["config", "init"]).success();
    assert!(path.exists());
    run(&["config", "init"]).failure().stderr(predicate::str::contains("--force"));

    run(&["config", "set", "extraction.neighborhood_radius", "3"]).success();
    run(&["config", "get", "extraction.neighborhood_radius"])
        .success()
        .stdout(predicate::str::diff("3\n"));
    run(&["config", "get", "extraction.unknown"]).failure();
}
