//! Command-line interface tests
//!
//! Run the built binary against temporary vendor and invoice files.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VENDOR_CSV: &str = "VENDORACCOUNTNUMBER,VENDORORGANIZATIONNAME,ADDRESSSTREET,ADDRESSZIPCODE
V100,ACME WIDGETS INC,PO BOX 1234,75201-1234
V200,GLOBEX CORPORATION,500 INDUSTRIAL PKWY,44101
VCA00123,MAPLE SUPPLY LTD,1 KING ST W,M5H 1A1
";

const ACME_INVOICE: &str = r#"{
    "vendorCompanyName": "Acme Widgets",
    "remitToAddress": {"companyName": "Acme Widgets", "address1": "PO Box 1234", "zipCode": "75201-1234"}
}"#;

/// Temp dir with `vendors/vendors.csv` and `phase1.json`
fn fixture(invoice: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join("vendors")).expect("Failed to create vendors dir");
    std::fs::write(dir.path().join("vendors/vendors.csv"), VENDOR_CSV)
        .expect("Failed to write vendors");
    std::fs::write(dir.path().join("phase1.json"), invoice).expect("Failed to write invoice");
    dir
}

fn vendor_matcher() -> Command {
    Command::cargo_bin("vendor-matcher").expect("binary should be built")
}

#[test]
fn test_match_text_output() {
    let dir = fixture(ACME_INVOICE);

    vendor_matcher()
        .current_dir(dir.path())
        .args(["match", "phase1.json", "--vendors", "vendors/vendors.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched on remit-to address"))
        .stdout(predicate::str::contains("ACME WIDGETS INC (V100)"));
}

#[test]
fn test_match_json_output() {
    let dir = fixture(ACME_INVOICE);

    let output = vendor_matcher()
        .current_dir(dir.path())
        .args(["--format", "json", "match", "phase1.json", "--vendors-dir", "vendors"])
        .output()
        .expect("Failed to run binary");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let matches = json["topMatches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["VENDORACCOUNTNUMBER"], "V100");
    assert_eq!(matches[0]["noOfMatches"], 3);
    assert_eq!(json["addressIndex"], 0);
}

#[test]
fn test_match_tsv_output() {
    let dir = fixture(ACME_INVOICE);

    vendor_matcher()
        .current_dir(dir.path())
        .args(["match", "phase1.json", "--vendors-dir", "vendors", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rank\taccount_number"))
        .stdout(predicate::str::contains("1\tV100\tACME WIDGETS INC"));
}

#[test]
fn test_match_no_result() {
    let dir = fixture(r#"{"remitToAddress": {"companyName": "Initech", "zipCode": "99999"}}"#);

    vendor_matcher()
        .current_dir(dir.path())
        .args(["match", "phase1.json", "--vendors-dir", "vendors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching vendors found."));
}

#[test]
fn test_match_canadian() {
    let dir = fixture(
        r#"{"remitToAddress": {"companyName": "Maple Supply", "address1": "1 King St W", "zipCode": "M5H 1A1"}}"#,
    );

    vendor_matcher()
        .current_dir(dir.path())
        .args(["match", "phase1.json", "--vendors-dir", "vendors", "--canadian"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VCA00123"));
}

#[test]
fn test_match_requires_vendor_source() {
    let dir = fixture(ACME_INVOICE);

    vendor_matcher()
        .current_dir(dir.path())
        .args(["match", "phase1.json"])
        .assert()
        .failure();
}

#[test]
fn test_match_invalid_invoice() {
    let dir = fixture("not json");

    vendor_matcher()
        .current_dir(dir.path())
        .args(["match", "phase1.json", "--vendors-dir", "vendors"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid invoice data JSON"));
}

#[test]
fn test_score_lists_all_records() {
    let dir = fixture(ACME_INVOICE);

    vendor_matcher()
        .current_dir(dir.path())
        .args(["score", "phase1.json", "--vendors-dir", "vendors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scored 2 vendor records"))
        .stdout(predicate::str::contains("V100"))
        .stdout(predicate::str::contains("V200"));
}

#[test]
fn test_score_address_out_of_range() {
    let dir = fixture(ACME_INVOICE);

    vendor_matcher()
        .current_dir(dir.path())
        .args(["score", "phase1.json", "--vendors-dir", "vendors", "--address", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}
