use std::fs;
use std::path::{Path, PathBuf};

use bgplens_core::{AnalysisOptions, Entry, analyze};
use time::OffsetDateTime;

fn golden_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
}

fn load_expected_entries(case: &str) -> Vec<Entry> {
    let expected_path = golden_root().join(case).join("expected_entries.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_entries.json");
    serde_json::from_str(&expected_json).expect("parse expected entries")
}

fn input_path(case: &str) -> PathBuf {
    let dir = golden_root().join(case);
    ["input.json", "input.txt"]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
        .unwrap_or_else(|| panic!("no input file in {}", dir.display()))
}

fn run_golden(case: &str) {
    let raw = fs::read(input_path(case)).expect("read input");
    let expected = load_expected_entries(case);

    let actual = analyze(&raw, &AnalysisOptions::default(), OffsetDateTime::UNIX_EPOCH)
        .expect("analyze input");

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {case}");
}

#[test]
fn golden_nxos_json_basic() {
    run_golden("nxos_json_basic");
}

#[test]
fn golden_nxos_json_multi_vrf() {
    run_golden("nxos_json_multi_vrf");
}

#[test]
fn golden_text_multi_vrf() {
    run_golden("text_multi_vrf");
}

#[test]
fn golden_nxos_json_basic_flags_dominant_peer() {
    let entries = load_expected_entries("nxos_json_basic");
    assert!(
        entries[0]
            .anomalies
            .iter()
            .any(|anomaly| anomaly.contains("excessive_dependency_on_peer_10.0.0.2_60.0%"))
    );
}

#[test]
fn golden_text_and_json_report_the_same_vrf_order() {
    for case in ["nxos_json_multi_vrf", "text_multi_vrf"] {
        let raw = fs::read(input_path(case)).expect("read input");
        let entries = analyze(&raw, &AnalysisOptions::default(), OffsetDateTime::UNIX_EPOCH)
            .expect("analyze input");
        let expected: Vec<String> = load_expected_entries(case)
            .into_iter()
            .map(|entry| entry.message.vrf_name)
            .collect();
        let actual: Vec<String> = entries
            .into_iter()
            .map(|entry| entry.message.vrf_name)
            .collect();
        assert_eq!(actual, expected, "VRF order in {case}");
    }
}

#[test]
fn every_golden_case_has_expectations() {
    let cases = fs::read_dir(golden_root()).expect("read golden dir");
    for case in cases {
        let path = case.expect("golden entry").path();
        if path.is_dir() {
            assert!(
                path.join("expected_entries.json").exists(),
                "missing expectations in {}",
                path.display()
            );
        }
    }
}
