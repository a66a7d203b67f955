// Runs the bundled `.decl` fixtures against the outcomes in their headers

use declcheck::pipeline::fixture::{run_dir, Expectation, Fixture};
use declcheck::pipeline::Phase;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[test]
fn test_all_fixtures_match_expectations() {
    let reports = run_dir(fixtures_dir()).expect("fixtures should load");
    assert!(!reports.is_empty(), "no fixtures found");

    let failures: Vec<String> = reports
        .iter()
        .filter(|r| !r.passed())
        .map(|r| r.to_string())
        .collect();
    assert!(failures.is_empty(), "fixture mismatches:\n{}", failures.join("\n"));
}

#[test]
fn test_fixture_reports_are_sorted_by_name() {
    let reports = run_dir(fixtures_dir()).expect("fixtures should load");
    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_lexical_error_fixture_skips_later_phases() {
    let fixture = Fixture::load(fixtures_dir().join("multi_char_literal.decl"))
        .expect("fixture should load");
    assert_eq!(fixture.expected.get(Phase::Lexical), Expectation::Error);
    assert_eq!(fixture.expected.get(Phase::Syntax), Expectation::Skip);
    assert!(fixture.run().passed());
}

#[test]
fn test_missing_directory_is_an_io_error() {
    let err = run_dir(fixtures_dir().join("does-not-exist")).unwrap_err();
    assert!(err.to_string().starts_with("cannot read"));
}
