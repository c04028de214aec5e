//! Integration tests for the vbsyn command-line front end

use std::fs;
use std::path::{Path, PathBuf};

use insta::assert_snapshot;
use vbsyn::ast::dump;
use vbsyn::cli::commands::{self, CheckOptions};
use vbsyn::cli::{ExitCode, OutputFormat};
use vbsyn::diagnostics::DiagnosticCode;
use vbsyn::parser::ParseOptions;

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(kind);
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == "vb"))
        .collect();
    files.sort();
    files
}

fn fixture(kind: &str, name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(kind)
        .join(name)
}

fn codes(path: &Path) -> Vec<DiagnosticCode> {
    let report = commands::parse_file(path, &ParseOptions::default()).unwrap();
    report.diagnostics.iter().map(|d| d.code).collect()
}

/// All valid fixtures parse without a single diagnostic, in full and outline mode.
#[test]
fn test_valid_fixtures() {
    let files = fixtures("valid");
    assert!(!files.is_empty());
    for path in &files {
        for options in [ParseOptions::default(), ParseOptions::outline()] {
            let report = commands::parse_file(path, &options).unwrap();
            assert!(
                report.diagnostics.is_empty(),
                "{} should parse cleanly:\n{}",
                path.display(),
                commands::render_diagnostics(&report)
            );
            assert_eq!(report.output.stats.blocks_pushed, report.output.stats.blocks_popped);
        }
    }
}

/// All invalid fixtures report at least one diagnostic and still produce a tree.
#[test]
fn test_invalid_fixtures() {
    for path in fixtures("invalid") {
        let report = commands::parse_file(&path, &ParseOptions::default()).unwrap();
        assert!(!report.diagnostics.is_empty(), "{} should have errors", path.display());
        assert!(!report.output.unit.members.is_empty(), "{} lost its tree", path.display());
    }
}

#[test]
fn test_missing_end_class_is_one_error() {
    assert_eq!(
        codes(&fixture("invalid", "missing_end_class.vb")),
        vec![DiagnosticCode::MissingBlockEnd]
    );
}

#[test]
fn test_property_without_set_is_reported() {
    assert_eq!(
        codes(&fixture("invalid", "property_without_set.vb")),
        vec![DiagnosticCode::MissingAccessor]
    );
}

#[test]
fn test_each_broken_line_is_reported_once() {
    assert_eq!(
        codes(&fixture("invalid", "broken_statements.vb")),
        vec![
            DiagnosticCode::ArrayRankSpecifiedTwice,
            DiagnosticCode::ExpectedEndOfStatement,
            DiagnosticCode::MissingBlockEnd,
            DiagnosticCode::UnmatchedTerminator,
        ]
    );
}

#[test]
fn test_outline_of_module() {
    let report = commands::parse_file(&fixture("valid", "hello_module.vb"), &ParseOptions::outline()).unwrap();
    assert_snapshot!(dump::outline(&report.output.unit).trim_end(), @r"
    Namespace Demo  [5:1-15:14]
      Module Program  [6:5-14:15]
        Sub Main  [7:9-13:16]
    ");
}

#[test]
fn test_check_exit_codes() {
    let options = CheckOptions {
        jobs: Some(2),
        format: OutputFormat::Json,
        ..CheckOptions::default()
    };
    assert_eq!(
        commands::check_files(&fixtures("valid"), &options).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(
        commands::check_files(&fixtures("invalid"), &options).unwrap(),
        ExitCode::SYNTAX_ERRORS
    );

    let mut with_missing = fixtures("valid");
    with_missing.push(fixture("valid", "does_not_exist.vb"));
    assert_eq!(commands::check_files(&with_missing, &options).unwrap(), ExitCode::FAILURE);
}

#[test]
fn test_parallel_parse_matches_sequential() {
    let mut files = fixtures("valid");
    files.extend(fixtures("invalid"));
    let counts = |jobs| {
        commands::parse_all(&files, &ParseOptions::default(), jobs)
            .into_iter()
            .map(|r| r.unwrap().diagnostics.len())
            .collect::<Vec<_>>()
    };
    assert_eq!(counts(1), counts(4));
}
