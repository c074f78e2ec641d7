//! Integration tests for detection over the testdata directory.

use std::path::{Path, PathBuf};

use paramlint::config::Config;
use paramlint::detect::{Runner, Severity, ViolationRule};
use paramlint::source::collect_files;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn runner() -> Runner {
    Runner::new(Config::default()).expect("default config is valid")
}

fn rules_at(result: &paramlint::DetectionResult, line: usize) -> Vec<ViolationRule> {
    result
        .violations
        .iter()
        .filter(|v| v.line == line)
        .map(|v| v.rule)
        .collect()
}

#[test]
fn test_collects_source_files_only() {
    let files = collect_files(&testdata_path(), &Config::default()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["clean.cpp", "shapes.h", "suppressed.cpp", "truncated.cpp", "widget.cpp"]
    );
}

#[test]
fn test_widget_violations() {
    let result = runner()
        .check_file(&testdata_path().join("widget.cpp"))
        .unwrap();

    assert_eq!(result.functions, 4);
    assert!(rules_at(&result, 10).is_empty());
    assert_eq!(
        rules_at(&result, 18),
        vec![
            ViolationRule::UnusedParameter,
            ViolationRule::UndocumentedParameter,
            ViolationRule::ExtraDocumentedParameter,
        ]
    );
    assert_eq!(rules_at(&result, 20), vec![ViolationRule::PendingMarker]);
    assert_eq!(
        rules_at(&result, 27),
        vec![
            ViolationRule::UnusedParameter,
            ViolationRule::UndocumentedParameter,
        ]
    );
    assert_eq!(rules_at(&result, 34), vec![ViolationRule::UndocumentedParameter]);

    let draw_unused = &result.violations[4];
    assert_eq!(draw_unused.function.as_deref(), Some("Widget::draw"));
    assert_eq!(
        draw_unused.message,
        "Function 'Widget::draw': The parameter 'style' is defined but not used in the function body."
    );
    assert_eq!(result.severity_counts(), (6, 0, 1));
}

#[test]
fn test_clean_file_has_no_violations() {
    let result = runner()
        .check_file(&testdata_path().join("clean.cpp"))
        .unwrap();
    assert_eq!(result.functions, 2);
    assert!(result.violations.is_empty(), "{:?}", result.violations);
}

#[test]
fn test_truncated_file_reports_what_it_can() {
    let result = runner()
        .check_file(&testdata_path().join("truncated.cpp"))
        .unwrap();
    assert_eq!(result.functions, 2);
    assert!(result.violations.is_empty());
}

#[test]
fn test_suppressions() {
    let result = runner()
        .check_file(&testdata_path().join("suppressed.cpp"))
        .unwrap();
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, ViolationRule::UnusedParameter);
    assert_eq!(result.violations[0].line, 6);
    assert_eq!(result.suppressed_count(), 3);
}

#[test]
fn test_markdown_only_gets_text_checks() {
    let result = runner().check_file(&testdata_path().join("notes.md")).unwrap();
    assert_eq!(result.functions, 0);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, ViolationRule::PendingMarker);
    assert_eq!(result.violations[0].severity, Severity::Info);
}

#[test]
fn test_run_directory() {
    let files = collect_files(&testdata_path(), &Config::default()).unwrap();
    let result = runner().run(&files).unwrap();
    assert_eq!(result.scanned, 5);
    assert!(result.has_errors());

    // Results follow file order.
    let mut seen = Vec::new();
    for v in &result.violations {
        let name = Path::new(&v.file).file_name().unwrap().to_owned();
        if seen.last() != Some(&name) {
            seen.push(name);
        }
    }
    let seen: Vec<_> = seen.iter().map(|n| n.to_string_lossy().to_string()).collect();
    assert_eq!(seen, vec!["shapes.h", "suppressed.cpp", "widget.cpp"]);
}

#[test]
fn test_disabled_checks() {
    let mut config = Config::default();
    config.unused_parameters.enabled = false;
    config.documented_parameters.enabled = false;
    config.pending_markers.enabled = false;
    let result = Runner::new(config)
        .unwrap()
        .check_file(&testdata_path().join("widget.cpp"))
        .unwrap();
    assert!(result.violations.is_empty());
    assert_eq!(result.functions, 0);
}

#[test]
fn test_line_length_limit() {
    let mut config = Config::default();
    config.line_length.max = 40;
    let result = Runner::new(config)
        .unwrap()
        .only(vec![ViolationRule::LineLength])
        .check_file(&testdata_path().join("widget.cpp"))
        .unwrap();
    let lines: Vec<_> = result.violations.iter().map(|v| v.line).collect();
    assert_eq!(lines, vec![27, 34, 36]);
}
