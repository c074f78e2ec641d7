//! Structure of the JSON, SARIF and monitoring output for real fixtures.

use std::path::PathBuf;

use paramlint::config::{Config, MonitorConfig};
use paramlint::report::{build_json_report, build_sarif_report, monitor_lines};
use paramlint::{Monitor, Runner};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn widget_result() -> paramlint::DetectionResult {
    Runner::new(Config::default())
        .unwrap()
        .check_file(&testdata_path().join("widget.cpp"))
        .unwrap()
}

#[test]
fn test_json_report_structure() {
    let result = widget_result();
    let report = build_json_report("testdata/widget.cpp", "(defaults)", &result);

    assert!(!report.passed);
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.functions_found, 4);
    assert_eq!(report.errors, 6);
    assert_eq!(report.infos, 1);
    assert_eq!(report.suppressed_count, 0);

    let value = serde_json::to_value(&report).unwrap();
    let first = &value["violations"][0];
    assert_eq!(first["rule"], "unused_parameter");
    assert_eq!(first["severity"], "error");
    assert_eq!(first["line"], 18);
    assert_eq!(first["function"], "Widget::resize");
    assert_eq!(first["parameters"], serde_json::json!(["h"]));
    assert!(value.get("suppressed").is_none());
}

#[test]
fn test_json_report_suppressions() {
    let result = Runner::new(Config::default())
        .unwrap()
        .check_file(&testdata_path().join("suppressed.cpp"))
        .unwrap();
    let report = build_json_report("testdata", "(defaults)", &result);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(report.suppressed_count, 3);
    let types: Vec<_> = value["suppressed"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["suppression"]["type"].as_str().unwrap().to_string())
        .collect();
    assert!(types.contains(&"file".to_string()));
    assert!(types.contains(&"nextline".to_string()));
}

#[test]
fn test_sarif_report_structure() {
    let result = widget_result();
    let report = build_sarif_report(&testdata_path(), &result);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["version"], "2.1.0");
    let run = &value["runs"][0];
    assert_eq!(run["tool"]["driver"]["name"], "paramlint");

    let rule_ids: Vec<_> = run["tool"]["driver"]["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "unused_parameter",
            "undocumented_parameter",
            "extra_documented_parameter",
            "pending_marker"
        ]
    );

    let results = run["results"].as_array().unwrap();
    assert_eq!(results.len(), 7);
    let location = &results[0]["locations"][0]["physicalLocation"];
    assert_eq!(location["artifactLocation"]["uri"], "widget.cpp");
    assert_eq!(location["region"]["startLine"], 18);
    assert_eq!(results[3]["level"], "note");
}

#[test]
fn test_monitor_view() {
    let report = Monitor::new(MonitorConfig::default())
        .qualified_only(true)
        .check_file(&testdata_path().join("widget.cpp"))
        .unwrap();
    let names: Vec<_> = report.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Widget::Widget",
            "Widget::resize",
            "Widget::draw",
            "Widget::operator=="
        ]
    );

    let ctor = &report.methods[0];
    assert_eq!(ctor.brace_line, 12);
    assert_eq!(
        ctor.initializer_list.as_deref(),
        Some(": width_(width), height_(height)")
    );

    let lines = monitor_lines(&report);
    assert!(lines[0].ends_with("(4 definitions found) ---"));
    assert!(lines.contains(&"Widget::resize (line 18, body at line 19)".to_string()));
    assert!(lines.contains(&"No header comment found.".to_string()));
    assert!(lines.contains(&"(int w, int h)".to_string()));
}

#[test]
fn test_monitor_skips_truncated_body() {
    let report = Monitor::new(MonitorConfig::default())
        .check_file(&testdata_path().join("truncated.cpp"))
        .unwrap();
    let names: Vec<_> = report.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["first"]);
}
