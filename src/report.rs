//! Output formatting for paramlint results.
//!
//! Lint results come in three formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration
//!
//! The monitoring view has a pretty and a JSON form.

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::detect::{
    DetectionResult, Severity, SuppressedViolation, SuppressionType, Violation, ViolationRule,
};
use crate::monitor::FileMonitor;

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON lint report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    /// Config file used, or "(defaults)".
    pub config: String,
    pub passed: bool,
    pub files_scanned: usize,
    pub functions_found: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub violations: Vec<JsonViolation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<JsonSuppressedViolation>,
    pub suppressed_count: usize,
}

#[derive(Serialize, Deserialize)]
pub struct JsonViolation {
    pub rule: String,
    pub severity: String,
    pub file: String,
    pub line: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

/// Suppressed violation with suppression info.
#[derive(Serialize, Deserialize)]
pub struct JsonSuppressedViolation {
    pub violation: JsonViolation,
    pub suppression: JsonSuppression,
}

/// Suppression directive info.
#[derive(Serialize, Deserialize)]
pub struct JsonSuppression {
    pub rule: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub suppression_type: String,
}

/// Build the JSON report for a lint run.
pub fn build_json_report(path: &str, config_path: &str, result: &DetectionResult) -> JsonReport {
    let (errors, warnings, infos) = result.severity_counts();

    let suppressed = result
        .suppressed
        .iter()
        .map(|sv| JsonSuppressedViolation {
            violation: violation_to_json(&sv.violation),
            suppression: JsonSuppression {
                rule: sv.suppression.rule.clone(),
                reason: sv.suppression.reason.clone(),
                file: sv.suppression.file.clone(),
                line: sv.suppression.line,
                suppression_type: format!("{:?}", sv.suppression.suppression_type)
                    .to_lowercase(),
            },
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        config: config_path.to_string(),
        passed: !result.has_errors(),
        files_scanned: result.scanned,
        functions_found: result.functions,
        errors,
        warnings,
        infos,
        violations: result.violations.iter().map(violation_to_json).collect(),
        suppressed,
        suppressed_count: result.suppressed.len(),
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, config_path: &str, result: &DetectionResult) -> anyhow::Result<()> {
    let report = build_json_report(path, config_path, result);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn violation_to_json(v: &Violation) -> JsonViolation {
    JsonViolation {
        rule: v.rule.as_str().to_string(),
        severity: v.severity.to_string(),
        file: v.file.clone(),
        line: v.line,
        message: v.message.clone(),
        function: v.function.clone(),
        parameters: v.parameters.clone(),
    }
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "paramlint";

#[derive(Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
}

/// PascalCase rule name, e.g. `unused_parameter` -> `UnusedParameter`.
fn rule_display_name(rule: ViolationRule) -> String {
    rule.as_str()
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn map_severity_to_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

fn make_relative_path(file_path: &str, base_path: &Path) -> String {
    if base_path.as_os_str().is_empty() {
        return file_path.to_string();
    }

    let file = Path::new(file_path);

    // Single file scan: report just the file name.
    if file == base_path {
        return file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());
    }

    file.strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

/// Build the SARIF log for a lint run.
pub fn build_sarif_report(base_path: &Path, result: &DetectionResult) -> SarifReport {
    let rule_set: BTreeSet<ViolationRule> = result.violations.iter().map(|v| v.rule).collect();

    let rules = rule_set
        .into_iter()
        .map(|rule| SarifRule {
            id: rule.as_str().to_string(),
            name: rule_display_name(rule),
            short_description: SarifMessage {
                text: rule.description().to_string(),
            },
            default_config: SarifRuleConfig {
                level: map_severity_to_level(rule.default_severity()).to_string(),
            },
        })
        .collect();

    let results = result
        .violations
        .iter()
        .map(|v| SarifResult {
            rule_id: v.rule.as_str().to_string(),
            level: map_severity_to_level(v.severity).to_string(),
            message: SarifMessage {
                text: v.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: make_relative_path(&v.file, base_path),
                    },
                    region: SarifRegion {
                        start_line: v.line.max(1),
                    },
                },
            }],
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(base_path: &Path, result: &DetectionResult) -> anyhow::Result<()> {
    let report = build_sarif_report(base_path, result);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, config_path: &str, result: &DetectionResult, show_suppressed: bool) {
    println!();
    print!("  ");
    print!("{}", "paramlint".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path);
    println!();

    write_result_summary(result);
    println!();

    if !result.violations.is_empty() {
        write_violations(&result.violations);
        println!();
    }

    if !result.suppressed.is_empty() {
        write_suppressed_summary(&result.suppressed, show_suppressed);
        println!();
    }
}

fn write_result_summary(result: &DetectionResult) {
    if result.has_errors() {
        print!("  {}", "✗ FAIL".red());
    } else {
        print!("  {}", "✓ PASS".green());
    }

    let (errors, warnings, infos) = result.severity_counts();
    print!(
        "  {} files, {} functions  ",
        result.scanned, result.functions
    );
    print!("{} ", format!("{} errors", errors).red());
    print!("{} ", format!("{} warnings", warnings).yellow());
    print!("{}", format!("{} info", infos).blue());

    if !result.suppressed.is_empty() {
        print!(
            "  {}",
            format!("({} suppressed)", result.suppressed.len()).dimmed()
        );
    }

    println!();
}

fn write_violations(violations: &[Violation]) {
    println!("  {} ({}):", "Violations".bold(), violations.len());
    println!();

    for v in violations {
        write_severity_tag(v.severity);
        print!("   ");
        print!("{:<28}", v.rule.as_str().dimmed());
        print!("{}", v.file.blue());
        if v.line > 0 {
            print!("{}", format!(":{}", v.line).dimmed());
        }
        println!();

        println!("            {}", v.message);
        println!();
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

fn write_suppressed_summary(suppressed: &[SuppressedViolation], show_details: bool) {
    println!("  {} ({}):", "Suppressed".dimmed(), suppressed.len());

    if !show_details {
        println!("    {}", "(use --show-suppressed to see details)".dimmed());
        return;
    }

    println!();
    for sv in suppressed {
        let v = &sv.violation;
        let s = &sv.suppression;

        print!("    {:<28}", v.rule.as_str().dimmed());
        print!("{}", v.file.blue());
        if s.suppression_type == SuppressionType::File {
            print!("{}", ":* (file)".dimmed());
        } else if v.line > 0 {
            print!("{}", format!(":{}", v.line).dimmed());
        }
        println!();

        if !s.reason.is_empty() {
            println!("            {}", format!("reason: {:?}", s.reason).dimmed());
        }
    }
}

// =============================================================================
// Monitoring view
// =============================================================================

const RULE: &str = "==================================================================";

/// Plain-text monitoring view for one file, one line per element.
pub fn monitor_lines(report: &FileMonitor) -> Vec<String> {
    if report.skipped {
        return vec![format!("--- {}: skipped (extension not monitored) ---", report.file)];
    }

    let mut lines = vec![format!(
        "--- {} ({} definitions found) ---",
        report.file,
        report.methods.len()
    )];
    if report.methods.is_empty() {
        lines.push("No definitions matched.".to_string());
        return lines;
    }

    for m in &report.methods {
        lines.push(String::new());
        lines.push(RULE.to_string());
        lines.push(format!("{} (line {}, body at line {})", m.name, m.line, m.brace_line));
        lines.push(RULE.to_string());
        lines.push("Header comment:".to_string());
        lines.push(
            m.header_comment
                .clone()
                .unwrap_or_else(|| "No header comment found.".to_string()),
        );
        lines.push(String::new());
        lines.push("Signature:".to_string());
        lines.push(m.signature.clone());
        lines.push(String::new());
        lines.push("Parameters:".to_string());
        lines.push(format!("({})", m.parameters));
        lines.push(String::new());
        lines.push("Initializer list:".to_string());
        lines.push(m.initializer_list.clone().unwrap_or_else(|| "N/A".to_string()));
        lines.push(String::new());
        lines.push("Body:".to_string());
        lines.push(m.body.clone());
    }
    lines
}

/// Write the monitoring view in pretty format.
pub fn write_monitor_pretty(reports: &[FileMonitor]) {
    for report in reports {
        for (i, line) in monitor_lines(report).iter().enumerate() {
            if i == 0 {
                println!("{}", line.cyan().bold());
            } else if line == RULE {
                println!("{}", line.dimmed());
            } else {
                println!("{}", line);
            }
        }
        println!();
    }
}

/// Write the monitoring view as JSON.
pub fn write_monitor_json(reports: &[FileMonitor]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}
