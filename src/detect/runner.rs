//! Detection runner that orchestrates all checks.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use crate::config::{extension_in, Config};
use crate::scan::{DefinitionScanner, FunctionRecord};
use crate::source::read_source;

use super::{
    detect_documentation_mismatches, detect_long_lines, detect_pending_markers,
    detect_unused_parameters, filter_suppressed, marker_pattern, parse_suppressions,
    DetectionResult, ViolationRule,
};

/// Executes all enabled checks against a set of files.
pub struct Runner {
    config: Config,
    only: Vec<ViolationRule>,
    markers: Regex,
}

impl Runner {
    /// Create a new detection runner.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let markers = marker_pattern(&config.pending_markers.keywords)?;
        Ok(Self {
            config,
            only: Vec::new(),
            markers,
        })
    }

    /// Restrict reporting to the given rules. Empty means every rule.
    pub fn only(mut self, rules: Vec<ViolationRule>) -> Self {
        self.only = rules;
        self
    }

    fn wants(&self, rule: ViolationRule) -> bool {
        self.only.is_empty() || self.only.contains(&rule)
    }

    /// Run every enabled check over `files`.
    ///
    /// Files are scanned in parallel; the merged result keeps the order of
    /// `files`, with each file's violations sorted by line.
    pub fn run(&self, files: &[PathBuf]) -> anyhow::Result<DetectionResult> {
        let per_file = files
            .par_iter()
            .map(|path| self.check_file(path))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut result = DetectionResult::new();
        for file_result in per_file {
            result.merge(file_result);
        }
        Ok(result)
    }

    /// Read and check a single file.
    pub fn check_file(&self, path: &Path) -> anyhow::Result<DetectionResult> {
        let text = read_source(path)?;
        Ok(self.check_text(path, &text))
    }

    /// Check already-decoded text. `path` names the file in violations and
    /// decides which checks apply to it.
    pub fn check_text(&self, path: &Path, text: &str) -> DetectionResult {
        let file = path.to_string_lossy();
        let config = &self.config;
        let mut result = DetectionResult {
            scanned: 1,
            ..Default::default()
        };

        let check_unused = config.unused_parameters.enabled
            && self.wants(ViolationRule::UnusedParameter)
            && !extension_in(path, &config.unused_parameters.skip_extensions);
        let check_docs = config.documented_parameters.enabled
            && (self.wants(ViolationRule::UndocumentedParameter)
                || self.wants(ViolationRule::ExtraDocumentedParameter))
            && extension_in(path, &config.documented_parameters.extensions);

        if check_unused || check_docs {
            let records: Vec<FunctionRecord<'_>> = DefinitionScanner::new(text).collect();
            debug!(file = %file, functions = records.len(), "scanned definitions");
            result.functions = records.len();

            if check_unused {
                result
                    .violations
                    .extend(detect_unused_parameters(&file, &records));
            }
            if check_docs {
                result
                    .violations
                    .extend(detect_documentation_mismatches(&file, &records));
            }
        } else {
            debug!(file = %file, "no parameter checks apply");
        }

        let line_length = &config.line_length;
        if line_length.enabled
            && self.wants(ViolationRule::LineLength)
            && (line_length.extensions.is_empty() || extension_in(path, &line_length.extensions))
        {
            result
                .violations
                .extend(detect_long_lines(&file, text, line_length.max));
        }

        if config.pending_markers.enabled && self.wants(ViolationRule::PendingMarker) {
            result
                .violations
                .extend(detect_pending_markers(&file, text, &self.markers));
        }

        result.violations.retain(|v| self.wants(v.rule));
        result
            .violations
            .sort_by(|a, b| (a.line, a.rule).cmp(&(b.line, b.rule)));

        let suppressions = parse_suppressions(&file, text);
        if !suppressions.is_empty() {
            let (active, suppressed) =
                filter_suppressed(std::mem::take(&mut result.violations), &suppressions);
            result.violations = active;
            result.suppressed = suppressed;
        }

        result
    }
}
