//! Method monitoring: a readable dump of every definition in a file.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::{extension_in, MonitorConfig};
use crate::scan::{DefinitionScanner, LineIndex, Locator};
use crate::source::read_source;

/// One extracted definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodEntry {
    pub name: String,
    /// 1-based line where the signature starts.
    pub line: usize,
    /// 1-based line of the opening brace.
    pub brace_line: usize,
    pub header_comment: Option<String>,
    /// Signature text, without any initializer list.
    pub signature: String,
    /// Parameter list as written.
    pub parameters: String,
    pub initializer_list: Option<String>,
    /// Body text between the braces, trimmed.
    pub body: String,
}

/// Monitoring output for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileMonitor {
    pub file: String,
    /// True when the extension is excluded from monitoring.
    pub skipped: bool,
    pub methods: Vec<MethodEntry>,
}

/// Extract every definition with a complete body.
///
/// Declarations and definitions whose body never closes are left out.
pub fn monitor_text(text: &str, locator: Locator) -> Vec<MethodEntry> {
    let lines = LineIndex::new(text);

    DefinitionScanner::with_locator(text, locator)
        .filter_map(|record| {
            let body = record.body?;
            let def = &record.definition;
            Some(MethodEntry {
                name: def.qualified_name.to_string(),
                line: record.line,
                brace_line: lines.line_of(def.body_start_offset),
                header_comment: record.header_comment.clone(),
                signature: def.signature.to_string(),
                parameters: def.parameter_text.trim().to_string(),
                initializer_list: def.initializer_list.map(str::to_string),
                body: body.text.trim().to_string(),
            })
        })
        .collect()
}

/// Runs the monitoring view over files.
pub struct Monitor {
    config: MonitorConfig,
    locator: Locator,
}

impl Monitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            locator: Locator::new(),
        }
    }

    /// Only report `Scope::name` and operator definitions.
    pub fn qualified_only(mut self, yes: bool) -> Self {
        self.locator = self.locator.qualified_only(yes);
        self
    }

    pub fn run(&self, files: &[PathBuf]) -> anyhow::Result<Vec<FileMonitor>> {
        files.par_iter().map(|path| self.check_file(path)).collect()
    }

    pub fn check_file(&self, path: &Path) -> anyhow::Result<FileMonitor> {
        let file = path.to_string_lossy().to_string();
        if extension_in(path, &self.config.skip_extensions) {
            debug!(file = %file, "monitoring skipped for extension");
            return Ok(FileMonitor {
                file,
                skipped: true,
                methods: Vec::new(),
            });
        }

        let text = read_source(path)?;
        Ok(FileMonitor {
            methods: monitor_text(&text, self.locator),
            file,
            skipped: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCE: &str = r#"int helper(int v) { return v; }

// Builds a point.
Point::Point(int x, int y)
    : x_(x), y_(y)
{
    check();
}

void Point::broken(int z) {
"#;

    #[test]
    fn test_monitor_entries() {
        let entries = monitor_text(SOURCE, Locator::new());
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "helper");
        assert_eq!(entries[0].header_comment, None);
        assert_eq!(entries[0].body, "return v;");

        let ctor = &entries[1];
        assert_eq!(ctor.name, "Point::Point");
        assert_eq!(ctor.line, 4);
        assert_eq!(ctor.brace_line, 6);
        assert_eq!(ctor.header_comment.as_deref(), Some("// Builds a point."));
        assert_eq!(ctor.signature, "Point::Point(int x, int y)");
        assert_eq!(ctor.parameters, "int x, int y");
        assert_eq!(ctor.initializer_list.as_deref(), Some(": x_(x), y_(y)"));
        assert_eq!(ctor.body, "check();");
    }

    #[test]
    fn test_qualified_only() {
        let entries = monitor_text(SOURCE, Locator::new().qualified_only(true));
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Point::Point"]);
    }

    #[test]
    fn test_skipped_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README.md");
        std::fs::write(&path, "void f() {}").unwrap();
        let report = Monitor::new(MonitorConfig::default())
            .check_file(&path)
            .unwrap();
        assert!(report.skipped);
        assert!(report.methods.is_empty());
    }
}
