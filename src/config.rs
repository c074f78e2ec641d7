//! Configuration schema for paramlint.
//!
//! Every section is optional; a missing file or a missing key falls back to
//! the built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names searched for in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["paramlint.yaml", ".paramlint.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Extensions collected when scanning a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns for paths to exclude (e.g. "**/third_party/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub line_length: LineLengthConfig,
    #[serde(default)]
    pub pending_markers: PendingMarkersConfig,
    #[serde(default)]
    pub unused_parameters: UnusedParametersConfig,
    #[serde(default)]
    pub documented_parameters: DocumentedParametersConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excluded_paths: Vec::new(),
            line_length: LineLengthConfig::default(),
            pending_markers: PendingMarkersConfig::default(),
            unused_parameters: UnusedParametersConfig::default(),
            documented_parameters: DocumentedParametersConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Load `explicit` if given, otherwise the first config file found in
    /// `dir`, otherwise the defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::parse_file(path);
        }
        match discover(dir) {
            Some(path) => {
                debug!(path = %path.display(), "using discovered config");
                Self::parse_file(path)
            }
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check if a path should be excluded based on `excluded_paths`.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                if glob.compile_matcher().is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether `path` has one of the collected extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        extension_in(path, &self.extensions)
    }
}

/// Line-length check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineLengthConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Longest allowed line, in characters (default: 120)
    #[serde(default = "default_max_line_length")]
    pub max: usize,
    /// Only check these extensions; empty means every collected file.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Default for LineLengthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max: default_max_line_length(),
            extensions: Vec::new(),
        }
    }
}

/// TODO/FIXME/HACK markers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PendingMarkersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Matched case-insensitively as whole words.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for PendingMarkersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keywords: default_keywords(),
        }
    }
}

/// Unused-parameter check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnusedParametersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_markup_extensions")]
    pub skip_extensions: Vec<String>,
}

impl Default for UnusedParametersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            skip_extensions: default_markup_extensions(),
        }
    }
}

/// Header-comment `\param` consistency check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentedParametersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_documented_extensions")]
    pub extensions: Vec<String>,
}

impl Default for DocumentedParametersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extensions: default_documented_extensions(),
        }
    }
}

/// The method monitoring view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    #[serde(default = "default_markup_extensions")]
    pub skip_extensions: Vec<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            skip_extensions: default_markup_extensions(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_line_length() -> usize {
    120
}

fn default_extensions() -> Vec<String> {
    to_strings(&["h", "cpp", "hpp", "cc", "c", "py", "js", "ts", "jsx", "tsx"])
}

fn default_keywords() -> Vec<String> {
    to_strings(&["TODO", "FIXME", "HACK"])
}

fn default_markup_extensions() -> Vec<String> {
    to_strings(&["html", "css", "md"])
}

fn default_documented_extensions() -> Vec<String> {
    to_strings(&["cpp", "c", "h", "hpp", "py", "js", "ts"])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Whether the extension of `path` is in `list` (case-insensitive, with or
/// without a leading dot).
pub fn extension_in(path: &Path, list: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    list.iter()
        .any(|item| item.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// First config file in `dir`, if any.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.line_length.enabled && config.line_length.max == 0 {
        anyhow::bail!("line_length.max must be greater than 0");
    }

    if config.pending_markers.enabled {
        if config.pending_markers.keywords.is_empty() {
            anyhow::bail!("pending_markers.keywords must not be empty");
        }
        if let Some(k) = config
            .pending_markers
            .keywords
            .iter()
            .find(|k| k.trim().is_empty())
        {
            anyhow::bail!("invalid pending_markers keyword {:?}", k);
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

/// The YAML written by `paramlint init`.
pub fn default_yaml() -> String {
    format!(
        "# paramlint configuration\n{}",
        serde_yaml::to_string(&Config::default()).unwrap_or_default()
    )
}
