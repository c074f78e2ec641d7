//! Source collection and decoding.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", "target", "build", "__pycache__"];

/// Collect the files under `root` that the configuration asks for.
///
/// A file given directly is returned as-is, whatever its extension. Results
/// are sorted so that output order does not depend on the file system.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !config.is_source_file(path) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(relative) || config.is_path_excluded(path) {
            debug!(path = %path.display(), "excluded by config");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Read a whole file and decode it.
pub fn read_source(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("reading file {}: {}", path.display(), e))?;
    Ok(decode(bytes, path))
}

/// UTF-8, falling back to Latin-1 when the bytes are not valid UTF-8.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback never fails.
pub fn decode(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug!(
                path = %path.display(),
                "not valid UTF-8 ({}), decoding as Latin-1",
                err.utf8_error()
            );
            err.into_bytes().iter().map(|&b| b as char).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_decode_latin1_fallback() {
        let bytes = b"// caf\xe9\nvoid f() {}".to_vec();
        let text = decode(bytes, Path::new("x.c"));
        assert!(text.starts_with("// café"));
        assert!(text.ends_with("void f() {}"));
    }

    #[test]
    fn test_decode_utf8() {
        let text = decode("// naïve".as_bytes().to_vec(), Path::new("x.c"));
        assert_eq!(text, "// naïve");
    }

    #[test]
    fn test_collect_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("src/gen")).unwrap();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::write(root.join("src/a.cpp"), "").unwrap();
        std::fs::write(root.join("src/b.h"), "").unwrap();
        std::fs::write(root.join("src/notes.md"), "").unwrap();
        std::fs::write(root.join("src/gen/c.cpp"), "").unwrap();
        std::fs::write(root.join(".git/d.c"), "").unwrap();
        std::fs::write(root.join("node_modules/pkg/e.js"), "").unwrap();

        let config = Config {
            excluded_paths: vec!["src/gen/**".to_string()],
            ..Default::default()
        };
        let files = collect_files(root, &config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["src/a.cpp", "src/b.h"]);
    }

    #[test]
    fn test_single_file_is_kept() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page.html");
        std::fs::write(&path, "").unwrap();
        assert_eq!(collect_files(&path, &Config::default()).unwrap(), vec![path]);
    }
}
