//! Command-line interface for paramlint.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{self, Config};
use crate::detect::{Runner, ViolationRule};
use crate::logging::LogFormat;
use crate::monitor::Monitor;
use crate::report;
use crate::source::collect_files;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Parameter and documentation linter for C-family sources.
///
/// Finds function definitions without a full parser and checks that every
/// parameter is used in the body and documented in the header comment.
#[derive(Parser)]
#[command(name = "paramlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command.
#[derive(Args)]
pub struct GlobalArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check parameters, documentation, line length and pending markers
    #[command(visible_alias = "check")]
    Lint(LintArgs),
    /// Print every extracted definition with its comment, parameters and body
    Monitor(MonitorArgs),
    /// Write a default paramlint.yaml
    Init(InitArgs),
}

/// Arguments for the lint command.
#[derive(Parser)]
pub struct LintArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Only report these rules (repeatable)
    #[arg(long = "only", value_name = "RULE")]
    pub only: Vec<String>,

    /// Show suppressed violations in output
    #[arg(long)]
    pub show_suppressed: bool,
}

/// Arguments for the monitor command.
#[derive(Parser)]
pub struct MonitorArgs {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Only report Class::method and operator definitions
    #[arg(long)]
    pub qualified_only: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "paramlint.yaml")]
    pub output: PathBuf,
}

/// Load and validate the config, printing the reason on failure.
fn load_config(explicit: Option<&Path>) -> Result<(Config, String), i32> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let shown = match explicit {
        Some(p) => p.display().to_string(),
        None => config::discover(&cwd)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string()),
    };

    let config = match Config::load(explicit, &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Err(EXIT_ERROR);
    }

    Ok((config, shown))
}

/// Resolve `path` and collect the files to scan.
fn resolve_files(path: &Path, config: &Config) -> Result<(PathBuf, Vec<PathBuf>), i32> {
    let abs_path = match path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", path, e);
            return Err(EXIT_ERROR);
        }
    };

    match collect_files(&abs_path, config) {
        Ok(files) => Ok((abs_path, files)),
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(EXIT_ERROR)
        }
    }
}

/// Run the lint command.
pub fn run_lint(args: &LintArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let mut only = Vec::new();
    for name in &args.only {
        match ViolationRule::parse(name) {
            Some(rule) => only.push(rule),
            None => {
                let known: Vec<_> = ViolationRule::ALL.iter().map(|r| r.as_str()).collect();
                eprintln!(
                    "Error: unknown rule {:?}, expected one of: {}",
                    name,
                    known.join(", ")
                );
                return Ok(EXIT_ERROR);
            }
        }
    }

    let (config, config_shown) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return Ok(code),
    };

    let (abs_path, files) = match resolve_files(&args.path, &config) {
        Ok(resolved) => resolved,
        Err(code) => return Ok(code),
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }
    info!(files = files.len(), config = %config_shown, "starting lint");

    let runner = Runner::new(config)?.only(only);
    let result = runner.run(&files)?;

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &config_shown, &result)?,
        "sarif" => report::write_sarif(&abs_path, &result)?,
        _ => report::write_pretty(&path_str, &config_shown, &result, args.show_suppressed),
    }

    if result.has_errors() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the monitor command.
pub fn run_monitor(args: &MonitorArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let (config, _) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return Ok(code),
    };

    let (_, files) = match resolve_files(&args.path, &config) {
        Ok(resolved) => resolved,
        Err(code) => return Ok(code),
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    let reports = Monitor::new(config.monitor)
        .qualified_only(args.qualified_only)
        .run(&files)?;

    match args.format.as_str() {
        "json" => report::write_monitor_json(&reports)?,
        _ => report::write_monitor_pretty(&reports),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::default_yaml()) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: paramlint lint . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lint_flags() {
        let cli = Cli::try_parse_from([
            "paramlint", "-vv", "check", "src", "--only", "unused_parameter", "--only",
            "line_length", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.global.verbose, 2);
        match cli.command {
            Commands::Lint(args) => {
                assert_eq!(args.only, vec!["unused_parameter", "line_length"]);
                assert_eq!(args.format, "json");
            }
            _ => panic!("expected lint"),
        }
    }

    #[test]
    fn test_unknown_rule_is_usage_error() {
        let args = LintArgs {
            path: PathBuf::from("."),
            config: None,
            format: "pretty".to_string(),
            only: vec!["god_class".to_string()],
            show_suppressed: false,
        };
        assert_eq!(run_lint(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("cfg/paramlint.yaml");
        let args = InitArgs {
            output: output.clone(),
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        assert!(Config::parse_file(&output).is_ok());
        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);
    }
}
