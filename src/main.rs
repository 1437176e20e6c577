//! Grime: PHP mess detector CLI

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use grime::config::{build_ignore_set, is_ignored, load_config, Config};
use grime::renderer::{render_report, JsonRenderer, JunitRenderer, Renderer, TextRenderer};
use grime::report::Report;
use grime::writer::StreamWriter;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Grime: mess detector for PHP
#[derive(Parser, Debug)]
#[command(name = "grime")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Files or directories to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Report format
    #[arg(long, short, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Only run rules at or above this priority level (1-5)
    #[arg(long, value_name = "LEVEL")]
    minimum_priority: Option<u8>,

    /// Path to config file (default: search .grimerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat processing errors like violations for the exit code
    #[arg(long)]
    strict: bool,

    /// Suppress the summary line on stderr
    #[arg(long, short)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
    Junit,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let work_dir = work_dir_for(&args.paths);
    let mut config = load_config(&work_dir, args.config.as_deref())?;
    if args.minimum_priority.is_some() {
        // CLI flag overrides the config file.
        config.minimum_priority = args.minimum_priority;
    }

    let files = collect_php_files(&args.paths, &config)?;
    if files.is_empty() {
        eprintln!("{}: No PHP files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    let report = grime::analyze_with_defaults(files, Some(&config))?;
    write_report(&report, args.format, args.output.as_deref())?;

    if !args.quiet {
        print_summary(&report);
    }

    let failed = report.violation_count() > 0 || (args.strict && report.error_count() > 0);
    Ok(if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

/// Directory the config search starts from
fn work_dir_for(paths: &[PathBuf]) -> PathBuf {
    let first = paths.first().map(PathBuf::as_path).unwrap_or(Path::new("."));
    if first.is_file() {
        first.parent().unwrap_or(Path::new(".")).to_path_buf()
    } else {
        first.to_path_buf()
    }
}

/// Walk the given paths for PHP files, honoring config ignore globs
fn collect_php_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let candidate = entry.path();
            if !entry.file_type().is_file() || !grime::is_php_file(candidate) {
                continue;
            }
            if let Some(ref set) = ignore_set {
                if is_ignored(candidate, set) {
                    continue;
                }
            }
            files.push(candidate.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Render the report to the selected sink in the selected format
fn write_report(report: &Report, format: Format, output: Option<&Path>) -> Result<()> {
    let mut renderer: Box<dyn Renderer> = match format {
        Format::Text => Box::new(TextRenderer::new()),
        Format::Json => Box::new(JsonRenderer::new().pretty()),
        Format::Junit => Box::new(JunitRenderer::new()),
    };

    match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create report file: {}", path.display()))?;
            let mut writer = StreamWriter::new(file);
            render_report(renderer.as_mut(), report, &mut writer)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = StreamWriter::new(stdout.lock());
            render_report(renderer.as_mut(), report, &mut writer)
                .context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}

fn print_summary(report: &Report) {
    let violations = report.violation_count();
    let errors = report.error_count();
    if report.is_empty() {
        eprintln!("{}: no mess found", "Clean".green().bold());
        return;
    }
    let violations_str = format!("{} violation(s)", violations);
    let colored_violations = if violations > 0 {
        violations_str.red()
    } else {
        violations_str.green()
    };
    if errors > 0 {
        eprintln!(
            "{} | {}",
            colored_violations,
            format!("{} file(s) could not be parsed", errors).yellow()
        );
    } else {
        eprintln!("{}", colored_violations);
    }
}
