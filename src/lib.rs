//! Grime: mess detector for PHP
//!
//! This library provides a language-agnostic rule-dispatch engine: it walks a
//! pre-built syntax tree, evaluates applicable rules per node kind, collects
//! violations and parse errors into a report, and renders that report into
//! multiple output formats (text, JSON, and PHPMD-compatible JUnit XML).

pub mod config;
pub mod node;
pub mod parser;
pub mod renderer;
pub mod report;
pub mod rules;
pub mod writer;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of a syntax node subject to rule evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Class,
    Interface,
    Trait,
    Method,
    Function,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Class => write!(f, "class"),
            NodeKind::Interface => write!(f, "interface"),
            NodeKind::Trait => write!(f, "trait"),
            NodeKind::Method => write!(f, "method"),
            NodeKind::Function => write!(f, "function"),
        }
    }
}

/// Rule priority, 1 (highest) through 5 (lowest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    MediumHigh,
    Medium,
    MediumLow,
    Low,
}

impl Priority {
    /// Numeric level as used in rule set definitions (1-5)
    pub fn level(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::MediumHigh => 2,
            Priority::Medium => 3,
            Priority::MediumLow => 4,
            Priority::Low => 5,
        }
    }

    /// Priority for a numeric level; out-of-range levels clamp to the ends
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Priority::High,
            2 => Priority::MediumHigh,
            3 => Priority::Medium,
            4 => Priority::MediumLow,
            _ => Priority::Low,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// A single rule match against a single node
///
/// Created exactly once per match and immutable afterwards. The rule set name
/// records provenance for report output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Short name of the rule that matched
    pub rule: String,
    /// Display name of the rule set the rule belongs to
    pub rule_set: String,
    /// Source file the violation was found in
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Human-readable description of the violation
    pub description: String,
}

impl Violation {
    pub fn new(
        rule: impl Into<String>,
        rule_set: impl Into<String>,
        file: impl Into<PathBuf>,
        line: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            rule_set: rule_set.into(),
            file: file.into(),
            line,
            description: description.into(),
        }
    }
}

/// A recoverable fault raised while building or visiting a syntax tree
///
/// One entry per unparsable file; the run continues past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingError {
    /// File the fault was raised for
    pub file: PathBuf,
    /// Provider-supplied message
    pub message: String,
}

impl ProcessingError {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Public API: analyze a set of PHP files with the given rule sets.
///
/// Builds the bundled PHP syntax provider over `files`, dispatches every
/// user-defined class, method, and function through `rule_sets`, and returns
/// the populated report. Unparsable files surface as report errors, not as
/// an `Err` from this function.
pub fn analyze(
    files: Vec<PathBuf>,
    rule_sets: Vec<rules::RuleSet>,
) -> anyhow::Result<report::Report> {
    let provider = parser::php::PhpProvider::new(files)?;
    let mut parser = parser::Parser::new(provider);
    for rule_set in rule_sets {
        parser.add_rule_set(rule_set);
    }
    let mut report = report::Report::new();
    parser.parse(&mut report)?;
    Ok(report)
}

/// Convenience: analyze files with the built-in rule sets and optional config
pub fn analyze_with_defaults(
    files: Vec<PathBuf>,
    config: Option<&config::Config>,
) -> anyhow::Result<report::Report> {
    analyze(files, vec![rules::naming::naming_rule_set(config)])
}

/// True if `path` looks like a PHP source file
pub fn is_php_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("php") | Some("phtml")
    )
}
