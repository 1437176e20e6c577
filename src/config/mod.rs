//! Configuration loading for Grime

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".grimerc.json";

/// Analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Drop rules below this priority level (1 strictest, 5 keeps all)
    pub minimum_priority: Option<u8>,
    /// Per-rule settings keyed by rule name
    pub rules: HashMap<String, RuleSetting>,
    /// Glob patterns for paths to skip during file discovery
    pub ignore: Vec<String>,
}

/// Setting for one rule: a bare on/off toggle or an options object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Toggle(String),
    Options(RuleOptions),
}

/// Tunable options for a single rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleOptions {
    pub enabled: Option<bool>,
    /// Threshold for length-based rules
    pub minimum: Option<usize>,
}

impl Config {
    /// Whether `rule` is enabled; rules default to enabled when unconfigured
    pub fn rule_enabled(&self, rule: &str) -> bool {
        match self.rules.get(rule) {
            Some(RuleSetting::Toggle(toggle)) => !toggle.eq_ignore_ascii_case("off"),
            Some(RuleSetting::Options(options)) => options.enabled.unwrap_or(true),
            None => true,
        }
    }

    /// Configured `minimum` threshold for `rule`, if any
    pub fn rule_minimum(&self, rule: &str) -> Option<usize> {
        match self.rules.get(rule) {
            Some(RuleSetting::Options(options)) => options.minimum,
            _ => None,
        }
    }
}

/// Find and load the config file. Searches `work_dir` then its parents unless
/// an explicit path is given.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Search for the config file in `dir` and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Build a GlobSet from ignore patterns for path matching
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| anyhow::anyhow!("{}", e))
}

/// Check if a path should be ignored based on config glob patterns
pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}
