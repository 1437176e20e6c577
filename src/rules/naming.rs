//! Built-in naming rules
//!
//! These rules only look at a node's name and enclosing scope, so they work
//! with any syntax provider.

use super::{Rule, RuleContext, RuleSet};
use crate::config::Config;
use crate::node::AstNode;
use crate::{NodeKind, Priority};
use regex::Regex;
use std::sync::OnceLock;

const DEFAULT_MINIMUM_NAME_LENGTH: usize = 3;

/// Methods and functions should carry descriptive names
pub struct ShortMethodName {
    /// Shortest acceptable name length
    pub minimum: usize,
}

impl Rule for ShortMethodName {
    fn name(&self) -> &str {
        "short-method-name"
    }

    fn applies_to(&self, kind: NodeKind) -> bool {
        matches!(kind, NodeKind::Method | NodeKind::Function)
    }

    fn check(&self, node: &AstNode<'_>, ctx: &mut RuleContext<'_>) {
        if node.name().chars().count() < self.minimum {
            ctx.violation(format!(
                "Avoid using short method names like {}(). The configured minimum length is {}.",
                node.name(),
                self.minimum
            ));
        }
    }
}

/// Class-like declarations should carry descriptive names
pub struct ShortClassName {
    pub minimum: usize,
}

impl Rule for ShortClassName {
    fn name(&self) -> &str {
        "short-class-name"
    }

    fn applies_to(&self, kind: NodeKind) -> bool {
        matches!(kind, NodeKind::Class | NodeKind::Interface | NodeKind::Trait)
    }

    fn check(&self, node: &AstNode<'_>, ctx: &mut RuleContext<'_>) {
        if node.name().chars().count() < self.minimum {
            ctx.violation(format!(
                "Avoid using short class names like {}. The configured minimum length is {}.",
                node.name(),
                self.minimum
            ));
        }
    }
}

/// Class-like declarations must be named in CamelCase
pub struct CamelCaseClassName;

impl Rule for CamelCaseClassName {
    fn name(&self) -> &str {
        "camelcase-class-name"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn applies_to(&self, kind: NodeKind) -> bool {
        matches!(kind, NodeKind::Class | NodeKind::Interface | NodeKind::Trait)
    }

    fn check(&self, node: &AstNode<'_>, ctx: &mut RuleContext<'_>) {
        if !class_name_regex().is_match(node.name()) {
            ctx.violation(format!("The {} {} is not named in CamelCase.", node.kind(), node.name()));
        }
    }
}

/// Methods must be named in camelCase
///
/// Double-underscore names are exempt; those are reserved magic methods.
pub struct CamelCaseMethodName;

impl Rule for CamelCaseMethodName {
    fn name(&self) -> &str {
        "camelcase-method-name"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn applies_to(&self, kind: NodeKind) -> bool {
        kind == NodeKind::Method
    }

    fn check(&self, node: &AstNode<'_>, ctx: &mut RuleContext<'_>) {
        if node.name().starts_with("__") {
            return;
        }
        if !method_name_regex().is_match(node.name()) {
            ctx.violation(format!(
                "The method {}() is not named in camelCase.",
                node.name()
            ));
        }
    }
}

/// A method named like its enclosing class is an obsolete PHP 4 constructor
pub struct ConstructorWithNameAsEnclosingClass;

impl Rule for ConstructorWithNameAsEnclosingClass {
    fn name(&self) -> &str {
        "constructor-with-name-as-enclosing-class"
    }

    fn applies_to(&self, kind: NodeKind) -> bool {
        kind == NodeKind::Method
    }

    fn check(&self, node: &AstNode<'_>, ctx: &mut RuleContext<'_>) {
        let Some(parent) = node.parent_name() else {
            return;
        };
        // PHP class and method names compare case-insensitively.
        if parent.eq_ignore_ascii_case(node.name()) {
            ctx.violation(format!(
                "Classes should not have a constructor method with the same name as the class. \
                 Rename {}::{}() to __construct().",
                parent,
                node.name()
            ));
        }
    }
}

fn class_name_regex() -> &'static Regex {
    static CLASS_NAME: OnceLock<Regex> = OnceLock::new();
    CLASS_NAME.get_or_init(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("valid pattern"))
}

fn method_name_regex() -> &'static Regex {
    static METHOD_NAME: OnceLock<Regex> = OnceLock::new();
    METHOD_NAME.get_or_init(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("valid pattern"))
}

/// Assemble the built-in naming rule set, honoring config toggles, thresholds,
/// and the minimum priority filter
pub fn naming_rule_set(config: Option<&Config>) -> RuleSet {
    let enabled = |rule: &str| config.map_or(true, |c| c.rule_enabled(rule));
    let minimum = |rule: &str| {
        config
            .and_then(|c| c.rule_minimum(rule))
            .unwrap_or(DEFAULT_MINIMUM_NAME_LENGTH)
    };

    let mut set = RuleSet::new("Naming Rules");
    if enabled("short-method-name") {
        set.add_rule(ShortMethodName {
            minimum: minimum("short-method-name"),
        });
    }
    if enabled("short-class-name") {
        set.add_rule(ShortClassName {
            minimum: minimum("short-class-name"),
        });
    }
    if enabled("camelcase-class-name") {
        set.add_rule(CamelCaseClassName);
    }
    if enabled("camelcase-method-name") {
        set.add_rule(CamelCaseMethodName);
    }
    if enabled("constructor-with-name-as-enclosing-class") {
        set.add_rule(ConstructorWithNameAsEnclosingClass);
    }

    if let Some(level) = config.and_then(|c| c.minimum_priority) {
        set.retain_priority(Priority::from_level(level));
    }
    set
}
