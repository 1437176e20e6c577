//! Rule trait, dispatch context, and rule sets

pub mod naming;

use crate::node::AstNode;
use crate::report::Report;
use crate::{NodeKind, Priority, Violation};
use std::path::Path;

/// A single analysis rule
///
/// Rules are stateless across invocations; configured thresholds are plain
/// fields set at construction time. A rule declares the node kinds it applies
/// to and emits violations through the [`RuleContext`] it is handed.
pub trait Rule {
    /// Short kebab-case name, used in reports and suppress directives
    fn name(&self) -> &str;

    /// Priority of violations produced by this rule
    fn priority(&self) -> Priority {
        Priority::Medium
    }

    /// Whether this rule wants to see nodes of `kind`
    fn applies_to(&self, kind: NodeKind) -> bool;

    /// Evaluate one node, reporting matches through `ctx`
    fn check(&self, node: &AstNode<'_>, ctx: &mut RuleContext<'_>);
}

/// Violation sink handed to a rule for one node evaluation
///
/// Centralizes violation construction so every violation carries the rule
/// name, rule set provenance, and the node's source location.
pub struct RuleContext<'a> {
    rule_name: &'a str,
    rule_set: &'a str,
    file: &'a Path,
    node_line: usize,
    report: &'a mut Report,
}

impl RuleContext<'_> {
    /// Record a violation at the node's own line
    pub fn violation(&mut self, description: impl Into<String>) {
        self.violation_at(self.node_line, description);
    }

    /// Record a violation at an explicit line of the node's file
    pub fn violation_at(&mut self, line: usize, description: impl Into<String>) {
        self.report.add_violation(Violation::new(
            self.rule_name,
            self.rule_set,
            self.file,
            line,
            description,
        ));
    }
}

/// A named, ordered collection of rules sharing provenance
///
/// The display name travels into every violation the set's rules produce.
pub struct RuleSet {
    name: String,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a rule; evaluation order follows insertion order
    pub fn add_rule(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Drop rules whose priority is below `minimum` (higher level = lower priority)
    pub fn retain_priority(&mut self, minimum: Priority) {
        self.rules.retain(|rule| rule.priority() <= minimum);
    }

    /// Evaluate `node` against every applicable rule in order
    ///
    /// Rules that do not apply to the node's kind are filtered out, as are
    /// rules named by a suppress annotation on the node.
    pub fn apply(&self, node: &AstNode<'_>, report: &mut Report) {
        for rule in &self.rules {
            if !rule.applies_to(node.kind()) {
                continue;
            }
            if node.has_suppress_warnings_annotation_for(rule.as_ref(), &self.name) {
                continue;
            }
            let mut ctx = RuleContext {
                rule_name: rule.name(),
                rule_set: &self.name,
                file: node.file(),
                node_line: node.line(),
                report,
            };
            rule.check(node, &mut ctx);
        }
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SyntaxElement;
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;

    struct Element {
        image: String,
        doc: Option<String>,
    }

    impl SyntaxElement for Element {
        fn image(&self) -> &str {
            &self.image
        }

        fn line(&self) -> usize {
            4
        }

        fn file_name(&self) -> Option<&Path> {
            Some(Path::new("/src/a.php"))
        }

        fn doc_comment(&self) -> Option<&str> {
            self.doc.as_deref()
        }
    }

    struct CountingRule {
        kind: NodeKind,
        calls: Rc<Cell<usize>>,
    }

    impl Rule for CountingRule {
        fn name(&self) -> &str {
            "counting-rule"
        }

        fn applies_to(&self, kind: NodeKind) -> bool {
            kind == self.kind
        }

        fn check(&self, _node: &AstNode<'_>, ctx: &mut RuleContext<'_>) {
            self.calls.set(self.calls.get() + 1);
            ctx.violation("counted");
        }
    }

    fn element(image: &str) -> Element {
        Element {
            image: image.to_string(),
            doc: None,
        }
    }

    #[test]
    fn apply_invokes_each_applicable_rule_once() {
        let calls = Rc::new(Cell::new(0));
        let mut set = RuleSet::new("Test Set");
        set.add_rule(CountingRule {
            kind: NodeKind::Method,
            calls: Rc::clone(&calls),
        });
        set.add_rule(CountingRule {
            kind: NodeKind::Method,
            calls: Rc::clone(&calls),
        });

        let element = element("doWork");
        let file = PathBuf::from("/src/a.php");
        let node = AstNode::new(NodeKind::Method, &element, &file);
        let mut report = Report::new();
        set.apply(&node, &mut report);

        assert_eq!(calls.get(), 2);
        assert_eq!(report.violation_count(), 2);
    }

    #[test]
    fn apply_filters_by_node_kind() {
        let calls = Rc::new(Cell::new(0));
        let mut set = RuleSet::new("Test Set");
        set.add_rule(CountingRule {
            kind: NodeKind::Class,
            calls: Rc::clone(&calls),
        });

        let element = element("doWork");
        let file = PathBuf::from("/src/a.php");
        let node = AstNode::new(NodeKind::Function, &element, &file);
        let mut report = Report::new();
        set.apply(&node, &mut report);

        assert_eq!(calls.get(), 0);
        assert!(report.is_empty());
    }

    #[test]
    fn apply_honors_suppress_annotation() {
        let calls = Rc::new(Cell::new(0));
        let mut set = RuleSet::new("Test Set");
        set.add_rule(CountingRule {
            kind: NodeKind::Method,
            calls: Rc::clone(&calls),
        });

        let element = Element {
            image: "doWork".to_string(),
            doc: Some("/** @SuppressWarnings(\"counting-rule\") */".to_string()),
        };
        let file = PathBuf::from("/src/a.php");
        let node = AstNode::new(NodeKind::Method, &element, &file);
        let mut report = Report::new();
        set.apply(&node, &mut report);

        assert_eq!(calls.get(), 0);
        assert!(report.is_empty());
    }

    #[test]
    fn violations_carry_rule_set_provenance() {
        let mut set = RuleSet::new("Provenance Set");
        set.add_rule(CountingRule {
            kind: NodeKind::Method,
            calls: Rc::new(Cell::new(0)),
        });

        let element = element("doWork");
        let file = PathBuf::from("/src/a.php");
        let node = AstNode::new(NodeKind::Method, &element, &file);
        let mut report = Report::new();
        set.apply(&node, &mut report);

        let violation = report.violations().next().unwrap();
        assert_eq!(violation.rule, "counting-rule");
        assert_eq!(violation.rule_set, "Provenance Set");
        assert_eq!(violation.file, PathBuf::from("/src/a.php"));
        assert_eq!(violation.line, 4);
    }

    #[test]
    fn retain_priority_drops_low_priority_rules() {
        struct LowPriorityRule;
        impl Rule for LowPriorityRule {
            fn name(&self) -> &str {
                "low"
            }
            fn priority(&self) -> Priority {
                Priority::Low
            }
            fn applies_to(&self, _kind: NodeKind) -> bool {
                true
            }
            fn check(&self, _node: &AstNode<'_>, _ctx: &mut RuleContext<'_>) {}
        }

        let mut set = RuleSet::new("Test Set");
        set.add_rule(LowPriorityRule);
        set.add_rule(CountingRule {
            kind: NodeKind::Method,
            calls: Rc::new(Cell::new(0)),
        });
        assert_eq!(set.len(), 2);

        set.retain_priority(Priority::Medium);
        assert_eq!(set.len(), 1);
    }
}
