//! Dispatch adapter between a syntax provider and the rule pipeline

pub mod php;

use crate::node::{AstNode, ClassElement, SyntaxElement};
use crate::report::Report;
use crate::rules::RuleSet;
use crate::{NodeKind, ProcessingError};
use anyhow::Result;
use std::path::PathBuf;

pub use php::PhpProvider;

/// A structural failure the provider hit while building a syntax tree
///
/// Does not abort the run; the parser converts each failure into one report
/// error, preserving order.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub file: PathBuf,
    pub message: String,
}

impl ParseFailure {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Traversal callbacks a provider drives while walking its tree
pub trait AstVisitor {
    fn visit_class(&mut self, class: &dyn ClassElement);
    fn visit_method(&mut self, method: &dyn SyntaxElement);
    fn visit_function(&mut self, function: &dyn SyntaxElement);
}

/// The foreign engine producing the syntax tree
///
/// `analyze` drives one traversal, invoking the visitor for every class,
/// method, and function it encounters. Structural failures are collected
/// internally and handed out afterwards through `take_failures`.
pub trait SyntaxProvider {
    fn analyze(&mut self, visitor: &mut dyn AstVisitor) -> Result<()>;

    /// Failures collected during the last `analyze` call, in encounter order
    fn take_failures(&mut self) -> Vec<ParseFailure>;
}

/// Bridges provider traversal callbacks to rule-set evaluation
///
/// Wraps each user-defined node as an [`AstNode`] and forwards it to every
/// registered rule set. Nodes without an associated source file are library
/// references and are skipped without touching the report.
pub struct Parser<P> {
    provider: P,
    rule_sets: Vec<RuleSet>,
}

impl<P: SyntaxProvider> Parser<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            rule_sets: Vec::new(),
        }
    }

    /// Register a rule set; all registered sets are consulted per node
    pub fn add_rule_set(&mut self, rule_set: RuleSet) {
        self.rule_sets.push(rule_set);
    }

    /// Drive the provider's traversal, then convert its structural failures
    /// into report errors (exactly one per failure, in order)
    pub fn parse(&mut self, report: &mut Report) -> Result<()> {
        let mut applier = RuleApplier {
            rule_sets: &self.rule_sets,
            report,
        };
        self.provider.analyze(&mut applier)?;

        for failure in self.provider.take_failures() {
            report.add_error(ProcessingError::new(failure.file, failure.message));
        }
        Ok(())
    }
}

struct RuleApplier<'a> {
    rule_sets: &'a [RuleSet],
    report: &'a mut Report,
}

impl RuleApplier<'_> {
    fn dispatch(&mut self, kind: NodeKind, element: &dyn SyntaxElement) {
        // No compilation unit file means library/stub code: skip entirely.
        let Some(file) = element.file_name() else {
            return;
        };
        let node = AstNode::new(kind, element, file);
        for rule_set in self.rule_sets {
            rule_set.apply(&node, self.report);
        }
    }
}

impl AstVisitor for RuleApplier<'_> {
    fn visit_class(&mut self, class: &dyn ClassElement) {
        if !class.is_user_defined() {
            return;
        }
        let kind = class.kind();
        self.dispatch(kind, class as &dyn SyntaxElement);
    }

    fn visit_method(&mut self, method: &dyn SyntaxElement) {
        self.dispatch(NodeKind::Method, method);
    }

    fn visit_function(&mut self, function: &dyn SyntaxElement) {
        self.dispatch(NodeKind::Function, function);
    }
}
