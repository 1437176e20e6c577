//! Bundled PHP syntax provider built on tree-sitter
//!
//! Reference implementation of [`SyntaxProvider`]: parses a fixed list of PHP
//! files and surfaces their namespaces, class-like declarations, methods, and
//! top-level functions to the visitor. Files that cannot be read or parsed
//! are recorded as failures and skipped; the remaining files are still
//! visited.

use super::{AstVisitor, ParseFailure, SyntaxProvider};
use crate::node::{ClassElement, SyntaxElement};
use crate::NodeKind;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Language, Node, Parser, Tree};

/// One element extracted from a PHP source file
#[derive(Debug, Clone)]
struct PhpElement {
    kind: NodeKind,
    image: String,
    line: usize,
    file: PathBuf,
    namespace: Option<String>,
    parent: Option<String>,
    doc: Option<String>,
}

impl SyntaxElement for PhpElement {
    fn image(&self) -> &str {
        &self.image
    }

    fn line(&self) -> usize {
        self.line
    }

    fn file_name(&self) -> Option<&Path> {
        Some(&self.file)
    }

    fn doc_comment(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn namespace_name(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

impl ClassElement for PhpElement {
    fn is_user_defined(&self) -> bool {
        // Everything extracted here came out of an analyzed source file;
        // references to external code never produce elements.
        true
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }
}

/// PHP syntax provider over a fixed list of files
pub struct PhpProvider {
    parser: Parser,
    files: Vec<PathBuf>,
    failures: Vec<ParseFailure>,
}

impl PhpProvider {
    /// Create a provider for `files`
    pub fn new(files: Vec<PathBuf>) -> Result<Self> {
        let mut parser = Parser::new();
        let language: Language = tree_sitter_php::LANGUAGE_PHP.into();
        parser
            .set_language(&language)
            .context("Failed to set PHP language")?;
        Ok(Self {
            parser,
            files,
            failures: Vec::new(),
        })
    }

    /// Parse source code into a syntax tree
    fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .context("Failed to parse PHP source")
    }

    /// Extract all rule-relevant elements from one source string
    fn extract(&mut self, source: &str, file: &Path) -> Result<Vec<PhpElement>> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root).unwrap_or(1);
            anyhow::bail!("Unexpected token on line {}", line);
        }

        let mut elements = Vec::new();
        let mut namespace = None;
        collect(root, source, file, &mut namespace, &mut elements);
        Ok(elements)
    }
}

impl SyntaxProvider for PhpProvider {
    fn analyze(&mut self, visitor: &mut dyn AstVisitor) -> Result<()> {
        let files = self.files.clone();
        for file in files {
            let source = match fs::read_to_string(&file) {
                Ok(source) => source,
                Err(e) => {
                    self.failures.push(ParseFailure::new(&file, e.to_string()));
                    continue;
                }
            };
            match self.extract(&source, &file) {
                Ok(elements) => {
                    for element in &elements {
                        match element.kind {
                            NodeKind::Class | NodeKind::Interface | NodeKind::Trait => {
                                visitor.visit_class(element)
                            }
                            NodeKind::Method => visitor.visit_method(element),
                            NodeKind::Function => visitor.visit_function(element),
                        }
                    }
                }
                Err(e) => self.failures.push(ParseFailure::new(&file, e.to_string())),
            }
        }
        Ok(())
    }

    fn take_failures(&mut self) -> Vec<ParseFailure> {
        std::mem::take(&mut self.failures)
    }
}

/// Line of the first error or missing node under `node`, if any
fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(child) {
            return Some(line);
        }
    }
    None
}

/// Walk the tree, tracking the active namespace, and collect declarations
fn collect(
    node: Node,
    source: &str,
    file: &Path,
    namespace: &mut Option<String>,
    out: &mut Vec<PhpElement>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "namespace_definition" => {
                let name = field_text(child, "name", source);
                // Braced form scopes the namespace to its body; the bare
                // form applies to everything that follows.
                let body = child.child_by_field_name("body").or_else(|| {
                    let mut c = child.walk();
                    let found = child
                        .named_children(&mut c)
                        .find(|n| n.kind() == "compound_statement");
                    found
                });
                if let Some(body) = body {
                    let mut scoped = name;
                    collect(body, source, file, &mut scoped, out);
                } else {
                    *namespace = name;
                }
            }
            "class_declaration" => {
                collect_class_like(child, NodeKind::Class, source, file, namespace, out)
            }
            "interface_declaration" => {
                collect_class_like(child, NodeKind::Interface, source, file, namespace, out)
            }
            "trait_declaration" => {
                collect_class_like(child, NodeKind::Trait, source, file, namespace, out)
            }
            "function_definition" => {
                if let Some(image) = field_text(child, "name", source) {
                    out.push(PhpElement {
                        kind: NodeKind::Function,
                        image,
                        line: child.start_position().row + 1,
                        file: file.to_path_buf(),
                        namespace: namespace.clone(),
                        parent: None,
                        doc: doc_comment(child, source),
                    });
                }
            }
            // Declarations can hide inside blocks (conditional definitions).
            _ => collect(child, source, file, namespace, out),
        }
    }
}

/// Record a class/interface/trait declaration and its methods
fn collect_class_like(
    node: Node,
    kind: NodeKind,
    source: &str,
    file: &Path,
    namespace: &Option<String>,
    out: &mut Vec<PhpElement>,
) {
    let Some(image) = field_text(node, "name", source) else {
        return;
    };
    out.push(PhpElement {
        kind,
        image: image.clone(),
        line: node.start_position().row + 1,
        file: file.to_path_buf(),
        namespace: namespace.clone(),
        parent: None,
        doc: doc_comment(node, source),
    });

    let Some(body) = node.child_by_field_name("body") else {
        return;
    };
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        if member.kind() != "method_declaration" {
            continue;
        }
        if let Some(method_image) = field_text(member, "name", source) {
            out.push(PhpElement {
                kind: NodeKind::Method,
                image: method_image,
                line: member.start_position().row + 1,
                file: file.to_path_buf(),
                namespace: namespace.clone(),
                parent: Some(image.clone()),
                doc: doc_comment(member, source),
            });
        }
    }
}

/// Text of a named field child, if present
fn field_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| n.utf8_text(source.as_bytes()).ok())
        .map(|s| s.to_string())
}

/// Leading `/** ... */` comment directly above `node`, if any
fn doc_comment(node: Node, source: &str) -> Option<String> {
    let sibling = node.prev_named_sibling()?;
    if sibling.kind() != "comment" {
        return None;
    }
    let text = sibling.utf8_text(source.as_bytes()).ok()?;
    if text.starts_with("/**") {
        Some(text.to_string())
    } else {
        None
    }
}
