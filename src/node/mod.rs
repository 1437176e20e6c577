//! Node abstraction over a foreign syntax tree
//!
//! A syntax provider surfaces its own node objects; the engine never inspects
//! them directly. [`AstNode`] wraps one element behind the small capability
//! traits below so rules see a uniform surface regardless of which provider
//! produced the tree.

use crate::rules::Rule;
use crate::NodeKind;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Capability surface of a foreign syntax element
///
/// Everything beyond the raw name is optional: bare top-level functions have
/// no namespace, file-level constructs have no parent, and references to
/// library code may carry no compilation unit at all.
pub trait SyntaxElement {
    /// Raw name of the element as written in source
    fn image(&self) -> &str;

    /// Line the element starts on (1-indexed)
    fn line(&self) -> usize;

    /// Path of the compilation unit, or `None` for library/stub code
    fn file_name(&self) -> Option<&Path>;

    /// Leading documentation comment, if any
    fn doc_comment(&self) -> Option<&str> {
        None
    }

    /// Name of the enclosing namespace, if any
    fn namespace_name(&self) -> Option<&str> {
        None
    }

    /// Name of the enclosing type, if any (e.g. the class owning a method)
    fn parent_name(&self) -> Option<&str> {
        None
    }
}

/// A class-like foreign element (class, interface, trait)
pub trait ClassElement: SyntaxElement {
    /// False for references to code outside the analyzed sources
    fn is_user_defined(&self) -> bool;

    /// Which class-like kind this element is
    fn kind(&self) -> NodeKind {
        NodeKind::Class
    }
}

/// Uniform node handed to rules
///
/// Holds a non-owning reference to the wrapped foreign element; all query
/// operations delegate. The node never mutates its source.
pub struct AstNode<'a> {
    kind: NodeKind,
    inner: &'a dyn SyntaxElement,
    file: &'a Path,
}

impl<'a> AstNode<'a> {
    pub fn new(kind: NodeKind, inner: &'a dyn SyntaxElement, file: &'a Path) -> Self {
        Self { kind, inner, file }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Raw name, delegated verbatim to the wrapped element
    pub fn image(&self) -> &str {
        self.inner.image()
    }

    /// Semantic accessor for the node name; currently identical to [`image`](Self::image)
    pub fn name(&self) -> &str {
        self.inner.image()
    }

    pub fn line(&self) -> usize {
        self.inner.line()
    }

    pub fn file(&self) -> &Path {
        self.file
    }

    pub fn namespace_name(&self) -> Option<&str> {
        self.inner.namespace_name()
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.inner.parent_name()
    }

    /// Fully qualified name, or `None` when the element carries no enclosing
    /// scope (bare functions, file-level constructs)
    pub fn full_qualified_name(&self) -> Option<String> {
        let namespace = self.inner.namespace_name();
        let parent = self.inner.parent_name();
        match (namespace, parent) {
            (None, None) => None,
            (Some(ns), None) => Some(format!("{}\\{}", ns, self.image())),
            (None, Some(parent)) => Some(format!("{}::{}", parent, self.image())),
            (Some(ns), Some(parent)) => {
                Some(format!("{}\\{}::{}", ns, parent, self.image()))
            }
        }
    }

    /// True when the element's doc comment suppresses `rule` or its rule set
    ///
    /// Recognized directive: `@SuppressWarnings("X")` (quotes optional) with
    /// X naming the rule, the rule set, or "all". Without a doc comment the
    /// answer is always false.
    pub fn has_suppress_warnings_annotation_for(
        &self,
        rule: &dyn Rule,
        rule_set: &str,
    ) -> bool {
        let Some(doc) = self.inner.doc_comment() else {
            return false;
        };
        suppress_regex().captures_iter(doc).any(|captures| {
            let value = captures[1].trim();
            value.eq_ignore_ascii_case("all") || value == rule.name() || value == rule_set
        })
    }
}

fn suppress_regex() -> &'static Regex {
    static SUPPRESS: OnceLock<Regex> = OnceLock::new();
    SUPPRESS.get_or_init(|| {
        Regex::new(r#"@SuppressWarnings\(\s*"?([^)"]+?)"?\s*\)"#)
            .expect("suppress directive pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, RuleContext};
    use std::path::PathBuf;

    /// Double exposing only a name, everything else defaulted
    struct BareElement {
        image: String,
        doc: Option<String>,
    }

    impl BareElement {
        fn named(image: &str) -> Self {
            Self {
                image: image.to_string(),
                doc: None,
            }
        }

        fn with_doc(image: &str, doc: &str) -> Self {
            Self {
                image: image.to_string(),
                doc: Some(doc.to_string()),
            }
        }
    }

    impl SyntaxElement for BareElement {
        fn image(&self) -> &str {
            &self.image
        }

        fn line(&self) -> usize {
            1
        }

        fn file_name(&self) -> Option<&Path> {
            Some(Path::new("/src/sample.php"))
        }

        fn doc_comment(&self) -> Option<&str> {
            self.doc.as_deref()
        }
    }

    struct NamedRule(&'static str);

    impl Rule for NamedRule {
        fn name(&self) -> &str {
            self.0
        }

        fn applies_to(&self, _kind: NodeKind) -> bool {
            true
        }

        fn check(&self, _node: &AstNode<'_>, _ctx: &mut RuleContext<'_>) {}
    }

    fn file() -> PathBuf {
        PathBuf::from("/src/sample.php")
    }

    #[test]
    fn image_delegates_to_wrapped_element() {
        let element = BareElement::named("strlen");
        let file = file();
        let node = AstNode::new(NodeKind::Function, &element, &file);
        assert_eq!(node.image(), "strlen");
    }

    #[test]
    fn name_matches_image() {
        let element = BareElement::named("strlen");
        let file = file();
        let node = AstNode::new(NodeKind::Function, &element, &file);
        assert_eq!(node.name(), node.image());
    }

    #[test]
    fn scope_accessors_return_none_without_enclosing_scope() {
        let element = BareElement::named("helper");
        let file = file();
        let node = AstNode::new(NodeKind::Function, &element, &file);
        assert_eq!(node.parent_name(), None);
        assert_eq!(node.namespace_name(), None);
        assert_eq!(node.full_qualified_name(), None);
    }

    #[test]
    fn suppress_lookup_is_false_without_doc_comment() {
        let element = BareElement::named("helper");
        let file = file();
        let node = AstNode::new(NodeKind::Function, &element, &file);
        let rule = NamedRule("short-method-name");
        assert!(!node.has_suppress_warnings_annotation_for(&rule, "Naming Rules"));
    }

    #[test]
    fn suppress_matches_rule_name() {
        let element = BareElement::with_doc(
            "x",
            "/** @SuppressWarnings(\"short-method-name\") */",
        );
        let file = file();
        let node = AstNode::new(NodeKind::Function, &element, &file);
        assert!(node
            .has_suppress_warnings_annotation_for(&NamedRule("short-method-name"), "Naming Rules"));
        assert!(!node
            .has_suppress_warnings_annotation_for(&NamedRule("camelcase-method-name"), "Other"));
    }

    #[test]
    fn suppress_matches_rule_set_and_all() {
        let by_set = BareElement::with_doc("x", "/** @SuppressWarnings(Naming Rules) */");
        let file = file();
        let node = AstNode::new(NodeKind::Method, &by_set, &file);
        assert!(node.has_suppress_warnings_annotation_for(&NamedRule("anything"), "Naming Rules"));

        let all = BareElement::with_doc("x", "/** @SuppressWarnings(\"all\") */");
        let node = AstNode::new(NodeKind::Method, &all, &file);
        assert!(node.has_suppress_warnings_annotation_for(&NamedRule("anything"), "Whatever"));
    }

    /// Nested constructs expose a qualified name
    struct MemberElement;

    impl SyntaxElement for MemberElement {
        fn image(&self) -> &str {
            "render"
        }

        fn line(&self) -> usize {
            12
        }

        fn file_name(&self) -> Option<&Path> {
            Some(Path::new("/src/View.php"))
        }

        fn namespace_name(&self) -> Option<&str> {
            Some("App\\Template")
        }

        fn parent_name(&self) -> Option<&str> {
            Some("View")
        }
    }

    #[test]
    fn full_qualified_name_for_nested_member() {
        let element = MemberElement;
        let file = PathBuf::from("/src/View.php");
        let node = AstNode::new(NodeKind::Method, &element, &file);
        assert_eq!(
            node.full_qualified_name().as_deref(),
            Some("App\\Template\\View::render")
        );
    }
}
