//! JUnit XML renderer
//!
//! Keeps PHPMD's exact JUnit report format, including the `package="PHPMD"`
//! suite attribute, so CI integrations that already parse PHPMD reports keep
//! working unchanged. Every violation is emitted as a failing test case of a
//! per-file suite; processing errors become synthetic one-case suites after
//! the violation suites.

use super::Renderer;
use crate::report::Report;
use crate::writer::Writer;
use crate::Violation;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Suite attribute kept for compatibility with PHPMD report consumers
const PACKAGE: &str = "PHPMD";

/// Renderer producing JUnit-compatible XML
pub struct JunitRenderer;

impl JunitRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JunitRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for JunitRenderer {
    fn start(&mut self, out: &mut dyn Writer) -> io::Result<()> {
        out.write("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n")?;
        out.write("<testsuites>\n")
    }

    fn render(&mut self, report: &Report, out: &mut dyn Writer) -> io::Result<()> {
        // Group violations by file in first-seen order; one pass, stable.
        let mut order: Vec<&Path> = Vec::new();
        let mut groups: HashMap<&Path, Vec<&Violation>> = HashMap::new();
        for violation in report.violations() {
            let file = violation.file.as_path();
            if !groups.contains_key(file) {
                order.push(file);
            }
            groups.entry(file).or_default().push(violation);
        }

        for file in order {
            let violations = &groups[file];
            let name = escape_attr(&file.display().to_string());
            out.write(&format!(
                "  <testsuite package=\"{}\" name=\"{}\" time=\"0\" tests=\"{}\" errors=\"{}\">\n",
                PACKAGE,
                name,
                violations.len(),
                violations.len()
            ))?;
            for violation in violations {
                let body = format!(
                    "line {}, Error - {} ({})",
                    violation.line, violation.description, violation.rule_set
                );
                out.write(&format!(
                    "    <testcase time=\"0\" name=\"{}\"><failure message=\"{}\"><![CDATA[{}]]></failure>\n    </testcase>\n",
                    escape_attr(&violation.rule),
                    escape_attr(&violation.description),
                    escape_cdata(&body)
                ))?;
            }
            out.write("  </testsuite>\n")?;
        }

        for error in report.errors() {
            let name = escape_attr(&error.file.display().to_string());
            out.write(&format!(
                "  <testsuite package=\"{}\" name=\"{}\" time=\"0\" tests=\"1\" errors=\"1\">\n",
                PACKAGE, name
            ))?;
            out.write(&format!(
                "    <testcase time=\"0\" name=\"error\"><failure message=\"Error in file &quot;{}&quot;\"></failure>\n    </testcase>\n",
                name
            ))?;
            out.write("  </testsuite>\n")?;
        }
        Ok(())
    }

    fn end(&mut self, out: &mut dyn Writer) -> io::Result<()> {
        out.write("</testsuites>\n")
    }
}

/// Make a string safe inside a CDATA section
///
/// A literal `]]>` would terminate the section early; splitting it across
/// two adjacent CDATA sections keeps the decoded text identical.
fn escape_cdata(value: &str) -> String {
    value.replace("]]>", "]]]]><![CDATA[>")
}

/// Escape a string for use in an XML attribute value
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
