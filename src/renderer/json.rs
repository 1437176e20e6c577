//! JSON renderer for machine-readable output

use super::Renderer;
use crate::report::Report;
use crate::writer::Writer;
use crate::{ProcessingError, Violation};
use serde::Serialize;
use std::io;

/// Renderer producing a single JSON document per report
pub struct JsonRenderer {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    version: &'static str,
    violations: Vec<&'a Violation>,
    errors: Vec<&'a ProcessingError>,
}

impl Renderer for JsonRenderer {
    fn render(&mut self, report: &Report, out: &mut dyn Writer) -> io::Result<()> {
        let document = JsonDocument {
            version: env!("CARGO_PKG_VERSION"),
            violations: report.violations().collect(),
            errors: report.errors().collect(),
        };
        let serialized = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(io::Error::other)?;
        out.write(&serialized)?;
        out.write("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render_report;
    use crate::writer::StreamWriter;

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.add_violation(Violation::new(
            "camelcase-class-name",
            "Naming Rules",
            "/src/a.php",
            2,
            "The class http_client is not named in CamelCase.",
        ));
        report.add_error(ProcessingError::new("/src/broken.php", "unexpected token"));
        report
    }

    fn render(pretty: bool) -> String {
        let mut renderer = if pretty {
            JsonRenderer::new().pretty()
        } else {
            JsonRenderer::new()
        };
        let mut writer = StreamWriter::new(Vec::new());
        render_report(&mut renderer, &sample_report(), &mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn document_has_expected_keys() {
        let parsed: serde_json::Value = serde_json::from_str(&render(false)).unwrap();

        assert!(parsed.get("version").is_some());
        let violations = parsed["violations"].as_array().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0]["rule"], "camelcase-class-name");
        assert_eq!(violations[0]["ruleSet"], "Naming Rules");
        assert_eq!(violations[0]["line"], 2);

        let errors = parsed["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["file"], "/src/broken.php");
    }

    #[test]
    fn pretty_output_has_indentation() {
        let output = render(true);
        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }

    #[test]
    fn rendering_is_idempotent() {
        assert_eq!(render(false), render(false));
    }
}
