//! Plain text renderer for terminal and log consumption

use super::Renderer;
use crate::report::Report;
use crate::writer::Writer;
use std::io;

/// One tab-separated line per violation, processing errors appended last
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, report: &Report, out: &mut dyn Writer) -> io::Result<()> {
        for violation in report.violations() {
            out.write(&format!(
                "{}:{}\t{}\t{}\n",
                violation.file.display(),
                violation.line,
                violation.rule,
                violation.description
            ))?;
        }
        for error in report.errors() {
            out.write(&format!("{}\t-\t{}\n", error.file.display(), error.message))?;
        }
        Ok(())
    }
}
