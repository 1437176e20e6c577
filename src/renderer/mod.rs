//! Renderer module for report output formatting

pub mod json;
pub mod junit;
pub mod text;

pub use json::JsonRenderer;
pub use junit::JunitRenderer;
pub use text::TextRenderer;

use crate::report::Report;
use crate::writer::Writer;
use std::io;

/// Transforms a finalized report into a serialized document
///
/// `start`, `render`, and `end` must be called in that order exactly once per
/// render. Writer failures propagate; a renderer never retries a write.
pub trait Renderer {
    /// Emit opening structure (declarations, root elements)
    fn start(&mut self, _out: &mut dyn Writer) -> io::Result<()> {
        Ok(())
    }

    /// Emit the report body
    fn render(&mut self, report: &Report, out: &mut dyn Writer) -> io::Result<()>;

    /// Emit closing structure
    fn end(&mut self, _out: &mut dyn Writer) -> io::Result<()> {
        Ok(())
    }
}

/// Run one full render lifecycle against `out`
pub fn render_report(
    renderer: &mut dyn Renderer,
    report: &Report,
    out: &mut dyn Writer,
) -> io::Result<()> {
    renderer.start(out)?;
    renderer.render(report, out)?;
    renderer.end(out)
}
