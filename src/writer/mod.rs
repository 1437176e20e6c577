//! Output sink abstraction for renderers

use std::io::{self, Write};

/// A byte-accepting destination with a single append operation
///
/// Failures propagate from the underlying sink; renderers do not recover
/// from them.
pub trait Writer {
    fn write(&mut self, text: &str) -> io::Result<()>;
}

/// Writer over any [`io::Write`] sink
///
/// Appends at the sink's current offset and adds no buffering of its own.
/// The caller owns the sink's lifecycle; this writer never closes it.
pub struct StreamWriter<W: Write> {
    sink: W,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Hand the sink back, e.g. to rewind a buffer
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Writer for StreamWriter<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_all(text.as_bytes())
    }
}
