//! Plain-text report target.

pub mod columns;
pub mod data_chunk;
pub mod header;

use std::fmt;
use std::io::{self, Write};

pub use data_chunk::TxtDataChunkBuilder;
pub use header::write_chunk_header;

/// The writer type text builders accept through
/// [`ReportChunkBuilder`](crate::report::ReportChunkBuilder).
///
/// Builders only borrow the stream; flushing and closing stay with whoever
/// created it.
pub struct TextStream {
    writer: Box<dyn Write>,
}

impl TextStream {
    pub fn new(writer: impl Write + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    pub fn into_inner(self) -> Box<dyn Write> {
        self.writer
    }
}

impl Write for TextStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl fmt::Debug for TextStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStream").finish_non_exhaustive()
    }
}
