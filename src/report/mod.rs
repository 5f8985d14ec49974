//! Report chunk builders.
//!
//! A builder takes one [`ExplanationChunk`] and writes its rendering to an
//! output stream owned by the caller. The stream is passed as `&mut dyn Any`
//! so that one trait covers every output target; each target checks that it
//! was handed the stream type it writes to.

pub mod txt;

use std::any::Any;

use crate::error::Result;
use crate::explanation::ExplanationChunk;

pub trait ReportChunkBuilder {
    /// Render `echunk` into `stream`, optionally preceded by the chunk's
    /// metadata header.
    ///
    /// # Errors
    /// `InvalidArgument` when an argument is missing or of the wrong type,
    /// raised before anything is written. I/O errors from the stream are
    /// passed through.
    fn build_report_chunk(
        &self,
        echunk: Option<&ExplanationChunk>,
        stream: Option<&mut dyn Any>,
        insert_headers: bool,
    ) -> Result<()>;
}
