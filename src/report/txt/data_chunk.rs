use std::any::{type_name, Any};
use std::io::Write;

use super::columns::{write_row, write_separator};
use super::header::write_chunk_header;
use super::TextStream;
use crate::data::model::DataRecord;
use crate::error::{ExplanationError, Result};
use crate::explanation::ExplanationChunk;
use crate::report::ReportChunkBuilder;

/// Renders data chunks as a label line, a separator, one line per row and a
/// closing blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtDataChunkBuilder;

impl TxtDataChunkBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Render a data chunk to any writer.
    ///
    /// # Errors
    /// `InvalidArgument` for a chunk without data, before anything is
    /// written. I/O errors from `out` are passed through.
    pub fn write_data_chunk<W: Write + ?Sized>(
        &self,
        chunk: &ExplanationChunk,
        out: &mut W,
        insert_headers: bool,
    ) -> Result<()> {
        let record = data_of(chunk)?;
        log::debug!(
            "rendering {} data chunk with {} row(s)",
            record.kind(),
            record.len()
        );

        if insert_headers {
            write_chunk_header(chunk, out)?;
        }

        write_row(out, record.dimensions())?;
        write_separator(out)?;

        match record {
            DataRecord::Scalar { value, .. } => {
                write_row(out, std::slice::from_ref(value))?;
            }
            DataRecord::OneDim { values, .. } => {
                for value in values {
                    write_row(out, std::slice::from_ref(value))?;
                }
            }
            DataRecord::TwoDim { values, .. } => {
                for pair in values {
                    write_row(out, pair)?;
                }
            }
            DataRecord::ThreeDim { values, .. } => {
                for triple in values {
                    write_row(out, triple)?;
                }
            }
        }

        writeln!(out)?;
        Ok(())
    }
}

impl ReportChunkBuilder for TxtDataChunkBuilder {
    fn build_report_chunk(
        &self,
        echunk: Option<&ExplanationChunk>,
        stream: Option<&mut dyn Any>,
        insert_headers: bool,
    ) -> Result<()> {
        let (echunk, stream) = match (echunk, stream) {
            (None, None) => {
                return Err(ExplanationError::invalid_argument(
                    "All of the arguments are mandatory, so they can not be null",
                ))
            }
            (None, Some(_)) => {
                return Err(ExplanationError::invalid_argument(
                    "The argument 'echunk' is mandatory, so it can not be null",
                ))
            }
            (Some(_), None) => {
                return Err(ExplanationError::invalid_argument(
                    "The argument 'stream' is mandatory, so it can not be null",
                ))
            }
            (Some(echunk), Some(stream)) => (echunk, stream),
        };

        data_of(echunk)?;

        let Some(writer) = stream.downcast_mut::<TextStream>() else {
            return Err(ExplanationError::invalid_argument(format!(
                "The argument 'stream' must be the type of {}",
                type_name::<TextStream>()
            )));
        };

        self.write_data_chunk(echunk, writer, insert_headers)
    }
}

fn data_of(chunk: &ExplanationChunk) -> Result<&DataRecord> {
    chunk.as_data().ok_or_else(|| {
        ExplanationError::invalid_argument(
            "The ExplanationChunk must be type of DataExplanationChunk",
        )
    })
}
