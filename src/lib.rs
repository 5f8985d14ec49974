//! explain-txt: plain-text rendering of data explanation chunks.
//!
//! A data chunk holds a scalar or a one, two or three dimensional record.
//! The text builder writes it as a label line, a fixed separator, one line
//! per value row and a closing blank line:
//!
//! ```text
//! testName1 [testUnit1]       testName2 [testUnit2]
//! -------------------
//! value1       value2
//!
//! ```
//!
//! # Modules
//!
//! - [`data`] - Data model (`DataRecord`, `Dimension`, `DataValue`) and file loaders
//! - [`explanation`] - Explanation chunks and their metadata
//! - [`report`] - Report chunk builders, including the text target
//! - [`error`] - Library error type
//!
//! # Example
//!
//! ```
//! use explain_txt::{DataRecord, Dimension, ExplanationChunk, TxtDataChunkBuilder};
//!
//! let chunk = ExplanationChunk::data(DataRecord::scalar(Dimension::new("testName"), "value"));
//! let mut out = Vec::new();
//! TxtDataChunkBuilder::new()
//!     .write_data_chunk(&chunk, &mut out, false)
//!     .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "testName\n-------------------\nvalue\n\n");
//! ```

pub mod data;
pub mod error;
pub mod explanation;
pub mod report;

pub use data::model::{DataRecord, DataValue, Dimension};
pub use error::{ExplanationError, Result};
pub use explanation::{ChunkContent, ChunkContext, ExplanationChunk};
pub use report::txt::{TextStream, TxtDataChunkBuilder};
pub use report::ReportChunkBuilder;
