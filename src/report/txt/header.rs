use std::io::{self, Write};

use crate::explanation::ExplanationChunk;

/// Write the metadata lines that precede a chunk's content.
///
/// The context line is always present; group, rule and tags lines only when
/// the chunk carries them.
pub fn write_chunk_header<W: Write + ?Sized>(
    chunk: &ExplanationChunk,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Context: {}", chunk.context)?;

    if let Some(group) = &chunk.group {
        writeln!(out, "Group: {group}")?;
    }
    if let Some(rule) = &chunk.rule {
        writeln!(out, "Rule: {rule}")?;
    }
    if !chunk.tags.is_empty() {
        writeln!(out, "Tags: {}", chunk.tags.join(" "))?;
    }
    Ok(())
}
