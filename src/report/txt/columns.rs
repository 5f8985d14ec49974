use std::fmt::Display;
use std::io::{self, Write};

/// Gap written between adjacent columns. Output is compared byte for byte
/// downstream, so this is never derived from cell widths.
pub const COLUMN_GAP: &str = "       ";

/// Rule between the label line and the value rows.
pub const SEPARATOR: &str = "-------------------";

/// Join cells left to right with [`COLUMN_GAP`].
pub fn format_row<T: Display>(cells: &[T]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(&cell.to_string());
    }
    line
}

pub fn write_row<W, T>(out: &mut W, cells: &[T]) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Display,
{
    writeln!(out, "{}", format_row(cells))
}

pub fn write_separator<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")
}
