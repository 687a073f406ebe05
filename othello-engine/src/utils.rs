//! Text rendering shared by the board types.

use crate::{EDGE_LENGTH, NUM_SPACES};
use std::fmt::{self, Formatter};

/// Column letters in board order.
pub(crate) const COLUMN_LABELS: &str = "ABCDEFGH";

/// Row digits in board order.
pub(crate) const ROW_LABELS: &str = "12345678";

/// Write one character per square as a labelled grid.
/// `pieces` must yield exactly [`NUM_SPACES`] items in row-major order.
pub(crate) fn format_grid<T: Iterator<Item = char>>(mut pieces: T, f: &mut Formatter) -> fmt::Result {
    write!(f, "  ")?;
    for label in COLUMN_LABELS.chars() {
        write!(f, " {}", label)?;
    }

    for (square, label) in (0..NUM_SPACES)
        .step_by(EDGE_LENGTH)
        .zip(ROW_LABELS.chars())
    {
        write!(f, "\n {} ", label)?;
        for _ in square..square + EDGE_LENGTH {
            write!(f, "{} ", pieces.next().ok_or(fmt::Error)?)?;
        }
    }

    match pieces.next() {
        None => Ok(()),
        Some(_) => Err(fmt::Error),
    }
}
