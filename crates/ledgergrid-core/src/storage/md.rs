//! Markdown export

use crate::document::Document;
use ledgergrid_engine::engine::CellRef;
use std::fmt::Write as _;
use std::path::Path;

/// Write the grid to a markdown file
pub fn write_markdown(path: &Path, doc: &Document, decimals: usize) -> std::io::Result<()> {
    std::fs::write(path, render_markdown(doc, decimals))
}

/// Render the populated part of the grid as a markdown table.
pub fn render_markdown(doc: &Document, decimals: usize) -> String {
    let mut out = String::new();
    out.push_str("# Sheet\n\n");

    let Some((min, max)) = doc.bounds() else {
        out.push_str("*Empty spreadsheet*\n");
        return out;
    };

    // Header with column letters
    out.push_str("|   |");
    for col in min.col..=max.col {
        let _ = write!(out, " {} |", CellRef::col_to_letter(col));
    }
    out.push('\n');

    out.push_str("|---|");
    for _ in min.col..=max.col {
        out.push_str("---|");
    }
    out.push('\n');

    for row in min.row..=max.row {
        let _ = write!(out, "| {} |", row + 1); // 1-based row numbers
        for col in min.col..=max.col {
            let display = doc.get_cell_display(&CellRef::new(col, row), decimals);
            let _ = write!(out, " {} |", escape_markdown(&display));
        }
        out.push('\n');
    }

    out
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
