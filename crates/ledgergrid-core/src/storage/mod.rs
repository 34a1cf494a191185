//! File formats: JSON snapshots for persistence, markdown for export.

mod json;
mod md;

pub use json::{read_snapshot, write_snapshot};
pub use md::{render_markdown, write_markdown};
