//! Document state and logic (UI-agnostic).

mod eval;
mod io;
mod ops;
mod state;

pub use eval::RecalcSummary;
pub use io::{CellRecord, GridSnapshot};
pub use state::Document;
