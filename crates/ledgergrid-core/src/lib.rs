//! ledgergrid-core - Grid store, recompute driver and persistence.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{CellRecord, Document, GridSnapshot, RecalcSummary};
pub use error::{LedgerError, Result};

pub use ledgergrid_engine::engine::{Cell, CellIssue, CellRef, CellStyle, StyleChange};
