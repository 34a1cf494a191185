use super::Document;
use crate::error::{LedgerError, Result};
use crate::storage::{read_snapshot, write_snapshot};
use ledgergrid_engine::engine::{Cell, CellRef, CellStyle, Grid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One cell as handed to the surrounding document store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub raw_input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default)]
    pub computed_value: f64,
    #[serde(default, skip_serializing_if = "CellStyle::is_default")]
    pub style: CellStyle,
}

/// The whole grid keyed by canonical address (`"C7"`).
pub type GridSnapshot = BTreeMap<String, CellRecord>;

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        CellRecord {
            raw_input: cell.raw_input.clone(),
            formula: cell.formula().map(str::to_string),
            computed_value: cell.value,
            style: cell.style.clone(),
        }
    }
}

impl Document {
    /// Serializable copy of every stored cell.
    pub fn to_snapshot(&self) -> GridSnapshot {
        self.cells()
            .iter()
            .map(|(cell_ref, cell)| (cell_ref.to_string(), CellRecord::from(cell)))
            .collect()
    }

    /// Rebuild a document from a snapshot.
    ///
    /// Cells are re-derived from `rawInput`; stored values are ignored and
    /// recomputed, so a stale snapshot still loads consistently.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Document> {
        let mut doc = Document::new();
        doc.grid = grid_from_snapshot(snapshot)?;
        doc.recalculate();
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Document> {
        let snapshot: GridSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(&snapshot)
    }

    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(LedgerError::NoFilePath);
        };

        write_snapshot(path, &self.to_snapshot())?;
        self.modified = false;
        Ok(path.clone())
    }

    /// Save to a new path and remember it.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        self.file_path = Some(path.to_path_buf());
        self.save_file()
    }

    /// Load from file, replacing the current grid.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let snapshot = read_snapshot(path)?;

        // Parse fully before touching the current grid so a bad file is harmless.
        self.grid = grid_from_snapshot(&snapshot)?;
        self.recalculate();

        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}

fn grid_from_snapshot(snapshot: &GridSnapshot) -> Result<Grid> {
    let grid = Grid::new();
    for (key, record) in snapshot {
        let cell_ref =
            CellRef::from_str(key).ok_or_else(|| LedgerError::SnapshotKey(key.clone()))?;
        let mut cell = Cell::from_input(&record.raw_input);
        cell.style = record.style.clone();
        grid.insert(cell_ref, cell);
    }
    Ok(grid)
}
