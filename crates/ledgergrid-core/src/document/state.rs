use crate::error::{LedgerError, Result};
use ledgergrid_engine::engine::{Cell, CellRef, Grid};
use std::path::PathBuf;

/// UI-agnostic document state: the sparse grid plus file bookkeeping.
///
/// The grid is owned here and only mutated through [`Document::set_cell`]
/// and [`Document::set_style`], so every cell's value reflects its raw
/// input against the current grid once a call returns.
pub struct Document {
    /// The sparse grid (only populated cells are stored)
    pub(crate) grid: Grid,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the grid has been modified since the last load or save
    pub modified: bool,
}

impl Document {
    /// Create an empty document.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Document {
            grid: Grid::new(),
            file_path: None,
            modified: false,
        }
    }

    /// Create a new document and load a file if provided.
    /// A path that does not exist yet is remembered for the first save.
    pub fn with_file(path: Option<PathBuf>) -> Result<Self> {
        let mut doc = Self::new();
        if let Some(p) = path {
            if p.exists() {
                doc.load_file(&p)?;
            } else {
                doc.file_path = Some(p);
            }
        }
        Ok(doc)
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Copy of the cell at `address`, if one has been written.
    /// Invalid addresses read as absent.
    pub fn get_cell(&self, address: &str) -> Option<Cell> {
        let cell_ref = CellRef::from_str(address.trim())?;
        self.get_cell_at(&cell_ref)
    }

    pub fn get_cell_at(&self, cell_ref: &CellRef) -> Option<Cell> {
        self.grid.get(cell_ref).map(|c| c.clone())
    }

    /// All stored cells in row-major order.
    pub fn cells(&self) -> Vec<(CellRef, Cell)> {
        let mut cells: Vec<(CellRef, Cell)> = self
            .grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        cells.sort_by(|a, b| a.0.cmp(&b.0));
        cells
    }

    /// Smallest rectangle covering every stored cell, as (top-left, bottom-right).
    pub fn bounds(&self) -> Option<(CellRef, CellRef)> {
        let mut iter = self.grid.iter().map(|entry| *entry.key());
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for cell_ref in iter {
            min = CellRef::new(min.col.min(cell_ref.col), min.row.min(cell_ref.row));
            max = CellRef::new(max.col.max(cell_ref.col), max.row.max(cell_ref.row));
        }
        Some((min, max))
    }

    pub(crate) fn resolve(address: &str) -> Result<CellRef> {
        CellRef::from_str(address.trim())
            .ok_or_else(|| LedgerError::InvalidAddress(address.to_string()))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
