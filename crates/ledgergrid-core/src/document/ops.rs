use super::Document;
use crate::error::Result;
use ledgergrid_engine::engine::{Cell, CellRef, StyleChange};
use log::debug;

impl Document {
    /// Set a cell from user input and bring every formula up to date.
    ///
    /// The only error is an address outside `A1:O30`; formula problems
    /// leave the affected cells at `0` instead.
    pub fn update_cell(&mut self, address: &str, raw_input: &str) -> Result<()> {
        let cell_ref = Self::resolve(address)?;
        self.set_cell(cell_ref, raw_input);
        Ok(())
    }

    /// Set cell contents from input string, keeping any existing style.
    pub fn set_cell(&mut self, cell_ref: CellRef, raw_input: &str) {
        let mut cell = Cell::from_input(raw_input);
        if let Some(existing) = self.grid.get(&cell_ref) {
            cell.style = existing.style.clone();
        }
        debug!("set {} to {:?}", cell_ref, raw_input);
        self.grid.insert(cell_ref, cell);
        self.modified = true;

        self.recalculate();
    }

    /// Change one style attribute. Never triggers recomputation.
    pub fn apply_style(&mut self, address: &str, change: StyleChange) -> Result<()> {
        let cell_ref = Self::resolve(address)?;
        self.set_style(cell_ref, change);
        Ok(())
    }

    /// Style an address, creating an empty record to hold the style if needed.
    pub fn set_style(&mut self, cell_ref: CellRef, change: StyleChange) {
        self.grid
            .entry(cell_ref)
            .or_insert_with(Cell::new_empty)
            .style
            .apply(change);
        self.modified = true;
    }
}
