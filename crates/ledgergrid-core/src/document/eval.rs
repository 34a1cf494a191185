use super::Document;
use ledgergrid_engine::engine::{
    CellIssue, CellRef, FormulaError, evaluate_formula, format_cell, recalc_plan,
};
use log::{debug, warn};

/// Outcome of one recompute pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecalcSummary {
    /// Formula cells evaluated successfully
    pub evaluated: usize,
    /// Formula cells whose expression failed and now hold 0
    pub failed: usize,
    /// Formula cells on a circular reference, set to 0
    pub cyclic: usize,
}

impl Document {
    /// Re-evaluate every formula cell in the grid.
    ///
    /// One pass, dependencies first, so chains of formulas settle within a
    /// single edit. Cells on a cycle are set to 0 and flagged before the pass,
    /// so formulas reading them see that 0.
    pub fn recalculate(&mut self) -> RecalcSummary {
        let plan = recalc_plan(&self.grid);
        let mut summary = RecalcSummary {
            cyclic: plan.cyclic.len(),
            ..Default::default()
        };

        for (cell_ref, path) in &plan.cyclic {
            if let Some(mut cell) = self.grid.get_mut(cell_ref) {
                cell.value = 0.0;
                cell.issue = Some(CellIssue::Cycle(path.clone()));
            }
        }
        if !plan.cyclic.is_empty() {
            warn!(
                "{} formula cell(s) on a circular reference",
                plan.cyclic.len()
            );
        }

        for cell_ref in &plan.order {
            if self.evaluate_cell(cell_ref) {
                summary.evaluated += 1;
            } else {
                summary.failed += 1;
            }
        }

        debug!(
            "recalculated {} formula cell(s): {} failed, {} cyclic",
            summary.evaluated + summary.failed,
            summary.failed,
            summary.cyclic
        );
        summary
    }

    /// Evaluate one formula cell against the current grid and store the result.
    /// Returns false when the formula failed and the cell fell back to 0.
    fn evaluate_cell(&self, cell_ref: &CellRef) -> bool {
        let Some(formula) = self
            .grid
            .get(cell_ref)
            .and_then(|cell| cell.formula().map(str::to_string))
        else {
            return true;
        };

        let result = evaluate_formula(&formula, &self.grid);
        let Some(mut cell) = self.grid.get_mut(cell_ref) else {
            return true;
        };
        match result {
            Ok(value) => {
                cell.value = value;
                cell.issue = None;
                true
            }
            Err(err) => {
                warn!("{}: formula {:?} failed: {}", cell_ref, formula, err);
                cell.value = 0.0;
                cell.issue = Some(CellIssue::Formula(err));
                false
            }
        }
    }

    /// Evaluate an ad-hoc formula against the grid without storing it.
    /// A leading `=` is optional.
    pub fn evaluate(&self, formula: &str) -> Result<f64, FormulaError> {
        let formula = formula.trim();
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        evaluate_formula(formula, &self.grid)
    }

    /// Display text for an address; empty when nothing is stored there.
    pub fn get_cell_display(&self, cell_ref: &CellRef, decimals: usize) -> String {
        self.grid
            .get(cell_ref)
            .map(|cell| format_cell(&cell, decimals))
            .unwrap_or_default()
    }

    /// Every cell currently carrying a diagnostic, row-major.
    pub fn issues(&self) -> Vec<(CellRef, CellIssue)> {
        let mut issues: Vec<(CellRef, CellIssue)> = self
            .grid
            .iter()
            .filter_map(|entry| entry.issue.clone().map(|issue| (*entry.key(), issue)))
            .collect();
        issues.sort_by(|a, b| a.0.cmp(&b.0));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_reference_is_flagged_not_looped() {
        let mut doc = Document::new();
        doc.update_cell("A1", "=A1+1").unwrap();
        let cell = doc.get_cell("A1").unwrap();
        assert_eq!(cell.value, 0.0);
        assert_eq!(
            cell.issue,
            Some(CellIssue::Cycle(vec![CellRef::new(0, 0), CellRef::new(0, 0)]))
        );
    }

    #[test]
    fn test_only_cycle_members_are_flagged() {
        let mut doc = Document::new();
        doc.update_cell("B1", "=B2+1").unwrap();
        doc.update_cell("B3", "=B1*2+3").unwrap();
        doc.update_cell("B4", "7").unwrap();
        doc.update_cell("B2", "=B1+1").unwrap();
        let summary = doc.recalculate();
        assert_eq!(summary, RecalcSummary { evaluated: 1, failed: 0, cyclic: 2 });

        let flagged: Vec<CellRef> = doc.issues().into_iter().map(|(c, _)| c).collect();
        assert_eq!(flagged, vec![CellRef::new(1, 0), CellRef::new(1, 1)]);
        assert_eq!(doc.get_cell("B3").unwrap().value, 3.0);
        assert_eq!(doc.get_cell("B4").unwrap().value, 7.0);
    }

    #[test]
    fn test_breaking_a_cycle_recovers_values() {
        let mut doc = Document::new();
        doc.update_cell("C1", "=C2").unwrap();
        doc.update_cell("C2", "=C1").unwrap();
        doc.update_cell("C2", "4").unwrap();
        let cell = doc.get_cell("C1").unwrap();
        assert_eq!(cell.value, 4.0);
        assert!(cell.issue.is_none());
        assert!(doc.issues().is_empty());
    }

    #[test]
    fn test_summary_counts_failures() {
        let mut doc = Document::new();
        doc.update_cell("A1", "=1/0").unwrap();
        doc.update_cell("A2", "=2+2").unwrap();
        let summary = doc.recalculate();
        assert_eq!(summary, RecalcSummary { evaluated: 1, failed: 1, cyclic: 0 });
    }

    #[test]
    fn test_evaluate_ad_hoc() {
        let mut doc = Document::new();
        doc.update_cell("A1", "4").unwrap();
        doc.update_cell("A2", "6").unwrap();
        assert_eq!(doc.evaluate("=AVERAGE(A1:A2)"), Ok(5.0));
        assert_eq!(doc.evaluate("A1*A2"), Ok(24.0));
        assert!(doc.evaluate("A1*").is_err());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_get_cell_display() {
        let mut doc = Document::new();
        doc.update_cell("A1", "Rent").unwrap();
        doc.update_cell("A2", "=10/3").unwrap();
        assert_eq!(doc.get_cell_display(&CellRef::new(0, 0), 2), "Rent");
        assert_eq!(doc.get_cell_display(&CellRef::new(0, 1), 2), "3.33");
        assert_eq!(doc.get_cell_display(&CellRef::new(5, 5), 2), "");
    }
}
