//! Dependency extraction from formula strings.
//!
//! Finds every cell a formula reads: bare references (`A1`) and each cell of
//! every range argument (`SUM(B2:C5)`). Used for cycle detection and to order
//! the recompute pass.

use regex::Regex;
use std::sync::OnceLock;

use super::cell_ref::{ADDRESS_PATTERN, CellRef};
use super::range::CellRange;

/// Extract all cell references from a formula as dependencies.
pub fn extract_dependencies(formula: &str) -> Vec<CellRef> {
    let mut deps = Vec::new();

    let range_re = crate::builtins::range_fn_re();

    // Remove range calls first so their corners are not counted twice.
    let without_ranges = range_re.replace_all(formula, " ").to_string();

    for caps in range_re.captures_iter(formula) {
        if let (Some(start), Some(end)) = (CellRef::from_str(&caps[2]), CellRef::from_str(&caps[3]))
        {
            deps.extend(CellRange::new(start, end).cells());
        }
    }

    for m in cell_ref_re().find_iter(&without_ranges) {
        if let Some(cr) = CellRef::from_str(m.as_str()) {
            deps.push(cr);
        }
    }

    deps
}

pub(crate) fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(&format!(r"\b{}\b", ADDRESS_PATTERN))
            .expect("dependency cell reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dependencies_empty() {
        assert!(extract_dependencies("").is_empty());
        assert!(extract_dependencies("10 + 20").is_empty());
    }

    #[test]
    fn test_extract_dependencies_multiple() {
        let deps = extract_dependencies("A1 + B1 * C2");
        assert_eq!(
            deps,
            vec![CellRef::new(0, 0), CellRef::new(1, 0), CellRef::new(2, 1)]
        );
    }

    #[test]
    fn test_extract_dependencies_with_ranges() {
        let deps = extract_dependencies("SUM(A1:A3)+D4");
        assert_eq!(deps.len(), 4);
        assert!(deps.contains(&CellRef::new(0, 2)));
        assert!(deps.contains(&CellRef::new(3, 3)));
    }

    #[test]
    fn test_extract_dependencies_ignores_out_of_grid_names() {
        assert!(extract_dependencies("P1 + A31 + AB2").is_empty());
    }
}
