use super::{Cell, CellType};

/// Format a number for display with at most `decimals` fractional digits.
pub fn format_number(n: f64, decimals: usize) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        format!("{:.*}", decimals, n)
    }
}

/// Display text for a cell: text cells show their text, everything else its value.
pub fn format_cell(cell: &Cell, decimals: usize) -> String {
    match &cell.contents {
        CellType::Empty => String::new(),
        CellType::Text(s) => s.clone(),
        CellType::Number(_) | CellType::Formula(_) => format_number(cell.value, decimals),
    }
}
