//! Presentation attributes carried on a cell.
//!
//! Style never participates in evaluation; it is stored next to the cell
//! contents only so the view can render it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: Alignment,
    pub background: Option<String>,
    pub text_color: Option<String>,
}

/// A single style attribute assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleChange {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    Align(Alignment),
    Background(Option<String>),
    TextColor(Option<String>),
}

impl StyleChange {
    /// Parse an `(attribute, value)` pair such as `("bold", "true")` or
    /// `("background", "#fde68a")`. A colour of `none` clears it.
    pub fn parse(attribute: &str, value: &str) -> Result<StyleChange, String> {
        let value = value.trim();
        let flag = || match value.to_ascii_lowercase().as_str() {
            "true" | "on" | "1" => Ok(true),
            "false" | "off" | "0" => Ok(false),
            other => Err(format!("Expected true or false, got '{}'", other)),
        };
        let color = || {
            if value.is_empty() || value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(value.to_string())
            }
        };

        match attribute.trim().to_ascii_lowercase().as_str() {
            "bold" => flag().map(StyleChange::Bold),
            "italic" => flag().map(StyleChange::Italic),
            "underline" => flag().map(StyleChange::Underline),
            "align" | "alignment" => match value.to_ascii_lowercase().as_str() {
                "left" => Ok(StyleChange::Align(Alignment::Left)),
                "center" | "centre" => Ok(StyleChange::Align(Alignment::Center)),
                "right" => Ok(StyleChange::Align(Alignment::Right)),
                other => Err(format!("Unknown alignment '{}'", other)),
            },
            "background" | "bg" => Ok(StyleChange::Background(color())),
            "color" | "colour" | "text_color" | "textcolor" => Ok(StyleChange::TextColor(color())),
            other => Err(format!("Unknown style attribute '{}'", other)),
        }
    }
}

impl CellStyle {
    pub fn apply(&mut self, change: StyleChange) {
        match change {
            StyleChange::Bold(b) => self.bold = b,
            StyleChange::Italic(b) => self.italic = b,
            StyleChange::Underline(b) => self.underline = b,
            StyleChange::Align(a) => self.align = a,
            StyleChange::Background(c) => self.background = c,
            StyleChange::TextColor(c) => self.text_color = c,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == CellStyle::default()
    }
}
