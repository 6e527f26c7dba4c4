//! Table model - the guide's rows and headers held in memory
//!
//! The table owns its rows. Filtering only flips visibility flags and
//! sorting only repositions rows; nothing outside this module keeps a
//! reference to a row beyond a single operation.

use serde::{Deserialize, Serialize};

/// Name of the summary attribute written by the filter
pub const VISIBLE_ROWS_ATTRIBUTE: &str = "data-visible-rows";

/// Structural marker attached to a cell's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Positive,
    Negative,
}

/// A single table cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub markers: Vec<Marker>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markers: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marker: Marker) -> Self {
        Self {
            text: text.into(),
            markers: vec![marker],
        }
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Text content with surrounding whitespace removed
    pub fn content(&self) -> &str {
        self.text.trim()
    }

    /// Text shown in the terminal; marker-only cells get a symbol
    pub fn display_text(&self) -> String {
        if !self.content().is_empty() {
            return self.content().to_string();
        }
        if self.has_marker(Marker::Positive) {
            "✓".to_string()
        } else if self.has_marker(Marker::Negative) {
            "✕".to_string()
        } else {
            String::new()
        }
    }
}

/// A data row with its visibility flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub visible: bool,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            visible: true,
        }
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Trimmed text of a column, empty when the row is too short
    pub fn cell_content(&self, column: usize) -> &str {
        self.cell(column).map(Cell::content).unwrap_or("")
    }
}

/// The guide table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub title: Option<String>,
    pub headers: Vec<String>,
    /// Data rows; `None` when the source had no body at all
    pub body: Option<Vec<Row>>,
    /// Count written by the last filter application
    pub visible_rows: Option<usize>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            title: None,
            headers,
            body: Some(rows),
            visible_rows: None,
        }
    }

    /// A table with headers only
    pub fn without_body(headers: Vec<String>) -> Self {
        Self {
            title: None,
            headers,
            body: None,
            visible_rows: None,
        }
    }

    pub fn rows(&self) -> &[Row] {
        self.body.as_deref().unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Row> {
        self.rows().iter().filter(|row| row.visible)
    }

    /// Read a summary attribute the way styling hooks would see it
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            VISIBLE_ROWS_ATTRIBUTE => self.visible_rows.map(|count| count.to_string()),
            _ => None,
        }
    }
}
