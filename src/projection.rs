//! Flattening of fetched JSON into a rectangular table of strings.
//!
//! A list of objects becomes one row per element with the first element's
//! keys as columns. Anything else collapses into a single cell.

use serde_json::Value;

use crate::api_client::FetchOutcome;

/// Header used for single-cell projections
pub const VALUE_HEADER: &str = "value";

/// Field that wraps the payload in the exchange's response envelope
pub const RESULT_FIELD: &str = "result";

/// Which rendering branch produced a projection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectionKind {
    /// Rows and named columns from a list of objects
    #[default]
    Grid,
    /// Verbatim text or pretty-printed JSON in one cell
    Single,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProjection {
    kind: ProjectionKind,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableProjection {
    /// One header, one row, one cell
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            kind: ProjectionKind::Single,
            headers: vec![VALUE_HEADER.to_string()],
            rows: vec![vec![text.into()]],
        }
    }

    /// Project a fetch result. Errors render as their display text, exactly
    /// like a string payload would.
    pub fn from_outcome(outcome: &FetchOutcome) -> Self {
        match outcome {
            Ok(value) => Self::from_value(value),
            Err(e) => Self::single(e.to_string()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        if let Value::String(text) = value {
            return Self::single(text.clone());
        }

        let value = match value {
            Value::Object(map) => map.get(RESULT_FIELD).unwrap_or(value),
            _ => value,
        };

        if let Some(items) = value.as_array() {
            if let Some(Value::Object(first)) = items.first() {
                let headers: Vec<String> = first.keys().cloned().collect();
                let rows = items
                    .iter()
                    .map(|item| project_row(item, headers.len()))
                    .collect();
                return Self {
                    kind: ProjectionKind::Grid,
                    headers,
                    rows,
                };
            }
        }

        Self::single(pretty_json(value))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    /// True for the text fallback, regardless of grid size. A one-element,
    /// one-key list is still a grid.
    pub fn is_single_cell(&self) -> bool {
        self.kind == ProjectionKind::Single
    }

    /// Widest line per column (header included), clamped to `1..=max_width`
    pub fn column_widths(&self, max_width: u16) -> Vec<u16> {
        let max_width = max_width.max(1);
        (0..self.column_count())
            .map(|col| {
                let header = text_width(&self.headers[col]);
                let content = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| text_width(cell))
                    .max()
                    .unwrap_or(0);
                header.max(content).clamp(1, max_width as usize) as u16
            })
            .collect()
    }
}

/// Values are written in the element's own key order, one per column.
/// Rows whose shape differs from the first element are not realigned.
fn project_row(item: &Value, column_count: usize) -> Vec<String> {
    let mut cells: Vec<String> = match item {
        Value::Object(map) => map.values().take(column_count).map(cell_text).collect(),
        other => vec![cell_text(other)],
    };
    cells.resize(column_count, String::new());
    cells
}

/// Text for one table cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "NULL".to_string(),
        nested => nested.to_string(),
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn text_width(text: &str) -> usize {
    text.lines().map(|line| line.chars().count()).max().unwrap_or(0)
}
