use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::sync::Arc;

/// Largest magnitude a cell may have and still be typed as a number (2^53).
/// Bigger literals, such as long IDs, would lose digits and stay text.
pub const MAX_SAFE_NUMBER: f64 = 9_007_199_254_740_992.0;

/// A single dynamically typed cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Empty cell, or a column the row does not reach
    Missing,
}

impl Cell {
    /// Type a raw CSV field: numeric literals within `MAX_SAFE_NUMBER`
    /// become numbers, empty fields become `Missing`, everything else stays
    /// text.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            return Cell::Missing;
        }
        match crate::parser::parse_numeric_cell(raw) {
            Some(number) if number.abs() < MAX_SAFE_NUMBER => Cell::Number(number),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Label coercion used by the chart data mapper
    pub fn to_label(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(number) => format_number(*number),
            Cell::Missing => String::new(),
        }
    }

    /// Numeric coercion used by the chart data mapper; anything that is not
    /// a number becomes NaN
    pub fn to_number(&self) -> f64 {
        match self {
            Cell::Number(number) => *number,
            Cell::Text(text) => crate::parser::parse_numeric_cell(text).unwrap_or(f64::NAN),
            Cell::Missing => f64::NAN,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(text) => serializer.serialize_str(text),
            // Whole numbers go out as integers so "10" does not become "10.0"
            Cell::Number(number)
                if number.fract() == 0.0 && number.abs() < MAX_SAFE_NUMBER =>
            {
                serializer.serialize_i64(*number as i64)
            }
            Cell::Number(number) => serializer.serialize_f64(*number),
            Cell::Missing => serializer.serialize_none(),
        }
    }
}

/// Format a number the way it is shown to users: no trailing ".0" for whole
/// numbers, no "-0", and exponent form (`1e+21`, `1e-7`) outside
/// `1e-7 <= |value| < 1e21`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-7 {
        let exponential = format!("{:e}", value);
        match exponential.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => exponential,
        }
    } else {
        format!("{}", value)
    }
}

/// One CSV line as a mapping from column name to cell
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, mut cells: Vec<Cell>) -> Self {
        cells.resize(columns.len(), Cell::Missing);
        Self { columns, cells }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.cells.get(idx))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(&self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// The parsed CSV: ordered rows sharing one column set
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let columns: Arc<[String]> = columns.into();
        let rows = rows
            .into_iter()
            .map(|cells| Row::new(Arc::clone(&columns), cells))
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
