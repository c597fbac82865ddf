//! Chart families known to the renderer and the advisor's suggestion for a
//! dataset.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The closed set of chart families that have a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Scatter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Line => "Line",
            ChartType::Pie => "Pie",
            ChartType::Scatter => "Scatter",
        }
    }

    /// Default canvas size (width, height) in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        match self {
            ChartType::Pie => (500, 500),
            _ => (1000, 500),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the advisor said, after normalization.
///
/// Free text that does not name one of the supported families is kept
/// verbatim as `Unsupported` so it can be reported instead of silently
/// rendering nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Supported(ChartType),
    Unsupported(String),
}

impl Suggestion {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match crate::parser::parse_chart_type(trimmed) {
            Some(chart_type) => Suggestion::Supported(chart_type),
            None => Suggestion::Unsupported(trimmed.to_string()),
        }
    }

    pub fn chart_type(&self) -> Option<ChartType> {
        match self {
            Suggestion::Supported(chart_type) => Some(*chart_type),
            Suggestion::Unsupported(_) => None,
        }
    }
}

impl FromStr for Suggestion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Suggestion::parse(s))
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Supported(chart_type) => write!(f, "{}", chart_type),
            Suggestion::Unsupported(raw) => write!(f, "{} (unsupported)", raw),
        }
    }
}
