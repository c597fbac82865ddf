// Dynamic typing for raw CSV cells

use super::lexer::{decimal_literal, ws};
use nom::combinator::all_consuming;

/// Parse a cell as a number if the whole cell is a decimal literal
/// (surrounding whitespace allowed). Anything else returns `None`.
pub fn parse_numeric_cell(raw: &str) -> Option<f64> {
    all_consuming(ws(decimal_literal))(raw)
        .ok()
        .map(|(_, value)| value)
}
