// Parser for pointer positions given as "X,Y"

use super::lexer::{decimal_literal, ws};
use nom::{
    character::complete::char,
    combinator::all_consuming,
    sequence::separated_pair,
    IResult,
};

fn pointer(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(ws(decimal_literal), char(','), ws(decimal_literal))(input)
}

/// Parse a canvas position such as `120,340`
pub fn parse_pointer(input: &str) -> Result<(f64, f64), String> {
    all_consuming(pointer)(input)
        .map(|(_, position)| position)
        .map_err(|_| format!("invalid pointer position '{}': expected X,Y", input))
}
