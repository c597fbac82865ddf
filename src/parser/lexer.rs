// Lexer utilities shared by the chartwise parsers

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{map_res, opt, recognize},
    sequence::{delimited, pair, tuple},
    IResult,
};

/// Parse and consume surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse a plain decimal literal
/// Format: -?(digits[.digits?] | .digits)([eE][+-]?digits)?
///
/// Unlike `nom::number::complete::double` this rejects `inf`, `nan` and a
/// leading `+`, so cells such as "NaN" or "+1" stay text.
pub fn decimal_literal(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}
