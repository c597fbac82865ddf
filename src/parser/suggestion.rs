// Parser for the advisor's free-text chart type answer

use super::lexer::ws;
use crate::chart_type::ChartType;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while},
    character::complete::multispace0,
    combinator::{all_consuming, map, opt, value},
    sequence::{preceded, terminated, tuple},
    IResult,
};

/// Markdown and quoting characters models like to wrap answers in
fn decoration(input: &str) -> IResult<&str, &str> {
    take_while(|c| matches!(c, '*' | '_' | '`' | '"' | '\''))(input)
}

fn family(input: &str) -> IResult<&str, ChartType> {
    alt((
        value(ChartType::Scatter, tag_no_case("scatter")),
        value(ChartType::Line, tag_no_case("line")),
        value(ChartType::Bar, tag_no_case("bar")),
        value(ChartType::Pie, tag_no_case("pie")),
    ))(input)
}

fn suffix(input: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        alt((tag_no_case("chart"), tag_no_case("graph"), tag_no_case("plot"))),
    )(input)
}

/// Parse one answer such as `Bar`, `**Line chart**` or `scatter plot.`
pub fn chart_type_answer(input: &str) -> IResult<&str, ChartType> {
    map(
        tuple((
            ws(decoration),
            terminated(family, opt(suffix)),
            decoration,
            opt(ws(nom::character::complete::char('.'))),
            decoration,
        )),
        |(_, chart_type, _, _, _)| chart_type,
    )(input)
}

/// Map the full answer onto a supported chart type, if it names one
pub fn parse_chart_type(input: &str) -> Option<ChartType> {
    all_consuming(ws(chart_type_answer))(input)
        .ok()
        .map(|(_, chart_type)| chart_type)
}
