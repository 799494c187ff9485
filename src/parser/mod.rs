mod add;
mod report;

use chrono::NaiveDate;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag_no_case, take_till1};
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{eof, map, map_res, recognize};
use nom::sequence::{delimited, tuple};
use nom::IResult;
use crate::aggregate::ReportMode;
use crate::common::Error;
use crate::trip::TripRecord;

#[derive(Debug, PartialEq)]
pub(crate) enum Statement {
    /// ADD date district time amount payment_method
    Add(TripRecord),
    /// DAILY|MONTHLY|YEARLY|CUMULATIVE ... [BY DISTRICT]
    Report(ReportMode, GroupBy),
    Years,
    Districts,
    Payments,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum GroupBy {
    None,
    District,
}

/// Parse one command. Keywords are case insensitive, the trailing ';' is optional.
pub(crate) fn parse(query: &str) -> Result<Statement, Error> {
    let query = query.trim().trim_end_matches(';').trim_end();
    let result = tuple((statement, multispace0, eof))(query);
    match result {
        Ok((_, (statement, _, _))) => Ok(statement),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            if e.input.is_empty() {
                Err(Error::Parse(format!("incomplete command '{}'", query)))
            } else {
                Err(Error::Parse(format!("unexpected input at '{}'", e.input)))
            }
        },
        Err(nom::Err::Incomplete(_)) => Err(Error::Parse(format!("incomplete command '{}'", query))),
    }
}

fn statement(input: &str) -> IResult<&str, Statement> {
    alt((
        add::parse_add,
        report::parse_report,
        map(tag_no_case("YEARS"), |_| Statement::Years),
        map(tag_no_case("DISTRICTS"), |_| Statement::Districts),
        map(tag_no_case("PAYMENTS"), |_| Statement::Payments),
    ))(input)
}

/// 2024-01-05
pub(crate) fn yyyy_mm_dd_date(input: &str) -> IResult<&str, NaiveDate> {
    map_res(
        recognize(tuple((digit1, char('-'), digit1, char('-'), digit1))),
        |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d"),
    )(input)
}

/// Either a bare word or a single-quoted string, which may contain spaces
pub(crate) fn text_value(input: &str) -> IResult<&str, &str> {
    alt((delimited(char('\''), is_not("'"), char('\'')), non_space1))(input)
}

pub(crate) fn non_space1(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}
