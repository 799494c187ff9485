use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, i32, multispace1, u32};
use nom::combinator::{map, opt};
use nom::sequence::{preceded, tuple};
use nom::IResult;
use crate::aggregate::ReportMode;
use crate::parser::{yyyy_mm_dd_date, GroupBy, Statement};

/// DAILY 2024-01-05, MONTHLY 2024-01, YEARLY 2024, CUMULATIVE (or TOTAL), each optionally
/// followed by BY DISTRICT.
pub(crate) fn parse_report(input: &str) -> IResult<&str, Statement> {
    let (input, mode) = alt((daily, monthly, yearly, cumulative))(input)?;
    let (input, group_by) = opt(by_district)(input)?;
    let group_by = group_by.unwrap_or(GroupBy::None);
    Ok((input, Statement::Report(mode, group_by)))
}

fn daily(input: &str) -> IResult<&str, ReportMode> {
    let (input, _) = tag_no_case("DAILY")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, date) = yyyy_mm_dd_date(input)?;
    Ok((input, ReportMode::Daily(date)))
}

/// Month number is checked when the report runs
fn monthly(input: &str) -> IResult<&str, ReportMode> {
    let (input, _) = tag_no_case("MONTHLY")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, year) = i32(input)?;
    let (input, _) = char('-')(input)?;
    let (input, month) = u32(input)?;
    Ok((input, ReportMode::Monthly { year, month }))
}

fn yearly(input: &str) -> IResult<&str, ReportMode> {
    let (input, _) = tag_no_case("YEARLY")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, year) = i32(input)?;
    Ok((input, ReportMode::Yearly(year)))
}

fn cumulative(input: &str) -> IResult<&str, ReportMode> {
    map(alt((tag_no_case("CUMULATIVE"), tag_no_case("TOTAL"))), |_| ReportMode::Cumulative)(input)
}

fn by_district(input: &str) -> IResult<&str, GroupBy> {
    let (input, _) = preceded(multispace1, tuple((tag_no_case("BY"), multispace1, tag_no_case("DISTRICT"))))(input)?;
    Ok((input, GroupBy::District))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::aggregate::ReportMode;
    use crate::parser::report::parse_report;
    use crate::parser::{GroupBy, Statement};

    #[test]
    fn test() {
        let result = parse_report("daily 2024-01-05");
        assert_eq!(result, Ok(("", Statement::Report(ReportMode::Daily(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()), GroupBy::None))));

        let result = parse_report("MONTHLY 2024-01 by district");
        assert_eq!(result, Ok(("", Statement::Report(ReportMode::Monthly { year: 2024, month: 1 }, GroupBy::District))));

        let result = parse_report("yearly 2023");
        assert_eq!(result, Ok(("", Statement::Report(ReportMode::Yearly(2023), GroupBy::None))));

        let result = parse_report("TOTAL BY  DISTRICT");
        assert_eq!(result, Ok(("", Statement::Report(ReportMode::Cumulative, GroupBy::District))));

        let result = parse_report("cumulative");
        assert_eq!(result, Ok(("", Statement::Report(ReportMode::Cumulative, GroupBy::None))));
    }
}
