use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, i64, multispace1};
use nom::combinator::recognize;
use nom::sequence::tuple;
use nom::IResult;
use crate::parser::{text_value, yyyy_mm_dd_date, Statement};
use crate::trip::TripRecord;

/// `ADD 2024-01-05 港区 14:30 2500 現金`
///
/// Time and amount are only checked for shape here, range checks happen when the trip is stored.
pub(crate) fn parse_add(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag_no_case("ADD")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, date) = yyyy_mm_dd_date(input)?;
    let (input, _) = multispace1(input)?;
    let (input, district) = text_value(input)?;
    let (input, _) = multispace1(input)?;
    let (input, time) = recognize(tuple((digit1, char(':'), digit1)))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, amount) = i64(input)?;
    let (input, _) = multispace1(input)?;
    let (input, payment_method) = text_value(input)?;

    Ok((input, Statement::Add(TripRecord::new(date, district, time, amount, payment_method))))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::parser::add::parse_add;
    use crate::parser::Statement;
    use crate::trip::TripRecord;

    #[test]
    fn test() {
        let statement = "ADD 2024-03-01 'Haneda Airport T3' 06:10 7200 'QRコード決済'";
        let (_, result) = parse_add(statement).unwrap();
        assert_eq!(result, Statement::Add(TripRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "Haneda Airport T3", "06:10", 7200, "QRコード決済")));

        // Out of range values parse, validation rejects them later
        let (_, result) = parse_add("add 2024-03-01 北区 25:99 -1 現金").unwrap();
        if let Statement::Add(trip) = result {
            assert_eq!(trip.time, "25:99");
            assert_eq!(trip.amount, -1);
        } else {
            panic!("Unexpected results");
        }

        assert!(parse_add("ADD 2024-03-01 北区 1500 現金").is_err());
    }
}
