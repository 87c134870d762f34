use chrono::NaiveDate;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("expected \"<Month> <Day>, <Year>\", got {0:?}")]
    TooFewTokens(String),
    #[error("unknown month name {0:?}")]
    UnknownMonth(String),
    #[error("invalid day {0:?}")]
    InvalidDay(String),
    #[error("invalid year {0:?}")]
    InvalidYear(String),
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    OutOfRange { year: i32, month: u32, day: u32 },
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Converts `"January 1, 2018"` into `(2018, 1, 1)`.
///
/// Tokens after the year are ignored. The month name must be spelled out in
/// full (ASCII case does not matter).
pub fn format_date(date: &str) -> Result<(i32, u32, u32), DateError> {
    let mut tokens = date.split_whitespace();
    let (Some(month), Some(day), Some(year)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(DateError::TooFewTokens(date.to_owned()));
    };

    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))
        .ok_or_else(|| DateError::UnknownMonth(month.to_owned()))?
        + 1;
    let day = day
        .replace(',', "")
        .parse()
        .map_err(|_| DateError::InvalidDay(day.to_owned()))?;
    let year = year
        .parse()
        .map_err(|_| DateError::InvalidYear(year.to_owned()))?;

    Ok((year, month as u32, day))
}

pub fn parse_date(date: &str) -> Result<NaiveDate, DateError> {
    let (year, month, day) = format_date(date)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::OutOfRange { year, month, day })
}

/// Days between the received date and the posted "as of" date.
/// Negative once the case is already past the inquiry threshold.
pub fn days_for_inquiry(received: NaiveDate, as_of: NaiveDate) -> i64 {
    (received - as_of).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_documented_dates() {
        assert_eq!(format_date("January 1, 2018"), Ok((2018, 1, 1)));
        assert_eq!(format_date("December 31, 2020"), Ok((2020, 12, 31)));
        assert_eq!(format_date("  march 7 2019 "), Ok((2019, 3, 7)));
        assert_eq!(format_date("May 12, 2021 (posted)"), Ok((2021, 5, 12)));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(
            format_date("Smarch 1, 2018"),
            Err(DateError::UnknownMonth("Smarch".to_owned()))
        );
        assert_eq!(
            format_date("June 2018"),
            Err(DateError::TooFewTokens("June 2018".to_owned()))
        );
        assert_eq!(
            format_date("June first, 2018"),
            Err(DateError::InvalidDay("first,".to_owned()))
        );
        assert_eq!(
            format_date("June 1, '18"),
            Err(DateError::InvalidYear("'18".to_owned()))
        );
        assert_eq!(
            parse_date("February 30, 2020"),
            Err(DateError::OutOfRange { year: 2020, month: 2, day: 30 })
        );
    }

    #[test]
    fn day_difference() {
        assert_eq!(days_for_inquiry(ymd(2020, 1, 1), ymd(2019, 12, 1)), 31);
        assert_eq!(days_for_inquiry(ymd(2019, 12, 1), ymd(2020, 1, 1)), -31);
        assert_eq!(days_for_inquiry(ymd(2020, 3, 1), ymd(2020, 2, 1)), 29);
        assert_eq!(days_for_inquiry(ymd(2020, 3, 1), ymd(2020, 3, 1)), 0);
    }
}
