use chrono::{Local, NaiveDate};

use crate::error::{Result, SaintError};

// `%y` goes before `%Y`: a two digit year would otherwise parse as year 25 AD.
const FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// Parses a date given on the command line.
///
/// `YYYY-MM-DD` is the documented form; `MM/DD/YY` and `MM/DD/YYYY` are
/// accepted as well.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .ok_or_else(|| SaintError::InvalidDate(input.to_string()))
}

/// Falls back to the local calendar date.
pub fn resolve(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}
