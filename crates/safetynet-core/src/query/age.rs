//! Age derivation from stored birth dates.

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

use crate::models::BIRTHDATE_FORMAT;

/// Age calculation errors.
#[derive(Error, Debug)]
pub enum AgeError {
    #[error("malformed birth date '{birthdate}': {source}")]
    MalformedBirthdate {
        birthdate: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type AgeResult<T> = Result<T, AgeError>;

/// Parse a "MM/DD/YYYY" birth date.
pub fn parse_birthdate(birthdate: &str) -> AgeResult<NaiveDate> {
    NaiveDate::parse_from_str(birthdate, BIRTHDATE_FORMAT).map_err(|source| {
        AgeError::MalformedBirthdate {
            birthdate: birthdate.to_string(),
            source,
        }
    })
}

/// Whole years elapsed between the birth date and today (local time).
pub fn calculate_age(birthdate: &str) -> AgeResult<u32> {
    calculate_age_on(birthdate, Local::now().date_naive())
}

/// Whole years elapsed between the birth date and `today`.
///
/// A birth date after `today` yields 0.
pub fn calculate_age_on(birthdate: &str, today: NaiveDate) -> AgeResult<u32> {
    let born = parse_birthdate(birthdate)?;
    Ok(whole_years_between(born, today))
}

fn whole_years_between(born: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
